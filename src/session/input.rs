/// Text typed for the active question. Captured verbatim on submit, including
/// surrounding whitespace; normalisation is the scorer's job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerInput {
    text: String,
}

/// Longest answer accepted; extra keystrokes are dropped.
pub const MAX_ANSWER_CHARS: usize = 64;

impl AnswerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns false when the character was rejected.
    pub fn insert(&mut self, ch: char) -> bool {
        if ch.is_control() || self.text.chars().count() >= MAX_ANSWER_CHARS {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut input = AnswerInput::new();
        for ch in "enzyne".chars() {
            input.insert(ch);
        }
        input.backspace();
        input.backspace();
        input.insert('m');
        input.insert('e');
        assert_eq!(input.value(), "enzyme");
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut input = AnswerInput::new();
        input.backspace();
        assert!(input.is_empty());
    }

    #[test]
    fn control_chars_rejected() {
        let mut input = AnswerInput::new();
        assert!(!input.insert('\n'));
        assert!(!input.insert('\t'));
        assert!(input.insert(' '));
        assert_eq!(input.value(), " ");
    }

    #[test]
    fn length_is_capped() {
        let mut input = AnswerInput::new();
        for _ in 0..MAX_ANSWER_CHARS {
            assert!(input.insert('a'));
        }
        assert!(!input.insert('b'));
        assert_eq!(input.value().len(), MAX_ANSWER_CHARS);
    }

    #[test]
    fn take_leaves_input_empty() {
        let mut input = AnswerInput::new();
        input.insert('x');
        assert_eq!(input.take(), "x");
        assert!(input.is_empty());
    }
}
