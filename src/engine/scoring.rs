use crate::session::quiz::Attempt;

fn normalise_for_compare(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Purely textual match: surrounding whitespace and letter case are ignored,
/// nothing else is.
pub fn is_correct(attempt_text: &str, target_word: &str) -> bool {
    normalise_for_compare(attempt_text) == normalise_for_compare(target_word)
}

pub fn attempt_is_correct(attempt: &Attempt) -> bool {
    is_correct(&attempt.attempt_text, &attempt.item.word)
}

pub fn correct_count(attempts: &[Attempt]) -> usize {
    attempts.iter().filter(|a| attempt_is_correct(a)).count()
}

pub fn percent_correct(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}
