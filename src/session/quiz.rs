use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::VocabularyEntry;
use crate::engine::scoring;
use crate::session::input::AnswerInput;
use crate::session::timer::{QuestionTimer, TimerPoll};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    pub item: VocabularyEntry,
    pub attempt_text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    Timeout,
}

impl SubmitTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmitTrigger::Manual => "manual",
            SubmitTrigger::Timeout => "timeout",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded { index: usize, finished: bool },
    /// The index already has an attempt, or is not the active question.
    Ignored,
}

/// Draws a uniformly random permutation of the pool and keeps the first
/// `count` entries (never more than the pool holds).
pub fn sample_items<R: Rng + ?Sized>(
    pool: &[&VocabularyEntry],
    count: usize,
    rng: &mut R,
) -> Vec<VocabularyEntry> {
    let mut shuffled: Vec<&VocabularyEntry> = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled
        .into_iter()
        .take(count.min(pool.len()))
        .cloned()
        .collect()
}

/// One run of the timed spelling quiz. `items` is fixed at start; attempts are
/// appended in item order, at most one per index.
#[derive(Clone, Debug)]
pub struct QuizSession {
    items: Vec<VocabularyEntry>,
    current_index: usize,
    time_left_seconds: u32,
    max_time_seconds: u32,
    attempts: Vec<Attempt>,
    input: AnswerInput,
    timer: QuestionTimer,
}

impl QuizSession {
    pub fn start(items: Vec<VocabularyEntry>, max_time_seconds: u32, now: Instant) -> Self {
        let mut timer = QuestionTimer::arm(0, max_time_seconds, now);
        if items.is_empty() {
            timer.cancel();
        }
        Self {
            items,
            current_index: 0,
            time_left_seconds: max_time_seconds,
            max_time_seconds,
            attempts: Vec::new(),
            input: AnswerInput::new(),
            timer,
        }
    }

    pub fn items(&self) -> &[VocabularyEntry] {
        &self.items
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_item(&self) -> Option<&VocabularyEntry> {
        if self.is_finished() {
            return None;
        }
        self.items.get(self.current_index)
    }

    pub fn total_questions(&self) -> usize {
        self.items.len()
    }

    pub fn time_left_seconds(&self) -> u32 {
        self.time_left_seconds
    }

    pub fn max_time_seconds(&self) -> u32 {
        self.max_time_seconds
    }

    pub fn input(&self) -> &AnswerInput {
        &self.input
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn is_finished(&self) -> bool {
        self.attempts.len() >= self.items.len()
    }

    pub fn type_char(&mut self, ch: char) {
        if !self.is_finished() {
            self.input.insert(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.input.backspace();
    }

    /// Advances the countdown. On expiry the typed text (possibly empty) is
    /// submitted on the user's behalf.
    pub fn tick(&mut self, now: Instant) -> Option<SubmitOutcome> {
        match self.timer.poll(now) {
            TimerPoll::Inactive => None,
            TimerPoll::Running { remaining_secs } => {
                self.time_left_seconds = remaining_secs;
                None
            }
            TimerPoll::Expired { question_index } => {
                self.time_left_seconds = 0;
                tracing::debug!(question = question_index, "question timed out");
                Some(self.submit_for(question_index, SubmitTrigger::Timeout, now))
            }
        }
    }

    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        self.submit_for(self.current_index, SubmitTrigger::Manual, now)
    }

    /// Records the typed text for `index`. Idempotent per index: a second
    /// trigger for a question that already has an attempt is ignored.
    pub fn submit_for(&mut self, index: usize, trigger: SubmitTrigger, now: Instant) -> SubmitOutcome {
        if index != self.current_index || self.attempts.len() > index || self.is_finished() {
            tracing::debug!(index, trigger = trigger.as_str(), "duplicate submit ignored");
            return SubmitOutcome::Ignored;
        }
        let Some(item) = self.items.get(index).cloned() else {
            return SubmitOutcome::Ignored;
        };

        self.timer.cancel();
        let attempt_text = self.input.take();
        tracing::info!(
            index,
            trigger = trigger.as_str(),
            correct = scoring::is_correct(&attempt_text, &item.word),
            "attempt recorded"
        );
        self.attempts.push(Attempt { item, attempt_text });

        let finished = index + 1 == self.items.len();
        if !finished {
            self.current_index = index + 1;
            self.time_left_seconds = self.max_time_seconds;
            self.timer = QuestionTimer::arm(self.current_index, self.max_time_seconds, now);
        }
        SubmitOutcome::Recorded { index, finished }
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn into_attempts(mut self) -> Vec<Attempt> {
        self.timer.cancel();
        std::mem::take(&mut self.attempts)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::catalog::Stage;
    use crate::engine::selection::test_support::entry;

    fn items(words: &[&str]) -> Vec<VocabularyEntry> {
        words
            .iter()
            .map(|w| entry(w, "Science", Stage::General))
            .collect()
    }

    fn type_word(session: &mut QuizSession, word: &str) {
        for ch in word.chars() {
            session.type_char(ch);
        }
    }

    fn assert_invariants(session: &QuizSession) {
        assert!(session.attempts().len() <= session.items().len());
        for (i, attempt) in session.attempts().iter().enumerate() {
            assert_eq!(attempt.item, session.items()[i]);
        }
    }

    #[test]
    fn sample_is_clamped_and_unique() {
        let pool_items = items(&["a", "b", "c"]);
        let pool: Vec<&VocabularyEntry> = pool_items.iter().collect();
        let mut rng = SmallRng::seed_from_u64(7);
        let sampled = sample_items(&pool, 5, &mut rng);
        assert_eq!(sampled.len(), 3);
        let words: HashSet<&str> = sampled.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words.len(), 3);
        assert!(sampled.iter().all(|e| pool_items.contains(e)));
    }

    #[test]
    fn sample_takes_requested_count() {
        let pool_items = items(&["a", "b", "c", "d", "e", "f"]);
        let pool: Vec<&VocabularyEntry> = pool_items.iter().collect();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(sample_items(&pool, 4, &mut rng).len(), 4);
    }

    #[test]
    fn sample_reaches_every_first_position() {
        // Every entry should lead some permutation; a biased shuffle over
        // three items tends to starve one of them.
        let pool_items = items(&["a", "b", "c"]);
        let pool: Vec<&VocabularyEntry> = pool_items.iter().collect();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            let first = sample_items(&pool, 1, &mut rng).remove(0);
            let idx = pool_items.iter().position(|e| *e == first).unwrap();
            counts[idx] += 1;
        }
        for count in counts {
            assert!((800..1200).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn manual_submit_advances_and_resets_timer() {
        let t0 = Instant::now();
        let mut session = QuizSession::start(items(&["one", "two"]), 15, t0);
        session.tick(t0 + Duration::from_secs(4));
        assert_eq!(session.time_left_seconds(), 11);

        type_word(&mut session, "one");
        let outcome = session.submit(t0 + Duration::from_secs(5));
        assert_eq!(outcome, SubmitOutcome::Recorded { index: 0, finished: false });
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.time_left_seconds(), 15);
        assert!(session.input().is_empty());

        // The new question's countdown starts from the submit instant.
        session.tick(t0 + Duration::from_secs(6));
        assert_eq!(session.time_left_seconds(), 14);
        assert_invariants(&session);
    }

    #[test]
    fn timeout_records_empty_attempt_and_advances() {
        let t0 = Instant::now();
        let mut session = QuizSession::start(items(&["one", "two"]), 10, t0);
        for s in 1..10 {
            assert_eq!(session.tick(t0 + Duration::from_secs(s)), None);
        }
        let outcome = session.tick(t0 + Duration::from_secs(10));
        assert_eq!(
            outcome,
            Some(SubmitOutcome::Recorded { index: 0, finished: false })
        );
        assert_eq!(session.attempts()[0].attempt_text, "");
        assert_eq!(session.current_index(), 1);
        assert_invariants(&session);
    }

    #[test]
    fn timeout_submits_partial_text() {
        let t0 = Instant::now();
        let mut session = QuizSession::start(items(&["enzyme"]), 10, t0);
        type_word(&mut session, "enz");
        let outcome = session.tick(t0 + Duration::from_secs(11));
        assert_eq!(outcome, Some(SubmitOutcome::Recorded { index: 0, finished: true }));
        assert_eq!(session.attempts()[0].attempt_text, "enz");
        assert!(session.is_finished());
    }

    #[test]
    fn manual_and_timeout_in_same_tick_record_once() {
        let t0 = Instant::now();
        let mut session = QuizSession::start(items(&["one", "two", "three"]), 10, t0);
        let expiry = t0 + Duration::from_secs(10);

        type_word(&mut session, "one");
        session.submit(expiry);
        let stale = session.submit_for(0, SubmitTrigger::Timeout, expiry);
        assert_eq!(stale, SubmitOutcome::Ignored);
        // The old question's timer was replaced, so the tick fires nothing.
        assert_eq!(session.tick(expiry), None);

        assert_eq!(session.attempts().len(), 1);
        assert_eq!(session.current_index(), 1);
        assert_invariants(&session);
    }

    #[test]
    fn timeout_then_manual_in_same_tick_record_once() {
        let t0 = Instant::now();
        let mut session = QuizSession::start(items(&["one", "two"]), 10, t0);
        let expiry = t0 + Duration::from_secs(10);
        session.tick(expiry);
        // A manual submit now targets question 1, not the one that expired.
        assert_eq!(session.attempts().len(), 1);
        assert_eq!(session.submit_for(0, SubmitTrigger::Manual, expiry), SubmitOutcome::Ignored);
        assert_eq!(session.attempts().len(), 1);
        assert_invariants(&session);
    }

    #[test]
    fn last_question_finishes_and_stops_timer() {
        let t0 = Instant::now();
        let mut session = QuizSession::start(items(&["only"]), 10, t0);
        type_word(&mut session, "only");
        assert_eq!(
            session.submit(t0),
            SubmitOutcome::Recorded { index: 0, finished: true }
        );
        assert!(session.is_finished());
        assert!(!session.timer_active());
        assert!(session.current_item().is_none());
        assert_eq!(session.submit(t0), SubmitOutcome::Ignored);
        assert_eq!(session.tick(t0 + Duration::from_secs(60)), None);
        assert_eq!(session.attempts().len(), 1);
    }

    #[test]
    fn typing_after_finish_is_ignored() {
        let t0 = Instant::now();
        let mut session = QuizSession::start(items(&["only"]), 10, t0);
        session.submit(t0);
        session.type_char('x');
        assert!(session.input().is_empty());
    }

    #[test]
    fn cancel_stops_countdown() {
        let t0 = Instant::now();
        let mut session = QuizSession::start(items(&["one"]), 10, t0);
        session.cancel();
        assert_eq!(session.tick(t0 + Duration::from_secs(30)), None);
        assert!(session.attempts().is_empty());
    }

    #[test]
    fn attempts_follow_item_order() {
        let t0 = Instant::now();
        let mut session = QuizSession::start(items(&["a", "b", "c"]), 10, t0);
        let mut now = t0;
        while !session.is_finished() {
            now += Duration::from_secs(3);
            let word = session.current_item().unwrap().word.clone();
            type_word(&mut session, &word);
            session.submit(now);
            assert_invariants(&session);
        }
        assert_eq!(session.attempts().len(), 3);
        assert_eq!(scoring::correct_count(session.attempts()), 3);
    }
}
