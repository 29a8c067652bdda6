use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::{Catalog, VocabularyEntry};
use crate::session::quiz::{QuizSession, SubmitOutcome, sample_items};
use crate::session::report::ExerciseReport;
use crate::session::wizard::Wizard;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseMode {
    Wizard,
    InProgress,
    Report,
}

#[derive(Clone, Debug)]
enum Phase {
    Wizard,
    Running(QuizSession),
    Finished(ExerciseReport),
}

/// The exercise screen's state machine: wizard, then a running quiz, then the
/// report. Dropping it (leaving the screen) discards everything, timer
/// included.
pub struct Exercise {
    wizard: Wizard,
    phase: Phase,
    rng: SmallRng,
    announcement: Option<String>,
}

impl Exercise {
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_rng(catalog, SmallRng::from_entropy())
    }

    pub fn with_rng(catalog: &Catalog, rng: SmallRng) -> Self {
        Self {
            wizard: Wizard::new(catalog),
            phase: Phase::Wizard,
            rng,
            announcement: None,
        }
    }

    pub fn mode(&self) -> ExerciseMode {
        match self.phase {
            Phase::Wizard => ExerciseMode::Wizard,
            Phase::Running(_) => ExerciseMode::InProgress,
            Phase::Finished(_) => ExerciseMode::Report,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Wizard mutations are only meaningful while configuring.
    pub fn wizard_mut(&mut self) -> Option<&mut Wizard> {
        match self.phase {
            Phase::Wizard => Some(&mut self.wizard),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            Phase::Running(session) => Some(session),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&ExerciseReport> {
        match &self.phase {
            Phase::Finished(report) => Some(report),
            _ => None,
        }
    }

    pub fn current_item(&self) -> Option<&VocabularyEntry> {
        self.session().and_then(QuizSession::current_item)
    }

    /// Word of the question just put on screen, handed out once.
    pub fn take_announcement(&mut self) -> Option<String> {
        self.announcement.take()
    }

    /// Samples the pool and enters the running state. Returns false (and
    /// changes nothing) when the wizard cannot start.
    pub fn start(&mut self, catalog: &Catalog, now: Instant) -> bool {
        if !matches!(self.phase, Phase::Wizard) || !self.wizard.can_start() {
            return false;
        }
        let pool = self.wizard.pool(catalog);
        let state = self.wizard.state();
        let items = sample_items(&pool, state.number_of_words, &mut self.rng);
        if items.is_empty() {
            return false;
        }

        tracing::info!(
            stage = state.selected_stage.as_str(),
            category = state.selected_category.as_str(),
            items = items.len(),
            pool = pool.len(),
            max_time_seconds = state.max_time_seconds,
            "exercise started"
        );
        let session = QuizSession::start(items, state.max_time_seconds, now);
        self.announcement = session.current_item().map(|e| e.word.clone());
        self.phase = Phase::Running(session);
        true
    }

    pub fn type_char(&mut self, ch: char) {
        if let Phase::Running(session) = &mut self.phase {
            session.type_char(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Phase::Running(session) = &mut self.phase {
            session.backspace();
        }
    }

    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        let outcome = match &mut self.phase {
            Phase::Running(session) => session.submit(now),
            _ => SubmitOutcome::Ignored,
        };
        self.after_submit(outcome);
        outcome
    }

    pub fn tick(&mut self, now: Instant) -> Option<SubmitOutcome> {
        let outcome = match &mut self.phase {
            Phase::Running(session) => session.tick(now),
            _ => None,
        }?;
        self.after_submit(outcome);
        Some(outcome)
    }

    fn after_submit(&mut self, outcome: SubmitOutcome) {
        let SubmitOutcome::Recorded { finished, .. } = outcome else {
            return;
        };
        if !finished {
            self.announcement = self.current_item().map(|e| e.word.clone());
            return;
        }

        let phase = std::mem::replace(&mut self.phase, Phase::Wizard);
        if let Phase::Running(session) = phase {
            let report = ExerciseReport::from_attempts(&session.into_attempts());
            tracing::info!(
                correct = report.correct_count,
                total = report.total_count,
                percent = report.percent_correct,
                "exercise finished"
            );
            self.phase = Phase::Finished(report);
        }
        self.announcement = None;
    }

    /// Abandons a running session and returns to step 1 with defaults.
    pub fn cancel(&mut self, catalog: &Catalog) {
        if let Phase::Running(session) = &mut self.phase {
            session.cancel();
            tracing::info!(
                answered = session.attempts().len(),
                total = session.total_questions(),
                "exercise cancelled"
            );
        }
        self.reset_to_wizard(catalog);
    }

    pub fn reset_to_wizard(&mut self, catalog: &Catalog) {
        if let Phase::Running(session) = &mut self.phase {
            session.cancel();
        }
        self.phase = Phase::Wizard;
        self.announcement = None;
        self.wizard.reset(catalog);
    }

    /// Word for a report row, for replaying its pronunciation.
    pub fn report_word(&self, row: usize) -> Option<&str> {
        self.report()
            .and_then(|r| r.rows.get(row))
            .map(|r| r.word.as_str())
    }
}
