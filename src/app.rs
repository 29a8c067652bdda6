use std::path::PathBuf;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::catalog::word_list::{self, WordListQuery};
use crate::catalog::{Catalog, VocabularyEntry};
use crate::config::Config;
use crate::session::exercise::{Exercise, ExerciseMode};
use crate::session::quiz::SubmitOutcome;
use crate::session::wizard::WizardStep;
use crate::speech::Speaker;
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    WordList,
    Practice,
    Exercise,
    Help,
}

impl Route {
    /// Unknown paths land on Home.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let normalised = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match normalised {
            "" | "/" => Route::Home,
            "/word-list" => Route::WordList,
            "/practice" => Route::Practice,
            "/exercise" => Route::Exercise,
            "/help" => Route::Help,
            other => {
                tracing::debug!(path = other, "unknown route, falling back to home");
                Route::Home
            }
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::WordList => "/word-list",
            Route::Practice => "/practice",
            Route::Exercise => "/exercise",
            Route::Help => "/help",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::WordList => "Word List",
            Route::Practice => "Practice",
            Route::Exercise => "Exercise",
            Route::Help => "Help",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PracticeState {
    pub current: Option<usize>,
    pub revealed: bool,
}

pub struct App {
    pub route: Route,
    pub catalog: Catalog,
    pub config: Config,
    pub theme: Theme,
    pub menu: Menu,
    pub exercise: Option<Exercise>,
    pub word_list: WordListQuery,
    pub word_list_scroll: usize,
    pub practice: PracticeState,
    pub report_selected: usize,
    pub notice: Option<String>,
    pub should_quit: bool,
    speaker: Box<dyn Speaker>,
    config_path: PathBuf,
    rng: SmallRng,
}

impl App {
    pub fn new(
        catalog: Catalog,
        config: Config,
        speaker: Box<dyn Speaker>,
        config_path: PathBuf,
    ) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_default();
        Self {
            route: Route::Home,
            catalog,
            config,
            theme,
            menu: Menu::new(),
            exercise: None,
            word_list: WordListQuery::default(),
            word_list_scroll: 0,
            practice: PracticeState::default(),
            report_selected: 0,
            notice: None,
            should_quit: false,
            speaker,
            config_path,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        self.rng = rng;
        self
    }

    /// Overrides the theme for this run only; the config file is untouched.
    pub fn use_theme(&mut self, name: &str) -> bool {
        match Theme::load(name) {
            Some(theme) => {
                self.theme = theme;
                true
            }
            None => false,
        }
    }

    pub fn can_pronounce(&self) -> bool {
        self.speaker.is_available()
    }

    // --- navigation -------------------------------------------------------

    /// Leaving the exercise screen drops its state, live timer included.
    pub fn go_to(&mut self, route: Route) {
        if self.route == route {
            return;
        }
        if self.route == Route::Exercise
            && let Some(mut exercise) = self.exercise.take()
        {
            if exercise.mode() == ExerciseMode::InProgress {
                exercise.cancel(&self.catalog);
            }
            tracing::debug!("exercise state discarded");
        }
        self.speaker.cancel();
        self.notice = None;

        match route {
            Route::Exercise => {
                let rng = SmallRng::seed_from_u64(self.rng.r#gen());
                self.exercise = Some(Exercise::with_rng(&self.catalog, rng));
                self.report_selected = 0;
            }
            Route::Practice if self.practice.current.is_none() => self.next_card(),
            _ => {}
        }
        tracing::debug!(from = self.route.path(), to = route.path(), "navigate");
        self.route = route;
    }

    pub fn go_home(&mut self) {
        self.go_to(Route::Home);
    }

    // --- settings ---------------------------------------------------------

    fn save_config(&mut self) {
        if let Err(e) = self.config.save_to(&self.config_path) {
            tracing::warn!(error = %e, path = %self.config_path.display(), "failed to save settings");
            self.notice = Some(format!("Could not save settings: {e}"));
        }
    }

    pub fn toggle_theme(&mut self) {
        self.config.theme = self.theme.name.clone();
        self.config.toggle_theme();
        self.theme = Theme::load(&self.config.theme).unwrap_or_default();
        self.save_config();
    }

    pub fn toggle_auto_speak(&mut self) {
        self.config.auto_speak = !self.config.auto_speak;
        self.notice = Some(if self.config.auto_speak {
            "Auto-speak on".to_string()
        } else {
            "Auto-speak off".to_string()
        });
        self.save_config();
    }

    // --- exercise ---------------------------------------------------------

    pub fn exercise_mode(&self) -> Option<ExerciseMode> {
        self.exercise.as_ref().map(Exercise::mode)
    }

    /// Left/right on the current wizard step. `delta` is the step size for
    /// numeric values; lists move one entry in its direction.
    pub fn wizard_adjust(&mut self, delta: i32) {
        let catalog = &self.catalog;
        let Some(wizard) = self.exercise.as_mut().and_then(Exercise::wizard_mut) else {
            return;
        };
        let forward = delta > 0;
        match wizard.step() {
            WizardStep::Stage => wizard.cycle_stage(catalog, forward),
            WizardStep::Category => wizard.cycle_category(catalog, forward),
            WizardStep::WordCount => wizard.adjust_number_of_words(delta as isize),
            WizardStep::TimeLimit => wizard.adjust_max_time_seconds(delta),
            WizardStep::Start => {}
        }
    }

    /// Enter on the wizard: next step, or start on the last one.
    pub fn wizard_advance(&mut self, now: Instant) {
        let Some(exercise) = self.exercise.as_mut() else {
            return;
        };
        let Some(wizard) = exercise.wizard_mut() else {
            return;
        };
        if wizard.step() == WizardStep::Start {
            if exercise.start(&self.catalog, now) {
                self.announce();
            }
        } else {
            wizard.next();
        }
    }

    pub fn wizard_back(&mut self) {
        if let Some(wizard) = self.exercise.as_mut().and_then(Exercise::wizard_mut) {
            wizard.back();
        }
    }

    pub fn type_char(&mut self, ch: char) {
        if let Some(exercise) = self.exercise.as_mut() {
            exercise.type_char(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(exercise) = self.exercise.as_mut() {
            exercise.backspace();
        }
    }

    pub fn submit_answer(&mut self, now: Instant) {
        let outcome = match self.exercise.as_mut() {
            Some(exercise) => exercise.submit(now),
            None => return,
        };
        self.after_submit(outcome);
    }

    /// Drives the countdown; a timeout submits like Enter would.
    pub fn tick(&mut self, now: Instant) {
        let outcome = self.exercise.as_mut().and_then(|e| e.tick(now));
        if let Some(outcome) = outcome {
            self.after_submit(outcome);
        }
    }

    fn after_submit(&mut self, outcome: SubmitOutcome) {
        let SubmitOutcome::Recorded { finished, .. } = outcome else {
            return;
        };
        if finished {
            self.speaker.cancel();
            self.report_selected = 0;
        } else {
            self.announce();
        }
    }

    fn announce(&mut self) {
        let Some(word) = self.exercise.as_mut().and_then(Exercise::take_announcement) else {
            return;
        };
        if self.config.auto_speak {
            self.speaker.speak(&word);
        } else {
            self.speaker.cancel();
        }
    }

    pub fn cancel_exercise(&mut self) {
        if let Some(exercise) = self.exercise.as_mut() {
            exercise.cancel(&self.catalog);
        }
        self.speaker.cancel();
    }

    pub fn attempt_another(&mut self) {
        if let Some(exercise) = self.exercise.as_mut() {
            exercise.reset_to_wizard(&self.catalog);
        }
        self.report_selected = 0;
    }

    pub fn pronounce_current(&mut self) {
        let word = self
            .exercise
            .as_ref()
            .and_then(Exercise::current_item)
            .map(|item| item.word.clone());
        if let Some(word) = word {
            self.speaker.speak(&word);
        }
    }

    pub fn report_select(&mut self, delta: isize) {
        let rows = self
            .exercise
            .as_ref()
            .and_then(Exercise::report)
            .map_or(0, |r| r.rows.len());
        if rows == 0 {
            return;
        }
        self.report_selected = self
            .report_selected
            .saturating_add_signed(delta)
            .min(rows - 1);
    }

    pub fn pronounce_report_row(&mut self) {
        let word = self
            .exercise
            .as_ref()
            .and_then(|e| e.report_word(self.report_selected))
            .map(str::to_string);
        if let Some(word) = word {
            self.speaker.speak(&word);
        }
    }

    // --- word list --------------------------------------------------------

    pub fn word_list_toggle_group(&mut self) {
        self.word_list.group_by = self.word_list.group_by.toggle();
        self.word_list_scroll = 0;
    }

    pub fn word_list_cycle_sort(&mut self) {
        self.word_list.sort = self.word_list.sort.next();
        self.word_list_scroll = 0;
    }

    /// Steps through None, then each category in order, then back to None.
    pub fn word_list_cycle_category(&mut self) {
        let options = word_list::category_options(&self.catalog);
        self.word_list.category_filter = cycle_option(&options, self.word_list.category_filter.as_ref());
        self.word_list_scroll = 0;
    }

    pub fn word_list_cycle_letter(&mut self) {
        let options = word_list::starts_with_options(&self.catalog);
        self.word_list.starts_with_filter =
            cycle_option(&options, self.word_list.starts_with_filter.as_ref());
        self.word_list_scroll = 0;
    }

    pub fn word_list_clear_filters(&mut self) {
        self.word_list.clear_filters();
        self.word_list_scroll = 0;
    }

    pub fn word_list_scroll_by(&mut self, delta: isize, max: usize) {
        self.word_list_scroll = self
            .word_list_scroll
            .saturating_add_signed(delta)
            .min(max);
    }

    // --- practice ---------------------------------------------------------

    pub fn practice_entry(&self) -> Option<&VocabularyEntry> {
        self.practice
            .current
            .and_then(|i| self.catalog.entries().get(i))
    }

    pub fn next_card(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            self.practice.current = None;
            return;
        }
        let mut index = self.rng.gen_range(0..len);
        if len > 1 && Some(index) == self.practice.current {
            index = (index + 1) % len;
        }
        self.practice = PracticeState {
            current: Some(index),
            revealed: false,
        };
        self.speaker.cancel();
    }

    pub fn reveal_card(&mut self) {
        self.practice.revealed = !self.practice.revealed;
    }

    pub fn pronounce_card(&mut self) {
        let word = self.practice_entry().map(|e| e.word.clone());
        if let Some(word) = word {
            self.speaker.speak(&word);
        }
    }
}

fn cycle_option<T: Clone + PartialEq>(options: &[T], current: Option<&T>) -> Option<T> {
    match current.and_then(|c| options.iter().position(|o| o == c)) {
        None => options.first().cloned(),
        Some(i) => options.get(i + 1).cloned(),
    }
}
