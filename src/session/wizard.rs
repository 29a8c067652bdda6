use crate::catalog::{Catalog, StageSelector, VocabularyEntry};
use crate::engine::selection::{categories_for_stage, pool_for_selection};

pub const DEFAULT_NUMBER_OF_WORDS: usize = 10;
pub const DEFAULT_MAX_TIME_SECONDS: u32 = 15;
pub const MIN_TIME_SECONDS: u32 = 10;
pub const MAX_TIME_SECONDS: u32 = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    Stage,
    Category,
    WordCount,
    TimeLimit,
    Start,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Stage,
        WizardStep::Category,
        WizardStep::WordCount,
        WizardStep::TimeLimit,
        WizardStep::Start,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// 1-based position.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn from_number(n: usize) -> Self {
        Self::ALL[n.clamp(1, Self::COUNT) - 1]
    }

    pub fn name(self) -> &'static str {
        match self {
            WizardStep::Stage => "Select Stage",
            WizardStep::Category => "Select Category",
            WizardStep::WordCount => "Select Number of Words",
            WizardStep::TimeLimit => "Set maximum time per word",
            WizardStep::Start => "Start Exercise",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub selected_stage: StageSelector,
    pub selected_category: String,
    pub number_of_words: usize,
    pub max_time_seconds: u32,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: WizardStep::Stage,
            selected_stage: StageSelector::General,
            selected_category: String::new(),
            number_of_words: DEFAULT_NUMBER_OF_WORDS,
            max_time_seconds: DEFAULT_MAX_TIME_SECONDS,
        }
    }
}

/// Five-step linear configuration flow. Every mutator that can change the
/// derived category list or pool takes the catalog and re-applies the
/// category/word-count corrections before returning.
#[derive(Clone, Debug)]
pub struct Wizard {
    state: WizardState,
    categories: Vec<String>,
    pool_size: usize,
}

impl Wizard {
    pub fn new(catalog: &Catalog) -> Self {
        let mut wizard = Self {
            state: WizardState::default(),
            categories: Vec::new(),
            pool_size: 0,
        };
        wizard.refresh(catalog);
        wizard
    }

    pub fn reset(&mut self, catalog: &Catalog) {
        self.state = WizardState::default();
        self.refresh(catalog);
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Upper bound offered for the word-count slider.
    pub fn max_words(&self) -> usize {
        self.pool_size.max(1)
    }

    pub fn pool<'a>(&self, catalog: &'a Catalog) -> Vec<&'a VocabularyEntry> {
        pool_for_selection(catalog, self.state.selected_stage, &self.state.selected_category)
    }

    fn refresh(&mut self, catalog: &Catalog) {
        self.categories = categories_for_stage(catalog, self.state.selected_stage);

        match self.categories.first() {
            None => self.state.selected_category.clear(),
            Some(first) => {
                if !self.categories.contains(&self.state.selected_category) {
                    self.state.selected_category = first.clone();
                }
            }
        }

        self.pool_size = self.pool(catalog).len();
        self.state.number_of_words = self.state.number_of_words.clamp(1, self.max_words());
    }

    pub fn set_stage(&mut self, catalog: &Catalog, stage: StageSelector) {
        self.state.selected_stage = stage;
        self.refresh(catalog);
    }

    pub fn cycle_stage(&mut self, catalog: &Catalog, forward: bool) {
        let stage = if forward {
            self.state.selected_stage.next()
        } else {
            self.state.selected_stage.prev()
        };
        self.set_stage(catalog, stage);
    }

    /// Accepts only categories present in the current list.
    pub fn set_category(&mut self, catalog: &Catalog, category: &str) -> bool {
        if !self.categories.iter().any(|c| c == category) {
            return false;
        }
        self.state.selected_category = category.to_string();
        self.refresh(catalog);
        true
    }

    pub fn cycle_category(&mut self, catalog: &Catalog, forward: bool) {
        if self.categories.is_empty() {
            return;
        }
        let len = self.categories.len();
        let idx = self
            .categories
            .iter()
            .position(|c| *c == self.state.selected_category)
            .unwrap_or(0);
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        let category = self.categories[next].clone();
        self.set_category(catalog, &category);
    }

    pub fn set_number_of_words(&mut self, n: usize) {
        self.state.number_of_words = n.clamp(1, self.max_words());
    }

    pub fn adjust_number_of_words(&mut self, delta: isize) {
        let n = self.state.number_of_words.saturating_add_signed(delta);
        self.set_number_of_words(n);
    }

    pub fn set_max_time_seconds(&mut self, secs: u32) {
        self.state.max_time_seconds = secs.clamp(MIN_TIME_SECONDS, MAX_TIME_SECONDS);
    }

    pub fn adjust_max_time_seconds(&mut self, delta: i32) {
        let secs = self.state.max_time_seconds.saturating_add_signed(delta);
        self.set_max_time_seconds(secs);
    }

    fn has_pool(&self) -> bool {
        !self.state.selected_category.is_empty() && self.pool_size > 0
    }

    pub fn can_go_next(&self) -> bool {
        match self.state.current_step {
            WizardStep::Stage => true,
            WizardStep::Category => !self.state.selected_category.is_empty(),
            WizardStep::WordCount => self.has_pool(),
            WizardStep::TimeLimit => true,
            WizardStep::Start => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.state.current_step > WizardStep::Stage
    }

    pub fn can_start(&self) -> bool {
        self.state.current_step == WizardStep::Start && self.has_pool()
    }

    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.state.current_step = WizardStep::from_number(self.state.current_step.number() + 1);
        true
    }

    pub fn back(&mut self) {
        self.state.current_step =
            WizardStep::from_number(self.state.current_step.number().saturating_sub(1));
    }

    /// Fraction of the flow completed, for the progress bar.
    pub fn progress(&self) -> f64 {
        (self.state.current_step.number() - 1) as f64 / (WizardStep::COUNT - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Stage;
    use crate::engine::selection::test_support::{entry, sample_catalog};

    #[test]
    fn starts_with_defaults_and_first_category() {
        let catalog = sample_catalog();
        let wizard = Wizard::new(&catalog);
        let state = wizard.state();
        assert_eq!(state.current_step, WizardStep::Stage);
        assert_eq!(state.selected_stage, StageSelector::General);
        assert_eq!(state.selected_category, "english");
        assert_eq!(state.max_time_seconds, 15);
        // One General english word, so the default of 10 is clamped.
        assert_eq!(state.number_of_words, 1);
    }

    #[test]
    fn next_and_back_stay_in_bounds() {
        let catalog = sample_catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.back();
        assert_eq!(wizard.step(), WizardStep::Stage);
        for _ in 0..10 {
            wizard.next();
        }
        assert_eq!(wizard.step(), WizardStep::Start);
        assert!(!wizard.next());
        assert_eq!(wizard.step().number(), 5);
    }

    #[test]
    fn category_step_blocks_without_category() {
        let catalog = Catalog::from_entries(vec![entry("enzyme", "Science", Stage::Ks4)]);
        let mut wizard = Wizard::new(&catalog);
        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::Category);
        assert_eq!(wizard.state().selected_category, "");
        assert!(!wizard.can_go_next());
        assert!(!wizard.next());

        wizard.set_stage(&catalog, StageSelector::Ks4);
        assert_eq!(wizard.state().selected_category, "Science");
        assert!(wizard.can_go_next());
    }

    #[test]
    fn set_category_rejects_unknown() {
        let catalog = sample_catalog();
        let mut wizard = Wizard::new(&catalog);
        assert!(!wizard.set_category(&catalog, "Economics"));
        assert!(wizard.set_category(&catalog, "Science"));
        assert_eq!(wizard.pool_size(), 3);
    }

    #[test]
    fn stage_change_resets_missing_category() {
        let catalog = sample_catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.set_stage(&catalog, StageSelector::Ks4);
        assert!(wizard.set_category(&catalog, "Economics"));

        wizard.set_stage(&catalog, StageSelector::Mixed);
        assert_eq!(wizard.state().selected_category, "Economics");

        wizard.set_stage(&catalog, StageSelector::Ks3);
        assert_eq!(wizard.state().selected_category, "Computing");
    }

    #[test]
    fn ks3_to_mixed_keeps_valid_selection() {
        let catalog = sample_catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.set_stage(&catalog, StageSelector::Ks3);
        assert_eq!(wizard.categories(), ["Computing", "Science"]);
        assert!(wizard.set_category(&catalog, "Science"));

        wizard.set_stage(&catalog, StageSelector::Mixed);
        assert_eq!(wizard.categories().len(), 5);
        assert_eq!(wizard.state().selected_category, "Science");
        assert_eq!(wizard.pool_size(), 6);
    }

    #[test]
    fn word_count_clamped_to_pool() {
        let catalog = sample_catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.set_stage(&catalog, StageSelector::Mixed);
        wizard.set_category(&catalog, "Science");
        wizard.set_number_of_words(100);
        assert_eq!(wizard.state().number_of_words, 6);
        wizard.set_number_of_words(0);
        assert_eq!(wizard.state().number_of_words, 1);

        wizard.set_number_of_words(6);
        wizard.set_stage(&catalog, StageSelector::General);
        assert_eq!(wizard.state().number_of_words, 3);
    }

    #[test]
    fn time_limit_clamped() {
        let catalog = sample_catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.set_max_time_seconds(5);
        assert_eq!(wizard.state().max_time_seconds, MIN_TIME_SECONDS);
        wizard.adjust_max_time_seconds(100);
        assert_eq!(wizard.state().max_time_seconds, MAX_TIME_SECONDS);
        wizard.adjust_max_time_seconds(-5);
        assert_eq!(wizard.state().max_time_seconds, 25);
    }

    #[test]
    fn cycle_category_wraps() {
        let catalog = sample_catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.set_stage(&catalog, StageSelector::Ks3);
        assert_eq!(wizard.state().selected_category, "Computing");
        wizard.cycle_category(&catalog, true);
        assert_eq!(wizard.state().selected_category, "Science");
        wizard.cycle_category(&catalog, true);
        assert_eq!(wizard.state().selected_category, "Computing");
        wizard.cycle_category(&catalog, false);
        assert_eq!(wizard.state().selected_category, "Science");
    }

    #[test]
    fn start_requires_last_step_and_pool() {
        let catalog = sample_catalog();
        let mut wizard = Wizard::new(&catalog);
        assert!(!wizard.can_start());
        while wizard.next() {}
        assert!(wizard.can_start());
    }

    #[test]
    fn reset_restores_defaults() {
        let catalog = sample_catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.set_stage(&catalog, StageSelector::Ks4);
        wizard.set_max_time_seconds(30);
        wizard.next();
        wizard.next();
        wizard.reset(&catalog);
        assert_eq!(wizard.state(), Wizard::new(&catalog).state());
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let catalog = sample_catalog();
        let mut wizard = Wizard::new(&catalog);
        assert_eq!(wizard.progress(), 0.0);
        while wizard.next() {}
        assert_eq!(wizard.progress(), 1.0);
    }
}
