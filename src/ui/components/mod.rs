pub mod menu;
pub mod practice_card;
pub mod progress_bar;
pub mod question;
pub mod report;
pub mod wizard_progress;
pub mod wizard_steps;
pub mod word_list;
