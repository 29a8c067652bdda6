pub mod exercise;
pub mod input;
pub mod quiz;
pub mod report;
pub mod timer;
pub mod wizard;
