// The binary entry point is main.rs; the library exposes the module tree to
// integration tests and criterion benches.

pub mod app;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod event;
pub mod logging;
pub mod session;
pub mod speech;
pub mod ui;
