// Public API for integration tests and alternative front-ends

pub mod app;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod i18n;
pub mod persistence;
pub mod protocol;
pub mod random;
pub mod state;
pub mod types;
