// Library root: every module is public so the binary and integration
// tests share one API.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod export;
pub mod sleeper;
pub mod source;
pub mod summary;
pub mod tables;
pub mod tui;
