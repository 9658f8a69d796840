pub mod commands;
pub mod config;
pub mod diff;
pub mod output;
