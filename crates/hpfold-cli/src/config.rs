//! Experiment configuration for the `fold` command.
//!
//! Values are merged with the priority: command-line flag, then `-S key=value` override,
//! then the TOML config file, then built-in defaults.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
