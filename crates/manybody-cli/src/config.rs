//! Layered run configuration: command-line flags override the TOML file,
//! which overrides the built-in defaults.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
