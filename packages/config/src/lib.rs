// ABOUTME: Configuration for the Tickbox server
// ABOUTME: Environment variable names, defaults and the typed Config loaded from them

pub mod constants;
pub mod settings;

pub use settings::{Config, ConfigError, DatabaseConfig, DatabaseTarget};
