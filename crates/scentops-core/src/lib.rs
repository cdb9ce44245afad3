pub mod app_config;
pub mod config;
pub mod currency;
pub mod diff;
pub mod error;
pub mod models;
pub mod pricing;

pub use app_config::{AppConfig, RefreshFailurePolicy};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
