pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod intent;

pub use app_config::{AppConfig, DEFAULT_API_BASE_URL};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use intent::{
    IntentField, IntentType, Market, Modification, ModificationAction, SearchIntent,
};
