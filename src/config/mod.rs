mod app_config;

pub use app_config::{AdminApiConfig, AppConfig, LogFormat, LoggingConfig};
