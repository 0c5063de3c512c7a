//! Configuration: compile-time defaults plus environment overrides.

pub mod app_config;
pub mod defaults;

pub use app_config::AppConfig;
