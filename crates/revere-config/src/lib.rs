mod config;
pub mod error;
mod loader;
mod raw;

pub use config::{ApiConfig, ClientConfig, Config, PubsubConfig, StatuspageConfig};
pub use error::ConfigError;
pub use loader::load_config;
