pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{lambda::LambdaConfig, toml_config::TomlConfig};
pub use core::proxy::{ProxyResponse, ResultProxy};
pub use core::source::HttpResultSource;
pub use utils::error::{ProxyError, Result};
