#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_field_names, validate_non_empty_string, validate_range, validate_url,
};

pub const DEFAULT_UPSTREAM_URL: &str = "https://beu-bih.ac.in/backend/v1/result/get-result";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
pub const DEFAULT_USER_AGENT: &str = concat!("exam-result-proxy/", env!("CARGO_PKG_VERSION"));

/// 預設從成績資料刪除的個資欄位
pub fn default_redacted_fields() -> Vec<String> {
    vec!["father_name".to_string(), "mother_name".to_string()]
}

/// 各種配置來源共用的檢查
pub(crate) fn validate_provider(config: &dyn ConfigProvider) -> Result<()> {
    validate_url("upstream_url", config.upstream_url())?;
    validate_range(
        "request_timeout",
        config.request_timeout().as_millis() as u64,
        1,
        MAX_TIMEOUT_SECONDS * 1000,
    )?;
    validate_non_empty_string("allowed_origin", config.allowed_origin())?;
    validate_non_empty_string("user_agent", config.user_agent())?;
    validate_field_names("redacted_fields", config.redacted_fields())?;
    Ok(())
}
