use crate::config::{
    default_redacted_fields, validate_provider, DEFAULT_ALLOWED_ORIGIN, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_UPSTREAM_URL, DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{ProxyError, Result};
use crate::utils::validation::Validate;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub upstream_url: String,
    pub timeout_seconds: u64,
    pub allowed_origin: String,
    pub redacted_fields: Vec<String>,
    pub user_agent: String,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// 由任意變數來源建立配置 (測試時不必動到行程的環境變數)
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_seconds = match var("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ProxyError::InvalidConfigValueError {
                    field: "REQUEST_TIMEOUT_SECONDS".to_string(),
                    value: raw.clone(),
                    reason: "Value must be a whole number of seconds".to_string(),
                })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        let redacted_fields = match var("REDACTED_FIELDS") {
            Some(raw) => raw
                .split(',')
                .map(|field| field.trim().to_string())
                .filter(|field| !field.is_empty())
                .collect(),
            None => default_redacted_fields(),
        };

        Ok(Self {
            upstream_url: var("UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
            timeout_seconds,
            allowed_origin: var("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            redacted_fields,
            user_agent: var("USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn allowed_origin(&self) -> &str {
        &self.allowed_origin
    }

    fn redacted_fields(&self) -> &[String] {
        &self.redacted_fields
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
