use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {reason} (got '{value}')")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required parameters: {}", .fields.join(", "))]
    MissingParametersError { fields: Vec<String> },

    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameterError { field: String, reason: String },

    #[error("Upstream responded with status {status}")]
    UpstreamError { status: u16 },

    #[error("Result not found")]
    NotFoundError,

    #[error("Request timed out after {millis}ms")]
    TimeoutError { millis: u64 },
}

impl ProxyError {
    /// 對應到回給客戶端的 HTTP 狀態碼
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingParametersError { .. }
            | ProxyError::InvalidParameterError { .. } => StatusCode::BAD_REQUEST,
            ProxyError::NotFoundError => StatusCode::NOT_FOUND,
            ProxyError::TimeoutError { .. } => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::ApiError(_) | ProxyError::UpstreamError { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 給使用者看的訊息，不洩漏內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            ProxyError::MissingParametersError { .. }
            | ProxyError::InvalidParameterError { .. } => self.to_string(),
            ProxyError::ConfigError { .. } | ProxyError::InvalidConfigValueError { .. } => {
                format!("Proxy is misconfigured: {}", self)
            }
            ProxyError::TimeoutError { .. } => {
                "The result service took too long to respond".to_string()
            }
            ProxyError::NotFoundError => {
                "No result published for this registration number".to_string()
            }
            _ => "The result service is currently unavailable".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
