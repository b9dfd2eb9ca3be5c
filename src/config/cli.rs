use crate::config::{
    validate_provider, DEFAULT_ALLOWED_ORIGIN, DEFAULT_TIMEOUT_SECONDS, DEFAULT_UPSTREAM_URL,
    DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "exam-result-proxy")]
#[command(about = "Look up a window of consecutive exam results from the university result API")]
pub struct CliConfig {
    /// 起始准考證號 (11 位數字)
    #[arg(long)]
    pub reg_no: String,

    #[arg(long)]
    pub year: String,

    /// 羅馬數字 (I..VIII) 或 1..8
    #[arg(long)]
    pub semester: String,

    /// 例如 November/2023
    #[arg(long)]
    pub exam_held: String,

    #[arg(long, default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, value_delimiter = ',', default_value = "father_name,mother_name")]
    pub redacted_fields: Vec<String>,

    #[arg(long, help = "Load upstream/response settings from a TOML file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 轉成 handler 看到的查詢參數
    pub fn query_params(&self) -> Vec<(String, String)> {
        vec![
            ("reg_no".to_string(), self.reg_no.clone()),
            ("year".to_string(), self.year.clone()),
            ("semester".to_string(), self.semester.clone()),
            ("exam_held".to_string(), self.exam_held.clone()),
        ]
    }
}

impl ConfigProvider for CliConfig {
    fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn allowed_origin(&self) -> &str {
        DEFAULT_ALLOWED_ORIGIN
    }

    fn redacted_fields(&self) -> &[String] {
        &self.redacted_fields
    }

    fn user_agent(&self) -> &str {
        DEFAULT_USER_AGENT
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_provider(self)
    }
}
