use crate::domain::model::ResultLookup;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn upstream_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn allowed_origin(&self) -> &str;
    fn redacted_fields(&self) -> &[String];
    fn user_agent(&self) -> &str;
}

/// 上游成績查詢來源
#[async_trait]
pub trait ResultSource: Send + Sync {
    async fn fetch(&self, lookup: &ResultLookup) -> Result<serde_json::Value>;
}
