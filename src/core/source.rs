use crate::core::{ConfigProvider, ResultLookup, ResultSource};
use crate::utils::error::{ProxyError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// 透過 HTTP 查詢大學成績 API
#[derive(Debug, Clone)]
pub struct HttpResultSource {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpResultSource {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ProxyError::InvalidConfigValueError {
            field: "upstream_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.upstream_url(),
            config.request_timeout(),
            config.user_agent(),
        )
    }

    /// 組出上游查詢網址；既有的 query 會保留
    pub fn lookup_url(&self, lookup: &ResultLookup) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("year", &lookup.year.to_string())
            .append_pair("redg_no", &lookup.reg_no)
            .append_pair("semester", lookup.semester.as_roman())
            .append_pair("exam_held", &lookup.exam_held);
        url
    }
}

#[async_trait]
impl ResultSource for HttpResultSource {
    async fn fetch(&self, lookup: &ResultLookup) -> Result<serde_json::Value> {
        let url = self.lookup_url(lookup);
        tracing::debug!("Making upstream request to: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        tracing::debug!(reg_no = %lookup.reg_no, "Upstream response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(ProxyError::NotFoundError);
        }
        if !status.is_success() {
            return Err(ProxyError::UpstreamError {
                status: status.as_u16(),
            });
        }

        // 先讀成文字再解析，才能把非 JSON 的回應歸類為序列化錯誤
        let body = response.text().await.map_err(|e| self.classify(e))?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl HttpResultSource {
    fn classify(&self, error: reqwest::Error) -> ProxyError {
        if error.is_timeout() {
            ProxyError::TimeoutError {
                millis: self.timeout.as_millis() as u64,
            }
        } else {
            ProxyError::ApiError(error)
        }
    }
}
