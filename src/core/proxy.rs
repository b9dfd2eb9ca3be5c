use crate::core::batch::{registration_batch, BATCH_SIZE};
use crate::core::lookup::{query_from_pairs, QueryParams};
use crate::core::normalize::normalize_outcome;
use crate::core::source::HttpResultSource;
use crate::core::{ConfigProvider, LookupStatus, ResultItem, ResultLookup, ResultSource};
use crate::utils::error::{ProxyError, Result};
use futures::future::join_all;
use reqwest::StatusCode;
use std::time::Instant;

/// 與傳輸層無關的 HTTP 回應
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl ProxyResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json_body(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

pub struct ResultProxy<S: ResultSource> {
    source: S,
    allowed_origin: String,
    redacted_fields: Vec<String>,
}

impl ResultProxy<HttpResultSource> {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let source = HttpResultSource::from_config(config)?;
        Ok(Self::new(source, config))
    }
}

impl<S: ResultSource> ResultProxy<S> {
    pub fn new<C: ConfigProvider + ?Sized>(source: S, config: &C) -> Self {
        Self {
            source,
            allowed_origin: config.allowed_origin().to_string(),
            redacted_fields: config.redacted_fields().to_vec(),
        }
    }

    /// 從原始 query 配對處理請求；重複的必要參數回 400
    pub async fn handle_pairs<I, K, V>(&self, method: &str, pairs: I) -> ProxyResponse
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = match query_from_pairs(pairs) {
            Ok(query) => query,
            Err(e) if method.eq_ignore_ascii_case("GET") => {
                tracing::info!("Rejected lookup: {}", e);
                return self.error_response(e.status_code(), &e.user_friendly_message());
            }
            Err(_) => QueryParams::new(),
        };

        self.handle(method, &query).await
    }

    /// 處理一個客戶端請求
    pub async fn handle(&self, method: &str, query: &QueryParams) -> ProxyResponse {
        if method.eq_ignore_ascii_case("OPTIONS") {
            return self.respond(StatusCode::NO_CONTENT, String::new());
        }

        if !method.eq_ignore_ascii_case("GET") {
            tracing::warn!("Rejected {} request", method);
            return self.error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
        }

        let lookup = match ResultLookup::from_query(query) {
            Ok(lookup) => lookup,
            Err(e) => {
                tracing::info!("Rejected lookup: {}", e);
                return self.error_response(e.status_code(), &e.user_friendly_message());
            }
        };

        let items = self.lookup_batch(&lookup).await;

        match serde_json::to_string(&items) {
            Ok(body) => self.respond(StatusCode::OK, body),
            Err(e) => {
                let e = ProxyError::from(e);
                tracing::error!("❌ Failed to serialize results: {}", e);
                self.error_response(e.status_code(), &e.user_friendly_message())
            }
        }
    }

    /// 同時查詢整個批次，回傳順序與准考證號順序一致
    pub async fn lookup_batch(&self, lookup: &ResultLookup) -> Vec<ResultItem> {
        let started = Instant::now();
        let lookups: Vec<ResultLookup> = registration_batch(&lookup.reg_no, BATCH_SIZE)
            .into_iter()
            .map(|reg_no| lookup.with_reg_no(reg_no))
            .collect();

        tracing::info!(
            "🚀 Fetching {} results starting at {} ({} sem {}, {})",
            lookups.len(),
            lookup.reg_no,
            lookup.year,
            lookup.semester,
            lookup.exam_held
        );

        let outcomes = join_all(lookups.iter().map(|item| self.source.fetch(item))).await;

        let items: Vec<ResultItem> = lookups
            .iter()
            .zip(outcomes)
            .map(|(item, outcome)| {
                if let Err(e) = &outcome {
                    tracing::warn!(reg_no = %item.reg_no, "Lookup failed: {}", e);
                }
                normalize_outcome(&item.reg_no, outcome, &self.redacted_fields)
            })
            .collect();

        let found = items
            .iter()
            .filter(|item| item.status == LookupStatus::Success)
            .count();
        tracing::info!(
            "✅ Batch completed: {}/{} found in {:?}",
            found,
            items.len(),
            started.elapsed()
        );

        items
    }

    fn error_response(&self, status: StatusCode, message: &str) -> ProxyResponse {
        let body = serde_json::json!({ "error": message }).to_string();
        self.respond(status, body)
    }

    fn respond(&self, status: StatusCode, body: String) -> ProxyResponse {
        ProxyResponse {
            status,
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("Access-Control-Allow-Origin", self.allowed_origin.clone()),
                ("Access-Control-Allow-Methods", "GET, OPTIONS".to_string()),
                ("Access-Control-Allow-Headers", "Content-Type".to_string()),
            ],
            body,
        }
    }
}
