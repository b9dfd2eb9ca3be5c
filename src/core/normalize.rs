use crate::core::{LookupStatus, ResultItem};
use crate::utils::error::{ProxyError, Result};
use serde_json::Value;

/// 把單筆上游結果整理成客戶端格式
pub fn normalize_outcome(
    reg_no: &str,
    outcome: Result<Value>,
    redacted_fields: &[String],
) -> ResultItem {
    match outcome {
        Ok(body) => normalize_body(reg_no, body, redacted_fields),
        Err(ProxyError::NotFoundError) => item(reg_no, LookupStatus::NotFound, None, None),
        Err(e @ ProxyError::TimeoutError { .. }) => {
            item(reg_no, LookupStatus::Timeout, None, Some(e.to_string()))
        }
        Err(e) => item(reg_no, LookupStatus::Error, None, Some(e.to_string())),
    }
}

fn normalize_body(reg_no: &str, mut body: Value, redacted_fields: &[String]) -> ResultItem {
    // 上游有時 HTTP 200，但真正的狀態寫在內容的 status 裡
    match body_status(&body) {
        Some(404) => return item(reg_no, LookupStatus::NotFound, None, None),
        Some(status) if !(200..300).contains(&status) => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| ProxyError::UpstreamError { status }.to_string());
            return item(reg_no, LookupStatus::Error, None, Some(message));
        }
        _ => {}
    }

    let payload = match body.as_object_mut().and_then(|map| map.remove("data")) {
        Some(data) => data,
        None => body,
    };

    if payload.is_null() {
        return item(reg_no, LookupStatus::NotFound, None, None);
    }

    item(
        reg_no,
        LookupStatus::Success,
        Some(redact(payload, redacted_fields)),
        None,
    )
}

/// 內容裡的 status，可能是數字或數字字串
fn body_status(body: &Value) -> Option<u16> {
    match body.get("status")? {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 刪除頂層的個資欄位，其他內容原樣保留
pub fn redact(mut payload: Value, redacted_fields: &[String]) -> Value {
    if let Value::Object(map) = &mut payload {
        for field in redacted_fields {
            map.remove(field);
        }
    }
    payload
}

fn item(
    reg_no: &str,
    status: LookupStatus,
    data: Option<Value>,
    error: Option<String>,
) -> ResultItem {
    ResultItem {
        reg_no: reg_no.to_string(),
        status,
        data,
        error,
    }
}
