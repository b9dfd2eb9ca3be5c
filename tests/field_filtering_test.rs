use anyhow::Result;
use exam_result_proxy::core::lookup::QueryParams;
use exam_result_proxy::core::{LookupStatus, ResultItem};
use exam_result_proxy::utils::validation::Validate;
use exam_result_proxy::{ResultProxy, TomlConfig};
use httpmock::prelude::*;
use tempfile::TempDir;

fn query() -> QueryParams {
    [
        ("reg_no", "21101110041"),
        ("year", "2022"),
        ("semester", "II"),
        ("exam_held", "July/2022"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// 測試 TOML 設定的 redacted_fields：只刪除指定的頂層欄位
#[tokio::test]
async fn test_redacted_fields_from_toml() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/result")
            .query_param("semester", "II")
            .query_param("year", "2022");
        then.status(200).json_body(serde_json::json!({
            "status": 200,
            "data": {
                "name": "PRIYA RAJ",
                "father_name": "F",
                "mother_name": "M",
                "dob": "2003-01-02",
                "cgpa": "8.10"
            }
        }));
    });

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("proxy.toml");
    let config_content = format!(
        r#"
[upstream]
url = "{}"
timeout_seconds = 5

[response]
allowed_origin = "https://results.example.edu"
redacted_fields = ["father_name", "mother_name", "dob"]
"#,
        server.url("/v1/result")
    );
    tokio::fs::write(&config_path, config_content).await?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    let proxy = ResultProxy::from_config(&config)?;

    let response = proxy.handle("GET", &query()).await;
    let items: Vec<ResultItem> = serde_json::from_str(&response.body)?;

    api_mock.assert_hits(5);
    assert_eq!(
        response.header("Access-Control-Allow-Origin"),
        Some("https://results.example.edu")
    );

    for item in &items {
        assert_eq!(item.status, LookupStatus::Success);
        assert_eq!(
            item.data,
            Some(serde_json::json!({"name": "PRIYA RAJ", "cgpa": "8.10"}))
        );
    }

    Ok(())
}

/// 空的 redacted_fields 代表原樣轉發
#[tokio::test]
async fn test_empty_redaction_list_passes_payload_through() -> Result<()> {
    let server = MockServer::start();
    let payload = serde_json::json!({"name": "PRIYA RAJ", "father_name": "F", "mother_name": "M"});

    server.mock(|when, then| {
        when.method(GET).path("/v1/result");
        then.status(200)
            .json_body(serde_json::json!({"status": 200, "data": payload.clone()}));
    });

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[upstream]
url = "{}"

[response]
redacted_fields = []
"#,
        server.url("/v1/result")
    ))?;
    let proxy = ResultProxy::from_config(&config)?;

    let response = proxy.handle("GET", &query()).await;
    let items: Vec<ResultItem> = serde_json::from_str(&response.body)?;

    assert_eq!(items.len(), 5);
    assert_eq!(items[0].data, Some(payload));
    assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));

    Ok(())
}
