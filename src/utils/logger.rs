use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日誌輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 終端機用，寫到 stderr，stdout 保留給 JSON 結果
    Compact,
    /// CloudWatch 用，時間戳由 Lambda 自己加
    Json,
}

/// 沒有 RUST_LOG 時使用的過濾規則
pub fn default_directives(format: LogFormat, verbose: bool) -> &'static str {
    match (format, verbose) {
        (LogFormat::Compact, true) => "exam_result_proxy=debug,info",
        (LogFormat::Compact, false) => "exam_result_proxy=info,warn",
        (LogFormat::Json, true) => "exam_result_proxy=debug,lambda=debug,info",
        (LogFormat::Json, false) => "exam_result_proxy=info,lambda=info,warn",
    }
}

fn filter(format: LogFormat, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(format, verbose)))
}

pub fn init(format: LogFormat, verbose: bool) {
    let registry = tracing_subscriber::registry().with(filter(format, verbose));

    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .without_time()
                    .json()
                    .with_current_span(false),
            )
            .init(),
    }
}

pub fn init_cli_logger(verbose: bool) {
    init(LogFormat::Compact, verbose);
}

/// Lambda 用 LOG_VERBOSE=1 打開 debug
pub fn init_lambda_logger() {
    let verbose = std::env::var("LOG_VERBOSE").is_ok_and(|v| v == "1" || v == "true");
    init(LogFormat::Json, verbose);
}
