use anyhow::Context;
use clap::Parser;
use exam_result_proxy::core::ConfigProvider;
use exam_result_proxy::utils::{logger, validation::Validate};
use exam_result_proxy::{CliConfig, ResultProxy, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting exam-result-proxy CLI");
    tracing::debug!("CLI config: {:?}", cli);

    // 有指定 TOML 時，上游與回應設定以檔案為準
    let file_config = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
        ),
        None => None,
    };
    let config: &dyn ConfigProvider = match &file_config {
        Some(toml) => toml,
        None => &cli,
    };

    // 驗證配置
    let validation = match &file_config {
        Some(toml) => toml.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let proxy = ResultProxy::from_config(config)?;
    let response = proxy.handle_pairs("GET", cli.query_params()).await;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&response.json_body()?)?
    } else {
        response.body.clone()
    };

    if response.status.is_success() {
        println!("{}", output);
        Ok(())
    } else {
        tracing::error!("❌ Lookup rejected with status {}", response.status);
        eprintln!("❌ {}", output);
        std::process::exit(2);
    }
}
