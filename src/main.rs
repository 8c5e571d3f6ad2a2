//! Habla - 文本转语音网关
//!
//! 启动流程: 配置 → 日志 → Google TTS 客户端 → HTTP 服务器

use std::sync::Arc;

use habla::application::TtsProviderPort;
use habla::config::{load_config, print_config, LogConfig};
use habla::infrastructure::adapters::GoogleTtsClient;
use habla::infrastructure::http::{AppState, HttpServer};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},habla={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Habla - Text-to-Speech gateway v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 提供方客户端只创建一次，所有请求共享
    let provider = GoogleTtsClient::new(config.google_tts_config())
        .map_err(|e| anyhow::anyhow!("Failed to create TTS client: {}", e))?;
    let provider: Arc<dyn TtsProviderPort> = Arc::new(provider);

    let server = HttpServer::new(config.server.clone(), AppState::new(provider));

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
