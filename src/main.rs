use clap::Parser;
use ribbit::utils::{logger, validation::Validate};
use ribbit::{web, AppState, CliArgs};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let verbose = args.verbose;

    // 載入配置
    let settings = match args.into_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if settings.server.json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🐸 Starting ribbit");
    if verbose {
        tracing::debug!("Settings: {:?}", settings);
    }

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    if !settings.pow.required {
        tracing::warn!("⚠️ Proof of work disabled, anyone can publish");
    }

    let addr = settings.bind_address();
    let state = AppState::from_settings(settings).await?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);

    web::serve(listener, state).await?;
    Ok(())
}
