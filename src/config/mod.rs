pub mod toml_config;

pub use toml_config::Settings;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ribbit")]
#[command(about = "Ribbit web server")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,

    /// Where to keep the JSON snapshot of published posts
    #[arg(long)]
    pub snapshot_path: Option<String>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Accept posts without proof of work")]
    pub no_pow: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliArgs {
    /// 載入配置檔，再套用命令列覆蓋設定
    pub fn into_settings(self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        if let Some(host) = self.host {
            settings.server.host = host;
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(path) = self.snapshot_path {
            settings.storage.snapshot_path = Some(path);
        }
        if self.json_logs {
            settings.server.json_logs = true;
        }
        if self.no_pow {
            settings.pow.required = false;
        }

        Ok(settings)
    }
}
