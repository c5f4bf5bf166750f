pub mod card_file;
pub mod toml_config;

pub use card_file::CardFile;
pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "print-my-card")]
#[command(about = "Preview a business card and send it off to be turned into a 3MF file")]
pub struct CliConfig {
    /// Card description file
    #[arg(short, long, default_value = "card.toml")]
    pub card: String,

    /// Application config file (TOML)
    #[arg(long)]
    pub config: Option<String>,

    /// Override the generation service endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override the output directory
    #[arg(long)]
    pub output_path: Option<String>,

    /// Print the manifest instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the preview model summary
    #[arg(long)]
    pub preview: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋設定檔
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.service.endpoint = Some(endpoint.clone());
            tracing::info!("🔧 Endpoint overridden to: {}", endpoint);
        }
        if let Some(path) = &self.output_path {
            config.output.path = Some(path.clone());
        }
    }
}
