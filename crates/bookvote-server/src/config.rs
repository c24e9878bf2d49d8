use std::path::PathBuf;

use crate::error::Result;
use bookvote_app::state::AppConfig;
use bookvote_types::config::default_data_dir;
pub use clap::Parser;
use url::Url;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Server for publishing and rating books")]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "BOOKVOTE_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "BOOKVOTE_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "BOOKVOTE_BASE_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the server, as visible to users"
    )]
    pub base_url: Url,

    #[arg(
        long,
        env = "BOOKVOTE_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/bookvote.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "BOOKVOTE_DATA_DIR",
        help = "Data directory, default is system default like ~/.local/share/bookvote",
        default_value_t = default_data_dir()
    )]
    data_dir: String,

    #[arg(
        long,
        env = "BOOKVOTE_STATIC_DIR",
        help = "Directory with browser client files, served at / if set"
    )]
    pub static_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "BOOKVOTE_UPLOAD_LIMIT_MB",
        default_value = "10",
        help = "Maximum size of publish request (incl. cover image) in MB"
    )]
    pub upload_limit_mb: usize,

    #[arg(long, env = "BOOKVOTE_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/bookvote.db", self.data_dir))
    }
}

impl From<&ServerConfig> for AppConfig {
    fn from(config: &ServerConfig) -> Self {
        AppConfig {
            upload_limit_mb: config.upload_limit_mb,
        }
    }
}
