use crate::error::{env_error, Error, SyncResult};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::debug;

/// Default tenant identifier sent to the source scheduling API
pub const DEFAULT_TENANT: &str = "amphiazh";

/// Default port for the inbound HTTP server
pub const DEFAULT_PORT: u16 = 8081;

/// Optional config file, merged under environment variables
const CONFIG_FILE: &str = "config/sync.toml";

/// Main configuration structure for the sync service
#[derive(Debug, Clone)]
pub struct Config {
    /// Destination agenda the meetings are upserted into
    pub agenda_id: i64,
    /// Base URL of the source shift-scheduling API
    pub source_url: String,
    /// Base URL of the destination agenda API
    pub destination_url: String,
    /// Tenant header value for the source API
    pub tenant: String,
    /// Whether to clear the synced date range before re-posting
    pub delete_synced_range: bool,
    /// Port for the inbound HTTP server
    pub port: u16,
}

/// Values read from the optional config file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    agenda_id: Option<i64>,
    source_url: Option<String>,
    destination_url: Option<String>,
    tenant: Option<String>,
    delete_synced_range: Option<bool>,
    port: Option<u16>,
}

impl Config {
    /// Load configuration from environment and config file.
    ///
    /// Environment variables take precedence over the file; a missing file
    /// is non-fatal and falls through to environment-only resolution.
    /// Loaded once at startup and passed explicitly from then on.
    pub fn load() -> SyncResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let file = match fs::read_to_string(CONFIG_FILE) {
            Ok(content) => toml::from_str::<FileConfig>(&content)?,
            Err(e) => {
                debug!("No config file at {}: {}", CONFIG_FILE, e);
                FileConfig::default()
            }
        };

        let agenda_id = match env::var("AGENDA_ID") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| Error::Config(format!("Invalid AGENDA_ID value: {}", raw)))?,
            Err(_) => file.agenda_id.ok_or_else(|| env_error("AGENDA_ID"))?,
        };

        let source_url = env::var("AMPHIA_URL")
            .ok()
            .or(file.source_url)
            .ok_or_else(|| env_error("AMPHIA_URL"))?;

        let destination_url = env::var("BASE_URL")
            .ok()
            .or(file.destination_url)
            .ok_or_else(|| env_error("BASE_URL"))?;

        let tenant = env::var("TENANT")
            .ok()
            .or(file.tenant)
            .unwrap_or_else(|| DEFAULT_TENANT.to_string());

        let delete_synced_range = match env::var("DELETE_SYNCED_RANGE") {
            Ok(raw) => raw
                .parse::<bool>()
                .map_err(|_| Error::Config(format!("Invalid DELETE_SYNCED_RANGE value: {}", raw)))?,
            Err(_) => file.delete_synced_range.unwrap_or(true),
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("Invalid PORT value: {}", raw)))?,
            Err(_) => file.port.unwrap_or(DEFAULT_PORT),
        };

        Ok(Config {
            agenda_id,
            source_url,
            destination_url,
            tenant,
            delete_synced_range,
            port,
        })
    }
}
