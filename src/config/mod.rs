use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

/// 1 GiB, the limit handed to accounts that are provisioned without one
pub const DEFAULT_STORAGE_LIMIT: u64 = 1_073_741_824;

/// every key is optional. Anything left out of the file keeps its default
#[derive(Deserialize, Clone)]
#[serde(crate = "rocket::serde", default)]
pub struct DbConfig {
    pub location: String,
    /// how long a connection waits on a locked database before giving up
    #[serde(rename = "busytimeoutmillis")]
    pub busy_timeout_millis: u64,
}

#[derive(Deserialize, Clone)]
#[serde(crate = "rocket::serde", default)]
pub struct StorageConfig {
    /// root directory the disk storage backend writes uploaded bytes into
    #[serde(rename = "uploaddir")]
    pub upload_dir: String,
    /// largest upload request accepted, counting every file in the batch
    #[serde(rename = "maxuploadbytes")]
    pub max_upload_bytes: u64,
}

/// config properties for storage quotas
#[derive(Deserialize, Clone)]
#[serde(crate = "rocket::serde", default)]
pub struct QuotaConfig {
    #[serde(rename = "defaultlimit")]
    pub default_limit: u64,
    /// when false, quotas are only reported and never block an upload
    pub enforce: bool,
}

#[derive(Deserialize, Clone)]
#[serde(crate = "rocket::serde", default)]
pub struct LogConfig {
    pub level: String,
    /// if present, logs are also appended to this file
    pub file: Option<String>,
}

/// guards account provisioning, which only the identity provider should reach
#[derive(Deserialize, Clone, Default)]
#[serde(crate = "rocket::serde", default)]
pub struct ProvisioningConfig {
    /// when set, `POST /api/accounts` requires this value in the `X-Provisioning-Secret` header
    pub secret: Option<String>,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone, Default)]
#[serde(crate = "rocket::serde", default)]
pub struct DriveConfig {
    pub database: DbConfig,
    pub storage: StorageConfig,
    pub quota: QuotaConfig,
    pub log: LogConfig,
    pub provisioning: ProvisioningConfig,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            location: "./drive.sqlite".to_string(),
            busy_timeout_millis: 5_000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            upload_dir: "./uploads".to_string(),
            max_upload_bytes: DEFAULT_STORAGE_LIMIT,
        }
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        QuotaConfig {
            default_limit: DEFAULT_STORAGE_LIMIT,
            enforce: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// translates the configured level into a filter, falling back to `Info` for unknown values
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.level.to_ascii_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

/// Parses the config file located at ./CloudDrive.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> DriveConfig {
    let settings = match Config::builder()
        .add_source(config::File::with_name("./CloudDrive.toml"))
        .build()
    {
        Ok(settings) => settings,
        // a missing file is fine, we just run on defaults
        Err(ConfigError::Foreign(e)) if e.to_string().contains("not found") => {
            log::warn!("No config file found. Continuing startup...");
            return DriveConfig::default();
        }
        Err(e) => {
            log::error!("Failed to parse config file. Exception is {e}");
            panic!("Failed to parse config file. Exception is {e}");
        }
    };
    deserialize_config(settings)
}

fn deserialize_config(settings: Config) -> DriveConfig {
    match settings.try_deserialize() {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("Config file has invalid values. Exception is {e}");
            panic!("Config file has invalid values. Exception is {e}");
        }
    }
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static DRIVE_CONFIG: Lazy<DriveConfig> = Lazy::new(parse_config);
