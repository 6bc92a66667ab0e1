//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `minihap.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use minihap_adapter_mdns::MdnsConfig;
use minihap_domain::accessory::{Registration, ServiceKind};
use minihap_domain::category::Category;
use minihap_domain::credentials::Credentials;
use minihap_domain::error::ConfigurationError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identity and metadata of the published accessory.
    pub accessory: AccessoryConfig,
    /// How the accessory is advertised.
    pub advertiser: AdvertiserConfig,
    /// Shutdown behaviour.
    pub shutdown: ShutdownConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Accessory identity and metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AccessoryConfig {
    /// Display name, also the name the identifier is derived from.
    pub name: String,
    /// Namespace the identifier is derived under.
    pub namespace: String,
    /// MAC-style pairing username.
    pub username: String,
    /// Pairing code, `DDD-DD-DDD`.
    pub pincode: String,
    pub category: Category,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    /// Name of the outlet service shown to users.
    pub service_name: String,
}

/// Which advertiser announces the accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvertiserKind {
    /// Announce over mDNS.
    Mdns,
    /// Do not announce; requests are only reachable in-process.
    None,
}

impl std::str::FromStr for AdvertiserKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "mdns" => Ok(Self::Mdns),
            "none" => Ok(Self::None),
            other => Err(ConfigError::Validation(format!(
                "unknown advertiser {other:?}, expected \"mdns\" or \"none\""
            ))),
        }
    }
}

/// Advertiser configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AdvertiserConfig {
    pub kind: AdvertiserKind,
    #[serde(flatten)]
    pub mdns: MdnsConfig,
}

/// Shutdown configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// How long unpublishing may take before the process exits anyway.
    pub grace_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `minihap.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("minihap.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MINIHAP_NAME") {
            self.accessory.name = val;
        }
        if let Ok(val) = std::env::var("MINIHAP_NAMESPACE") {
            self.accessory.namespace = val;
        }
        if let Ok(val) = std::env::var("MINIHAP_USERNAME") {
            self.accessory.username = val;
        }
        if let Ok(val) = std::env::var("MINIHAP_PINCODE") {
            self.accessory.pincode = val;
        }
        if let Ok(val) = std::env::var("MINIHAP_CATEGORY") {
            match val.parse() {
                Ok(category) => self.accessory.category = category,
                Err(err) => tracing::warn!(error = %err, "ignoring MINIHAP_CATEGORY"),
            }
        }
        if let Ok(val) = std::env::var("MINIHAP_ADVERTISER") {
            match val.parse() {
                Ok(kind) => self.advertiser.kind = kind,
                Err(err) => tracing::warn!(error = %err, "ignoring MINIHAP_ADVERTISER"),
            }
        }
        if let Ok(val) = std::env::var("MINIHAP_PORT")
            && let Ok(port) = val.parse()
        {
            self.advertiser.mdns.port = port;
        }
        if let Ok(val) = std::env::var("MINIHAP_GRACE_MS")
            && let Ok(grace_ms) = val.parse()
        {
            self.shutdown.grace_ms = grace_ms;
        }
        if let Ok(val) = std::env::var("MINIHAP_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.shutdown.grace_ms == 0 {
            return Err(ConfigError::Validation(
                "shutdown grace period must be non-zero".to_string(),
            ));
        }
        if self.advertiser.kind == AdvertiserKind::Mdns && self.advertiser.mdns.port == 0 {
            return Err(ConfigError::Validation(
                "advertised port must be non-zero".to_string(),
            ));
        }
        self.registration()?;
        Ok(())
    }

    /// Build the accessory registration described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for malformed credentials or an empty
    /// name.
    pub fn registration(&self) -> Result<Registration, ConfigurationError> {
        let accessory = &self.accessory;
        let credentials = Credentials::new(&accessory.username, &accessory.pincode)?;
        Registration::builder()
            .namespace(&accessory.namespace)
            .display_name(&accessory.name)
            .category(accessory.category)
            .credentials(credentials)
            .manufacturer(&accessory.manufacturer)
            .model(&accessory.model)
            .serial_number(&accessory.serial_number)
            .service(ServiceKind::Outlet, &accessory.service_name)
            .build()
    }

    /// Grace period granted to unpublish on shutdown.
    #[must_use]
    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.shutdown.grace_ms)
    }
}

impl Default for AccessoryConfig {
    fn default() -> Self {
        Self {
            name: "Outlet".to_string(),
            namespace: "hap-nodejs:accessories".to_string(),
            username: "1A:2B:3C:4D:5D:FF".to_string(),
            pincode: "031-45-154".to_string(),
            category: Category::Outlet,
            manufacturer: "Oltica".to_string(),
            model: "Rev-1".to_string(),
            serial_number: "A1S2NASF88EW".to_string(),
            service_name: "Fake Outlet".to_string(),
        }
    }
}

impl Default for AdvertiserConfig {
    fn default() -> Self {
        Self {
            kind: AdvertiserKind::Mdns,
            mdns: MdnsConfig::default(),
        }
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { grace_ms: 1000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "minihap=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// The accessory section does not describe a publishable accessory.
    #[error("invalid accessory configuration")]
    Accessory(#[from] ConfigurationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
