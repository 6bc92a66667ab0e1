//! mDNS advertiser configuration.

use serde::Deserialize;

/// Configuration for the mDNS advertiser.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MdnsConfig {
    /// TCP port announced in the SRV record.
    pub port: u16,
}

impl Default for MdnsConfig {
    fn default() -> Self {
        Self { port: 51826 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        assert_eq!(MdnsConfig::default().port, 51826);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let config: MdnsConfig = toml::from_str("port = 47128").unwrap();
        assert_eq!(config.port, 47128);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: MdnsConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, 51826);
    }
}
