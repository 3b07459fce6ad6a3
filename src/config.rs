//! Configuration module.
//!
//! Settings are read from a TOML file; every section and field is optional
//! and falls back to its default.

use crate::transport::DeviceRef;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "SPP_PRINTER_CONFIG";

/// Bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transport: TransportConfig,
    pub auth: AuthConfig,
    pub receipt: ReceiptConfig,
}

/// How printer links are opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Real RFCOMM Bluetooth (requires BlueZ)
    #[default]
    Rfcomm,
    /// TCP stand-in (for development)
    TcpSimulation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub mode: TransportMode,

    /// Fixed RFCOMM channel. Unset means resolve the SPP service by UUID.
    pub channel: Option<u8>,

    /// Endpoint used in `tcp_simulation` mode.
    pub tcp_address: String,

    /// Upper bound on a single connect attempt.
    pub connect_timeout_ms: u64,

    /// Devices reported as paired in `tcp_simulation` mode.
    pub simulated_devices: Vec<DeviceRef>,
}

impl TransportConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            mode: TransportMode::Rfcomm,
            channel: None,
            tcp_address: "127.0.0.1:9100".into(),
            connect_timeout_ms: 10_000,
            simulated_devices: vec![DeviceRef::new(
                Some("Simulated Printer".into()),
                "00:11:22:33:44:55",
            )],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Discovery and connect wait for a host grant before touching the radio.
    pub require_authorization: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// Title printed when a receipt request omits one.
    pub default_title: String,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            default_title: "RenKredit".into(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the config path from the first CLI argument or the environment.
    pub fn locate(arg: Option<String>) -> Option<PathBuf> {
        arg.or_else(|| std::env::var(CONFIG_ENV).ok())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.transport.mode, TransportMode::Rfcomm);
        assert_eq!(config.transport.connect_timeout(), Duration::from_secs(10));
        assert!(!config.auth.require_authorization);
        assert_eq!(config.receipt.default_title, "RenKredit");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[transport]
mode = "tcp_simulation"
tcp_address = "127.0.0.1:9200"

[[transport.simulated_devices]]
name = "Kitchen"
address = "AA:BB:CC:DD:EE:FF"

[auth]
require_authorization = true
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.transport.mode, TransportMode::TcpSimulation);
        assert_eq!(config.transport.tcp_address, "127.0.0.1:9200");
        assert_eq!(config.transport.connect_timeout_ms, 10_000);
        assert_eq!(config.transport.simulated_devices.len(), 1);
        assert_eq!(config.transport.simulated_devices[0].address, "AA:BB:CC:DD:EE:FF");
        assert!(config.auth.require_authorization);
        assert_eq!(config.receipt, ReceiptConfig::default());
    }

    #[test]
    fn test_load_rejects_bad_mode() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[transport]\nmode = \"carrier_pigeon\"").unwrap();
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_locate_prefers_argument() {
        let path = Config::locate(Some("/etc/spp-printer.toml".into()));
        assert_eq!(path, Some(PathBuf::from("/etc/spp-printer.toml")));
    }
}
