// Path: crates/types/src/config/mod.rs

//! Configuration for the connection provider: the static network table, the
//! list of chains to connect, and logging options.
use crate::app::ChainId;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The built-in network table.
pub mod networks;

/// Static description of one network.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Display name.
    pub name: String,
    /// Default WebSocket RPC endpoint.
    pub ws_url: String,
    /// Native token identifier, e.g. `pica`.
    pub token_id: String,
    /// SS58 address format.
    pub prefix: u16,
    /// Account key type, e.g. `*25519`.
    #[serde(default = "default_account_type")]
    pub account_type: String,
    /// Block explorer base URL; may be empty.
    #[serde(default)]
    pub subscan_url: String,
    /// Native token decimals.
    pub decimals: u8,
    /// Brand color.
    #[serde(default)]
    pub color: String,
    /// Native token symbol.
    pub symbol: String,
    /// Logo URL.
    #[serde(default)]
    pub logo: String,
    /// Parachain id on its relay chain (parachains only).
    #[serde(default)]
    pub parachain_id: Option<u32>,
    /// The relay chain this parachain is attached to (parachains only).
    #[serde(default)]
    pub relay_chain: Option<ChainId>,
    /// Network identifier (relay chains only).
    #[serde(default)]
    pub network_id: Option<String>,
}

fn default_account_type() -> String {
    "*25519".to_string()
}

/// The table of known parachains and relay chains, keyed by chain id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NetworkRegistry {
    /// Known parachains.
    #[serde(default)]
    pub parachains: BTreeMap<ChainId, NetworkConfig>,
    /// Known relay chains.
    #[serde(default)]
    pub relaychains: BTreeMap<ChainId, NetworkConfig>,
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self {
            parachains: networks::default_parachains(),
            relaychains: networks::default_relaychains(),
        }
    }
}

impl NetworkRegistry {
    /// Looks up a parachain by id.
    pub fn get_parachain_network(&self, chain_id: &str) -> Option<&NetworkConfig> {
        self.parachains.get(chain_id)
    }

    /// Looks up a relay chain by id.
    pub fn get_relaychain_network(&self, chain_id: &str) -> Option<&NetworkConfig> {
        self.relaychains.get(chain_id)
    }
}

/// A chain the provider should connect to at mount time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SupportedChain {
    /// Key into the network table.
    pub chain_id: ChainId,
    /// Endpoint override. Falls back to the network's `ws_url` when absent.
    #[serde(default)]
    pub rpc_url: Option<String>,
}

impl SupportedChain {
    /// A supported chain using the network table's default endpoint.
    pub fn new(chain_id: impl Into<ChainId>) -> Self {
        Self {
            chain_id: chain_id.into(),
            rpc_url: None,
        }
    }

    /// A supported chain with an explicit endpoint.
    pub fn with_url(chain_id: impl Into<ChainId>, rpc_url: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            rpc_url: Some(rpc_url.into()),
        }
    }
}

/// Configuration for the connection provider (`extrack.toml`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// The application name presented to the signing extension.
    pub app_name: String,
    /// Parachains to connect to and discover accounts for.
    #[serde(default)]
    pub supported_parachains: Vec<SupportedChain>,
    /// Relay chains to connect to. Accounts are not discovered for these.
    #[serde(default)]
    pub supported_relaychains: Vec<SupportedChain>,
    /// The network table. Replaces the built-in table when present.
    #[serde(default)]
    pub networks: NetworkRegistry,
    /// Logging options.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl ProviderConfig {
    /// A configuration over the built-in network table with no chains selected.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            supported_parachains: Vec::new(),
            supported_relaychains: Vec::new(),
            networks: NetworkRegistry::default(),
            telemetry: TelemetryConfig::default(),
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Checks every supported chain against the network table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for chain in &self.supported_parachains {
            if self.networks.get_parachain_network(&chain.chain_id).is_none() {
                return Err(ConfigError::UnknownChain(chain.chain_id.clone()));
            }
        }
        for chain in &self.supported_relaychains {
            if self.networks.get_relaychain_network(&chain.chain_id).is_none() {
                return Err(ConfigError::UnknownChain(chain.chain_id.clone()));
            }
        }
        Ok(())
    }
}

/// Options for the global `tracing` subscriber.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Emit JSON lines instead of human-readable text.
    #[serde(default = "default_json_logs")]
    pub json_logs: bool,
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub default_filter: String,
}

fn default_json_logs() -> bool {
    true
}
fn default_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: default_json_logs(),
            default_filter: default_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_table_has_known_prefixes() {
        let reg = NetworkRegistry::default();
        assert_eq!(reg.get_parachain_network("picasso").unwrap().prefix, 49);
        assert_eq!(reg.get_parachain_network("karura").unwrap().prefix, 8);
        assert_eq!(reg.get_relaychain_network("kusama").unwrap().prefix, 2);
        assert_eq!(reg.get_relaychain_network("polkadot").unwrap().decimals, 10);
        assert!(reg.get_parachain_network("kusama").is_none());
    }

    #[test]
    fn parses_minimal_toml_with_builtin_networks() {
        let cfg = ProviderConfig::from_toml_str(
            r#"
            app_name = "Picasso"

            [[supported_parachains]]
            chain_id = "picasso"
            rpc_url = "ws://127.0.0.1:9988"

            [[supported_relaychains]]
            chain_id = "kusama"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.app_name, "Picasso");
        assert_eq!(
            cfg.supported_parachains[0].rpc_url.as_deref(),
            Some("ws://127.0.0.1:9988")
        );
        assert!(cfg.supported_relaychains[0].rpc_url.is_none());
        assert!(cfg.telemetry.json_logs);
        assert_eq!(cfg.telemetry.default_filter, "info");
    }

    #[test]
    fn rejects_unknown_supported_chain() {
        let err = ProviderConfig::from_toml_str(
            r#"
            app_name = "x"
            [[supported_parachains]]
            chain_id = "nowhere"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownChain(id) if id == "nowhere"));
    }

    #[test]
    fn relay_chain_listed_as_parachain_is_rejected() {
        let mut cfg = ProviderConfig::new("x");
        cfg.supported_parachains.push(SupportedChain::new("kusama"));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            app_name = "Pablo"
            [[supported_parachains]]
            chain_id = "karura"

            [telemetry]
            json_logs = false
            "#
        )
        .unwrap();
        let cfg = ProviderConfig::load(file.path()).unwrap();
        assert_eq!(cfg.supported_parachains, vec![SupportedChain::new("karura")]);
        assert!(!cfg.telemetry.json_logs);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ProviderConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
