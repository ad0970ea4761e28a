// Path: crates/types/src/config/networks.rs

use super::NetworkConfig;
use crate::app::ChainId;
use std::collections::BTreeMap;

const LOGO_BASE: &str =
    "https://raw.githubusercontent.com/TalismanSociety/chaindata/2778d4b989407a2e9fca6ae897fe849561f74afe/assets";

fn logo(chain: &str) -> String {
    format!("{}/{}/logo.svg", LOGO_BASE, chain)
}

/// Parachains known out of the box.
pub fn default_parachains() -> BTreeMap<ChainId, NetworkConfig> {
    let mut table = BTreeMap::new();
    table.insert(
        "picasso".to_string(),
        NetworkConfig {
            name: "Picasso".into(),
            ws_url: "wss://picasso-rpc.composable.finance".into(),
            token_id: "pica".into(),
            prefix: 49,
            account_type: "*25519".into(),
            subscan_url: String::new(),
            decimals: 12,
            color: "#B09A9F".into(),
            symbol: "PICA".into(),
            logo: logo("picasso"),
            parachain_id: Some(2087),
            relay_chain: Some("kusama".into()),
            network_id: None,
        },
    );
    table.insert(
        "karura".to_string(),
        NetworkConfig {
            name: "Karura".into(),
            ws_url: "wss://karura-rpc-0.aca-api.network".into(),
            token_id: "kar".into(),
            prefix: 8,
            account_type: "*25519".into(),
            subscan_url: "https://karura.subscan.io/".into(),
            decimals: 12,
            color: "#ff4c3b".into(),
            symbol: "KAR".into(),
            logo: logo("karura"),
            parachain_id: Some(2000),
            relay_chain: Some("kusama".into()),
            network_id: None,
        },
    );
    table
}

/// Relay chains known out of the box.
pub fn default_relaychains() -> BTreeMap<ChainId, NetworkConfig> {
    let mut table = BTreeMap::new();
    table.insert(
        "kusama".to_string(),
        NetworkConfig {
            name: "Kusama".into(),
            ws_url: "wss://kusama-rpc.polkadot.io".into(),
            token_id: "ksm".into(),
            prefix: 2,
            account_type: "*25519".into(),
            subscan_url: "https://kusama.subscan.io/".into(),
            decimals: 12,
            color: "#000000".into(),
            symbol: "KSM".into(),
            logo: logo("kusama"),
            parachain_id: None,
            relay_chain: None,
            network_id: Some("kusama".into()),
        },
    );
    table.insert(
        "polkadot".to_string(),
        NetworkConfig {
            name: "Polkadot".into(),
            ws_url: "wss://rpc.polkadot.io".into(),
            token_id: "dot".into(),
            prefix: 0,
            account_type: "*25519".into(),
            subscan_url: "https://polkadot.subscan.io/".into(),
            decimals: 10,
            color: "#e6007a".into(),
            symbol: "DOT".into(),
            logo: logo("polkadot"),
            parachain_id: None,
            relay_chain: None,
            network_id: Some("polkadot".into()),
        },
    );
    table
}
