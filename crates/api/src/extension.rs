// Path: crates/api/src/extension.rs
//! Defines the bridge to a key-holding signing extension.

use async_trait::async_trait;
use extrack_types::error::ExtensionError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// An extension that granted the application access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedExtension {
    /// The extension's name.
    pub name: String,
    /// The extension's version string.
    pub version: String,
}

/// An account exposed by an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedAccount {
    /// The address, already encoded with the requested SS58 format.
    pub address: String,
    /// The user-assigned name, if any.
    #[serde(default)]
    pub name: Option<String>,
}

/// A signing capability for extrinsic payloads. Keys never leave the extension.
#[async_trait]
pub trait Signer: Send + Sync + Debug {
    /// Signs `payload` on behalf of `address`.
    async fn sign_payload(&self, address: &str, payload: &[u8])
        -> Result<Vec<u8>, ExtensionError>;
}

/// Access to the extensions installed in the host environment.
#[async_trait]
pub trait ExtensionBridge: Send + Sync + Debug {
    /// Requests access for `app_name`. Returns the extensions that granted it.
    async fn enable(&self, app_name: &str) -> Result<Vec<InjectedExtension>, ExtensionError>;

    /// Lists the accounts of all enabled extensions, encoded with `ss58_format`.
    async fn accounts(&self, ss58_format: u16) -> Result<Vec<InjectedAccount>, ExtensionError>;

    /// Returns the signer of the extension that holds `address`.
    async fn signer_for(&self, address: &str) -> Result<Arc<dyn Signer>, ExtensionError>;
}
