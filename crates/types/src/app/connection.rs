// Path: crates/types/src/app/connection.rs

use serde::{Deserialize, Serialize};

/// An account discovered through the signing extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The SS58 address, encoded with the owning chain's prefix.
    pub address: String,
    /// The display name given by the extension, or the account's index.
    pub name: String,
}

/// Readiness of a chain's client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    /// The connection attempt has not completed.
    Initializing,
    /// The client is connected and ready.
    Connected,
    /// The connection attempt failed. Terminal until the provider is rebuilt.
    Failed,
}

impl ApiStatus {
    /// The wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Connected => "connected",
            Self::Failed => "failed",
        }
    }
}

/// State of the signing extension as seen by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionStatus {
    /// Not activated, or deactivated.
    Initializing,
    /// `activate` is in progress.
    Connecting,
    /// The extension granted access.
    Connected,
    /// No extension is installed or none granted access.
    NoExtension,
}

impl ExtensionStatus {
    /// The wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::NoExtension => "no_extension",
        }
    }
}
