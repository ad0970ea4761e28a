// Path: crates/types/src/error/mod.rs
//! Core error types for the extrinsic tracker.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Failures that happen before a call's status subscription is installed.
///
/// None of these create a transaction record; they are reported to the caller only.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The signer refused or failed to sign the payload.
    #[error("Signing failed: {0}")]
    Signing(String),
    /// The client could not submit the call to the node.
    #[error("Submission failed: {0}")]
    Submission(String),
}

impl ErrorCode for ExecutorError {
    fn code(&self) -> &'static str {
        match self {
            Self::Signing(_) => "EXECUTOR_SIGNING_FAILED",
            Self::Submission(_) => "EXECUTOR_SUBMISSION_FAILED",
        }
    }
}

/// Errors raised while opening a chain client connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The endpoint could not be reached.
    #[error("Endpoint {url} unreachable: {reason}")]
    Unreachable {
        /// The WebSocket endpoint.
        url: String,
        /// Transport-level reason.
        reason: String,
    },
    /// The endpoint answered but the client could not initialize (metadata, runtime version).
    #[error("Client handshake failed: {0}")]
    Handshake(String),
    /// The chain is not in the network table.
    #[error("Unknown chain: {0}")]
    UnknownChain(String),
}

impl ErrorCode for ConnectionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "CONNECTION_UNREACHABLE",
            Self::Handshake(_) => "CONNECTION_HANDSHAKE_FAILED",
            Self::UnknownChain(_) => "CONNECTION_UNKNOWN_CHAIN",
        }
    }
}

/// Errors raised by the signing extension bridge.
#[derive(Debug, Error)]
pub enum ExtensionError {
    /// No extension is installed in the host environment.
    #[error("No signing extension installed")]
    NotInstalled,
    /// The user or the extension rejected the request.
    #[error("Extension rejected the request: {0}")]
    Rejected(String),
    /// Listing accounts for an address format failed.
    #[error("Account lookup for prefix {prefix} failed: {reason}")]
    AccountLookup {
        /// The SS58 prefix requested.
        prefix: u16,
        /// The reason reported by the extension.
        reason: String,
    },
    /// No injected extension holds a signer for the address.
    #[error("No signer available for {0}")]
    NoSigner(String),
}

impl ErrorCode for ExtensionError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotInstalled => "EXTENSION_NOT_INSTALLED",
            Self::Rejected(_) => "EXTENSION_REJECTED",
            Self::AccountLookup { .. } => "EXTENSION_ACCOUNT_LOOKUP_FAILED",
            Self::NoSigner(_) => "EXTENSION_NO_SIGNER",
        }
    }
}

/// Errors raised when resolving a module error through a metadata registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No pallet is registered at the index.
    #[error("Unknown pallet index {0}")]
    UnknownModule(u8),
    /// The pallet has no error variant at the index.
    #[error("Unknown error variant {error} in pallet {index}")]
    UnknownError {
        /// The pallet index.
        index: u8,
        /// The error variant index.
        error: u8,
    },
}

impl ErrorCode for RegistryError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownModule(_) => "REGISTRY_UNKNOWN_MODULE",
            Self::UnknownError { .. } => "REGISTRY_UNKNOWN_ERROR",
        }
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(String),
    /// A supported chain is missing from the network table.
    #[error("Chain '{0}' is not in the network table")]
    UnknownChain(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CONFIG_IO",
            Self::Parse(_) => "CONFIG_PARSE",
            Self::UnknownChain(_) => "CONFIG_UNKNOWN_CHAIN",
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
