// Path: crates/api/src/chain.rs
//! Defines the traits for connected chain clients.

use async_trait::async_trait;
use extrack_types::{
    app::ModuleError,
    error::{ConnectionError, RegistryError},
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// A pallet error resolved from runtime metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaError {
    /// The pallet name, e.g. `balances`.
    pub section: String,
    /// The error variant name, e.g. `InsufficientBalance`.
    pub name: String,
    /// Documentation lines attached to the variant.
    pub docs: Vec<String>,
}

/// Resolves module errors against the connected runtime's metadata.
pub trait MetadataRegistry: Send + Sync + Debug {
    /// Looks up the pallet and variant a module error points at.
    fn find_meta_error(&self, error: &ModuleError) -> Result<MetaError, RegistryError>;
}

/// A connected client handle for one chain.
pub trait ChainClient: Send + Sync + Debug {
    /// The chain this client is connected to.
    fn chain_id(&self) -> &str;

    /// The metadata registry of the connected runtime.
    fn registry(&self) -> &dyn MetadataRegistry;
}

/// Opens client connections. Implemented over the WebSocket client library in use.
#[async_trait]
pub trait ChainConnector: Send + Sync + Debug {
    /// Connects to `url` and resolves once the client is ready for use.
    async fn connect(
        &self,
        chain_id: &str,
        url: &str,
    ) -> Result<Arc<dyn ChainClient>, ConnectionError>;
}
