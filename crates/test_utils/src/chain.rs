// Path: crates/test_utils/src/chain.rs
//! Mock chain client, metadata registry and connector.

use async_trait::async_trait;
use extrack_api::{ChainClient, ChainConnector, MetaError, MetadataRegistry};
use extrack_types::{
    app::ModuleError,
    error::{ConnectionError, RegistryError},
};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Pallet index of `balances` in [`MockRegistry::with_balances`].
pub const BALANCES_PALLET: u8 = 10;
/// Error index of `balances.InsufficientBalance` in [`MockRegistry::with_balances`].
pub const INSUFFICIENT_BALANCE: u8 = 2;

/// A metadata registry backed by an explicit table of pallet errors.
#[derive(Debug, Default, Clone)]
pub struct MockRegistry {
    pallets: BTreeMap<u8, String>,
    errors: BTreeMap<(u8, u8), (String, Vec<String>)>,
}

impl MockRegistry {
    /// An empty registry: every lookup fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pallet error variant.
    pub fn with_error(mut self, index: u8, section: &str, error: u8, name: &str, docs: &[&str]) -> Self {
        self.pallets.insert(index, section.to_string());
        self.errors.insert(
            (index, error),
            (name.to_string(), docs.iter().map(|d| d.to_string()).collect()),
        );
        self
    }

    /// A registry with a few `balances` errors.
    pub fn with_balances() -> Self {
        Self::new()
            .with_error(BALANCES_PALLET, "balances", 0, "VestingBalance", &["Vesting balance too high to send value."])
            .with_error(BALANCES_PALLET, "balances", 1, "LiquidityRestrictions", &["Account liquidity restrictions prevent withdrawal."])
            .with_error(BALANCES_PALLET, "balances", INSUFFICIENT_BALANCE, "InsufficientBalance", &["Balance too low to send value."])
    }
}

impl MetadataRegistry for MockRegistry {
    fn find_meta_error(&self, error: &ModuleError) -> Result<MetaError, RegistryError> {
        let section = self
            .pallets
            .get(&error.index)
            .ok_or(RegistryError::UnknownModule(error.index))?;
        let (name, docs) = self
            .errors
            .get(&(error.index, error.error_index()))
            .ok_or(RegistryError::UnknownError {
                index: error.index,
                error: error.error_index(),
            })?;
        Ok(MetaError {
            section: section.clone(),
            name: name.clone(),
            docs: docs.clone(),
        })
    }
}

/// A connected client handle with a scripted registry.
#[derive(Debug)]
pub struct MockChainClient {
    chain_id: String,
    registry: MockRegistry,
}

impl MockChainClient {
    /// A client whose registry knows the `balances` errors.
    pub fn new(chain_id: &str) -> Self {
        Self::with_registry(chain_id, MockRegistry::with_balances())
    }

    pub fn with_registry(chain_id: &str, registry: MockRegistry) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            registry,
        }
    }
}

impl ChainClient for MockChainClient {
    fn chain_id(&self) -> &str {
        &self.chain_id
    }

    fn registry(&self) -> &dyn MetadataRegistry {
        &self.registry
    }
}

#[derive(Debug, Clone)]
enum Outcome {
    Connect { delay: Duration },
    Fail(String),
    Hang,
}

/// A connector whose per-endpoint behavior is configured up front.
/// Endpoints with no configured behavior connect immediately.
#[derive(Debug, Default)]
pub struct MockConnector {
    outcomes: Mutex<BTreeMap<String, Outcome>>,
    attempts: Mutex<Vec<String>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connection attempts to `url` fail with `reason`.
    pub fn fail(self, url: &str, reason: &str) -> Self {
        self.outcomes
            .lock()
            .insert(url.to_string(), Outcome::Fail(reason.to_string()));
        self
    }

    /// Connection attempts to `url` succeed after `delay`.
    pub fn delay(self, url: &str, delay: Duration) -> Self {
        self.outcomes
            .lock()
            .insert(url.to_string(), Outcome::Connect { delay });
        self
    }

    /// Connection attempts to `url` never complete.
    pub fn hang(self, url: &str) -> Self {
        self.outcomes.lock().insert(url.to_string(), Outcome::Hang);
        self
    }

    /// Endpoints the connector was asked to open, in call order.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().clone()
    }
}

#[async_trait]
impl ChainConnector for MockConnector {
    async fn connect(&self, chain_id: &str, url: &str) -> Result<Arc<dyn ChainClient>, ConnectionError> {
        self.attempts.lock().push(url.to_string());
        let outcome = self.outcomes.lock().get(url).cloned();
        match outcome {
            None => {}
            Some(Outcome::Connect { delay }) => tokio::time::sleep(delay).await,
            Some(Outcome::Fail(reason)) => {
                return Err(ConnectionError::Unreachable {
                    url: url.to_string(),
                    reason,
                })
            }
            Some(Outcome::Hang) => std::future::pending::<()>().await,
        }
        Ok(Arc::new(MockChainClient::new(chain_id)))
    }
}
