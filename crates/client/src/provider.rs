// Path: crates/client/src/provider.rs

//! Per-chain client connections and extension accounts.
//!
//! The provider owns one [`ConnectionState`] per chain in the network table and
//! publishes the whole [`ProviderState`] through a watch channel. Connections are
//! opened by [`ConnectionProvider::mount`], one task per supported chain, so a slow
//! or dead endpoint never holds up the others. Accounts are only populated by an
//! explicit [`ConnectionProvider::activate`].

use extrack_api::{ChainClient, ChainConnector, ExtensionBridge, InjectedExtension, Signer};
use extrack_telemetry::{connection_metrics, error_metrics};
use extrack_types::{
    app::{Account, ApiStatus, ChainId, ExtensionStatus},
    config::{NetworkConfig, ProviderConfig, SupportedChain},
    error::{ConfigError, ErrorCode, ExtensionError},
};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// The connection and account state of one chain.
#[derive(Debug, Clone)]
pub struct ConnectionState {
    pub chain_id: ChainId,
    /// Present once the client connected.
    pub client: Option<Arc<dyn ChainClient>>,
    pub api_status: ApiStatus,
    /// Accounts discovered through the extension, encoded with `prefix`.
    pub accounts: Vec<Account>,
    /// The chain's SS58 address format.
    pub prefix: u16,
}

impl ConnectionState {
    fn initializing(chain_id: &str, network: &NetworkConfig) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            client: None,
            api_status: ApiStatus::Initializing,
            accounts: Vec::new(),
            prefix: network.prefix,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.api_status == ApiStatus::Connected && self.client.is_some()
    }
}

/// Everything the provider publishes.
#[derive(Debug, Clone)]
pub struct ProviderState {
    pub parachain_providers: BTreeMap<ChainId, ConnectionState>,
    pub relaychain_providers: BTreeMap<ChainId, ConnectionState>,
    pub extension_status: ExtensionStatus,
    /// Index into a chain's `accounts`.
    pub selected_account: Option<usize>,
}

impl ProviderState {
    fn from_config(config: &ProviderConfig) -> Self {
        let table = |networks: &BTreeMap<ChainId, NetworkConfig>| {
            networks
                .iter()
                .map(|(id, network)| (id.clone(), ConnectionState::initializing(id, network)))
                .collect()
        };
        Self {
            parachain_providers: table(&config.networks.parachains),
            relaychain_providers: table(&config.networks.relaychains),
            extension_status: ExtensionStatus::Initializing,
            selected_account: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainKind {
    Parachain,
    Relaychain,
}

impl ChainKind {
    fn providers_mut(self, state: &mut ProviderState) -> &mut BTreeMap<ChainId, ConnectionState> {
        match self {
            Self::Parachain => &mut state.parachain_providers,
            Self::Relaychain => &mut state.relaychain_providers,
        }
    }
}

/// The connection tasks started by [`ConnectionProvider::mount`].
///
/// Dropping the handle leaves the tasks running.
#[derive(Debug)]
pub struct MountHandle {
    tasks: Vec<JoinHandle<(ChainId, ApiStatus)>>,
}

impl MountHandle {
    /// Waits for every connection attempt and returns each chain's resulting status.
    pub async fn join(self) -> Vec<(ChainId, ApiStatus)> {
        join_all(self.tasks)
            .await
            .into_iter()
            .filter_map(|res| match res {
                Ok(status) => Some(status),
                Err(e) => {
                    tracing::error!(target: "provider", error = %e, "Connection task ended abnormally");
                    None
                }
            })
            .collect()
    }

    /// Cancels the attempts that have not completed yet.
    pub fn abort(&self) {
        for task in &self.tasks {
            task.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(JoinHandle::is_finished)
    }
}

#[derive(Debug)]
struct Inner {
    config: ProviderConfig,
    connector: Arc<dyn ChainConnector>,
    extension: Arc<dyn ExtensionBridge>,
    state: watch::Sender<ProviderState>,
}

/// Process-wide chain connections and extension accounts.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    inner: Arc<Inner>,
}

impl ConnectionProvider {
    /// Builds a provider over `config`. Every chain in the network table starts out
    /// `initializing`; nothing is connected until [`mount`](Self::mount).
    pub fn new(
        config: ProviderConfig,
        connector: Arc<dyn ChainConnector>,
        extension: Arc<dyn ExtensionBridge>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let (state, _) = watch::channel(ProviderState::from_config(&config));
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                connector,
                extension,
                state,
            }),
        })
    }

    /// Starts one connection attempt per supported chain. Must be called from within
    /// a Tokio runtime, once.
    pub fn mount(&self) -> MountHandle {
        let config = &self.inner.config;
        let parachains = config.supported_parachains.iter().filter_map(|chain| {
            let network = config.networks.get_parachain_network(&chain.chain_id);
            self.endpoint(ChainKind::Parachain, chain, network)
        });
        let relaychains = config.supported_relaychains.iter().filter_map(|chain| {
            let network = config.networks.get_relaychain_network(&chain.chain_id);
            self.endpoint(ChainKind::Relaychain, chain, network)
        });
        let tasks = parachains
            .chain(relaychains)
            .map(|(kind, chain_id, url)| tokio::spawn(connect(self.inner.clone(), kind, chain_id, url)))
            .collect();
        MountHandle { tasks }
    }

    fn endpoint(
        &self,
        kind: ChainKind,
        chain: &SupportedChain,
        network: Option<&NetworkConfig>,
    ) -> Option<(ChainKind, ChainId, String)> {
        let Some(network) = network else {
            tracing::warn!(target: "provider", chain = %chain.chain_id, "Chain missing from network table; not connecting");
            return None;
        };
        let url = chain.rpc_url.clone().unwrap_or_else(|| network.ws_url.clone());
        Some((kind, chain.chain_id.clone(), url))
    }

    /// Requests extension access and discovers accounts for every supported parachain.
    ///
    /// Returns the extensions that granted access; empty when none did, in which
    /// case the extension status is `no_extension` and no accounts are stored.
    pub async fn activate(&self) -> Vec<InjectedExtension> {
        let inner = &self.inner;
        self.set_extension_status(ExtensionStatus::Connecting);

        let injected = match inner.extension.enable(&inner.config.app_name).await {
            Ok(injected) => injected,
            Err(e) => {
                tracing::warn!(target: "provider", error = %e, "Extension enable failed");
                error_metrics().inc_error("extension", e.code());
                Vec::new()
            }
        };
        if injected.is_empty() {
            self.set_extension_status(ExtensionStatus::NoExtension);
            connection_metrics().inc_extension_activation(ExtensionStatus::NoExtension.as_str());
            return injected;
        }
        self.set_extension_status(ExtensionStatus::Connected);

        let mut found_any = false;
        for chain in &inner.config.supported_parachains {
            let chain_id = &chain.chain_id;
            let prefix = inner
                .state
                .borrow()
                .parachain_providers
                .get(chain_id)
                .map(|conn| conn.prefix);
            let Some(prefix) = prefix else {
                continue;
            };
            let accounts = match inner.extension.accounts(prefix).await {
                Ok(accounts) => accounts,
                Err(e) => {
                    tracing::warn!(target: "provider", chain = %chain_id, error = %e, "Account discovery failed");
                    error_metrics().inc_error("extension", e.code());
                    continue;
                }
            };
            let accounts: Vec<Account> = accounts
                .into_iter()
                .enumerate()
                .map(|(i, acc)| Account {
                    address: acc.address,
                    name: acc.name.unwrap_or_else(|| i.to_string()),
                })
                .collect();
            tracing::info!(target: "provider", chain = %chain_id, count = accounts.len(), "Accounts discovered");
            found_any |= !accounts.is_empty();
            inner.state.send_modify(|state| {
                if let Some(conn) = state.parachain_providers.get_mut(chain_id) {
                    conn.accounts = accounts;
                }
            });
        }

        inner.state.send_modify(|state| {
            state.selected_account = found_any.then_some(0);
        });
        connection_metrics().inc_extension_activation(ExtensionStatus::Connected.as_str());
        injected
    }

    /// Forgets all discovered accounts and the selection.
    pub fn deactivate(&self) {
        self.inner.state.send_modify(|state| {
            state.extension_status = ExtensionStatus::Initializing;
            for conn in state.parachain_providers.values_mut() {
                conn.accounts.clear();
            }
            state.selected_account = None;
        });
        tracing::info!(target: "provider", "Extension deactivated");
    }

    /// Enables the extension under the app name and returns the signer holding `address`.
    pub async fn get_signer(&self, address: &str) -> Result<Arc<dyn Signer>, ExtensionError> {
        let inner = &self.inner;
        inner.extension.enable(&inner.config.app_name).await?;
        inner.extension.signer_for(address).await
    }

    /// The current state.
    pub fn state(&self) -> ProviderState {
        self.inner.state.borrow().clone()
    }

    /// A receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ProviderState> {
        self.inner.state.subscribe()
    }

    pub fn parachain_api(&self, chain_id: &str) -> Option<ConnectionState> {
        self.inner.state.borrow().parachain_providers.get(chain_id).cloned()
    }

    pub fn relaychain_api(&self, chain_id: &str) -> Option<ConnectionState> {
        self.inner.state.borrow().relaychain_providers.get(chain_id).cloned()
    }

    /// The connected client of a parachain, if any.
    pub fn parachain_client(&self, chain_id: &str) -> Option<Arc<dyn ChainClient>> {
        self.inner
            .state
            .borrow()
            .parachain_providers
            .get(chain_id)
            .and_then(|conn| conn.client.clone())
    }

    pub fn extension_status(&self) -> ExtensionStatus {
        self.inner.state.borrow().extension_status
    }

    /// Sets the selected account index. `None` clears the selection.
    pub fn select_account(&self, index: Option<usize>) {
        self.inner.state.send_if_modified(|state| {
            let changed = state.selected_account != index;
            state.selected_account = index;
            changed
        });
    }

    /// The selected account on `chain_id`, if a selection exists and the chain has it.
    pub fn selected_account(&self, chain_id: &str) -> Option<Account> {
        let state = self.inner.state.borrow();
        let index = state.selected_account?;
        state
            .parachain_providers
            .get(chain_id)
            .and_then(|conn| conn.accounts.get(index))
            .cloned()
    }

    fn set_extension_status(&self, status: ExtensionStatus) {
        self.inner.state.send_if_modified(|state| {
            let changed = state.extension_status != status;
            state.extension_status = status;
            changed
        });
    }
}

async fn connect(inner: Arc<Inner>, kind: ChainKind, chain_id: ChainId, url: String) -> (ChainId, ApiStatus) {
    tracing::info!(target: "provider", chain = %chain_id, %url, "Connecting");
    let (client, status) = match inner.connector.connect(&chain_id, &url).await {
        Ok(client) => {
            tracing::info!(target: "provider", chain = %chain_id, "Connected");
            (Some(client), ApiStatus::Connected)
        }
        Err(e) => {
            tracing::error!(target: "provider", chain = %chain_id, %url, error = %e, "Connection failed");
            error_metrics().inc_error("connection", e.code());
            (None, ApiStatus::Failed)
        }
    };
    connection_metrics().set_api_status(&chain_id, status.as_str());
    inner.state.send_modify(|state| {
        if let Some(conn) = kind.providers_mut(state).get_mut(&chain_id) {
            conn.client = client;
            conn.api_status = status;
        }
    });
    (chain_id, status)
}
