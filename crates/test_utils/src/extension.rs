// Path: crates/test_utils/src/extension.rs
//! Mock signing extension and signer.

use async_trait::async_trait;
use extrack_api::{ExtensionBridge, InjectedAccount, InjectedExtension, Signer};
use extrack_types::error::ExtensionError;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A signer that returns a fixed-shape signature or refuses every request.
#[derive(Debug, Default)]
pub struct MockSigner {
    refuse: bool,
    signed: AtomicUsize,
}

impl MockSigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A signer that rejects every request, as when the user cancels the prompt.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            signed: AtomicUsize::new(0),
        }
    }

    /// Number of payloads signed.
    pub fn signed(&self) -> usize {
        self.signed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Signer for MockSigner {
    async fn sign_payload(&self, address: &str, payload: &[u8]) -> Result<Vec<u8>, ExtensionError> {
        if self.refuse {
            return Err(ExtensionError::Rejected("Cancelled".into()));
        }
        self.signed.fetch_add(1, Ordering::SeqCst);
        let mut sig = address.as_bytes().to_vec();
        sig.extend_from_slice(payload);
        sig.resize(64, 0);
        Ok(sig)
    }
}

/// A signing extension with scripted extensions and accounts per address format.
#[derive(Debug)]
pub struct MockExtension {
    injected: Vec<InjectedExtension>,
    enable_error: Option<String>,
    accounts: BTreeMap<u16, Result<Vec<InjectedAccount>, String>>,
    signer: Arc<MockSigner>,
    enabled_for: Mutex<Vec<String>>,
}

impl MockExtension {
    /// No extension installed: `enable` grants nothing.
    pub fn none() -> Self {
        Self {
            injected: Vec::new(),
            enable_error: None,
            accounts: BTreeMap::new(),
            signer: Arc::new(MockSigner::new()),
            enabled_for: Mutex::new(Vec::new()),
        }
    }

    /// One installed extension with no accounts yet.
    pub fn installed() -> Self {
        let mut ext = Self::none();
        ext.injected.push(InjectedExtension {
            name: "polkadot-js".into(),
            version: "0.44.1".into(),
        });
        ext
    }

    /// `enable` itself fails, as when the extension API throws.
    pub fn broken(reason: &str) -> Self {
        let mut ext = Self::none();
        ext.enable_error = Some(reason.to_string());
        ext
    }

    /// Accounts returned when listing with `prefix`.
    pub fn with_accounts(mut self, prefix: u16, accounts: Vec<InjectedAccount>) -> Self {
        self.accounts.insert(prefix, Ok(accounts));
        self
    }

    /// Listing with `prefix` fails.
    pub fn with_account_error(mut self, prefix: u16, reason: &str) -> Self {
        self.accounts.insert(prefix, Err(reason.to_string()));
        self
    }

    /// The signer handed out by `signer_for`.
    pub fn with_signer(mut self, signer: Arc<MockSigner>) -> Self {
        self.signer = signer;
        self
    }

    /// App names `enable` was called with.
    pub fn enabled_for(&self) -> Vec<String> {
        self.enabled_for.lock().clone()
    }
}

#[async_trait]
impl ExtensionBridge for MockExtension {
    async fn enable(&self, app_name: &str) -> Result<Vec<InjectedExtension>, ExtensionError> {
        self.enabled_for.lock().push(app_name.to_string());
        if let Some(reason) = &self.enable_error {
            return Err(ExtensionError::Rejected(reason.clone()));
        }
        Ok(self.injected.clone())
    }

    async fn accounts(&self, ss58_format: u16) -> Result<Vec<InjectedAccount>, ExtensionError> {
        if self.injected.is_empty() {
            return Err(ExtensionError::NotInstalled);
        }
        match self.accounts.get(&ss58_format) {
            Some(Ok(accounts)) => Ok(accounts.clone()),
            Some(Err(reason)) => Err(ExtensionError::AccountLookup {
                prefix: ss58_format,
                reason: reason.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn signer_for(&self, address: &str) -> Result<Arc<dyn Signer>, ExtensionError> {
        let known = self
            .accounts
            .values()
            .filter_map(|r| r.as_ref().ok())
            .flatten()
            .any(|a| a.address == address);
        if !known {
            return Err(ExtensionError::NoSigner(address.to_string()));
        }
        Ok(self.signer.clone())
    }
}
