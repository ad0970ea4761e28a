// Path: crates/types/src/app/extrinsic.rs

use super::TxHash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle status of a tracked extrinsic.
///
/// The happy path is `IsReady -> IsInBlock -> IsFinalized`. A call may also move
/// from `IsReady` (or `IsInBlock`) straight to `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtrinsicStatus {
    /// Accepted into the node's submission pool.
    #[serde(rename = "isReady")]
    IsReady,
    /// Included in a block that is not yet final.
    #[serde(rename = "isInBlock")]
    IsInBlock,
    /// Included in a finalized block.
    #[serde(rename = "isFinalized")]
    IsFinalized,
    /// Rejected by the runtime with a dispatch error.
    #[serde(rename = "Error")]
    Error,
}

impl ExtrinsicStatus {
    /// The wire name of the status, matching its serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsReady => "isReady",
            Self::IsInBlock => "isInBlock",
            Self::IsFinalized => "isFinalized",
            Self::Error => "Error",
        }
    }

    /// `true` for `IsFinalized` and `Error`, after which no further writes happen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::IsFinalized | Self::Error)
    }

    /// `true` while the call is still making progress.
    pub fn is_pending(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for ExtrinsicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The human-readable decoding of a call: its pallet, method and arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSummary {
    /// The call name, e.g. `transfer`.
    pub method: String,
    /// The owning pallet, e.g. `balances`.
    pub section: String,
    /// The arguments as rendered by the client library.
    #[serde(default)]
    pub args: serde_json::Value,
}

/// A runtime event emitted while the extrinsic was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// The emitting pallet.
    pub section: String,
    /// The event name.
    pub method: String,
    /// The event payload as rendered by the client library.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// The tracked lifecycle record of one submitted extrinsic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Canonical (lower-cased) transaction hash; the store key.
    pub hash: TxHash,
    /// The call name.
    pub method: String,
    /// The owning pallet.
    pub section: String,
    /// The submitting account; empty for unsigned calls.
    pub sender: String,
    /// A snapshot of the call's human-readable arguments.
    pub args: serde_json::Value,
    /// Whether the call was signed by `sender`.
    pub is_signed: bool,
    /// Current lifecycle status.
    pub status: ExtrinsicStatus,
    /// The hash of the block that included the call, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    /// The decoded dispatch error, set only on the `Error` transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_error: Option<String>,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl TransactionRecord {
    /// Builds the record written when a call first reaches the ready pool.
    pub fn ready(
        hash: TxHash,
        call: CallSummary,
        sender: impl Into<String>,
        is_signed: bool,
        timestamp: u64,
    ) -> Self {
        Self {
            hash,
            method: call.method,
            section: call.section,
            sender: sender.into(),
            args: call.args,
            is_signed,
            status: ExtrinsicStatus::IsReady,
            block_hash: None,
            dispatch_error: None,
            timestamp,
        }
    }

    /// Whether this record belongs to the `(method, section, sender)` call signature.
    pub fn matches(&self, method: &str, section: &str, sender: &str) -> bool {
        self.method == method && self.section == section && self.sender == sender
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transfer() -> CallSummary {
        CallSummary {
            method: "transfer".into(),
            section: "balances".into(),
            args: json!({ "dest": "5Grw", "value": "1.0000 PICA" }),
        }
    }

    #[test]
    fn status_serializes_with_wire_names() {
        let encoded = serde_json::to_string(&ExtrinsicStatus::IsInBlock).unwrap();
        assert_eq!(encoded, "\"isInBlock\"");
        let decoded: ExtrinsicStatus = serde_json::from_str("\"Error\"").unwrap();
        assert_eq!(decoded, ExtrinsicStatus::Error);
    }

    #[test]
    fn terminal_statuses() {
        assert!(ExtrinsicStatus::IsReady.is_pending());
        assert!(ExtrinsicStatus::IsInBlock.is_pending());
        assert!(ExtrinsicStatus::IsFinalized.is_terminal());
        assert!(ExtrinsicStatus::Error.is_terminal());
    }

    #[test]
    fn ready_record_shape() {
        let rec = TransactionRecord::ready("0xabc".into(), transfer(), "5F", true, 42);
        assert_eq!(rec.status, ExtrinsicStatus::IsReady);
        assert!(rec.is_signed);
        assert!(rec.block_hash.is_none());
        assert!(rec.matches("transfer", "balances", "5F"));
        assert!(!rec.matches("transfer", "balances", ""));

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["isSigned"], json!(true));
        assert_eq!(value["status"], json!("isReady"));
        assert!(value.get("dispatchError").is_none());
    }
}
