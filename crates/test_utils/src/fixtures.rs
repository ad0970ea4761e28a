// Path: crates/test_utils/src/fixtures.rs
//! Shared accounts, calls and errors used across tests.

use crate::chain::{BALANCES_PALLET, INSUFFICIENT_BALANCE};
use extrack_api::InjectedAccount;
use extrack_types::app::{CallSummary, DispatchError, EventRecord, ModuleError};
use serde_json::json;

/// A sender address (SS58, generic substrate format).
pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
/// A second address.
pub const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

/// `balances.transfer(BOB, 1 PICA)`.
pub fn transfer_call() -> CallSummary {
    CallSummary {
        method: "transfer".into(),
        section: "balances".into(),
        args: json!({ "dest": { "Id": BOB }, "value": "1.0000 PICA" }),
    }
}

/// `crowdloanRewards.claim()`.
pub fn claim_call() -> CallSummary {
    CallSummary {
        method: "claim".into(),
        section: "crowdloanRewards".into(),
        args: json!({}),
    }
}

/// The module error that resolves to `balances.InsufficientBalance`.
pub fn insufficient_balance() -> DispatchError {
    DispatchError::Module(ModuleError {
        index: BALANCES_PALLET,
        error: [INSUFFICIENT_BALANCE, 0, 0, 0],
    })
}

/// The events of a successful extrinsic.
pub fn success_events() -> Vec<EventRecord> {
    vec![
        EventRecord {
            section: "balances".into(),
            method: "Transfer".into(),
            data: json!([ALICE, BOB, "1000000000000"]),
        },
        EventRecord {
            section: "system".into(),
            method: "ExtrinsicSuccess".into(),
            data: json!([{ "weight": 195952000 }]),
        },
    ]
}

/// An extension account, optionally named.
pub fn account(address: &str, name: Option<&str>) -> InjectedAccount {
    InjectedAccount {
        address: address.to_string(),
        name: name.map(str::to_string),
    }
}
