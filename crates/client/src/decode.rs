// Path: crates/client/src/decode.rs
//! Best-effort, human-readable rendering of dispatch errors.

use extrack_api::{ChainClient, MetaError};
use extrack_telemetry::error_metrics;
use extrack_types::{app::DispatchError, error::ErrorCode};

/// Formats a resolved pallet error as `<section>.<name>: <docs>`.
pub fn format_meta_error(meta: &MetaError) -> String {
    format!("{}.{}: {}", meta.section, meta.name, meta.docs.join(" "))
}

/// Renders `error` for display.
///
/// Module errors are resolved through the client's metadata registry. Anything
/// else, and any module error the registry cannot resolve, falls back to the
/// error's generic representation. Never fails.
pub fn decode_dispatch_error(error: &DispatchError, client: &dyn ChainClient) -> String {
    let Some(module) = error.as_module() else {
        return error.to_string();
    };
    match client.registry().find_meta_error(module) {
        Ok(meta) => format_meta_error(&meta),
        Err(e) => {
            tracing::warn!(
                target: "executor",
                chain = client.chain_id(),
                pallet = module.index,
                error = %e,
                "Could not resolve module error; using generic form"
            );
            error_metrics().inc_error("registry", e.code());
            error.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extrack_test_utils::{fixtures, MockChainClient, MockRegistry};
    use extrack_types::app::{ModuleError, TokenError};

    #[test]
    fn module_error_resolves_through_registry() {
        let client = MockChainClient::new("picasso");
        assert_eq!(
            decode_dispatch_error(&fixtures::insufficient_balance(), &client),
            "balances.InsufficientBalance: Balance too low to send value."
        );
    }

    #[test]
    fn multi_line_docs_are_joined_by_space() {
        let registry = MockRegistry::new().with_error(
            59,
            "crowdloanRewards",
            4,
            "NotAssociated",
            &["The account is not associated", "with a reward account."],
        );
        let client = MockChainClient::with_registry("picasso", registry);
        let error = DispatchError::Module(ModuleError {
            index: 59,
            error: [4, 0, 0, 0],
        });
        assert_eq!(
            decode_dispatch_error(&error, &client),
            "crowdloanRewards.NotAssociated: The account is not associated with a reward account."
        );
    }

    #[test]
    fn unknown_module_error_falls_back() {
        let client = MockChainClient::with_registry("picasso", MockRegistry::new());
        let error = fixtures::insufficient_balance();
        assert_eq!(decode_dispatch_error(&error, &client), error.to_string());
    }

    #[test]
    fn non_module_errors_use_generic_form() {
        let client = MockChainClient::new("picasso");
        assert_eq!(
            decode_dispatch_error(&DispatchError::BadOrigin, &client),
            DispatchError::BadOrigin.to_string()
        );
        let token = DispatchError::Token(TokenError::FundsUnavailable);
        assert_eq!(decode_dispatch_error(&token, &client), token.to_string());
    }
}
