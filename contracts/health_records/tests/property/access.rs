//! Property-based tests for the grant lifecycle.
//!
//! Invariants tested:
//! - `has_access` is true exactly while `height <= granted_at + duration`
//! - an unverified provider is always refused, whatever the duration
//! - revoking a key that is absent or already inactive always fails and
//!   leaves the audit log untouched

use crate::common::{create_funded_user, create_verified_provider, setup_test_env};
use health_records::ContractError;
use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::Address;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_access_window_is_inclusive(
        start in 1u32..1_000,
        duration in 1u32..1_000,
        probe in 0u32..2_000,
    ) {
        let ctx = setup_test_env();
        let owner = create_funded_user(&ctx);
        let provider = create_verified_provider(&ctx);

        ctx.env.ledger().set_sequence_number(start);
        let expires_at = ctx.client.grant_access(&owner, &provider, &1, &duration);
        prop_assert_eq!(expires_at, start + duration);

        let height = start + probe;
        ctx.env.ledger().set_sequence_number(height);
        prop_assert_eq!(
            ctx.client.has_access(&owner, &provider, &1),
            height <= expires_at
        );
        prop_assert!(!ctx.client.is_revoked(&owner, &provider, &1));
    }

    #[test]
    fn prop_unverified_provider_always_refused(duration in any::<u32>(), record_id in any::<u64>()) {
        let ctx = setup_test_env();
        let owner = create_funded_user(&ctx);
        let provider = Address::generate(&ctx.env);

        prop_assert_eq!(
            ctx.client.try_grant_access(&owner, &provider, &record_id, &duration),
            Err(Ok(ContractError::ProviderNotVerified))
        );
    }

    #[test]
    fn prop_revoke_without_active_grant_fails(record_id in any::<u64>(), revoke_first in any::<bool>()) {
        let ctx = setup_test_env();
        let owner = create_funded_user(&ctx);
        let provider = create_verified_provider(&ctx);

        if revoke_first {
            ctx.client.grant_access(&owner, &provider, &record_id, &10);
            ctx.client.revoke_access(&owner, &provider, &record_id);
        }
        let audit_before = ctx.client.audit_count();
        let grant_before = ctx.client.get_grant(&owner, &provider, &record_id);

        prop_assert_eq!(
            ctx.client.try_revoke_access(&owner, &provider, &record_id),
            Err(Ok(ContractError::NoActiveGrant))
        );
        prop_assert_eq!(ctx.client.audit_count(), audit_before);
        prop_assert_eq!(ctx.client.get_grant(&owner, &provider, &record_id), grant_before);
    }
}
