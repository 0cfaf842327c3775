//! Model-based state machine test.
//!
//! A random sequence of store / update / grant / revoke / advance operations
//! is applied both to the contract and to a plain in-memory model. After
//! every step the two must agree on results, versions, access and the
//! number of audit entries written.

use crate::common::{create_funded_user, create_verified_provider, setup_test_env};
use health_records::ContractError;
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, String, Symbol};
use std::collections::BTreeMap;

const RECORD_IDS: u64 = 4;
const VERIFIED: usize = 0;

#[derive(Arbitrary, Debug, Clone)]
enum Op {
    Store {
        #[proptest(strategy = "0u64..RECORD_IDS")]
        record_id: u64,
    },
    Update {
        #[proptest(strategy = "0u64..RECORD_IDS")]
        record_id: u64,
    },
    Grant {
        #[proptest(strategy = "0usize..2")]
        provider: usize,
        #[proptest(strategy = "0u64..RECORD_IDS")]
        record_id: u64,
        #[proptest(strategy = "1u32..20")]
        duration: u32,
    },
    Revoke {
        #[proptest(strategy = "0usize..2")]
        provider: usize,
        #[proptest(strategy = "0u64..RECORD_IDS")]
        record_id: u64,
    },
    Advance {
        #[proptest(strategy = "0u32..15")]
        ledgers: u32,
    },
}

#[derive(Default)]
struct Model {
    height: u32,
    versions: BTreeMap<u64, u32>,
    // (provider index, record id) -> (expires_at, active)
    grants: BTreeMap<(usize, u64), (u32, bool)>,
    audit_entries: u64,
}

impl Model {
    fn has_access(&self, provider: usize, record_id: u64) -> bool {
        matches!(
            self.grants.get(&(provider, record_id)),
            Some((expires_at, true)) if self.height <= *expires_at
        )
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_contract_matches_model(ops in prop::collection::vec(any::<Op>(), 1..40)) {
        let ctx = setup_test_env();
        let owner = create_funded_user(&ctx);
        let providers: [Address; 2] = [
            create_verified_provider(&ctx),
            Address::generate(&ctx.env),
        ];
        let hash = String::from_str(&ctx.env, "hash");
        let category = Symbol::new(&ctx.env, "vital");
        let empty = String::from_str(&ctx.env, "");

        let mut model = Model { height: 1, ..Model::default() };
        ctx.env.ledger().set_sequence_number(model.height);

        for op in ops {
            match op {
                Op::Store { record_id } => {
                    let result = ctx.client.try_store_record(
                        &owner, &record_id, &hash, &category, &1, &empty,
                    );
                    if model.versions.contains_key(&record_id) {
                        prop_assert_eq!(result, Err(Ok(ContractError::RecordExists)));
                    } else {
                        prop_assert!(matches!(result, Ok(Ok(_))));
                        model.versions.insert(record_id, 1);
                        model.audit_entries += 1;
                    }
                }
                Op::Update { record_id } => {
                    let result = ctx.client.try_update_record(
                        &owner, &record_id, &hash, &category, &2, &empty,
                    );
                    match model.versions.get_mut(&record_id) {
                        Some(version) => {
                            *version += 1;
                            prop_assert_eq!(result, Ok(Ok(*version)));
                            model.audit_entries += 1;
                        }
                        None => prop_assert_eq!(result, Err(Ok(ContractError::NotOwner))),
                    }
                }
                Op::Grant { provider, record_id, duration } => {
                    let result = ctx.client.try_grant_access(
                        &owner, &providers[provider], &record_id, &duration,
                    );
                    if provider != VERIFIED {
                        prop_assert_eq!(result, Err(Ok(ContractError::ProviderNotVerified)));
                    } else if model.grants.contains_key(&(provider, record_id)) {
                        prop_assert_eq!(result, Err(Ok(ContractError::GrantExists)));
                    } else {
                        let expires_at = model.height + duration;
                        prop_assert_eq!(result, Ok(Ok(expires_at)));
                        model.grants.insert((provider, record_id), (expires_at, true));
                        model.audit_entries += 1;
                    }
                }
                Op::Revoke { provider, record_id } => {
                    let result = ctx.client.try_revoke_access(
                        &owner, &providers[provider], &record_id,
                    );
                    match model.grants.get_mut(&(provider, record_id)) {
                        Some((_, active)) if *active => {
                            prop_assert_eq!(result, Ok(Ok(())));
                            *active = false;
                            model.audit_entries += 1;
                        }
                        _ => prop_assert_eq!(result, Err(Ok(ContractError::NoActiveGrant))),
                    }
                }
                Op::Advance { ledgers } => {
                    model.height += ledgers;
                    ctx.env.ledger().set_sequence_number(model.height);
                }
            }

            prop_assert_eq!(ctx.client.audit_count(), model.audit_entries);
            for record_id in 0..RECORD_IDS {
                let version = ctx.client.get_record(&owner, &record_id).map(|r| r.version);
                prop_assert_eq!(version, model.versions.get(&record_id).copied());
                for (idx, provider) in providers.iter().enumerate() {
                    prop_assert_eq!(
                        ctx.client.has_access(&owner, provider, &record_id),
                        model.has_access(idx, record_id)
                    );
                }
            }
        }
    }
}
