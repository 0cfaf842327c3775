#![no_main]

use arbitrary::Arbitrary;
use health_records::{HealthRecordsContract, HealthRecordsContractClient};
use libfuzzer_sys::fuzz_target;
use provider_directory::{ProviderDirectoryContract, ProviderDirectoryContractClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env, String, Symbol};

const CATEGORIES: [&str; 6] = ["vital", "lab", "imaging", "prescription", "other", "bogus"];

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Store { user: u8, record_id: u8, hash_len: u8, category: u8, sensitivity: u8 },
    Update { user: u8, record_id: u8, hash_len: u8, category: u8, sensitivity: u8 },
    Grant { user: u8, provider: u8, record_id: u8, duration: u32 },
    Revoke { user: u8, provider: u8, record_id: u8 },
    Advance { ledgers: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);

    let directory_id = env.register(ProviderDirectoryContract, ());
    let directory = ProviderDirectoryContractClient::new(&env, &directory_id);
    directory.initialize(&admin);

    let fee_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(HealthRecordsContract, ());
    let client = HealthRecordsContractClient::new(&env, &contract_id);
    client.initialize(&admin, &directory_id, &fee_token);
    client.set_authority(&admin, &Address::generate(&env));

    let users: Vec<Address> = (0..3).map(|_| Address::generate(&env)).collect();
    // Only the first user starts funded so fee failures are exercised too.
    StellarAssetClient::new(&env, &fee_token).mint(&users[0], &1_000_000);

    let providers: Vec<Address> = (0..2).map(|_| Address::generate(&env)).collect();
    directory.set_verified(&admin, &providers[0], &true);

    let mut height: u32 = 1;
    env.ledger().set_sequence_number(height);

    let pick = |n: u8| &users[n as usize % users.len()];
    let pick_provider = |n: u8| &providers[n as usize % providers.len()];
    let hash_of = |len: u8| String::from_bytes(&env, &vec![b'a'; len as usize % 80]);
    let category_of = |n: u8| Symbol::new(&env, CATEGORIES[n as usize % CATEGORIES.len()]);

    for action in actions {
        let audit_before = client.audit_count();
        let succeeded = match action {
            FuzzAction::Store { user, record_id, hash_len, category, sensitivity } => client
                .try_store_record(
                    pick(user),
                    &(record_id as u64 % 8),
                    &hash_of(hash_len),
                    &category_of(category),
                    &(sensitivity as u32 % 6),
                    &String::from_str(&env, ""),
                )
                .is_ok(),
            FuzzAction::Update { user, record_id, hash_len, category, sensitivity } => client
                .try_update_record(
                    pick(user),
                    &(record_id as u64 % 8),
                    &hash_of(hash_len),
                    &category_of(category),
                    &(sensitivity as u32 % 6),
                    &String::from_str(&env, ""),
                )
                .is_ok(),
            FuzzAction::Grant { user, provider, record_id, duration } => client
                .try_grant_access(pick(user), pick_provider(provider), &(record_id as u64 % 8), &duration)
                .is_ok(),
            FuzzAction::Revoke { user, provider, record_id } => client
                .try_revoke_access(pick(user), pick_provider(provider), &(record_id as u64 % 8))
                .is_ok(),
            FuzzAction::Advance { ledgers } => {
                // Stay well inside the default test-ledger entry lifetime.
                height = (height + ledgers as u32 % 200).min(4_000);
                env.ledger().set_sequence_number(height);
                continue;
            }
        };

        // Exactly one audit entry per successful mutation, none otherwise.
        let expected = if succeeded { audit_before + 1 } else { audit_before };
        assert_eq!(client.audit_count(), expected);
    }

    assert!(client.verify_audit_chain(&0, &50));
});
