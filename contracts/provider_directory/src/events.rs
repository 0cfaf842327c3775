#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

/// Fired once when the directory is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectoryInitializedEvent {
    pub admin: Address,
    pub height: u32,
}

/// Fired whenever a provider's verified flag is written.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderVerifiedEvent {
    pub provider: Address,
    pub verifier: Address,
    pub verified: bool,
    pub height: u32,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("DIR_INIT"),);
    let data = DirectoryInitializedEvent {
        admin,
        height: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_provider_verified(env: &Env, provider: Address, verifier: Address, verified: bool) {
    let topics = (symbol_short!("PROV_VER"), provider.clone());
    let data = ProviderVerifiedEvent {
        provider,
        verifier,
        verified,
        height: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}
