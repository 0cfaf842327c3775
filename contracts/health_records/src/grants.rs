//! Time-bounded read capabilities keyed by `(owner, provider, record_id)`.
//!
//! Expiry is never written back: every read compares the current ledger
//! sequence against the stored `expires_at`.

use crate::config::{self, RegrantPolicy};
use crate::{audit, events, validation, ContractError};
use common::{ttl, ProviderDirectoryClient};
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

const GRANT: Symbol = symbol_short!("GRANT");

pub const EVENT_ACCESS_GRANTED: Symbol = symbol_short!("ACC_GRANT");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrant {
    pub owner: Address,
    pub provider: Address,
    pub record_id: u64,
    pub granted_at: u32,
    pub expires_at: u32,
    pub active: bool,
}

impl AccessGrant {
    /// Access holds through `expires_at` itself and lapses one height later.
    pub fn is_live(&self, height: u32) -> bool {
        self.active && height <= self.expires_at
    }
}

fn grant_key(owner: &Address, provider: &Address, record_id: u64) -> (Symbol, Address, Address, u64) {
    (GRANT, owner.clone(), provider.clone(), record_id)
}

pub fn get_grant(env: &Env, owner: &Address, provider: &Address, record_id: u64) -> Option<AccessGrant> {
    env.storage()
        .persistent()
        .get(&grant_key(owner, provider, record_id))
}

pub(crate) fn put_grant(env: &Env, grant: &AccessGrant) {
    let key = grant_key(&grant.owner, &grant.provider, grant.record_id);
    env.storage().persistent().set(&key, grant);
    ttl::extend_persistent(env, &key);
}

/// A directory that errors or cannot be reached counts as "not verified".
fn provider_is_verified(env: &Env, provider: &Address) -> Result<bool, ContractError> {
    let directory = config::provider_directory(env)?;
    let verified = ProviderDirectoryClient::new(env, &directory).try_is_verified(provider);
    Ok(matches!(verified, Ok(Ok(true))))
}

/// Creates a grant and returns its expiry height.
pub fn grant(
    env: &Env,
    owner: &Address,
    provider: &Address,
    record_id: u64,
    duration: u32,
) -> Result<u32, ContractError> {
    if !provider_is_verified(env, provider)? {
        return Err(ContractError::ProviderNotVerified);
    }

    let now = env.ledger().sequence();
    let expires_at = validation::expiry_height(now, duration)?;

    if let Some(existing) = get_grant(env, owner, provider, record_id) {
        let replaceable = config::regrant_policy(env) == RegrantPolicy::AllowAfterLapse
            && !existing.is_live(now);
        if !replaceable {
            return Err(ContractError::GrantExists);
        }
    }

    let grant = AccessGrant {
        owner: owner.clone(),
        provider: provider.clone(),
        record_id,
        granted_at: now,
        expires_at,
        active: true,
    };
    put_grant(env, &grant);

    audit::append(
        env,
        EVENT_ACCESS_GRANTED,
        owner.clone(),
        Some(provider.clone()),
        record_id,
        String::from_str(env, "access granted"),
    )?;
    events::publish_access_granted(env, &grant, duration);

    Ok(expires_at)
}

pub fn has_access(env: &Env, owner: &Address, provider: &Address, record_id: u64) -> bool {
    get_grant(env, owner, provider, record_id)
        .map(|grant| grant.is_live(env.ledger().sequence()))
        .unwrap_or(false)
}
