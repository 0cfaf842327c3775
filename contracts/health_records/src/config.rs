//! Scalar configuration held in instance storage: collaborators, the
//! authority principal, the update fee, the per-user quota and the
//! re-grant policy.

use crate::{events, validation, ContractError};
use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Storage keys ──────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const DIRECTORY: Symbol = symbol_short!("DIRECTORY");
const FEE_TOKEN: Symbol = symbol_short!("FEE_TOK");
const AUTHORITY: Symbol = symbol_short!("AUTHORITY");
const UPDATE_FEE: Symbol = symbol_short!("UPD_FEE");
const MAX_RECORDS: Symbol = symbol_short!("MAX_RECS");
const REGRANT_POLICY: Symbol = symbol_short!("RGNT_POL");

pub const DEFAULT_MAX_RECORDS_PER_USER: u32 = 100;
pub const DEFAULT_UPDATE_FEE: i128 = 500;

/// What `grant_access` does when an entry already exists for the key.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegrantPolicy {
    /// Any existing entry, active or not, blocks a new grant forever.
    Locked,
    /// A revoked or height-expired entry may be replaced by a fresh grant.
    AllowAfterLapse,
}

// ── Lifecycle ────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !is_initialized(env) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

pub fn initialize(
    env: &Env,
    admin: &Address,
    provider_directory: &Address,
    fee_token: &Address,
) -> Result<(), ContractError> {
    if is_initialized(env) {
        return Err(ContractError::AlreadyInitialized);
    }

    let store = env.storage().instance();
    store.set(&ADMIN, admin);
    store.set(&DIRECTORY, provider_directory);
    store.set(&FEE_TOKEN, fee_token);
    store.set(&UPDATE_FEE, &DEFAULT_UPDATE_FEE);
    store.set(&MAX_RECORDS, &DEFAULT_MAX_RECORDS_PER_USER);
    store.set(&REGRANT_POLICY, &RegrantPolicy::Locked);
    store.set(&INITIALIZED, &true);
    ttl::extend_instance(env);

    Ok(())
}

// ── Getters ──────────────────────────────────────────────────

pub fn admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub fn provider_directory(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DIRECTORY)
        .ok_or(ContractError::NotInitialized)
}

pub fn fee_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&FEE_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub fn authority(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AUTHORITY)
}

pub fn require_authority(env: &Env) -> Result<Address, ContractError> {
    authority(env).ok_or(ContractError::AuthorityNotConfigured)
}

pub fn update_fee(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&UPDATE_FEE)
        .unwrap_or(DEFAULT_UPDATE_FEE)
}

pub fn max_records_per_user(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&MAX_RECORDS)
        .unwrap_or(DEFAULT_MAX_RECORDS_PER_USER)
}

pub fn regrant_policy(env: &Env) -> RegrantPolicy {
    env.storage()
        .instance()
        .get(&REGRANT_POLICY)
        .unwrap_or(RegrantPolicy::Locked)
}

// ── Setters ──────────────────────────────────────────────────

/// One-time assignment of the fee-receiving authority. Admin only.
/// The contract's own address serves as the reserved null principal.
pub fn set_authority(env: &Env, caller: &Address, new_authority: &Address) -> Result<(), ContractError> {
    if *caller != admin(env)? {
        return Err(ContractError::Unauthorized);
    }
    if authority(env).is_some() {
        return Err(ContractError::AuthorityAlreadySet);
    }
    if *new_authority == env.current_contract_address() {
        return Err(ContractError::InvalidAuthority);
    }

    env.storage().instance().set(&AUTHORITY, new_authority);
    ttl::extend_instance(env);

    events::publish_authority_set(env, caller.clone(), new_authority.clone());
    Ok(())
}

fn require_caller_is_authority(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if *caller != require_authority(env)? {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

pub fn set_max_records_per_user(env: &Env, caller: &Address, max: u32) -> Result<(), ContractError> {
    require_caller_is_authority(env, caller)?;
    validation::validate_quota(max)?;

    env.storage().instance().set(&MAX_RECORDS, &max);
    ttl::extend_instance(env);

    events::publish_quota_set(env, max);
    Ok(())
}

pub fn set_update_fee(env: &Env, caller: &Address, fee: i128) -> Result<(), ContractError> {
    require_caller_is_authority(env, caller)?;
    validation::validate_fee(fee)?;

    env.storage().instance().set(&UPDATE_FEE, &fee);
    ttl::extend_instance(env);

    events::publish_fee_set(env, fee);
    Ok(())
}

pub fn set_regrant_policy(
    env: &Env,
    caller: &Address,
    policy: RegrantPolicy,
) -> Result<(), ContractError> {
    require_caller_is_authority(env, caller)?;

    env.storage().instance().set(&REGRANT_POLICY, &policy);
    ttl::extend_instance(env);

    events::publish_regrant_policy_set(env, policy);
    Ok(())
}
