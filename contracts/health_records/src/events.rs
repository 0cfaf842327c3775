#![allow(deprecated)] // events().publish migration tracked separately

use crate::audit::AuditEntry;
use crate::config::RegrantPolicy;
use crate::grants::AccessGrant;
use crate::records::RecordCategory;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub provider_directory: Address,
    pub fee_token: Address,
    pub height: u32,
}

/// Fired when the one-time authority is assigned.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthoritySetEvent {
    pub admin: Address,
    pub authority: Address,
    pub height: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordStoredEvent {
    pub owner: Address,
    pub record_id: u64,
    pub category: RecordCategory,
    pub sequence: u64,
    pub height: u32,
}

/// Fired after an update, including the fee paid to the authority.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordUpdatedEvent {
    pub owner: Address,
    pub record_id: u64,
    pub version: u32,
    pub authority: Address,
    pub fee: i128,
    pub height: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub owner: Address,
    pub provider: Address,
    pub record_id: u64,
    pub duration: u32,
    pub expires_at: u32,
    pub height: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub owner: Address,
    pub provider: Address,
    pub record_id: u64,
    pub height: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, provider_directory: Address, fee_token: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        provider_directory,
        fee_token,
        height: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_authority_set(env: &Env, admin: Address, authority: Address) {
    let topics = (symbol_short!("AUTH_SET"), authority.clone());
    let data = AuthoritySetEvent {
        admin,
        authority,
        height: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_fee_set(env: &Env, fee: i128) {
    env.events().publish((symbol_short!("CFG_FEE"),), fee);
}

pub fn publish_quota_set(env: &Env, max_records_per_user: u32) {
    env.events()
        .publish((symbol_short!("CFG_QUOTA"),), max_records_per_user);
}

pub fn publish_regrant_policy_set(env: &Env, policy: RegrantPolicy) {
    env.events().publish((symbol_short!("CFG_RGNT"),), policy);
}

pub fn publish_record_stored(
    env: &Env,
    owner: Address,
    record_id: u64,
    category: RecordCategory,
    sequence: u64,
) {
    let topics = (symbol_short!("REC_STORE"), owner.clone());
    let data = RecordStoredEvent {
        owner,
        record_id,
        category,
        sequence,
        height: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_record_updated(
    env: &Env,
    owner: Address,
    record_id: u64,
    version: u32,
    authority: Address,
    fee: i128,
) {
    let topics = (symbol_short!("REC_UPDT"), owner.clone());
    let data = RecordUpdatedEvent {
        owner,
        record_id,
        version,
        authority,
        fee,
        height: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_granted(env: &Env, grant: &AccessGrant, duration: u32) {
    let topics = (
        symbol_short!("ACC_GRANT"),
        grant.owner.clone(),
        grant.provider.clone(),
    );
    let data = AccessGrantedEvent {
        owner: grant.owner.clone(),
        provider: grant.provider.clone(),
        record_id: grant.record_id,
        duration,
        expires_at: grant.expires_at,
        height: grant.granted_at,
    };
    env.events().publish(topics, data);
}

pub fn publish_access_revoked(env: &Env, owner: Address, provider: Address, record_id: u64) {
    let topics = (symbol_short!("ACC_REVOK"), owner.clone(), provider.clone());
    let data = AccessRevokedEvent {
        owner,
        provider,
        record_id,
        height: env.ledger().sequence(),
    };
    env.events().publish(topics, data);
}

/// Mirrors every audit append onto the event stream for off-chain indexers.
pub fn publish_audit_appended(env: &Env, entry: &AuditEntry) {
    let topics: (Symbol, Symbol, Address) = (
        symbol_short!("AUDIT"),
        entry.event_type.clone(),
        entry.user.clone(),
    );
    env.events().publish(topics, entry.clone());
}
