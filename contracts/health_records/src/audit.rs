//! Append-only, hash-chained audit trail.
//!
//! Entries are addressed by a global sequence id starting at 0. Each entry
//! carries the keccak256 of its predecessor's XDR encoding (zero for id 0),
//! so any edit to a stored entry breaks every later link.
//!
//! A per-user index `(USR_AUD, user, n) -> AuditEntry` backs the paginated
//! user query: one ledger read per returned entry, which keeps a full page
//! inside the host's footprint limit.

use crate::grants::EVENT_ACCESS_GRANTED;
use crate::records::{EVENT_RECORD_STORED, EVENT_RECORD_UPDATED};
use crate::revocation::EVENT_ACCESS_REVOKED;
use crate::{events, validation, ContractError};
use common::ttl;
use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String, Symbol, Vec};

const AUDIT_ENTRY: Symbol = symbol_short!("AUDIT");
const NEXT_AUDIT_ID: Symbol = symbol_short!("AUD_NEXT");
const CHAIN_HEAD: Symbol = symbol_short!("AUD_HEAD");
const USER_AUDIT: Symbol = symbol_short!("USR_AUD");
const USER_AUDIT_COUNT: Symbol = symbol_short!("USR_AUDC");

pub const MAX_PAGE_SIZE: u32 = 50;

/// Event types only the contract itself may write.
const RESERVED_EVENT_TYPES: [Symbol; 4] = [
    EVENT_RECORD_STORED,
    EVENT_RECORD_UPDATED,
    EVENT_ACCESS_GRANTED,
    EVENT_ACCESS_REVOKED,
];

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditEntry {
    pub id: u64,
    pub event_type: Symbol,
    pub user: Address,
    pub provider: Option<Address>,
    pub record_id: u64,
    pub height: u32,
    pub details: String,
    /// Hash of the previous entry (zero for the first one).
    pub prev_hash: BytesN<32>,
}

/// One page of a user's audit entries plus the number of entries that user has in total.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditPage {
    pub entries: Vec<AuditEntry>,
    pub total: u32,
}

fn entry_key(id: u64) -> (Symbol, u64) {
    (AUDIT_ENTRY, id)
}

fn user_index_key(user: &Address, n: u32) -> (Symbol, Address, u32) {
    (USER_AUDIT, user.clone(), n)
}

fn user_count_key(user: &Address) -> (Symbol, Address) {
    (USER_AUDIT_COUNT, user.clone())
}

fn zero_hash(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

/// keccak256 over the entry's XDR encoding, `prev_hash` included.
pub fn hash_entry(env: &Env, entry: &AuditEntry) -> BytesN<32> {
    env.crypto().keccak256(&entry.clone().to_xdr(env)).into()
}

/// Hash of the most recent entry, or zero when the log is empty.
pub fn chain_head(env: &Env) -> BytesN<32> {
    env.storage()
        .instance()
        .get(&CHAIN_HEAD)
        .unwrap_or_else(|| zero_hash(env))
}

/// The id the next successful append will receive.
pub fn next_id(env: &Env) -> u64 {
    env.storage().instance().get(&NEXT_AUDIT_ID).unwrap_or(0)
}

pub fn user_entry_count(env: &Env, user: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&user_count_key(user))
        .unwrap_or(0)
}

/// Writes a new entry at the current height and returns its id.
///
/// Callers invoke this only after their own mutation has succeeded, inside
/// the same invocation, so a failed operation never leaves an entry behind.
pub fn append(
    env: &Env,
    event_type: Symbol,
    user: Address,
    provider: Option<Address>,
    record_id: u64,
    details: String,
) -> Result<u64, ContractError> {
    validation::validate_details(&details)?;

    let id = next_id(env);
    let entry = AuditEntry {
        id,
        event_type,
        user: user.clone(),
        provider,
        record_id,
        height: env.ledger().sequence(),
        details,
        prev_hash: chain_head(env),
    };

    let key = entry_key(id);
    env.storage().persistent().set(&key, &entry);
    ttl::extend_persistent(env, &key);

    let n = user_entry_count(env, &user);
    let index_key = user_index_key(&user, n);
    env.storage().persistent().set(&index_key, &entry);
    ttl::extend_persistent(env, &index_key);

    let count_key = user_count_key(&user);
    env.storage().persistent().set(&count_key, &n.saturating_add(1));
    ttl::extend_persistent(env, &count_key);

    env.storage()
        .instance()
        .set(&NEXT_AUDIT_ID, &id.saturating_add(1));
    env.storage()
        .instance()
        .set(&CHAIN_HEAD, &hash_entry(env, &entry));
    ttl::extend_instance(env);

    events::publish_audit_appended(env, &entry);

    Ok(id)
}

/// Append on behalf of an external caller. The contract's own transition
/// types are refused so the log cannot claim a grant or record change that
/// never happened.
pub fn append_external(
    env: &Env,
    event_type: Symbol,
    user: Address,
    provider: Option<Address>,
    record_id: u64,
    details: String,
) -> Result<u64, ContractError> {
    if RESERVED_EVENT_TYPES.contains(&event_type) {
        return Err(ContractError::ReservedEventType);
    }
    append(env, event_type, user, provider, record_id, details)
}

pub fn get(env: &Env, id: u64) -> Option<AuditEntry> {
    env.storage().persistent().get(&entry_key(id))
}

/// Returns up to `limit` (clamped to [`MAX_PAGE_SIZE`]) of `user`'s entries,
/// starting at their `start`-th entry, oldest first.
pub fn get_for_user(env: &Env, user: &Address, start: u32, limit: u32) -> AuditPage {
    let total = user_entry_count(env, user);
    let mut entries = Vec::new(env);

    let end = start
        .saturating_add(limit.min(MAX_PAGE_SIZE))
        .min(total);
    for n in start..end {
        let entry: Option<AuditEntry> = env.storage().persistent().get(&user_index_key(user, n));
        if let Some(entry) = entry {
            entries.push_back(entry);
        }
    }

    AuditPage { entries, total }
}

/// Checks the links of up to `limit` (clamped to [`MAX_PAGE_SIZE`]) entries
/// starting at `start`. Entry 0 must link to the zero hash; every other
/// entry must link to the hash of the entry before it. Ids past the end
/// of the log are not checked.
pub fn verify_chain(env: &Env, start: u64, limit: u32) -> bool {
    let end = start
        .saturating_add(u64::from(limit.min(MAX_PAGE_SIZE)))
        .min(next_id(env));
    if start >= end {
        return true;
    }

    let mut expected = if start == 0 {
        zero_hash(env)
    } else {
        match get(env, start - 1) {
            Some(previous) => hash_entry(env, &previous),
            None => return false,
        }
    };

    for id in start..end {
        let entry = match get(env, id) {
            Some(entry) => entry,
            None => return false,
        };
        if entry.prev_hash != expected {
            return false;
        }
        expected = hash_entry(env, &entry);
    }

    true
}
