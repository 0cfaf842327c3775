use crate::{audit, config, events, validation, ContractError};
use common::ttl;
use soroban_sdk::{contracttype, symbol_short, token, Address, Env, String, Symbol};

// ── Storage keys ──────────────────────────────────────────────

const RECORD: Symbol = symbol_short!("RECORD");
const LAST_UPDATE: Symbol = symbol_short!("LAST_UPD");
const USER_COUNT: Symbol = symbol_short!("REC_CNT");
const RECORD_SEQ: Symbol = symbol_short!("REC_SEQ");

pub const EVENT_RECORD_STORED: Symbol = symbol_short!("REC_STORE");
pub const EVENT_RECORD_UPDATED: Symbol = symbol_short!("REC_UPDT");

fn record_key(owner: &Address, record_id: u64) -> (Symbol, Address, u64) {
    (RECORD, owner.clone(), record_id)
}

fn last_update_key(owner: &Address, record_id: u64) -> (Symbol, Address, u64) {
    (LAST_UPDATE, owner.clone(), record_id)
}

fn user_count_key(owner: &Address) -> (Symbol, Address) {
    (USER_COUNT, owner.clone())
}

// ── Types ─────────────────────────────────────────────────────

/// Closed set of record categories.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordCategory {
    Vital,
    Lab,
    Imaging,
    Prescription,
    Other,
}

impl RecordCategory {
    const ALL: [(RecordCategory, &'static str); 5] = [
        (RecordCategory::Vital, "vital"),
        (RecordCategory::Lab, "lab"),
        (RecordCategory::Imaging, "imaging"),
        (RecordCategory::Prescription, "prescription"),
        (RecordCategory::Other, "other"),
    ];

    /// Parses the wire symbol (`vital`, `lab`, ...) into a category.
    pub fn from_symbol(env: &Env, symbol: &Symbol) -> Result<Self, ContractError> {
        Self::ALL
            .iter()
            .find(|(_, name)| *symbol == Symbol::new(env, name))
            .map(|(category, _)| *category)
            .ok_or(ContractError::InvalidCategory)
    }
}

/// A stored health record, keyed by `(owner, record_id)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthRecord {
    pub owner: Address,
    pub record_id: u64,
    pub data_hash: String,
    pub category: RecordCategory,
    pub sensitivity: u32,
    pub metadata: String,
    pub created_at: u32,
    pub updated_at: u32,
    pub version: u32,
}

/// Snapshot written on every successful update.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LastUpdate {
    pub data_hash: String,
    pub category: RecordCategory,
    pub sensitivity: u32,
    pub updated_at: u32,
    pub updater: Address,
}

/// Returned by `store_record`: the composite key plus the global issuance number.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordReceipt {
    pub owner: Address,
    pub record_id: u64,
    pub sequence: u64,
}

/// Hash, category, sensitivity and metadata checks, in that order.
/// Returns the parsed category.
fn validate_fields(
    env: &Env,
    data_hash: &String,
    category: &Symbol,
    sensitivity: u32,
    metadata: &String,
) -> Result<RecordCategory, ContractError> {
    validation::validate_data_hash(data_hash)?;
    let category = RecordCategory::from_symbol(env, category)?;
    validation::validate_sensitivity(sensitivity)?;
    validation::validate_metadata(metadata)?;
    Ok(category)
}

// ── Reads ─────────────────────────────────────────────────────

pub fn get_record(env: &Env, owner: &Address, record_id: u64) -> Option<HealthRecord> {
    env.storage().persistent().get(&record_key(owner, record_id))
}

pub fn get_last_update(env: &Env, owner: &Address, record_id: u64) -> Option<LastUpdate> {
    env.storage()
        .persistent()
        .get(&last_update_key(owner, record_id))
}

pub fn record_exists(env: &Env, owner: &Address, record_id: u64) -> bool {
    env.storage().persistent().has(&record_key(owner, record_id))
}

pub fn user_record_count(env: &Env, owner: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&user_count_key(owner))
        .unwrap_or(0)
}

pub fn total_records_issued(env: &Env) -> u64 {
    env.storage().instance().get(&RECORD_SEQ).unwrap_or(0)
}

/// `None` when the record does not exist; otherwise whether its payload is
/// kept encrypted off-chain (any sensitivity above public).
pub fn is_encrypted(env: &Env, owner: &Address, record_id: u64) -> Option<bool> {
    get_record(env, owner, record_id).map(|record| record.sensitivity > 0)
}

// ── Mutations ─────────────────────────────────────────────────

pub fn store(
    env: &Env,
    owner: &Address,
    record_id: u64,
    data_hash: String,
    category: Symbol,
    sensitivity: u32,
    metadata: String,
) -> Result<RecordReceipt, ContractError> {
    let count = user_record_count(env, owner);
    if count >= config::max_records_per_user(env) {
        return Err(ContractError::QuotaExceeded);
    }
    let parsed = validate_fields(env, &data_hash, &category, sensitivity, &metadata)?;
    if record_exists(env, owner, record_id) {
        return Err(ContractError::RecordExists);
    }
    config::require_authority(env)?;

    let now = env.ledger().sequence();
    let record = HealthRecord {
        owner: owner.clone(),
        record_id,
        data_hash,
        category: parsed,
        sensitivity,
        metadata,
        created_at: now,
        updated_at: now,
        version: 1,
    };

    let key = record_key(owner, record_id);
    env.storage().persistent().set(&key, &record);
    ttl::extend_persistent(env, &key);

    let count_key = user_count_key(owner);
    env.storage()
        .persistent()
        .set(&count_key, &count.saturating_add(1));
    ttl::extend_persistent(env, &count_key);

    let sequence = total_records_issued(env).saturating_add(1);
    env.storage().instance().set(&RECORD_SEQ, &sequence);
    ttl::extend_instance(env);

    audit::append(
        env,
        EVENT_RECORD_STORED,
        owner.clone(),
        None,
        record_id,
        String::from_str(env, "record stored"),
    )?;
    events::publish_record_stored(env, owner.clone(), record_id, parsed, sequence);

    Ok(RecordReceipt {
        owner: owner.clone(),
        record_id,
        sequence,
    })
}

/// Replaces the record's fields, bumps its version and charges the update fee.
/// Returns the new version.
pub fn update(
    env: &Env,
    owner: &Address,
    record_id: u64,
    data_hash: String,
    category: Symbol,
    sensitivity: u32,
    metadata: String,
) -> Result<u32, ContractError> {
    let previous = get_record(env, owner, record_id).ok_or(ContractError::NotOwner)?;
    let authority = config::require_authority(env)?;
    let parsed = validate_fields(env, &data_hash, &category, sensitivity, &metadata)?;

    let fee = config::update_fee(env);
    charge_fee(env, owner, &authority, fee)?;

    let now = env.ledger().sequence();
    let version = previous.version.saturating_add(1);
    let record = HealthRecord {
        data_hash: data_hash.clone(),
        category: parsed,
        sensitivity,
        metadata,
        updated_at: now,
        version,
        ..previous
    };

    let key = record_key(owner, record_id);
    env.storage().persistent().set(&key, &record);
    ttl::extend_persistent(env, &key);

    let snapshot = LastUpdate {
        data_hash,
        category: parsed,
        sensitivity,
        updated_at: now,
        updater: owner.clone(),
    };
    let snapshot_key = last_update_key(owner, record_id);
    env.storage().persistent().set(&snapshot_key, &snapshot);
    ttl::extend_persistent(env, &snapshot_key);

    audit::append(
        env,
        EVENT_RECORD_UPDATED,
        owner.clone(),
        None,
        record_id,
        String::from_str(env, "record updated"),
    )?;
    events::publish_record_updated(env, owner.clone(), record_id, version, authority, fee);

    Ok(version)
}

fn charge_fee(env: &Env, payer: &Address, authority: &Address, fee: i128) -> Result<(), ContractError> {
    let fee_token = config::fee_token(env)?;
    match token::Client::new(env, &fee_token).try_transfer(payer, authority, &fee) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::FeeTransferFailed),
    }
}
