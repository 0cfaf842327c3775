#![no_std]

pub mod audit;
pub mod config;
pub mod errors;
pub mod events;
pub mod grants;
pub mod records;
pub mod revocation;
pub mod validation;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Symbol};

pub use audit::{AuditEntry, AuditPage, MAX_PAGE_SIZE};
pub use config::RegrantPolicy;
pub use errors::{ContractError, ErrorCategory};
pub use grants::AccessGrant;
pub use records::{HealthRecord, LastUpdate, RecordCategory, RecordReceipt};

#[contract]
pub struct HealthRecordsContract;

#[contractimpl]
impl HealthRecordsContract {
    // ======================== Lifecycle & configuration ========================

    /// Initialize the contract with its admin, the provider directory it
    /// consults and the token used to pay update fees.
    pub fn initialize(
        env: Env,
        admin: Address,
        provider_directory: Address,
        fee_token: Address,
    ) -> Result<(), ContractError> {
        config::initialize(&env, &admin, &provider_directory, &fee_token)?;
        events::publish_initialized(&env, admin, provider_directory, fee_token);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        config::admin(&env)
    }

    pub fn get_provider_directory(env: Env) -> Result<Address, ContractError> {
        config::provider_directory(&env)
    }

    pub fn get_fee_token(env: Env) -> Result<Address, ContractError> {
        config::fee_token(&env)
    }

    /// Assign the authority principal. Admin only, and only once.
    pub fn set_authority(env: Env, caller: Address, authority: Address) -> Result<(), ContractError> {
        config::require_initialized(&env)?;
        caller.require_auth();
        config::set_authority(&env, &caller, &authority)
    }

    pub fn get_authority(env: Env) -> Option<Address> {
        config::authority(&env)
    }

    pub fn set_max_records_per_user(env: Env, caller: Address, max: u32) -> Result<(), ContractError> {
        config::require_initialized(&env)?;
        caller.require_auth();
        config::set_max_records_per_user(&env, &caller, max)
    }

    pub fn get_max_records_per_user(env: Env) -> u32 {
        config::max_records_per_user(&env)
    }

    pub fn set_update_fee(env: Env, caller: Address, fee: i128) -> Result<(), ContractError> {
        config::require_initialized(&env)?;
        caller.require_auth();
        config::set_update_fee(&env, &caller, fee)
    }

    pub fn get_update_fee(env: Env) -> i128 {
        config::update_fee(&env)
    }

    /// Choose whether a revoked or height-expired grant key may be granted again.
    pub fn set_regrant_policy(
        env: Env,
        caller: Address,
        policy: RegrantPolicy,
    ) -> Result<(), ContractError> {
        config::require_initialized(&env)?;
        caller.require_auth();
        config::set_regrant_policy(&env, &caller, policy)
    }

    pub fn get_regrant_policy(env: Env) -> RegrantPolicy {
        config::regrant_policy(&env)
    }

    // ======================== Records ========================

    /// Store a new record under `(owner, record_id)` with version 1.
    pub fn store_record(
        env: Env,
        owner: Address,
        record_id: u64,
        data_hash: String,
        category: Symbol,
        sensitivity: u32,
        metadata: String,
    ) -> Result<RecordReceipt, ContractError> {
        config::require_initialized(&env)?;
        owner.require_auth();
        records::store(&env, &owner, record_id, data_hash, category, sensitivity, metadata)
    }

    /// Replace an owned record's fields, paying the update fee to the authority.
    /// Returns the new version.
    pub fn update_record(
        env: Env,
        owner: Address,
        record_id: u64,
        data_hash: String,
        category: Symbol,
        sensitivity: u32,
        metadata: String,
    ) -> Result<u32, ContractError> {
        config::require_initialized(&env)?;
        owner.require_auth();
        records::update(&env, &owner, record_id, data_hash, category, sensitivity, metadata)
    }

    pub fn get_record(env: Env, owner: Address, record_id: u64) -> Option<HealthRecord> {
        records::get_record(&env, &owner, record_id)
    }

    pub fn get_last_update(env: Env, owner: Address, record_id: u64) -> Option<LastUpdate> {
        records::get_last_update(&env, &owner, record_id)
    }

    pub fn get_user_record_count(env: Env, owner: Address) -> u32 {
        records::user_record_count(&env, &owner)
    }

    pub fn is_encrypted(env: Env, owner: Address, record_id: u64) -> Option<bool> {
        records::is_encrypted(&env, &owner, record_id)
    }

    pub fn total_records_issued(env: Env) -> u64 {
        records::total_records_issued(&env)
    }

    pub fn record_exists(env: Env, owner: Address, record_id: u64) -> bool {
        records::record_exists(&env, &owner, record_id)
    }

    // ======================== Grants ========================

    /// Let a verified `provider` read `record_id` for `duration` ledgers.
    /// Returns the expiry height.
    pub fn grant_access(
        env: Env,
        owner: Address,
        provider: Address,
        record_id: u64,
        duration: u32,
    ) -> Result<u32, ContractError> {
        config::require_initialized(&env)?;
        owner.require_auth();
        grants::grant(&env, &owner, &provider, record_id, duration)
    }

    pub fn has_access(env: Env, owner: Address, provider: Address, record_id: u64) -> bool {
        grants::has_access(&env, &owner, &provider, record_id)
    }

    pub fn get_grant(
        env: Env,
        owner: Address,
        provider: Address,
        record_id: u64,
    ) -> Option<AccessGrant> {
        grants::get_grant(&env, &owner, &provider, record_id)
    }

    // ======================== Revocation ========================

    pub fn revoke_access(
        env: Env,
        owner: Address,
        provider: Address,
        record_id: u64,
    ) -> Result<(), ContractError> {
        config::require_initialized(&env)?;
        owner.require_auth();
        revocation::revoke(&env, &owner, &provider, record_id)
    }

    pub fn is_revoked(env: Env, owner: Address, provider: Address, record_id: u64) -> bool {
        revocation::is_revoked(&env, &owner, &provider, record_id)
    }

    // ======================== Audit log ========================

    /// Append a caller-attributed entry, e.g. an off-chain read of a record.
    /// The contract's own transition types (`REC_STORE`, `REC_UPDT`,
    /// `ACC_GRANT`, `ACC_REVOK`) are rejected.
    pub fn log_event(
        env: Env,
        caller: Address,
        event_type: Symbol,
        provider: Option<Address>,
        record_id: u64,
        details: String,
    ) -> Result<u64, ContractError> {
        config::require_initialized(&env)?;
        caller.require_auth();
        audit::append_external(&env, event_type, caller, provider, record_id, details)
    }

    pub fn get_audit_entry(env: Env, id: u64) -> Option<AuditEntry> {
        audit::get(&env, id)
    }

    pub fn get_audit_for_user(env: Env, user: Address, start: u32, limit: u32) -> AuditPage {
        audit::get_for_user(&env, &user, start, limit)
    }

    /// Next audit id to be assigned; equals the number of entries written.
    pub fn audit_count(env: Env) -> u64 {
        audit::next_id(&env)
    }

    /// Hash of the latest audit entry; zero while the log is empty.
    pub fn get_audit_head(env: Env) -> BytesN<32> {
        audit::chain_head(&env)
    }

    /// Verify the hash links of up to 50 entries starting at `start`.
    pub fn verify_audit_chain(env: Env, start: u64, limit: u32) -> bool {
        audit::verify_chain(&env, start, limit)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}
