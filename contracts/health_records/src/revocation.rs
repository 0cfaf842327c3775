use crate::grants::{self, AccessGrant};
use crate::{audit, events, ContractError};
use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

pub const EVENT_ACCESS_REVOKED: Symbol = symbol_short!("ACC_REVOK");

/// Flips an active grant to inactive. A grant that has lapsed by height but
/// was never revoked is still active here.
pub fn revoke(
    env: &Env,
    owner: &Address,
    provider: &Address,
    record_id: u64,
) -> Result<(), ContractError> {
    let grant = match grants::get_grant(env, owner, provider, record_id) {
        Some(grant) if grant.active => grant,
        _ => return Err(ContractError::NoActiveGrant),
    };

    let revoked = AccessGrant {
        active: false,
        ..grant
    };
    grants::put_grant(env, &revoked);

    audit::append(
        env,
        EVENT_ACCESS_REVOKED,
        owner.clone(),
        Some(provider.clone()),
        record_id,
        String::from_str(env, "access revoked"),
    )?;
    events::publish_access_revoked(env, owner.clone(), provider.clone(), record_id);

    Ok(())
}

/// True only for an entry that exists and was explicitly revoked.
/// Height expiry alone does not make a grant revoked.
pub fn is_revoked(env: &Env, owner: &Address, provider: &Address, record_id: u64) -> bool {
    grants::get_grant(env, owner, provider, record_id)
        .map(|grant| !grant.active)
        .unwrap_or(false)
}
