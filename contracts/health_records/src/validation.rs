use crate::ContractError;
use soroban_sdk::String;

pub const MAX_HASH_LEN: u32 = 64;
pub const MAX_METADATA_LEN: u32 = 256;
pub const MAX_DETAILS_LEN: u32 = 256;
pub const MAX_SENSITIVITY: u32 = 3;

pub const MIN_RECORDS_PER_USER: u32 = 1;
pub const MAX_RECORDS_PER_USER: u32 = 10_000;
pub const MIN_UPDATE_FEE: i128 = 1;
pub const MAX_UPDATE_FEE: i128 = 1_000_000_000_000;

pub fn validate_data_hash(hash: &String) -> Result<(), ContractError> {
    if hash.is_empty() || hash.len() > MAX_HASH_LEN {
        return Err(ContractError::InvalidHash);
    }
    Ok(())
}

pub fn validate_sensitivity(sensitivity: u32) -> Result<(), ContractError> {
    if sensitivity > MAX_SENSITIVITY {
        return Err(ContractError::InvalidSensitivity);
    }
    Ok(())
}

/// Metadata may be empty.
pub fn validate_metadata(metadata: &String) -> Result<(), ContractError> {
    if metadata.len() > MAX_METADATA_LEN {
        return Err(ContractError::InvalidMetadata);
    }
    Ok(())
}

pub fn validate_details(details: &String) -> Result<(), ContractError> {
    if details.len() > MAX_DETAILS_LEN {
        return Err(ContractError::InvalidDetails);
    }
    Ok(())
}

/// Returns the expiry height, or `InvalidDuration` for a zero duration or
/// one that would overflow the ledger sequence.
pub fn expiry_height(now: u32, duration: u32) -> Result<u32, ContractError> {
    if duration == 0 {
        return Err(ContractError::InvalidDuration);
    }
    now.checked_add(duration)
        .ok_or(ContractError::InvalidDuration)
}

pub fn validate_quota(max: u32) -> Result<(), ContractError> {
    if !(MIN_RECORDS_PER_USER..=MAX_RECORDS_PER_USER).contains(&max) {
        return Err(ContractError::InvalidQuota);
    }
    Ok(())
}

pub fn validate_fee(fee: i128) -> Result<(), ContractError> {
    if !(MIN_UPDATE_FEE..=MAX_UPDATE_FEE).contains(&fee) {
        return Err(ContractError::InvalidFee);
    }
    Ok(())
}
