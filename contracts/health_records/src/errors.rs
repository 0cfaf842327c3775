use soroban_sdk::contracttype;

/// Error categories, by origin rather than by literal code.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Contract not set up yet, or set up twice
    Lifecycle = 1,
    /// Caller is not the principal allowed to perform the operation
    Authorization = 2,
    /// Malformed input; always caller-fixable
    Validation = 3,
    /// Something already exists at the target key
    Conflict = 4,
    /// Target entity is absent or not owned by the caller
    NotFound = 5,
    /// Needs an external state change before a retry can succeed
    PolicyNotMet = 6,
    /// Fee payment could not be completed
    ResourceTransferFailed = 7,
}

/// Code ranges:
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / authorisation      |
/// | 10 – 19 | Validation                     |
/// | 20 – 29 | Conflict                       |
/// | 30 – 39 | Not found / not owner          |
/// | 40 – 49 | Policy not met                 |
/// | 50 – 59 | Resource transfer              |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,

    InvalidHash = 10,
    InvalidCategory = 11,
    InvalidSensitivity = 12,
    InvalidMetadata = 13,
    InvalidDuration = 14,
    InvalidDetails = 15,
    InvalidAuthority = 16,
    InvalidQuota = 17,
    InvalidFee = 18,
    ReservedEventType = 19,

    RecordExists = 20,
    GrantExists = 21,
    AuthorityAlreadySet = 22,

    NotOwner = 30,
    NoActiveGrant = 31,

    ProviderNotVerified = 40,
    QuotaExceeded = 41,
    AuthorityNotConfigured = 42,

    FeeTransferFailed = 50,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::InvalidHash
            | ContractError::InvalidCategory
            | ContractError::InvalidSensitivity
            | ContractError::InvalidMetadata
            | ContractError::InvalidDuration
            | ContractError::InvalidDetails
            | ContractError::InvalidAuthority
            | ContractError::InvalidQuota
            | ContractError::InvalidFee
            | ContractError::ReservedEventType => ErrorCategory::Validation,
            ContractError::RecordExists
            | ContractError::GrantExists
            | ContractError::AuthorityAlreadySet => ErrorCategory::Conflict,
            ContractError::NotOwner | ContractError::NoActiveGrant => ErrorCategory::NotFound,
            ContractError::ProviderNotVerified
            | ContractError::QuotaExceeded
            | ContractError::AuthorityNotConfigured => ErrorCategory::PolicyNotMet,
            ContractError::FeeTransferFailed => ErrorCategory::ResourceTransferFailed,
        }
    }

    /// Whether the same call may succeed later without changing its arguments.
    /// Only true when some external state (directory, quota, balance) has to move first.
    pub fn retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::PolicyNotMet | ErrorCategory::ResourceTransferFailed
        )
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::InvalidHash => "Content hash is empty or too long",
            ContractError::InvalidCategory => "Unknown record category",
            ContractError::InvalidSensitivity => "Sensitivity must be between 0 and 3",
            ContractError::InvalidMetadata => "Metadata is too long",
            ContractError::InvalidDuration => "Grant duration must be positive and in range",
            ContractError::InvalidDetails => "Audit details are too long",
            ContractError::InvalidAuthority => "Authority address is reserved",
            ContractError::InvalidQuota => "Record quota is out of range",
            ContractError::InvalidFee => "Update fee is out of range",
            ContractError::ReservedEventType => "Event type is reserved for contract transitions",
            ContractError::RecordExists => "Record with this ID already exists",
            ContractError::GrantExists => "A grant already exists for this key",
            ContractError::AuthorityAlreadySet => "Authority has already been configured",
            ContractError::NotOwner => "Record not found for this owner",
            ContractError::NoActiveGrant => "No active grant for this key",
            ContractError::ProviderNotVerified => "Provider is not verified",
            ContractError::QuotaExceeded => "Record quota exceeded",
            ContractError::AuthorityNotConfigured => "Authority has not been configured",
            ContractError::FeeTransferFailed => "Update fee transfer failed",
        }
    }
}
