use soroban_sdk::{contractclient, Address, Env};

/// Read-only view over an external provider registry.
///
/// Implementations must never fail or mutate state: an address that was
/// never registered is simply reported as not verified.
#[contractclient(name = "ProviderDirectoryClient")]
pub trait ProviderDirectory {
    /// Returns `true` only when `provider` is currently verified.
    fn is_verified(env: Env, provider: Address) -> bool;
}
