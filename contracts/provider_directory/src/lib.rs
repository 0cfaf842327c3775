#![no_std]

pub mod events;

use common::{ttl, ProviderDirectory};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

// Per-provider persistent storage uses tuple keys:  (prefix, provider_address)
const VERIFIED: Symbol = symbol_short!("VERIFIED");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DirectoryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Minimal registry of verified providers.
///
/// The admin flips a verified flag per address; everything else about
/// provider onboarding happens off-chain.
#[contract]
pub struct ProviderDirectoryContract;

#[contractimpl]
impl ProviderDirectoryContract {
    pub fn initialize(env: Env, admin: Address) -> Result<(), DirectoryError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(DirectoryError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, DirectoryError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(DirectoryError::NotInitialized)
    }

    /// Mark `provider` as verified (or clear the flag). Admin only.
    pub fn set_verified(
        env: Env,
        caller: Address,
        provider: Address,
        verified: bool,
    ) -> Result<(), DirectoryError> {
        caller.require_auth();

        let admin = Self::get_admin(env.clone())?;
        if caller != admin {
            return Err(DirectoryError::Unauthorized);
        }

        let key = (VERIFIED, provider.clone());
        env.storage().persistent().set(&key, &verified);
        ttl::extend_persistent(&env, &key);

        events::publish_provider_verified(&env, provider, caller, verified);

        Ok(())
    }
}

#[contractimpl]
impl ProviderDirectory for ProviderDirectoryContract {
    fn is_verified(env: Env, provider: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(VERIFIED, provider))
            .unwrap_or(false)
    }
}
