use soroban_sdk::{Env, IntoVal, Val};

/// Entries are bumped once their remaining lifetime drops below ~30 days
/// of ledgers (5s close time).
pub const TTL_THRESHOLD: u32 = 518_400;
/// ...and are extended to ~180 days.
pub const TTL_EXTEND_TO: u32 = 3_110_400;

/// Extends the time-to-live (TTL) for instance storage.
/// Instance storage TTL applies to all keys in the instance storage.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for a single persistent key.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
