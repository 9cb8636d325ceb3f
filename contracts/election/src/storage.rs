//! Storage layout and TTL handling.
//!
//! Election-wide scalars live in instance storage; voters, proposals and
//! audit-log entries live in persistent storage under their own keys.

use soroban_sdk::{contracttype, Address, Env, IntoVal, Val};

use crate::ElectionError;

// TTL: ~30 days
pub(crate) const TTL_THRESHOLD: u32 = 518_400;
pub(crate) const TTL_EXTEND_TO: u32 = 1_036_800;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Initialized,
    Authority,
    Config,
    Status,
    VoterCount,
    Voter(Address),
    ProposalCount,
    Proposal(u32),
    Winner,
    EventCount,
    Event(u32),
}

pub(crate) fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Write a persistent entry and push its TTL out.
pub(crate) fn set_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn get_counter(env: &Env, key: &DataKey) -> u32 {
    env.storage().instance().get(key).unwrap_or(0)
}

/// Bump an instance counter and return the value it held before.
///
/// Counters double as next-index allocators, so a full counter is an error
/// rather than a wrap or a reused index.
pub(crate) fn bump_counter(env: &Env, key: &DataKey) -> Result<u32, ElectionError> {
    let current = get_counter(env, key);
    let next = current
        .checked_add(1)
        .ok_or(ElectionError::CapacityExceeded)?;
    env.storage().instance().set(key, &next);
    Ok(current)
}
