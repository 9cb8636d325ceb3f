//! Voter roster.
//!
//! Records are created only through [`register`] and are never removed.
//! An address that was never registered reads as `Voter::default()`.

use soroban_sdk::{contracttype, log, Address, Env};

use crate::storage::{self, DataKey};
use crate::ElectionError;

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Voter {
    pub is_registered: bool,
    pub has_voted: bool,
    /// Index of the chosen proposal; 0 until `has_voted` is set.
    pub voted_proposal_id: u32,
}

pub fn load(env: &Env, voter: &Address) -> Voter {
    env.storage()
        .persistent()
        .get(&DataKey::Voter(voter.clone()))
        .unwrap_or_default()
}

pub(crate) fn store(env: &Env, voter: &Address, record: &Voter) {
    storage::set_persistent(env, &DataKey::Voter(voter.clone()), record);
}

pub fn count(env: &Env) -> u32 {
    storage::get_counter(env, &DataKey::VoterCount)
}

/// Add `voter` to the roster.
pub(crate) fn register(env: &Env, voter: &Address) -> Result<(), ElectionError> {
    if load(env, voter).is_registered {
        return Err(ElectionError::AlreadyRegistered);
    }
    let record = Voter {
        is_registered: true,
        ..Voter::default()
    };
    store(env, voter, &record);
    storage::bump_counter(env, &DataKey::VoterCount)?;
    Ok(())
}

/// Guard: returns the caller's record, or `NotVoter` for an address the
/// authority never registered.
pub(crate) fn require_voter(env: &Env, caller: &Address) -> Result<Voter, ElectionError> {
    let record = load(env, caller);
    if !record.is_registered {
        log!(env, "rejected unregistered caller {}", caller.clone());
        return Err(ElectionError::NotVoter);
    }
    Ok(record)
}
