//! Append-only proposal registry.
//!
//! Proposals are stored under dense indices `0..count`; the index handed out
//! by [`append`] is the proposal's identifier for the rest of the election.

use soroban_sdk::{contracttype, Env, String};

use crate::storage::{self, DataKey};
use crate::ElectionError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u32,
}

pub fn count(env: &Env) -> u32 {
    storage::get_counter(env, &DataKey::ProposalCount)
}

pub fn load(env: &Env, index: u32) -> Result<Proposal, ElectionError> {
    if index >= count(env) {
        return Err(ElectionError::ProposalNotFound);
    }
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(index))
        .ok_or(ElectionError::ProposalNotFound)
}

pub(crate) fn store(env: &Env, index: u32, proposal: &Proposal) {
    storage::set_persistent(env, &DataKey::Proposal(index), proposal);
}

/// Store a new zero-vote proposal at the next index and return that index.
pub(crate) fn append(env: &Env, description: String) -> Result<u32, ElectionError> {
    let index = storage::bump_counter(env, &DataKey::ProposalCount)?;
    let proposal = Proposal {
        description,
        vote_count: 0,
    };
    store(env, index, &proposal);
    Ok(index)
}

/// Vote count at `index`, 0 for an index past the end.
pub fn vote_count(env: &Env, index: u32) -> u32 {
    load(env, index).map(|p| p.vote_count).unwrap_or(0)
}

/// True for an empty description or one made only of ASCII whitespace.
pub fn is_blank(description: &String) -> bool {
    description
        .to_bytes()
        .iter()
        .all(|byte| byte.is_ascii_whitespace())
}

/// Guard: rejects blank descriptions with `EmptyProposal`.
pub(crate) fn require_description(description: &String) -> Result<(), ElectionError> {
    if is_blank(description) {
        return Err(ElectionError::EmptyProposal);
    }
    Ok(())
}
