#![allow(deprecated)] // events().publish migration to #[contractevent] tracked separately

//! Election events.
//!
//! Every event goes out twice: on the host event stream for indexers, and
//! into the stored audit log so it can be read back with `get_events`.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Vec};

use crate::storage::{self, DataKey};
use crate::workflow::ElectionStatus;
use crate::ElectionError;

/// Audit-log entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ElectionEvent {
    VoterRegistered(Address),
    ProposalRegistered(u32),
    /// `(voter, proposal_index)`
    Voted(Address, u32),
    /// `(previous, new)`
    WorkflowStatusChange(ElectionStatus, ElectionStatus),
}

fn append(env: &Env, event: &ElectionEvent) -> Result<(), ElectionError> {
    let index = storage::bump_counter(env, &DataKey::EventCount)?;
    storage::set_persistent(env, &DataKey::Event(index), event);
    Ok(())
}

pub fn publish_voter_registered(env: &Env, voter: &Address) -> Result<(), ElectionError> {
    append(env, &ElectionEvent::VoterRegistered(voter.clone()))?;
    env.events()
        .publish((symbol_short!("VOTER_REG"),), voter.clone());
    Ok(())
}

pub fn publish_proposal_registered(env: &Env, index: u32) -> Result<(), ElectionError> {
    append(env, &ElectionEvent::ProposalRegistered(index))?;
    env.events()
        .publish((symbol_short!("PROP_REG"),), index);
    Ok(())
}

pub fn publish_voted(
    env: &Env,
    voter: &Address,
    proposal_index: u32,
) -> Result<(), ElectionError> {
    append(env, &ElectionEvent::Voted(voter.clone(), proposal_index))?;
    env.events().publish(
        (symbol_short!("VOTED"), voter.clone()),
        proposal_index,
    );
    Ok(())
}

pub fn publish_status_change(
    env: &Env,
    previous: ElectionStatus,
    new: ElectionStatus,
) -> Result<(), ElectionError> {
    append(env, &ElectionEvent::WorkflowStatusChange(previous, new))?;
    env.events()
        .publish((symbol_short!("WF_STATUS"),), (previous, new));
    Ok(())
}

pub fn count(env: &Env) -> u32 {
    storage::get_counter(env, &DataKey::EventCount)
}

/// Up to `limit` audit-log entries starting at `start`.
pub fn range(env: &Env, start: u32, limit: u32) -> Vec<ElectionEvent> {
    let end = start.saturating_add(limit).min(count(env));
    let mut out = Vec::new(env);
    for index in start..end {
        if let Some(event) = env.storage().persistent().get(&DataKey::Event(index)) {
            out.push_back(event);
        }
    }
    out
}
