//! Vote casting and the final tally.
//!
//! The tally is a single pass over the proposals in index order. The leader
//! changes only on a strictly greater count, so on a tie the lowest index
//! keeps the lead. With every count at zero the winner is index 0.

use soroban_sdk::{Address, Env};

use crate::proposals;
use crate::storage::DataKey;
use crate::voters::{self, Voter};
use crate::ElectionError;

/// Index of the first maximum in `counts`, `None` when there are none.
pub fn leading_index<I>(counts: I) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
{
    let mut leader: Option<(u32, u32)> = None;
    for (index, count) in (0u32..).zip(counts) {
        match leader {
            Some((_, best)) if count <= best => {}
            _ => leader = Some((index, count)),
        }
    }
    leader.map(|(index, _)| index)
}

/// Record `voter`'s ballot for `proposal_index`.
///
/// The caller has already passed the roster and phase guards; the remaining
/// checks run here before any write.
pub(crate) fn cast(
    env: &Env,
    voter: &Address,
    mut record: Voter,
    proposal_index: u32,
) -> Result<(), ElectionError> {
    if record.has_voted {
        return Err(ElectionError::AlreadyVoted);
    }
    let mut proposal = proposals::load(env, proposal_index)?;

    proposal.vote_count = proposal.vote_count.saturating_add(1);
    proposals::store(env, proposal_index, &proposal);

    record.has_voted = true;
    record.voted_proposal_id = proposal_index;
    voters::store(env, voter, &record);
    Ok(())
}

/// Recompute the winner over every proposal and store it.
pub(crate) fn record_winner(env: &Env) -> Option<u32> {
    let count = proposals::count(env);
    let winner = leading_index((0..count).map(|index| proposals::vote_count(env, index)));
    if let Some(index) = winner {
        env.storage().instance().set(&DataKey::Winner, &index);
    }
    winner
}

pub fn winner(env: &Env) -> Option<u32> {
    env.storage().instance().get(&DataKey::Winner)
}
