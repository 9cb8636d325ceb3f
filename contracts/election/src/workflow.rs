//! Linear election workflow.
//!
//! ```text
//! RegisteringVoters → ProposalsRegistrationStarted → ProposalsRegistrationEnded
//!     → VotingSessionStarted → VotingSessionEnded → VotesTallied
//! ```
//!
//! Each edge is one [`Transition`]. [`advance`] is the only writer of the
//! stored status, so the status can neither skip a step nor move backwards.

use soroban_sdk::{contracttype, log, Env};

use crate::storage::DataKey;
use crate::ElectionError;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ElectionStatus {
    RegisteringVoters = 0,
    ProposalsRegistrationStarted = 1,
    ProposalsRegistrationEnded = 2,
    VotingSessionStarted = 3,
    VotingSessionEnded = 4,
    VotesTallied = 5,
}

impl ElectionStatus {
    pub const ALL: [ElectionStatus; 6] = [
        ElectionStatus::RegisteringVoters,
        ElectionStatus::ProposalsRegistrationStarted,
        ElectionStatus::ProposalsRegistrationEnded,
        ElectionStatus::VotingSessionStarted,
        ElectionStatus::VotingSessionEnded,
        ElectionStatus::VotesTallied,
    ];

    /// The transition leaving this status, `None` once votes are tallied.
    pub fn outgoing(self) -> Option<Transition> {
        Transition::ALL
            .iter()
            .copied()
            .find(|transition| transition.edge().0 == self)
    }

    pub fn is_final(self) -> bool {
        self.outgoing().is_none()
    }
}

/// One directed edge of the workflow.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    StartProposalsRegistering,
    EndProposalsRegistering,
    StartVotingSession,
    EndVotingSession,
    TallyVotes,
}

impl Transition {
    pub const ALL: [Transition; 5] = [
        Transition::StartProposalsRegistering,
        Transition::EndProposalsRegistering,
        Transition::StartVotingSession,
        Transition::EndVotingSession,
        Transition::TallyVotes,
    ];

    /// `(required, reached)` status pair for this edge.
    pub fn edge(self) -> (ElectionStatus, ElectionStatus) {
        use ElectionStatus::*;
        match self {
            Transition::StartProposalsRegistering => {
                (RegisteringVoters, ProposalsRegistrationStarted)
            }
            Transition::EndProposalsRegistering => {
                (ProposalsRegistrationStarted, ProposalsRegistrationEnded)
            }
            Transition::StartVotingSession => (ProposalsRegistrationEnded, VotingSessionStarted),
            Transition::EndVotingSession => (VotingSessionStarted, VotingSessionEnded),
            Transition::TallyVotes => (VotingSessionEnded, VotesTallied),
        }
    }
}

pub fn status(env: &Env) -> ElectionStatus {
    env.storage()
        .instance()
        .get(&DataKey::Status)
        .unwrap_or(ElectionStatus::RegisteringVoters)
}

/// Guard: fails with the phase error naming `expected` unless the election
/// is currently in `expected`.
pub fn require_status(env: &Env, expected: ElectionStatus) -> Result<(), ElectionError> {
    let current = status(env);
    if current != expected {
        log!(
            env,
            "wrong phase: expected {}, actual {}",
            expected as u32,
            current as u32
        );
        return Err(ElectionError::wrong_phase(expected));
    }
    Ok(())
}

/// Apply `transition` if the election sits on its source status.
///
/// Returns `(previous, new)`. Nothing is written on failure.
pub fn advance(
    env: &Env,
    transition: Transition,
) -> Result<(ElectionStatus, ElectionStatus), ElectionError> {
    let (from, to) = transition.edge();
    require_status(env, from)?;
    env.storage().instance().set(&DataKey::Status, &to);
    Ok((from, to))
}
