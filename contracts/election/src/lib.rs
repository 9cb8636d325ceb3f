#![no_std]

//! # Election
//!
//! A single-shot election run by one authority:
//!
//! - **Roster**: the authority registers every voter while
//!   `RegisteringVoters` is open; there is no self-registration.
//! - **Proposals**: registered voters submit proposals while
//!   `ProposalsRegistrationStarted` is open; indices are dense and
//!   append-only.
//! - **Votes**: each registered voter casts exactly one vote while
//!   `VotingSessionStarted` is open.
//! - **Tally**: the authority closes the election; the proposal with the
//!   strictly highest count wins, the lowest index winning ties.
//!
//! Every successful mutation emits exactly one event, both on the host
//! event stream and into a stored audit log (`get_events`).

pub mod config;
pub mod events;
pub mod proposals;
pub mod storage;
pub mod tally;
pub mod voters;
pub mod workflow;

use soroban_sdk::{contract, contracterror, contractimpl, log, Address, Env, String, Vec};

pub use config::ElectionConfig;
pub use events::ElectionEvent;
pub use proposals::Proposal;
pub use voters::Voter;
pub use workflow::{ElectionStatus, Transition};

use storage::DataKey;

// ── Error codes ───────────────────────────────────────────────────────────────

/// Rejection reasons.
///
/// # Code ranges
/// | Range   | Purpose                                  |
/// |---------|------------------------------------------|
/// | 1 – 9   | Lifecycle / initialisation               |
/// | 10 – 19 | Authorisation                            |
/// | 20 – 29 | Wrong phase, one code per required phase |
/// | 30 – 39 | Duplicate registration                   |
/// | 40 – 49 | Not found                                |
/// | 50 – 59 | Validation                               |
/// | 60 – 69 | Already acted                            |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ElectionError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthority = 10,
    NotVoter = 11,
    ExpectedRegisteringVoters = 20,
    ExpectedProposalsRegistrationStarted = 21,
    ExpectedProposalsRegistrationEnded = 22,
    ExpectedVotingSessionStarted = 23,
    ExpectedVotingSessionEnded = 24,
    ExpectedVotesTallied = 25,
    AlreadyRegistered = 30,
    ProposalNotFound = 40,
    EmptyProposal = 50,
    CapacityExceeded = 51,
    AlreadyVoted = 60,
}

impl ElectionError {
    /// Phase error for an operation that requires `expected`.
    pub fn wrong_phase(expected: ElectionStatus) -> Self {
        match expected {
            ElectionStatus::RegisteringVoters => Self::ExpectedRegisteringVoters,
            ElectionStatus::ProposalsRegistrationStarted => {
                Self::ExpectedProposalsRegistrationStarted
            }
            ElectionStatus::ProposalsRegistrationEnded => Self::ExpectedProposalsRegistrationEnded,
            ElectionStatus::VotingSessionStarted => Self::ExpectedVotingSessionStarted,
            ElectionStatus::VotingSessionEnded => Self::ExpectedVotingSessionEnded,
            ElectionStatus::VotesTallied => Self::ExpectedVotesTallied,
        }
    }

    /// The status a phase error asked for; `None` for every other error.
    pub fn expected_status(self) -> Option<ElectionStatus> {
        match self {
            Self::ExpectedRegisteringVoters => Some(ElectionStatus::RegisteringVoters),
            Self::ExpectedProposalsRegistrationStarted => {
                Some(ElectionStatus::ProposalsRegistrationStarted)
            }
            Self::ExpectedProposalsRegistrationEnded => {
                Some(ElectionStatus::ProposalsRegistrationEnded)
            }
            Self::ExpectedVotingSessionStarted => Some(ElectionStatus::VotingSessionStarted),
            Self::ExpectedVotingSessionEnded => Some(ElectionStatus::VotingSessionEnded),
            Self::ExpectedVotesTallied => Some(ElectionStatus::VotesTallied),
            _ => None,
        }
    }

    pub fn is_phase_error(self) -> bool {
        self.expected_status().is_some()
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::NotInitialized => "Election is not initialized",
            Self::AlreadyInitialized => "Election is already initialized",
            Self::NotAuthority => "Caller is not the election authority",
            Self::NotVoter => "You're not a voter",
            Self::ExpectedRegisteringVoters => "Voters registration is not open yet",
            Self::ExpectedProposalsRegistrationStarted => "Proposals registration is not open",
            Self::ExpectedProposalsRegistrationEnded => "Proposals registration is not finished",
            Self::ExpectedVotingSessionStarted => "Voting session is not open",
            Self::ExpectedVotingSessionEnded => "Voting session is not finished",
            Self::ExpectedVotesTallied => "Votes are not tallied yet",
            Self::AlreadyRegistered => "Already registered",
            Self::ProposalNotFound => "Proposal not found",
            Self::EmptyProposal => "Proposal description is empty",
            Self::CapacityExceeded => "Election has no room for another entry",
            Self::AlreadyVoted => "You have already voted",
        }
    }
}

impl core::fmt::Display for ElectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.reason())
    }
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct ElectionContract;

#[contractimpl]
impl ElectionContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Fix the authority and configuration. Callable once.
    pub fn initialize(
        env: Env,
        authority: Address,
        config: ElectionConfig,
    ) -> Result<(), ElectionError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(ElectionError::AlreadyInitialized);
        }
        config.validate()?;

        env.storage().instance().set(&DataKey::Authority, &authority);
        config::store(&env, &config);
        env.storage()
            .instance()
            .set(&DataKey::Status, &ElectionStatus::RegisteringVoters);
        env.storage().instance().set(&DataKey::Initialized, &true);
        storage::extend_instance_ttl(&env);

        log!(&env, "election initialized, authority {}", authority);
        Ok(())
    }

    // ── Voter registry ────────────────────────────────────────────────────────

    /// Register `voter`. Authority only, while voters registration is open.
    pub fn add_voter(env: Env, caller: Address, voter: Address) -> Result<(), ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_authority(&env, &caller)?;
        workflow::require_status(&env, ElectionStatus::RegisteringVoters)?;

        voters::register(&env, &voter)?;
        events::publish_voter_registered(&env, &voter)?;
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    /// Read any address's voter record. The caller must be a registered
    /// voter; an unregistered `voter` reads as the default record.
    pub fn get_voter(env: Env, caller: Address, voter: Address) -> Result<Voter, ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        voters::require_voter(&env, &caller)?;
        Ok(voters::load(&env, &voter))
    }

    // ── Proposal registry ─────────────────────────────────────────────────────

    /// Submit a proposal and return its index.
    pub fn add_proposal(
        env: Env,
        caller: Address,
        description: String,
    ) -> Result<u32, ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        voters::require_voter(&env, &caller)?;
        workflow::require_status(&env, ElectionStatus::ProposalsRegistrationStarted)?;
        proposals::require_description(&description)?;

        let index = proposals::append(&env, description)?;
        events::publish_proposal_registered(&env, index)?;
        storage::extend_instance_ttl(&env);

        log!(&env, "proposal {} registered by {}", index, caller);
        Ok(index)
    }

    pub fn get_one_proposal(
        env: Env,
        caller: Address,
        index: u32,
    ) -> Result<Proposal, ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        voters::require_voter(&env, &caller)?;
        proposals::load(&env, index)
    }

    // ── Voting ────────────────────────────────────────────────────────────────

    /// Cast the caller's single vote for `proposal_index`.
    pub fn set_vote(env: Env, caller: Address, proposal_index: u32) -> Result<(), ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        let record = voters::require_voter(&env, &caller)?;
        workflow::require_status(&env, ElectionStatus::VotingSessionStarted)?;

        tally::cast(&env, &caller, record, proposal_index)?;
        events::publish_voted(&env, &caller, proposal_index)?;
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    // ── Phase control ─────────────────────────────────────────────────────────

    pub fn start_proposals_registering(
        env: Env,
        caller: Address,
    ) -> Result<ElectionStatus, ElectionError> {
        Self::transition(&env, &caller, Transition::StartProposalsRegistering)
    }

    pub fn end_proposals_registering(
        env: Env,
        caller: Address,
    ) -> Result<ElectionStatus, ElectionError> {
        Self::transition(&env, &caller, Transition::EndProposalsRegistering)
    }

    pub fn start_voting_session(
        env: Env,
        caller: Address,
    ) -> Result<ElectionStatus, ElectionError> {
        Self::transition(&env, &caller, Transition::StartVotingSession)
    }

    pub fn end_voting_session(
        env: Env,
        caller: Address,
    ) -> Result<ElectionStatus, ElectionError> {
        Self::transition(&env, &caller, Transition::EndVotingSession)
    }

    /// Close the election: compute and store the winner, then move to
    /// `VotesTallied`.
    pub fn tally_votes(env: Env, caller: Address) -> Result<ElectionStatus, ElectionError> {
        Self::transition(&env, &caller, Transition::TallyVotes)
    }

    // ── View functions ────────────────────────────────────────────────────────

    /// Index of the winning proposal once votes are tallied.
    pub fn winning_proposal_id(env: Env) -> Result<u32, ElectionError> {
        Self::require_initialized(&env)?;
        workflow::require_status(&env, ElectionStatus::VotesTallied)?;
        tally::winner(&env).ok_or(ElectionError::ProposalNotFound)
    }

    pub fn get_workflow_status(env: Env) -> Result<ElectionStatus, ElectionError> {
        Self::require_initialized(&env)?;
        Ok(workflow::status(&env))
    }

    pub fn get_proposal_count(env: Env) -> u32 {
        proposals::count(&env)
    }

    pub fn get_voter_count(env: Env) -> u32 {
        voters::count(&env)
    }

    pub fn get_authority(env: Env) -> Result<Address, ElectionError> {
        env.storage()
            .instance()
            .get(&DataKey::Authority)
            .ok_or(ElectionError::NotInitialized)
    }

    pub fn get_config(env: Env) -> Result<ElectionConfig, ElectionError> {
        config::load(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn get_event_count(env: Env) -> u32 {
        events::count(&env)
    }

    /// Audit-log page: up to `limit` events starting at `start`.
    pub fn get_events(env: Env, start: u32, limit: u32) -> Vec<ElectionEvent> {
        events::range(&env, start, limit)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ElectionError> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(ElectionError::NotInitialized);
        }
        Ok(())
    }

    fn require_authority(env: &Env, caller: &Address) -> Result<(), ElectionError> {
        let authority: Address = env
            .storage()
            .instance()
            .get(&DataKey::Authority)
            .ok_or(ElectionError::NotInitialized)?;
        if *caller != authority {
            log!(env, "rejected non-authority caller {}", caller.clone());
            return Err(ElectionError::NotAuthority);
        }
        Ok(())
    }

    /// Shared body of the five phase-control entry points.
    fn transition(
        env: &Env,
        caller: &Address,
        transition: Transition,
    ) -> Result<ElectionStatus, ElectionError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_authority(env, caller)?;
        let config = config::load(env)?;

        let (previous, new) = workflow::advance(env, transition)?;
        match transition {
            Transition::StartProposalsRegistering if config.seed_genesis_proposal => {
                proposals::append(env, config.genesis_description)?;
            }
            Transition::TallyVotes => {
                let winner = tally::record_winner(env);
                log!(env, "votes tallied, winner {}", winner.unwrap_or(u32::MAX));
            }
            _ => {}
        }

        events::publish_status_change(env, previous, new)?;
        storage::extend_instance_ttl(env);
        Ok(new)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
