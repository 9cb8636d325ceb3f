//! # Election Contract Testing Framework
//!
//! A reusable testing harness for the election contract supporting
//! property-based testing, invariant checking, state exploration, and a
//! declarative scenario DSL.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs             Core TestEnv, ElectionTestHarness, snapshots
//! ├── generators.rs      Property-based test value generators
//! ├── invariants.rs      State invariant definitions & verification
//! ├── state_explorer.rs  Systematic state-space exploration
//! └── scenario_dsl.rs    Declarative test scenario builder
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut env = TestEnv::new();
//! let harness = ElectionTestHarness::new(&mut env, false);
//! let voters = harness.register_voters(3);
//! harness.advance(Transition::StartProposalsRegistering);
//! harness.propose(&voters[0], "proposal 1");
//! ```

extern crate std;


use election::{
    proposals, tally, voters, ElectionConfig, ElectionContract, ElectionContractClient,
    ElectionEvent, ElectionStatus, Proposal, Transition, Voter,
};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

// ── Core Test Environment ────────────────────────────────────────────────────

/// Wraps the Soroban `Env` with all auth mocked and keeps track of the
/// addresses handed out during a test.
pub struct TestEnv {
    pub env: Env,
    generated_addresses: std::vec::Vec<Address>,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        Self {
            env,
            generated_addresses: std::vec::Vec::new(),
        }
    }

    /// Generate a fresh Soroban address (cached for re-use).
    pub fn generate_address(&mut self) -> Address {
        let addr = Address::generate(&self.env);
        self.generated_addresses.push(addr.clone());
        addr
    }

    /// Generate `n` distinct addresses.
    pub fn generate_addresses(&mut self, n: usize) -> std::vec::Vec<Address> {
        (0..n).map(|_| self.generate_address()).collect()
    }

    /// Every address generated through this environment, in order.
    pub fn generated(&self) -> &[Address] {
        &self.generated_addresses
    }

    pub fn string(&self, s: &str) -> String {
        String::from_str(&self.env, s)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Election-Specific Harness ────────────────────────────────────────────────

/// Initialised election contract with its authority.
///
/// Provides a higher-level API that removes boilerplate from election tests.
pub struct ElectionTestHarness<'a> {
    pub env: &'a mut TestEnv,
    pub client: ElectionContractClient<'static>,
    pub contract_id: Address,
    pub authority: Address,
}

impl<'a> ElectionTestHarness<'a> {
    /// Deploy and initialise an election, optionally seeding the genesis
    /// proposal when proposal registration opens.
    pub fn new(env: &'a mut TestEnv, seed_genesis: bool) -> Self {
        let contract_id = env.env.register(ElectionContract, ());
        let client = ElectionContractClient::new(&env.env, &contract_id);
        let authority = env.generate_address();

        let config = if seed_genesis {
            ElectionConfig::with_genesis(&env.env)
        } else {
            ElectionConfig::new(&env.env)
        };
        client.initialize(&authority, &config);

        Self {
            env,
            client,
            contract_id,
            authority,
        }
    }

    /// A fresh address that has not been registered.
    pub fn outsider(&self) -> Address {
        Address::generate(&self.env.env)
    }

    /// Generate and register one voter.
    pub fn register_voter(&self) -> Address {
        let voter = self.outsider();
        self.client.add_voter(&self.authority, &voter);
        voter
    }

    /// Generate and register `n` voters.
    pub fn register_voters(&self, n: usize) -> std::vec::Vec<Address> {
        (0..n).map(|_| self.register_voter()).collect()
    }

    /// Apply `transition` as the authority.
    pub fn advance(&self, transition: Transition) -> ElectionStatus {
        match transition {
            Transition::StartProposalsRegistering => {
                self.client.start_proposals_registering(&self.authority)
            }
            Transition::EndProposalsRegistering => {
                self.client.end_proposals_registering(&self.authority)
            }
            Transition::StartVotingSession => self.client.start_voting_session(&self.authority),
            Transition::EndVotingSession => self.client.end_voting_session(&self.authority),
            Transition::TallyVotes => self.client.tally_votes(&self.authority),
        }
    }

    /// Apply transitions until the election reaches `target`.
    pub fn advance_to(&self, target: ElectionStatus) {
        while self.status() < target {
            match self.status().outgoing() {
                Some(transition) => {
                    self.advance(transition);
                }
                None => break,
            }
        }
    }

    /// Submit a proposal and return its index.
    pub fn propose(&self, voter: &Address, description: &str) -> u32 {
        self.client.add_proposal(voter, &self.env.string(description))
    }

    /// Cast `voter`'s vote.
    pub fn vote(&self, voter: &Address, proposal_index: u32) {
        self.client.set_vote(voter, &proposal_index);
    }

    /// Register voters, open proposals, submit `descriptions` from the first
    /// voter and open the voting session.
    pub fn open_voting(
        &self,
        n_voters: usize,
        descriptions: &[&str],
    ) -> std::vec::Vec<Address> {
        let voters = self.register_voters(n_voters);
        self.advance(Transition::StartProposalsRegistering);
        for description in descriptions {
            self.propose(&voters[0], description);
        }
        self.advance(Transition::EndProposalsRegistering);
        self.advance(Transition::StartVotingSession);
        voters
    }

    pub fn status(&self) -> ElectionStatus {
        self.client.get_workflow_status()
    }

    pub fn proposal_count(&self) -> u32 {
        self.client.get_proposal_count()
    }

    /// Winner as stored, `None` before the tally.
    pub fn winner(&self) -> Option<u32> {
        self.env
            .env
            .as_contract(&self.contract_id, || tally::winner(&self.env.env))
    }

    /// Voter record read straight from contract storage.
    pub fn voter_record(&self, voter: &Address) -> Voter {
        self.env
            .env
            .as_contract(&self.contract_id, || voters::load(&self.env.env, voter))
    }

    /// Proposal read straight from contract storage.
    pub fn proposal(&self, index: u32) -> Option<Proposal> {
        self.env.env.as_contract(&self.contract_id, || {
            proposals::load(&self.env.env, index).ok()
        })
    }

    /// The whole audit log.
    pub fn events(&self) -> std::vec::Vec<ElectionEvent> {
        let count = self.client.get_event_count();
        self.client.get_events(&0, &count).iter().collect()
    }

    /// Snapshot of all observable election state for invariant checking.
    pub fn snapshot(&self, tracked: &[Address]) -> ElectionSnapshot {
        let proposals = (0..self.proposal_count())
            .filter_map(|index| self.proposal(index))
            .collect();
        let voters = tracked
            .iter()
            .map(|addr| (addr.clone(), self.voter_record(addr)))
            .collect();

        ElectionSnapshot {
            status: self.status(),
            genesis_seeded: self.client.get_config().seed_genesis_proposal,
            voter_count: self.client.get_voter_count(),
            proposals,
            voters,
            events: self.events(),
            winner: self.winner(),
        }
    }
}

/// Immutable snapshot of election state at a point in time.
#[derive(Debug, Clone)]
pub struct ElectionSnapshot {
    pub status: ElectionStatus,
    pub genesis_seeded: bool,
    pub voter_count: u32,
    pub proposals: std::vec::Vec<Proposal>,
    pub voters: std::vec::Vec<(Address, Voter)>,
    pub events: std::vec::Vec<ElectionEvent>,
    pub winner: Option<u32>,
}

impl ElectionSnapshot {
    /// Sum of every proposal's vote count.
    pub fn total_votes(&self) -> u32 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }

    /// Tracked voters with `has_voted` set.
    pub fn votes_cast(&self) -> u32 {
        self.voters.iter().filter(|(_, v)| v.has_voted).count() as u32
    }

    pub fn vote_counts(&self) -> std::vec::Vec<u32> {
        self.proposals.iter().map(|p| p.vote_count).collect()
    }

    /// Number of audit-log entries matching `predicate`.
    pub fn count_events(&self, predicate: impl Fn(&ElectionEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single test action, used by the state explorer and scenario DSL.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The action succeeded.
    Ok,
    /// The contract rejected the action with this error code.
    ExpectedError(u32),
    /// The action failed outside the contract's error set.
    UnexpectedError(std::string::String),
}

impl ActionOutcome {
    /// Fold a `try_*` client result into an outcome.
    pub fn from_try<T, C, I>(
        result: Result<Result<T, C>, Result<election::ElectionError, I>>,
    ) -> Self
    where
        C: core::fmt::Debug,
        I: core::fmt::Debug,
    {
        match result {
            Ok(Ok(_)) => ActionOutcome::Ok,
            Ok(Err(e)) => ActionOutcome::UnexpectedError(std::format!("{:?}", e)),
            Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
            Err(Err(e)) => ActionOutcome::UnexpectedError(std::format!("{:?}", e)),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ActionOutcome::Ok)
    }
}

/// Summary of a test run with coverage metrics.
#[derive(Debug, Clone)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub actions_accepted: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
    pub statuses_reached: std::collections::BTreeSet<u32>,
}

impl TestRunSummary {
    pub fn new() -> Self {
        Self {
            actions_executed: 0,
            actions_accepted: 0,
            invariant_checks: 0,
            invariant_violations: std::vec::Vec::new(),
            entry_points_hit: std::collections::HashSet::new(),
            statuses_reached: std::collections::BTreeSet::new(),
        }
    }

    /// True when no invariant violations were detected.
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }

    /// Coverage ratio: entry points hit / total known entry points.
    pub fn entry_point_coverage(&self, total_entry_points: usize) -> f64 {
        if total_entry_points == 0 {
            return 0.0;
        }
        self.entry_points_hit.len() as f64 / total_entry_points as f64
    }
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self::new()
    }
}
