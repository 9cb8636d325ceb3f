#![no_main]

use arbitrary::Arbitrary;
use election::{proposals, voters, ElectionConfig, ElectionContract, ElectionContractClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Env, String};

/// Actions modelling every mutating election entry point.
///
/// `user` selects from a small pool so registrations, proposals and votes
/// collide often enough to hit the duplicate and already-voted paths.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    AddVoter { as_authority: bool, user: u8 },
    AddProposal { user: u8, blank: bool },
    SetVote { user: u8, proposal: u8 },
    Advance { as_authority: bool, step: u8 },
}

fuzz_target!(|input: (bool, Vec<FuzzAction>)| {
    let (seed_genesis, actions) = input;
    let env = Env::default();
    env.mock_all_auths();

    let authority = Address::generate(&env);
    let contract_id = env.register(ElectionContract, ());
    let client = ElectionContractClient::new(&env, &contract_id);

    let config = if seed_genesis {
        ElectionConfig::with_genesis(&env)
    } else {
        ElectionConfig::new(&env)
    };
    if client.try_initialize(&authority, &config).is_err() {
        return;
    }

    let users: Vec<Address> = (0..5).map(|_| Address::generate(&env)).collect();
    let text = String::from_str(&env, "proposal");
    let blank = String::from_str(&env, "  ");

    for action in actions {
        let status_before = client.get_workflow_status();
        let events_before = client.get_event_count();

        match action {
            FuzzAction::AddVoter { as_authority, user } => {
                let voter = &users[user as usize % users.len()];
                let caller = if as_authority { &authority } else { voter };
                let _ = client.try_add_voter(caller, voter);
            }
            FuzzAction::AddProposal { user, blank: is_blank } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_add_proposal(caller, if is_blank { &blank } else { &text });
            }
            FuzzAction::SetVote { user, proposal } => {
                let caller = &users[user as usize % users.len()];
                let _ = client.try_set_vote(caller, &(proposal as u32 % 4));
            }
            FuzzAction::Advance { as_authority, step } => {
                let caller = if as_authority { &authority } else { &users[0] };
                let _ = match step % 5 {
                    0 => client.try_start_proposals_registering(caller),
                    1 => client.try_end_proposals_registering(caller),
                    2 => client.try_start_voting_session(caller),
                    3 => client.try_end_voting_session(caller),
                    _ => client.try_tally_votes(caller),
                };
            }
        }

        // ── Post-action invariant checks ──
        let status_after = client.get_workflow_status();
        assert!(
            status_after >= status_before && status_after as u32 <= status_before as u32 + 1,
            "INVARIANT VIOLATION: status moved {:?} -> {:?}",
            status_before,
            status_after
        );

        let events_after = client.get_event_count();
        assert!(
            events_after - events_before <= 1,
            "INVARIANT VIOLATION: {} events from one action",
            events_after - events_before
        );

        let (total_votes, votes_cast) = env.as_contract(&contract_id, || {
            let total: u32 = (0..proposals::count(&env))
                .filter_map(|i| proposals::load(&env, i).ok())
                .map(|p| p.vote_count)
                .sum();
            let cast = users
                .iter()
                .filter(|u| voters::load(&env, u).has_voted)
                .count() as u32;
            (total, cast)
        });
        assert_eq!(total_votes, votes_cast, "INVARIANT VIOLATION: vote conservation");
    }
});
