//! Per-election configuration, fixed at initialisation.

use soroban_sdk::{contracttype, Env, String};

use crate::proposals;
use crate::storage::DataKey;
use crate::ElectionError;

/// Description used for the genesis proposal unless configured otherwise.
pub const DEFAULT_GENESIS_DESCRIPTION: &str = "GENESIS";

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectionConfig {
    /// Seed a placeholder proposal at index 0 when proposal registration
    /// opens. Explicit proposals then start at index 1.
    pub seed_genesis_proposal: bool,
    pub genesis_description: String,
}

impl ElectionConfig {
    /// Defaults: no genesis proposal.
    pub fn new(env: &Env) -> Self {
        Self {
            seed_genesis_proposal: false,
            genesis_description: String::from_str(env, DEFAULT_GENESIS_DESCRIPTION),
        }
    }

    pub fn with_genesis(env: &Env) -> Self {
        Self {
            seed_genesis_proposal: true,
            ..Self::new(env)
        }
    }

    pub fn validate(&self) -> Result<(), ElectionError> {
        if self.seed_genesis_proposal {
            proposals::require_description(&self.genesis_description)?;
        }
        Ok(())
    }
}

pub(crate) fn store(env: &Env, config: &ElectionConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn load(env: &Env) -> Result<ElectionConfig, ElectionError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ElectionError::NotInitialized)
}
