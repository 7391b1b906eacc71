//! Client Configuration
//!
//! Everything that identifies the deployment a client talks to lives in one
//! [`ClientConfig`] value handed to [`crate::client::AmafClient`] at
//! construction time. Nothing else in the crate hardcodes an endpoint or a
//! program id.

use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};

use crate::amm::PricingParams;
use crate::errors::ClientError;

pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const LOCALNET_RPC_URL: &str = "http://127.0.0.1:8899";

/// Environment variables read by [`ClientConfig::from_env`]
pub const ENV_RPC_URL: &str = "AMAF_RPC_URL";
pub const ENV_PROGRAM_ID: &str = "AMAF_PROGRAM_ID";
pub const ENV_COMMITMENT: &str = "AMAF_COMMITMENT";

/// Connection and deployment settings for the AMAF program
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,

    /// Deployed AMAF program
    #[serde(with = "pubkey_string")]
    pub program_id: Pubkey,

    /// Commitment used for reads and confirmations
    pub commitment: CommitmentLevel,

    /// Pricing constants, kept in sync with the deployed program
    #[serde(default)]
    pub pricing: PricingParams,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::devnet()
    }
}

impl ClientConfig {
    pub fn devnet() -> Self {
        Self {
            rpc_url: DEVNET_RPC_URL.to_string(),
            program_id: crate::ID,
            commitment: CommitmentLevel::Confirmed,
            pricing: PricingParams::default(),
        }
    }

    pub fn localnet() -> Self {
        Self {
            rpc_url: LOCALNET_RPC_URL.to_string(),
            commitment: CommitmentLevel::Processed,
            ..Self::devnet()
        }
    }

    /// Start from devnet defaults and apply `AMAF_*` overrides from the
    /// process environment.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::devnet();

        if let Some(rpc_url) = lookup(ENV_RPC_URL) {
            config.rpc_url = rpc_url;
        }
        if let Some(program_id) = lookup(ENV_PROGRAM_ID) {
            config.program_id = Pubkey::from_str(program_id.trim()).map_err(|e| {
                ClientError::Config(format!("{ENV_PROGRAM_ID}={program_id}: {e}"))
            })?;
        }
        if let Some(commitment) = lookup(ENV_COMMITMENT) {
            config.commitment = CommitmentLevel::from_str(commitment.trim()).map_err(|e| {
                ClientError::Config(format!("{ENV_COMMITMENT}={commitment}: {e}"))
            })?;
        }

        Ok(config)
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_commitment(mut self, commitment: CommitmentLevel) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingParams) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn commitment_config(&self) -> CommitmentConfig {
        CommitmentConfig {
            commitment: self.commitment,
        }
    }
}

/// Serialize a [`Pubkey`] as its base58 string
mod pubkey_string {
    use std::str::FromStr;

    use anchor_lang::prelude::Pubkey;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(key)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(D::Error::custom)
    }
}
