//! Program Derived Addresses
//!
//! Every address the AMAF program derives, computed from one
//! [`PdaGenerator`] bound to the configured program id.

use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;

use crate::state::{Bet, DailyClaimState, Market, UserMarketsCounter};

/// Seeds of PDAs that have no mirrored account type
pub mod seeds {
    pub const MINT: &[u8] = b"mint";
    pub const AUTHORITY: &[u8] = b"authority";
    pub const ESCROW: &[u8] = b"escrow";
}

/// PDA generator for all AMAF accounts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PdaGenerator {
    program_id: Pubkey,
}

impl Default for PdaGenerator {
    fn default() -> Self {
        Self::new(crate::ID)
    }
}

impl PdaGenerator {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// AMAF token mint
    pub fn mint(&self) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[seeds::MINT], &self.program_id)
    }

    /// Mint and freeze authority of the AMAF token
    pub fn program_authority(&self) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[seeds::AUTHORITY], &self.program_id)
    }

    /// Market created by `authority` at `market_index`
    pub fn market(&self, authority: &Pubkey, market_index: u16) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Market::SEED, authority.as_ref(), &market_index.to_le_bytes()],
            &self.program_id,
        )
    }

    /// Bet placed by `user` on `market`
    pub fn bet(&self, market: &Pubkey, user: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Bet::SEED, market.as_ref(), user.as_ref()],
            &self.program_id,
        )
    }

    /// Daily faucet state of `user`
    pub fn claim_state(&self, user: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[DailyClaimState::SEED, user.as_ref()], &self.program_id)
    }

    /// Market counter of `authority`
    pub fn user_markets_counter(&self, authority: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[UserMarketsCounter::SEED, authority.as_ref()],
            &self.program_id,
        )
    }

    /// `["escrow", market]` seed derivation.
    ///
    /// The program never takes this address as an account; collateral sits
    /// in [`PdaGenerator::escrow_token_account`].
    pub fn escrow(&self, market: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[seeds::ESCROW, market.as_ref()], &self.program_id)
    }

    /// Token account holding the collateral of `market`.
    ///
    /// The program requires its token owner to be the market PDA, which
    /// also signs payouts out of it.
    pub fn escrow_token_account(&self, market: &Pubkey) -> Pubkey {
        let (mint, _) = self.mint();
        get_associated_token_address(market, &mint)
    }

    /// AMAF associated token account of `owner`
    pub fn user_token_account(&self, owner: &Pubkey) -> Pubkey {
        let (mint, _) = self.mint();
        get_associated_token_address(owner, &mint)
    }
}
