//! Daily Faucet
//!
//! Mints 100 AMAF to the caller at most once every 24 hours, see
//! [`crate::state::DailyClaimState`].

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};

use super::build;
use crate::pda::PdaGenerator;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct ClaimDailyAmafArgs {}

/// Build `claim_daily_amaf`
pub fn claim_daily_amaf(pdas: &PdaGenerator, user: &Pubkey) -> Result<Instruction> {
    let (mint, _) = pdas.mint();
    let (program_authority, _) = pdas.program_authority();
    let (claim_state, _) = pdas.claim_state(user);

    build(
        pdas,
        "claim_daily_amaf",
        &ClaimDailyAmafArgs {},
        vec![
            AccountMeta::new(mint, false),
            AccountMeta::new(program_authority, false),
            AccountMeta::new(pdas.user_token_account(user), false),
            AccountMeta::new(claim_state, false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
            AccountMeta::new_readonly(anchor_spl::associated_token::ID, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
        ],
    )
}
