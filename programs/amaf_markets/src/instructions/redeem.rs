//! Payout Claims
//!
//! After resolution a winning bet is paid `amount * (yes + no) / winning_pool`
//! from the escrow; after cancellation every bet gets its stake back.
//! See [`crate::state::Market::claimable_payout`] for the estimate.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};

use super::build;
use crate::pda::PdaGenerator;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct ClaimPayoutArgs {}

/// Build `claim_payout` for the bet `user` placed on `market`
pub fn claim_payout(pdas: &PdaGenerator, market: &Pubkey, user: &Pubkey) -> Result<Instruction> {
    let (bet, _) = pdas.bet(market, user);
    let (mint, _) = pdas.mint();

    build(
        pdas,
        "claim_payout",
        &ClaimPayoutArgs {},
        vec![
            AccountMeta::new(*market, false),
            AccountMeta::new(bet, false),
            AccountMeta::new(pdas.user_token_account(user), false),
            AccountMeta::new(pdas.escrow_token_account(market), false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
            AccountMeta::new_readonly(anchor_spl::associated_token::ID, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
        ],
    )
}
