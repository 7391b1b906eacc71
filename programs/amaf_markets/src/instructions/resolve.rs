//! Market Resolution
//!
//! Only the market authority may settle a market, and only once:
//! - `resolve_market` records the winning side
//! - `cancel_market` voids the market so every bet is refundable

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};

use super::build;
use crate::pda::PdaGenerator;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResolveMarketArgs {
    pub outcome_yes: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct CancelMarketArgs {}

fn resolution_accounts(market: &Pubkey, authority: &Pubkey) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(*market, false),
        AccountMeta::new_readonly(*authority, true),
    ]
}

/// Build `resolve_market`
pub fn resolve_market(
    pdas: &PdaGenerator,
    market: &Pubkey,
    authority: &Pubkey,
    outcome_yes: bool,
) -> Result<Instruction> {
    build(
        pdas,
        "resolve_market",
        &ResolveMarketArgs { outcome_yes },
        resolution_accounts(market, authority),
    )
}

/// Build `cancel_market`
pub fn cancel_market(pdas: &PdaGenerator, market: &Pubkey, authority: &Pubkey) -> Result<Instruction> {
    build(
        pdas,
        "cancel_market",
        &CancelMarketArgs {},
        resolution_accounts(market, authority),
    )
}
