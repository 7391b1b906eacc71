//! Instruction builders for the AMAF program
//!
//! Each builder produces a ready-to-sign [`Instruction`] for one program
//! method:
//! - `initialize_mint` - Create the AMAF mint (once per deployment)
//! - `create_market` - Open a YES/NO market under the caller's authority
//! - `place_bet` - Stake AMAF on one side of a market
//! - `resolve_market` / `cancel_market` - Settle or void a market (authority only)
//! - `claim_payout` - Collect winnings or a refund
//! - `claim_daily_amaf` - Mint the daily faucet allowance
//!
//! Instruction data is the Anchor sighash of the method name followed by
//! the Borsh-encoded arguments. Account order follows the program.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_spl::associated_token::spl_associated_token_account::instruction::create_associated_token_account;

use crate::pda::PdaGenerator;

pub mod claim_daily;
pub mod create_market;
pub mod initialize;
pub mod place_bet;
pub mod redeem;
pub mod resolve;

pub use claim_daily::*;
pub use create_market::*;
pub use initialize::*;
pub use place_bet::*;
pub use redeem::*;
pub use resolve::*;

/// First 8 bytes of `sha256("global:<method>")`
pub fn sighash(method: &str) -> [u8; 8] {
    let preimage = format!("global:{method}");
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Assemble an instruction for `method` of the configured program
pub(crate) fn build<A: AnchorSerialize>(
    pdas: &PdaGenerator,
    method: &str,
    args: &A,
    accounts: Vec<AccountMeta>,
) -> Result<Instruction> {
    let mut data = sighash(method).to_vec();
    args.serialize(&mut data)
        .map_err(|_| error!(BuildError::ArgsSerialization))?;

    Ok(Instruction {
        program_id: pdas.program_id(),
        accounts,
        data,
    })
}

/// Create the AMAF token account of `owner`, paid by `payer`
pub fn create_user_token_account(pdas: &PdaGenerator, payer: &Pubkey, owner: &Pubkey) -> Instruction {
    let (mint, _) = pdas.mint();
    create_associated_token_account(payer, owner, &mint, &anchor_spl::token::ID)
}

/// Create the collateral account of `market`, owned by the market PDA
pub fn create_escrow_token_account(pdas: &PdaGenerator, payer: &Pubkey, market: &Pubkey) -> Instruction {
    let (mint, _) = pdas.mint();
    create_associated_token_account(payer, market, &mint, &anchor_spl::token::ID)
}

#[error_code]
pub enum BuildError {
    #[msg("Failed to serialize instruction arguments")]
    ArgsSerialization,
    #[msg("Question too long")]
    QuestionTooLong,
    #[msg("Description too long")]
    DescriptionTooLong,
    #[msg("Bet amount must be greater than zero")]
    ZeroAmount,
}
