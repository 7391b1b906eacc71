//! Betting
//!
//! A bet moves `amount` AMAF base units from the user's token account into
//! the market escrow and records the chosen side. One bet account exists
//! per (market, user) pair.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};

use super::{build, BuildError};
use crate::pda::PdaGenerator;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlaceBetArgs {
    pub amount: u64,
    pub side_yes: bool,
}

/// Build `place_bet`
pub fn place_bet(
    pdas: &PdaGenerator,
    market: &Pubkey,
    user: &Pubkey,
    args: PlaceBetArgs,
) -> Result<Instruction> {
    require!(args.amount > 0, BuildError::ZeroAmount);

    let (bet, _) = pdas.bet(market, user);
    let (mint, _) = pdas.mint();

    build(
        pdas,
        "place_bet",
        &args,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::sighash;

    #[test]
    fn test_place_bet_layout() {
        let pdas = PdaGenerator::default();
        let market = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let ix = place_bet(&pdas, &market, &user, PlaceBetArgs { amount: 1_500, side_yes: true }).unwrap();

        let mut expected = sighash("place_bet").to_vec();
        expected.extend_from_slice(&1_500u64.to_le_bytes());
        expected.push(1);
        assert_eq!(ix.data, expected);

        let keys: Vec<Pubkey> = ix.accounts.iter().map(|meta| meta.pubkey).collect();
        assert_eq!(keys[1], pdas.bet(&market, &user).0);
        assert_eq!(keys[2], pdas.user_token_account(&user));
        assert_eq!(keys[3], pdas.escrow_token_account(&market));
        assert_eq!(keys[4], user);
        assert_eq!(ix.accounts.iter().filter(|meta| meta.is_signer).count(), 1);
    }

    #[test]
    fn test_place_bet_rejects_zero_amount() {
        let pdas = PdaGenerator::default();
        let err = place_bet(
            &pdas,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            PlaceBetArgs { amount: 0, side_yes: false },
        )
        .unwrap_err();
        assert_eq!(err, BuildError::ZeroAmount.into());
    }
}
