//! Market Creation
//!
//! Markets are addressed by their authority and a per-authority index.
//! The index must equal the authority's current market count, which the
//! program bumps in the same instruction.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};

use super::{build, BuildError};
use crate::pda::PdaGenerator;
use crate::state::{MAX_DESCRIPTION_LENGTH, MAX_QUESTION_LENGTH};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateMarketArgs {
    pub market_index: u16,
    pub question: String,
    pub description: String,
}

/// Build `create_market`.
///
/// Rejects the same over-long strings the program would, before anything
/// is signed.
pub fn create_market(
    pdas: &PdaGenerator,
    authority: &Pubkey,
    args: CreateMarketArgs,
) -> Result<Instruction> {
    require!(
        args.question.len() <= MAX_QUESTION_LENGTH,
        BuildError::QuestionTooLong
    );
    require!(
        args.description.len() <= MAX_DESCRIPTION_LENGTH,
        BuildError::DescriptionTooLong
    );

    let (market, _) = pdas.market(authority, args.market_index);
    let (counter, _) = pdas.user_markets_counter(authority);
    let (mint, _) = pdas.mint();

    build(
        pdas,
        "create_market",
        &args,
        vec![
            AccountMeta::new(market, false),
            AccountMeta::new(counter, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::sighash;

    fn args(question: &str, description: &str) -> CreateMarketArgs {
        CreateMarketArgs {
            market_index: 3,
            question: question.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_create_market_encodes_args() {
        let pdas = PdaGenerator::default();
        let authority = Pubkey::new_unique();
        let ix = create_market(&pdas, &authority, args("Rain?", "Any rain")).unwrap();

        assert_eq!(&ix.data[..8], &sighash("create_market"));
        let decoded = CreateMarketArgs::try_from_slice(&ix.data[8..]).unwrap();
        assert_eq!(decoded, args("Rain?", "Any rain"));

        assert_eq!(ix.accounts[0].pubkey, pdas.market(&authority, 3).0);
        assert_eq!(ix.accounts[1].pubkey, pdas.user_markets_counter(&authority).0);
        assert!(ix.accounts[2].is_signer && ix.accounts[2].is_writable);
    }

    #[test]
    fn test_create_market_length_limits() {
        let pdas = PdaGenerator::default();
        let authority = Pubkey::new_unique();

        let max = args(&"q".repeat(MAX_QUESTION_LENGTH), &"d".repeat(MAX_DESCRIPTION_LENGTH));
        assert!(create_market(&pdas, &authority, max).is_ok());

        let long_question = args(&"q".repeat(MAX_QUESTION_LENGTH + 1), "");
        assert_eq!(
            create_market(&pdas, &authority, long_question).unwrap_err(),
            BuildError::QuestionTooLong.into()
        );

        let long_description = args("", &"d".repeat(MAX_DESCRIPTION_LENGTH + 1));
        assert_eq!(
            create_market(&pdas, &authority, long_description).unwrap_err(),
            BuildError::DescriptionTooLong.into()
        );
    }
}
