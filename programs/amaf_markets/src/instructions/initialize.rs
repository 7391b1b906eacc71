//! Mint Initialization
//!
//! Creates the AMAF mint PDA with the program authority as mint and freeze
//! authority. Called once per deployment.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::sysvar;

use super::build;
use crate::pda::PdaGenerator;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct InitializeMintArgs {}

/// Build `initialize_mint`
pub fn initialize_mint(pdas: &PdaGenerator, payer: &Pubkey) -> Result<Instruction> {
    let (mint, _) = pdas.mint();
    let (program_authority, _) = pdas.program_authority();

    build(
        pdas,
        "initialize_mint",
        &InitializeMintArgs {},
        vec![
            AccountMeta::new(mint, false),
            AccountMeta::new_readonly(program_authority, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::sighash;

    #[test]
    fn test_initialize_mint_layout() {
        let pdas = PdaGenerator::default();
        let payer = Pubkey::new_unique();
        let ix = initialize_mint(&pdas, &payer).unwrap();

        assert_eq!(ix.program_id, crate::ID);
        assert_eq!(ix.data, sighash("initialize_mint").to_vec());
        assert_eq!(ix.accounts.len(), 6);
        assert_eq!(ix.accounts[0].pubkey, pdas.mint().0);
        assert!(ix.accounts[0].is_writable);
        assert!(ix.accounts[2].is_signer);
        assert_eq!(ix.accounts[5].pubkey, sysvar::rent::ID);
    }
}
