//! # AMAF Markets: Client Library
//!
//! Off-chain companion of the AMAF prediction market program on Solana.
//!
//! ## Overview
//!
//! The program itself decides every trade and settlement. This crate gives
//! a client everything it needs around it:
//! - the program's account layouts, so market state can be decoded
//! - the PDA derivations the program uses for its accounts
//! - builders for every program instruction
//! - the share pricing math, to show prices and estimates before signing
//! - an RPC client that ties these together behind one configuration
//!
//! ## How it fits together
//! - `client` fetches a market and its escrow balance over RPC.
//! - `state` turns them into a `MarketSnapshot`.
//! - `amm` prices the snapshot locally; nothing is cached between fetches.
//! - `instructions` builds the transaction the user finally signs.
//!

use anchor_lang::prelude::*;

pub mod amm;
pub mod client;
pub mod errors;
pub mod instructions;
pub mod pda;
pub mod state;

pub use amm::*;
pub use client::*;
pub use errors::*;
pub use pda::*;
pub use state::*;

// Default deployment; override through `ClientConfig::program_id`
declare_id!("Gh8YHDTXiRY8ZA3zkxSsrUb1az7Vxc4z9SH9U6LvoMW");
