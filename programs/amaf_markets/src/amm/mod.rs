//! # Share Pricing Module
//!
//! Mirrors the AMAF program's constant-liquidity pricing so that a client
//! can show prices and trade estimates before submitting a transaction.
//!
//! ```text
//!   ┌──────────────┐   snapshot    ┌──────────────────┐
//!   │  RPC fetch   │ ────────────▶ │  share_pricing   │ ──▶ prices, quotes
//!   └──────────────┘               └──────────────────┘
//!                                          ▲
//!   user input ──▶ validation ─────────────┘
//! ```
//!
//! Quotes are recomputed from every fresh snapshot and never cached.

pub mod share_pricing;
pub mod validation;

pub use share_pricing::*;
pub use validation::*;
