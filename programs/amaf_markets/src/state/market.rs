//! Market State
//!
//! Mirrors of the accounts owned by the AMAF program, plus the option view
//! the pricing engine works on.
//!
//! The layouts must stay byte-compatible with the deployed program: field
//! order and types are part of the wire format.

use anchor_lang::prelude::*;

use crate::amm::{PricingParams, VIRTUAL_LIQUIDITY};

pub const MAX_QUESTION_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Decimals of the AMAF mint
pub const AMAF_DECIMALS: u8 = 9;

/// Convert raw AMAF base units to a display amount
pub fn to_ui_amount(amount: u64) -> f64 {
    amount as f64 / 10u64.pow(AMAF_DECIMALS as u32) as f64
}

/// Render a display amount with thousands separators and at most
/// `max_decimals` fraction digits, trailing zeros dropped
pub fn format_balance(ui_amount: f64, max_decimals: usize) -> String {
    let fixed = format!("{:.*}", max_decimals, ui_amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if ui_amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Base units of AMAF formatted for display, two decimals at most
pub fn format_amount(amount: u64) -> String {
    format_balance(to_ui_amount(amount), 2)
}

/// Binary prediction market account
///
/// Seeds: ["market", authority, market_index.to_le_bytes()]
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Market {
    /// Creator, and the only key allowed to resolve or cancel
    pub authority: Pubkey,

    /// Per-authority index, taken from [`UserMarketsCounter`]
    pub market_index: u16,

    /// PDA bump seed
    pub bump: u8,

    /// The prediction question (at most 200 bytes)
    pub question: String,

    /// Free-form description (at most 500 bytes)
    pub description: String,

    /// Set once by either resolve or cancel
    pub resolved: bool,

    /// `Some(true)` YES won, `Some(false)` NO won, `None` cancelled or open
    pub outcome: Option<bool>,

    /// Collateral staked on YES
    pub total_yes: u64,

    /// Collateral staked on NO
    pub total_no: u64,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";

    /// Space reserved by `create_market`, discriminator included.
    /// Budgets one byte for `outcome`, so it is exact only while `outcome` is `None`.
    pub const LEN: usize =
        8 + 32 + 2 + 1 + 4 + MAX_QUESTION_LENGTH + 4 + MAX_DESCRIPTION_LENGTH + 1 + 1 + 8 + 8;

    pub fn status(&self) -> MarketStatus {
        match (self.resolved, self.outcome) {
            (false, _) => MarketStatus::Open,
            (true, Some(yes_won)) => MarketStatus::Resolved { yes_won },
            (true, None) => MarketStatus::Cancelled,
        }
    }

    /// Total collateral staked on both sides
    pub fn total_pool(&self) -> u64 {
        self.total_yes.saturating_add(self.total_no)
    }

    /// Project this binary market onto the option model used for pricing.
    ///
    /// Index 0 is YES, index 1 is NO. Both options are active while the
    /// market is open. The snapshot carries the virtual liquidity of
    /// `pricing`.
    pub fn snapshot(&self, collateral_balance: u64, pricing: &PricingParams) -> MarketSnapshot {
        let active = !self.resolved;
        MarketSnapshot {
            options: vec![
                MarketOption {
                    shares: self.total_yes,
                    name: "YES".to_string(),
                    active,
                },
                MarketOption {
                    shares: self.total_no,
                    name: "NO".to_string(),
                    active,
                },
            ],
            collateral_balance,
            virtual_liquidity: pricing.virtual_liquidity,
        }
    }

    /// Estimate what `claim_payout` would transfer for `bet`.
    ///
    /// Returns `None` when the claim would be rejected: market still open,
    /// bet already claimed, or bet on the losing side.
    pub fn claimable_payout(&self, bet: &Bet) -> Option<u64> {
        if bet.claimed {
            return None;
        }
        match self.status() {
            MarketStatus::Open => None,
            MarketStatus::Cancelled => Some(bet.amount),
            MarketStatus::Resolved { yes_won } => {
                if bet.side_yes != yes_won {
                    return None;
                }
                let winner_pool = if yes_won { self.total_yes } else { self.total_no };
                if winner_pool == 0 {
                    return None;
                }
                let payout = (bet.amount as u128)
                    .checked_mul(self.total_pool() as u128)?
                    .checked_div(winner_pool as u128)?;
                u64::try_from(payout).ok()
            }
        }
    }
}

/// Lifecycle of a [`Market`], derived from `resolved` and `outcome`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketStatus {
    /// Accepting bets
    Open,
    /// Settled with a winning side
    Resolved { yes_won: bool },
    /// Voided by the authority, every bet is refundable
    Cancelled,
}

/// A single user's stake in a market
///
/// Seeds: ["bet", market, user]
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Bet {
    pub market: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub side_yes: bool,
    pub claimed: bool,
}

impl Bet {
    pub const SEED: &'static [u8] = b"bet";
    pub const LEN: usize = 8 + 64;
}

/// Rate limiter for the daily AMAF faucet
///
/// Seeds: ["claim", user]
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct DailyClaimState {
    pub user: Pubkey,
    pub last_claim: i64,
}

impl DailyClaimState {
    pub const SEED: &'static [u8] = b"claim";
    pub const LEN: usize = 8 + 40;

    /// Seconds between two faucet claims
    pub const CLAIM_COOLDOWN_SECS: i64 = 86_400;

    /// Base units minted per claim (100 AMAF)
    pub const DAILY_CLAIM_AMOUNT: u64 = 100_000_000_000;

    pub fn next_claim_at(&self) -> i64 {
        self.last_claim.saturating_add(Self::CLAIM_COOLDOWN_SECS)
    }

    pub fn can_claim(&self, now: i64) -> bool {
        now.saturating_sub(self.last_claim) >= Self::CLAIM_COOLDOWN_SECS
    }
}

/// Number of markets an authority has created
///
/// Seeds: ["user_markets", authority]
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct UserMarketsCounter {
    pub authority: Pubkey,
    pub count: u16,
}

impl UserMarketsCounter {
    pub const SEED: &'static [u8] = b"user_markets";
    pub const LEN: usize = 8 + 32 + 2;

    /// Index the next `create_market` call must use
    pub fn next_market_index(&self) -> u16 {
        self.count
    }
}

/// One tradable outcome of a market
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, InitSpace, Debug, Default)]
pub struct MarketOption {
    /// Outstanding shares, never negative
    pub shares: u64,

    #[max_len(32)]
    pub name: String,

    /// Inactive options still count towards totals but cannot be bought
    pub active: bool,
}

impl MarketOption {
    pub fn new(name: impl Into<String>, shares: u64) -> Self {
        Self {
            shares,
            name: name.into(),
            active: true,
        }
    }
}

/// Read-only view of a market used for quoting
///
/// Option order is meaningful: the index is the option identifier.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MarketSnapshot {
    pub options: Vec<MarketOption>,
    pub collateral_balance: u64,
    pub virtual_liquidity: u64,
}

impl MarketSnapshot {
    pub fn new(options: Vec<MarketOption>, collateral_balance: u64) -> Self {
        Self {
            options,
            collateral_balance,
            virtual_liquidity: VIRTUAL_LIQUIDITY,
        }
    }

    pub fn total_shares(&self) -> u128 {
        self.options.iter().map(|opt| opt.shares as u128).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(resolved: bool, outcome: Option<bool>, yes: u64, no: u64) -> Market {
        Market {
            authority: Pubkey::new_unique(),
            market_index: 0,
            bump: 255,
            question: "Will it rain tomorrow?".to_string(),
            description: "Resolves YES on any measurable rain.".to_string(),
            resolved,
            outcome,
            total_yes: yes,
            total_no: no,
        }
    }

    fn bet(side_yes: bool, amount: u64) -> Bet {
        Bet {
            market: Pubkey::new_unique(),
            user: Pubkey::new_unique(),
            amount,
            side_yes,
            claimed: false,
        }
    }

    #[test]
    fn test_market_len_fits_max_strings() {
        let m = Market {
            question: "q".repeat(MAX_QUESTION_LENGTH),
            description: "d".repeat(MAX_DESCRIPTION_LENGTH),
            ..market(false, None, 1, 1)
        };
        let mut data = Vec::new();
        m.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), Market::LEN);
    }

    #[test]
    fn test_account_round_trip_checks_discriminator() {
        let counter = UserMarketsCounter {
            authority: Pubkey::new_unique(),
            count: 7,
        };
        let mut data = Vec::new();
        counter.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), UserMarketsCounter::LEN);

        let decoded = UserMarketsCounter::try_deserialize(&mut data.as_slice()).unwrap();
        assert_eq!(decoded, counter);
        assert!(Market::try_deserialize(&mut data.as_slice()).is_err());
    }

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_balance(100.0, 2), "100");
        assert_eq!(format_balance(0.5, 2), "0.5");
        assert_eq!(format_balance(999.0, 0), "999");
        assert_eq!(format_balance(-1_000.25, 2), "-1,000.25");
        assert_eq!(format_balance(0.0, 2), "0");
    }

    #[test]
    fn test_format_amount_uses_mint_decimals() {
        assert_eq!(format_amount(DailyClaimState::DAILY_CLAIM_AMOUNT), "100");
        assert_eq!(format_amount(1_250_000_000_000), "1,250");
        assert_eq!(format_amount(1_500_000_000), "1.5");
        assert_eq!(to_ui_amount(2_000_000_000), 2.0);
    }

    #[test]
    fn test_status() {
        assert_eq!(market(false, None, 0, 0).status(), MarketStatus::Open);
        assert_eq!(
            market(true, Some(false), 0, 0).status(),
            MarketStatus::Resolved { yes_won: false }
        );
        assert_eq!(market(true, None, 0, 0).status(), MarketStatus::Cancelled);
    }

    #[test]
    fn test_snapshot_maps_yes_and_no() {
        let snapshot = market(false, None, 300, 100).snapshot(4_000, &PricingParams::default());
        assert_eq!(snapshot.options.len(), 2);
        assert_eq!(snapshot.options[0].name, "YES");
        assert_eq!(snapshot.options[0].shares, 300);
        assert_eq!(snapshot.options[1].name, "NO");
        assert_eq!(snapshot.options[1].shares, 100);
        assert!(snapshot.options.iter().all(|opt| opt.active));
        assert_eq!(snapshot.collateral_balance, 4_000);
        assert_eq!(snapshot.total_shares(), 400);

        let closed = market(true, Some(true), 300, 100).snapshot(0, &PricingParams::default());
        assert!(closed.options.iter().all(|opt| !opt.active));
    }

    #[test]
    fn test_snapshot_follows_configured_virtual_liquidity() {
        let pricing = PricingParams {
            virtual_liquidity: 100,
            ..PricingParams::default()
        };
        let snapshot = market(false, None, 0, 0).snapshot(0, &pricing);
        assert_eq!(snapshot.virtual_liquidity, 100);

        // 10 shares * 100 / 10 on a fresh market
        let quote = crate::amm::quote_buy(&snapshot, &pricing, 0, 10).unwrap();
        assert_eq!(quote.cost_tokens, 100);

        let default = market(false, None, 0, 0).snapshot(0, &PricingParams::default());
        let quote = crate::amm::quote_buy(&default, &PricingParams::default(), 0, 10).unwrap();
        assert_eq!(quote.cost_tokens, 50);
    }

    #[test]
    fn test_claimable_payout() {
        // YES pool 300, NO pool 100: a 30 YES bet takes 30 * 400 / 300
        let resolved_yes = market(true, Some(true), 300, 100);
        assert_eq!(resolved_yes.claimable_payout(&bet(true, 30)), Some(40));
        assert_eq!(resolved_yes.claimable_payout(&bet(false, 30)), None);

        let cancelled = market(true, None, 300, 100);
        assert_eq!(cancelled.claimable_payout(&bet(false, 25)), Some(25));

        let open = market(false, None, 300, 100);
        assert_eq!(open.claimable_payout(&bet(true, 30)), None);

        let mut claimed = bet(true, 30);
        claimed.claimed = true;
        assert_eq!(resolved_yes.claimable_payout(&claimed), None);
    }

    #[test]
    fn test_daily_claim_cooldown() {
        let state = DailyClaimState {
            user: Pubkey::new_unique(),
            last_claim: 1_000,
        };
        assert_eq!(state.next_claim_at(), 87_400);
        assert!(!state.can_claim(87_399));
        assert!(state.can_claim(87_400));

        let fresh = DailyClaimState {
            user: Pubkey::new_unique(),
            last_claim: 0,
        };
        assert!(fresh.can_claim(1_700_000_000));
    }

    #[test]
    fn test_to_ui_amount() {
        assert_eq!(to_ui_amount(DailyClaimState::DAILY_CLAIM_AMOUNT), 100.0);
        assert_eq!(to_ui_amount(0), 0.0);
    }
}
