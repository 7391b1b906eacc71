//! # Constant-Liquidity Share Pricing
//!
//! Client-side estimates of what the AMAF program charges and pays for
//! option shares. The program settles in integers, so every formula here
//! multiplies before it divides and truncates exactly once.
//!
//! ## Prices
//!
//! ```text
//!   total   = Σ shares
//!   price_i = floor(shares_i * PRICE_SCALE / total) / PRICE_SCALE
//!
//!   total == 0  →  price_i = 1 / N
//! ```
//!
//! ## Buying
//!
//! ```text
//!   first trade:  collateral = shares_in * VIRTUAL_LIQUIDITY
//!   otherwise:    collateral = floor(C * shares_in / (total + shares_in))
//!
//!   cost_tokens = collateral / UNIT_SCALING_DIVISOR
//! ```
//!
//! This is a single discrete step against the post-trade total, not an
//! integral along a curve.
//!
//! ## Selling
//!
//! ```text
//!   total <= shares_out:  payout = C              (drains the pool)
//!   otherwise:            payout = floor(C * shares_out / total)
//!
//!   payout_tokens = payout / UNIT_SCALING_DIVISOR
//! ```

use serde::{Deserialize, Serialize};

use crate::state::{MarketOption, MarketSnapshot};

/// Fixed-point scale for option prices (1.0 == `PRICE_SCALE`)
pub const PRICE_SCALE: u64 = 10_000_000;

/// Seed price per share charged on the first trade of a market
pub const VIRTUAL_LIQUIDITY: u64 = 50;

/// Share units per collateral base unit
pub const UNIT_SCALING_DIVISOR: u64 = 10;

/// Pricing constants shared with the on-chain program
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingParams {
    pub virtual_liquidity: u64,
    /// Zero is treated as one
    pub unit_scaling_divisor: u64,
    /// Zero is treated as one
    pub price_scale: u64,
}

impl Default for PricingParams {
    fn default() -> Self {
        Self {
            virtual_liquidity: VIRTUAL_LIQUIDITY,
            unit_scaling_divisor: UNIT_SCALING_DIVISOR,
            price_scale: PRICE_SCALE,
        }
    }
}

/// Result of quoting a buy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuyQuote {
    /// Collateral tokens the trade costs
    pub cost_tokens: u64,
    /// Options as they would look after the trade
    pub updated_options: Vec<MarketOption>,
}

/// Result of quoting a sell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SellQuote {
    /// Collateral tokens the trade pays out
    pub payout_tokens: u64,
    /// Options as they would look after the trade
    pub updated_options: Vec<MarketOption>,
}

impl PricingParams {
    fn divisor(&self) -> u128 {
        self.unit_scaling_divisor.max(1) as u128
    }

    fn scale(&self) -> u64 {
        self.price_scale.max(1)
    }

    /// Option prices as fixed-point integers scaled by `price_scale`
    pub fn option_prices_scaled(&self, options: &[MarketOption]) -> Vec<u64> {
        let total = total_shares(options);

        if total == 0 {
            let uniform = self.scale() / (options.len().max(1) as u64);
            return vec![uniform; options.len()];
        }

        options
            .iter()
            .map(|opt| saturate(opt.shares as u128 * self.scale() as u128 / total))
            .collect()
    }

    /// Option prices as fractions in `[0, 1]`
    pub fn option_prices(&self, options: &[MarketOption]) -> Vec<f64> {
        if total_shares(options) == 0 {
            let uniform = 1.0 / options.len() as f64;
            return vec![uniform; options.len()];
        }

        let scale = self.scale() as f64;
        self.option_prices_scaled(options)
            .into_iter()
            .map(|price| price as f64 / scale)
            .collect()
    }

    /// Cost of buying `shares_to_buy` shares of `target_index`
    pub fn buy_cost(
        &self,
        shares_to_buy: u64,
        options: &[MarketOption],
        collateral_balance: u64,
        target_index: usize,
    ) -> BuyQuote {
        let total_before = total_shares(options);
        let shares_in = shares_to_buy as u128;

        let collateral_needed = if total_before == 0 {
            shares_in * self.virtual_liquidity as u128
        } else {
            let total_after = total_before + shares_in;
            collateral_balance as u128 * shares_in / total_after
        };

        BuyQuote {
            cost_tokens: saturate(collateral_needed / self.divisor()),
            updated_options: with_shares(options, target_index, |shares| {
                shares.saturating_add(shares_to_buy)
            }),
        }
    }

    /// Payout for selling `shares_to_sell` shares of `option_index`.
    ///
    /// The caller guarantees the option holds at least `shares_to_sell`;
    /// see [`crate::amm::quote_sell`] for the checked variant.
    pub fn sell_payout(
        &self,
        shares_to_sell: u64,
        options: &[MarketOption],
        collateral_balance: u64,
        option_index: usize,
    ) -> SellQuote {
        let total_before = total_shares(options);
        let shares_out = shares_to_sell as u128;

        let payout = if total_before <= shares_out {
            collateral_balance as u128
        } else {
            collateral_balance as u128 * shares_out / total_before
        };

        SellQuote {
            payout_tokens: saturate(payout / self.divisor()),
            updated_options: with_shares(options, option_index, |shares| {
                shares.saturating_sub(shares_to_sell)
            }),
        }
    }

    /// Redemption value of `shares` if their option wins
    pub fn potential_payout(&self, shares: u64) -> u64 {
        saturate(shares as u128 / self.divisor())
    }
}

impl MarketSnapshot {
    /// `base` with this snapshot's virtual liquidity
    pub fn pricing(&self, base: &PricingParams) -> PricingParams {
        PricingParams {
            virtual_liquidity: self.virtual_liquidity,
            ..*base
        }
    }

    pub fn prices(&self, base: &PricingParams) -> Vec<f64> {
        self.pricing(base).option_prices(&self.options)
    }

    pub fn buy_quote(&self, base: &PricingParams, option_index: usize, shares: u64) -> BuyQuote {
        self.pricing(base)
            .buy_cost(shares, &self.options, self.collateral_balance, option_index)
    }

    pub fn sell_quote(&self, base: &PricingParams, option_index: usize, shares: u64) -> SellQuote {
        self.pricing(base)
            .sell_payout(shares, &self.options, self.collateral_balance, option_index)
    }
}

/// Prices with the default constants
pub fn get_option_prices(options: &[MarketOption]) -> Vec<f64> {
    PricingParams::default().option_prices(options)
}

/// Fixed-point prices with the default constants
pub fn get_option_prices_scaled(options: &[MarketOption]) -> Vec<u64> {
    PricingParams::default().option_prices_scaled(options)
}

/// Buy cost with the default constants
pub fn calculate_buy_cost(
    shares_to_buy: u64,
    options: &[MarketOption],
    collateral_balance: u64,
    target_index: usize,
) -> BuyQuote {
    PricingParams::default().buy_cost(shares_to_buy, options, collateral_balance, target_index)
}

/// Sell payout with the default constants
pub fn calculate_sell_payout(
    shares_to_sell: u64,
    options: &[MarketOption],
    collateral_balance: u64,
    option_index: usize,
) -> SellQuote {
    PricingParams::default().sell_payout(shares_to_sell, options, collateral_balance, option_index)
}

/// Potential payout with the default constants
pub fn calculate_potential_payout(shares: u64) -> u64 {
    PricingParams::default().potential_payout(shares)
}

/// Render a price fraction in cents, e.g. `0.5` → `"50.00¢"`
pub fn format_price(price: f64) -> String {
    format!("{:.2}¢", price * 100.0)
}

fn total_shares(options: &[MarketOption]) -> u128 {
    options.iter().map(|opt| opt.shares as u128).sum()
}

fn saturate(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Copy `options`, rewriting only the share count at `index`
fn with_shares<F>(options: &[MarketOption], index: usize, update: F) -> Vec<MarketOption>
where
    F: Fn(u64) -> u64,
{
    options
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            if i == index {
                MarketOption {
                    shares: update(opt.shares),
                    ..opt.clone()
                }
            } else {
                opt.clone()
            }
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
