//! Checked quoting
//!
//! The pricing functions are total and trust their input. User-entered
//! trades go through [`quote_buy`] and [`quote_sell`] first, which reject
//! what the program would reject before any math runs.

use anchor_lang::prelude::*;

use super::share_pricing::{BuyQuote, PricingParams, SellQuote};
use crate::state::{MarketOption, MarketSnapshot};

/// Errors raised when a trade request is malformed
#[error_code]
pub enum PricingError {
    #[msg("Market has no options")]
    NoOptions,
    #[msg("Option index out of range")]
    OptionIndexOutOfRange,
    #[msg("Option is not active")]
    OptionInactive,
    #[msg("Share count must be greater than zero")]
    InvalidShareCount,
    #[msg("Cannot sell more shares than held")]
    InsufficientShares,
}

fn target_option(snapshot: &MarketSnapshot, option_index: usize) -> Result<&MarketOption> {
    require!(!snapshot.options.is_empty(), PricingError::NoOptions);
    snapshot
        .options
        .get(option_index)
        .ok_or_else(|| error!(PricingError::OptionIndexOutOfRange))
}

/// Quote buying `shares` of `option_index`
pub fn quote_buy(
    snapshot: &MarketSnapshot,
    params: &PricingParams,
    option_index: usize,
    shares: u64,
) -> Result<BuyQuote> {
    let option = target_option(snapshot, option_index)?;
    require!(option.active, PricingError::OptionInactive);
    require!(shares > 0, PricingError::InvalidShareCount);

    Ok(snapshot.buy_quote(params, option_index, shares))
}

/// Quote selling `shares` of `option_index` out of the `owned_shares` the
/// seller holds
pub fn quote_sell(
    snapshot: &MarketSnapshot,
    params: &PricingParams,
    option_index: usize,
    shares: u64,
    owned_shares: u64,
) -> Result<SellQuote> {
    let option = target_option(snapshot, option_index)?;
    require!(shares > 0, PricingError::InvalidShareCount);
    require!(shares <= owned_shares, PricingError::InsufficientShares);
    require!(shares <= option.shares, PricingError::InsufficientShares);

    Ok(snapshot.sell_quote(params, option_index, shares))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(yes: u64, no: u64, collateral: u64) -> MarketSnapshot {
        MarketSnapshot::new(
            vec![MarketOption::new("YES", yes), MarketOption::new("NO", no)],
            collateral,
        )
    }

    #[test]
    fn test_quote_buy_ok() {
        let quote = quote_buy(&snapshot(0, 0, 0), &PricingParams::default(), 0, 20).unwrap();
        assert_eq!(quote.cost_tokens, 100);
    }

    #[test]
    fn test_quote_buy_rejections() {
        let params = PricingParams::default();

        let empty = MarketSnapshot::new(vec![], 0);
        assert_eq!(
            quote_buy(&empty, &params, 0, 1).unwrap_err(),
            PricingError::NoOptions.into()
        );
        assert_eq!(
            quote_buy(&snapshot(1, 1, 10), &params, 2, 1).unwrap_err(),
            PricingError::OptionIndexOutOfRange.into()
        );
        assert_eq!(
            quote_buy(&snapshot(1, 1, 10), &params, 0, 0).unwrap_err(),
            PricingError::InvalidShareCount.into()
        );

        let mut closed = snapshot(1, 1, 10);
        closed.options[1].active = false;
        assert_eq!(
            quote_buy(&closed, &params, 1, 5).unwrap_err(),
            PricingError::OptionInactive.into()
        );
    }

    #[test]
    fn test_quote_sell_checks_holdings() {
        let params = PricingParams::default();
        let market = snapshot(100, 50, 6_000);

        assert_eq!(
            quote_sell(&market, &params, 0, 30, 20).unwrap_err(),
            PricingError::InsufficientShares.into()
        );
        assert_eq!(
            quote_sell(&market, &params, 1, 60, 1_000).unwrap_err(),
            PricingError::InsufficientShares.into()
        );

        // 6_000 * 30 / 150 = 1_200, then / 10
        let quote = quote_sell(&market, &params, 0, 30, 30).unwrap();
        assert_eq!(quote.payout_tokens, 120);
        assert_eq!(quote.updated_options[0].shares, 70);
    }

    #[test]
    fn test_quote_sell_allowed_on_inactive_option() {
        let mut market = snapshot(10, 10, 200);
        market.options[0].active = false;
        assert!(quote_sell(&market, &PricingParams::default(), 0, 5, 5).is_ok());
    }
}
