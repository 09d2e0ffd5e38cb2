use crate::utils::{confirm, prompt};
use ethnum::U256;
use soku_sdk::{
    constants::{FEES_DENOMINATOR, FEES_NUMERATOR},
    CurrencyAmount, Fraction, Percent, Trade,
};

pub const ALLOWED_PRICE_IMPACT_LOW_BIPS: u16 = 100;
pub const ALLOWED_PRICE_IMPACT_MEDIUM_BIPS: u16 = 300;
pub const ALLOWED_PRICE_IMPACT_HIGH_BIPS: u16 = 500;
/// Swaps above this impact need expert mode.
pub const BLOCKED_PRICE_IMPACT_NON_EXPERT_BIPS: u16 = 1500;

/// Severity at which the swap button turns into "Swap Anyway".
pub const SEVERITY_WARN: u8 = 2;
/// Severity at which swapping needs expert mode.
pub const SEVERITY_BLOCKED: u8 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct TradePriceBreakdown {
    /// Price impact with the LP fees taken out.
    pub price_impact_without_fee: Percent,
    /// LP fees paid along the route, in the input currency.
    pub realized_lp_fee_amount: CurrencyAmount,
}

/// Splits the trade's price impact into the part caused by LP fees and the rest.
///
/// Every hop keeps 99.7% of its input, so the fee share of a route is
/// `1 - 0.997^hops`.
pub fn compute_trade_price_breakdown(trade: &Trade) -> TradePriceBreakdown {
    let one = Fraction::from_integer(U256::ONE);
    let after_fee = Fraction::new(FEES_NUMERATOR, FEES_DENOMINATOR);
    let kept = trade
        .route
        .pairs
        .iter()
        .fold(one, |kept, _| kept.multiply(&after_fee));
    let realized_lp_fee = one.checked_sub(&kept).unwrap_or(Fraction::ZERO);

    let price_impact_without_fee = trade
        .price_impact
        .checked_sub(&Percent(realized_lp_fee))
        .unwrap_or(Percent::ZERO);

    let fee_raw = realized_lp_fee
        .multiply(&Fraction::from_integer(trade.input_amount.raw))
        .quotient();

    TradePriceBreakdown {
        price_impact_without_fee,
        realized_lp_fee_amount: CurrencyAmount::new(trade.input_amount.currency.clone(), fee_raw),
    }
}

/// Maps a price impact to a warning level from 0 (fine) to 4 (blocked).
pub fn warning_severity(price_impact: Option<&Percent>) -> u8 {
    let Some(price_impact) = price_impact else {
        return 0;
    };

    [
        BLOCKED_PRICE_IMPACT_NON_EXPERT_BIPS,
        ALLOWED_PRICE_IMPACT_HIGH_BIPS,
        ALLOWED_PRICE_IMPACT_MEDIUM_BIPS,
        ALLOWED_PRICE_IMPACT_LOW_BIPS,
    ]
    .iter()
    .position(|bips| !price_impact.less_than(&Percent::from_bips(*bips)))
    .map(|index| 4 - index as u8)
    .unwrap_or(0)
}

/// Makes the user acknowledge a large price impact. Returns false if they back out.
pub fn confirm_price_impact_without_fee(price_impact: &Percent) -> bool {
    if !price_impact.less_than(&Percent::from_bips(BLOCKED_PRICE_IMPACT_NON_EXPERT_BIPS)) {
        let answer = prompt(format!(
            "This swap has a price impact of at least {}%. Please type the word \"confirm\" to continue with this swap.",
            BLOCKED_PRICE_IMPACT_NON_EXPERT_BIPS / 100
        ));
        answer.as_deref() == Some("confirm")
    } else if !price_impact.less_than(&Percent::from_bips(ALLOWED_PRICE_IMPACT_HIGH_BIPS)) {
        confirm(format!(
            "This swap has a price impact of at least {}%. Please confirm that you would like to continue with this swap.",
            ALLOWED_PRICE_IMPACT_HIGH_BIPS / 100
        ))
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use soku_sdk::{ChainId, Currency, Pair, Route, Token};

    fn token(address: &str, symbol: &str) -> Token {
        Token::new(ChainId::Mainnet, address, 18, symbol, symbol)
    }

    fn pair(a: &Token, b: &Token, reserve: u128) -> Pair {
        Pair::new(
            "0x00000000000000000000000000000000000000aa",
            (a.clone(), U256::new(reserve)),
            (b.clone(), U256::new(reserve)),
        )
        .unwrap()
    }

    #[test]
    fn test_severity_steps() {
        let severity = |bips: u16| warning_severity(Some(&Percent::from_bips(bips)));
        assert_eq!(warning_severity(None), 0);
        assert_eq!(severity(99), 0);
        assert_eq!(severity(100), 1);
        assert_eq!(severity(299), 1);
        assert_eq!(severity(300), 2);
        assert_eq!(severity(500), 3);
        assert_eq!(severity(1499), 3);
        assert_eq!(severity(1500), 4);
    }

    #[test]
    fn test_single_hop_fee() {
        let a = token("0x0000000000000000000000000000000000000001", "A");
        let b = token("0x0000000000000000000000000000000000000002", "B");
        let route = Route::new(vec![pair(&a, &b, 1_000_000_000)], a.clone().into(), b.into()).unwrap();
        let trade = Trade::exact_in(route, CurrencyAmount::from_token(a.clone(), U256::new(1_000))).unwrap();

        let breakdown = compute_trade_price_breakdown(&trade);

        assert_eq!(
            breakdown.realized_lp_fee_amount,
            CurrencyAmount::from_token(a, U256::new(3))
        );
        assert_eq!(warning_severity(Some(&breakdown.price_impact_without_fee)), 0);
    }

    #[test]
    fn test_two_hop_fee_compounds() {
        let a = token("0x0000000000000000000000000000000000000001", "A");
        let b = token("0x0000000000000000000000000000000000000002", "B");
        let c = token("0x0000000000000000000000000000000000000003", "C");
        let route = Route::new(
            vec![pair(&a, &b, 1_000_000_000_000), pair(&b, &c, 1_000_000_000_000)],
            Currency::Token(a.clone()),
            Currency::Token(c),
        )
        .unwrap();
        let trade = Trade::exact_in(route, CurrencyAmount::from_token(a, U256::new(1_000_000))).unwrap();

        // 1 - 0.997^2 = 0.005991
        assert_eq!(
            compute_trade_price_breakdown(&trade).realized_lp_fee_amount.raw,
            U256::new(5_991)
        );
    }
}
