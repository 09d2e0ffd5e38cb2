use crate::{
    amount::CurrencyAmount,
    constants::Rounding,
    currency::Currency,
    fraction::{mul_fraction, Fraction},
    math::pow10,
    Error, Result,
};
use ethnum::U256;

/// Quote currency per base currency. `raw` is in smallest units of each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub base: Currency,
    pub quote: Currency,
    pub raw: Fraction,
    scalar: Fraction,
}

impl Price {
    /// `denominator` units of `base` buy `numerator` units of `quote`.
    pub fn new(
        base: Currency,
        quote: Currency,
        denominator: impl Into<U256>,
        numerator: impl Into<U256>,
    ) -> Self {
        let scalar = Fraction::new(
            pow10(base.decimals() as u32),
            pow10(quote.decimals() as u32),
        );
        Self {
            base,
            quote,
            raw: Fraction::new(numerator, denominator),
            scalar,
        }
    }

    /// The price implied by swapping `input` for `output`.
    pub fn from_amounts(input: &CurrencyAmount, output: &CurrencyAmount) -> Self {
        Self::new(
            input.currency.clone(),
            output.currency.clone(),
            input.raw,
            output.raw,
        )
    }

    /// The raw price adjusted for decimals.
    pub fn adjusted(&self) -> Fraction {
        self.raw.multiply(&self.scalar)
    }

    pub fn invert(&self) -> Price {
        Price::new(
            self.quote.clone(),
            self.base.clone(),
            self.raw.numerator,
            self.raw.denominator,
        )
    }

    pub fn multiply(&self, other: &Price) -> Result<Price> {
        if self.quote != other.base {
            return Err(Error::CurrencyMismatch);
        }
        let raw = self.raw.multiply(&other.raw);
        Ok(Price::new(
            self.base.clone(),
            other.quote.clone(),
            raw.denominator,
            raw.numerator,
        ))
    }

    /// Converts an amount of the base currency into the quote currency.
    pub fn quote(&self, amount: &CurrencyAmount) -> Result<CurrencyAmount> {
        if amount.currency != self.base {
            return Err(Error::CurrencyMismatch);
        }
        let raw = mul_fraction(amount.raw, &self.raw).ok_or(Error::Overflow)?;
        Ok(CurrencyAmount::new(self.quote.clone(), raw))
    }

    pub fn to_significant(&self, significant_digits: u32) -> String {
        self.adjusted()
            .to_significant(significant_digits, Rounding::RoundHalfUp)
    }

    pub fn to_fixed(&self, decimal_places: u32) -> String {
        self.adjusted()
            .to_fixed(decimal_places, Rounding::RoundHalfUp)
    }

    pub fn equal_to(&self, other: &Price) -> bool {
        self.base == other.base && self.quote == other.quote && self.raw.equal_to(&other.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::ChainId, currency::Token};
    use pretty_assertions::assert_eq;

    fn usdc() -> Currency {
        Token::new(
            ChainId::Mainnet,
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            6,
            "USDC",
            "USD Coin",
        )
        .into()
    }

    #[test]
    fn test_adjusted_price_accounts_for_decimals() {
        // 1 ETH (18 decimals) buys 2000 USDC (6 decimals)
        let price = Price::new(
            Currency::Native,
            usdc(),
            U256::new(1_000_000_000_000_000_000),
            U256::new(2_000_000_000),
        );
        assert_eq!(price.to_significant(6), "2000");
        assert_eq!(price.invert().to_significant(4), "0.0005");
    }

    #[test]
    fn test_quote() {
        let price = Price::new(
            Currency::Native,
            usdc(),
            U256::new(1_000_000_000_000_000_000),
            U256::new(2_000_000_000),
        );
        let half_eth = CurrencyAmount::native(500_000_000_000_000_000u128);
        let quoted = price.quote(&half_eth).unwrap();
        assert_eq!(quoted.to_exact(), "1000");
        assert_eq!(price.quote(&quoted), Err(Error::CurrencyMismatch));
    }
}
