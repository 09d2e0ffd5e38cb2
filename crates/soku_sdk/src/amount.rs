use crate::{
    constants::{ChainId, Rounding},
    currency::{Currency, Token},
    fraction::Fraction,
    math::pow10,
    Error, Result,
};
use ethnum::U256;
use std::cmp::Ordering;

/// A raw on-chain quantity of a currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAmount {
    pub currency: Currency,
    pub raw: U256,
}

impl CurrencyAmount {
    pub fn new(currency: Currency, raw: impl Into<U256>) -> Self {
        Self {
            currency,
            raw: raw.into(),
        }
    }

    pub fn from_token(token: Token, raw: impl Into<U256>) -> Self {
        Self::new(Currency::Token(token), raw)
    }

    pub fn native(raw: impl Into<U256>) -> Self {
        Self::new(Currency::Native, raw)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(currency, U256::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.raw == U256::ZERO
    }

    pub fn token(&self) -> Option<&Token> {
        self.currency.token()
    }

    /// The same quantity expressed in the wrapped token.
    pub fn wrapped(&self, chain_id: ChainId) -> CurrencyAmount {
        CurrencyAmount::from_token(self.currency.wrapped(chain_id), self.raw)
    }

    /// Value in whole units.
    pub fn as_fraction(&self) -> Fraction {
        Fraction::new(self.raw, pow10(self.currency.decimals() as u32))
    }

    pub fn add(&self, other: &CurrencyAmount) -> Result<CurrencyAmount> {
        self.ensure_same_currency(other)?;
        let raw = self.raw.checked_add(other.raw).ok_or(Error::Overflow)?;
        Ok(CurrencyAmount::new(self.currency.clone(), raw))
    }

    /// Returns `None` when `other` is larger.
    pub fn checked_sub(&self, other: &CurrencyAmount) -> Result<Option<CurrencyAmount>> {
        self.ensure_same_currency(other)?;
        Ok(self
            .raw
            .checked_sub(other.raw)
            .map(|raw| CurrencyAmount::new(self.currency.clone(), raw)))
    }

    pub fn compare(&self, other: &CurrencyAmount) -> Result<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.raw.cmp(&other.raw))
    }

    pub fn greater_than(&self, other: &CurrencyAmount) -> bool {
        self.compare(other) == Ok(Ordering::Greater)
    }

    pub fn less_than(&self, other: &CurrencyAmount) -> bool {
        self.compare(other) == Ok(Ordering::Less)
    }

    pub fn to_significant(&self, significant_digits: u32) -> String {
        self.as_fraction()
            .to_significant(significant_digits, Rounding::RoundDown)
    }

    /// At most `decimals` places; more would be noise.
    pub fn to_fixed(&self, decimal_places: u32) -> String {
        let places = decimal_places.min(self.currency.decimals() as u32);
        self.as_fraction().to_fixed(places, Rounding::RoundDown)
    }

    /// The full-precision value without trailing zeros.
    pub fn to_exact(&self) -> String {
        let fixed = self
            .as_fraction()
            .to_fixed(self.currency.decimals() as u32, Rounding::RoundDown);
        if fixed.contains('.') {
            fixed
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        } else {
            fixed
        }
    }

    fn ensure_same_currency(&self, other: &CurrencyAmount) -> Result<()> {
        if self.currency != other.currency {
            return Err(Error::CurrencyMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn usdc() -> Token {
        Token::new(
            ChainId::Mainnet,
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            6,
            "USDC",
            "USD Coin",
        )
    }

    #[test]
    fn test_to_exact_keeps_full_precision() {
        let amount = CurrencyAmount::from_token(usdc(), 10_000_100u128);
        assert_eq!(amount.to_exact(), "10.0001");
        assert_eq!(CurrencyAmount::from_token(usdc(), 10_000_000u128).to_exact(), "10");
        assert_eq!(CurrencyAmount::native(1u128).to_exact(), "0.000000000000000001");
    }

    #[test]
    fn test_to_significant_rounds_down() {
        let amount = CurrencyAmount::from_token(usdc(), 1_234_567_899u128);
        assert_eq!(amount.to_significant(6), "1234.56");
    }

    #[test]
    fn test_to_fixed_is_capped_by_decimals() {
        let amount = CurrencyAmount::from_token(usdc(), 1_500_000u128);
        assert_eq!(amount.to_fixed(2), "1.50");
        assert_eq!(amount.to_fixed(18), "1.500000");
    }

    #[test]
    fn test_arithmetic_requires_matching_currency() {
        let a = CurrencyAmount::from_token(usdc(), 5u128);
        let b = CurrencyAmount::native(5u128);
        assert_eq!(a.add(&b), Err(Error::CurrencyMismatch));
        assert_eq!(
            a.add(&a).map(|sum| sum.raw),
            Ok(U256::new(10))
        );
        assert_eq!(
            a.checked_sub(&CurrencyAmount::from_token(usdc(), 6u128)),
            Ok(None)
        );
        assert!(!a.greater_than(&b));
    }
}
