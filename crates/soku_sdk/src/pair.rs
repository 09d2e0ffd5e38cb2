use crate::{
    amount::CurrencyAmount,
    constants::{ChainId, FEES_DENOMINATOR, FEES_NUMERATOR, MINIMUM_LIQUIDITY},
    currency::{Currency, Token},
    math::{mul_div, sqrt},
    price::Price,
    Error, Result,
};
use ethnum::U256;
use tracing::debug;

/// A constant-product pool holding two tokens, sorted by address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub address: String,
    pub token0: Token,
    pub token1: Token,
    pub reserve0: U256,
    pub reserve1: U256,
}

impl Pair {
    pub fn new(
        address: impl Into<String>,
        (token_a, reserve_a): (Token, U256),
        (token_b, reserve_b): (Token, U256),
    ) -> Result<Self> {
        let address = address.into();
        if token_a.sorts_before(&token_b)? {
            Ok(Self {
                address,
                token0: token_a,
                token1: token_b,
                reserve0: reserve_a,
                reserve1: reserve_b,
            })
        } else {
            Ok(Self {
                address,
                token0: token_b,
                token1: token_a,
                reserve0: reserve_b,
                reserve1: reserve_a,
            })
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.token0.chain_id
    }

    /// The pool share token. Pairs always mint 18-decimal shares.
    pub fn liquidity_token(&self) -> Token {
        Token {
            chain_id: self.chain_id(),
            address: self.address.clone(),
            decimals: 18,
            symbol: "SLP".to_string(),
            name: "SushiSwap LP Token".to_string(),
            logo_uri: None,
        }
    }

    pub fn involves_token(&self, token: &Token) -> bool {
        *token == self.token0 || *token == self.token1
    }

    pub fn other_token(&self, token: &Token) -> Result<&Token> {
        if *token == self.token0 {
            Ok(&self.token1)
        } else if *token == self.token1 {
            Ok(&self.token0)
        } else {
            Err(Error::InvalidToken)
        }
    }

    pub fn reserve_of(&self, token: &Token) -> Result<CurrencyAmount> {
        if *token == self.token0 {
            Ok(CurrencyAmount::from_token(self.token0.clone(), self.reserve0))
        } else if *token == self.token1 {
            Ok(CurrencyAmount::from_token(self.token1.clone(), self.reserve1))
        } else {
            Err(Error::InvalidToken)
        }
    }

    /// Price of token0 in terms of token1.
    pub fn token0_price(&self) -> Price {
        Price::new(
            self.token0.clone().into(),
            self.token1.clone().into(),
            self.reserve0,
            self.reserve1,
        )
    }

    /// Price of token1 in terms of token0.
    pub fn token1_price(&self) -> Price {
        Price::new(
            self.token1.clone().into(),
            self.token0.clone().into(),
            self.reserve1,
            self.reserve0,
        )
    }

    pub fn price_of(&self, token: &Token) -> Result<Price> {
        if *token == self.token0 {
            Ok(self.token0_price())
        } else if *token == self.token1 {
            Ok(self.token1_price())
        } else {
            Err(Error::InvalidToken)
        }
    }

    fn input_token<'a>(&self, amount: &'a CurrencyAmount) -> Result<&'a Token> {
        let token = amount.token().ok_or(Error::InvalidToken)?;
        if !self.involves_token(token) {
            return Err(Error::InvalidToken);
        }
        Ok(token)
    }

    /// Output of swapping `input_amount` through this pair, and the pair after the swap.
    pub fn get_output_amount(&self, input_amount: &CurrencyAmount) -> Result<(CurrencyAmount, Pair)> {
        let input_token = self.input_token(input_amount)?;
        if self.reserve0 == U256::ZERO || self.reserve1 == U256::ZERO {
            return Err(Error::InsufficientReserves);
        }

        let input_reserve = self.reserve_of(input_token)?;
        let output_reserve = self.reserve_of(self.other_token(input_token)?)?;

        let amount_in_with_fee = input_amount
            .raw
            .checked_mul(FEES_NUMERATOR)
            .ok_or(Error::Overflow)?;
        let denominator = input_reserve
            .raw
            .checked_mul(FEES_DENOMINATOR)
            .and_then(|value| value.checked_add(amount_in_with_fee))
            .ok_or(Error::Overflow)?;
        let output = mul_div(amount_in_with_fee, output_reserve.raw, denominator)
            .ok_or(Error::Overflow)?;

        if output == U256::ZERO {
            return Err(Error::InsufficientInputAmount);
        }

        let output_amount = CurrencyAmount::new(output_reserve.currency.clone(), output);
        let next = self.with_reserves(
            (input_reserve.add(input_amount)?, output_reserve.checked_sub(&output_amount)?),
        )?;

        Ok((output_amount, next))
    }

    /// Input needed to receive `output_amount` from this pair, and the pair after the swap.
    pub fn get_input_amount(&self, output_amount: &CurrencyAmount) -> Result<(CurrencyAmount, Pair)> {
        let output_token = self.input_token(output_amount)?;
        let output_reserve = self.reserve_of(output_token)?;
        let input_reserve = self.reserve_of(self.other_token(output_token)?)?;

        if self.reserve0 == U256::ZERO
            || self.reserve1 == U256::ZERO
            || output_amount.raw >= output_reserve.raw
        {
            return Err(Error::InsufficientReserves);
        }

        let numerator = output_amount
            .raw
            .checked_mul(FEES_DENOMINATOR)
            .ok_or(Error::Overflow)?;
        let denominator = (output_reserve.raw - output_amount.raw)
            .checked_mul(FEES_NUMERATOR)
            .ok_or(Error::Overflow)?;
        let input = mul_div(input_reserve.raw, numerator, denominator)
            .and_then(|value| value.checked_add(U256::ONE))
            .ok_or(Error::Overflow)?;

        let input_amount = CurrencyAmount::new(input_reserve.currency.clone(), input);
        let remaining_output = output_reserve
            .checked_sub(output_amount)?
            .ok_or(Error::InsufficientReserves)?;
        let next = self.with_reserves((input_reserve.add(&input_amount)?, Some(remaining_output)))?;

        Ok((input_amount, next))
    }

    /// Pool tokens minted for depositing `amount_a` and `amount_b`.
    pub fn get_liquidity_minted(
        &self,
        total_supply: &CurrencyAmount,
        amount_a: &CurrencyAmount,
        amount_b: &CurrencyAmount,
    ) -> Result<CurrencyAmount> {
        if total_supply.token() != Some(&self.liquidity_token()) {
            return Err(Error::InvalidToken);
        }

        let token_a = self.input_token(amount_a)?;
        let token_b = self.input_token(amount_b)?;
        let (amount0, amount1) = match token_a.sorts_before(token_b)? {
            true => (amount_a.raw, amount_b.raw),
            false => (amount_b.raw, amount_a.raw),
        };

        let liquidity = if total_supply.raw == U256::ZERO {
            let product = amount0.checked_mul(amount1).ok_or(Error::Overflow)?;
            sqrt(product).saturating_sub(MINIMUM_LIQUIDITY)
        } else {
            let share0 = mul_div(amount0, total_supply.raw, self.reserve0).ok_or(Error::Overflow)?;
            let share1 = mul_div(amount1, total_supply.raw, self.reserve1).ok_or(Error::Overflow)?;
            share0.min(share1)
        };

        if liquidity == U256::ZERO {
            debug!("deposit too small to mint liquidity");
            return Err(Error::InsufficientInputAmount);
        }

        Ok(CurrencyAmount::from_token(self.liquidity_token(), liquidity))
    }

    fn with_reserves(
        &self,
        (input_reserve, output_reserve): (CurrencyAmount, Option<CurrencyAmount>),
    ) -> Result<Pair> {
        let output_reserve = output_reserve.ok_or(Error::InsufficientReserves)?;
        let input_token = input_reserve.token().ok_or(Error::InvalidToken)?.clone();
        let output_token = output_reserve.token().ok_or(Error::InvalidToken)?.clone();
        Pair::new(
            self.address.clone(),
            (input_token, input_reserve.raw),
            (output_token, output_reserve.raw),
        )
    }
}

/// Resolves a currency pair to the tokens a pair contract would hold.
pub fn wrapped_tokens(
    chain_id: ChainId,
    currency_a: &Currency,
    currency_b: &Currency,
) -> Result<(Token, Token)> {
    let token_a = currency_a.wrapped(chain_id);
    let token_b = currency_b.wrapped(chain_id);
    if token_a == token_b {
        return Err(Error::IdenticalAddresses);
    }
    Ok((token_a, token_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(address: &str, symbol: &str) -> Token {
        Token::new(ChainId::Mainnet, address, 18, symbol, symbol)
    }

    fn dai() -> Token {
        token("0x6B175474E89094C44Da98b954EedeAC495271d0F", "DAI")
    }

    fn sushi() -> Token {
        token("0x6B3595068778DD592e39A122f4f5a5cF09C90fE2", "SUSHI")
    }

    fn pair(reserve_dai: u128, reserve_sushi: u128) -> Pair {
        Pair::new(
            "0x0000000000000000000000000000000000000001",
            (sushi(), U256::new(reserve_sushi)),
            (dai(), U256::new(reserve_dai)),
        )
        .unwrap()
    }

    #[test]
    fn test_tokens_are_sorted() {
        let pair = pair(100, 200);
        assert_eq!(pair.token0, dai());
        assert_eq!(pair.token1, sushi());
        assert_eq!(pair.reserve0, U256::new(100));
        assert_eq!(pair.reserve1, U256::new(200));
    }

    #[test]
    fn test_get_output_amount_applies_fee() {
        let pair = pair(1000, 1000);
        let input = CurrencyAmount::from_token(dai(), 100u128);
        let (output, next) = pair.get_output_amount(&input).unwrap();
        // 100 * 997 * 1000 / (1000 * 1000 + 100 * 997) = 90.66
        assert_eq!(output.raw, U256::new(90));
        assert_eq!(output.token(), Some(&sushi()));
        assert_eq!(next.reserve0, U256::new(1100));
        assert_eq!(next.reserve1, U256::new(910));
    }

    #[test]
    fn test_get_input_amount_rounds_up() {
        let pair = pair(1000, 1000);
        let output = CurrencyAmount::from_token(sushi(), 90u128);
        let (input, _) = pair.get_input_amount(&output).unwrap();
        // 1000 * 90 * 1000 / (910 * 997) + 1 = 99.2 + 1
        assert_eq!(input.raw, U256::new(100));

        let too_much = CurrencyAmount::from_token(sushi(), 1000u128);
        assert_eq!(
            pair.get_input_amount(&too_much),
            Err(Error::InsufficientReserves)
        );
    }

    #[test]
    fn test_empty_pair_has_no_output() {
        let pair = pair(0, 0);
        let input = CurrencyAmount::from_token(dai(), 100u128);
        assert_eq!(
            pair.get_output_amount(&input).map(|(amount, _)| amount),
            Err(Error::InsufficientReserves)
        );
    }

    #[test]
    fn test_liquidity_minted() {
        let empty = pair(0, 0);
        let supply = CurrencyAmount::from_token(empty.liquidity_token(), 0u128);
        let minted = empty
            .get_liquidity_minted(
                &supply,
                &CurrencyAmount::from_token(dai(), 10_000u128),
                &CurrencyAmount::from_token(sushi(), 10_000u128),
            )
            .unwrap();
        assert_eq!(minted.raw, U256::new(9_000));

        let funded = pair(10_000, 10_000);
        let supply = CurrencyAmount::from_token(funded.liquidity_token(), 10_000u128);
        let minted = funded
            .get_liquidity_minted(
                &supply,
                &CurrencyAmount::from_token(sushi(), 2_000u128),
                &CurrencyAmount::from_token(dai(), 1_000u128),
            )
            .unwrap();
        assert_eq!(minted.raw, U256::new(1_000));
    }
}
