use crate::{
    constants::{CHAIN_ID, EXPLORER},
    error::Error,
    support::{EthCall, IErc20, JsonRpcClient},
    TOKEN_MAP,
};
use ethnum::U256;
use leptos::prelude::window;
use soku_sdk::{math::pow10, Currency, CurrencyAmount, Token};

pub fn alert(msg: impl AsRef<str>) {
    let _ = window().alert_with_message(msg.as_ref());
}

/// Asks the user to confirm. Dismissed dialogs count as "no".
pub fn confirm(msg: impl AsRef<str>) -> bool {
    window().confirm_with_message(msg.as_ref()).unwrap_or(false)
}

/// Asks the user for a line of text.
pub fn prompt(msg: impl AsRef<str>) -> Option<String> {
    window().prompt_with_message(msg.as_ref()).ok().flatten()
}

pub fn shorten_address(address: impl ToString) -> String {
    let address = address.to_string();
    if address.len() > 12 {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address
    }
}

/// Formats a raw amount with its decimal point, trailing zeros removed.
pub fn display_token_amount(amount: U256, decimals: u8) -> String {
    let factor = pow10(decimals as u32);
    let integer_part = amount / factor;
    let fractional_part = amount % factor;

    if decimals == 0 || fractional_part == U256::ZERO {
        return integer_part.to_string();
    }

    let fractional_str = format!("{:0>width$}", fractional_part.to_string(), width = decimals as usize);
    format!("{}.{}", integer_part, fractional_str.trim_end_matches('0'))
}

/// Parses a decimal string into a raw amount with `decimals` places.
///
/// Rejects anything that isn't plain digits with at most one point, and
/// fractions more precise than the token allows.
pub fn parse_token_amount(amount: impl AsRef<str>, decimals: u8) -> Result<U256, Error> {
    let amount = amount.as_ref().trim();
    let invalid = || Error::InvalidAmount(amount.to_string());

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.len() > decimals as usize {
        return Err(invalid());
    }

    let digits = format!("{whole}{fraction:0<width$}", width = decimals as usize);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10).map_err(|_| invalid())
}

/// Parses user input into an amount of `currency`. Zero and invalid input give `None`.
pub fn try_parse_amount(value: &str, currency: &Currency) -> Option<CurrencyAmount> {
    match parse_token_amount(value, currency.decimals()) {
        Ok(raw) if raw != U256::ZERO => Some(CurrencyAmount::new(currency.clone(), raw)),
        _ => None,
    }
}

/// Resolves a route segment or query parameter to a currency.
///
/// The native symbol (`ETH`) names the native currency; anything else is looked
/// up as a token address.
pub fn currency_from_param(param: &str) -> Option<Currency> {
    if param.eq_ignore_ascii_case(CHAIN_ID.native_symbol()) {
        return Some(Currency::Native);
    }
    TOKEN_MAP
        .get(&param.to_lowercase())
        .cloned()
        .map(Currency::Token)
}

/// The inverse of [`currency_from_param`].
pub fn currency_to_param(currency: &Currency) -> String {
    match currency {
        Currency::Native => CHAIN_ID.native_symbol().to_string(),
        Currency::Token(token) => token.address.clone(),
    }
}

/// Seconds since the epoch, from the browser clock.
pub fn unix_now() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

pub fn explorer_tx_link(hash: &str) -> String {
    format!("{EXPLORER}/tx/{hash}")
}

/// Looks the token up in the token map, falling back to reading it from the chain.
pub async fn address_to_token(client: &impl EthCall, address: &str) -> Result<Token, Error> {
    if let Some(token) = TOKEN_MAP.get(&address.to_lowercase()) {
        return Ok(token.clone());
    }

    let erc20 = IErc20(address.to_string());
    let decimals = erc20.decimals(client).await?;
    let symbol = erc20.symbol(client).await?;

    Ok(Token::new(CHAIN_ID, address, decimals, symbol.clone(), symbol))
}

/// Balance of `owner` in `currency`, read from the node.
pub async fn currency_balance(
    client: &JsonRpcClient,
    owner: &str,
    currency: &Currency,
) -> Result<CurrencyAmount, Error> {
    let raw = match currency {
        Currency::Native => client.get_balance(owner).await?,
        Currency::Token(token) => IErc20(token.address.clone()).balance_of(client, owner).await?,
    };
    Ok(CurrencyAmount::new(currency.clone(), raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_token_amount() {
        assert_eq!(parse_token_amount("1.5", 6), Ok(U256::new(1_500_000)));
        assert_eq!(parse_token_amount(".5", 2), Ok(U256::new(50)));
        assert_eq!(parse_token_amount("10.", 2), Ok(U256::new(1000)));
        assert_eq!(parse_token_amount("0.000", 18), Ok(U256::ZERO));
        assert_eq!(parse_token_amount("42", 0), Ok(U256::new(42)));
    }

    #[test]
    fn test_parse_token_amount_rejects_garbage() {
        assert!(parse_token_amount("", 18).is_err());
        assert!(parse_token_amount(".", 18).is_err());
        assert!(parse_token_amount("1.2.3", 18).is_err());
        assert!(parse_token_amount("-1", 18).is_err());
        assert!(parse_token_amount("1e5", 18).is_err());
        assert!(parse_token_amount("0.1234567", 6).is_err());
    }

    #[test]
    fn test_try_parse_amount_treats_zero_as_missing() {
        assert_eq!(try_parse_amount("0", &Currency::Native), None);
        assert_eq!(try_parse_amount("abc", &Currency::Native), None);
        assert_eq!(
            try_parse_amount("0.01", &Currency::Native).map(|amount| amount.raw),
            Some(U256::new(10_000_000_000_000_000))
        );
    }

    #[test]
    fn test_display_token_amount() {
        assert_eq!(display_token_amount(U256::new(1_500_000), 6), "1.5");
        assert_eq!(display_token_amount(U256::new(5), 6), "0.000005");
        assert_eq!(display_token_amount(U256::new(2_000_000), 6), "2");
        assert_eq!(display_token_amount(U256::new(7), 0), "7");
    }

    #[test]
    fn test_shorten_address() {
        assert_eq!(
            shorten_address("0xd9e1cE17f2641f24aE83637ab66a2cca9C378B9F"),
            "0xd9e1...8B9F"
        );
        assert_eq!(shorten_address("0x1234"), "0x1234");
    }

    #[test]
    fn test_native_symbol_param() {
        assert_eq!(currency_from_param("ETH"), Some(Currency::Native));
        assert_eq!(currency_from_param("eth"), Some(Currency::Native));
        assert_eq!(currency_to_param(&Currency::Native), "ETH");
        assert_eq!(currency_from_param("0xnotatoken"), None);
    }
}
