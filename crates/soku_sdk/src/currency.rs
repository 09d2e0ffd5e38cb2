use crate::{constants::ChainId, Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// An ERC-20 token, in the token list format.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub chain_id: u64,
    pub address: String,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

impl Token {
    pub fn new(
        chain_id: ChainId,
        address: impl Into<String>,
        decimals: u8,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chain_id: chain_id.id(),
            address: address.into(),
            decimals,
            symbol: symbol.into(),
            name: name.into(),
            logo_uri: None,
        }
    }

    /// The wrapped form of the native currency.
    pub fn wrapped_native(chain_id: ChainId) -> Self {
        Self::new(
            chain_id,
            chain_id.wrapped_native_address(),
            18,
            format!("W{}", chain_id.native_symbol()),
            format!("Wrapped {}", chain_id.native_name()),
        )
    }

    /// Pairs order their tokens by address.
    pub fn sorts_before(&self, other: &Token) -> Result<bool> {
        if self.chain_id != other.chain_id {
            return Err(Error::ChainMismatch);
        }
        match self.address_key().cmp(&other.address_key()) {
            Ordering::Equal => Err(Error::IdenticalAddresses),
            ordering => Ok(ordering == Ordering::Less),
        }
    }

    pub fn address_key(&self) -> String {
        self.address.to_lowercase()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address.eq_ignore_ascii_case(&other.address)
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address_key().hash(state);
    }
}

/// Either the chain's native currency or an ERC-20 token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Currency {
    Native,
    Token(Token),
}

impl Currency {
    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native)
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Currency::Native => 18,
            Currency::Token(token) => token.decimals,
        }
    }

    pub fn symbol(&self, chain_id: ChainId) -> String {
        match self {
            Currency::Native => chain_id.native_symbol().to_string(),
            Currency::Token(token) => token.symbol.clone(),
        }
    }

    pub fn name(&self, chain_id: ChainId) -> String {
        match self {
            Currency::Native => chain_id.native_name().to_string(),
            Currency::Token(token) => token.name.clone(),
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Currency::Native => None,
            Currency::Token(token) => Some(token),
        }
    }

    /// The token used on-chain in place of this currency.
    pub fn wrapped(&self, chain_id: ChainId) -> Token {
        match self {
            Currency::Native => Token::wrapped_native(chain_id),
            Currency::Token(token) => token.clone(),
        }
    }
}

impl From<Token> for Currency {
    fn from(token: Token) -> Self {
        Currency::Token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
    const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

    #[test]
    fn test_token_equality_ignores_address_case() {
        let a = Token::new(ChainId::Mainnet, USDC, 6, "USDC", "USD Coin");
        let b = Token::new(ChainId::Mainnet, USDC.to_lowercase(), 6, "USDC", "USD//C");
        assert_eq!(a, b);

        let other_chain = Token::new(ChainId::Bsc, USDC, 6, "USDC", "USD Coin");
        assert_ne!(a, other_chain);
    }

    #[test]
    fn test_sorts_before() {
        let usdc = Token::new(ChainId::Mainnet, USDC, 6, "USDC", "USD Coin");
        let dai = Token::new(ChainId::Mainnet, DAI, 18, "DAI", "Dai Stablecoin");
        assert_eq!(dai.sorts_before(&usdc), Ok(true));
        assert_eq!(usdc.sorts_before(&dai), Ok(false));
        assert_eq!(usdc.sorts_before(&usdc), Err(Error::IdenticalAddresses));
    }

    #[test]
    fn test_native_symbol_depends_on_chain() {
        assert_eq!(Currency::Native.symbol(ChainId::Mainnet), "ETH");
        assert_eq!(Currency::Native.symbol(ChainId::Bsc), "BNB");
        assert_eq!(Currency::Native.wrapped(ChainId::Mainnet).symbol, "WETH");
    }

    #[test]
    fn test_token_list_entry_deserializes() {
        let json = r#"{
            "chainId": 1,
            "address": "0x6B175474E89094C44Da98b954EedeAC495271d0F",
            "decimals": 18,
            "symbol": "DAI",
            "name": "Dai Stablecoin",
            "logoURI": "https://example.org/dai.png"
        }"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.chain_id, 1);
        assert_eq!(token.symbol, "DAI");
        assert_eq!(token.logo_uri.as_deref(), Some("https://example.org/dai.png"));
    }
}
