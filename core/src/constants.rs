use soku_sdk::{ChainId as Network, Token};
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};

// Compile-time configuration for chain and node details
pub const CHAIN_ID: Network = if cfg!(feature = "devnet") {
    Network::Localhost
} else {
    Network::Mainnet
};

pub const NODE: &'static str = if cfg!(feature = "devnet") {
    "http://localhost:8545"
} else {
    "https://cloudflare-eth.com"
};

pub const EXPLORER: &'static str = if cfg!(feature = "devnet") {
    "http://localhost:8545"
} else {
    "https://etherscan.io"
};

/// Slippage used until the user picks one, in basis points.
pub const INITIAL_ALLOWED_SLIPPAGE: u16 = 50;

/// Transaction deadline used until the user picks one, in seconds.
pub const DEFAULT_DEADLINE_FROM_NOW: u64 = 60 * 20;

/// Receipt polling interval, in milliseconds.
pub const RECEIPT_POLL_INTERVAL: u32 = 2_000;

/// Give up on a receipt after this many polls.
pub const RECEIPT_POLL_ATTEMPTS: u32 = 90;

pub mod contracts {
    use crate::support::{IFactory, IMasterChef, IRouter, IWeth};

    use super::CHAIN_ID;
    use std::sync::LazyLock;

    // the local devnet is a fork of mainnet, so the addresses are shared

    pub const ROUTER_ADDRESS: &str = "0xd9e1cE17f2641f24aE83637ab66a2cca9C378B9F";
    pub const FACTORY_ADDRESS: &str = "0xC0AEe478e3658e2610c5F7A4A2E1777cE9e4f2Ac";
    pub const MASTERCHEF_ADDRESS: &str = "0xc2EdaD668740f1aA35E4D8f227fB8E17dcA888Cd";

    pub static ROUTER: LazyLock<IRouter> = LazyLock::new(|| IRouter(ROUTER_ADDRESS.to_string()));

    pub static FACTORY: LazyLock<IFactory> =
        LazyLock::new(|| IFactory(FACTORY_ADDRESS.to_string()));

    pub static MASTERCHEF: LazyLock<IMasterChef> =
        LazyLock::new(|| IMasterChef(MASTERCHEF_ADDRESS.to_string()));

    pub static WETH: LazyLock<IWeth> =
        LazyLock::new(|| IWeth(CHAIN_ID.wrapped_native_address().to_string()));
}

fn load_token_list(json: &str) -> Arc<HashMap<String, Token>> {
    let tokens: Vec<Token> = serde_json::from_str(json).expect("Failed to deserialize token list");

    let mut token_map: HashMap<String, Token> = HashMap::new();

    for token in tokens {
        token_map.insert(token.address_key(), token);
    }

    Arc::new(token_map)
}

pub static MAINNET_TOKEN_MAP: LazyLock<Arc<HashMap<String, Token>>> = LazyLock::new(|| {
    load_token_list(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../app/public/tokens_mainnet.json"
    )))
});

pub static DEVNET_TOKEN_MAP: LazyLock<Arc<HashMap<String, Token>>> = LazyLock::new(|| {
    load_token_list(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../app/public/tokens_devnet.json"
    )))
});

pub fn get_token_map(chain_id: Network) -> Arc<HashMap<String, Token>> {
    match chain_id {
        Network::Localhost => Arc::clone(&DEVNET_TOKEN_MAP),
        _ => Arc::clone(&MAINNET_TOKEN_MAP),
    }
}

/// Keyed by lower-cased address.
pub static TOKEN_MAP: LazyLock<Arc<HashMap<String, Token>>> =
    LazyLock::new(|| get_token_map(CHAIN_ID));

// For each token we know about at compile time, map from symbol to address
pub static SYMBOL_TO_ADDR: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    get_token_map(CHAIN_ID)
        .values()
        .map(|token| (token.symbol.clone(), token.address.clone()))
        .collect()
});

/// Intermediate tokens tried when routing a trade.
pub static BASES_TO_CHECK_TRADES_AGAINST: LazyLock<Vec<Token>> = LazyLock::new(|| {
    ["WETH", "DAI", "USDC", "USDT"]
        .iter()
        .filter_map(|symbol| SYMBOL_TO_ADDR.get(*symbol))
        .filter_map(|address| TOKEN_MAP.get(&address.to_lowercase()).cloned())
        .collect()
});

/// Reward token paid by the farm.
pub const SUSHI_SYMBOL: &str = "SUSHI";

pub static REWARD_TOKEN: LazyLock<Token> = LazyLock::new(|| {
    SYMBOL_TO_ADDR
        .get(SUSHI_SYMBOL)
        .and_then(|address| TOKEN_MAP.get(&address.to_lowercase()).cloned())
        .expect("reward token missing from the token list")
});
