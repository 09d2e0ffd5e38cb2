use ethnum::U256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainId {
    Mainnet,
    Bsc,
    Localhost,
}

impl ChainId {
    /// Returns the numeric EIP-155 chain id.
    pub fn id(&self) -> u64 {
        match self {
            ChainId::Mainnet => 1,
            ChainId::Bsc => 56,
            ChainId::Localhost => 31337,
        }
    }

    /// Symbol of the network's native currency.
    pub fn native_symbol(&self) -> &'static str {
        match self {
            ChainId::Mainnet | ChainId::Localhost => "ETH",
            ChainId::Bsc => "BNB",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            ChainId::Mainnet | ChainId::Localhost => "Ether",
            ChainId::Bsc => "Binance Coin",
        }
    }

    /// Address of the wrapped native token. Localhost is expected to be a fork of mainnet.
    pub fn wrapped_native_address(&self) -> &'static str {
        match self {
            ChainId::Mainnet | ChainId::Localhost => "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
            ChainId::Bsc => "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c",
        }
    }
}

impl TryFrom<u64> for ChainId {
    type Error = &'static str;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(ChainId::Mainnet),
            56 => Ok(ChainId::Bsc),
            31337 => Ok(ChainId::Localhost),
            _ => Err("Invalid chain ID"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    RoundDown,
    RoundHalfUp,
    RoundUp,
}

pub const MINIMUM_LIQUIDITY: U256 = U256::new(1000);

// 0.3% swap fee
pub const FEES_NUMERATOR: U256 = U256::new(997);
pub const FEES_DENOMINATOR: U256 = U256::new(1000);

pub const BIPS_BASE: U256 = U256::new(10_000);
