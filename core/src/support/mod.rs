pub mod abi;
mod contracts;
mod pairs;
mod rpc;

pub use contracts::{
    IErc20, IFactory, IMasterChef, IPair, IRouter, IWeth, PoolInfo, SwapOptions, UserInfo,
};
pub use pairs::{all_currency_combinations, fetch_pair, fetch_pairs};
pub use rpc::{EthCall, JsonRpcClient, TransactionReceipt};

