//! Typed wrappers around the contracts the app talks to.
//!
//! Reads go through any [`EthCall`] implementation. Writes only build the
//! [`TransactionRequest`]; signing and broadcasting is left to the wallet.

use super::{
    abi::{decode_address, decode_string, decode_uint, encode_call, to_quantity, AbiValue},
    rpc::EthCall,
};
use crate::Error;
use ethnum::U256;
use hex_literal::hex;
use injected::TransactionRequest;
use serde::{Deserialize, Serialize};
use soku_sdk::{Percent, Trade, TradeType};

const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

fn address(value: &str) -> AbiValue {
    AbiValue::Address(value.to_string())
}

fn transaction(from: &str, to: &str, data: String, value: Option<U256>) -> TransactionRequest {
    TransactionRequest {
        from: from.to_string(),
        to: to.to_string(),
        data,
        value: value.map(to_quantity),
    }
}

macro_rules! impl_deref_address {
    ($($name:ident),*) => {
        $(
            impl std::ops::Deref for $name {
                type Target = String;

                fn deref(&self) -> &Self::Target {
                    &self.0
                }
            }
        )*
    };
}

impl_deref_address!(IErc20, IPair, IFactory, IRouter, IWeth, IMasterChef);

/// A thin wrapper around a token address that provides the ERC-20 methods.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IErc20(pub String);

impl IErc20 {
    pub async fn balance_of(&self, client: &impl EthCall, owner: &str) -> Result<U256, Error> {
        let data = encode_call(hex!("70a08231"), &[address(owner)])?;
        decode_uint(&client.call(&self.0, &data).await?, 0)
    }

    pub async fn allowance(
        &self,
        client: &impl EthCall,
        owner: &str,
        spender: &str,
    ) -> Result<U256, Error> {
        let data = encode_call(hex!("dd62ed3e"), &[address(owner), address(spender)])?;
        decode_uint(&client.call(&self.0, &data).await?, 0)
    }

    pub async fn total_supply(&self, client: &impl EthCall) -> Result<U256, Error> {
        let data = encode_call(hex!("18160ddd"), &[])?;
        decode_uint(&client.call(&self.0, &data).await?, 0)
    }

    pub async fn decimals(&self, client: &impl EthCall) -> Result<u8, Error> {
        let data = encode_call(hex!("313ce567"), &[])?;
        let decimals = decode_uint(&client.call(&self.0, &data).await?, 0)?;
        u8::try_from(decimals.as_u64()).map_err(Error::abi)
    }

    pub async fn symbol(&self, client: &impl EthCall) -> Result<String, Error> {
        let data = encode_call(hex!("95d89b41"), &[])?;
        decode_string(&client.call(&self.0, &data).await?)
    }

    pub fn approve(&self, from: &str, spender: &str, amount: U256) -> Result<TransactionRequest, Error> {
        let data = encode_call(hex!("095ea7b3"), &[address(spender), AbiValue::Uint(amount)])?;
        Ok(transaction(from, &self.0, data, None))
    }
}

/// A thin wrapper around a pair address.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IPair(pub String);

impl IPair {
    /// Returns `(reserve0, reserve1)`; the block timestamp is dropped.
    pub async fn get_reserves(&self, client: &impl EthCall) -> Result<(U256, U256), Error> {
        let data = encode_call(hex!("0902f1ac"), &[])?;
        let response = client.call(&self.0, &data).await?;
        Ok((decode_uint(&response, 0)?, decode_uint(&response, 1)?))
    }

    pub async fn token0(&self, client: &impl EthCall) -> Result<String, Error> {
        let data = encode_call(hex!("0dfe1681"), &[])?;
        decode_address(&client.call(&self.0, &data).await?, 0)
    }

    pub async fn token1(&self, client: &impl EthCall) -> Result<String, Error> {
        let data = encode_call(hex!("d21220a7"), &[])?;
        decode_address(&client.call(&self.0, &data).await?, 0)
    }

    pub fn as_token(&self) -> IErc20 {
        IErc20(self.0.clone())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IFactory(pub String);

impl IFactory {
    /// The pair for two tokens, or `None` if nobody has created it yet.
    pub async fn get_pair(
        &self,
        client: &impl EthCall,
        token_a: &str,
        token_b: &str,
    ) -> Result<Option<IPair>, Error> {
        let data = encode_call(hex!("e6a43905"), &[address(token_a), address(token_b)])?;
        let pair = decode_address(&client.call(&self.0, &data).await?, 0)?;
        Ok((pair != ZERO_ADDRESS).then_some(IPair(pair)))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IWeth(pub String);

impl IWeth {
    pub fn deposit(&self, from: &str, amount: U256) -> Result<TransactionRequest, Error> {
        let data = encode_call(hex!("d0e30db0"), &[])?;
        Ok(transaction(from, &self.0, data, Some(amount)))
    }

    pub fn withdraw(&self, from: &str, amount: U256) -> Result<TransactionRequest, Error> {
        let data = encode_call(hex!("2e1a7d4d"), &[AbiValue::Uint(amount)])?;
        Ok(transaction(from, &self.0, data, None))
    }
}

/// Options for a router swap.
#[derive(Clone, Debug, PartialEq)]
pub struct SwapOptions {
    pub allowed_slippage: Percent,
    /// Unix timestamp after which the router rejects the swap.
    pub deadline: u64,
    pub recipient: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IRouter(pub String);

impl IRouter {
    /// Picks the router method for a trade and encodes its arguments.
    ///
    /// Native input is sent as the transaction value. Exact-output swaps pay at
    /// most `maximum_amount_in`; exact-input swaps receive at least
    /// `minimum_amount_out`.
    pub fn swap(&self, from: &str, trade: &Trade, options: &SwapOptions) -> Result<TransactionRequest, Error> {
        let ether_in = trade.input_amount.currency.is_native();
        let ether_out = trade.output_amount.currency.is_native();
        if ether_in && ether_out {
            return Err(Error::generic("Cannot swap native for native"));
        }

        let amount_in = trade.maximum_amount_in(&options.allowed_slippage).raw;
        let amount_out = trade.minimum_amount_out(&options.allowed_slippage).raw;
        let path = AbiValue::AddressArray(trade.route.addresses());
        let to = address(&options.recipient);
        let deadline = AbiValue::Uint(U256::from(options.deadline));

        let (selector, args, value) = match (trade.trade_type, ether_in, ether_out) {
            (TradeType::ExactInput, true, _) => (
                hex!("7ff36ab5"),
                vec![AbiValue::Uint(amount_out), path, to, deadline],
                Some(amount_in),
            ),
            (TradeType::ExactInput, _, true) => (
                hex!("18cbafe5"),
                vec![AbiValue::Uint(amount_in), AbiValue::Uint(amount_out), path, to, deadline],
                None,
            ),
            (TradeType::ExactInput, _, _) => (
                hex!("38ed1739"),
                vec![AbiValue::Uint(amount_in), AbiValue::Uint(amount_out), path, to, deadline],
                None,
            ),
            (TradeType::ExactOutput, true, _) => (
                hex!("fb3bdb41"),
                vec![AbiValue::Uint(amount_out), path, to, deadline],
                Some(amount_in),
            ),
            (TradeType::ExactOutput, _, true) => (
                hex!("4a25d94a"),
                vec![AbiValue::Uint(amount_out), AbiValue::Uint(amount_in), path, to, deadline],
                None,
            ),
            (TradeType::ExactOutput, _, _) => (
                hex!("8803dbee"),
                vec![AbiValue::Uint(amount_out), AbiValue::Uint(amount_in), path, to, deadline],
                None,
            ),
        };

        let data = encode_call(selector, &args)?;
        Ok(transaction(from, &self.0, data, value))
    }

    pub fn add_liquidity(
        &self,
        from: &str,
        (token_a, amount_a_desired, amount_a_min): (&str, U256, U256),
        (token_b, amount_b_desired, amount_b_min): (&str, U256, U256),
        deadline: u64,
    ) -> Result<TransactionRequest, Error> {
        let data = encode_call(
            hex!("e8e33700"),
            &[
                address(token_a),
                address(token_b),
                AbiValue::Uint(amount_a_desired),
                AbiValue::Uint(amount_b_desired),
                AbiValue::Uint(amount_a_min),
                AbiValue::Uint(amount_b_min),
                address(from),
                AbiValue::Uint(U256::from(deadline)),
            ],
        )?;
        Ok(transaction(from, &self.0, data, None))
    }

    /// Pairs a token with the native currency, which is sent as value.
    pub fn add_liquidity_eth(
        &self,
        from: &str,
        (token, amount_token_desired, amount_token_min): (&str, U256, U256),
        (amount_eth_desired, amount_eth_min): (U256, U256),
        deadline: u64,
    ) -> Result<TransactionRequest, Error> {
        let data = encode_call(
            hex!("f305d719"),
            &[
                address(token),
                AbiValue::Uint(amount_token_desired),
                AbiValue::Uint(amount_token_min),
                AbiValue::Uint(amount_eth_min),
                address(from),
                AbiValue::Uint(U256::from(deadline)),
            ],
        )?;
        Ok(transaction(from, &self.0, data, Some(amount_eth_desired)))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PoolInfo {
    pub lp_token: String,
    pub alloc_point: U256,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserInfo {
    /// LP tokens staked.
    pub amount: U256,
    pub reward_debt: U256,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IMasterChef(pub String);

impl IMasterChef {
    pub async fn pool_length(&self, client: &impl EthCall) -> Result<u64, Error> {
        let data = encode_call(hex!("081e3eda"), &[])?;
        Ok(decode_uint(&client.call(&self.0, &data).await?, 0)?.as_u64())
    }

    pub async fn pool_info(&self, client: &impl EthCall, pid: u64) -> Result<PoolInfo, Error> {
        let data = encode_call(hex!("1526fe27"), &[AbiValue::Uint(U256::from(pid))])?;
        let response = client.call(&self.0, &data).await?;
        Ok(PoolInfo {
            lp_token: decode_address(&response, 0)?,
            alloc_point: decode_uint(&response, 1)?,
        })
    }

    pub async fn user_info(&self, client: &impl EthCall, pid: u64, user: &str) -> Result<UserInfo, Error> {
        let data = encode_call(
            hex!("93f1a40b"),
            &[AbiValue::Uint(U256::from(pid)), address(user)],
        )?;
        let response = client.call(&self.0, &data).await?;
        Ok(UserInfo {
            amount: decode_uint(&response, 0)?,
            reward_debt: decode_uint(&response, 1)?,
        })
    }

    pub async fn pending_sushi(&self, client: &impl EthCall, pid: u64, user: &str) -> Result<U256, Error> {
        let data = encode_call(
            hex!("195426ec"),
            &[AbiValue::Uint(U256::from(pid)), address(user)],
        )?;
        decode_uint(&client.call(&self.0, &data).await?, 0)
    }

    pub fn deposit(&self, from: &str, pid: u64, amount: U256) -> Result<TransactionRequest, Error> {
        let data = encode_call(
            hex!("e2bbb158"),
            &[AbiValue::Uint(U256::from(pid)), AbiValue::Uint(amount)],
        )?;
        Ok(transaction(from, &self.0, data, None))
    }

    pub fn withdraw(&self, from: &str, pid: u64, amount: U256) -> Result<TransactionRequest, Error> {
        let data = encode_call(
            hex!("441a3e70"),
            &[AbiValue::Uint(U256::from(pid)), AbiValue::Uint(amount)],
        )?;
        Ok(transaction(from, &self.0, data, None))
    }

    /// Claims pending rewards. The farm pays them out on any deposit, so this
    /// is a deposit of nothing.
    pub fn harvest(&self, from: &str, pid: u64) -> Result<TransactionRequest, Error> {
        self.deposit(from, pid, U256::ZERO)
    }
}
