use crate::{
    state::WalletSignals,
    support::{IErc20, JsonRpcClient, TransactionReceipt},
    Error,
};
use ethnum::U256;
use injected::{Ethereum, TransactionRequest};
use leptos::prelude::*;
use tracing::{debug, info, warn};

/// Prompts the wallet for access and records the account and chain.
pub async fn connect(wallet: WalletSignals) -> Result<String, Error> {
    let ethereum = Ethereum::get()?;
    let accounts = ethereum.request_accounts().await?;
    let account = accounts
        .into_iter()
        .next()
        .ok_or_else(|| Error::Wallet("no accounts authorized".to_string()))?;
    let chain_id = ethereum.chain_id().await?;

    info!("connected {account} on chain {chain_id}");
    wallet.account.set(Some(account.clone()));
    wallet.chain_id.set(Some(chain_id));

    Ok(account)
}

/// Restores a previous connection without prompting, and follows account and
/// chain changes made in the wallet.
pub async fn watch(wallet: WalletSignals) {
    let Ok(ethereum) = Ethereum::get() else {
        debug!("no injected wallet");
        return;
    };

    ethereum.on_accounts_changed(move |accounts| {
        debug!("accounts changed: {accounts:?}");
        wallet.account.set(accounts.into_iter().next());
    });
    ethereum.on_chain_changed(move |chain_id| {
        debug!("chain changed: {chain_id}");
        wallet.chain_id.set(Some(chain_id));
    });

    match ethereum.accounts().await {
        Ok(accounts) => wallet.account.set(accounts.into_iter().next()),
        Err(error) => warn!("{error}"),
    }
    match ethereum.chain_id().await {
        Ok(chain_id) => wallet.chain_id.set(Some(chain_id)),
        Err(error) => warn!("{error}"),
    }
}

/// Hands the transaction to the wallet and returns its hash once broadcast.
pub async fn send_transaction(tx: &TransactionRequest) -> Result<String, Error> {
    let hash = Ethereum::get()?.send_transaction(tx).await?;
    info!("submitted {hash}");
    Ok(hash)
}

/// Sends the transaction and waits until it is mined.
pub async fn send_and_confirm(
    client: &JsonRpcClient,
    tx: &TransactionRequest,
) -> Result<TransactionReceipt, Error> {
    let hash = send_transaction(tx).await?;
    client.wait_for_receipt(&hash).await
}

/// Sends the transaction, waits until it is mined and returns its hash.
pub async fn execute(client: &JsonRpcClient, tx: &TransactionRequest) -> Result<String, Error> {
    let receipt = send_and_confirm(client, tx).await?;
    debug!("mined in block {:?}", receipt.block_number);
    Ok(receipt.transaction_hash)
}

/// Lets `spender` move any amount of `token` on behalf of `owner`.
pub async fn approve_max(
    client: &JsonRpcClient,
    owner: &str,
    token: &str,
    spender: &str,
) -> Result<String, Error> {
    let tx = IErc20(token.to_string()).approve(owner, spender, U256::MAX)?;
    execute(client, &tx).await
}
