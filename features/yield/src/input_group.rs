use crate::state::*;
use ethnum::U256;
use leptos::{
    either::{Either, EitherOf3},
    ev,
    prelude::*,
};
use leptos_router::components::A;
use soku_components::{Button, ButtonVariant, Dots};
use soku_core::{
    approval::approval_state,
    constants::{
        contracts::{MASTERCHEF, MASTERCHEF_ADDRESS},
        REWARD_TOKEN, SUSHI_SYMBOL,
    },
    support::{IErc20, JsonRpcClient},
    utils::{alert, parse_token_amount},
    wallet, Endpoint, Error, Submission, WalletSignals,
};
use soku_sdk::{Currency, CurrencyAmount};
use tracing::{debug, error, info, warn};

/// Balances the panel is bounded by, read for one account.
#[derive(Debug, Clone, Default, PartialEq)]
struct FarmBalances {
    wallet: Option<U256>,
    staked: Option<U256>,
    pending_reward: Option<U256>,
    allowance: Option<U256>,
}

async fn load_balances(url: &str, pool: &FarmPool, account: &str) -> FarmBalances {
    let client = JsonRpcClient::new(url);
    let lp = IErc20(pool.lp_token.address.clone());
    let log = |error: &Error| warn!("{error}");

    FarmBalances {
        wallet: lp.balance_of(&client, account).await.inspect_err(log).ok(),
        staked: MASTERCHEF
            .user_info(&client, pool.pid, account)
            .await
            .inspect_err(log)
            .ok()
            .map(|info| info.amount),
        pending_reward: MASTERCHEF
            .pending_sushi(&client, pool.pid, account)
            .await
            .inspect_err(log)
            .ok(),
        allowance: lp.allowance(&client, account, MASTERCHEF_ADDRESS).await.inspect_err(log).ok(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FarmTx {
    Deposit(U256),
    Withdraw(U256),
    Harvest,
}

async fn execute_farm_tx(url: &str, account: Option<String>, pid: u64, tx: FarmTx) -> Result<String, Error> {
    let account = account.ok_or(Error::WalletDisconnected)?;
    let request = match tx {
        FarmTx::Deposit(amount) => MASTERCHEF.deposit(&account, pid, amount)?,
        FarmTx::Withdraw(amount) => MASTERCHEF.withdraw(&account, pid, amount)?,
        FarmTx::Harvest => MASTERCHEF.harvest(&account, pid)?,
    };
    debug!("{tx:?}");
    wallet::execute(&JsonRpcClient::new(url), &request).await
}

/// Deposit, withdraw and harvest for one farm.
///
/// All three share one submission, so only one can be in flight.
#[component]
pub fn InputGroup(pool: FarmPool) -> impl IntoView {
    info!("rendering <InputGroup/>");

    on_cleanup(move || {
        info!("cleaning up <InputGroup/>");
    });

    let endpoint = use_context::<Endpoint>().expect("endpoint context missing!");
    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");

    let state = RwSignal::new(InputGroupState::default());
    let approve_tx = RwSignal::new(Submission::<String>::default());
    let refresh = RwSignal::new(0u32);

    let pool = StoredValue::new(pool);
    let lp_currency = move || Currency::Token(pool.with_value(|pool| pool.lp_token.clone()));

    let balances = LocalResource::new(move || {
        refresh.track();
        let url = endpoint.get();
        let account = wallet.account.get();
        let pool = pool.get_value();
        async move {
            match account {
                Some(account) => load_balances(url, &pool, &account).await,
                None => FarmBalances::default(),
            }
        }
    });

    let read = move |pick: fn(&FarmBalances) -> Option<U256>| {
        balances.with(|balances| balances.as_ref().and_then(|balances| pick(balances)))
    };

    let balance = Memo::new(move |_| read(|b| b.wallet).map(|raw| CurrencyAmount::new(lp_currency(), raw)));
    let staked = Memo::new(move |_| read(|b| b.staked).map(|raw| CurrencyAmount::new(lp_currency(), raw)));
    let pending_reward = Memo::new(move |_| {
        read(|b| b.pending_reward).map(|raw| CurrencyAmount::from_token(REWARD_TOKEN.clone(), raw))
    });

    // approval is for the whole balance, now and later
    let approval = Memo::new(move |_| {
        let unlimited = CurrencyAmount::new(lp_currency(), U256::MAX);
        approval_state(
            Some(&unlimited),
            read(|b| b.allowance),
            approve_tx.with(Submission::is_pending),
        )
    });

    // --

    let approve = Action::new_local(move |_: &()| {
        let url = endpoint.get_untracked();
        let account = wallet.account.get_untracked();
        let lp = pool.with_value(|pool| pool.lp_token.address.clone());
        async move {
            let result = match account {
                Some(account) => {
                    wallet::approve_max(&JsonRpcClient::new(url), &account, &lp, MASTERCHEF_ADDRESS).await
                }
                None => Err(Error::WalletDisconnected),
            };
            if let Err(error) = &result {
                error!("{error}");
                alert(error.to_string());
            }
            approve_tx.update(|tx| tx.resolve(result));
            refresh.update(|n| *n += 1);
        }
    });

    let submit = Action::new_local(move |tx: &FarmTx| {
        let tx = *tx;
        let url = endpoint.get_untracked();
        let account = wallet.account.get_untracked();
        let pid = pool.with_value(|pool| pool.pid);
        async move {
            let result = execute_farm_tx(url, account, pid, tx).await;
            if let Err(error) = &result {
                error!("{error}");
                alert(error.to_string());
            }
            state.update(|state| state.finish(result));
            refresh.update(|n| *n += 1);
        }
    });

    let dispatch = move |tx: FarmTx| {
        match state.try_update(InputGroupState::begin) {
            Some(Ok(())) => {
                submit.dispatch(tx);
            }
            Some(Err(error)) => warn!("{error}"),
            None => {}
        }
    };

    let parse = move |value: String| parse_token_amount(value, pool.with_value(|pool| pool.lp_token.decimals));

    let on_deposit = move |_: ev::MouseEvent| match parse(state.with_untracked(|state| state.deposit_value.clone())) {
        Ok(amount) => dispatch(FarmTx::Deposit(amount)),
        Err(error) => warn!("{error}"),
    };
    let on_withdraw = move |_: ev::MouseEvent| match parse(state.with_untracked(|state| state.withdraw_value.clone())) {
        Ok(amount) => dispatch(FarmTx::Withdraw(amount)),
        Err(error) => warn!("{error}"),
    };

    let on_approve = move |_: ev::MouseEvent| {
        if approve_tx.try_update(Submission::begin).is_some_and(|began| began.is_ok()) {
            approve.dispatch(());
        }
    };

    // --

    let symbol = pool.with_value(|pool| pool.pair_symbol().to_string());
    let add_liquidity_path = pool.with_value(FarmPool::add_liquidity_path);

    let amount_field = move |value: Signal<String>,
                             set_value: Box<dyn Fn(String) + Send + Sync>,
                             on_max: Box<dyn Fn() + Send + Sync>| {
        view! {
            <div class="flex items-center relative w-full mb-4">
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="0.0"
                    autocomplete="off"
                    class="w-full p-3 rounded border-0"
                    style="background-color: var(--bg2); color: var(--text1)"
                    prop:value=move || value.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev).replace(',', ".");
                        if value.chars().all(|c| c.is_ascii_digit() || c == '.') {
                            set_value(value);
                        }
                    }
                />
                <button
                    class="absolute right-4 px-2 py-1 rounded text-sm border-0"
                    class=("hidden", move || !wallet.is_connected())
                    style="background-color: transparent; color: var(--primary1)"
                    on:click=move |_| on_max()
                >
                    "MAX"
                </button>
            </div>
        }
    };

    let panel = move || match panel_mode(approval.get()) {
        PanelMode::Loading => EitherOf3::A(()),
        PanelMode::Approve { pending } => EitherOf3::B(view! {
            <div class="px-4">
                <Button disabled=pending on_click=on_approve>
                    {if pending { Either::Left(view! { <Dots>"Approving "</Dots> }) } else { Either::Right("Approve") }}
                </Button>
            </div>
        }),
        PanelMode::Manage => {
            let symbol_deposit = symbol.clone();
            let symbol_withdraw = symbol.clone();
            EitherOf3::C(view! {
                <div class="grid gap-4 grid-cols-2 px-4">
                    <div class="text-center col-span-2 md:col-span-1">
                        <Show when=move || wallet.is_connected()>
                            <div class="text-sm text-right mb-2 pr-4" style="color: var(--text2)">
                                {
                                    let symbol = symbol_deposit.clone();
                                    move || {
                                        format!(
                                            "Wallet Balance: {} {symbol}",
                                            balance.get().map(|balance| balance.to_significant(6)).unwrap_or_default(),
                                        )
                                    }
                                }
                            </div>
                        </Show>
                        {amount_field(
                            Signal::derive(move || state.with(|state| state.deposit_value.clone())),
                            Box::new(move |value| state.update(|state| state.deposit_value = value)),
                            Box::new(move || {
                                if let Some(balance) = balance.get_untracked() {
                                    state.update(|state| state.max_deposit(&balance));
                                }
                            }),
                        )}
                        <Button
                            disabled=Signal::derive(move || {
                                balance.with(|balance| state.with(|state| state.deposit_disabled(balance.as_ref())))
                            })
                            on_click=on_deposit
                        >
                            "Deposit"
                        </Button>
                    </div>
                    <div class="text-center col-span-2 md:col-span-1">
                        <Show when=move || wallet.is_connected()>
                            <div class="text-sm text-right mb-2 pr-4" style="color: var(--text2)">
                                {
                                    let symbol = symbol_withdraw.clone();
                                    move || {
                                        format!(
                                            "Deposited: {} {symbol}",
                                            staked.get().map(|staked| staked.to_significant(6)).unwrap_or_default(),
                                        )
                                    }
                                }
                            </div>
                        </Show>
                        {amount_field(
                            Signal::derive(move || state.with(|state| state.withdraw_value.clone())),
                            Box::new(move |value| state.update(|state| state.withdraw_value = value)),
                            Box::new(move || {
                                if let Some(staked) = staked.get_untracked() {
                                    state.update(|state| state.max_withdraw(&staked));
                                }
                            }),
                        )}
                        <Button
                            variant=ButtonVariant::Error
                            disabled=Signal::derive(move || {
                                staked.with(|staked| state.with(|state| state.withdraw_disabled(staked.as_ref())))
                            })
                            on_click=on_withdraw
                        >
                            "Withdraw"
                        </Button>
                    </div>
                </div>
            })
        }
    };

    let harvest = move || {
        pending_reward.with(|reward| harvest_label(reward.as_ref(), SUSHI_SYMBOL)).map(|label| {
            view! {
                <div class="px-4">
                    <Button
                        variant=ButtonVariant::Outlined
                        disabled=Signal::derive(move || state.with(InputGroupState::is_pending))
                        on_click=move |_| dispatch(FarmTx::Harvest)
                    >
                        {label}
                    </Button>
                </div>
            }
        })
    };

    view! {
        <div class="flex flex-col space-y-4 py-6">
            <div class="grid gap-4 grid-cols-1 sm:grid-cols-2 px-4">
                <A href=add_liquidity_path>
                    <Button variant=ButtonVariant::Outlined on_click=|_| ()>
                        "Add Liquidity"
                    </Button>
                </A>
            </div>
            {panel}
            {harvest}
            {move || {
                state
                    .with(|state| state.pending.error().map(str::to_string))
                    .map(|error| {
                        view! {
                            <p class="m-0 px-4 text-sm" style="color: var(--red1)">
                                {error}
                            </p>
                        }
                    })
            }}
        </div>
    }
}
