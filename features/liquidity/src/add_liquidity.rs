use crate::{state::*, ConfirmAddModalBottom};
use ethnum::U256;
use leptos::{
    either::{Either, EitherOf4},
    ev,
    html::Dialog,
    prelude::*,
};
use leptos_meta::Title;
use leptos_router::hooks::{use_navigate, use_params_map};
use lucide_leptos::{Plus, TriangleAlert, X};
use soku_components::{
    Button, ButtonVariant, Card, CardVariant, CurrencyInputPanel, Dots, Spinner, Text, TextKind,
};
use soku_core::{
    approval::approval_state,
    constants::{contracts::ROUTER_ADDRESS, CHAIN_ID},
    support::{fetch_pair, IErc20, JsonRpcClient},
    utils::{alert, currency_balance, currency_from_param, currency_to_param, explorer_tx_link, unix_now},
    wallet, Endpoint, Error, Submission, UserSettings, WalletSignals, BASE_URL,
};
use soku_sdk::{pair::wrapped_tokens, Currency, CurrencyAmount, Pair};
use tracing::{debug, error, info, warn};

async fn load_balance(client: &JsonRpcClient, account: &str, currency: Option<Currency>) -> Option<CurrencyAmount> {
    currency_balance(client, account, &currency?)
        .await
        .inspect_err(|error| warn!("{error}"))
        .ok()
}

async fn load_allowance(client: &JsonRpcClient, account: &str, currency: Option<Currency>) -> Option<U256> {
    let token = currency?.token()?.address.clone();
    IErc20(token)
        .allowance(client, account, ROUTER_ADDRESS)
        .await
        .inspect_err(|error| warn!("{error}"))
        .ok()
}

/// The pair for the two currencies with its pool token supply, if it exists.
async fn load_pair(client: &JsonRpcClient, currency_a: &Currency, currency_b: &Currency) -> Option<(Pair, U256)> {
    let (token_a, token_b) = wrapped_tokens(CHAIN_ID, currency_a, currency_b).ok()?;
    let pair = fetch_pair(client, &token_a, &token_b)
        .await
        .inspect_err(|error| warn!("{error}"))
        .ok()??;
    let total_supply = IErc20(pair.address.clone())
        .total_supply(client)
        .await
        .inspect_err(|error| warn!("{error}"))
        .ok()?;
    Some((pair, total_supply))
}

#[component]
pub fn AddLiquidity() -> impl IntoView {
    info!("rendering <AddLiquidity/>");

    on_cleanup(move || {
        info!("cleaning up <AddLiquidity/>");
    });

    let endpoint = use_context::<Endpoint>().expect("endpoint context missing!");
    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");
    let settings = use_context::<UserSettings>().expect("user settings context missing!");

    let navigate = use_navigate();
    let params = use_params_map();
    let currency_a = Memo::new(move |_| {
        params
            .read()
            .get("currency_a")
            .and_then(|param| currency_from_param(&param))
    });
    let currency_b = Memo::new(move |_| {
        params
            .read()
            .get("currency_b")
            .and_then(|param| currency_from_param(&param))
    });

    let form = RwSignal::new(MintFormState::default());
    let page = RwSignal::new(AddPageState::default());
    let approve_a_tx = RwSignal::new(Submission::<String>::default());
    let approve_b_tx = RwSignal::new(Submission::<String>::default());
    let refresh = RwSignal::new(0u32);

    // --

    let pair_info = LocalResource::new(move || {
        refresh.track();
        let url = endpoint.get();
        let currencies = (currency_a.get(), currency_b.get());
        async move {
            let (Some(a), Some(b)) = currencies else {
                return None;
            };
            load_pair(&JsonRpcClient::new(url), &a, &b).await
        }
    });

    let pair = Memo::new(move |_| {
        pair_info.with(|info| info.as_ref().and_then(|info| info.as_ref().map(|(pair, _)| pair.clone())))
    });
    let total_supply = Memo::new(move |_| {
        pair_info.with(|info| info.as_ref().and_then(|info| info.as_ref().map(|(_, supply)| *supply)))
    });
    let no_liquidity = Memo::new(move |_| no_liquidity(pair.get().as_ref(), total_supply.get()));

    let balances = LocalResource::new(move || {
        refresh.track();
        let url = endpoint.get();
        let account = wallet.account.get();
        let currencies = (currency_a.get(), currency_b.get());
        async move {
            let Some(account) = account else {
                return (None, None);
            };
            let client = JsonRpcClient::new(url);
            (
                load_balance(&client, &account, currencies.0).await,
                load_balance(&client, &account, currencies.1).await,
            )
        }
    });
    let balance_a =
        Signal::derive(move || balances.with(|balances| balances.as_ref().and_then(|b| b.0.clone())));
    let balance_b =
        Signal::derive(move || balances.with(|balances| balances.as_ref().and_then(|b| b.1.clone())));

    let allowances = LocalResource::new(move || {
        refresh.track();
        let url = endpoint.get();
        let account = wallet.account.get();
        let currencies = (currency_a.get(), currency_b.get());
        async move {
            let Some(account) = account else {
                return (None, None);
            };
            let client = JsonRpcClient::new(url);
            (
                load_allowance(&client, &account, currencies.0).await,
                load_allowance(&client, &account, currencies.1).await,
            )
        }
    });

    let amounts = Memo::new(move |_| {
        form.with(|form| {
            parsed_amounts(
                form,
                (currency_a.get().as_ref(), currency_b.get().as_ref()),
                pair.get().as_ref(),
                no_liquidity.get(),
                CHAIN_ID,
            )
        })
    });

    let price = Memo::new(move |_| {
        let (amount_a, amount_b) = amounts.get();
        mint_price(
            pair.get().as_ref(),
            (amount_a.as_ref(), amount_b.as_ref()),
            currency_a.get().as_ref(),
            no_liquidity.get(),
            CHAIN_ID,
        )
    });

    let pool_share = Memo::new(move |_| {
        let (Some(pair), Some(total_supply)) = (pair.get(), total_supply.get()) else {
            return None;
        };
        let (Some(amount_a), Some(amount_b)) = amounts.get() else {
            return None;
        };
        let minted = liquidity_minted(&pair, total_supply, (&amount_a, &amount_b), CHAIN_ID)?;
        pool_token_percentage(&minted, total_supply)
    });

    let approval_a = Memo::new(move |_| {
        let allowance = allowances.with(|allowances| allowances.as_ref().and_then(|a| a.0));
        approval_state(amounts.get().0.as_ref(), allowance, approve_a_tx.with(Submission::is_pending))
    });
    let approval_b = Memo::new(move |_| {
        let allowance = allowances.with(|allowances| allowances.as_ref().and_then(|a| a.1));
        approval_state(amounts.get().1.as_ref(), allowance, approve_b_tx.with(Submission::is_pending))
    });

    let input_error = Memo::new(move |_| {
        let (amount_a, amount_b) = amounts.get();
        mint_input_error(
            wallet.is_connected(),
            (currency_a.get().as_ref(), currency_b.get().as_ref()),
            (amount_a.as_ref(), amount_b.as_ref()),
            (balance_a.get().as_ref(), balance_b.get().as_ref()),
            CHAIN_ID,
        )
    });

    let symbol = move |currency: Memo<Option<Currency>>| {
        currency
            .get()
            .map(|currency| currency.symbol(CHAIN_ID))
            .unwrap_or_default()
    };

    let action = Memo::new(move |_| {
        let conditions = MintConditions {
            connected: wallet.is_connected(),
            input_error: input_error.get(),
            has_amounts: amounts.with(|(a, b)| a.is_some() && b.is_some()),
            approval_a: approval_a.get(),
            approval_b: approval_b.get(),
            symbol_a: symbol(currency_a),
            symbol_b: symbol(currency_b),
        };
        debug!("{conditions:?}");
        evaluate(&conditions)
    });

    // --

    let connect = Action::new_local(move |_: &()| async move {
        if let Err(error) = wallet::connect(wallet).await {
            error!("{error}");
            alert(error.to_string());
        }
    });

    let approve = Action::new_local(move |field: &Field| {
        let field = *field;
        let (submission, currency) = match field {
            Field::CurrencyA => (approve_a_tx, currency_a.get_untracked()),
            Field::CurrencyB => (approve_b_tx, currency_b.get_untracked()),
        };
        let url = endpoint.get_untracked();
        let account = wallet.account.get_untracked();
        async move {
            let token = currency.and_then(|currency| currency.token().map(|token| token.address.clone()));
            let result = match (account, token) {
                (Some(account), Some(token)) => {
                    wallet::approve_max(&JsonRpcClient::new(url), &account, &token, ROUTER_ADDRESS).await
                }
                (None, _) => Err(Error::WalletDisconnected),
                (_, None) => Err(Error::generic("Nothing to approve")),
            };
            if let Err(error) = &result {
                error!("{error}");
                alert(error.to_string());
            }
            submission.update(|tx| tx.resolve(result));
            refresh.update(|n| *n += 1);
        }
    });

    let supply = Action::new_local(move |amounts: &(CurrencyAmount, CurrencyAmount)| {
        let (amount_a, amount_b) = amounts.clone();
        let url = endpoint.get_untracked();
        let account = wallet.account.get_untracked();
        let slippage = settings.slippage.0.get_untracked();
        let deadline = unix_now() + settings.deadline.0.get_untracked();
        let no_liquidity = no_liquidity.get_untracked();
        async move {
            let result = match account {
                Some(account) => {
                    match supply_transaction(&account, (&amount_a, &amount_b), slippage, no_liquidity, deadline) {
                        Ok(tx) => wallet::execute(&JsonRpcClient::new(url), &tx).await,
                        Err(error) => Err(error),
                    }
                }
                None => Err(Error::WalletDisconnected),
            };
            if let Err(error) = &result {
                error!("{error}");
            }
            if page.try_update(|page| page.finish_supply(result)).unwrap_or(false) {
                form.update(MintFormState::clear);
            }
            refresh.update(|n| *n += 1);
        }
    });

    let on_approve = move |field: Field| {
        let submission = match field {
            Field::CurrencyA => approve_a_tx,
            Field::CurrencyB => approve_b_tx,
        };
        if submission.try_update(Submission::begin).is_some_and(|began| began.is_ok()) {
            approve.dispatch(field);
        }
    };

    let on_add = move || {
        let (Some(amount_a), Some(amount_b)) = amounts.get_untracked() else {
            return;
        };
        match page.try_update(AddPageState::begin_supply) {
            Some(Ok(())) => {
                supply.dispatch((amount_a, amount_b));
            }
            Some(Err(error)) => warn!("{error}"),
            None => {}
        }
    };

    let on_supply_click = move |_: ev::MouseEvent| {
        if settings.expert_mode.0.get_untracked() {
            on_add();
        } else {
            page.update(AddPageState::open_confirm);
        }
    };

    let select_currency = move |field: Field, currency: Currency| {
        let (a, b) = (currency_a.get_untracked(), currency_b.get_untracked());
        let (a, b) = match field {
            Field::CurrencyA if b.as_ref() == Some(&currency) => (Some(currency), a),
            Field::CurrencyA => (Some(currency), b),
            Field::CurrencyB if a.as_ref() == Some(&currency) => (b, Some(currency)),
            Field::CurrencyB => (a, Some(currency)),
        };
        let param = |currency: Option<Currency>| currency.map(|c| currency_to_param(&c)).unwrap_or_default();
        navigate(
            &format!("{BASE_URL}/add/{}/{}", param(a), param(b)),
            Default::default(),
        );
    };
    let select_currency_a = {
        let select_currency = select_currency.clone();
        move |currency| select_currency(Field::CurrencyA, currency)
    };
    let select_currency_b = move |currency| select_currency(Field::CurrencyB, currency);

    let formatted_amount = move |field: Field| {
        form.with(|form| {
            if form.independent_field == field {
                return form.typed_value.clone();
            }
            if no_liquidity.get() {
                return form.other_typed_value.clone();
            }
            let (amount_a, amount_b) = amounts.get();
            match field {
                Field::CurrencyA => amount_a,
                Field::CurrencyB => amount_b,
            }
            .map(|amount| amount.to_significant(6))
            .unwrap_or_default()
        })
    };

    let max_for = move |balance: Signal<Option<CurrencyAmount>>, field: Field| {
        Callback::new(move |_: ()| {
            if let Some(balance) = balance.get_untracked() {
                let no_liquidity = no_liquidity.get_untracked();
                form.update(|form| form.type_input(field, balance.to_exact(), no_liquidity));
            }
        })
    };

    let show_max_for = move |balance: Signal<Option<CurrencyAmount>>, field: Field| {
        Signal::derive(move || {
            let parsed = amounts.with(|(a, b)| match field {
                Field::CurrencyA => a.clone(),
                Field::CurrencyB => b.clone(),
            });
            balance
                .get()
                .is_some_and(|balance| !balance.is_zero() && parsed.as_ref() != Some(&balance))
        })
    };

    // --

    let dialog_ref = NodeRef::<Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if page.with(|page| page.show_confirm) {
                let _ = dialog.show_modal();
            } else {
                dialog.close();
            }
        }
    });

    let on_dismiss = move || page.update(AddPageState::dismiss);

    let modal_header = move || {
        let pair_symbols = format!("{}/{}", symbol(currency_a), symbol(currency_b));
        if no_liquidity.get() {
            return Either::Left(view! {
                <p class="m-0 text-3xl font-medium">{pair_symbols}</p>
            });
        }
        let minted = pair.get().zip(total_supply.get()).and_then(|(pair, total_supply)| {
            let (amount_a, amount_b) = amounts.get();
            liquidity_minted(&pair, total_supply, (&amount_a?, &amount_b?), CHAIN_ID)
        });
        let slippage = settings.allowed_slippage().to_significant(4);
        Either::Right(view! {
            <p class="m-0 text-5xl font-medium">
                {minted.map(|minted| minted.to_significant(6)).unwrap_or_default()}
            </p>
            <p class="m-0 text-2xl">{format!("{pair_symbols} Pool Tokens")}</p>
            <p class="m-0 text-xs italic" style="color: var(--text2)">
                {format!(
                    "Output is estimated. If the price changes by more than {slippage}% your transaction will revert.",
                )}
            </p>
        })
    };

    let modal_body = move || {
        let (attempting, tx_hash, error) = page.with(|page| {
            (
                page.attempting_txn(),
                page.tx_hash().map(str::to_string),
                page.error_message().map(str::to_string),
            )
        });

        if attempting {
            let (amount_a, amount_b) = amounts.get_untracked();
            let pending_text = format!(
                "Supplying {} {} and {} {}",
                amount_a.map(|amount| amount.to_significant(6)).unwrap_or_default(),
                symbol(currency_a),
                amount_b.map(|amount| amount.to_significant(6)).unwrap_or_default(),
                symbol(currency_b),
            );
            return EitherOf4::A(view! {
                <div class="flex flex-col items-center gap-3 py-8">
                    <Spinner size="h-16 w-16" />
                    <p class="m-0 text-xl font-medium">
                        <Dots>"Waiting For Confirmation"</Dots>
                    </p>
                    <p class="m-0 text-sm font-semibold">{pending_text}</p>
                </div>
            });
        }

        if let Some(hash) = tx_hash {
            return EitherOf4::B(view! {
                <div class="flex flex-col items-center gap-3 py-8">
                    <p class="m-0 text-xl font-medium">"Transaction Submitted"</p>
                    <a href=explorer_tx_link(&hash) target="_blank" rel="noopener noreferrer">
                        "View on Etherscan"
                    </a>
                    <Button on_click=move |_| on_dismiss()>"Close"</Button>
                </div>
            });
        }

        if let Some(error) = error {
            return EitherOf4::C(view! {
                <div class="flex flex-col items-center gap-3 py-8">
                    <span style="color: var(--red1)">
                        <TriangleAlert size=64 />
                    </span>
                    <p class="m-0 text-center" style="color: var(--red1)">{error}</p>
                    <Button on_click=move |_| on_dismiss()>"Dismiss"</Button>
                </div>
            });
        }

        EitherOf4::D(view! {
            <div class="flex flex-col gap-4">
                <div class="flex items-center justify-between">
                    <p class="m-0 text-xl font-medium">
                        {move || if no_liquidity.get() { "You are creating a pool" } else { "You will receive" }}
                    </p>
                    <button class="appearance-none border-0 bg-transparent" on:click=move |_| on_dismiss()>
                        <X size=20 />
                    </button>
                </div>
                {modal_header}
                <ConfirmAddModalBottom
                    no_liquidity
                    price
                    currencies=Signal::derive(move || (currency_a.get(), currency_b.get()))
                    parsed_amounts=amounts
                    pool_token_percentage=pool_share
                    on_add
                />
            </div>
        })
    };

    // --

    let approve_button = move |button: Option<ApproveButton>, field: Field| {
        button.map(|button| {
            view! {
                <Button class="flex-1" disabled=button.disabled on_click=move |_| on_approve(field)>
                    {if button.pending {
                        Either::Left(view! { <Dots>{button.label}</Dots> })
                    } else {
                        Either::Right(button.label)
                    }}
                </Button>
            }
        })
    };

    let call_to_action = move || match action.get() {
        MintAction::ConnectWallet => Either::Left(view! {
            <Button
                variant=ButtonVariant::Light
                on_click=move |_| {
                    connect.dispatch(());
                }
            >
                "Connect Wallet"
            </Button>
        }),
        MintAction::Supply { approve_a, approve_b, supply } => Either::Right(view! {
            <div class="flex flex-col gap-2">
                <div class="flex justify-between gap-2">
                    {approve_button(approve_a, Field::CurrencyA)}
                    {approve_button(approve_b, Field::CurrencyB)}
                </div>
                <Button
                    variant=if supply.error { ButtonVariant::Error } else { ButtonVariant::Primary }
                    disabled=supply.disabled
                    on_click=on_supply_click
                >
                    {supply.label}
                </Button>
            </div>
        }),
    };

    view! {
        <Title text="SokuSwap | Add Liquidity" />
        <dialog
            node_ref=dialog_ref
            class="w-[420px] p-4 rounded-2xl border-0"
            style="background-color: var(--modal-bg)"
            on:cancel=move |ev: ev::Event| {
                ev.prevent_default();
                on_dismiss();
            }
        >
            {modal_body}
        </dialog>
        <div class="flex items-center justify-center pt-8">
            <div class="w-full max-w-[420px] rounded-3xl shadow-sm p-4" style="background-color: var(--bg1)">
                <h2 class="m-0 pb-4" style="color: var(--text1)">
                    "Add Liquidity"
                </h2>

                <div class="flex flex-col gap-2">
                    <Show when=move || no_liquidity.get()>
                        <Card variant=CardVariant::Blue padding="12px">
                            <Text kind=TextKind::Link>"You are the first liquidity provider."</Text>
                            <Text kind=TextKind::Link>
                                "The ratio of tokens you add will set the price of this pool."
                            </Text>
                        </Card>
                    </Show>
                    <CurrencyInputPanel
                        label="Input".to_string()
                        value=Signal::derive(move || formatted_amount(Field::CurrencyA))
                        on_input=move |value| {
                            let no_liquidity = no_liquidity.get_untracked();
                            form.update(|form| form.type_input(Field::CurrencyA, value, no_liquidity))
                        }
                        currency=currency_a
                        on_select=select_currency_a
                        balance=balance_a
                        show_max=show_max_for(balance_a, Field::CurrencyA)
                        on_max=max_for(balance_a, Field::CurrencyA)
                    />
                    <div class="flex justify-center" style="color: var(--text2)">
                        <Plus size=16 />
                    </div>
                    <CurrencyInputPanel
                        label="Input".to_string()
                        value=Signal::derive(move || formatted_amount(Field::CurrencyB))
                        on_input=move |value| {
                            let no_liquidity = no_liquidity.get_untracked();
                            form.update(|form| form.type_input(Field::CurrencyB, value, no_liquidity))
                        }
                        currency=currency_b
                        on_select=select_currency_b
                        balance=balance_b
                        show_max=show_max_for(balance_b, Field::CurrencyB)
                        on_max=max_for(balance_b, Field::CurrencyB)
                    />

                    {move || {
                        price
                            .get()
                            .map(|price| {
                                let share = if no_liquidity.get() {
                                    "100".to_string()
                                } else {
                                    pool_share
                                        .get()
                                        .map(|share| share.to_significant(4))
                                        .unwrap_or_else(|| "0".to_string())
                                };
                                view! {
                                    <Card variant=CardVariant::Outline padding="12px">
                                        <div class="flex justify-around text-center text-sm">
                                            <div>
                                                <p class="m-0 font-semibold">{price.to_significant(6)}</p>
                                                <p class="m-0" style="color: var(--text2)">
                                                    {format!("{} per {}", symbol(currency_b), symbol(currency_a))}
                                                </p>
                                            </div>
                                            <div>
                                                <p class="m-0 font-semibold">{price.invert().to_significant(6)}</p>
                                                <p class="m-0" style="color: var(--text2)">
                                                    {format!("{} per {}", symbol(currency_a), symbol(currency_b))}
                                                </p>
                                            </div>
                                            <div>
                                                <p class="m-0 font-semibold">{format!("{share}%")}</p>
                                                <p class="m-0" style="color: var(--text2)">"Share of Pool"</p>
                                            </div>
                                        </div>
                                    </Card>
                                }
                            })
                    }}

                    <Show when=move || wallet.wrong_network()>
                        <Card variant=CardVariant::Yellow padding="12px">
                            "Your wallet is connected to the wrong network."
                        </Card>
                    </Show>

                    <div class="pt-2">{call_to_action}</div>
                </div>
            </div>
        </div>
    }
}
