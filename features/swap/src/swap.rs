use crate::{
    state::*,
    swap_details::SwapDetails,
    swap_settings::SwapSettings,
    ConfirmSwapModal,
};
use ethnum::U256;
use leptos::{
    either::{Either, EitherOf6},
    ev, html,
    prelude::*,
};
use leptos_meta::Title;
use leptos_router::{hooks::query_signal_with_options, NavigateOptions};
use lucide_leptos::{ArrowDown, Settings2};
use soku_components::{
    Button, ButtonVariant, Card, CardVariant, CurrencyInputPanel, Dots, LoadingModal, Text, TextKind,
};
use soku_core::{
    approval::approval_state,
    constants::{
        contracts::{ROUTER, ROUTER_ADDRESS, WETH},
        BASES_TO_CHECK_TRADES_AGAINST, CHAIN_ID,
    },
    prices::{compute_trade_price_breakdown, confirm_price_impact_without_fee, warning_severity},
    support::{all_currency_combinations, fetch_pairs, IErc20, JsonRpcClient, SwapOptions},
    utils::{alert, currency_balance, currency_from_param, currency_to_param, try_parse_amount, unix_now},
    wallet, ApprovalState, Endpoint, Error, Submission, UserSettings, WalletSignals,
};
use soku_sdk::{Currency, CurrencyAmount, Trade};
use tracing::{debug, error, info, warn};

async fn load_balance(client: &JsonRpcClient, account: &str, currency: Option<Currency>) -> Option<CurrencyAmount> {
    currency_balance(client, account, &currency?)
        .await
        .inspect_err(|error| warn!("{error}"))
        .ok()
}

async fn execute_swap(
    url: &str,
    account: Option<String>,
    trade: &Trade,
    options: &SwapOptions,
) -> Result<String, Error> {
    let account = account.ok_or(Error::WalletDisconnected)?;
    let tx = ROUTER.swap(&account, trade, options)?;
    debug!("{tx:#?}");
    wallet::execute(&JsonRpcClient::new(url), &tx).await
}

async fn execute_wrap(url: &str, account: Option<String>, wrap_type: WrapType, amount: U256) -> Result<String, Error> {
    let account = account.ok_or(Error::WalletDisconnected)?;
    let tx = match wrap_type {
        WrapType::Wrap => WETH.deposit(&account, amount)?,
        WrapType::Unwrap => WETH.withdraw(&account, amount)?,
        WrapType::NotApplicable => return Err(Error::generic("Nothing to wrap")),
    };
    wallet::execute(&JsonRpcClient::new(url), &tx).await
}

#[component]
pub fn Swap() -> impl IntoView {
    info!("rendering <Swap/>");

    on_cleanup(move || {
        info!("cleaning up <Swap/>");
    });

    let endpoint = use_context::<Endpoint>().expect("endpoint context missing!");
    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");
    let settings = use_context::<UserSettings>().expect("user settings context missing!");

    // prevents scrolling to the top of the page each time a query param changes
    let nav_options = NavigateOptions {
        scroll: false,
        ..Default::default()
    };

    let (input_param, set_input_param) =
        query_signal_with_options::<String>("inputCurrency", nav_options.clone());
    let (output_param, set_output_param) =
        query_signal_with_options::<String>("outputCurrency", nav_options);

    let input_currency =
        Memo::new(move |_| input_param.get().and_then(|param| currency_from_param(&param)));
    let output_currency =
        Memo::new(move |_| output_param.get().and_then(|param| currency_from_param(&param)));

    let form = RwSignal::new(SwapFormState::default());
    let page = RwSignal::new(SwapPageState::default());
    let approval_submitted = RwSignal::new(false);
    let approval_tx = RwSignal::new(TokenApprovals::default());
    let wrap_tx = RwSignal::new(Submission::<String>::default());
    // bumped after each mined transaction so balances and allowances reload
    let refresh = RwSignal::new(0u32);

    Effect::new(move |_| {
        input_currency.track();
        output_currency.track();
        approval_submitted.set(false);
    });

    // --

    let settings_dialog_ref = NodeRef::<html::Dialog>::new();

    let handle = window_event_listener(ev::keydown, move |ev| {
        if let Some(dialog) = settings_dialog_ref.get() {
            if ev.key() == "Escape" {
                dialog.close();
            }
        }
    });

    on_cleanup(move || handle.remove());

    let toggle_swap_settings = move |_: ev::MouseEvent| match settings_dialog_ref.get() {
        Some(dialog) => match dialog.open() {
            false => {
                _ = dialog.show();
            }
            true => {
                dialog.close();
            }
        },
        None => alert("Something is wrong!"),
    };

    // --

    let pairs = LocalResource::new(move || {
        let url = endpoint.get();
        let currencies = (input_currency.get(), output_currency.get());
        async move {
            let (Some(input), Some(output)) = currencies else {
                return Vec::new();
            };
            let combinations = all_currency_combinations(
                &input.wrapped(CHAIN_ID),
                &output.wrapped(CHAIN_ID),
                &BASES_TO_CHECK_TRADES_AGAINST,
            );
            fetch_pairs(&JsonRpcClient::new(url), &combinations).await
        }
    });

    let balances = LocalResource::new(move || {
        refresh.track();
        let url = endpoint.get();
        let account = wallet.account.get();
        let currencies = (input_currency.get(), output_currency.get());
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

    let input_balance =
        Signal::derive(move || balances.with(|balances| balances.as_ref().and_then(|b| b.0.clone())));
    let output_balance =
        Signal::derive(move || balances.with(|balances| balances.as_ref().and_then(|b| b.1.clone())));

    let wrap = Memo::new(move |_| {
        wrap_type(input_currency.get().as_ref(), output_currency.get().as_ref(), CHAIN_ID)
    });

    let parsed_amount = Memo::new(move |_| {
        form.with(|form| {
            let currency = match form.independent_field {
                Field::Input => input_currency.get(),
                Field::Output => output_currency.get(),
            }?;
            try_parse_amount(&form.typed_value, &currency)
        })
    });

    let trade = Memo::new(move |_| {
        if wrap.get() != WrapType::NotApplicable {
            return None;
        }
        let amount = parsed_amount.get()?;
        let field = form.with(|form| form.independent_field);
        let other = match field {
            Field::Input => output_currency.get()?,
            Field::Output => input_currency.get()?,
        };
        let single_hop_only = settings.single_hop_only.0.get();
        pairs.with(|pairs| {
            pairs
                .as_ref()
                .and_then(|pairs| best_trade(pairs, field, &amount, &other, single_hop_only))
        })
    });

    let allowed_slippage = Signal::derive(move || settings.allowed_slippage());

    let amount_to_approve = Memo::new(move |_| {
        trade.with(|trade| {
            trade
                .as_ref()
                .map(|trade| trade.maximum_amount_in(&allowed_slippage.get()))
        })
    });

    let allowance = LocalResource::new(move || {
        refresh.track();
        let url = endpoint.get();
        let account = wallet.account.get();
        let token = input_currency.get().and_then(|currency| currency.token().cloned());
        async move {
            let (Some(account), Some(token)) = (account, token) else {
                return None;
            };
            IErc20(token.address)
                .allowance(&JsonRpcClient::new(url), &account, ROUTER_ADDRESS)
                .await
                .inspect_err(|error| warn!("{error}"))
                .ok()
        }
    });

    let input_token = move || {
        input_currency.with(|currency| {
            currency
                .as_ref()
                .and_then(|currency| currency.token().map(|token| token.address.clone()))
        })
    };

    let approval = Memo::new(move |_| {
        let allowance = allowance.with(|allowance| {
            allowance
                .as_ref()
                .and_then(|allowance| allowance.as_ref().copied())
        });
        approval_state(
            amount_to_approve.get().as_ref(),
            allowance,
            input_token().is_some_and(|token| approval_tx.with(|txs| txs.is_pending(&token))),
        )
    });

    Effect::new(move |_| {
        if approval.get() == ApprovalState::Pending {
            approval_submitted.set(true);
        }
    });

    let input_error = Memo::new(move |_| {
        let amount_in = amount_to_approve.get();
        swap_input_error(
            wallet.is_connected(),
            (input_currency.get().as_ref(), output_currency.get().as_ref()),
            parsed_amount.get().as_ref(),
            input_balance.get().as_ref(),
            amount_in.as_ref(),
            CHAIN_ID,
        )
    });

    let wrap_error = Memo::new(move |_| {
        (wrap.get() != WrapType::NotApplicable)
            .then(|| wrap_input_error(parsed_amount.get().as_ref(), input_balance.get().as_ref(), CHAIN_ID))
            .flatten()
    });

    let severity = Memo::new(move |_| {
        trade.with(|trade| {
            let breakdown = trade.as_ref().map(compute_trade_price_breakdown);
            warning_severity(breakdown.as_ref().map(|breakdown| &breakdown.price_impact_without_fee))
        })
    });

    let action = Memo::new(move |_| {
        let unsupported = (input_param.with(Option::is_some) && input_currency.with(Option::is_none))
            || (output_param.with(Option::is_some) && output_currency.with(Option::is_none));
        let conditions = SwapConditions {
            unsupported,
            connected: wallet.is_connected(),
            wrap_type: wrap.get(),
            wrap_input_error: wrap_error.get(),
            has_route: trade.with(Option::is_some),
            user_has_specified_input_output: input_currency.with(Option::is_some)
                && output_currency.with(Option::is_some)
                && parsed_amount.with(Option::is_some),
            single_hop_only: settings.single_hop_only.0.get(),
            swap_input_error: input_error.get(),
            approval: approval.get(),
            approval_submitted: approval_submitted.get(),
            price_impact_severity: severity.get(),
            expert_mode: settings.expert_mode.0.get(),
            input_symbol: input_currency
                .get()
                .map(|currency| currency.symbol(CHAIN_ID))
                .unwrap_or_default(),
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

    let approve = Action::new_local(move |token: &String| {
        let token = token.clone();
        let url = endpoint.get_untracked();
        let account = wallet.account.get_untracked();
        async move {
            let result = match account {
                Some(account) => {
                    wallet::approve_max(&JsonRpcClient::new(url), &account, &token, ROUTER_ADDRESS).await
                }
                None => Err(Error::WalletDisconnected),
            };
            if let Err(error) = &result {
                error!("{error}");
                alert(error.to_string());
            }
            approval_tx.update(|txs| txs.resolve(&token, result));
            refresh.update(|n| *n += 1);
        }
    });

    let swap = Action::new_local(move |trade: &Trade| {
        let trade = trade.clone();
        let url = endpoint.get_untracked();
        let account = wallet.account.get_untracked();
        let options = SwapOptions {
            allowed_slippage: allowed_slippage.get_untracked(),
            deadline: unix_now() + settings.deadline.0.get_untracked(),
            recipient: account.clone().unwrap_or_default(),
        };
        async move {
            let result = execute_swap(url, account, &trade, &options).await;
            if let Err(error) = &result {
                error!("{error}");
            }
            let clear = page.try_update(|page| page.finish_swap(result)).unwrap_or(false);
            if clear {
                form.update(SwapFormState::clear);
            }
            refresh.update(|n| *n += 1);
        }
    });

    let wrap_action = Action::new_local(move |amount: &U256| {
        let amount = *amount;
        let wrap_type = wrap.get_untracked();
        let url = endpoint.get_untracked();
        let account = wallet.account.get_untracked();
        async move {
            let result = execute_wrap(url, account, wrap_type, amount).await;
            if let Err(error) = &result {
                error!("{error}");
                alert(error.to_string());
            } else {
                form.update(SwapFormState::clear);
            }
            wrap_tx.update(|tx| tx.resolve(result));
            refresh.update(|n| *n += 1);
        }
    });

    let on_approve = move |_: ev::MouseEvent| {
        let Some(token) = input_currency
            .get_untracked()
            .and_then(|currency| currency.token().map(|token| token.address.clone()))
        else {
            return;
        };
        if approval_tx.try_update(|txs| txs.begin(&token)).is_some_and(|began| began.is_ok()) {
            approve.dispatch(token);
        }
    };

    let on_wrap = move |_: ev::MouseEvent| {
        let Some(amount) = parsed_amount.get_untracked() else {
            return;
        };
        if wrap_tx.try_update(Submission::begin).is_some_and(|began| began.is_ok()) {
            wrap_action.dispatch(amount.raw);
        }
    };

    // executes the snapshot in the modal, or the live trade in expert mode
    let handle_swap = move || {
        let trade = if settings.expert_mode.0.get_untracked() {
            trade.get_untracked()
        } else {
            page.with_untracked(|page| page.trade_to_confirm.clone())
        };
        let Some(trade) = trade else {
            return;
        };
        let price_impact = compute_trade_price_breakdown(&trade).price_impact_without_fee;
        if !confirm_price_impact_without_fee(&price_impact) {
            return;
        }
        match page.try_update(|page| page.begin_swap()) {
            Some(Ok(())) => {
                swap.dispatch(trade);
            }
            Some(Err(error)) => warn!("{error}"),
            None => {}
        }
    };

    let on_swap_click = move |_: ev::MouseEvent| {
        if settings.expert_mode.0.get_untracked() {
            handle_swap();
        } else if let Some(trade) = trade.get_untracked() {
            page.update(|page| page.open_confirm(trade));
        }
    };

    let on_dismiss = move || {
        if page.try_update(SwapPageState::dismiss).unwrap_or(false) {
            form.update(SwapFormState::clear);
        }
    };

    let switch_currencies = move || {
        let input = input_param.get_untracked();
        let output = output_param.get_untracked();
        set_input_param.set(output);
        set_output_param.set(input);
        form.update(SwapFormState::switch);
    };

    let select_currency = move |field: Field, currency: Currency| {
        let other = match field {
            Field::Input => output_currency.get_untracked(),
            Field::Output => input_currency.get_untracked(),
        };
        if other.as_ref() == Some(&currency) {
            switch_currencies();
            return;
        }
        let param = Some(currency_to_param(&currency));
        match field {
            Field::Input => set_input_param.set(param),
            Field::Output => set_output_param.set(param),
        }
    };

    let formatted_amount = move |field: Field| {
        form.with(|form| {
            if form.independent_field == field || wrap.get() != WrapType::NotApplicable {
                return form.typed_value.clone();
            }
            trade.with(|trade| {
                trade
                    .as_ref()
                    .map(|trade| match field {
                        Field::Input => trade.input_amount.to_significant(6),
                        Field::Output => trade.output_amount.to_significant(6),
                    })
                    .unwrap_or_default()
            })
        })
    };

    let max_input = Memo::new(move |_| input_balance.get().map(|balance| max_amount_spend(&balance)));
    let show_max = Signal::derive(move || {
        max_input.with(|max| {
            max.as_ref().is_some_and(|max| {
                !max.is_zero() && parsed_amount.with(|parsed| parsed.as_ref() != Some(max))
            })
        })
    });
    let on_max = Callback::new(move |_: ()| {
        if let Some(max) = max_input.get_untracked() {
            form.update(|form| form.type_input(Field::Input, max.to_exact()));
        }
    });

    let call_to_action = move || match action.get() {
        SwapAction::UnsupportedAsset => EitherOf6::A(view! {
            <Button disabled=true on_click=|_| ()>
                "Unsupported Asset"
            </Button>
        }),
        SwapAction::ConnectWallet => EitherOf6::B(view! {
            <Button
                variant=ButtonVariant::Light
                on_click=move |_| {
                    connect.dispatch(());
                }
            >
                "Connect Wallet"
            </Button>
        }),
        SwapAction::Wrap(button) => EitherOf6::C(view! {
            <Button disabled=button.disabled on_click=on_wrap>
                {button.label}
            </Button>
        }),
        SwapAction::NoRoute { suggest_multi_hop } => EitherOf6::D(view! {
            <Card variant=CardVariant::Grey padding="12px" class="text-center">
                <Text kind=TextKind::Main>"Insufficient liquidity for this trade."</Text>
                {suggest_multi_hop
                    .then(|| view! { <Text kind=TextKind::Main>"Try enabling multi-hop trades."</Text> })}
            </Card>
        }),
        SwapAction::Approve { approve, swap } => EitherOf6::E(view! {
            <div class="flex justify-between gap-2">
                <Button
                    class="w-[48%]"
                    variant=if approve.confirmed { ButtonVariant::Confirmed } else { ButtonVariant::Primary }
                    disabled=approve.disabled
                    on_click=on_approve
                >
                    {if approve.pending {
                        Either::Left(view! { <Dots>{approve.label}</Dots> })
                    } else {
                        Either::Right(approve.label)
                    }}
                </Button>
                <Button
                    class="w-[48%]"
                    variant=if swap.error { ButtonVariant::Error } else { ButtonVariant::Primary }
                    disabled=swap.disabled
                    on_click=on_swap_click
                >
                    {swap.label}
                </Button>
            </div>
        }),
        SwapAction::Swap(button) => EitherOf6::F(view! {
            <Button
                variant=if button.error { ButtonVariant::Error } else { ButtonVariant::Primary }
                disabled=button.disabled
                on_click=on_swap_click
            >
                {button.label}
            </Button>
        }),
    };

    view! {
        <Title text="SokuSwap | Swap" />
        <LoadingModal
            when=Signal::derive(move || wrap_tx.with(Submission::is_pending))
            message=Signal::derive(move || match wrap.get() {
                WrapType::Unwrap => "Unwrapping...".to_string(),
                _ => "Wrapping...".to_string(),
            })
        />
        <ConfirmSwapModal
            state=page
            live_trade=trade
            allowed_slippage
            severity
            on_confirm=handle_swap
            on_dismiss
        />
        <div class="flex items-center justify-center pt-8">
            <div class="w-full max-w-[420px] rounded-3xl shadow-sm p-4" style="background-color: var(--bg1)">
                <div class="flex justify-between items-center pb-4">
                    <h2 class="m-0" style="color: var(--text1)">
                        "Swap"
                    </h2>
                    <div class="relative">
                        <button
                            on:click=toggle_swap_settings
                            class="inline-flex items-center justify-center ml-auto w-10 h-10 rounded-md border-0 bg-transparent"
                            style="color: var(--text2)"
                        >
                            <Settings2 size=16 />
                        </button>
                        <SwapSettings dialog_ref=settings_dialog_ref toggle_menu=toggle_swap_settings />
                    </div>
                </div>

                <div class="flex flex-col gap-2">
                    <CurrencyInputPanel
                        label=Signal::derive(move || {
                            let estimated = form.with(|form| form.independent_field == Field::Output)
                                && trade.with(Option::is_some);
                            if estimated { "From (estimated)" } else { "From" }.to_string()
                        })
                        value=Signal::derive(move || formatted_amount(Field::Input))
                        on_input=move |value| form.update(|form| form.type_input(Field::Input, value))
                        currency=input_currency
                        on_select=move |currency| select_currency(Field::Input, currency)
                        balance=input_balance
                        show_max
                        on_max
                    />
                    <div class="flex justify-center">
                        <button
                            type="button"
                            aria-label="change swap direction"
                            class="inline-flex items-center justify-center rounded-full border-0 w-8 h-8 p-0"
                            style="background-color: var(--bg2); color: var(--text2)"
                            on:click=move |_| switch_currencies()
                        >
                            <ArrowDown size=16 />
                        </button>
                    </div>
                    <CurrencyInputPanel
                        label="To".to_string()
                        value=Signal::derive(move || formatted_amount(Field::Output))
                        on_input=move |value| form.update(|form| form.type_input(Field::Output, value))
                        currency=output_currency
                        on_select=move |currency| select_currency(Field::Output, currency)
                        balance=output_balance
                    />

                    <Show when=move || trade.with(Option::is_some)>
                        <SwapDetails trade allowed_slippage raw_slippage=settings.slippage.0 />
                    </Show>

                    <Show when=move || wallet.wrong_network()>
                        <Card variant=CardVariant::Yellow padding="12px">
                            "Your wallet is connected to the wrong network."
                        </Card>
                    </Show>

                    <div class="pt-2">{call_to_action}</div>

                    {move || {
                        let message = settings
                            .expert_mode
                            .0
                            .get()
                            .then(|| page.with(|page| page.swap_error_message().map(str::to_string)))
                            .flatten();
                        message
                            .map(|message| {
                                view! {
                                    <p class="m-0 text-sm" style="color: var(--red1)">
                                        {message}
                                    </p>
                                }
                            })
                    }}
                </div>
            </div>
        </div>
    }
}
