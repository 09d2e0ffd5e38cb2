use crate::{state::SwapPageState, swap_details::TradePrice};
use leptos::{either::EitherOf4, ev, html::Dialog, prelude::*};
use lucide_leptos::{ArrowDown, TriangleAlert, X};
use soku_components::{Button, ButtonVariant, Dots, Spinner};
use soku_core::{prices::SEVERITY_WARN, utils::explorer_tx_link, CHAIN_ID};
use soku_sdk::{Percent, Trade, TradeType};
use std::sync::Arc;
use tracing::info;

fn summary(trade: &Trade) -> String {
    format!(
        "Swapping {} {} for {} {}",
        trade.input_amount.to_significant(6),
        trade.input_amount.currency.symbol(CHAIN_ID),
        trade.output_amount.to_significant(6),
        trade.output_amount.currency.symbol(CHAIN_ID),
    )
}

/// The note under the amounts. One side of the trade is only an estimate.
fn estimate_notice(trade: &Trade, allowed_slippage: &Percent) -> String {
    match trade.trade_type {
        TradeType::ExactInput => {
            let minimum = trade.minimum_amount_out(allowed_slippage);
            format!(
                "Output is estimated. You will receive at least {} {} or the transaction will revert.",
                minimum.to_significant(6),
                minimum.currency.symbol(CHAIN_ID),
            )
        }
        TradeType::ExactOutput => {
            let maximum = trade.maximum_amount_in(allowed_slippage);
            format!(
                "Input is estimated. You will sell at most {} {} or the transaction will revert.",
                maximum.to_significant(6),
                maximum.currency.symbol(CHAIN_ID),
            )
        }
    }
}

#[component]
pub fn ConfirmSwapModal(
    state: RwSignal<SwapPageState>,
    #[prop(into)] live_trade: Signal<Option<Trade>>,
    #[prop(into)] allowed_slippage: Signal<Percent>,
    #[prop(into)] severity: Signal<u8>,
    on_confirm: impl Fn() + Send + Sync + 'static,
    on_dismiss: impl Fn() + Send + Sync + 'static,
) -> impl IntoView {
    info!("rendering <ConfirmSwapModal/>");

    let dialog_ref = NodeRef::<Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if state.with(|state| state.show_confirm) {
                let _ = dialog.show_modal();
            } else {
                dialog.close();
            }
        }
    });

    let needs_acceptance = Memo::new(move |_| {
        live_trade.with(|live| state.with(|state| state.needs_acceptance(live.as_ref())))
    });

    let on_dismiss = Arc::new(on_dismiss);
    let on_confirm = Arc::new(on_confirm);

    // Escape closes a modal dialog natively; route it through dismiss instead
    let on_cancel = {
        let on_dismiss = on_dismiss.clone();
        move |ev: ev::Event| {
            ev.prevent_default();
            on_dismiss();
        }
    };

    let body = move || {
        let on_dismiss = on_dismiss.clone();
        let on_confirm = on_confirm.clone();
        let (snapshot, attempting, tx_hash, error) = state.with(|state| {
            (
                state.trade_to_confirm.clone(),
                state.attempting_txn(),
                state.tx_hash().map(str::to_string),
                state.swap_error_message().map(str::to_string),
            )
        });

        if attempting {
            let pending_text = snapshot.as_ref().map(summary).unwrap_or_default();
            return EitherOf4::A(view! {
                <div class="flex flex-col items-center gap-3 py-8">
                    <Spinner size="h-16 w-16" />
                    <p class="m-0 text-xl font-medium">
                        <Dots>"Waiting For Confirmation"</Dots>
                    </p>
                    <p class="m-0 text-sm font-semibold">{pending_text}</p>
                    <p class="m-0 text-xs" style="color: var(--text2)">
                        "Confirm this transaction in your wallet"
                    </p>
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
            <div class="flex flex-col gap-3">
                <div class="flex items-center justify-between">
                    <p class="m-0 text-xl font-medium">"Confirm Swap"</p>
                    <button
                        class="appearance-none border-0 bg-transparent"
                        on:click={
                            let on_dismiss = on_dismiss.clone();
                            move |_| on_dismiss()
                        }
                    >
                        <X size=20 />
                    </button>
                </div>
                {snapshot
                    .map(|trade| {
                        let input = trade.input_amount.clone();
                        let output = trade.output_amount.clone();
                        let notice = estimate_notice(&trade, &allowed_slippage.get_untracked());
                        let price = trade.execution_price.clone();
                        view! {
                            <div class="flex items-center justify-between text-2xl font-medium">
                                <span>{input.to_significant(6)}</span>
                                <span>{input.currency.symbol(CHAIN_ID)}</span>
                            </div>
                            <ArrowDown size=16 />
                            <div
                                class="flex items-center justify-between text-2xl font-medium"
                                style=move || {
                                    if severity.get() > SEVERITY_WARN { "color: var(--red1)" } else { "" }
                                }
                            >
                                <span>{output.to_significant(6)}</span>
                                <span>{output.currency.symbol(CHAIN_ID)}</span>
                            </div>
                            <Show when=move || needs_acceptance.get()>
                                <div
                                    class="flex items-center justify-between p-2 rounded-xl"
                                    style="background-color: var(--primary5); color: var(--primary1)"
                                >
                                    <span>"Price Updated"</span>
                                    <button
                                        class="px-4 py-2 rounded-xl border-0"
                                        style="background-color: var(--primary1); color: var(--white)"
                                        on:click=move |_| {
                                            state.update(|state| state.accept_changes(live_trade.get_untracked()))
                                        }
                                    >
                                        "Accept"
                                    </button>
                                </div>
                            </Show>
                            <p class="m-0 text-xs italic" style="color: var(--text2)">{notice}</p>
                            <TradePrice price=Signal::derive(move || Some(price.clone())) />
                        }
                    })}
                <Button
                    variant=Signal::derive(move || {
                        if severity.get() > SEVERITY_WARN { ButtonVariant::Error } else { ButtonVariant::Primary }
                    })
                    disabled=needs_acceptance
                    on_click=move |_| on_confirm()
                >
                    {move || if severity.get() > SEVERITY_WARN { "Swap Anyway" } else { "Confirm Swap" }}
                </Button>
            </div>
        })
    };

    view! {
        <dialog
            node_ref=dialog_ref
            class="w-[420px] p-4 rounded-2xl border-0"
            style="background-color: var(--modal-bg)"
            on:cancel=on_cancel
        >
            {body}
        </dialog>
    }
}
