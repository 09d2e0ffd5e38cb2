use leptos::{ev, html, prelude::*};
use lucide_leptos::{ChevronDown, Repeat};
use soku_core::{
    prices::{compute_trade_price_breakdown, warning_severity},
    CHAIN_ID,
};
use soku_sdk::{Percent, Price, Trade, TradeType};
use tracing::info;

/// Theme colour for a price impact severity.
pub fn severity_color(severity: u8) -> &'static str {
    match severity {
        0 => "var(--green1)",
        1 => "var(--text1)",
        2 => "var(--yellow2)",
        _ => "var(--red1)",
    }
}

pub fn format_price_impact(price_impact: &Percent) -> String {
    if price_impact.less_than(&Percent::from_bips(1)) {
        "<0.01%".to_string()
    } else {
        format!("{}%", price_impact.to_fixed(2))
    }
}

/// Symbols along the route, input first.
pub fn route_symbols(trade: &Trade) -> Vec<String> {
    let last = trade.route.path.len().saturating_sub(1);
    trade
        .route
        .path
        .iter()
        .enumerate()
        .map(|(index, token)| match index {
            0 => trade.route.input.symbol(CHAIN_ID),
            index if index == last => trade.route.output.symbol(CHAIN_ID),
            _ => token.symbol.clone(),
        })
        .collect()
}

/// The execution price, quoted either way round.
#[component]
pub fn TradePrice(#[prop(into)] price: Signal<Option<Price>>) -> impl IntoView {
    let (show_inverted, set_show_inverted) = signal(false);

    let text = move || {
        price.get().map(|price| {
            let base = price.base.symbol(CHAIN_ID);
            let quote = price.quote.symbol(CHAIN_ID);
            if show_inverted.get() {
                format!("{} {quote} per {base}", price.to_significant(6))
            } else {
                format!("{} {base} per {quote}", price.invert().to_significant(6))
            }
        })
    };

    view! {
        <div class="flex items-center gap-1 text-sm font-medium" style="color: var(--text2)">
            {text}
            <button
                class="flex items-center justify-center w-6 h-6 rounded-full border-0"
                style="background-color: var(--bg2)"
                on:click=move |ev: ev::MouseEvent| {
                    ev.stop_propagation();
                    set_show_inverted.update(|inverted| *inverted = !*inverted);
                }
            >
                <Repeat size=14 />
            </button>
        </div>
    }
}

#[component]
pub fn SwapDetails(
    #[prop(into)] trade: Signal<Option<Trade>>,
    #[prop(into)] allowed_slippage: Signal<Percent>,
    #[prop(into)] raw_slippage: Signal<u16>,
) -> impl IntoView {
    info!("rendering <SwapDetails/>");

    on_cleanup(move || {
        info!("cleaning up <SwapDetails/>");
    });

    let (expanded, set_expanded) = signal(false);
    let content_ref = NodeRef::<html::Div>::new();

    let toggle_expand = move |_: ev::MouseEvent| {
        if let Some(content) = content_ref.get() {
            let full_height = content.scroll_height();
            if expanded.get() {
                content.style(("height", format!("{full_height}px")));
                request_animation_frame(move || {
                    content.style(("height", "0px"));
                });
            } else {
                content.style(("height", "0px"));
                request_animation_frame(move || {
                    content.style(("height", format!("{full_height}px")));
                });
            }
        }
        set_expanded.update(|expanded| *expanded = !*expanded);
    };

    let breakdown = Memo::new(move |_| trade.get().map(|trade| compute_trade_price_breakdown(&trade)));
    let severity = Memo::new(move |_| {
        breakdown.with(|breakdown| {
            warning_severity(breakdown.as_ref().map(|breakdown| &breakdown.price_impact_without_fee))
        })
    });

    let limit = move || {
        trade.get().map(|trade| {
            let slippage = allowed_slippage.get();
            match trade.trade_type {
                TradeType::ExactInput => (
                    "Minimum received",
                    trade.minimum_amount_out(&slippage),
                ),
                TradeType::ExactOutput => ("Maximum sold", trade.maximum_amount_in(&slippage)),
            }
        })
    };

    let row = |label: &'static str, value: Signal<Option<String>>, style: Option<Signal<String>>| {
        view! {
            <div class="w-full flex flex-row justify-between text-sm">
                <p class="m-0" style="color: var(--text2)">{label}</p>
                <p class="m-0 font-semibold" style=move || style.map(|style| style.get()).unwrap_or_default()>
                    {move || value.get()}
                </p>
            </div>
        }
    };

    view! {
        <div class="flex flex-col w-full rounded-2xl box-border border border-solid" style="border-color: var(--bg3)">
            <div
                class="min-h-[40px] px-4 flex items-center justify-between cursor-pointer"
                on:click=toggle_expand
            >
                <TradePrice price=Signal::derive(move || trade.get().map(|trade| trade.execution_price)) />
                <div
                    class="flex items-center justify-center transition-transform"
                    class=("rotate-180", move || expanded.get())
                >
                    <ChevronDown size=20 />
                </div>
            </div>

            <div
                node_ref=content_ref
                class="transition-all ease-standard box-border overflow-hidden"
                class=(["opacity-0", "invisible", "h-0"], move || !expanded.get())
                class=(["opacity-100", "visible"], move || expanded.get())
            >
                <div class="w-full box-border p-4 pt-2 flex flex-col gap-2 items-center">
                    <div class="w-full flex flex-row justify-between text-sm">
                        <p class="m-0" style="color: var(--text2)">
                            {move || limit().map(|(label, _)| label)}
                        </p>
                        <p class="m-0 font-semibold">
                            {move || {
                                limit()
                                    .map(|(_, amount)| {
                                        format!(
                                            "{} {}",
                                            amount.to_significant(4),
                                            amount.currency.symbol(CHAIN_ID),
                                        )
                                    })
                            }}
                        </p>
                    </div>
                    {row(
                        "Price Impact",
                        Signal::derive(move || {
                            breakdown
                                .get()
                                .map(|breakdown| format_price_impact(&breakdown.price_impact_without_fee))
                        }),
                        Some(Signal::derive(move || format!("color: {}", severity_color(severity.get())))),
                    )}
                    {row(
                        "Liquidity Provider Fee",
                        Signal::derive(move || {
                            breakdown
                                .get()
                                .map(|breakdown| {
                                    let fee = breakdown.realized_lp_fee_amount;
                                    format!("{} {}", fee.to_significant(4), fee.currency.symbol(CHAIN_ID))
                                })
                        }),
                        None,
                    )}
                    <Show when=move || trade.with(|trade| trade.as_ref().is_some_and(|trade| trade.route.path.len() > 2))>
                        {row(
                            "Route",
                            Signal::derive(move || trade.get().map(|trade| route_symbols(&trade).join(" > "))),
                            None,
                        )}
                    </Show>
                    <Show when=move || raw_slippage.get() != soku_core::constants::INITIAL_ALLOWED_SLIPPAGE>
                        {row(
                            "Slippage Tolerance",
                            Signal::derive(move || Some(format!("{}%", allowed_slippage.get().to_fixed(2)))),
                            None,
                        )}
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethnum::U256;
    use pretty_assertions::assert_eq;
    use soku_sdk::{ChainId, Currency, CurrencyAmount, Pair, Route, Token};

    fn token(address: &str, symbol: &str) -> Token {
        Token::new(ChainId::Mainnet, address, 18, symbol, symbol)
    }

    fn pair(a: &Token, b: &Token) -> Pair {
        Pair::new(
            "0x00000000000000000000000000000000000000aa",
            (a.clone(), U256::new(1_000_000_000)),
            (b.clone(), U256::new(1_000_000_000)),
        )
        .unwrap()
    }

    #[test]
    fn test_route_symbols_use_native_symbol() {
        let weth = Token::wrapped_native(ChainId::Mainnet);
        let dai = token("0x6B175474E89094C44Da98b954EedeAC495271d0F", "DAI");
        let usdc = token("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USDC");
        let route = Route::new(
            vec![pair(&weth, &dai), pair(&dai, &usdc)],
            Currency::Native,
            Currency::Token(usdc),
        )
        .unwrap();
        let trade = Trade::exact_in(route, CurrencyAmount::native(U256::new(1_000))).unwrap();

        assert_eq!(route_symbols(&trade), vec!["ETH", "DAI", "USDC"]);
    }

    #[test]
    fn test_price_impact_formatting() {
        assert_eq!(format_price_impact(&Percent::ZERO), "<0.01%");
        assert_eq!(format_price_impact(&Percent::from_bips(123)), "1.23%");
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(severity_color(0), "var(--green1)");
        assert_eq!(severity_color(2), "var(--yellow2)");
        assert_eq!(severity_color(4), "var(--red1)");
    }
}
