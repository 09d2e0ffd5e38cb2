use leptos::{ev, prelude::*};
use soku_core::{
    utils::{currency_from_param, currency_to_param},
    CHAIN_ID, TOKEN_MAP,
};
use soku_sdk::{Currency, CurrencyAmount};
use tracing::debug;

/// Entries for the currency picker: the native currency first, then tokens by symbol.
pub fn currency_options() -> Vec<(String, String)> {
    let mut tokens: Vec<(String, String)> = TOKEN_MAP
        .values()
        .map(|token| (token.address.clone(), token.symbol.clone()))
        .collect();
    tokens.sort_by(|a, b| a.1.cmp(&b.1));

    let native = CHAIN_ID.native_symbol().to_string();
    std::iter::once((native.clone(), native)).chain(tokens).collect()
}

/// True if `value` could still become a number as the user keeps typing.
pub fn is_amount_input(value: &str) -> bool {
    let mut seen_separator = false;
    value.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_separator => {
            seen_separator = true;
            true
        }
        _ => false,
    })
}

/// An amount field with a currency picker and the wallet balance above it.
#[component]
pub fn CurrencyInputPanel(
    #[prop(into)] label: Signal<String>,
    #[prop(into)] value: Signal<String>,
    on_input: impl Fn(String) + 'static,
    #[prop(into)] currency: Signal<Option<Currency>>,
    on_select: impl Fn(Currency) + 'static,
    #[prop(optional, into)] balance: Signal<Option<CurrencyAmount>>,
    #[prop(optional, into)] show_max: Signal<bool>,
    #[prop(optional, into)] on_max: Option<Callback<()>>,
) -> impl IntoView {
    let selected = move || currency.get().map(|currency| currency_to_param(&currency)).unwrap_or_default();

    view! {
        <div class="space-y-2 p-4 rounded-2xl border border-solid" style="border-color: var(--bg2)">
            <div class="flex items-center justify-between text-sm" style="color: var(--text2)">
                <span>{move || label.get()}</span>
                <span>
                    {move || {
                        balance
                            .get()
                            .map(|balance| format!("Balance: {}", balance.to_significant(6)))
                    }}
                </span>
            </div>
            <div class="flex justify-between items-center gap-2 h-9">
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="0.0"
                    autocomplete="off"
                    class="px-3 py-1 w-full text-xl rounded-md font-normal bg-transparent border-none outline-none"
                    prop:value=move || value.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev).replace(',', ".");
                        if is_amount_input(&value) {
                            on_input(value);
                        }
                    }
                />
                {on_max
                    .map(|on_max| {
                        view! {
                            <Show when=move || show_max.get()>
                                <button
                                    class="h-7 px-2 rounded-lg text-sm font-medium border border-solid"
                                    style="background-color: var(--primary5); border-color: var(--primary5); color: var(--primary-text1)"
                                    on:click=move |_: ev::MouseEvent| on_max.run(())
                                >
                                    "MAX"
                                </button>
                            </Show>
                        }
                    })}
                <select
                    class="w-[135px] font-medium py-2 px-4 rounded-xl"
                    style="background-color: var(--bg1)"
                    title="Select a token"
                    prop:value=selected
                    on:change=move |ev| {
                        let param = event_target_value(&ev);
                        debug!("selected {param}");
                        if let Some(currency) = currency_from_param(&param) {
                            on_select(currency);
                        }
                    }
                >
                    <option value="" disabled selected=move || currency.with(Option::is_none)>
                        "Select a token"
                    </option>
                    {currency_options()
                        .into_iter()
                        .map(|(param, symbol)| view! { <option value=param>{symbol}</option> })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_amount_input_filter() {
        assert!(is_amount_input(""));
        assert!(is_amount_input("12."));
        assert!(is_amount_input(".5"));
        assert!(!is_amount_input("1.2.3"));
        assert!(!is_amount_input("-1"));
        assert!(!is_amount_input("1e5"));
    }

    #[test]
    fn test_native_currency_listed_first() {
        let options = currency_options();
        assert_eq!(options[0], ("ETH".to_string(), "ETH".to_string()));
    }
}
