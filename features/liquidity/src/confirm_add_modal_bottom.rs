use leptos::prelude::*;
use soku_components::{Button, ButtonVariant, Text, TextKind};
use soku_core::CHAIN_ID;
use soku_sdk::{Currency, CurrencyAmount, Percent, Price};

/// The rows of the deposit summary, label first.
pub fn summary_rows(
    no_liquidity: bool,
    price: Option<&Price>,
    (currency_a, currency_b): (Option<&Currency>, Option<&Currency>),
    (amount_a, amount_b): (Option<&CurrencyAmount>, Option<&CurrencyAmount>),
    pool_token_percentage: Option<&Percent>,
) -> Vec<(String, String)> {
    let symbol_a = currency_a.map(|currency| currency.symbol(CHAIN_ID)).unwrap_or_default();
    let symbol_b = currency_b.map(|currency| currency.symbol(CHAIN_ID)).unwrap_or_default();
    let significant = |amount: Option<&CurrencyAmount>| {
        amount.map(|amount| amount.to_significant(6)).unwrap_or_default()
    };
    let rate = price.map(|price| price.to_significant(4)).unwrap_or_default();
    let inverted = price.map(|price| price.invert().to_significant(4)).unwrap_or_default();
    let share = if no_liquidity {
        "100".to_string()
    } else {
        pool_token_percentage
            .map(|share| share.to_significant(4))
            .unwrap_or_default()
    };

    vec![
        (format!("{symbol_a} Deposited"), significant(amount_a)),
        (format!("{symbol_b} Deposited"), significant(amount_b)),
        ("Rates".to_string(), format!("1 {symbol_a} = {rate} {symbol_b}")),
        (String::new(), format!("1 {symbol_b} = {inverted} {symbol_a}")),
        ("Share of Pool:".to_string(), format!("{share}%")),
    ]
}

#[component]
pub fn ConfirmAddModalBottom(
    #[prop(into)] no_liquidity: Signal<bool>,
    #[prop(into)] price: Signal<Option<Price>>,
    #[prop(into)] currencies: Signal<(Option<Currency>, Option<Currency>)>,
    #[prop(into)] parsed_amounts: Signal<(Option<CurrencyAmount>, Option<CurrencyAmount>)>,
    #[prop(into)] pool_token_percentage: Signal<Option<Percent>>,
    on_add: impl Fn() + 'static,
) -> impl IntoView {
    let rows = move || {
        let (currency_a, currency_b) = currencies.get();
        let (amount_a, amount_b) = parsed_amounts.get();
        summary_rows(
            no_liquidity.get(),
            price.get().as_ref(),
            (currency_a.as_ref(), currency_b.as_ref()),
            (amount_a.as_ref(), amount_b.as_ref()),
            pool_token_percentage.get().as_ref(),
        )
        .into_iter()
        .map(|(label, value)| {
            let continued = label.is_empty();
            view! {
                <div class="flex items-center justify-between" class=("justify-end", continued)>
                    <Text kind=TextKind::Body>{label}</Text>
                    <Text kind=TextKind::Body>{value}</Text>
                </div>
            }
        })
        .collect_view()
    };

    view! {
        <div class="flex flex-col gap-2">
            {rows}
            <div class="mt-5">
                <Button variant=ButtonVariant::Light on_click=move |_| on_add()>
                    <span class="text-xl font-medium">
                        {move || if no_liquidity.get() { "Create Pool & Supply" } else { "Confirm Supply" }}
                    </span>
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethnum::U256;
    use pretty_assertions::assert_eq;
    use soku_sdk::{ChainId, Token};

    const ONE: u128 = 1_000_000_000_000_000_000;

    fn dai() -> Token {
        Token::new(
            ChainId::Mainnet,
            "0x6B175474E89094C44Da98b954EedeAC495271d0F",
            18,
            "DAI",
            "Dai Stablecoin",
        )
    }

    #[test]
    fn test_new_pool_summary() {
        let eth = CurrencyAmount::native(U256::new(ONE));
        let dai_amount = CurrencyAmount::from_token(dai(), U256::new(1_234_567_890 * ONE / 1_000));
        let price = Price::from_amounts(&eth, &dai_amount);

        let rows = summary_rows(
            true,
            Some(&price),
            (Some(&Currency::Native), Some(&Currency::Token(dai()))),
            (Some(&eth), Some(&dai_amount)),
            None,
        );

        assert_eq!(
            rows,
            vec![
                ("ETH Deposited".to_string(), "1".to_string()),
                ("DAI Deposited".to_string(), "1234560".to_string()),
                ("Rates".to_string(), "1 ETH = 1235000 DAI".to_string()),
                (String::new(), "1 DAI = 0.00000081 ETH".to_string()),
                ("Share of Pool:".to_string(), "100%".to_string()),
            ]
        );
    }

    #[test]
    fn test_existing_pool_share() {
        let rows = summary_rows(
            false,
            None,
            (Some(&Currency::Native), Some(&Currency::Token(dai()))),
            (None, None),
            Some(&Percent::new(1u128, 3u128)),
        );

        assert_eq!(rows[4], ("Share of Pool:".to_string(), "33.33%".to_string()));
    }
}
