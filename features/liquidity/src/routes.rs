use crate::add_liquidity::AddLiquidity;
use leptos::prelude::{component, view};
use leptos_router::{components::Route, MatchNestedRoutes};
use leptos_router_macro::path;

#[component]
pub fn LiquidityRoutes() -> impl MatchNestedRoutes + Clone {
    view! {
        <Route path=path!("/sokuswap-leptos/add/:currency_a/:currency_b") view=AddLiquidity/>
    }
    .into_inner()
}
