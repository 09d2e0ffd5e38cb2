use crate::farm::Yield;
use leptos::prelude::{component, view};
use leptos_router::{components::Route, MatchNestedRoutes};
use leptos_router_macro::path;

#[component]
pub fn YieldRoutes() -> impl MatchNestedRoutes + Clone {
    view! {
        <Route path=path!("/sokuswap-leptos/yield") view=Yield/>
    }
    .into_inner()
}
