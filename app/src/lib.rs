use codee::string::FromToStringCodec;
use leptos::{ev, prelude::*, task::spawn_local};
use leptos_meta::*;
use leptos_router::components::{Redirect, Route, Router, Routes, A};
use leptos_router_macro::path;
use leptos_use::storage::{use_local_storage_with_options, UseStorageOptions};
use lucide_leptos::{Moon, Power, Sun, Wallet};
use soku_components::{LoadingModal, ThemeProvider};
use soku_core::{
    constants::REWARD_TOKEN,
    state::{ChainId, Endpoint, TokenMap, UserSettings, WalletSignals},
    utils::{alert, shorten_address},
    wallet, Theme, BASE_URL, CHAIN_ID, NODE, TOKEN_MAP,
};
use soku_liquidity::LiquidityRoutes;
use soku_swap::SwapRoutes;
use soku_yield::YieldRoutes;
use tracing::{error, info};

#[component]
pub fn App() -> impl IntoView {
    info!("rendering <App/>");

    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Global Contexts

    let endpoint = Endpoint::new(NODE);
    let chain_id = ChainId::new(CHAIN_ID);
    let wallet = WalletSignals::new();

    provide_context(endpoint);
    provide_context(chain_id);
    provide_context(wallet);
    provide_context(TokenMap::new(TOKEN_MAP.clone()));
    provide_context(UserSettings::new());

    let (dark_mode, set_dark_mode, _) = use_local_storage_with_options::<bool, FromToStringCodec>(
        "user_dark_mode",
        UseStorageOptions::default().initial_value(false),
    );
    let theme = Signal::derive(move || Theme::new(dark_mode.get()));

    Effect::new(move |_| info!("Endpoint set to {}", endpoint.get()));
    Effect::new(move |_| info!("Chain ID set to {}", chain_id.get()));

    spawn_local(wallet::watch(wallet));

    on_cleanup(move || {
        info!("cleaning up <App/>");
    });

    // Actions

    let connect_action = Action::new_local(move |_: &()| async move {
        if let Err(error) = wallet::connect(wallet).await {
            error!("{error}");
            alert(error.to_string());
        }
    });

    // on:click handlers

    let connect = move |_: ev::MouseEvent| {
        connect_action.dispatch(());
    };
    let disconnect = move |_: ev::MouseEvent| wallet.disconnect();
    let toggle_theme = move |_: ev::MouseEvent| set_dark_mode.update(|dark| *dark = !*dark);

    let account = move || wallet.account.get().map(shorten_address);

    view! {
        <Title text="SokuSwap" />
        <ThemeProvider theme>
            <Router>
                <header class="z-40">
                    <div class="p-4 flex justify-between items-center">
                        <div class="flex flex-row items-center gap-4">
                            <div class="m-0 font-bold text-2xl cursor-default" style="color: var(--text1)">
                                "SokuSwap"
                            </div>
                            <div class="hidden sm:inline-flex">
                                <Nav />
                            </div>
                        </div>
                        <div class="flex gap-1 items-center">
                            <button
                                on:click=toggle_theme
                                class="p-2 border-none rounded-md"
                                style="background-color: var(--bg3); color: var(--text1)"
                            >
                                {move || {
                                    if dark_mode.get() {
                                        view! { <Sun size=16 /> }.into_any()
                                    } else {
                                        view! { <Moon size=16 /> }.into_any()
                                    }
                                }}
                            </button>
                            <Show
                                when=move || wallet.is_connected()
                                fallback=move || {
                                    view! {
                                        <button
                                            on:click=connect
                                            disabled=connect_action.pending()
                                            class="min-w-24 text-sm font-medium py-2 px-4 border-none rounded-md"
                                            style="background-color: var(--primary1); color: var(--white)"
                                        >
                                            <div class="h-6 flex flex-row items-center gap-2">
                                                <Wallet size=16 />
                                                "Connect Wallet"
                                            </div>
                                        </button>
                                    }
                                }
                            >
                                <button
                                    on:click=disconnect
                                    class="min-w-24 text-sm font-medium leading-none py-2 px-4 border-none rounded-md"
                                    class=("border-solid", move || wallet.wrong_network())
                                    style="background-color: var(--bg3); color: var(--text1)"
                                >
                                    <div class="h-6 flex flex-row items-center gap-2">
                                        <Power size=16 />
                                        {move || {
                                            if wallet.wrong_network() {
                                                "Wrong Network".to_string()
                                            } else {
                                                account().unwrap_or_default()
                                            }
                                        }}
                                    </div>
                                </button>
                            </Show>
                        </div>
                    </div>
                    <div class="sm:hidden block px-1 py-0.5">
                        <Nav />
                    </div>
                </header>
                <main class="flex-1 px-2.5 lg:px-8 py-3 overflow-x-auto">
                    <Routes fallback=|| "This page could not be found.">
                        <Route
                            path=path!("/sokuswap-leptos")
                            view=|| view! { <Redirect path="/sokuswap-leptos/swap" /> }
                        />
                        <SwapRoutes />
                        <LiquidityRoutes />
                        <YieldRoutes />
                    </Routes>
                </main>
                <LoadingModal
                    when=Signal::derive(move || connect_action.pending().get())
                    message="Requesting Connection".to_string()
                />
            </Router>
        </ThemeProvider>
    }
}

/// Default pair for the pool link: native and the reward token.
fn add_liquidity_href() -> String {
    format!("{BASE_URL}/add/{}/{}", CHAIN_ID.native_symbol(), REWARD_TOKEN.address)
}

#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="leading-tight flex flex-row items-center">
            <A
                href=format!("{BASE_URL}/swap")
                attr:class="px-3 py-1.5 no-underline leading-none"
                attr:style="color: var(--text2)"
            >
                "Swap"
            </A>
            <A
                href=add_liquidity_href()
                attr:class="px-3 py-1.5 no-underline leading-none"
                attr:style="color: var(--text2)"
            >
                "Pool"
            </A>
            <A
                href=format!("{BASE_URL}/yield")
                attr:class="px-3 py-1.5 no-underline leading-none"
                attr:style="color: var(--text2)"
            >
                "Yield"
            </A>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pool_link_pairs_native_with_reward_token() {
        assert_eq!(
            add_liquidity_href(),
            format!("/sokuswap-leptos/add/ETH/{}", REWARD_TOKEN.address)
        );
    }
}
