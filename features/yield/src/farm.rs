use crate::{state::FarmPool, InputGroup};
use leptos::{either::EitherOf3, prelude::*};
use leptos_meta::Title;
use leptos_router::{hooks::query_signal_with_options, NavigateOptions};
use soku_components::{Card, CardVariant, Spinner};
use soku_core::{
    constants::contracts::MASTERCHEF,
    support::{IPair, JsonRpcClient},
    utils::address_to_token,
    Endpoint, Error,
};
use tracing::{debug, info, warn};

async fn load_farm(url: &str, pid: u64) -> Result<FarmPool, Error> {
    let client = JsonRpcClient::new(url);
    let info = MASTERCHEF.pool_info(&client, pid).await?;
    let pair = IPair(info.lp_token.clone());
    let token0 = address_to_token(&client, &pair.token0(&client).await?).await?;
    let token1 = address_to_token(&client, &pair.token1(&client).await?).await?;
    debug!("farm {pid}: {}-{}", token0.symbol, token1.symbol);

    Ok(FarmPool::new(pid, &info.lp_token, token0, token1))
}

#[component]
pub fn Yield() -> impl IntoView {
    info!("rendering <Yield/>");

    on_cleanup(move || {
        info!("cleaning up <Yield/>");
    });

    let endpoint = use_context::<Endpoint>().expect("endpoint context missing!");

    let nav_options = NavigateOptions {
        scroll: false,
        ..Default::default()
    };
    let (pid, set_pid) = query_signal_with_options::<u64>("pid", nav_options);
    let pid = Memo::new(move |_| pid.get().unwrap_or_default());

    let pool_length = LocalResource::new(move || {
        let url = endpoint.get();
        async move {
            MASTERCHEF
                .pool_length(&JsonRpcClient::new(url))
                .await
                .inspect_err(|error| warn!("{error}"))
                .ok()
        }
    });

    let farm = LocalResource::new(move || {
        let url = endpoint.get();
        let pid = pid.get();
        async move { load_farm(url, pid).await.map_err(|error| error.to_string()) }
    });

    let pool_count = move || {
        pool_length.with(|length| {
            length
                .as_ref()
                .and_then(|length| length.as_ref().copied())
                .map(|length| format!("of {length}"))
        })
    };

    let content = move || {
        farm.with(|farm| match farm.as_ref().map(|farm| <Result<FarmPool, String> as Clone>::clone(farm)) {
            None => EitherOf3::A(view! {
                <div class="flex justify-center py-8">
                    <Spinner />
                </div>
            }),
            Some(Err(error)) => EitherOf3::B(view! {
                <Card variant=CardVariant::Yellow padding="12px">
                    {format!("Could not load farm {}: {error}", pid.get_untracked())}
                </Card>
            }),
            Some(Ok(pool)) => {
                let title = format!("{} SLP", pool.pair_symbol());
                EitherOf3::C(view! {
                    <h3 class="m-0 px-4" style="color: var(--text1)">{title}</h3>
                    <InputGroup pool />
                })
            }
        })
    };

    view! {
        <Title text="SokuSwap | Yield" />
        <div class="flex items-center justify-center pt-8">
            <div class="w-full max-w-[560px] rounded-3xl shadow-sm p-4" style="background-color: var(--bg1)">
                <div class="flex justify-between items-center pb-4">
                    <h2 class="m-0" style="color: var(--text1)">
                        "Yield"
                    </h2>
                    <label class="flex items-center gap-2 text-sm" style="color: var(--text2)">
                        "Pool"
                        <input
                            type="number"
                            min="0"
                            class="w-20 p-2 rounded border-0"
                            style="background-color: var(--bg2); color: var(--text1)"
                            prop:value=move || pid.get().to_string()
                            on:change=move |ev| {
                                if let Ok(pid) = event_target_value(&ev).parse::<u64>() {
                                    set_pid.set(Some(pid));
                                }
                            }
                        />
                        {pool_count}
                    </label>
                </div>
                {content}
            </div>
        </div>
    }
}
