use leptos::{ev, html, prelude::*};
use lucide_leptos::X;
use soku_components::TransactionSettings;
use soku_core::{utils::prompt, UserSettings};
use tracing::{debug, info};

/// Typing this into the prompt is the only way to turn expert mode on.
const EXPERT_MODE_CONFIRMATION: &str = "confirm";

#[component]
pub fn SwapSettings(
    dialog_ref: NodeRef<html::Dialog>,
    toggle_menu: impl Fn(ev::MouseEvent) + 'static,
) -> impl IntoView {
    info!("rendering <SwapSettings/>");

    let settings = use_context::<UserSettings>().expect("user settings context missing!");
    let (expert_mode, set_expert_mode) = settings.expert_mode;
    let (single_hop_only, set_single_hop_only) = settings.single_hop_only;

    let toggle_expert_mode = move |_| {
        if expert_mode.get_untracked() {
            set_expert_mode.set(false);
            return;
        }
        let answer = prompt(
            "Please type the word \"confirm\" to enable expert mode. Expert mode turns off the confirm transaction prompt and allows high slippage trades that often result in bad rates and lost funds.",
        );
        if answer.as_deref() == Some(EXPERT_MODE_CONFIRMATION) {
            debug!("expert mode on");
            set_expert_mode.set(true);
        }
    };

    let toggle = move |label: &'static str, title: &'static str, on: Signal<bool>, on_click: Box<dyn Fn(ev::MouseEvent)>| {
        view! {
            <div class="flex items-center justify-between">
                <p class="m-0 text-sm" style="color: var(--text2)" title=title>
                    {label}
                </p>
                <button
                    class="w-20 h-8 rounded-2xl text-sm font-semibold"
                    style=move || {
                        if on.get() {
                            "background-color: var(--primary1); color: var(--white);"
                        } else {
                            "background-color: var(--bg3); color: var(--text2);"
                        }
                    }
                    on:click=on_click
                >
                    {move || if on.get() { "On" } else { "Off" }}
                </button>
            </div>
        }
    };

    view! {
        <div class="floating-menu">
            <dialog
                node_ref=dialog_ref
                class="z-40 mt-1.5 w-80 p-0 shadow-md rounded-2xl border border-solid"
                style="background-color: var(--bg1); border-color: var(--bg3)"
            >
                <div class="relative flex flex-col z-auto">
                    <div class="flex justify-between items-center p-2 pl-3 border-0 border-b border-solid" style="border-color: var(--bg3)">
                        <p class="m-0">"Transaction Settings"</p>
                        <button
                            autofocus
                            on:click=toggle_menu
                            class="appearance-none border-0 flex shrink-0 items-center justify-center w-6 h-6 p-1 box-border rounded-md bg-transparent"
                        >
                            <X size=16 />
                        </button>
                    </div>
                    <div class="px-3 py-4 box-border flex flex-col gap-4">
                        <TransactionSettings slippage=settings.slippage deadline=settings.deadline />
                        <p class="m-0 font-semibold">"Interface Settings"</p>
                        {toggle(
                            "Toggle Expert Mode",
                            "Bypasses confirmation modals and allows high slippage trades. Use at your own risk.",
                            expert_mode,
                            Box::new(toggle_expert_mode),
                        )}
                        {toggle(
                            "Disable Multihops",
                            "Restricts swaps to direct pairs only.",
                            single_hop_only,
                            Box::new(move |_| set_single_hop_only.update(|on| *on = !*on)),
                        )}
                    </div>
                </div>
            </dialog>
        </div>
    }
}
