//! Slippage tolerance and transaction deadline editor.
//!
//! The text fields shadow the committed settings: typing commits a value only
//! when it parses, and leaving a field rewrites it from the committed value.

use leptos::prelude::*;
use lucide_leptos::Info;
use tracing::{debug, info};

pub const SLIPPAGE_PRESETS: [u16; 3] = [10, 50, 100];

/// Slippage at or above this many basis points is never committed.
pub const MAX_SLIPPAGE_BIPS: u16 = 5000;
const RISKY_LOW_BIPS: u16 = 50;
const RISKY_HIGH_BIPS: u16 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlippageError {
    InvalidInput,
    RiskyLow,
    RiskyHigh,
}

impl SlippageError {
    pub fn message(&self) -> &'static str {
        match self {
            SlippageError::InvalidInput => "Enter a valid slippage percentage",
            SlippageError::RiskyLow => "Your transaction may fail",
            SlippageError::RiskyHigh => "Your transaction may be frontrun",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineError {
    InvalidInput,
}

/// Basis points as a percentage with two decimals, e.g. `123` → `"1.23"`.
pub fn format_slippage(raw_slippage: u16) -> String {
    format!("{}.{:02}", raw_slippage / 100, raw_slippage % 100)
}

/// Parses a typed percentage into basis points, if it may be committed.
pub fn parse_slippage(value: &str) -> Option<u16> {
    let percent = value.trim().parse::<f64>().ok()?;
    if !percent.is_finite() || percent < 0.0 {
        return None;
    }
    let bips = (percent * 100.0).round();
    (bips < MAX_SLIPPAGE_BIPS as f64).then_some(bips as u16)
}

/// Seconds as minutes, without a trailing `.0`, e.g. `1200` → `"20"`.
pub fn format_deadline(deadline: u64) -> String {
    if deadline % 60 == 0 {
        (deadline / 60).to_string()
    } else {
        (deadline as f64 / 60.0).to_string()
    }
}

/// Parses typed minutes into seconds, if that is a positive whole number.
pub fn parse_deadline(value: &str) -> Option<u64> {
    let minutes = value.trim().parse::<f64>().ok()?;
    if !minutes.is_finite() {
        return None;
    }
    let seconds = minutes * 60.0;
    let rounded = seconds.round();
    ((seconds - rounded).abs() < 1e-9 && rounded >= 1.0).then_some(rounded as u64)
}

/// What the user has typed, as opposed to what is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    pub slippage_input: String,
    pub deadline_input: String,
}

impl SettingsDraft {
    /// Records typed slippage and returns the value to commit, if any.
    pub fn input_slippage(&mut self, value: &str) -> Option<u16> {
        self.slippage_input = value.to_string();
        parse_slippage(value)
    }

    /// Presets replace whatever was typed.
    pub fn select_preset(&mut self, preset: u16) -> u16 {
        self.slippage_input.clear();
        preset
    }

    pub fn blur_slippage(&mut self, raw_slippage: u16) {
        self.slippage_input = format_slippage(raw_slippage);
    }

    pub fn input_deadline(&mut self, value: &str) -> Option<u64> {
        self.deadline_input = value.to_string();
        parse_deadline(value)
    }

    pub fn blur_deadline(&mut self, deadline: u64) {
        self.deadline_input = format_deadline(deadline);
    }

    /// Empty input always agrees with the committed value.
    pub fn slippage_input_is_valid(&self, raw_slippage: u16) -> bool {
        self.slippage_input.is_empty()
            || self
                .slippage_input
                .trim()
                .parse::<f64>()
                .is_ok_and(|percent| format!("{percent:.2}") == format_slippage(raw_slippage))
    }

    pub fn deadline_input_is_valid(&self, deadline: u64) -> bool {
        self.deadline_input.is_empty() || self.deadline_input == format_deadline(deadline)
    }

    pub fn slippage_error(&self, raw_slippage: u16) -> Option<SlippageError> {
        if !self.slippage_input_is_valid(raw_slippage) {
            Some(SlippageError::InvalidInput)
        } else if raw_slippage < RISKY_LOW_BIPS {
            Some(SlippageError::RiskyLow)
        } else if raw_slippage > RISKY_HIGH_BIPS {
            Some(SlippageError::RiskyHigh)
        } else {
            None
        }
    }

    pub fn deadline_error(&self, deadline: u64) -> Option<DeadlineError> {
        (!self.deadline_input_is_valid(deadline)).then_some(DeadlineError::InvalidInput)
    }
}

#[component]
pub fn TransactionSettings(
    slippage: (Signal<u16>, WriteSignal<u16>),
    deadline: (Signal<u64>, WriteSignal<u64>),
) -> impl IntoView {
    info!("rendering <TransactionSettings/>");

    let (raw_slippage, set_raw_slippage) = slippage;
    let (deadline, set_deadline) = deadline;
    let draft = RwSignal::new(SettingsDraft::default());

    let slippage_error = Memo::new(move |_| draft.with(|draft| draft.slippage_error(raw_slippage.get())));
    let deadline_error = Memo::new(move |_| draft.with(|draft| draft.deadline_error(deadline.get())));

    let on_slippage_input = move |value: String| {
        if let Some(bips) = draft.try_update(|draft| draft.input_slippage(&value)).flatten() {
            debug!("slippage set to {bips} bips");
            set_raw_slippage.set(bips);
        }
    };

    let on_deadline_input = move |value: String| {
        if let Some(seconds) = draft.try_update(|draft| draft.input_deadline(&value)).flatten() {
            debug!("deadline set to {seconds}s");
            set_deadline.set(seconds);
        }
    };

    let preset = move |bips: u16| {
        view! {
            <button
                class="h-12 min-w-20 mr-2 rounded-2xl text-base font-semibold"
                style=move || {
                    if raw_slippage.get() == bips {
                        "background-color: var(--primary1); color: white;"
                    } else {
                        "background-color: #d8d8d8; color: #05489c;"
                    }
                }
                on:click=move |_| {
                    let bips = draft.try_update(|draft| draft.select_preset(bips)).unwrap_or(bips);
                    set_raw_slippage.set(bips);
                }
            >
                {format!("{}%", format_slippage(bips).trim_end_matches('0').trim_end_matches('.'))}
            </button>
        }
    };

    view! {
        <div class="flex flex-col gap-4">
            <div class="flex flex-col gap-2">
                <div class="flex items-center gap-1">
                    <p class="m-0 font-semibold" style="color: #05489c">"Slippage tolerance"</p>
                    <span title="Your transaction will revert if the price changes unfavorably by more than this percentage.">
                        <Info size=16 />
                    </span>
                </div>
                <div class="flex items-center justify-between">
                    {SLIPPAGE_PRESETS.into_iter().map(preset).collect_view()}
                    <div
                        class="flex flex-1 items-center h-12 px-3 rounded-2xl"
                        style=move || match (SLIPPAGE_PRESETS.contains(&raw_slippage.get()), slippage_error.get()) {
                            (false, Some(SlippageError::InvalidInput)) => "border: 1px solid var(--red1);",
                            (false, _) => "border: 1px solid var(--primary1);",
                            _ => "",
                        }
                    >
                        <input
                            class="w-full bg-transparent border-none outline-none text-left"
                            class=("text-red-500", move || slippage_error.get() == Some(SlippageError::InvalidInput))
                            inputmode="decimal"
                            placeholder=move || format_slippage(raw_slippage.get())
                            prop:value=move || draft.with(|draft| draft.slippage_input.clone())
                            on:input=move |ev| on_slippage_input(event_target_value(&ev))
                            on:blur=move |_| draft.update(|draft| draft.blur_slippage(raw_slippage.get_untracked()))
                        />
                        <span style="color: #05489c">"%"</span>
                    </div>
                </div>
                {move || {
                    slippage_error
                        .get()
                        .map(|error| {
                            let color = match error {
                                SlippageError::InvalidInput => "red",
                                _ => "#F3841E",
                            };
                            view! {
                                <p class="m-0 pt-2" style=format!("color: {color}")>
                                    {error.message()}
                                </p>
                            }
                        })
                }}
            </div>
            <div class="flex flex-col gap-2">
                <div class="flex items-center gap-1">
                    <p class="m-0 font-semibold" style="color: #05489c">"Transaction deadline"</p>
                    <span title="Your transaction will revert if it is pending for more than this long.">
                        <Info size=16 />
                    </span>
                </div>
                <div class="flex items-center">
                    <input
                        class="w-20 h-12 px-3 rounded-2xl"
                        class=("text-red-500", move || deadline_error.get().is_some())
                        inputmode="decimal"
                        placeholder=move || format_deadline(deadline.get())
                        prop:value=move || draft.with(|draft| draft.deadline_input.clone())
                        on:input=move |ev| on_deadline_input(event_target_value(&ev))
                        on:blur=move |_| draft.update(|draft| draft.blur_deadline(deadline.get_untracked()))
                    />
                    <span class="pl-2" style="color: #05489c">"minutes"</span>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slippage_parsing() {
        assert_eq!(parse_slippage("0.5"), Some(50));
        assert_eq!(parse_slippage("1.23"), Some(123));
        assert_eq!(parse_slippage("0.29"), Some(29));
        assert_eq!(parse_slippage("0"), Some(0));
        assert_eq!(parse_slippage("49.99"), Some(4999));
        assert_eq!(parse_slippage("50"), None);
        assert_eq!(parse_slippage("-1"), None);
        assert_eq!(parse_slippage("abc"), None);
        assert_eq!(parse_slippage(""), None);
    }

    #[test]
    fn test_large_slippage_is_not_committed() {
        let mut draft = SettingsDraft::default();
        let mut committed = 50;
        if let Some(bips) = draft.input_slippage("75") {
            committed = bips;
        }
        assert_eq!(committed, 50);
        assert_eq!(draft.slippage_error(committed), Some(SlippageError::InvalidInput));
    }

    #[test]
    fn test_slippage_round_trip() {
        assert_eq!(format_slippage(123), "1.23");
        assert_eq!(format_slippage(5), "0.05");
        assert_eq!(parse_slippage(&format_slippage(123)), Some(123));
    }

    #[test]
    fn test_slippage_warnings() {
        let draft = SettingsDraft::default();
        assert_eq!(draft.slippage_error(49), Some(SlippageError::RiskyLow));
        assert_eq!(draft.slippage_error(50), None);
        assert_eq!(draft.slippage_error(500), None);
        assert_eq!(draft.slippage_error(501), Some(SlippageError::RiskyHigh));
    }

    #[test]
    fn test_invalid_input_takes_priority() {
        let mut draft = SettingsDraft::default();
        draft.input_slippage("oops");
        assert_eq!(draft.slippage_error(10), Some(SlippageError::InvalidInput));

        // matching text clears it, leaving the risk warning
        draft.input_slippage("0.1");
        assert_eq!(draft.slippage_error(10), Some(SlippageError::RiskyLow));
    }

    #[test]
    fn test_preset_clears_input() {
        let mut draft = SettingsDraft::default();
        draft.input_slippage("3");
        assert_eq!(draft.select_preset(100), 100);
        assert_eq!(draft.slippage_input, "");
    }

    #[test]
    fn test_blur_reformats_committed_value() {
        let mut draft = SettingsDraft::default();
        draft.input_slippage("1.2300");
        draft.blur_slippage(123);
        assert_eq!(draft.slippage_input, "1.23");

        draft.input_deadline("abc");
        draft.blur_deadline(1200);
        assert_eq!(draft.deadline_input, "20");
        assert_eq!(draft.deadline_error(1200), None);
    }

    #[test]
    fn test_deadline_parsing() {
        assert_eq!(parse_deadline("20"), Some(1200));
        assert_eq!(parse_deadline("0.5"), Some(30));
        assert_eq!(parse_deadline("0"), None);
        assert_eq!(parse_deadline("-3"), None);
        assert_eq!(parse_deadline("0.001"), None);
        assert_eq!(format_deadline(30), "0.5");
    }

    #[test]
    fn test_deadline_error() {
        let mut draft = SettingsDraft::default();
        assert_eq!(draft.input_deadline("x"), None);
        assert_eq!(draft.deadline_error(1200), Some(DeadlineError::InvalidInput));
        assert_eq!(draft.input_deadline("20"), Some(1200));
        assert_eq!(draft.deadline_error(1200), None);
    }
}
