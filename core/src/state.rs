use crate::constants::*;
use codee::string::FromToStringCodec;
use leptos::prelude::*;
use leptos_use::storage::{use_local_storage_with_options, UseStorageOptions};
use soku_sdk::{Percent, Token};
use std::{collections::HashMap, ops::Deref, sync::Arc};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Endpoint {
    pub url: RwSignal<&'static str>,
}

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: RwSignal::new(Box::leak(url.into().into_boxed_str())),
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            url: RwSignal::new(NODE),
        }
    }
}

impl Deref for Endpoint {
    type Target = RwSignal<&'static str>;
    fn deref(&self) -> &Self::Target {
        &self.url
    }
}

/// The chain the app is built for. The wallet's chain lives in [`WalletSignals`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChainId {
    pub chain_id: RwSignal<u64>,
}

impl ChainId {
    pub fn new(chain_id: soku_sdk::ChainId) -> Self {
        Self {
            chain_id: RwSignal::new(chain_id.id()),
        }
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::new(CHAIN_ID)
    }
}

impl Deref for ChainId {
    type Target = RwSignal<u64>;

    fn deref(&self) -> &Self::Target {
        &self.chain_id
    }
}

// Static at runtime. Built from the compiled-in token list.
#[derive(Clone, Debug)]
pub struct TokenMap(pub Arc<HashMap<String, Token>>);

impl TokenMap {
    pub fn new(token_map: Arc<HashMap<String, Token>>) -> Self {
        Self(token_map)
    }

    /// Looks a token up by address, ignoring case.
    pub fn token(&self, address: &str) -> Option<&Token> {
        self.0.get(&address.to_lowercase())
    }
}

impl Deref for TokenMap {
    type Target = HashMap<String, Token>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Connected wallet state, kept in sync with the injected provider's events.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WalletSignals {
    pub account: RwSignal<Option<String>>,
    pub chain_id: RwSignal<Option<u64>>,
}

impl WalletSignals {
    pub fn new() -> Self {
        Self {
            account: RwSignal::new(None),
            chain_id: RwSignal::new(None),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.with(Option::is_some)
    }

    /// True when connected to a chain other than the one the app is built for.
    pub fn wrong_network(&self) -> bool {
        self.chain_id
            .get()
            .is_some_and(|chain_id| chain_id != CHAIN_ID.id())
    }

    pub fn disconnect(&self) {
        self.account.set(None);
        self.chain_id.set(None);
    }
}

impl Default for WalletSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// User preferences persisted in local storage.
#[derive(Copy, Clone)]
pub struct UserSettings {
    /// Allowed slippage in basis points.
    pub slippage: (Signal<u16>, WriteSignal<u16>),
    /// Transaction deadline in seconds from submission.
    pub deadline: (Signal<u64>, WriteSignal<u64>),
    pub expert_mode: (Signal<bool>, WriteSignal<bool>),
    pub single_hop_only: (Signal<bool>, WriteSignal<bool>),
}

impl UserSettings {
    pub fn new() -> Self {
        let (slippage, set_slippage, _) = use_local_storage_with_options::<u16, FromToStringCodec>(
            "user_slippage_tolerance",
            UseStorageOptions::default().initial_value(INITIAL_ALLOWED_SLIPPAGE),
        );
        let (deadline, set_deadline, _) = use_local_storage_with_options::<u64, FromToStringCodec>(
            "user_deadline",
            UseStorageOptions::default().initial_value(DEFAULT_DEADLINE_FROM_NOW),
        );
        let (expert_mode, set_expert_mode, _) =
            use_local_storage_with_options::<bool, FromToStringCodec>(
                "user_expert_mode",
                UseStorageOptions::default().initial_value(false),
            );
        let (single_hop_only, set_single_hop_only, _) =
            use_local_storage_with_options::<bool, FromToStringCodec>(
                "user_single_hop_only",
                UseStorageOptions::default().initial_value(false),
            );

        Self {
            slippage: (slippage, set_slippage),
            deadline: (deadline, set_deadline),
            expert_mode: (expert_mode, set_expert_mode),
            single_hop_only: (single_hop_only, set_single_hop_only),
        }
    }

    pub fn allowed_slippage(&self) -> Percent {
        Percent::from_bips(self.slippage.0.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ACCOUNT: &str = "0x00000000000000000000000000000000000000aa";

    #[test]
    fn test_wallet_connection() {
        let wallet = WalletSignals::new();
        assert!(!wallet.is_connected());
        assert!(!wallet.wrong_network());

        wallet.account.set(Some(ACCOUNT.to_string()));
        wallet.chain_id.set(Some(CHAIN_ID.id()));
        assert!(wallet.is_connected());
        assert!(!wallet.wrong_network());

        wallet.chain_id.set(Some(CHAIN_ID.id() + 1));
        assert!(wallet.wrong_network());

        wallet.disconnect();
        assert!(!wallet.is_connected());
        assert!(!wallet.wrong_network());
        assert_eq!(wallet.chain_id.get_untracked(), None);
    }

    #[test]
    fn test_allowed_slippage_follows_setting() {
        let (slippage, set_slippage) = signal(75u16);
        let (deadline, set_deadline) = signal(DEFAULT_DEADLINE_FROM_NOW);
        let (expert_mode, set_expert_mode) = signal(false);
        let (single_hop_only, set_single_hop_only) = signal(false);
        let settings = UserSettings {
            slippage: (slippage.into(), set_slippage),
            deadline: (deadline.into(), set_deadline),
            expert_mode: (expert_mode.into(), set_expert_mode),
            single_hop_only: (single_hop_only.into(), set_single_hop_only),
        };

        assert_eq!(settings.allowed_slippage().to_fixed(2), "0.75");

        set_slippage.set(INITIAL_ALLOWED_SLIPPAGE);
        assert_eq!(settings.allowed_slippage().to_fixed(2), "0.50");
    }
}
