//! Deposit/withdraw panel logic for a single farm.

use ethnum::U256;
use soku_core::{
    utils::parse_token_amount, ApprovalState, Error, Submission, BASE_URL, CHAIN_ID,
};
use soku_sdk::{CurrencyAmount, Token};
use std::fmt::Display;

/// Pool tokens of every pair have 18 decimals.
pub const LP_DECIMALS: u8 = 18;

/// A farm and the pair it stakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmPool {
    pub pid: u64,
    pub lp_token: Token,
    pub token0: Token,
    pub token1: Token,
}

impl FarmPool {
    pub fn new(pid: u64, lp_address: &str, token0: Token, token1: Token) -> Self {
        let symbol = format!("{}-{}", token0.symbol, token1.symbol);
        let lp_token = Token::new(CHAIN_ID, lp_address, LP_DECIMALS, symbol, "SushiSwap LP Token");
        Self {
            pid,
            lp_token,
            token0,
            token1,
        }
    }

    pub fn pair_symbol(&self) -> &str {
        &self.lp_token.symbol
    }

    /// Link to the add liquidity page for the staked pair.
    pub fn add_liquidity_path(&self) -> String {
        format!(
            "{BASE_URL}/add/{}/{}",
            native_param(&self.token0),
            native_param(&self.token1)
        )
    }
}

/// Wrapped native shows up as the native currency in links.
fn native_param(token: &Token) -> String {
    if token.address.eq_ignore_ascii_case(CHAIN_ID.wrapped_native_address()) {
        CHAIN_ID.native_symbol().to_string()
    } else {
        token.address.clone()
    }
}

/// True when the typed value can't be submitted against `bound`.
///
/// Zero, unparseable input, anything over the bound at full precision, a bound
/// that hasn't loaded, and a pending submission all disable the action.
pub fn action_disabled(value: &str, bound: Option<&CurrencyAmount>, pending: bool) -> bool {
    if pending {
        return true;
    }
    let Some(bound) = bound else {
        return true;
    };
    match parse_token_amount(value, bound.currency.decimals()) {
        Ok(amount) => amount == U256::ZERO || amount > bound.raw,
        Err(_) => true,
    }
}

/// What the panel shows for a given LP token allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Loading,
    Approve { pending: bool },
    Manage,
}

pub fn panel_mode(approval: ApprovalState) -> PanelMode {
    match approval {
        ApprovalState::Unknown => PanelMode::Loading,
        ApprovalState::NotApproved => PanelMode::Approve { pending: false },
        ApprovalState::Pending => PanelMode::Approve { pending: true },
        ApprovalState::Approved => PanelMode::Manage,
    }
}

/// Label of the harvest button, or `None` when there is nothing to claim.
pub fn harvest_label(pending_reward: Option<&CurrencyAmount>, reward_symbol: &str) -> Option<String> {
    let reward = pending_reward.filter(|reward| !reward.is_zero())?;
    Some(format!("Harvest {} {reward_symbol}", reward.to_significant(6)))
}

/// The two fields and the submission shared by deposit, withdraw and harvest.
#[derive(Debug, Clone, Default)]
pub struct InputGroupState {
    pub deposit_value: String,
    pub withdraw_value: String,
    pub pending: Submission<String>,
}

impl InputGroupState {
    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn deposit_disabled(&self, balance: Option<&CurrencyAmount>) -> bool {
        action_disabled(&self.deposit_value, balance, self.is_pending())
    }

    pub fn withdraw_disabled(&self, staked: Option<&CurrencyAmount>) -> bool {
        action_disabled(&self.withdraw_value, staked, self.is_pending())
    }

    pub fn max_deposit(&mut self, balance: &CurrencyAmount) {
        self.deposit_value = balance.to_exact();
    }

    pub fn max_withdraw(&mut self, staked: &CurrencyAmount) {
        self.withdraw_value = staked.to_exact();
    }

    /// Claims the panel for one transaction.
    pub fn begin(&mut self) -> Result<(), Error> {
        self.pending.begin()
    }

    pub fn finish<E: Display>(&mut self, result: Result<String, E>) {
        self.pending.resolve(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ONE: u128 = 1_000_000_000_000_000_000;

    fn lp(amount: u128) -> CurrencyAmount {
        let token = Token::new(
            CHAIN_ID,
            "0x397FF1542f962076d0BFE58eA045FfA2d347ACa0",
            LP_DECIMALS,
            "USDC-WETH",
            "SushiSwap LP Token",
        );
        CurrencyAmount::from_token(token, U256::new(amount))
    }

    #[test]
    fn test_deposit_bounded_by_balance() {
        let balance = lp(10 * ONE);
        let mut state = InputGroupState {
            deposit_value: "10".to_string(),
            ..Default::default()
        };
        assert!(!state.deposit_disabled(Some(&balance)));

        state.deposit_value = "10.0001".to_string();
        assert!(state.deposit_disabled(Some(&balance)));

        state.deposit_value = "0".to_string();
        assert!(state.deposit_disabled(Some(&balance)));

        state.deposit_value = "abc".to_string();
        assert!(state.deposit_disabled(Some(&balance)));

        state.deposit_value = "1".to_string();
        assert!(state.deposit_disabled(None));
    }

    #[test]
    fn test_full_precision_comparison() {
        let staked = lp(ONE + 1);
        let mut state = InputGroupState {
            withdraw_value: "1.000000000000000001".to_string(),
            ..Default::default()
        };
        assert!(!state.withdraw_disabled(Some(&staked)));

        state.withdraw_value = "1.000000000000000002".to_string();
        assert!(state.withdraw_disabled(Some(&staked)));
    }

    #[test]
    fn test_pending_submission_disables_everything() {
        let balance = lp(10 * ONE);
        let mut state = InputGroupState {
            deposit_value: "1".to_string(),
            withdraw_value: "1".to_string(),
            ..Default::default()
        };
        state.begin().unwrap();

        assert!(state.deposit_disabled(Some(&balance)));
        assert!(state.withdraw_disabled(Some(&balance)));
        assert_eq!(state.begin(), Err(Error::Busy));

        state.finish(Ok::<_, Error>("0xabc".to_string()));
        assert!(!state.deposit_disabled(Some(&balance)));
    }

    #[test]
    fn test_max_uses_exact_amount() {
        let mut state = InputGroupState::default();
        state.max_deposit(&lp(1_234_567_890_123_456_789));
        assert_eq!(state.deposit_value, "1.234567890123456789");
        assert!(!state.deposit_disabled(Some(&lp(1_234_567_890_123_456_789))));
    }

    #[test]
    fn test_panel_mode() {
        assert_eq!(panel_mode(ApprovalState::Unknown), PanelMode::Loading);
        assert_eq!(panel_mode(ApprovalState::NotApproved), PanelMode::Approve { pending: false });
        assert_eq!(panel_mode(ApprovalState::Pending), PanelMode::Approve { pending: true });
        assert_eq!(panel_mode(ApprovalState::Approved), PanelMode::Manage);
    }

    #[test]
    fn test_harvest_label() {
        let sushi = Token::new(
            CHAIN_ID,
            "0x6B3595068778DD592e39A122f4f5a5cF09C90fE2",
            18,
            "SUSHI",
            "SushiToken",
        );
        let zero = CurrencyAmount::from_token(sushi.clone(), U256::ZERO);
        let reward = CurrencyAmount::from_token(sushi, U256::new(12_500_000_000_000_000_000));

        assert_eq!(harvest_label(None, "SUSHI"), None);
        assert_eq!(harvest_label(Some(&zero), "SUSHI"), None);
        assert_eq!(harvest_label(Some(&reward), "SUSHI"), Some("Harvest 12.5 SUSHI".to_string()));
    }

    #[test]
    fn test_add_liquidity_path_uses_native_symbol() {
        let weth = Token::wrapped_native(CHAIN_ID);
        let usdc = Token::new(CHAIN_ID, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", 6, "USDC", "USD Coin");
        let pool = FarmPool::new(1, "0x397FF1542f962076d0BFE58eA045FfA2d347ACa0", usdc, weth);

        assert_eq!(pool.pair_symbol(), "USDC-WETH");
        assert_eq!(
            pool.add_liquidity_path(),
            "/sokuswap-leptos/add/0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48/ETH"
        );
    }
}
