//! Everything the swap page decides without touching the DOM or the chain.

use ethnum::U256;
use soku_core::{
    prices::{SEVERITY_BLOCKED, SEVERITY_WARN},
    ApprovalState, Error, Submission,
};
use soku_sdk::{
    BestTradeOptions, ChainId, Currency, CurrencyAmount, Fraction, Pair, Percent, Trade,
};
use std::{collections::HashMap, fmt::Display};

/// Longest route searched when multi-hop trades are allowed.
pub const MAX_HOPS: usize = 3;

/// A trade with more hops must beat a shorter one by this much to be preferred.
pub const BETTER_TRADE_LESS_HOPS_THRESHOLD_BIPS: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Input,
    Output,
}

impl Field {
    pub fn opposite(self) -> Self {
        match self {
            Field::Input => Field::Output,
            Field::Output => Field::Input,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapType {
    #[default]
    NotApplicable,
    Wrap,
    Unwrap,
}

/// Native to wrapped native is a wrap, the reverse an unwrap. Anything else goes
/// through the router.
pub fn wrap_type(input: Option<&Currency>, output: Option<&Currency>, chain_id: ChainId) -> WrapType {
    let (Some(input), Some(output)) = (input, output) else {
        return WrapType::NotApplicable;
    };
    let weth = Currency::Token(soku_sdk::Token::wrapped_native(chain_id));

    if input.is_native() && *output == weth {
        WrapType::Wrap
    } else if *input == weth && output.is_native() {
        WrapType::Unwrap
    } else {
        WrapType::NotApplicable
    }
}

pub fn wrap_input_error(
    amount: Option<&CurrencyAmount>,
    balance: Option<&CurrencyAmount>,
    chain_id: ChainId,
) -> Option<String> {
    let amount = amount?.clone();
    let sufficient = balance.is_some_and(|balance| !balance.less_than(&amount));

    (!sufficient).then(|| format!("Insufficient {} balance", amount.currency.symbol(chain_id)))
}

/// The first reason the swap can't go ahead, if any.
///
/// `amount_in` is the most the trade may spend after slippage.
pub fn swap_input_error(
    connected: bool,
    currencies: (Option<&Currency>, Option<&Currency>),
    parsed_amount: Option<&CurrencyAmount>,
    balance_in: Option<&CurrencyAmount>,
    amount_in: Option<&CurrencyAmount>,
    chain_id: ChainId,
) -> Option<String> {
    if !connected {
        return Some("Connect Wallet".to_string());
    }
    if currencies.0.is_none() || currencies.1.is_none() {
        return Some("Select a token".to_string());
    }
    if parsed_amount.is_none() {
        return Some("Enter an amount".to_string());
    }
    match (balance_in, amount_in) {
        (Some(balance), Some(amount)) if balance.less_than(amount) => Some(format!(
            "Insufficient {} balance",
            amount.currency.symbol(chain_id)
        )),
        _ => None,
    }
}

/// True if `b` beats `a` by more than `minimum_delta`. Two missing trades are never better.
pub fn is_trade_better(a: Option<&Trade>, b: Option<&Trade>, minimum_delta: &Percent) -> bool {
    match (a, b) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(a), Some(b)) => {
            if a.trade_type != b.trade_type
                || a.input_amount.currency != b.input_amount.currency
                || a.output_amount.currency != b.output_amount.currency
            {
                return false;
            }
            let threshold = Fraction::from_integer(U256::ONE).add(minimum_delta.fraction());
            a.execution_price
                .raw
                .multiply(&threshold)
                .less_than(&b.execution_price.raw)
        }
    }
}

/// Best trade for the typed amount on the given side.
///
/// Routes of increasing length are tried in turn, and a longer one only replaces
/// a shorter one when it is meaningfully better.
pub fn best_trade(
    pairs: &[Pair],
    field: Field,
    amount: &CurrencyAmount,
    other: &Currency,
    single_hop_only: bool,
) -> Option<Trade> {
    let search = |max_hops: usize| {
        let options = BestTradeOptions {
            max_num_results: 1,
            max_hops,
        };
        let trades = match field {
            Field::Input => Trade::best_trade_exact_in(pairs, amount, other, options),
            Field::Output => Trade::best_trade_exact_out(pairs, other, amount, options),
        };
        trades.into_iter().next()
    };

    if single_hop_only {
        return search(1);
    }

    let threshold = Percent::from_bips(BETTER_TRADE_LESS_HOPS_THRESHOLD_BIPS);
    let mut best = None;
    for max_hops in 1..=MAX_HOPS {
        let current = search(max_hops);
        if is_trade_better(best.as_ref(), current.as_ref(), &threshold) {
            best = current;
        }
    }
    best
}

/// Native currency kept back by MAX so the wallet can still pay for gas.
pub const MIN_ETH: U256 = U256::new(10_000_000_000_000_000);

/// The most of `balance` a MAX click may spend.
pub fn max_amount_spend(balance: &CurrencyAmount) -> CurrencyAmount {
    if !balance.currency.is_native() {
        return balance.clone();
    }
    let raw = if balance.raw > MIN_ETH {
        balance.raw - MIN_ETH
    } else {
        U256::ZERO
    };
    CurrencyAmount::new(balance.currency.clone(), raw)
}

/// Whether the user must re-accept a trade before confirming it.
pub fn trade_meaningfully_differs(a: &Trade, b: &Trade) -> bool {
    a.trade_type != b.trade_type
        || a.input_amount != b.input_amount
        || a.output_amount != b.output_amount
        || !a.execution_price.equal_to(&b.execution_price)
}

/// What the amount fields hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapFormState {
    pub independent_field: Field,
    pub typed_value: String,
}

impl SwapFormState {
    pub fn type_input(&mut self, field: Field, value: impl Into<String>) {
        self.independent_field = field;
        self.typed_value = value.into();
    }

    /// Follows the currencies when they trade places.
    pub fn switch(&mut self) {
        self.independent_field = self.independent_field.opposite();
    }

    pub fn clear(&mut self) {
        self.typed_value.clear();
    }
}

/// Approval transactions, one per token address.
#[derive(Debug, Clone, Default)]
pub struct TokenApprovals(HashMap<String, Submission<String>>);

impl TokenApprovals {
    pub fn begin(&mut self, token: &str) -> Result<(), Error> {
        self.0.entry(token.to_lowercase()).or_default().begin()
    }

    pub fn resolve<E: Display>(&mut self, token: &str, result: Result<String, E>) {
        self.0.entry(token.to_lowercase()).or_default().resolve(result);
    }

    pub fn is_pending(&self, token: &str) -> bool {
        self.0
            .get(&token.to_lowercase())
            .is_some_and(Submission::is_pending)
    }
}

/// Confirmation modal and transaction progress.
#[derive(Debug, Clone, Default)]
pub struct SwapPageState {
    pub show_confirm: bool,
    pub trade_to_confirm: Option<Trade>,
    pub submission: Submission<String>,
}

impl SwapPageState {
    pub fn attempting_txn(&self) -> bool {
        self.submission.is_pending()
    }

    pub fn tx_hash(&self) -> Option<&str> {
        self.submission.value().map(String::as_str)
    }

    pub fn swap_error_message(&self) -> Option<&str> {
        self.submission.error()
    }

    /// Opens the modal on a snapshot of `trade`, forgetting any earlier outcome.
    pub fn open_confirm(&mut self, trade: Trade) {
        self.trade_to_confirm = Some(trade);
        self.show_confirm = true;
        self.submission.reset();
    }

    pub fn accept_changes(&mut self, live: Option<Trade>) {
        self.trade_to_confirm = live;
    }

    pub fn needs_acceptance(&self, live: Option<&Trade>) -> bool {
        match (self.trade_to_confirm.as_ref(), live) {
            (Some(snapshot), Some(live)) => trade_meaningfully_differs(snapshot, live),
            (None, None) => false,
            _ => true,
        }
    }

    pub fn begin_swap(&mut self) -> Result<(), Error> {
        self.submission.begin()
    }

    /// Records the outcome. Returns true when the typed amount should be cleared.
    pub fn finish_swap<E: Display>(&mut self, result: Result<String, E>) -> bool {
        let succeeded = result.is_ok();
        self.submission.resolve(result);
        succeeded
    }

    /// Closes the modal. Returns true when the typed amount should be cleared.
    pub fn dismiss(&mut self) -> bool {
        self.show_confirm = false;
        self.tx_hash().is_some()
    }
}

/// Inputs to [`evaluate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapConditions {
    pub unsupported: bool,
    pub connected: bool,
    pub wrap_type: WrapType,
    pub wrap_input_error: Option<String>,
    pub has_route: bool,
    pub user_has_specified_input_output: bool,
    pub single_hop_only: bool,
    pub swap_input_error: Option<String>,
    pub approval: ApprovalState,
    pub approval_submitted: bool,
    pub price_impact_severity: u8,
    pub expert_mode: bool,
    pub input_symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionButton {
    pub label: String,
    pub disabled: bool,
    /// Styled as a warning.
    pub error: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApproveButton {
    pub label: String,
    pub disabled: bool,
    pub pending: bool,
    pub confirmed: bool,
}

/// The one call to action shown under the swap form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapAction {
    UnsupportedAsset,
    ConnectWallet,
    Wrap(ActionButton),
    NoRoute { suggest_multi_hop: bool },
    Approve { approve: ApproveButton, swap: ActionButton },
    Swap(ActionButton),
}

pub fn evaluate(conditions: &SwapConditions) -> SwapAction {
    let SwapConditions {
        unsupported,
        connected,
        wrap_type,
        wrap_input_error,
        has_route,
        user_has_specified_input_output,
        single_hop_only,
        swap_input_error,
        approval,
        approval_submitted,
        price_impact_severity,
        expert_mode,
        input_symbol,
    } = conditions;

    if *unsupported {
        return SwapAction::UnsupportedAsset;
    }
    if !connected {
        return SwapAction::ConnectWallet;
    }
    if *wrap_type != WrapType::NotApplicable {
        let label = wrap_input_error.clone().unwrap_or_else(|| {
            match wrap_type {
                WrapType::Wrap => "Wrap",
                _ => "Unwrap",
            }
            .to_string()
        });
        return SwapAction::Wrap(ActionButton {
            label,
            disabled: wrap_input_error.is_some(),
            error: false,
        });
    }
    if !has_route && *user_has_specified_input_output {
        return SwapAction::NoRoute {
            suggest_multi_hop: *single_hop_only,
        };
    }

    let is_valid = swap_input_error.is_none();
    let blocked = *price_impact_severity > SEVERITY_BLOCKED && !expert_mode;
    let anyway = *price_impact_severity > SEVERITY_WARN;
    let swap_label = if anyway { "Swap Anyway" } else { "Swap" };

    let show_approve_flow = is_valid
        && (matches!(approval, ApprovalState::NotApproved | ApprovalState::Pending)
            || (*approval_submitted && *approval == ApprovalState::Approved))
        && !blocked;

    if show_approve_flow {
        let approve_label = match approval {
            ApprovalState::Pending => "Approving".to_string(),
            ApprovalState::Approved if *approval_submitted => "Approved".to_string(),
            _ => format!("Approve {input_symbol}"),
        };
        return SwapAction::Approve {
            approve: ApproveButton {
                label: approve_label,
                disabled: *approval != ApprovalState::NotApproved || *approval_submitted,
                pending: *approval == ApprovalState::Pending,
                confirmed: *approval == ApprovalState::Approved,
            },
            swap: ActionButton {
                label: if blocked { "Price Impact High" } else { swap_label }.to_string(),
                disabled: !is_valid || *approval != ApprovalState::Approved || blocked,
                error: is_valid && anyway,
            },
        };
    }

    let label = match swap_input_error {
        Some(error) => error.clone(),
        None if blocked => "Price Impact Too High".to_string(),
        None => swap_label.to_string(),
    };
    SwapAction::Swap(ActionButton {
        label,
        disabled: !is_valid || blocked,
        error: is_valid && anyway,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use soku_sdk::{Route, Token};

    fn token(address: &str, symbol: &str) -> Token {
        Token::new(ChainId::Mainnet, address, 18, symbol, symbol)
    }

    fn tokens() -> (Token, Token, Token) {
        (
            token("0x0000000000000000000000000000000000000001", "A"),
            token("0x0000000000000000000000000000000000000002", "B"),
            token("0x0000000000000000000000000000000000000003", "C"),
        )
    }

    fn pair(a: &Token, b: &Token, reserve_a: u128, reserve_b: u128) -> Pair {
        Pair::new(
            "0x00000000000000000000000000000000000000aa",
            (a.clone(), U256::new(reserve_a)),
            (b.clone(), U256::new(reserve_b)),
        )
        .unwrap()
    }

    fn trade_a_for_b(amount: u128) -> Trade {
        let (a, b, _) = tokens();
        let route = Route::new(
            vec![pair(&a, &b, 1_000_000, 1_000_000)],
            Currency::Token(a.clone()),
            Currency::Token(b),
        )
        .unwrap();
        Trade::exact_in(route, CurrencyAmount::from_token(a, U256::new(amount))).unwrap()
    }

    fn ready() -> SwapConditions {
        SwapConditions {
            connected: true,
            has_route: true,
            user_has_specified_input_output: true,
            approval: ApprovalState::Approved,
            input_symbol: "DAI".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_priority_order() {
        let conditions = SwapConditions {
            unsupported: true,
            ..Default::default()
        };
        assert_eq!(evaluate(&conditions), SwapAction::UnsupportedAsset);

        assert_eq!(evaluate(&SwapConditions::default()), SwapAction::ConnectWallet);

        let conditions = SwapConditions {
            wrap_type: WrapType::Unwrap,
            has_route: false,
            ..ready()
        };
        assert_eq!(
            evaluate(&conditions),
            SwapAction::Wrap(ActionButton {
                label: "Unwrap".to_string(),
                disabled: false,
                error: false,
            })
        );

        let conditions = SwapConditions {
            has_route: false,
            single_hop_only: true,
            ..ready()
        };
        assert_eq!(
            evaluate(&conditions),
            SwapAction::NoRoute {
                suggest_multi_hop: true
            }
        );
    }

    #[test]
    fn test_wrap_error_disables() {
        let conditions = SwapConditions {
            wrap_type: WrapType::Wrap,
            wrap_input_error: Some("Insufficient ETH balance".to_string()),
            ..ready()
        };
        assert_eq!(
            evaluate(&conditions),
            SwapAction::Wrap(ActionButton {
                label: "Insufficient ETH balance".to_string(),
                disabled: true,
                error: false,
            })
        );
    }

    #[test]
    fn test_approve_flow() {
        let conditions = SwapConditions {
            approval: ApprovalState::NotApproved,
            ..ready()
        };
        let SwapAction::Approve { approve, swap } = evaluate(&conditions) else {
            panic!("expected the approve flow");
        };
        assert_eq!(approve.label, "Approve DAI");
        assert!(!approve.disabled);
        assert!(swap.disabled);

        let conditions = SwapConditions {
            approval: ApprovalState::Pending,
            approval_submitted: true,
            ..ready()
        };
        let SwapAction::Approve { approve, swap } = evaluate(&conditions) else {
            panic!("expected the approve flow");
        };
        assert_eq!(approve.label, "Approving");
        assert!(approve.disabled && approve.pending);
        assert!(swap.disabled);

        let conditions = SwapConditions {
            approval_submitted: true,
            ..ready()
        };
        let SwapAction::Approve { approve, swap } = evaluate(&conditions) else {
            panic!("expected the approve flow");
        };
        assert_eq!(approve.label, "Approved");
        assert!(approve.confirmed);
        assert!(!swap.disabled);
    }

    #[test]
    fn test_approved_without_submission_skips_approve_flow() {
        assert_eq!(
            evaluate(&ready()),
            SwapAction::Swap(ActionButton {
                label: "Swap".to_string(),
                disabled: false,
                error: false,
            })
        );
    }

    #[test]
    fn test_input_error_hides_approve_flow() {
        let conditions = SwapConditions {
            approval: ApprovalState::NotApproved,
            swap_input_error: Some("Insufficient DAI balance".to_string()),
            ..ready()
        };
        assert_eq!(
            evaluate(&conditions),
            SwapAction::Swap(ActionButton {
                label: "Insufficient DAI balance".to_string(),
                disabled: true,
                error: false,
            })
        );
    }

    #[test]
    fn test_price_impact_labels() {
        let with_severity = |price_impact_severity, expert_mode| SwapConditions {
            price_impact_severity,
            expert_mode,
            ..ready()
        };

        assert_eq!(
            evaluate(&with_severity(3, false)),
            SwapAction::Swap(ActionButton {
                label: "Swap Anyway".to_string(),
                disabled: false,
                error: true,
            })
        );
        assert_eq!(
            evaluate(&with_severity(4, false)),
            SwapAction::Swap(ActionButton {
                label: "Price Impact Too High".to_string(),
                disabled: true,
                error: true,
            })
        );
        assert_eq!(
            evaluate(&with_severity(4, true)),
            SwapAction::Swap(ActionButton {
                label: "Swap Anyway".to_string(),
                disabled: false,
                error: true,
            })
        );
    }

    #[test]
    fn test_blocked_impact_hides_approve_flow() {
        let conditions = SwapConditions {
            approval: ApprovalState::NotApproved,
            price_impact_severity: 4,
            ..ready()
        };
        assert!(matches!(evaluate(&conditions), SwapAction::Swap(button) if button.disabled));
    }

    #[test]
    fn test_input_error_order() {
        let (a, b, _) = tokens();
        let (a, b) = (Currency::Token(a), Currency::Token(b));
        let amount = CurrencyAmount::new(a.clone(), U256::new(10));
        let balance = CurrencyAmount::new(a.clone(), U256::new(5));
        let error = |connected, currencies, parsed| {
            swap_input_error(connected, currencies, parsed, Some(&balance), Some(&amount), ChainId::Mainnet)
        };

        assert_eq!(error(false, (None, None), None).as_deref(), Some("Connect Wallet"));
        assert_eq!(error(true, (Some(&a), None), Some(&amount)).as_deref(), Some("Select a token"));
        assert_eq!(error(true, (Some(&a), Some(&b)), None).as_deref(), Some("Enter an amount"));
        assert_eq!(
            error(true, (Some(&a), Some(&b)), Some(&amount)).as_deref(),
            Some("Insufficient A balance")
        );
        assert_eq!(
            swap_input_error(true, (Some(&a), Some(&b)), Some(&amount), Some(&amount), Some(&amount), ChainId::Mainnet),
            None
        );
    }

    #[test]
    fn test_wrap_classification() {
        let weth = Currency::Token(Token::wrapped_native(ChainId::Mainnet));
        let (a, _, _) = tokens();
        let a = Currency::Token(a);
        let native = Currency::Native;

        assert_eq!(wrap_type(Some(&native), Some(&weth), ChainId::Mainnet), WrapType::Wrap);
        assert_eq!(wrap_type(Some(&weth), Some(&native), ChainId::Mainnet), WrapType::Unwrap);
        assert_eq!(wrap_type(Some(&native), Some(&a), ChainId::Mainnet), WrapType::NotApplicable);
        assert_eq!(wrap_type(None, Some(&weth), ChainId::Mainnet), WrapType::NotApplicable);
    }

    #[test]
    fn test_wrap_input_error() {
        let amount = CurrencyAmount::native(U256::new(10));
        let enough = CurrencyAmount::native(U256::new(10));
        let short = CurrencyAmount::native(U256::new(9));

        assert_eq!(wrap_input_error(None, Some(&enough), ChainId::Mainnet), None);
        assert_eq!(wrap_input_error(Some(&amount), Some(&enough), ChainId::Mainnet), None);
        assert_eq!(
            wrap_input_error(Some(&amount), Some(&short), ChainId::Mainnet).as_deref(),
            Some("Insufficient ETH balance")
        );
        assert_eq!(
            wrap_input_error(Some(&amount), None, ChainId::Mainnet).as_deref(),
            Some("Insufficient ETH balance")
        );
    }

    #[test]
    fn test_best_trade_prefers_direct_route() {
        let (a, b, c) = tokens();
        let pairs = vec![
            pair(&a, &b, 1_000_000_000, 1_000_000_000),
            pair(&a, &c, 1_000_000_000, 1_000_000_000),
            pair(&c, &b, 1_000_000_000, 1_000_000_000),
        ];
        let amount = CurrencyAmount::from_token(a, U256::new(1_000));

        let trade = best_trade(&pairs, Field::Input, &amount, &Currency::Token(b), false).unwrap();

        assert_eq!(trade.route.pairs.len(), 1);
    }

    #[test]
    fn test_best_trade_single_hop_only() {
        let (a, b, c) = tokens();
        let pairs = vec![
            pair(&a, &c, 1_000_000_000, 1_000_000_000),
            pair(&c, &b, 1_000_000_000, 1_000_000_000),
        ];
        let amount = CurrencyAmount::from_token(a, U256::new(1_000));
        let output = Currency::Token(b);

        assert!(best_trade(&pairs, Field::Input, &amount, &output, true).is_none());
        let trade = best_trade(&pairs, Field::Input, &amount, &output, false).unwrap();
        assert_eq!(trade.route.pairs.len(), 2);
    }

    #[test]
    fn test_confirm_requires_accepting_changes() {
        let mut state = SwapPageState::default();
        state.open_confirm(trade_a_for_b(1_000));
        assert!(state.show_confirm);
        assert!(!state.needs_acceptance(Some(&trade_a_for_b(1_000))));

        let live = trade_a_for_b(2_000);
        assert!(state.needs_acceptance(Some(&live)));

        state.accept_changes(Some(live.clone()));
        assert_eq!(state.trade_to_confirm, Some(live.clone()));
        assert!(!state.needs_acceptance(Some(&live)));
    }

    #[test]
    fn test_swap_success_and_failure() {
        let mut state = SwapPageState::default();
        state.open_confirm(trade_a_for_b(1_000));

        state.begin_swap().unwrap();
        assert!(state.attempting_txn());
        assert_eq!(state.begin_swap(), Err(Error::Busy));

        let clear = state.finish_swap(Err::<String, _>(Error::generic("user rejected")));
        assert!(!clear);
        assert_eq!(state.tx_hash(), None);
        assert!(state.swap_error_message().is_some_and(|message| message.contains("user rejected")));

        state.begin_swap().unwrap();
        let clear = state.finish_swap(Ok::<_, Error>("0xabc".to_string()));
        assert!(clear);
        assert_eq!(state.tx_hash(), Some("0xabc"));
        assert_eq!(state.swap_error_message(), None);
        assert!(!state.attempting_txn());

        assert!(state.dismiss());
        assert!(!state.show_confirm);
    }

    #[test]
    fn test_cancel_goes_through_dismiss() {
        let mut state = SwapPageState::default();
        state.open_confirm(trade_a_for_b(1_000));
        state.begin_swap().unwrap();
        state.finish_swap(Err::<String, _>(Error::generic("user rejected")));
        assert!(!state.dismiss());
        assert!(!state.show_confirm);

        state.open_confirm(trade_a_for_b(1_000));
        assert_eq!(state.swap_error_message(), None);
        state.begin_swap().unwrap();
        state.finish_swap(Ok::<_, Error>("0xabc".to_string()));
        assert!(state.dismiss());
        assert!(!state.show_confirm);
    }

    #[test]
    fn test_pending_approval_is_per_token() {
        let a = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
        let b = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
        let mut approvals = TokenApprovals::default();

        approvals.begin(a).unwrap();
        assert!(approvals.is_pending(a));
        assert!(approvals.is_pending(&a.to_lowercase()));
        assert!(!approvals.is_pending(b));
        assert_eq!(approvals.begin(a), Err(Error::Busy));

        approvals.begin(b).unwrap();
        approvals.resolve(a, Ok::<_, Error>("0xabc".to_string()));
        assert!(!approvals.is_pending(a));
        assert!(approvals.is_pending(b));
    }

    #[test]
    fn test_max_amount_spend_keeps_gas_money() {
        let (a, _, _) = tokens();
        let token_balance = CurrencyAmount::from_token(a, U256::new(5));
        assert_eq!(max_amount_spend(&token_balance), token_balance);

        let ether = CurrencyAmount::native(U256::new(1_000_000_000_000_000_000));
        assert_eq!(
            max_amount_spend(&ether).raw,
            U256::new(990_000_000_000_000_000)
        );
        assert_eq!(max_amount_spend(&CurrencyAmount::native(MIN_ETH)).raw, U256::ZERO);
    }

    #[test]
    fn test_form_switch() {
        let mut form = SwapFormState::default();
        form.type_input(Field::Output, "12");
        form.switch();
        assert_eq!(form.independent_field, Field::Input);
        assert_eq!(form.typed_value, "12");
        form.clear();
        assert_eq!(form.typed_value, "");
    }
}
