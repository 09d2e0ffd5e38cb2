//! Mint form logic for the add liquidity page.

use ethnum::U256;
use injected::TransactionRequest;
use soku_core::{
    constants::contracts::ROUTER, utils::try_parse_amount, ApprovalState, Error, Submission,
};
use soku_sdk::{
    constants::BIPS_BASE, math::mul_div, pair::wrapped_tokens, ChainId, Currency, CurrencyAmount,
    Pair, Percent, Price,
};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    CurrencyA,
    CurrencyB,
}

impl Field {
    pub fn opposite(self) -> Self {
        match self {
            Field::CurrencyA => Field::CurrencyB,
            Field::CurrencyB => Field::CurrencyA,
        }
    }
}

/// What the two amount fields hold.
///
/// With an existing pool only the independent field is typed and the other side
/// follows the pool price. A new pool sets the price, so both sides are typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MintFormState {
    pub independent_field: Field,
    pub typed_value: String,
    pub other_typed_value: String,
}

impl MintFormState {
    pub fn type_input(&mut self, field: Field, value: impl Into<String>, no_liquidity: bool) {
        let value = value.into();
        if !no_liquidity {
            self.independent_field = field;
            self.typed_value = value;
            self.other_typed_value.clear();
        } else if field == self.independent_field {
            self.typed_value = value;
        } else {
            self.independent_field = field;
            self.other_typed_value = std::mem::replace(&mut self.typed_value, value);
        }
    }

    pub fn dependent_field(&self) -> Field {
        self.independent_field.opposite()
    }

    pub fn clear(&mut self) {
        self.typed_value.clear();
        self.other_typed_value.clear();
    }
}

/// A pool that doesn't exist yet, or has never been funded.
pub fn no_liquidity(pair: Option<&Pair>, total_supply: Option<U256>) -> bool {
    match pair {
        None => true,
        Some(pair) => {
            total_supply == Some(U256::ZERO)
                || pair.reserve0 == U256::ZERO
                || pair.reserve1 == U256::ZERO
        }
    }
}

/// The other side of a deposit at the current pool price.
pub fn quote_dependent(
    pair: &Pair,
    independent: &CurrencyAmount,
    dependent: &Currency,
    chain_id: ChainId,
) -> Option<CurrencyAmount> {
    let wrapped = independent.wrapped(chain_id);
    let quoted = pair.price_of(wrapped.token()?).ok()?.quote(&wrapped).ok()?;
    Some(CurrencyAmount::new(dependent.clone(), quoted.raw))
}

/// Amounts for currency A and B, in that order.
pub fn parsed_amounts(
    form: &MintFormState,
    (currency_a, currency_b): (Option<&Currency>, Option<&Currency>),
    pair: Option<&Pair>,
    no_liquidity: bool,
    chain_id: ChainId,
) -> (Option<CurrencyAmount>, Option<CurrencyAmount>) {
    let (independent_currency, dependent_currency) = match form.independent_field {
        Field::CurrencyA => (currency_a, currency_b),
        Field::CurrencyB => (currency_b, currency_a),
    };

    let independent =
        independent_currency.and_then(|currency| try_parse_amount(&form.typed_value, currency));
    let dependent = dependent_currency.and_then(|currency| {
        if no_liquidity {
            return try_parse_amount(&form.other_typed_value, currency);
        }
        quote_dependent(pair?, independent.as_ref()?, currency, chain_id)
            .filter(|amount| !amount.is_zero())
    });

    match form.independent_field {
        Field::CurrencyA => (independent, dependent),
        Field::CurrencyB => (dependent, independent),
    }
}

/// Price of A in B: the pool's when it has liquidity, the deposit ratio otherwise.
pub fn mint_price(
    pair: Option<&Pair>,
    (amount_a, amount_b): (Option<&CurrencyAmount>, Option<&CurrencyAmount>),
    currency_a: Option<&Currency>,
    no_liquidity: bool,
    chain_id: ChainId,
) -> Option<Price> {
    if no_liquidity {
        let (amount_a, amount_b) = (amount_a?, amount_b?);
        return Some(Price::from_amounts(amount_a, amount_b));
    }
    pair?.price_of(&currency_a?.wrapped(chain_id)).ok()
}

/// Pool tokens the deposit would mint.
pub fn liquidity_minted(
    pair: &Pair,
    total_supply: U256,
    (amount_a, amount_b): (&CurrencyAmount, &CurrencyAmount),
    chain_id: ChainId,
) -> Option<CurrencyAmount> {
    let total_supply = CurrencyAmount::from_token(pair.liquidity_token(), total_supply);
    pair.get_liquidity_minted(
        &total_supply,
        &amount_a.wrapped(chain_id),
        &amount_b.wrapped(chain_id),
    )
    .ok()
}

/// Share of the pool after the deposit.
pub fn pool_token_percentage(liquidity_minted: &CurrencyAmount, total_supply: U256) -> Option<Percent> {
    let after = total_supply.checked_add(liquidity_minted.raw)?;
    (after != U256::ZERO).then(|| Percent::new(liquidity_minted.raw, after))
}

/// The first reason the deposit can't go ahead, if any.
pub fn mint_input_error(
    connected: bool,
    currencies: (Option<&Currency>, Option<&Currency>),
    amounts: (Option<&CurrencyAmount>, Option<&CurrencyAmount>),
    balances: (Option<&CurrencyAmount>, Option<&CurrencyAmount>),
    chain_id: ChainId,
) -> Option<String> {
    if !connected {
        return Some("Connect Wallet".to_string());
    }
    let valid_pair = match currencies {
        (Some(a), Some(b)) => wrapped_tokens(chain_id, a, b).is_ok(),
        _ => false,
    };
    if !valid_pair {
        return Some("Invalid pair".to_string());
    }
    let (Some(amount_a), Some(amount_b)) = amounts else {
        return Some("Enter an amount".to_string());
    };

    [(amount_a, balances.0), (amount_b, balances.1)]
        .into_iter()
        .find(|(amount, balance)| balance.is_some_and(|balance| balance.less_than(amount)))
        .map(|(amount, _)| format!("Insufficient {} balance", amount.currency.symbol(chain_id)))
}

/// The least of `amount` the router may take. A new pool takes exactly what
/// was typed.
pub fn minimum_amount(amount: &CurrencyAmount, slippage_bips: u16, no_liquidity: bool) -> U256 {
    if no_liquidity {
        return amount.raw;
    }
    let keep = BIPS_BASE.saturating_sub(U256::from(slippage_bips));
    mul_div(amount.raw, keep, BIPS_BASE).unwrap_or(U256::ZERO)
}

/// Builds the router call for the deposit. A native side is sent as value.
pub fn supply_transaction(
    account: &str,
    (amount_a, amount_b): (&CurrencyAmount, &CurrencyAmount),
    slippage_bips: u16,
    no_liquidity: bool,
    deadline: u64,
) -> Result<TransactionRequest, Error> {
    let minimum = |amount| minimum_amount(amount, slippage_bips, no_liquidity);

    match (amount_a.token(), amount_b.token()) {
        (None, Some(token)) => ROUTER.add_liquidity_eth(
            account,
            (&token.address, amount_b.raw, minimum(amount_b)),
            (amount_a.raw, minimum(amount_a)),
            deadline,
        ),
        (Some(token), None) => ROUTER.add_liquidity_eth(
            account,
            (&token.address, amount_a.raw, minimum(amount_a)),
            (amount_b.raw, minimum(amount_b)),
            deadline,
        ),
        (Some(token_a), Some(token_b)) => ROUTER.add_liquidity(
            account,
            (&token_a.address, amount_a.raw, minimum(amount_a)),
            (&token_b.address, amount_b.raw, minimum(amount_b)),
            deadline,
        ),
        (None, None) => Err(Error::generic("Invalid pair")),
    }
}

/// Confirmation modal and transaction progress.
#[derive(Debug, Clone, Default)]
pub struct AddPageState {
    pub show_confirm: bool,
    pub submission: Submission<String>,
}

impl AddPageState {
    pub fn attempting_txn(&self) -> bool {
        self.submission.is_pending()
    }

    pub fn tx_hash(&self) -> Option<&str> {
        self.submission.value().map(String::as_str)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.submission.error()
    }

    pub fn open_confirm(&mut self) {
        self.show_confirm = true;
        self.submission.reset();
    }

    pub fn begin_supply(&mut self) -> Result<(), Error> {
        self.submission.begin()
    }

    /// Records the outcome. Returns true when the form should be cleared.
    pub fn finish_supply<E: Display>(&mut self, result: Result<String, E>) -> bool {
        let succeeded = result.is_ok();
        self.submission.resolve(result);
        succeeded
    }

    pub fn dismiss(&mut self) {
        self.show_confirm = false;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApproveButton {
    pub label: String,
    pub disabled: bool,
    pub pending: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplyButton {
    pub label: String,
    pub disabled: bool,
    pub error: bool,
}

/// Inputs to [`evaluate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MintConditions {
    pub connected: bool,
    pub input_error: Option<String>,
    pub has_amounts: bool,
    pub approval_a: ApprovalState,
    pub approval_b: ApprovalState,
    pub symbol_a: String,
    pub symbol_b: String,
}

/// What sits under the add liquidity form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintAction {
    ConnectWallet,
    Supply {
        approve_a: Option<ApproveButton>,
        approve_b: Option<ApproveButton>,
        supply: SupplyButton,
    },
}

fn approve_button(approval: ApprovalState, symbol: &str) -> Option<ApproveButton> {
    match approval {
        ApprovalState::NotApproved => Some(ApproveButton {
            label: format!("Approve {symbol}"),
            disabled: false,
            pending: false,
        }),
        ApprovalState::Pending => Some(ApproveButton {
            label: format!("Approving {symbol}"),
            disabled: true,
            pending: true,
        }),
        ApprovalState::Approved | ApprovalState::Unknown => None,
    }
}

pub fn evaluate(conditions: &MintConditions) -> MintAction {
    if !conditions.connected {
        return MintAction::ConnectWallet;
    }
    let is_valid = conditions.input_error.is_none();
    let needs_approval = |approval| matches!(approval, ApprovalState::NotApproved | ApprovalState::Pending);
    let show_approvals =
        is_valid && (needs_approval(conditions.approval_a) || needs_approval(conditions.approval_b));

    let (approve_a, approve_b) = if show_approvals {
        (
            approve_button(conditions.approval_a, &conditions.symbol_a),
            approve_button(conditions.approval_b, &conditions.symbol_b),
        )
    } else {
        (None, None)
    };

    MintAction::Supply {
        approve_a,
        approve_b,
        supply: SupplyButton {
            label: conditions
                .input_error
                .clone()
                .unwrap_or_else(|| "Supply".to_string()),
            disabled: !is_valid
                || conditions.approval_a != ApprovalState::Approved
                || conditions.approval_b != ApprovalState::Approved,
            error: !is_valid && conditions.has_amounts,
        },
    }
}
