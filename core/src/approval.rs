use ethnum::U256;
use serde::{Deserialize, Serialize};
use soku_sdk::CurrencyAmount;

/// Whether a spender may move the amount about to be traded.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalState {
    /// Allowance not loaded yet, or nothing to approve against.
    #[default]
    Unknown,
    NotApproved,
    /// An approval transaction is in flight.
    Pending,
    Approved,
}

/// Native currency never needs approval. A pending approval wins over a stale
/// allowance.
pub fn approval_state(
    amount_to_approve: Option<&CurrencyAmount>,
    allowance: Option<U256>,
    pending_approval: bool,
) -> ApprovalState {
    let Some(amount) = amount_to_approve else {
        return ApprovalState::Unknown;
    };
    if amount.currency.is_native() {
        return ApprovalState::Approved;
    }
    let Some(allowance) = allowance else {
        return ApprovalState::Unknown;
    };

    if allowance < amount.raw {
        if pending_approval {
            ApprovalState::Pending
        } else {
            ApprovalState::NotApproved
        }
    } else {
        ApprovalState::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use soku_sdk::{ChainId, Token};

    fn dai(raw: u128) -> CurrencyAmount {
        let token = Token::new(
            ChainId::Mainnet,
            "0x6B175474E89094C44Da98b954EedeAC495271d0F",
            18,
            "DAI",
            "Dai Stablecoin",
        );
        CurrencyAmount::from_token(token, U256::new(raw))
    }

    #[test]
    fn test_approval_states() {
        assert_eq!(approval_state(None, Some(U256::MAX), false), ApprovalState::Unknown);
        assert_eq!(approval_state(Some(&dai(10)), None, false), ApprovalState::Unknown);
        assert_eq!(approval_state(Some(&dai(10)), Some(U256::new(9)), false), ApprovalState::NotApproved);
        assert_eq!(approval_state(Some(&dai(10)), Some(U256::new(9)), true), ApprovalState::Pending);
        assert_eq!(approval_state(Some(&dai(10)), Some(U256::new(10)), true), ApprovalState::Approved);
    }

    #[test]
    fn test_native_is_always_approved() {
        let ether = CurrencyAmount::native(U256::new(10));
        assert_eq!(approval_state(Some(&ether), None, false), ApprovalState::Approved);
    }
}
