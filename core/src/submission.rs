use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::warn;

/// Progress of a user-triggered async operation, such as sending a transaction.
///
/// Only one operation may be in flight at a time: [`Submission::begin`] refuses
/// to start while another is pending.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Submission<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for Submission<T> {
    fn default() -> Self {
        Submission::Idle
    }
}

impl<T> Submission<T> {
    pub fn begin(&mut self) -> Result<(), Error> {
        if self.is_pending() {
            warn!("ignoring submission while another is pending");
            return Err(Error::Busy);
        }
        *self = Submission::Pending;
        Ok(())
    }

    pub fn resolve<E: Display>(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(value) => Submission::Succeeded(value),
            Err(error) => Submission::Failed(error.to_string()),
        };
    }

    pub fn reset(&mut self) {
        *self = Submission::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Submission::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Submission::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Submission::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_flight() {
        let mut submission = Submission::<String>::default();
        assert_eq!(submission.begin(), Ok(()));
        assert_eq!(submission.begin(), Err(Error::Busy));
        assert!(submission.is_pending());
    }

    #[test]
    fn test_success_clears_error() {
        let mut submission = Submission::Failed("rejected".to_string());
        submission.begin().unwrap();
        submission.resolve::<Error>(Ok("0xabc".to_string()));

        assert_eq!(submission.value(), Some(&"0xabc".to_string()));
        assert_eq!(submission.error(), None);
        assert!(!submission.is_pending());
    }

    #[test]
    fn test_failure_keeps_message() {
        let mut submission = Submission::<String>::default();
        submission.begin().unwrap();
        submission.resolve(Err(Error::Reverted("0xabc".to_string())));

        assert_eq!(submission.value(), None);
        assert_eq!(submission.error(), Some("Transaction reverted: 0xabc"));

        // a failed submission can be retried
        assert_eq!(submission.begin(), Ok(()));
    }
}
