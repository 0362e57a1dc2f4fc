use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::RejectionReason;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("credit limit exceeded: limit {limit}, projected balance {projected}")]
    CreditLimitExceeded {
        limit: Money,
        projected: Money,
    },

    #[error("balance would go negative: projected balance {projected}")]
    NegativeBalance {
        projected: Money,
    },

    #[error("invalid transaction amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AccountError {
    /// build the rejection error for a breached business rule
    pub fn from_rejection(reason: RejectionReason, limit: Money, projected: Money) -> Self {
        match reason {
            RejectionReason::ExceedsCreditLimit => {
                AccountError::CreditLimitExceeded { limit, projected }
            }
            RejectionReason::NegativeBalance => AccountError::NegativeBalance { projected },
        }
    }

    /// a balance computation left the representable decimal range
    pub fn overflow(operation: &str) -> Self {
        AccountError::CalculationError {
            message: format!("{} overflowed", operation),
        }
    }

    /// true when a well-formed transaction was refused by the limit rules
    pub fn is_rejection(&self) -> bool {
        self.rejection_reason().is_some()
    }

    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        match self {
            AccountError::CreditLimitExceeded { .. } => Some(RejectionReason::ExceedsCreditLimit),
            AccountError::NegativeBalance { .. } => Some(RejectionReason::NegativeBalance),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AccountError>;
