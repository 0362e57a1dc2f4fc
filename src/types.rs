use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for an account
pub type AccountId = Uuid;

/// direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// card was used to buy something, increases the balance
    Charge,
    /// money paid to the issuer, decreases the balance
    Payment,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Charge => write!(f, "charge"),
            TransactionKind::Payment => write!(f, "payment"),
        }
    }
}

/// why a transaction was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    ExceedsCreditLimit,
    NegativeBalance,
}

/// how back-dated transactions are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CorrectionPolicy {
    /// corrections are always kept, breaches are only reported
    #[default]
    AlwaysAccept,
    /// corrections are held to the same limit rules as new transactions
    Enforce,
}

/// result of a successful posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Posting {
    /// the newest transaction was accepted within limits
    Posted,
    /// a back-dated transaction was inserted into history
    Corrected {
        breach: Option<RejectionReason>,
    },
}

impl Posting {
    pub fn is_correction(&self) -> bool {
        matches!(self, Posting::Corrected { .. })
    }
}
