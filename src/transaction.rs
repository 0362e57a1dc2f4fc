use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{AccountError, Result};
use crate::time;
use crate::types::TransactionKind;

/// an immutable charge or payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    amount: Money,
    kind: TransactionKind,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// effect on the outstanding balance: charges add, payments subtract
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Charge => self.amount,
            TransactionKind::Payment => -self.amount,
        }
    }
}

/// builds transactions from a day offset relative to the account opening
#[derive(Debug, Clone, Copy)]
pub struct TransactionFactory {
    account_start: DateTime<Utc>,
}

impl TransactionFactory {
    pub fn new(account_start: DateTime<Utc>) -> Self {
        Self { account_start }
    }

    /// create a transaction `days_since_start` days after opening, at midnight
    pub fn make(
        &self,
        amount: Money,
        kind: TransactionKind,
        days_since_start: u32,
    ) -> Result<Transaction> {
        if !amount.is_positive() {
            return Err(AccountError::InvalidAmount { amount });
        }

        let day = time::add_days(self.account_start, i64::from(days_since_start))?;

        Ok(Transaction {
            amount,
            kind,
            timestamp: time::normalize_to_midnight(day),
        })
    }
}
