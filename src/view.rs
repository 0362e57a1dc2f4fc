//! Serializable snapshot of an account.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::decimal::{Money, Rate};
use crate::transaction::Transaction;
use crate::types::{AccountId, CorrectionPolicy};

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountView {
    pub id: AccountId,
    pub terms: TermsView,
    pub balance: BalanceView,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TermsView {
    pub apr: Rate,
    pub credit_limit: Money,
    pub start_date: DateTime<Utc>,
    pub correction_policy: CorrectionPolicy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceView {
    pub current_balance: Money,
    pub as_of: Option<DateTime<Utc>>,
    pub available_credit: Money,
    pub cycle_count: u32,
    pub transaction_count: usize,
}

impl AccountView {
    pub fn from_account(account: &Account) -> Self {
        let config = account.config();
        let (current_balance, as_of) = account.current_balance();
        let available_credit = config
            .credit_limit
            .checked_sub(current_balance)
            .filter(|available| available.is_positive())
            .unwrap_or(Money::ZERO);

        AccountView {
            id: account.id(),
            terms: TermsView {
                apr: config.apr,
                credit_limit: config.credit_limit,
                start_date: config.start_date,
                correction_policy: config.correction_policy,
            },
            balance: BalanceView {
                current_balance,
                as_of,
                available_credit,
                cycle_count: account.cycle_count(),
                transaction_count: account.transaction_count(),
            },
            transactions: account.transactions().to_vec(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_view_reflects_account() {
        let start = Utc.with_ymd_and_hms(2012, 2, 27, 0, 0, 0).unwrap();
        let mut account =
            Account::new(Rate::from_percentage(35), Money::from_major(1_000), start).unwrap();
        account.add_charge(Money::from_major(500), 0).unwrap();
        account.add_payment(Money::from_major(200), 15).unwrap();

        let view = AccountView::from_account(&account);
        assert_eq!(view.id, account.id());
        assert_eq!(view.balance.current_balance, Money::from_major(300));
        assert_eq!(view.balance.available_credit, Money::from_major(700));
        assert_eq!(view.balance.cycle_count, 1);
        assert_eq!(view.transactions.len(), 2);

        let json = view.to_json_pretty().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let balance = parsed["balance"]["current_balance"].as_str().unwrap();
        assert_eq!(balance.parse::<Money>().unwrap(), Money::from_major(300));
        assert_eq!(parsed["terms"]["correction_policy"], "AlwaysAccept");
        assert_eq!(parsed["transactions"][1]["kind"], "Payment");
    }
}
