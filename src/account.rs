use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::config::AccountConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{AccountError, Result};
use crate::events::{Event, EventStore};
use crate::interest::BalanceEngine;
use crate::ledger::Ledger;
use crate::time;
use crate::transaction::{Transaction, TransactionFactory};
use crate::types::{AccountId, CorrectionPolicy, Posting, RejectionReason, TransactionKind};

/// how far above the credit limit a projected balance may land
const LIMIT_TOLERANCE: Decimal = dec!(0.000001);

/// a single credit card account
///
/// The cached balance is the balance right after the newest accepted
/// transaction: earlier cycles closed with interest, the newest cycle's
/// transactions applied without interest.
pub struct Account {
    id: AccountId,
    config: AccountConfig,
    ledger: Ledger,
    engine: BalanceEngine,
    factory: TransactionFactory,
    balance: Money,
    balance_as_of: Option<DateTime<Utc>>,
    pub events: EventStore,
}

impl Account {
    /// open an account with the default correction policy
    pub fn new(apr: Rate, credit_limit: Money, start_date: DateTime<Utc>) -> Result<Self> {
        Self::from_config(AccountConfig::new(apr, credit_limit, start_date))
    }

    /// open an account from a validated configuration
    pub fn from_config(config: AccountConfig) -> Result<Self> {
        config.validate()?;

        let id = Uuid::new_v4();
        let mut events = EventStore::new();
        events.emit(Event::AccountOpened {
            account_id: id,
            apr: config.apr,
            credit_limit: config.credit_limit,
            start_date: config.start_date,
        });

        info!(
            "opened account {}: apr {}, limit {}, start {}",
            id, config.apr, config.credit_limit, config.start_date
        );

        Ok(Self {
            id,
            ledger: Ledger::new(config.start_date),
            engine: BalanceEngine::new(config.apr),
            factory: TransactionFactory::new(config.start_date),
            balance: Money::ZERO,
            balance_as_of: None,
            events,
            config,
        })
    }

    pub fn builder() -> AccountBuilder {
        AccountBuilder::new()
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    pub fn apr(&self) -> Rate {
        self.config.apr
    }

    pub fn credit_limit(&self) -> Money {
        self.config.credit_limit
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.config.start_date
    }

    pub fn correction_policy(&self) -> CorrectionPolicy {
        self.config.correction_policy
    }

    pub fn transaction_count(&self) -> usize {
        self.ledger.len()
    }

    /// all transactions, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// number of cycles up to and including the newest transaction's
    pub fn cycle_count(&self) -> u32 {
        self.ledger.last_cycle().map_or(0, |cycle| cycle + 1)
    }

    /// cached balance and the timestamp it was computed for, no recomputation
    pub fn current_balance(&self) -> (Money, Option<DateTime<Utc>>) {
        (self.balance, self.balance_as_of)
    }

    pub fn add_charge(&mut self, amount: Money, day: u32) -> Result<Posting> {
        self.add_transaction(TransactionKind::Charge, amount, day)
    }

    pub fn add_payment(&mut self, amount: Money, day: u32) -> Result<Posting> {
        self.add_transaction(TransactionKind::Payment, amount, day)
    }

    /// post a transaction `day` days after opening
    ///
    /// The newest transaction is checked against the credit limit and zero
    /// floor and rolled back on breach. A transaction dated before the newest
    /// one is a correction and goes through `apply_correction` rules.
    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        amount: Money,
        day: u32,
    ) -> Result<Posting> {
        let transaction = self.factory.make(amount, kind, day)?;

        if self.ledger.insertion_point(transaction.timestamp()) < self.ledger.len() {
            self.post_correction(transaction)
        } else {
            self.post_forward(transaction)
        }
    }

    /// insert a transaction into history and rebuild the balance from scratch
    ///
    /// Under `CorrectionPolicy::AlwaysAccept` the correction is kept even if
    /// the rebuilt balance breaches the limits; the breach is reported in the
    /// returned `Posting`.
    pub fn apply_correction(
        &mut self,
        kind: TransactionKind,
        amount: Money,
        day: u32,
    ) -> Result<Posting> {
        let transaction = self.factory.make(amount, kind, day)?;
        self.post_correction(transaction)
    }

    /// balance at the end of `day`, from the ledger alone
    ///
    /// Fails with `InvalidDate` for a day outside the calendar and with
    /// `CalculationError` when the projection leaves the decimal range.
    pub fn balance_on_day(&self, day: u32) -> Result<Money> {
        let when = time::add_days(self.start_date(), i64::from(day))?;
        let target_cycle = self.ledger.calculator().cycle_of(when);

        let Some(last) = self.ledger.last_at_or_before_day(day) else {
            return Ok(Money::ZERO);
        };
        self.engine.recompute_range(&self.ledger, Money::ZERO, 0..last + 1, target_cycle)
    }

    /// day offset of an instant relative to the opening day
    pub fn day_of(&self, instant: DateTime<Utc>) -> Result<u32> {
        let days = self.ledger.calculator().days_since_start(instant);
        u32::try_from(days).map_err(|_| AccountError::InvalidDate {
            message: format!("{} is before the account opened on {}", instant, self.start_date()),
        })
    }

    /// balance at the end of the current day of the time provider
    pub fn balance_today(&self, time_provider: &SafeTimeProvider) -> Result<Money> {
        let day = self.day_of(time_provider.now())?;
        self.balance_on_day(day)
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    fn post_forward(&mut self, transaction: Transaction) -> Result<Posting> {
        let cycle = self.ledger.calculator().cycle_of_transaction(&transaction);
        let balance = self.close_open_cycle(cycle)?;

        let index = self.ledger.insert_sorted(transaction);
        let range = index..self.ledger.len();
        let projected = match self.engine.recompute_range(&self.ledger, balance, range, cycle) {
            Ok(projected) => projected,
            Err(e) => {
                self.ledger.remove(index);
                return Err(e);
            }
        };

        if let Some(reason) = self.breach(projected) {
            self.ledger.remove(index);
            return Err(self.reject(transaction, projected, reason));
        }

        self.balance = projected;
        self.balance_as_of = Some(transaction.timestamp());

        debug!(
            "posted {} of {} on {}, balance {}",
            transaction.kind(),
            transaction.amount(),
            transaction.timestamp(),
            projected
        );
        self.events.emit(Event::TransactionPosted {
            account_id: self.id,
            kind: transaction.kind(),
            amount: transaction.amount(),
            timestamp: transaction.timestamp(),
            balance: projected,
        });

        Ok(Posting::Posted)
    }

    fn post_correction(&mut self, transaction: Transaction) -> Result<Posting> {
        let index = self.ledger.insert_sorted(transaction);
        let target_cycle = self.ledger.last_cycle().unwrap_or(0);
        let all = 0..self.ledger.len();
        let replayed = self.engine.recompute_range(&self.ledger, Money::ZERO, all, target_cycle);
        let projected = match replayed {
            Ok(projected) => projected,
            Err(e) => {
                self.ledger.remove(index);
                return Err(e);
            }
        };
        let breach = self.breach(projected);

        if let Some(reason) = breach {
            if self.config.correction_policy == CorrectionPolicy::Enforce {
                self.ledger.remove(index);
                return Err(self.reject(transaction, projected, reason));
            }
            warn!(
                "correction {} of {} on {} leaves balance {} outside limits ({:?})",
                transaction.kind(),
                transaction.amount(),
                transaction.timestamp(),
                projected,
                reason
            );
        }

        self.balance = projected;
        self.balance_as_of = self.ledger.last().map(|tx| tx.timestamp());

        self.events.emit(Event::CorrectionApplied {
            account_id: self.id,
            kind: transaction.kind(),
            amount: transaction.amount(),
            timestamp: transaction.timestamp(),
            balance: projected,
            breach,
        });

        Ok(Posting::Corrected { breach })
    }

    /// cached balance with the newest cycle closed when `cycle` lies past it
    fn close_open_cycle(&self, cycle: u32) -> Result<Money> {
        let last_cycle = match self.ledger.last_cycle() {
            Some(last_cycle) if cycle > last_cycle => last_cycle,
            _ => return Ok(self.balance),
        };

        // back out the raw open-cycle deltas, then replay the cycle with interest
        let open = self.ledger.find_cycle_start(last_cycle)..self.ledger.len();
        let opening = self.ledger.transactions()[open.clone()]
            .iter()
            .try_fold(self.balance, |acc, tx| acc.checked_sub(tx.signed_amount()))
            .ok_or_else(|| AccountError::overflow("open cycle reversal"))?;

        self.engine.recompute_range(&self.ledger, opening, open, cycle)
    }

    fn breach(&self, projected: Money) -> Option<RejectionReason> {
        let over_limit = projected
            .checked_sub(self.credit_limit())
            .is_some_and(|excess| excess.as_decimal() > LIMIT_TOLERANCE);

        if over_limit {
            Some(RejectionReason::ExceedsCreditLimit)
        } else if projected.is_negative() {
            Some(RejectionReason::NegativeBalance)
        } else {
            None
        }
    }

    fn reject(
        &mut self,
        transaction: Transaction,
        projected: Money,
        reason: RejectionReason,
    ) -> AccountError {
        warn!(
            "rejected {} of {} on {}: projected balance {} ({:?})",
            transaction.kind(),
            transaction.amount(),
            transaction.timestamp(),
            projected,
            reason
        );
        self.events.emit(Event::TransactionRejected {
            account_id: self.id,
            kind: transaction.kind(),
            amount: transaction.amount(),
            timestamp: transaction.timestamp(),
            projected_balance: projected,
            reason,
        });

        AccountError::from_rejection(reason, self.credit_limit(), projected)
    }
}

/// builder for accounts
#[derive(Debug, Default)]
pub struct AccountBuilder {
    apr: Option<Rate>,
    credit_limit: Option<Money>,
    start_date: Option<DateTime<Utc>>,
    correction_policy: CorrectionPolicy,
}

impl AccountBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apr(mut self, apr: Rate) -> Self {
        self.apr = Some(apr);
        self
    }

    pub fn credit_limit(mut self, limit: Money) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    pub fn start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// open the account at midnight of the provider's current day
    pub fn opened_today(mut self, time_provider: &SafeTimeProvider) -> Self {
        self.start_date = Some(time::normalize_to_midnight(time_provider.now()));
        self
    }

    pub fn correction_policy(mut self, policy: CorrectionPolicy) -> Self {
        self.correction_policy = policy;
        self
    }

    pub fn build(self) -> Result<Account> {
        let apr = self.apr.ok_or(AccountError::InvalidConfiguration {
            message: "APR required".to_string(),
        })?;

        let credit_limit = self.credit_limit.ok_or(AccountError::InvalidConfiguration {
            message: "Credit limit required".to_string(),
        })?;

        let start_date = self.start_date.ok_or(AccountError::InvalidConfiguration {
            message: "Start date required".to_string(),
        })?;

        Account::from_config(AccountConfig {
            apr,
            credit_limit,
            start_date,
            correction_policy: self.correction_policy,
        })
    }
}
