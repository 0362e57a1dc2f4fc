use std::ops::Range;

use log::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{AccountError, Result};
use crate::interest::cycle::{CycleCalculator, DAYS_PER_CYCLE};
use crate::ledger::Ledger;
use crate::transaction::Transaction;

/// outcome of running one billing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleAccrual {
    pub opening: Money,
    /// net effect of the cycle's charges and payments
    pub activity: Money,
    /// interest realized when the cycle closes
    pub interest: Money,
    pub closing: Money,
}

/// balance engine: replays ledger ranges, realizing interest at cycle close
///
/// Interest accrues daily at `apr / 365` on the balance held over each gap
/// between transactions, but is only added to the balance when a cycle
/// closes. A cycle that is still open when the requested day falls inside it
/// contributes its transactions and no interest.
///
/// Every step is checked; a balance that leaves the decimal range is reported
/// as `AccountError::CalculationError`.
#[derive(Debug, Clone, Copy)]
pub struct BalanceEngine {
    apr: Rate,
}

impl BalanceEngine {
    pub fn new(apr: Rate) -> Self {
        Self { apr }
    }

    /// run one complete cycle's transactions and close it
    pub fn accrue_cycle(
        &self,
        opening: Money,
        transactions: &[Transaction],
        calculator: &CycleCalculator,
    ) -> Result<CycleAccrual> {
        let mut balance = opening;
        let mut interest = Money::ZERO;
        let mut prev_day = 0;

        for tx in transactions {
            let day = calculator.day_in_cycle(tx.timestamp());
            interest = self.accrue(interest, balance, day.saturating_sub(prev_day))?;
            prev_day = day;
            balance = apply(balance, tx)?;
        }

        interest = self.accrue(interest, balance, DAYS_PER_CYCLE - prev_day)?;

        Ok(CycleAccrual {
            opening,
            activity: balance
                .checked_sub(opening)
                .ok_or_else(|| AccountError::overflow("cycle activity"))?,
            interest,
            closing: balance
                .checked_add(interest)
                .ok_or_else(|| AccountError::overflow("cycle close"))?,
        })
    }

    /// interest for a whole cycle without transactions
    pub fn flat_cycle_interest(&self, balance: Money) -> Result<Money> {
        balance
            .apply_rate(self.apr, DAYS_PER_CYCLE)
            .ok_or_else(|| AccountError::overflow("cycle interest"))
    }

    /// balance after replaying `range` of the ledger from `opening`, with
    /// every cycle before `target_cycle` closed
    pub fn recompute_range(
        &self,
        ledger: &Ledger,
        opening: Money,
        range: Range<usize>,
        target_cycle: u32,
    ) -> Result<Money> {
        let transactions = ledger.transactions();
        let calc = ledger.calculator();
        let end = range.end.min(transactions.len());
        let mut start = range.start;

        if start >= end {
            return Ok(opening);
        }

        let mut balance = opening;
        let mut prev_cycle = calc.cycle_of_transaction(&transactions[start]);

        while start < end {
            let cycle = calc.cycle_of_transaction(&transactions[start]);

            // cycles with no transactions at all between two populated ones
            if cycle > prev_cycle + 1 {
                balance = self.close_empty_cycles(balance, prev_cycle + 1..cycle)?;
            }

            let cycle_end = ledger.cycle_range(cycle).end.clamp(start + 1, end);

            if cycle_end < end {
                let accrual = self.accrue_cycle(balance, &transactions[start..cycle_end], calc)?;
                debug!(
                    "cycle {} closed: opening {}, activity {}, interest {}",
                    cycle, accrual.opening, accrual.activity, accrual.interest
                );
                balance = accrual.closing;
                prev_cycle = cycle;
            } else if cycle < target_cycle {
                // last populated cycle, but the target lies beyond it
                let accrual = self.accrue_cycle(balance, &transactions[start..end], calc)?;
                debug!(
                    "cycle {} closed for projection to cycle {}: interest {}",
                    cycle, target_cycle, accrual.interest
                );
                balance = accrual.closing;
                prev_cycle = cycle + 1;
            } else {
                // the target day is inside this still-open cycle
                balance = transactions[start..end].iter().try_fold(balance, apply)?;
                prev_cycle = cycle;
            }

            start = cycle_end;
        }

        if prev_cycle < target_cycle {
            balance = self.close_empty_cycles(balance, prev_cycle..target_cycle)?;
        }

        Ok(balance)
    }

    fn accrue(&self, accrued: Money, balance: Money, days: u32) -> Result<Money> {
        balance
            .apply_rate(self.apr, days)
            .and_then(|interest| accrued.checked_add(interest))
            .ok_or_else(|| AccountError::overflow("daily interest"))
    }

    /// compound flat interest over `cycles`; stops early once interest is zero
    fn close_empty_cycles(&self, mut balance: Money, cycles: Range<u32>) -> Result<Money> {
        for cycle in cycles {
            let interest = self.flat_cycle_interest(balance)?;
            if interest.is_zero() {
                break;
            }
            debug!("cycle {} closed without activity: interest {}", cycle, interest);
            balance = balance
                .checked_add(interest)
                .ok_or_else(|| AccountError::overflow(&format!("cycle {} close", cycle)))?;
        }
        Ok(balance)
    }
}

/// balance after one transaction
fn apply(balance: Money, tx: &Transaction) -> Result<Money> {
    balance
        .checked_add(tx.signed_amount())
        .ok_or_else(|| AccountError::overflow("transaction"))
}
