use std::ops::Range;

use chrono::{DateTime, Utc};

use crate::interest::CycleCalculator;
use crate::transaction::Transaction;

/// transactions of one account, ordered by timestamp
///
/// Transactions are stored by value and addressed by index. Equal timestamps
/// keep their insertion order.
#[derive(Debug, Clone)]
pub struct Ledger {
    calculator: CycleCalculator,
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(start_date: DateTime<Utc>) -> Self {
        Self {
            calculator: CycleCalculator::new(start_date),
            transactions: Vec::new(),
        }
    }

    pub fn calculator(&self) -> &CycleCalculator {
        &self.calculator
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// cycle of the newest transaction
    pub fn last_cycle(&self) -> Option<u32> {
        self.last().map(|tx| self.calculator.cycle_of_transaction(tx))
    }

    /// first index at or after `from` whose transaction matches, or `len()`
    pub fn position<P>(&self, from: usize, predicate: P) -> usize
    where
        P: Fn(&Transaction) -> bool,
    {
        self.transactions
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, tx)| predicate(tx))
            .map_or(self.transactions.len(), |(index, _)| index)
    }

    /// index of the first transaction in `cycle` or any later cycle
    pub fn find_cycle_start(&self, cycle: u32) -> usize {
        let calc = self.calculator;
        self.position(0, |tx| calc.cycle_of_transaction(tx) >= cycle)
    }

    /// half-open index range of the transactions belonging to `cycle`
    ///
    /// The range is empty (and positioned at `len()`) when the cycle has no
    /// transactions.
    pub fn cycle_range(&self, cycle: u32) -> Range<usize> {
        let calc = self.calculator;
        let begin = self.position(0, |tx| calc.cycle_of_transaction(tx) == cycle);

        // walk back from the next cycle's anchor to the last member of this one
        let mut end = self.find_cycle_start(cycle + 1);
        while end > begin && calc.cycle_of_transaction(&self.transactions[end - 1]) != cycle {
            end -= 1;
        }

        begin..end.max(begin)
    }

    /// index where a transaction at `timestamp` would be inserted
    pub fn insertion_point(&self, timestamp: DateTime<Utc>) -> usize {
        match self.transactions.last() {
            Some(last) if last.timestamp() > timestamp => {
                self.position(0, |tx| tx.timestamp() > timestamp)
            }
            _ => self.transactions.len(),
        }
    }

    /// insert keeping timestamp order, returns the index used
    pub fn insert_sorted(&mut self, transaction: Transaction) -> usize {
        let index = self.insertion_point(transaction.timestamp());
        self.transactions.insert(index, transaction);
        index
    }

    /// undo an insertion made by `insert_sorted`
    pub fn remove(&mut self, index: usize) -> Transaction {
        self.transactions.remove(index)
    }

    /// index of the most recent transaction posted on or before `day`
    pub fn last_at_or_before_day(&self, day: u32) -> Option<usize> {
        let calc = self.calculator;
        let first = self.transactions.first()?;
        if calc.day_of_transaction(first) > day {
            return None;
        }

        let after = self.position(0, |tx| calc.day_of_transaction(tx) > day);
        Some(after - 1)
    }
}
