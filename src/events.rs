use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{AccountId, RejectionReason, TransactionKind};

/// all events that can be emitted by an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    AccountOpened {
        account_id: AccountId,
        apr: Rate,
        credit_limit: Money,
        start_date: DateTime<Utc>,
    },
    TransactionPosted {
        account_id: AccountId,
        kind: TransactionKind,
        amount: Money,
        timestamp: DateTime<Utc>,
        balance: Money,
    },
    TransactionRejected {
        account_id: AccountId,
        kind: TransactionKind,
        amount: Money,
        timestamp: DateTime<Utc>,
        projected_balance: Money,
        reason: RejectionReason,
    },
    CorrectionApplied {
        account_id: AccountId,
        kind: TransactionKind,
        amount: Money,
        timestamp: DateTime<Utc>,
        balance: Money,
        breach: Option<RejectionReason>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
