pub mod account;
pub mod config;
pub mod console;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod time;
pub mod transaction;
pub mod types;
pub mod view;

// re-export key types
pub use account::{Account, AccountBuilder};
pub use config::AccountConfig;
pub use console::Console;
pub use decimal::{Money, Rate};
pub use errors::{AccountError, Result};
pub use events::{Event, EventStore};
pub use interest::{BalanceEngine, CycleAccrual, CycleCalculator, DAYS_PER_CYCLE};
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionFactory};
pub use types::{AccountId, CorrectionPolicy, Posting, RejectionReason, TransactionKind};
pub use view::AccountView;

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
