pub mod accrual;
pub mod cycle;

pub use accrual::{BalanceEngine, CycleAccrual};
pub use cycle::{CycleCalculator, DAYS_PER_CYCLE};
