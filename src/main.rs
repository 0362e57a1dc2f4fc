//! Credit card account console
//!
//! # Usage
//!
//! ```bash
//! cargo run                      # prompts for APR and credit limit
//! cargo run -- account.json      # loads an AccountConfig
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use std::env;
use std::fs;
use std::io;
use std::process;

use chrono::{DateTime, TimeZone, Utc};
use credit_card_ledger::{Account, AccountConfig, AccountError, Console, Result};
use hourglass_rs::{SafeTimeProvider, TimeSource};

/// opening day used when no config file is given: 2012-02-27 00:00 GMT
const DEFAULT_START_EPOCH: i64 = 1_330_300_800;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let clock = SafeTimeProvider::new(TimeSource::System);
    let mut console = Console::new(stdin.lock(), stdout.lock(), clock);

    let config = match env::args().nth(1) {
        Some(path) => AccountConfig::from_json(&fs::read_to_string(path)?)?,
        None => console.prompt_config(default_start()?)?,
    };

    let mut account = Account::from_config(config)?;
    console.run(&mut account)
}

fn default_start() -> Result<DateTime<Utc>> {
    Utc.timestamp_opt(DEFAULT_START_EPOCH, 0)
        .single()
        .ok_or(AccountError::InvalidDate {
            message: format!("invalid default start {}", DEFAULT_START_EPOCH),
        })
}
