//! Interactive command loop over any reader/writer pair.
//!
//! Input is consumed as whitespace separated tokens, so a command and its
//! arguments may share a line (`c 500 0`) or arrive one per line.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use log::debug;

use crate::account::Account;
use crate::config::AccountConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{AccountError, Result};
use crate::types::{Posting, TransactionKind};
use crate::view::AccountView;

const HELP: &str = "\
p\tAdd a payment
c\tAdd a charge
b\tGet a balance
n\tGet today's balance
s\tShow an account summary
h\tDisplay this help message
q\tQuit";

pub struct Console<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
    clock: SafeTimeProvider,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clock: SafeTimeProvider) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
            clock,
        }
    }

    /// ask for the account terms, opening on `start_date`
    pub fn prompt_config(&mut self, start_date: DateTime<Utc>) -> Result<AccountConfig> {
        let apr = self.ask("APR (as decimal)? ", |s| Rate::from_str_exact(s).ok())?;
        let credit_limit = self.ask("Credit Limit? ", |s| Money::from_str_exact(s).ok())?;

        let config = AccountConfig::new(apr, credit_limit, start_date);
        config.validate()?;
        Ok(config)
    }

    /// run commands until `q` or end of input
    pub fn run(&mut self, account: &mut Account) -> Result<()> {
        self.print_help()?;

        while let Some(token) = self.next_token()? {
            debug!("command {:?}", token);
            let outcome = match token.as_str() {
                "p" => self.post(account, TransactionKind::Payment),
                "c" => self.post(account, TransactionKind::Charge),
                "b" => self.balance_on_day(account),
                "n" => self.balance_today(account),
                "s" => self.summary(account),
                "h" => self.print_help(),
                "q" => break,
                other => {
                    writeln!(self.output, "Unknown command '{}'. Type h for help.", other)?;
                    Ok(())
                }
            };

            match outcome {
                Ok(()) => {}
                Err(AccountError::Io(e)) => return Err(AccountError::Io(e)),
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn print_help(&mut self) -> Result<()> {
        writeln!(self.output, "Hello!")?;
        writeln!(self.output, "{}", HELP)?;
        Ok(())
    }

    fn post(&mut self, account: &mut Account, kind: TransactionKind) -> Result<()> {
        let amount: Money =
            self.ask(&format!("How much was the {}? ", kind), |s| Money::from_str(s).ok())?;
        let day: u32 = self.ask(
            "How many days after the account opening did it happen? ",
            |s| s.parse().ok(),
        )?;

        let label = match kind {
            TransactionKind::Charge => "Charge",
            TransactionKind::Payment => "Payment",
        };

        match account.add_transaction(kind, amount, day) {
            Ok(Posting::Posted) => writeln!(self.output, "{} was successful!", label)?,
            Ok(Posting::Corrected { breach: None }) => {
                writeln!(self.output, "{} was recorded as a correction.", label)?
            }
            Ok(Posting::Corrected { breach: Some(reason) }) => writeln!(
                self.output,
                "{} was recorded as a correction, but the balance is now outside limits ({:?}).",
                label, reason
            )?,
            Err(e) if e.is_rejection() => writeln!(self.output, "{} was too much!", label)?,
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn balance_on_day(&mut self, account: &Account) -> Result<()> {
        let day: u32 = self.ask("On what day did you want the balance? ", |s| s.parse().ok())?;
        let balance = account.balance_on_day(day)?;
        writeln!(
            self.output,
            "Balance on {} after starting account: {}",
            day,
            balance.round_dp(2)
        )?;
        Ok(())
    }

    fn balance_today(&mut self, account: &Account) -> Result<()> {
        let day = account.day_of(self.clock.now())?;
        let balance = account.balance_on_day(day)?;
        writeln!(self.output, "Balance today (day {}): {}", day, balance.round_dp(2))?;
        Ok(())
    }

    fn summary(&mut self, account: &Account) -> Result<()> {
        let json = AccountView::from_account(account).to_json_pretty()?;
        writeln!(self.output, "{}", json)?;
        Ok(())
    }

    /// prompt, then parse the next token
    fn ask<T, F>(&mut self, prompt: &str, parse: F) -> Result<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let token = self.next_token()?.ok_or(AccountError::InvalidInput {
            message: "unexpected end of input".to_string(),
        })?;

        parse(&token).ok_or(AccountError::InvalidInput {
            message: format!("could not understand '{}'", token),
        })
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}
