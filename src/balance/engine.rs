//! Balance reconstruction from a loan's event history
//!
//! Interest is simple within a gap and compounds once per gap: for every run of
//! elapsed days between two events (or between the last event and the as-of
//! date) the balance grows by `balance * daily_rate * days`. Nothing accrues
//! while the balance is zero or negative.

use crate::config::EngineConfig;
use crate::loan::{Loan, LoanEvent};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Balance at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: f64,
}

/// Result of replaying a loan's events up to an as-of date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Outstanding balance as of the report date, floored at zero
    pub current_balance: f64,
    /// Raw balance trajectory; may dip below zero after an overpayment
    pub history: Vec<BalancePoint>,
}

/// Replays disbursements and payments under daily-rate interest
#[derive(Debug, Clone, Copy)]
pub struct BalanceEngine {
    daily_rate: f64,
}

impl BalanceEngine {
    /// Create an engine for an annual rate given in percent
    pub fn new(annual_rate_pct: f64, config: &EngineConfig) -> Self {
        Self {
            daily_rate: config.daily_rate(annual_rate_pct),
        }
    }

    pub fn for_loan(loan: &Loan, config: &EngineConfig) -> Self {
        Self::new(loan.annual_rate, config)
    }

    pub fn daily_rate(&self) -> f64 {
        self.daily_rate
    }

    /// Balance after `days` elapsed days; unchanged for non-positive gaps or balances
    pub fn accrue(&self, balance: f64, days: i64) -> f64 {
        if days > 0 && balance > 0.0 {
            balance + balance * self.daily_rate * days as f64
        } else {
            balance
        }
    }

    /// Replay events (any order; sorted stably by date here) up to `as_of`
    pub fn reconstruct(&self, mut events: Vec<LoanEvent>, as_of: NaiveDate) -> BalanceReport {
        events.sort_by_key(|e| e.date);

        let first = match events.first() {
            Some(event) => event.date,
            None => return BalanceReport::default(),
        };

        let mut balance = 0.0;
        let mut cursor = first;
        let mut history = Vec::with_capacity(events.len() + 2);
        history.push(BalancePoint { date: cursor, balance });

        for event in &events {
            let days = (event.date - cursor).num_days();
            balance = self.accrue(balance, days);
            balance += event.signed_amount();
            history.push(BalancePoint { date: event.date, balance });
            cursor = event.date;
        }

        let days = (as_of - cursor).num_days();
        if days > 0 {
            balance = self.accrue(balance, days);
            history.push(BalancePoint { date: as_of, balance });
        }

        BalanceReport {
            current_balance: balance.max(0.0),
            history,
        }
    }

    /// Current balance only
    pub fn current_balance(&self, events: Vec<LoanEvent>, as_of: NaiveDate) -> f64 {
        self.reconstruct(events, as_of).current_balance
    }
}

/// Reconstruct a loan's balance report as of `as_of`
pub fn loan_balance(loan: &Loan, as_of: NaiveDate, config: &EngineConfig) -> BalanceReport {
    let report = BalanceEngine::for_loan(loan, config).reconstruct(loan.events(), as_of);
    log::debug!(
        "Loan {} ({}): balance {:.2} as of {} over {} history points",
        loan.id,
        loan.name,
        report.current_balance,
        as_of,
        report.history.len()
    );
    report
}
