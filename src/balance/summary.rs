//! Loan list summaries

use super::engine::BalanceEngine;
use crate::config::EngineConfig;
use crate::loan::Loan;
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the loan list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub id: u64,
    pub name: String,
    pub annual_rate: f64,
    pub total_disbursed: f64,
    pub total_paid: f64,
    pub current_balance: f64,
}

pub fn summarize_loan(loan: &Loan, as_of: NaiveDate, config: &EngineConfig) -> LoanSummary {
    let current_balance = BalanceEngine::for_loan(loan, config).current_balance(loan.events(), as_of);
    LoanSummary {
        id: loan.id,
        name: loan.name.clone(),
        annual_rate: loan.annual_rate,
        total_disbursed: loan.total_disbursed(),
        total_paid: loan.total_paid(),
        current_balance,
    }
}

/// Summarize a page of loans in parallel; output order follows input order
pub fn summarize_loans(loans: &[Loan], as_of: NaiveDate, config: &EngineConfig) -> Vec<LoanSummary> {
    let summaries: Vec<LoanSummary> = loans
        .par_iter()
        .map(|loan| summarize_loan(loan, as_of, config))
        .collect();

    log::info!(
        "Summarized {} loans as of {}: {:.2} outstanding",
        summaries.len(),
        as_of,
        total_outstanding(&summaries)
    );
    summaries
}

pub fn total_outstanding(summaries: &[LoanSummary]) -> f64 {
    summaries.iter().map(|s| s.current_balance).sum()
}
