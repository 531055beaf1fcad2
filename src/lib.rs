//! Debt Projection - loan balance and payoff calculations for the finance dashboard
//!
//! This library provides:
//! - Loan record loading from the REST API's JSON payloads
//! - Balance reconstruction from disbursement/payment history under daily-rate interest
//! - Fixed-term amortization schedules and standard repayment plans
//! - Loan list summaries computed in parallel
//! - Avalanche vs snowball payoff simulation across several loans
//!
//! All calculations take the as-of date explicitly; nothing reads the wall clock.

pub mod balance;
pub mod config;
pub mod error;
pub mod loan;
pub mod projection;

// Re-export commonly used types
pub use balance::{loan_balance, summarize_loans, BalanceEngine, BalancePoint, BalanceReport, LoanSummary};
pub use config::EngineConfig;
pub use error::{LoanError, Result};
pub use loan::{load_loans, EventKind, Loan, LoanEvent};
pub use projection::{amortize, optimize, standard_plans, AmortizationRow, AmortizationSchedule};
