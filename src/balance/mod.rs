//! Outstanding balance reconstruction and loan list summaries

mod engine;
mod summary;

pub use engine::{loan_balance, BalanceEngine, BalancePoint, BalanceReport};
pub use summary::{summarize_loan, summarize_loans, total_outstanding, LoanSummary};
