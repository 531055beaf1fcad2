//! Loan data structures and API payload loading

mod data;
pub mod loader;

pub use data::{EventKind, Loan, LoanEvent};
pub use loader::{load_loans, load_loans_from_reader, DecimalField, EventRecord, LoanRecord, Page};
