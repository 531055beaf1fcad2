//! Forward projections: fixed-term amortization, standard repayment plans and
//! multi-loan payoff simulation

mod amortization;
mod plans;
mod optimizer;

pub use amortization::{amortize, monthly_payment, AmortizationRow, AmortizationSchedule};
pub use plans::{standard_plans, RepaymentPlan};
pub use optimizer::{
    optimize, simulate_payoff, DebtPosition, OptimizerReport, PayoffOutcome, PayoffResult,
    PayoffStrategy,
};

// ============================================================================
// Rate Conventions
// ============================================================================
// Loan rates are quoted as annual percentages (12.5 = 12.5% APR).
// - Balance reconstruction uses rate / 100 / days_in_year per elapsed day
// - Monthly projections use rate / 12 / 100 per period

/// Periods per year for monthly projections
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Longest amortization term accepted (100 years)
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Monthly periodic rate for an annual percentage rate
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / MONTHS_PER_YEAR / 100.0
}
