//! Fixed-payment amortization schedules
//!
//! Standard level-payment formula:
//!   EMI = P * r * (1 + r)^N / ((1 + r)^N - 1),  r = annual% / 12 / 100
//!
//! A zero (or non-finite) rate is a degenerate input: it yields an empty
//! schedule and a zero payment rather than a linear no-interest schedule.
//! Terms longer than `MAX_TERM_MONTHS` are degenerate as well.

use super::{monthly_rate, MAX_TERM_MONTHS};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// One period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based period number
    pub period: u32,
    pub date: NaiveDate,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Remaining balance after this period, floored at zero for display
    pub ending_balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Level monthly payment (EMI); zero for degenerate inputs
    pub payment: f64,
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn months(&self) -> usize {
        self.rows.len()
    }

    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|r| r.payment).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal).sum()
    }
}

fn is_degenerate(principal: f64, annual_rate_pct: f64, months: u32) -> bool {
    !principal.is_finite()
        || principal <= 0.0
        || months == 0
        || months > MAX_TERM_MONTHS
        || !annual_rate_pct.is_finite()
        || annual_rate_pct == 0.0
}

/// Level payment, or None when the inputs are degenerate or the growth factor overflows
fn level_payment(principal: f64, annual_rate_pct: f64, months: u32) -> Option<f64> {
    if is_degenerate(principal, annual_rate_pct, months) {
        return None;
    }
    let periods = i32::try_from(months).ok()?;
    let r = monthly_rate(annual_rate_pct);
    let growth = (1.0 + r).powi(periods);
    if !growth.is_finite() {
        return None;
    }
    let payment = principal * r * growth / (growth - 1.0);
    payment.is_finite().then_some(payment)
}

/// Level monthly payment, or 0 for degenerate inputs
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, months: u32) -> f64 {
    level_payment(principal, annual_rate_pct, months).unwrap_or(0.0)
}

/// Build the full schedule; period `i` is dated `start + i` months
pub fn amortize(
    principal: f64,
    annual_rate_pct: f64,
    months: u32,
    start: NaiveDate,
) -> AmortizationSchedule {
    let degenerate = || {
        log::debug!(
            "Degenerate amortization input (principal={}, rate={}, months={}, start={}), empty schedule",
            principal,
            annual_rate_pct,
            months,
            start
        );
        AmortizationSchedule::default()
    };

    let Some(payment) = level_payment(principal, annual_rate_pct, months) else {
        return degenerate();
    };
    // Terms running past the last representable date are degenerate too
    let dates: Option<Vec<NaiveDate>> = (1..=months)
        .map(|period| start.checked_add_months(Months::new(period)))
        .collect();
    let Some(dates) = dates else {
        return degenerate();
    };

    let r = monthly_rate(annual_rate_pct);
    let mut remaining = principal;
    let mut rows = Vec::with_capacity(dates.len());

    for (period, date) in (1..=months).zip(dates) {
        let interest = remaining * r;
        let principal_part = payment - interest;
        // The unfloored balance carries into the next period
        remaining -= principal_part;

        rows.push(AmortizationRow {
            period,
            date,
            payment,
            principal: principal_part,
            interest,
            ending_balance: remaining.max(0.0),
        });
    }

    AmortizationSchedule { payment, rows }
}
