//! Multi-loan payoff simulation: avalanche vs snowball
//!
//! Each simulated month, in order:
//! 1. Every open loan accrues one month of interest (rate / 12 / 100).
//! 2. Every open loan receives its minimum payment: the interest on the
//!    post-accrual balance plus a fixed principal amount, capped at the balance.
//! 3. The extra payment is spent across open loans in strategy order.
//!
//! Avalanche targets the highest rate first, snowball the smallest balance.

use super::monthly_rate;
use crate::balance::BalanceEngine;
use crate::config::EngineConfig;
use crate::error::{LoanError, Result};
use crate::loan::Loan;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A loan reduced to what the simulation needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPosition {
    pub name: String,
    /// Annual rate in percent
    pub annual_rate: f64,
    pub balance: f64,
}

impl DebtPosition {
    pub fn new(name: impl Into<String>, annual_rate: f64, balance: f64) -> Self {
        Self { name: name.into(), annual_rate, balance }
    }

    /// Position at the loan's reconstructed current balance
    pub fn from_loan(loan: &Loan, as_of: NaiveDate, config: &EngineConfig) -> Self {
        let balance = BalanceEngine::for_loan(loan, config).current_balance(loan.events(), as_of);
        Self::new(loan.name.clone(), loan.annual_rate, balance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoffStrategy {
    /// Highest interest rate first
    Avalanche,
    /// Smallest balance first
    Snowball,
}

impl PayoffStrategy {
    /// Positions in the order the extra payment is applied (stable for ties)
    pub fn order(self, positions: &[DebtPosition]) -> Vec<DebtPosition> {
        let mut ordered = positions.to_vec();
        match self {
            PayoffStrategy::Avalanche => {
                ordered.sort_by(|a, b| b.annual_rate.total_cmp(&a.annual_rate))
            }
            PayoffStrategy::Snowball => ordered.sort_by(|a, b| a.balance.total_cmp(&b.balance)),
        }
        ordered
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffResult {
    pub months_to_payoff: u32,
    /// Rounded to cents
    pub total_interest_paid: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayoffOutcome {
    Paid(PayoffResult),
    /// Debts were still open after the configured month limit
    TimedOut { max_months: u32 },
}

impl PayoffOutcome {
    pub fn result(&self) -> Option<&PayoffResult> {
        match self {
            PayoffOutcome::Paid(result) => Some(result),
            PayoffOutcome::TimedOut { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerReport {
    pub extra_payment: f64,
    pub avalanche: PayoffOutcome,
    pub snowball: PayoffOutcome,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Simulate paying off `positions` in the given order
pub fn simulate_payoff(
    positions: &[DebtPosition],
    extra_payment: f64,
    config: &EngineConfig,
) -> PayoffOutcome {
    let mut open: Vec<(f64, f64)> = positions
        .iter()
        .filter(|p| p.balance > 0.0)
        .map(|p| (monthly_rate(p.annual_rate), p.balance))
        .collect();

    let mut months = 0u32;
    let mut total_interest = 0.0;

    while open.iter().any(|&(_, balance)| balance > 0.0) {
        months += 1;

        for (rate, balance) in open.iter_mut().filter(|(_, b)| *b > 0.0) {
            let interest = *balance * *rate;
            *balance += interest;
            total_interest += interest;
        }

        for (rate, balance) in open.iter_mut().filter(|(_, b)| *b > 0.0) {
            let minimum = *balance * *rate + config.min_principal_payment;
            let payment = balance.min(minimum);
            *balance -= payment;
        }

        let mut extra = extra_payment;
        for (_, balance) in open.iter_mut() {
            if extra <= 0.0 {
                break;
            }
            if *balance > 0.0 {
                let payment = balance.min(extra);
                *balance -= payment;
                extra -= payment;
            }
        }

        if months > config.max_payoff_months {
            log::warn!(
                "Payoff simulation exceeded {} months, giving up",
                config.max_payoff_months
            );
            return PayoffOutcome::TimedOut { max_months: config.max_payoff_months };
        }
    }

    PayoffOutcome::Paid(PayoffResult {
        months_to_payoff: months,
        total_interest_paid: round_cents(total_interest),
    })
}

/// Compare avalanche and snowball for the same debts and extra monthly payment
pub fn optimize(
    positions: &[DebtPosition],
    extra_payment: f64,
    config: &EngineConfig,
) -> Result<OptimizerReport> {
    if !extra_payment.is_finite() || extra_payment < 0.0 {
        return Err(LoanError::InvalidAmount { field: "extra_payment", value: extra_payment });
    }

    let avalanche = simulate_payoff(&PayoffStrategy::Avalanche.order(positions), extra_payment, config);
    let snowball = simulate_payoff(&PayoffStrategy::Snowball.order(positions), extra_payment, config);

    log::info!(
        "Optimized {} debts with {:.2} extra: avalanche {:?}, snowball {:?}",
        positions.len(),
        extra_payment,
        avalanche,
        snowball
    );

    Ok(OptimizerReport { extra_payment, avalanche, snowball })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_no_debts_paid_immediately() {
        let outcome = simulate_payoff(&[], 100.0, &config());
        assert_eq!(
            outcome,
            PayoffOutcome::Paid(PayoffResult { months_to_payoff: 0, total_interest_paid: 0.0 })
        );

        let zero = [DebtPosition::new("Closed", 5.0, 0.0)];
        assert_eq!(simulate_payoff(&zero, 0.0, &config()).result().unwrap().months_to_payoff, 0);
    }

    #[test]
    fn test_zero_rate_minimum_payments() {
        // 50 principal per month and no interest: 100 clears in two months
        let debts = [DebtPosition::new("Friend", 0.0, 100.0)];
        let outcome = simulate_payoff(&debts, 0.0, &config());
        assert_eq!(
            outcome,
            PayoffOutcome::Paid(PayoffResult { months_to_payoff: 2, total_interest_paid: 0.0 })
        );
    }

    #[test]
    fn test_first_month_interest() {
        // 1000 at 12%: month 1 accrues 10.00, minimum is 10.10 + 50, extra clears the rest
        let debts = [DebtPosition::new("Card", 12.0, 1000.0)];
        let outcome = simulate_payoff(&debts, 1000.0, &config());
        assert_eq!(
            outcome,
            PayoffOutcome::Paid(PayoffResult { months_to_payoff: 1, total_interest_paid: 10.0 })
        );
    }

    #[test]
    fn test_extra_payment_goes_to_first_in_order() {
        let debts = [DebtPosition::new("A", 0.0, 1000.0), DebtPosition::new("B", 0.0, 1000.0)];
        // Month 1: both pay 50, A receives the full 900 extra -> A: 50, B: 950
        // Month 2: A pays off with its minimum, extra goes to B -> B: 0
        let outcome = simulate_payoff(&debts, 900.0, &config());
        assert_eq!(outcome.result().unwrap().months_to_payoff, 2);
    }

    #[test]
    fn test_strategy_ordering() {
        let debts = vec![
            DebtPosition::new("Mortgage", 4.0, 150_000.0),
            DebtPosition::new("Card", 22.0, 3_000.0),
            DebtPosition::new("Car", 7.0, 500.0),
            DebtPosition::new("Store card", 22.0, 900.0),
        ];

        let avalanche: Vec<_> = PayoffStrategy::Avalanche.order(&debts).into_iter().map(|d| d.name).collect();
        assert_eq!(avalanche, vec!["Card", "Store card", "Car", "Mortgage"]);

        let snowball: Vec<_> = PayoffStrategy::Snowball.order(&debts).into_iter().map(|d| d.name).collect();
        assert_eq!(snowball, vec!["Car", "Store card", "Card", "Mortgage"]);
    }

    #[test]
    fn test_avalanche_pays_no_more_interest_than_snowball() {
        let debts = vec![
            DebtPosition::new("Card", 20.0, 3_000.0),
            DebtPosition::new("Student", 5.0, 500.0),
        ];
        let report = optimize(&debts, 200.0, &config()).unwrap();

        let avalanche = report.avalanche.result().unwrap();
        let snowball = report.snowball.result().unwrap();
        assert!(avalanche.total_interest_paid <= snowball.total_interest_paid);
        assert!(avalanche.total_interest_paid > 0.0);
    }

    #[test]
    fn test_timeout() {
        let debts = [DebtPosition::new("Jumbo", 10.0, 1_000_000.0)];
        let outcome = simulate_payoff(&debts, 0.0, &config());
        assert_eq!(outcome, PayoffOutcome::TimedOut { max_months: 1200 });
    }

    #[test]
    fn test_invalid_extra_payment() {
        let debts = [DebtPosition::new("Card", 20.0, 100.0)];
        assert!(matches!(
            optimize(&debts, -1.0, &config()),
            Err(LoanError::InvalidAmount { field: "extra_payment", .. })
        ));
        assert!(optimize(&debts, f64::NAN, &config()).is_err());
    }

    #[test]
    fn test_position_from_loan_uses_accrued_balance() {
        let d0 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let loan = Loan::new(3, "Personal", 10.0).with_disbursement(d0, 5000.0);

        let position = DebtPosition::from_loan(&loan, d1, &config());
        assert_eq!(position.name, "Personal");
        assert!((position.balance - 5500.0).abs() < 1e-6);
    }

    #[test]
    fn test_outcome_serialization() {
        let paid = PayoffOutcome::Paid(PayoffResult { months_to_payoff: 12, total_interest_paid: 42.5 });
        let json = serde_json::to_value(paid).unwrap();
        assert_eq!(json["status"], "paid");
        assert_eq!(json["months_to_payoff"], 12);

        let timed_out = serde_json::to_value(PayoffOutcome::TimedOut { max_months: 1200 }).unwrap();
        assert_eq!(timed_out["status"], "timed_out");
    }
}
