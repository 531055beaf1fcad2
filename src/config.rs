//! Engine configuration
//!
//! Every field has a default so a partial JSON file only overrides what it names.

use crate::error::{LoanError, Result};
use crate::projection::MAX_TERM_MONTHS;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parameters shared by the balance, amortization and payoff engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Day count used to turn the annual rate into a daily rate (rate / 100 / days)
    #[serde(default = "default_days_in_year")]
    pub days_in_year: f64,

    /// Terms (in months) offered as standard repayment plans
    /// Default: 10, 5 and 3 years
    #[serde(default = "default_plan_terms")]
    pub plan_terms: Vec<u32>,

    /// Principal added on top of the monthly interest to form the minimum payment
    /// in the payoff simulation
    #[serde(default = "default_min_principal_payment")]
    pub min_principal_payment: f64,

    /// Simulation stops and reports a timeout after this many months
    #[serde(default = "default_max_payoff_months")]
    pub max_payoff_months: u32,
}

fn default_days_in_year() -> f64 { 365.0 }
fn default_plan_terms() -> Vec<u32> { vec![120, 60, 36] }
fn default_min_principal_payment() -> f64 { 50.0 }
fn default_max_payoff_months() -> u32 { 1200 }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            days_in_year: default_days_in_year(),
            plan_terms: default_plan_terms(),
            min_principal_payment: default_min_principal_payment(),
            max_payoff_months: default_max_payoff_months(),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file; the result is validated
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engines cannot compute with
    pub fn validate(&self) -> Result<()> {
        if !self.days_in_year.is_finite() || self.days_in_year <= 0.0 {
            return Err(LoanError::InvalidAmount { field: "days_in_year", value: self.days_in_year });
        }
        if !self.min_principal_payment.is_finite() || self.min_principal_payment < 0.0 {
            return Err(LoanError::InvalidAmount {
                field: "min_principal_payment",
                value: self.min_principal_payment,
            });
        }
        if let Some(&term) = self.plan_terms.iter().find(|&&t| t == 0 || t > MAX_TERM_MONTHS) {
            return Err(LoanError::InvalidAmount { field: "plan_terms", value: term as f64 });
        }
        if self.max_payoff_months == 0 {
            return Err(LoanError::InvalidAmount { field: "max_payoff_months", value: 0.0 });
        }
        Ok(())
    }

    /// Daily interest rate for an annual percentage rate
    pub fn daily_rate(&self, annual_rate_pct: f64) -> f64 {
        annual_rate_pct / 100.0 / self.days_in_year
    }
}
