//! Standard repayment plans offered on a loan's detail view

use super::amortization::{amortize, AmortizationSchedule};
use crate::config::EngineConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fixed-term payoff plan for the current balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentPlan {
    pub months: u32,
    pub schedule: AmortizationSchedule,
}

impl RepaymentPlan {
    pub fn label(&self) -> String {
        if self.months % 12 == 0 {
            format!("{}-Year Plan", self.months / 12)
        } else {
            format!("{}-Month Plan", self.months)
        }
    }
}

/// One plan per configured term, in configuration order
pub fn standard_plans(
    principal: f64,
    annual_rate_pct: f64,
    start: NaiveDate,
    config: &EngineConfig,
) -> Vec<RepaymentPlan> {
    config
        .plan_terms
        .iter()
        .map(|&months| RepaymentPlan {
            months,
            schedule: amortize(principal, annual_rate_pct, months, start),
        })
        .collect()
}
