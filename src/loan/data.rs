//! In-memory loan and loan event types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a loan event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Money lent out, increases the balance
    Disbursement,
    /// Money repaid, decreases the balance
    Payment,
}

impl EventKind {
    /// Sign applied to the event amount when it hits the balance
    pub fn sign(self) -> f64 {
        match self {
            EventKind::Disbursement => 1.0,
            EventKind::Payment => -1.0,
        }
    }
}

/// A single dated disbursement or payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanEvent {
    pub kind: EventKind,
    pub date: NaiveDate,
    /// Always non-negative; direction comes from `kind`
    pub amount: f64,
}

impl LoanEvent {
    pub fn disbursement(date: NaiveDate, amount: f64) -> Self {
        Self { kind: EventKind::Disbursement, date, amount }
    }

    pub fn payment(date: NaiveDate, amount: f64) -> Self {
        Self { kind: EventKind::Payment, date, amount }
    }

    /// Signed effect on the balance
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }
}

/// A loan with its disbursement and payment history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: u64,
    pub name: String,
    /// Annual interest rate in percent (12.5 = 12.5% APR)
    pub annual_rate: f64,
    pub repayment_start_date: Option<NaiveDate>,
    pub disbursements: Vec<LoanEvent>,
    pub payments: Vec<LoanEvent>,
}

impl Loan {
    pub fn new(id: u64, name: impl Into<String>, annual_rate: f64) -> Self {
        Self {
            id,
            name: name.into(),
            annual_rate,
            repayment_start_date: None,
            disbursements: Vec::new(),
            payments: Vec::new(),
        }
    }

    pub fn with_disbursement(mut self, date: NaiveDate, amount: f64) -> Self {
        self.disbursements.push(LoanEvent::disbursement(date, amount));
        self
    }

    pub fn with_payment(mut self, date: NaiveDate, amount: f64) -> Self {
        self.payments.push(LoanEvent::payment(date, amount));
        self
    }

    pub fn total_disbursed(&self) -> f64 {
        self.disbursements.iter().map(|e| e.amount).sum()
    }

    pub fn total_paid(&self) -> f64 {
        self.payments.iter().map(|e| e.amount).sum()
    }

    /// All events in processing order: disbursements then payments, stably sorted by date,
    /// so a same-day disbursement is applied before a same-day payment
    pub fn events(&self) -> Vec<LoanEvent> {
        let mut events: Vec<LoanEvent> = self
            .disbursements
            .iter()
            .chain(self.payments.iter())
            .copied()
            .collect();
        events.sort_by_key(|e| e.date);
        events
    }
}
