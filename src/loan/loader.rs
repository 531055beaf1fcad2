//! Load loans from the REST API's JSON payloads
//!
//! Accepts a single loan record, an array of records, or a paginated page
//! (`{count, next, previous, results}`). Decimal fields arrive as strings
//! (`"12.50"`) and are validated on conversion; an unparseable or negative
//! value fails the load instead of flowing through the arithmetic as NaN.

use super::{Loan, LoanEvent};
use crate::error::{LoanError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Decimal value as serialized by the API: normally a string, occasionally a bare number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecimalField {
    Text(String),
    Number(f64),
}

impl DecimalField {
    /// Parse into a non-negative finite f64
    pub fn parse(&self, field: &'static str) -> Result<f64> {
        let value = match self {
            DecimalField::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| LoanError::InvalidDecimal { field, value: text.clone() })?,
            DecimalField::Number(n) => *n,
        };

        if !value.is_finite() || value < 0.0 {
            return Err(LoanError::InvalidAmount { field, value });
        }
        Ok(value)
    }
}

/// Disbursement or payment row as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub date: NaiveDate,
    pub amount: DecimalField,
}

/// Loan as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub interest_rate: DecimalField,
    #[serde(default)]
    pub repayment_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub payments: Vec<EventRecord>,
    #[serde(default)]
    pub disbursements: Vec<EventRecord>,
}

impl TryFrom<LoanRecord> for Loan {
    type Error = LoanError;

    fn try_from(record: LoanRecord) -> Result<Self> {
        let annual_rate = record.interest_rate.parse("interest_rate")?;

        let disbursements = record
            .disbursements
            .iter()
            .map(|d| -> Result<LoanEvent> {
                Ok(LoanEvent::disbursement(d.date, d.amount.parse("disbursement amount")?))
            })
            .collect::<Result<Vec<_>>>()?;

        let payments = record
            .payments
            .iter()
            .map(|p| -> Result<LoanEvent> {
                Ok(LoanEvent::payment(p.date, p.amount.parse("payment amount")?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Loan {
            id: record.id,
            name: record.name,
            annual_rate,
            repayment_start_date: record.repayment_start_date,
            disbursements,
            payments,
        })
    }
}

/// Paginated list envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Pick the payload shape from the top-level JSON value so field errors inside
/// a record surface as-is
fn into_records(value: serde_json::Value) -> Result<Vec<LoanRecord>> {
    let records = if value.is_array() {
        serde_json::from_value::<Vec<LoanRecord>>(value)?
    } else if value.get("results").is_some() {
        serde_json::from_value::<Page<LoanRecord>>(value)?.results
    } else {
        vec![serde_json::from_value::<LoanRecord>(value)?]
    };
    Ok(records)
}

/// Load loans from any reader
pub fn load_loans_from_reader<R: Read>(reader: R) -> Result<Vec<Loan>> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let loans = into_records(value)?
        .into_iter()
        .map(Loan::try_from)
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Loaded {} loans", loans.len());
    Ok(loans)
}

/// Load loans from a JSON file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<Loan>> {
    let file = File::open(path.as_ref())?;
    load_loans_from_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::EventKind;

    const SINGLE: &str = r#"{
        "id": 7,
        "name": "Car loan",
        "slug": "car-loan",
        "interest_rate": "12.50",
        "repayment_start_date": "2024-06-01",
        "payments": [{"id": 1, "date": "2024-03-01", "amount": "250.00"}],
        "disbursements": [{"id": 2, "date": "2024-01-15", "amount": "5000.00"}]
    }"#;

    #[test]
    fn test_single_record() {
        let loans = load_loans_from_reader(SINGLE.as_bytes()).unwrap();
        assert_eq!(loans.len(), 1);

        let loan = &loans[0];
        assert_eq!(loan.id, 7);
        assert_eq!(loan.name, "Car loan");
        assert_eq!(loan.annual_rate, 12.5);
        assert_eq!(loan.repayment_start_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(loan.disbursements[0].amount, 5000.0);
        assert_eq!(loan.disbursements[0].kind, EventKind::Disbursement);
        assert_eq!(loan.payments[0].amount, 250.0);
        assert_eq!(loan.payments[0].kind, EventKind::Payment);
    }

    #[test]
    fn test_paginated_page() {
        let json = format!(
            r#"{{"count": 16, "next": "/loans/?page=2", "previous": null, "results": [{SINGLE}, {SINGLE}]}}"#
        );
        let loans = load_loans_from_reader(json.as_bytes()).unwrap();
        assert_eq!(loans.len(), 2);
    }

    #[test]
    fn test_array_and_numeric_rate() {
        let json = r#"[{"id": 1, "name": "A", "interest_rate": 3.25}]"#;
        let loans = load_loans_from_reader(json.as_bytes()).unwrap();
        assert_eq!(loans[0].annual_rate, 3.25);
        assert!(loans[0].disbursements.is_empty());
        assert!(loans[0].payments.is_empty());
    }

    #[test]
    fn test_unparseable_amount_fails_fast() {
        let json = r#"{"interest_rate": "5", "payments": [{"date": "2024-01-01", "amount": "12,00"}]}"#;
        let err = load_loans_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, LoanError::InvalidDecimal { field: "payment amount", .. }));
    }

    #[test]
    fn test_bad_field_inside_page_reports_field_error() {
        let json = r#"{"count": 1, "results": [
            {"interest_rate": "5", "disbursements": [{"date": "2024-13-01", "amount": "10"}]}
        ]}"#;
        let err = load_loans_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, LoanError::Json(_)));
        let message = err.to_string();
        assert!(!message.contains("untagged"), "{message}");
        assert!(message.contains("range"), "{message}");
    }

    #[test]
    fn test_page_missing_count_rejected() {
        let json = r#"{"results": []}"#;
        let err = load_loans_from_reader(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("count"), "{err}");
    }

    #[test]
    fn test_nan_and_negative_rate_rejected() {
        let nan = r#"{"interest_rate": "NaN"}"#;
        assert!(matches!(
            load_loans_from_reader(nan.as_bytes()).unwrap_err(),
            LoanError::InvalidAmount { field: "interest_rate", .. }
        ));

        let negative = r#"{"interest_rate": "-1.0"}"#;
        assert!(matches!(
            load_loans_from_reader(negative.as_bytes()).unwrap_err(),
            LoanError::InvalidAmount { field: "interest_rate", .. }
        ));
    }
}
