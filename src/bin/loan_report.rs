//! Loan reports from an API export
//!
//! Reads a loans JSON file (single record, array, or paginated page) and prints
//! balances, balance history, amortization schedules, repayment plans or an
//! avalanche/snowball comparison.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use debt_projection::{
    balance::{loan_balance, summarize_loans, total_outstanding},
    load_loans,
    projection::{
        amortize, optimize, standard_plans, DebtPosition, PayoffOutcome, MAX_TERM_MONTHS,
    },
    EngineConfig, Loan, LoanError,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "loan_report", version, about = "Loan balances, schedules and payoff projections")]
struct Cli {
    /// Loans JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Engine configuration JSON (defaults used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Current balance of every loan
    Balance {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Balance history of one loan as CSV
    History {
        #[arg(long)]
        loan: u64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Amortization schedule of one loan's current balance as CSV
    Schedule {
        #[arg(long)]
        loan: u64,
        /// Term length, 1 to 1200 months
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_TERM_MONTHS as i64))]
        months: u32,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Standard repayment plans for one loan
    Plans {
        #[arg(long)]
        loan: u64,
    },
    /// Compare avalanche and snowball payoff across all loans
    Optimize {
        /// Extra amount paid every month on top of the minimums
        #[arg(long, default_value_t = 0.0)]
        extra: f64,
    },
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    })
}

fn find_loan(loans: &[Loan], id: u64) -> Result<&Loan> {
    loans
        .iter()
        .find(|loan| loan.id == id)
        .ok_or_else(|| LoanError::LoanNotFound(id).into())
}

fn describe(outcome: &PayoffOutcome) -> String {
    match outcome {
        PayoffOutcome::Paid(result) => format!(
            "{} months to be debt-free, total interest ${:.2}",
            result.months_to_payoff, result.total_interest_paid
        ),
        PayoffOutcome::TimedOut { max_months } => {
            format!("not paid off within {} months", max_months)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

    let loans = load_loans(&cli.input)
        .with_context(|| format!("loading loans from {}", cli.input.display()))?;
    log::info!("Loaded {} loans, reporting as of {}", loans.len(), as_of);

    match cli.command {
        Command::Balance { json } => {
            let summaries = summarize_loans(&loans, as_of, &config);
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                println!("{:<6} {:<30} {:>8} {:>14} {:>14} {:>14}",
                         "ID", "Name", "APR%", "Disbursed", "Paid", "Balance");
                for s in &summaries {
                    println!("{:<6} {:<30} {:>8.2} {:>14.2} {:>14.2} {:>14.2}",
                             s.id, s.name, s.annual_rate, s.total_disbursed, s.total_paid,
                             s.current_balance);
                }
                println!("\nTotal outstanding as of {}: ${:.2}", as_of, total_outstanding(&summaries));
            }
        }
        Command::History { loan, output } => {
            let loan = find_loan(&loans, loan)?;
            let report = loan_balance(loan, as_of, &config);
            let mut writer = csv::Writer::from_writer(open_output(output.as_ref())?);
            for point in &report.history {
                writer.serialize(point)?;
            }
            writer.flush()?;
        }
        Command::Schedule { loan, months, output } => {
            let loan = find_loan(&loans, loan)?;
            let balance = loan_balance(loan, as_of, &config).current_balance;
            let schedule = amortize(balance, loan.annual_rate, months, as_of);
            if schedule.is_empty() {
                log::warn!(
                    "Loan {} has no schedule (balance {:.2}, rate {}%, {} months)",
                    loan.id, balance, loan.annual_rate, months
                );
            }
            let mut writer = csv::Writer::from_writer(open_output(output.as_ref())?);
            for row in &schedule.rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        Command::Plans { loan } => {
            let loan = find_loan(&loans, loan)?;
            let balance = loan_balance(loan, as_of, &config).current_balance;
            println!("{} at {}% APR, current balance ${:.2}", loan.name, loan.annual_rate, balance);
            if let Some(start) = loan.repayment_start_date {
                println!("Repayment starts on {}", start.format("%d %b, %Y"));
            }
            println!("{:<16} {:>8} {:>14} {:>16} {:>16}",
                     "Plan", "Months", "Monthly", "Total Interest", "Total Paid");
            for plan in standard_plans(balance, loan.annual_rate, as_of, &config) {
                println!("{:<16} {:>8} {:>14.2} {:>16.2} {:>16.2}",
                         plan.label(), plan.months, plan.schedule.payment,
                         plan.schedule.total_interest(), plan.schedule.total_paid());
            }
        }
        Command::Optimize { extra } => {
            let positions: Vec<DebtPosition> = loans
                .iter()
                .map(|loan| DebtPosition::from_loan(loan, as_of, &config))
                .collect();
            let report = optimize(&positions, extra, &config)?;
            println!("Avalanche: {}", describe(&report.avalanche));
            println!("Snowball:  {}", describe(&report.snowball));
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
