use amortize::display::{axis_label, format_currency, payoff_date, tooltip_label, Summary};
use amortize::input::{parse_loan_amount, parse_loan_term, parse_non_negative};
use amortize::loan::*;
use chrono::NaiveDate;
use clap::Parser;
use log::{error, info};
use simple_logger::SimpleLogger;
use std::process::ExitCode;

/// Project a fixed-rate loan month by month.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Loan amount; separators and currency symbols are ignored
    #[arg(short, long, default_value = "200,000")]
    principal: String,

    /// Annual interest rate in percent
    #[arg(short, long, default_value = "6")]
    rate: String,

    /// Loan term in years, at least 0.5
    #[arg(short, long, default_value = "30")]
    term: String,

    /// Extra amount paid toward principal every month
    #[arg(short, long, default_value = "0")]
    extra: String,

    /// Date the loan is drawn (YYYY-MM-DD), used to show the payoff date
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Print every month of the schedule
    #[arg(short, long)]
    schedule: bool,

    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn read_inputs(cli: &Cli) -> Result<LoanInputs, String> {
    let principal = parse_loan_amount(&cli.principal);
    let annual_rate = parse_non_negative(&cli.rate)
        .ok_or_else(|| format!("invalid interest rate '{}'", cli.rate))?;
    let term_years = parse_loan_term(&cli.term)
        .ok_or_else(|| format!("term '{}' is under {} years", cli.term, MIN_TERM_YEARS))?;
    let extra_payment = parse_non_negative(&cli.extra)
        .ok_or_else(|| format!("invalid extra payment '{}'", cli.extra))?;

    Ok(LoanInputs::new(principal, annual_rate, term_years).with_extra_payment(extra_payment))
}

fn print_schedule(result: &AmortizationResult) {
    let last = result.payment_count();
    for point in result.amortization_schedule() {
        println!(
            "{:>6}  {:<22} balance {:>12}  interest paid {:>12}",
            axis_label(point.month),
            tooltip_label(point.month, point.month == last),
            format_currency(point.principal_balance),
            format_currency(point.interest_paid)
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = SimpleLogger::new().with_level(cli.log_level).init() {
        eprintln!("could not start logger: {}", e);
    }

    let inputs = match read_inputs(&cli) {
        Ok(inputs) => inputs,
        Err(msg) => {
            error!("{}", msg);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "projecting {} at {}% over {} years, {} extra per month",
        format_currency(inputs.principal),
        inputs.annual_rate,
        inputs.term_years,
        format_currency(inputs.extra_payment)
    );

    let result = match inputs.amortize() {
        Ok(result) => result,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.schedule {
        print_schedule(&result);
        println!();
    }
    println!("{}", Summary(&result));
    if let Some(date) = cli.start.and_then(|start| payoff_date(start, &result)) {
        println!("Paid off: {}", date);
    }
    ExitCode::SUCCESS
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<LoanInputs>();
    is_normal::<AmortizationPoint>();
    is_normal::<AmortizationResult>();
    is_normal::<amortize::LoanError>();
}

#[test]
fn cli_inputs_are_sanitized() {
    let cli = Cli::parse_from([
        "amortize", "-p", "$150,000", "-r", "5.5", "-t", "15", "-e", "0",
    ]);
    assert_eq!(
        read_inputs(&cli),
        Ok(LoanInputs::new(150000., 5.5, 15.).with_extra_payment(0.))
    );

    let cli = Cli::parse_from(["amortize", "--rate=-2"]);
    assert!(read_inputs(&cli).is_err());

    let cli = Cli::parse_from(["amortize", "--term", "0.25"]);
    assert!(read_inputs(&cli).is_err());
}
