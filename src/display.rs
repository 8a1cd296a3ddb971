//! Text formatting for amortization results: currency amounts, schedule labels
//! and the loan summary.

use crate::loan::AmortizationResult;
use chrono::{Months, NaiveDate};
use std::fmt;

/// Formats a dollar amount rounded to whole dollars, e.g. `$1,199` or `-$5`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0. { "-" } else { "" };
    let whole = format!("{:.0}", rounded.abs());
    format!("{}${}", sign, group_thousands(&whole))
}

// inserts a comma every three digits of a whole number's decimal digits
pub(crate) fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Long label for a schedule point. The first and last points get their own names.
pub fn tooltip_label(month: u32, is_last: bool) -> String {
    if month == 0 {
        return "Start of loan".to_string();
    }
    if is_last {
        return "End of loan".to_string();
    }
    let (years, months) = (month / 12, month % 12);
    if months == 0 {
        format!("Year {}", years)
    } else {
        format!("Year {}, Month {}", years, months)
    }
}

/// Short year axis label: `"3"` at a whole year, `"3.4"` four months into year 4.
pub fn axis_label(month: u32) -> String {
    let (years, months) = (month / 12, month % 12);
    if months == 0 {
        years.to_string()
    } else {
        format!("{}.{}", years, months)
    }
}

/// Date the final payment falls on for a loan drawn on `start`.
pub fn payoff_date(start: NaiveDate, result: &AmortizationResult) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(result.payment_count()))
}

pub struct Summary<'a>(pub &'a AmortizationResult);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(
            f,
            "Monthly Payment: {}",
            format_currency(result.monthly_payment())
        )?;
        writeln!(f, "Loan term: {:.1} years", result.actual_term_years())?;
        writeln!(
            f,
            "Total Interest: {}",
            format_currency(result.total_interest())
        )?;
        write!(f, "Total Payment: {}", format_currency(result.total_payment()))
    }
}
