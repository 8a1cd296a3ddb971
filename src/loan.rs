use crate::error::LoanError;
use log::{debug, trace, warn};
use std::fmt;

const MONTHS_PER_YEAR: f64 = 12.;

/// Shortest nominal term accepted, in years.
pub const MIN_TERM_YEARS: f64 = 0.5;

// balance left over after a payment, relative to the principal, that counts as repaid
const PAYOFF_TOLERANCE: f64 = 1e-9;

// rounding error in the balance compounds at the loan rate; this share of the
// principal grown by (1 + r)^month is also treated as residue
const ROUNDING_GROWTH: f64 = 1e-13;

// a month must retire more than this fraction of the outstanding balance. Stricter
// than payment <= interest: a payment exceeding interest by less than this is
// floating noise, and an underflowed payment of 0 also lands here
const MIN_AMORTIZING_FRACTION: f64 = 1e-12;

// hard ceiling on simulated months, applied on top of twice the nominal payment count
const MAX_SCHEDULE_MONTHS: u32 = 24_000;

/// The four numbers a caller supplies to project a loan.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanInputs {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_years: f64,
    pub extra_payment: f64,
}

impl LoanInputs {
    pub fn new(principal: f64, annual_rate: f64, term_years: f64) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
            extra_payment: 0.,
        }
    }

    pub fn with_extra_payment(mut self, extra_payment: f64) -> Self {
        self.extra_payment = extra_payment;
        self
    }

    pub fn amortize(&self) -> Result<AmortizationResult, LoanError> {
        compute_amortization(
            self.principal,
            self.annual_rate,
            self.term_years,
            self.extra_payment,
        )
    }
}

/// State of the loan at the end of a month. Month 0 is the loan before any payment.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmortizationPoint {
    pub month: u32,
    pub principal_balance: f64,
    /// Cumulative interest through this month.
    pub interest_paid: f64,
}

impl AmortizationPoint {
    pub fn new(month: u32, principal_balance: f64, interest_paid: f64) -> Self {
        Self {
            month,
            principal_balance,
            interest_paid,
        }
    }
}

impl fmt::Display for AmortizationPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "month {}, principal balance ${:.2}, interest paid ${:.2}",
            self.month, self.principal_balance, self.interest_paid
        )
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmortizationResult {
    monthly_payment: f64,
    total_interest: f64,
    total_payment: f64,
    amortization_schedule: Vec<AmortizationPoint>,
    actual_term_years: f64,
}

impl AmortizationResult {
    /// Required payment for the nominal term, not including any extra payment.
    pub fn monthly_payment(&self) -> f64 {
        self.monthly_payment
    }

    pub fn total_interest(&self) -> f64 {
        self.total_interest
    }

    pub fn total_payment(&self) -> f64 {
        self.total_payment
    }

    pub fn amortization_schedule(&self) -> &[AmortizationPoint] {
        &self.amortization_schedule
    }

    pub fn actual_term_years(&self) -> f64 {
        self.actual_term_years
    }

    /// Number of payments made before the balance reached zero.
    pub fn payment_count(&self) -> u32 {
        self.final_point().month
    }

    pub fn point(&self, month: u32) -> Option<&AmortizationPoint> {
        self.amortization_schedule.get(month as usize)
    }

    pub fn final_point(&self) -> &AmortizationPoint {
        // the schedule always holds at least the month 0 point
        &self.amortization_schedule[self.amortization_schedule.len() - 1]
    }

    pub fn show_amortization(&self) {
        for point in &self.amortization_schedule {
            println!("{}", point);
        }
    }
}

/// Projects a fixed-rate loan month by month.
///
/// `annual_rate` is a percentage (6.0 for 6 %). The monthly payment comes from the
/// annuity formula over `term_years`; `extra_payment` is added on top of it every
/// month and shortens the schedule without changing the reported monthly payment.
pub fn compute_amortization(
    principal: f64,     // amount borrowed
    annual_rate: f64,   // annual interest rate as a percentage (i.e., 2.5, 7.0)
    term_years: f64,    // nominal term in years, may be fractional
    extra_payment: f64, // added to every monthly payment
) -> Result<AmortizationResult, LoanError> {
    validate_inputs(principal, annual_rate, term_years, extra_payment)
        .inspect_err(|e| warn!("rejected loan inputs: {}", e))?;

    let monthly_rate = annual_rate / 100. / MONTHS_PER_YEAR;
    let pmt_count = get_pmt_count(term_years);
    let pmt_amount = get_pmt_amount(principal, monthly_rate, pmt_count);
    debug!(
        "monthly rate {}, {} scheduled payments, payment {}",
        monthly_rate, pmt_count, pmt_amount
    );

    let max_months = pmt_count.saturating_mul(2).min(MAX_SCHEDULE_MONTHS);
    let schedule = add_scheduled_pmts(
        principal,
        monthly_rate,
        pmt_amount + extra_payment,
        max_months,
    )
    .inspect_err(|e| warn!("amortization failed: {}", e))?;

    let final_point = schedule[schedule.len() - 1];
    let total_interest = final_point.interest_paid;

    Ok(AmortizationResult {
        monthly_payment: pmt_amount,
        total_interest,
        total_payment: principal + total_interest,
        actual_term_years: final_point.month as f64 / MONTHS_PER_YEAR,
        amortization_schedule: schedule,
    })
}

fn validate_inputs(
    principal: f64,
    annual_rate: f64,
    term_years: f64,
    extra_payment: f64,
) -> Result<(), LoanError> {
    for (field, value) in [
        ("principal", principal),
        ("annual_rate", annual_rate),
        ("term_years", term_years),
        ("extra_payment", extra_payment),
    ] {
        if !value.is_finite() {
            return Err(LoanError::invalid(field, "must be a finite number"));
        }
        if value < 0. {
            return Err(LoanError::invalid(
                field,
                format!("must not be negative, got {}", value),
            ));
        }
    }
    if term_years < MIN_TERM_YEARS {
        return Err(LoanError::invalid(
            "term_years",
            format!("must be at least {} years, got {}", MIN_TERM_YEARS, term_years),
        ));
    }
    Ok(())
}

// nominal number of monthly payments, rounded to the nearest month
fn get_pmt_count(term_years: f64) -> u32 {
    (term_years * MONTHS_PER_YEAR).round().max(1.) as u32
}

fn get_pmt_amount(principal: f64, monthly_rate: f64, pmt_count: u32) -> f64 {
    if monthly_rate == 0. {
        return principal / pmt_count as f64;
    }
    // 1 - (1 + r)^-n, kept accurate when r is tiny
    let discount = -(-(pmt_count as f64) * monthly_rate.ln_1p()).exp_m1();
    principal * monthly_rate / discount
}

// simulate the loan until the balance reaches zero, starting with the month 0 point
fn add_scheduled_pmts(
    principal: f64,
    monthly_rate: f64,
    pmt_amount: f64,
    max_months: u32,
) -> Result<Vec<AmortizationPoint>, LoanError> {
    let mut sched_pmt = Vec::with_capacity(max_months as usize / 2 + 1);
    sched_pmt.push(AmortizationPoint::new(0, principal, 0.));

    let mut balance = principal;
    let mut interest_paid = 0.;
    let mut growth = 1.;
    let mut month = 0;

    while balance > 0. {
        if month >= max_months {
            return Err(LoanError::LoanNeverPaysOff { months: month });
        }
        month += 1;

        let interest = balance * monthly_rate;
        let applied = pmt_amount - interest;
        // NaN when interest overflows
        if applied.is_nan() || applied <= balance * MIN_AMORTIZING_FRACTION {
            return Err(LoanError::NonAmortizingLoan {
                payment: pmt_amount,
                interest,
            });
        }

        balance -= applied.min(balance);
        growth *= 1. + monthly_rate;
        if balance <= principal * (PAYOFF_TOLERANCE + ROUNDING_GROWTH * growth) {
            balance = 0.;
        }
        interest_paid += interest;
        trace!("month {}, interest {}, end bal {}", month, interest, balance);

        sched_pmt.push(AmortizationPoint::new(month, balance, interest_paid));
    }
    Ok(sched_pmt)
}
