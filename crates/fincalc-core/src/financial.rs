//! Validated, rounded entry points.
//!
//! Each operation validates its input first, runs the unrounded kernel from
//! [`crate::time_value`], and rounds to the requested precision. Validation
//! errors are returned before any arithmetic happens.

use crate::rounding::round;
use crate::time_value;
use crate::types::{Money, Rate};
use crate::validation::{IrrInput, NpvInput, PmtInput};
use crate::FinCalcResult;

/// Net Present Value of `input.cash_flows` at `input.rate`.
///
/// ```
/// use fincalc_core::{calculate_npv, FinancialInput, NpvInput};
///
/// let input = NpvInput {
///     base: FinancialInput::with_precision(1000.0, 2),
///     rate: 0.1,
///     cash_flows: vec![-1000.0, 200.0, 300.0, 400.0, 500.0],
/// };
/// assert_eq!(calculate_npv(&input).unwrap(), 71.78);
/// ```
pub fn calculate_npv(input: &NpvInput) -> FinCalcResult<Money> {
    let params = input.validate()?;
    let npv = time_value::npv(params.rate, params.cash_flows);
    Ok(round(npv, params.precision))
}

/// Internal Rate of Return of `input.cash_flows`.
///
/// Newton-Raphson seeded at `guess` (default 0.1). Sequences without a sign
/// change have no IRR and fail with a convergence error.
pub fn calculate_irr(input: &IrrInput) -> FinCalcResult<Rate> {
    let params = input.validate()?;
    let irr = time_value::irr(params.cash_flows, params.guess)?;
    Ok(round(irr, params.precision))
}

/// Periodic payment that amortizes `present_value` down to `future_value`.
///
/// Negative for a positive present value (the payment is an outflow).
pub fn calculate_pmt(input: &PmtInput) -> FinCalcResult<Money> {
    let params = input.validate()?;
    let pmt = time_value::pmt(
        params.rate,
        params.periods,
        params.present_value,
        params.future_value,
        params.timing,
    );
    Ok(round(pmt, params.precision))
}
