use tracing::{debug, trace, warn};

use crate::error::FinCalcError;
use crate::types::{Money, PaymentTiming, Rate};
use crate::FinCalcResult;

/// Solver stops once successive rates differ by less than this.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-7;
pub const MAX_IRR_ITERATIONS: u32 = 100;

/// Net Present Value of a series of cash flows, unrounded.
///
/// Flow `t` is discounted by `(1 + rate)^t`, so the first flow is taken at
/// face value. A rate of exactly -1 is not trapped and yields a non-finite
/// result.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> Money {
    let one_plus_r = 1.0 + rate;
    if one_plus_r == 0.0 && cash_flows.len() > 1 {
        warn!(rate, "discount factor is zero, NPV is not finite");
    }

    let mut result = 0.0;
    let mut discount = 1.0;
    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= one_plus_r;
        }
        result += cf / discount;
    }
    result
}

/// NPV and its first derivative with respect to the rate, in one pass.
fn npv_and_derivative(rate: Rate, cash_flows: &[Money]) -> (Money, Money) {
    let one_plus_r = 1.0 + rate;
    let mut value = 0.0;
    let mut derivative = 0.0;
    let mut discount = 1.0;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= one_plus_r;
            derivative -= t as f64 * cf / (discount * one_plus_r);
        }
        value += cf / discount;
    }
    (value, derivative)
}

/// Internal Rate of Return using Newton-Raphson, unrounded.
///
/// Iterates `r' = r - npv(r) / npv'(r)` from `guess` until the step is below
/// [`CONVERGENCE_THRESHOLD`]. Fails with [`FinCalcError::ConvergenceFailure`]
/// after [`MAX_IRR_ITERATIONS`] steps, or as soon as a step leaves the finite
/// numbers (a flat NPV curve or a runaway iterate), since no later step can
/// recover from that.
pub fn irr(cash_flows: &[Money], guess: Rate) -> FinCalcResult<Rate> {
    let mut rate = guess;

    for i in 0..MAX_IRR_ITERATIONS {
        let (npv_val, dnpv) = npv_and_derivative(rate, cash_flows);
        let new_rate = rate - npv_val / dnpv;
        let delta = (new_rate - rate).abs();
        trace!(iteration = i, rate, npv = npv_val, derivative = dnpv, new_rate, "IRR step");

        if !new_rate.is_finite() {
            debug!(iteration = i, rate, "IRR iterate diverged");
            return Err(FinCalcError::ConvergenceFailure {
                function: "IRR".into(),
                iterations: i + 1,
                last_delta: delta,
            });
        }

        if delta < CONVERGENCE_THRESHOLD {
            debug!(iterations = i + 1, irr = new_rate, "IRR converged");
            return Ok(new_rate);
        }
        rate = new_rate;
    }

    debug!(rate, "IRR hit the iteration cap");
    Err(FinCalcError::ConvergenceFailure {
        function: "IRR".into(),
        iterations: MAX_IRR_ITERATIONS,
        last_delta: {
            let (npv_val, dnpv) = npv_and_derivative(rate, cash_flows);
            (npv_val / dnpv).abs()
        },
    })
}

/// Payment (PMT), unrounded.
///
/// Follows the spreadsheet sign convention: a positive present value (money
/// received) produces a negative payment (money paid out).
pub fn pmt(
    rate: Rate,
    nper: u32,
    present_value: Money,
    future_value: Money,
    timing: PaymentTiming,
) -> Money {
    let n = f64::from(nper);

    if rate == 0.0 {
        return -(present_value + future_value) / n;
    }

    let one_plus_r = 1.0 + rate;
    let pvif = one_plus_r.powf(n);
    let payment = -rate * (present_value * pvif + future_value) / (pvif - 1.0);

    match timing {
        PaymentTiming::End => payment,
        PaymentTiming::Beginning => payment / one_plus_r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_npv_basic() {
        let cfs = [-1000.0, 300.0, 400.0, 500.0];
        // -1000 + 300/1.1 + 400/1.21 + 500/1.331 ≈ -21.04
        assert_relative_eq!(npv(0.10, &cfs), -21.036814, epsilon = 1e-6);
    }

    #[test]
    fn test_npv_zero_rate() {
        let cfs = [-100.0, 50.0, 50.0, 50.0];
        assert_eq!(npv(0.0, &cfs), 50.0);
    }

    #[test]
    fn test_npv_first_flow_undiscounted() {
        assert_eq!(npv(0.25, &[-400.0]), -400.0);
    }

    #[test]
    fn test_npv_total_loss_rate_is_not_finite() {
        assert!(!npv(-1.0, &[-100.0, 50.0]).is_finite());
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let cfs = [-1000.0, 200.0, 300.0, 400.0, 500.0];
        let h = 1e-6;
        let (_, d) = npv_and_derivative(0.08, &cfs);
        let numeric = (npv(0.08 + h, &cfs) - npv(0.08 - h, &cfs)) / (2.0 * h);
        assert_relative_eq!(d, numeric, max_relative = 1e-6);
    }

    #[test]
    fn test_irr_basic() {
        let cfs = [-1000.0, 400.0, 400.0, 400.0];
        let result = irr(&cfs, 0.10).unwrap();
        // IRR should be ~9.7%
        assert_relative_eq!(result, 0.0970102574, epsilon = 1e-8);
    }

    #[test]
    fn test_irr_zeroes_npv() {
        let cfs = [-1000.0, 200.0, 300.0, 400.0, 500.0];
        let r = irr(&cfs, 0.10).unwrap();
        assert!(npv(r, &cfs).abs() < 1e-6);
    }

    #[test]
    fn test_irr_single_period() {
        let r = irr(&[-100.0, 110.0], 0.3).unwrap();
        assert_relative_eq!(r, 0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_irr_flat_curve_fails_fast() {
        // All-zero flows: derivative is zero at every rate
        match irr(&[0.0, 0.0, 0.0], 0.1) {
            Err(FinCalcError::ConvergenceFailure { iterations, .. }) => assert_eq!(iterations, 1),
            other => panic!("expected convergence failure, got {other:?}"),
        }
    }

    #[test]
    fn test_irr_no_sign_change_does_not_converge() {
        let err = irr(&[-1000.0, -2000.0, -3000.0], 0.1).unwrap_err();
        assert!(matches!(err, FinCalcError::ConvergenceFailure { .. }));
    }

    #[test]
    fn test_pmt_ordinary_and_due() {
        let end = pmt(0.10, 12, 1000.0, 0.0, PaymentTiming::End);
        let due = pmt(0.10, 12, 1000.0, 0.0, PaymentTiming::Beginning);
        assert_relative_eq!(end, -146.763315, epsilon = 1e-6);
        assert_relative_eq!(due * 1.10, end, max_relative = 1e-12);
    }

    #[test]
    fn test_pmt_zero_rate_is_linear() {
        assert_eq!(pmt(0.0, 12, 1000.0, 500.0, PaymentTiming::End), -125.0);
        // Timing is irrelevant without interest
        assert_eq!(pmt(0.0, 4, 1000.0, 0.0, PaymentTiming::Beginning), -250.0);
    }

    #[test]
    fn test_pmt_sinking_fund() {
        // Save towards 10,000 over 10 periods at 5%
        let result = pmt(0.05, 10, 0.0, 10_000.0, PaymentTiming::End);
        assert_relative_eq!(result, -795.045750, epsilon = 1e-6);
    }
}
