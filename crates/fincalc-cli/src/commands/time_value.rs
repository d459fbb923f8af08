use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;

use fincalc_core::validation::MIN_RATE;
use fincalc_core::{
    calculate_irr, calculate_npv, calculate_pmt, with_metadata, FinancialInput, IrrInput,
    NpvInput, PaymentTiming, PmtInput,
};

use crate::input;

/// Arguments for Net Present Value
#[derive(Args)]
pub struct NpvArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Discount rate per period as a decimal (0.1 = 10%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<f64>,

    /// Cash flows by period (comma-separated, e.g. "-1000,200,300")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cash_flows: Option<Vec<f64>>,

    /// Positive reference amount the calculation relates to
    #[arg(long)]
    pub value: Option<f64>,

    /// Decimal places of the result, 0 to 10 (default 2)
    #[arg(long)]
    pub precision: Option<i32>,
}

impl NpvArgs {
    /// Build the input from individual flags.
    fn into_input(self) -> Result<NpvInput, Box<dyn std::error::Error>> {
        Ok(NpvInput {
            base: base_input(
                self.value.ok_or("--value is required (or provide --input)")?,
                self.precision,
            ),
            rate: self.rate.ok_or("--rate is required (or provide --input)")?,
            cash_flows: self
                .cash_flows
                .ok_or("--cash-flows is required (or provide --input)")?,
        })
    }
}

pub fn run_npv(args: NpvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let structured = input::read_structured(args.input.as_deref())?;
    let npv_input: NpvInput = match structured {
        Some(parsed) => parsed,
        None => args.into_input()?,
    };

    let npv = calculate_npv(&npv_input)?;

    let mut warnings = rate_warnings(npv_input.rate);
    if !npv.is_finite() {
        warnings.push("NPV is not finite".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata(
        "Net Present Value: sum of cf[t] / (1 + rate)^t",
        &npv_input,
        warnings,
        elapsed,
        json!({ "npv": npv }),
    )?;
    Ok(serde_json::to_value(output)?)
}

/// Arguments for Internal Rate of Return
#[derive(Args)]
pub struct IrrArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Cash flows by period (comma-separated, e.g. "-1000,200,300")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cash_flows: Option<Vec<f64>>,

    /// Starting rate for Newton-Raphson (default 0.1)
    #[arg(long, allow_hyphen_values = true)]
    pub guess: Option<f64>,

    /// Positive reference amount the calculation relates to
    #[arg(long)]
    pub value: Option<f64>,

    /// Decimal places of the result, 0 to 10 (default 2)
    #[arg(long)]
    pub precision: Option<i32>,
}

impl IrrArgs {
    /// Build the input from individual flags.
    fn into_input(self) -> Result<IrrInput, Box<dyn std::error::Error>> {
        Ok(IrrInput {
            base: base_input(
                self.value.ok_or("--value is required (or provide --input)")?,
                self.precision,
            ),
            cash_flows: self
                .cash_flows
                .ok_or("--cash-flows is required (or provide --input)")?,
            guess: self.guess,
        })
    }
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let structured = input::read_structured(args.input.as_deref())?;
    let irr_input: IrrInput = match structured {
        Some(parsed) => parsed,
        None => args.into_input()?,
    };

    let irr = calculate_irr(&irr_input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata(
        "Internal Rate of Return: Newton-Raphson on NPV(rate) = 0",
        &irr_input,
        Vec::new(),
        elapsed,
        json!({ "irr": irr }),
    )?;
    Ok(serde_json::to_value(output)?)
}

/// Arguments for loan/annuity payment
#[derive(Args)]
pub struct PmtArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Interest rate per period as a decimal
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<f64>,

    /// Number of payment periods
    #[arg(long, allow_hyphen_values = true)]
    pub periods: Option<i32>,

    /// Amount borrowed or invested today
    #[arg(long, allow_hyphen_values = true)]
    pub present_value: Option<f64>,

    /// Balance remaining after the last payment (default 0)
    #[arg(long, allow_hyphen_values = true)]
    pub future_value: Option<f64>,

    /// Payments fall at the beginning of each period
    #[arg(long)]
    pub annuity_due: bool,

    /// Positive reference amount the calculation relates to
    #[arg(long)]
    pub value: Option<f64>,

    /// Decimal places of the result, 0 to 10 (default 2)
    #[arg(long)]
    pub precision: Option<i32>,
}

impl PmtArgs {
    /// Build the input from individual flags.
    fn into_input(self) -> Result<PmtInput, Box<dyn std::error::Error>> {
        Ok(PmtInput {
            base: base_input(
                self.value.ok_or("--value is required (or provide --input)")?,
                self.precision,
            ),
            rate: self.rate.ok_or("--rate is required (or provide --input)")?,
            periods: self
                .periods
                .ok_or("--periods is required (or provide --input)")?,
            present_value: self
                .present_value
                .ok_or("--present-value is required (or provide --input)")?,
            future_value: self.future_value,
            timing: self.annuity_due.then_some(PaymentTiming::Beginning),
        })
    }
}

pub fn run_pmt(args: PmtArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let structured = input::read_structured(args.input.as_deref())?;
    let pmt_input: PmtInput = match structured {
        Some(parsed) => parsed,
        None => args.into_input()?,
    };

    let pmt = calculate_pmt(&pmt_input)?;

    let mut warnings = rate_warnings(pmt_input.rate);
    if !pmt.is_finite() {
        warnings.push("Payment is not finite".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata(
        "Payment: rate * (pv * (1 + rate)^n + fv) / ((1 + rate)^n - 1)",
        &pmt_input,
        warnings,
        elapsed,
        json!({ "pmt": pmt }),
    )?;
    Ok(serde_json::to_value(output)?)
}

fn base_input(value: f64, precision: Option<i32>) -> FinancialInput {
    FinancialInput { value, precision }
}

fn rate_warnings(rate: f64) -> Vec<String> {
    if rate == MIN_RATE {
        vec!["Rate of -100% discounts every later period to zero".into()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npv_args(value: Option<f64>) -> NpvArgs {
        NpvArgs {
            input: None,
            rate: Some(0.1),
            cash_flows: Some(vec![-1000.0, 200.0, 300.0, 400.0, 500.0]),
            value,
            precision: None,
        }
    }

    #[test]
    fn test_value_flag_is_required() {
        let err = npv_args(None).into_input().unwrap_err();
        assert!(err.to_string().contains("--value is required"), "got {err}");
    }

    #[test]
    fn test_flags_build_npv_input() {
        let input = npv_args(Some(1000.0)).into_input().unwrap();
        assert_eq!(input.base.value, 1000.0);
        assert_eq!(input.base.precision, None);
        assert_eq!(calculate_npv(&input).unwrap(), 71.78);
    }

    #[test]
    fn test_pmt_flags_require_value() {
        let args = PmtArgs {
            input: None,
            rate: Some(0.1),
            periods: Some(12),
            present_value: Some(1000.0),
            future_value: None,
            annuity_due: true,
            value: None,
            precision: None,
        };
        assert!(args.into_input().is_err());
    }

    #[test]
    fn test_irr_flags_carry_guess() {
        let args = IrrArgs {
            input: None,
            cash_flows: Some(vec![-100.0, 110.0]),
            guess: Some(0.2),
            value: Some(100.0),
            precision: Some(4),
        };
        let input = args.into_input().unwrap();
        assert_eq!(input.guess, Some(0.2));
        assert_eq!(calculate_irr(&input).unwrap(), 0.1);
    }
}
