//! Input schemas for the calculation entry points.
//!
//! Raw inputs mirror the JSON callers send: optional fields stay optional and
//! integers stay signed so that out-of-range values reach the validator
//! instead of failing inside serde. `validate()` applies defaults and returns a
//! borrowed view the kernels can trust.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::rounding::{DEFAULT_PRECISION, MAX_PRECISION};
use crate::types::{Money, PaymentTiming, Rate};
use crate::FinCalcResult;

/// Seed for the IRR solver when the caller gives none.
pub const DEFAULT_IRR_GUESS: Rate = 0.1;

/// Lowest admissible periodic rate (-100%).
pub const MIN_RATE: Rate = -1.0;

/// Fields shared by every calculation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInput {
    /// Reference amount the calculation relates to; must be positive
    pub value: Money,
    /// Decimal places of the result, 0 to 10 (default 2)
    #[serde(
        default,
        deserialize_with = "integral_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub precision: Option<i32>,
}

impl FinancialInput {
    pub fn new(value: Money) -> Self {
        Self {
            value,
            precision: None,
        }
    }

    pub fn with_precision(value: Money, precision: i32) -> Self {
        Self {
            value,
            precision: Some(precision),
        }
    }

    /// Check the shared fields and resolve the output precision.
    pub fn validate(&self) -> FinCalcResult<u32> {
        if !self.value.is_finite() || self.value <= 0.0 {
            return Err(FinCalcError::invalid(
                "value",
                format!("must be a positive number, got {}", self.value),
            ));
        }

        match self.precision {
            None => Ok(DEFAULT_PRECISION),
            Some(p) => u32::try_from(p)
                .ok()
                .filter(|p| *p <= MAX_PRECISION)
                .ok_or_else(|| {
                    FinCalcError::invalid(
                        "precision",
                        format!("must be an integer between 0 and {MAX_PRECISION}, got {p}"),
                    )
                }),
        }
    }
}

/// Input for Net Present Value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpvInput {
    #[serde(flatten)]
    pub base: FinancialInput,
    /// Discount rate per period
    pub rate: Rate,
    /// Cash flows by period; index 0 is undiscounted
    #[serde(alias = "cashFlows")]
    pub cash_flows: Vec<Money>,
}

/// Validated view of an [`NpvInput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpvParams<'a> {
    pub rate: Rate,
    pub cash_flows: &'a [Money],
    pub precision: u32,
}

impl NpvInput {
    pub fn from_json(json: &str) -> FinCalcResult<Self> {
        parse_input(json)
    }

    pub fn validate(&self) -> FinCalcResult<NpvParams<'_>> {
        let precision = self.base.validate()?;
        check_rate(self.rate)?;
        if self.cash_flows.is_empty() {
            return Err(FinCalcError::invalid(
                "cash_flows",
                "at least one cash flow is required",
            ));
        }
        check_cash_flows(&self.cash_flows)?;

        Ok(NpvParams {
            rate: self.rate,
            cash_flows: &self.cash_flows,
            precision,
        })
    }
}

/// Input for Internal Rate of Return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrInput {
    #[serde(flatten)]
    pub base: FinancialInput,
    /// Cash flows by period; needs an initial flow and at least one more
    #[serde(alias = "cashFlows")]
    pub cash_flows: Vec<Money>,
    /// Starting rate for the solver (default 0.1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess: Option<Rate>,
}

/// Validated view of an [`IrrInput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrParams<'a> {
    pub cash_flows: &'a [Money],
    pub guess: Rate,
    pub precision: u32,
}

impl IrrInput {
    pub fn from_json(json: &str) -> FinCalcResult<Self> {
        parse_input(json)
    }

    pub fn validate(&self) -> FinCalcResult<IrrParams<'_>> {
        let precision = self.base.validate()?;
        if self.cash_flows.len() < 2 {
            return Err(FinCalcError::invalid(
                "cash_flows",
                format!(
                    "at least 2 cash flows are required, got {}",
                    self.cash_flows.len()
                ),
            ));
        }
        check_cash_flows(&self.cash_flows)?;

        let guess = self.guess.unwrap_or(DEFAULT_IRR_GUESS);
        if !guess.is_finite() {
            return Err(FinCalcError::invalid("guess", "must be a finite number"));
        }

        Ok(IrrParams {
            cash_flows: &self.cash_flows,
            guess,
            precision,
        })
    }
}

/// Input for the periodic Payment of a loan or annuity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmtInput {
    #[serde(flatten)]
    pub base: FinancialInput,
    /// Interest rate per period
    pub rate: Rate,
    /// Number of payment periods
    #[serde(deserialize_with = "integral")]
    pub periods: i32,
    /// Amount borrowed or invested today
    #[serde(alias = "presentValue")]
    pub present_value: Money,
    /// Balance wanted after the last payment (default 0)
    #[serde(
        default,
        alias = "futureValue",
        skip_serializing_if = "Option::is_none"
    )]
    pub future_value: Option<Money>,
    /// 0 = end of period (default), 1 = beginning of period
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub timing: Option<PaymentTiming>,
}

/// Validated view of a [`PmtInput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PmtParams {
    pub rate: Rate,
    pub periods: u32,
    pub present_value: Money,
    pub future_value: Money,
    pub timing: PaymentTiming,
    pub precision: u32,
}

impl PmtInput {
    pub fn from_json(json: &str) -> FinCalcResult<Self> {
        parse_input(json)
    }

    pub fn validate(&self) -> FinCalcResult<PmtParams> {
        let precision = self.base.validate()?;
        check_rate(self.rate)?;

        let periods = u32::try_from(self.periods)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                FinCalcError::invalid(
                    "periods",
                    format!("must be a positive integer, got {}", self.periods),
                )
            })?;

        if !self.present_value.is_finite() {
            return Err(FinCalcError::invalid(
                "present_value",
                "must be a finite number",
            ));
        }

        let future_value = self.future_value.unwrap_or(0.0);
        if !future_value.is_finite() {
            return Err(FinCalcError::invalid(
                "future_value",
                "must be a finite number",
            ));
        }

        Ok(PmtParams {
            rate: self.rate,
            periods,
            present_value: self.present_value,
            future_value,
            timing: self.timing.unwrap_or_default(),
            precision,
        })
    }
}

/// Deserialize a JSON input, reporting shape and type errors as invalid input.
pub fn parse_input<T: DeserializeOwned>(json: &str) -> FinCalcResult<T> {
    serde_json::from_str(json).map_err(|e| FinCalcError::invalid("input", e.to_string()))
}

/// Accept any JSON number with no fractional part, so `12` and `12.0` agree.
fn integral<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let n = f64::deserialize(deserializer)?;
    to_i32(n)
}

fn integral_option<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Option::<f64>::deserialize(deserializer)?
        .map(to_i32)
        .transpose()
}

fn to_i32<E: de::Error>(n: f64) -> Result<i32, E> {
    if n.fract() == 0.0 && n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX) {
        Ok(n as i32)
    } else {
        Err(E::custom(format!("expected an integer, got {n}")))
    }
}

fn check_rate(rate: Rate) -> FinCalcResult<()> {
    if !rate.is_finite() || rate < MIN_RATE {
        return Err(FinCalcError::invalid(
            "rate",
            format!("must be a number greater than or equal to -1, got {rate}"),
        ));
    }
    Ok(())
}

fn check_cash_flows(cash_flows: &[Money]) -> FinCalcResult<()> {
    match cash_flows.iter().position(|cf| !cf.is_finite()) {
        Some(i) => Err(FinCalcError::invalid(
            "cash_flows",
            format!("cash flow at period {i} is not a finite number"),
        )),
        None => Ok(()),
    }
}
