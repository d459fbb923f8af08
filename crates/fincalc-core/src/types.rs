use serde::{Deserialize, Serialize};

use crate::FinCalcResult;

/// Monetary amounts. Sign carries direction: negative = outflow.
pub type Money = f64;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = f64;

/// When payments fall within each period.
///
/// Serialized as the integers `0` (end) and `1` (beginning), the same codes the
/// spreadsheet `PMT` function takes for its `type` argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaymentTiming {
    /// Ordinary annuity: payments at the end of each period.
    #[default]
    End,
    /// Annuity-due: payments at the beginning of each period.
    Beginning,
}

impl TryFrom<u8> for PaymentTiming {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PaymentTiming::End),
            1 => Ok(PaymentTiming::Beginning),
            other => Err(format!("payment type must be 0 or 1, got {other}")),
        }
    }
}

impl From<PaymentTiming> for u8 {
    fn from(timing: PaymentTiming) -> Self {
        match timing {
            PaymentTiming::End => 0,
            PaymentTiming::Beginning => 1,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata.
///
/// Fails with [`crate::FinCalcError::SerializationError`] when the assumptions
/// cannot be represented as JSON.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> FinCalcResult<ComputationOutput<T>> {
    Ok(ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions)?,
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "f64_decimal_half_away_from_zero".to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FinCalcError;
    use std::collections::BTreeMap;

    #[test]
    fn test_payment_timing_wire_codes() {
        let end: PaymentTiming = serde_json::from_str("0").unwrap();
        let begin: PaymentTiming = serde_json::from_str("1").unwrap();
        assert_eq!(end, PaymentTiming::End);
        assert_eq!(begin, PaymentTiming::Beginning);
        assert_eq!(serde_json::to_string(&begin).unwrap(), "1");
    }

    #[test]
    fn test_payment_timing_rejects_other_codes() {
        assert!(serde_json::from_str::<PaymentTiming>("2").is_err());
        assert!(serde_json::from_str::<PaymentTiming>("\"end\"").is_err());
    }

    #[test]
    fn test_with_metadata_envelope() {
        let out =
            with_metadata("NPV", &serde_json::json!({"rate": 0.1}), vec![], 7, 1.5).unwrap();
        assert_eq!(out.result, 1.5);
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.assumptions["rate"], 0.1);
    }

    #[test]
    fn test_with_metadata_unserializable_assumptions() {
        // JSON object keys must be strings
        let mut assumptions = BTreeMap::new();
        assumptions.insert((1, 2), "period pair");
        let err = with_metadata("NPV", &assumptions, vec![], 0, 1.0).unwrap_err();
        assert!(matches!(err, FinCalcError::SerializationError(_)), "got {err:?}");
    }
}
