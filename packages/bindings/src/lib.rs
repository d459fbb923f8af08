use fincalc_core::rounding::{DEFAULT_PRECISION, MAX_PRECISION};
use fincalc_core::{IrrInput, NpvInput, PmtInput};
use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

#[napi]
pub fn round_value(value: f64, precision: Option<u32>) -> NapiResult<f64> {
    let precision = precision.unwrap_or(DEFAULT_PRECISION);
    if precision > MAX_PRECISION {
        return Err(to_napi_error(format!(
            "Invalid input: precision — must be an integer between 0 and {MAX_PRECISION}"
        )));
    }
    Ok(fincalc_core::round(value, precision))
}

// ---------------------------------------------------------------------------
// Time value of money
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_npv(input_json: String) -> NapiResult<f64> {
    let input = NpvInput::from_json(&input_json).map_err(to_napi_error)?;
    fincalc_core::calculate_npv(&input).map_err(to_napi_error)
}

#[napi]
pub fn calculate_irr(input_json: String) -> NapiResult<f64> {
    let input = IrrInput::from_json(&input_json).map_err(to_napi_error)?;
    fincalc_core::calculate_irr(&input).map_err(to_napi_error)
}

#[napi]
pub fn calculate_pmt(input_json: String) -> NapiResult<f64> {
    let input = PmtInput::from_json(&input_json).map_err(to_napi_error)?;
    fincalc_core::calculate_pmt(&input).map_err(to_napi_error)
}
