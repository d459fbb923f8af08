use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use fincalc_core::rounding::{self, DEFAULT_PRECISION, MAX_PRECISION};
use fincalc_core::with_metadata;

use crate::input;

/// Arguments for rounding a single value
#[derive(Args)]
pub struct RoundArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Number to round
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<f64>,

    /// Decimal places, 0 to 10
    #[arg(long)]
    pub precision: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RoundInput {
    value: f64,
    #[serde(default)]
    precision: Option<u32>,
}

pub fn run_round(args: RoundArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let round_input: RoundInput = match input::read_structured(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => RoundInput {
            value: args.value.ok_or("--value is required (or provide --input)")?,
            precision: args.precision,
        },
    };

    let precision = round_input.precision.unwrap_or(DEFAULT_PRECISION);
    if precision > MAX_PRECISION {
        return Err(format!("--precision must be between 0 and {MAX_PRECISION}").into());
    }

    let rounded = rounding::round(round_input.value, precision);
    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata(
        "Round half away from zero",
        &round_input,
        Vec::new(),
        elapsed,
        serde_json::json!({ "rounded": rounded, "precision": precision }),
    )?;
    Ok(serde_json::to_value(output)?)
}
