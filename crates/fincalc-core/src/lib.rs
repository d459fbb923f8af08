pub mod error;
pub mod financial;
pub mod rounding;
pub mod time_value;
pub mod types;
pub mod validation;

pub use error::FinCalcError;
pub use financial::{calculate_irr, calculate_npv, calculate_pmt};
pub use rounding::round;
pub use types::*;
pub use validation::{FinancialInput, IrrInput, NpvInput, PmtInput};

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
