pub mod rounding;
pub mod time_value;
