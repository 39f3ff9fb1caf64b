pub mod trade;
pub mod vwap;
