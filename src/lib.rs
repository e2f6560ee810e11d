pub mod config;
pub mod geometry;
pub mod input;
pub mod risk;

pub use risk::{lowest_total_risk, Error, RiskMap};
