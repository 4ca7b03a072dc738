//! Machinery models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A machine owned by a farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Machinery {
    pub id: String,
    pub farm_id: String,
    pub name: String,
    /// Machine type, e.g. "Trator"
    pub machine_type: String,
    pub acquisition_value: Decimal,
    pub acquisition_date: String,
    pub lifespan_years: u32,
    /// Share of the acquisition value left at end of life (0-100)
    pub residual_value_percentage: Decimal,
}
