//! Record models for the Crop Cycle Manager
//!
//! Re-exports models from the shared crate together with the calculator
//! types the services hand out

pub use shared::assets::{ImprovementBalance, MachineryDepreciation};
pub use shared::indicators::{CalculationInputs, CostDistributionEntry, SafraIndicators};
pub use shared::models::*;
