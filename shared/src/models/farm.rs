//! Farm models

use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// A registered farm (propriedade)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Farm {
    pub id: String,
    pub name: String,
    /// Free-text location, e.g. "Anitápolis, SC"
    pub location: String,
    /// Set when a technician manages the farm on behalf of a producer
    #[serde(default)]
    pub producer_name: Option<String>,
    #[serde(default)]
    pub coordinates: Option<GpsCoordinates>,
}
