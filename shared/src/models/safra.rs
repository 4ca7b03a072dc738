//! Crop cycle (safra) models

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::parse_record_date;

/// One planting-to-harvest cycle of a culture on a given area
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Safra {
    pub id: String,
    pub farm_id: String,
    pub name: String,
    pub culture: String,
    pub variety: String,
    /// Planted area in hectares
    pub area: Decimal,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub soil_analysis: Option<SoilAnalysis>,
}

impl Safra {
    pub fn parsed_start_date(&self) -> Option<NaiveDateTime> {
        parse_record_date(&self.start_date)
    }

    /// End date, or `None` when unset or unparseable
    pub fn parsed_end_date(&self) -> Option<NaiveDateTime> {
        self.end_date.as_deref().and_then(parse_record_date)
    }

    /// Status label shown on result cards
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Ativa"
        } else {
            "Finalizada"
        }
    }
}

/// Soil analysis snapshot taken for a crop cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilAnalysis {
    pub ph: Decimal,
    /// Phosphorus (P)
    pub phosphorus: Decimal,
    /// Potassium (K)
    pub potassium: Decimal,
    /// Organic matter (M.O.)
    pub organic_matter: Decimal,
    /// Calcium (Ca)
    pub calcium: Decimal,
    /// Magnesium (Mg)
    pub magnesium: Decimal,
    /// Aluminum (Al)
    pub aluminum: Decimal,
    /// Base saturation (V%)
    #[serde(default)]
    pub base_saturation: Option<Decimal>,
    /// Aluminum saturation (m%)
    #[serde(default)]
    pub aluminum_saturation: Option<Decimal>,
    /// Cation exchange capacity (CTC)
    #[serde(default)]
    pub cec: Option<Decimal>,
    #[serde(default)]
    pub sulfur: Option<Decimal>,
    #[serde(default)]
    pub boron: Option<Decimal>,
    #[serde(default)]
    pub copper: Option<Decimal>,
    #[serde(default)]
    pub iron: Option<Decimal>,
    #[serde(default)]
    pub manganese: Option<Decimal>,
    #[serde(default)]
    pub zinc: Option<Decimal>,
}
