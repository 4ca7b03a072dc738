//! Field operation models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field operation performed on a crop cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldOperation {
    pub id: String,
    pub safra_id: String,
    pub date: String,
    pub operation_type: OperationType,
    /// Free-text detail, e.g. product and dose
    pub details: String,
    pub cost: Decimal,
}

/// Kinds of field operations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    #[serde(alias = "Plantio")]
    Planting,
    #[serde(alias = "Defensivo")]
    PestControl,
    #[serde(alias = "Adubação e Correção")]
    FertilizationAndLiming,
    #[serde(alias = "Irrigação")]
    Irrigation,
    #[serde(alias = "Preparo do Solo")]
    SoilPreparation,
    #[serde(alias = "Tratamento Adicional")]
    AdditionalTreatment,
    #[serde(alias = "Tratos Culturais")]
    CropManagement,
    #[serde(alias = "Outra")]
    Other,
}

impl OperationType {
    pub const ALL: [OperationType; 8] = [
        OperationType::Planting,
        OperationType::PestControl,
        OperationType::FertilizationAndLiming,
        OperationType::Irrigation,
        OperationType::SoilPreparation,
        OperationType::AdditionalTreatment,
        OperationType::CropManagement,
        OperationType::Other,
    ];

    /// Portuguese label used in results and reports
    pub fn label(&self) -> &'static str {
        match self {
            OperationType::Planting => "Plantio",
            OperationType::PestControl => "Defensivo",
            OperationType::FertilizationAndLiming => "Adubação e Correção",
            OperationType::Irrigation => "Irrigação",
            OperationType::SoilPreparation => "Preparo do Solo",
            OperationType::AdditionalTreatment => "Tratamento Adicional",
            OperationType::CropManagement => "Tratos Culturais",
            OperationType::Other => "Outra",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown operation type: {0}")]
pub struct UnknownOperationType(pub String);

impl std::str::FromStr for OperationType {
    type Err = UnknownOperationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationType::ALL
            .into_iter()
            .find(|op| op.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownOperationType(s.to_string()))
    }
}
