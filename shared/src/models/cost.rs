//! Cost models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Suggested categories for variable costs
pub const VARIABLE_COST_CATEGORIES: &[&str] = &[
    "Mão de Obra",
    "Transporte",
    "Armazenagem",
    "Combustível",
    "Outro",
];

/// Suggested categories for fixed costs
pub const FIXED_COST_CATEGORIES: &[&str] = &[
    "Impostos",
    "Arrendamento",
    "Salários",
    "Manutenção",
    "Outro",
];

/// A cost entry.
///
/// Variable costs belong to one crop cycle. Fixed costs carry no crop cycle
/// and are prorated across every cycle active on the cost's date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cost {
    pub id: String,
    #[serde(default)]
    pub safra_id: Option<String>,
    pub date: String,
    pub kind: CostKind,
    pub category: String,
    pub description: String,
    pub value: Decimal,
}

impl Cost {
    pub fn is_fixed(&self) -> bool {
        self.kind == CostKind::Fixed
    }

    /// True for a variable cost assigned to the given crop cycle
    pub fn is_variable_for(&self, safra_id: &str) -> bool {
        self.kind == CostKind::Variable && self.safra_id.as_deref() == Some(safra_id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    #[serde(alias = "Variável")]
    Variable,
    #[serde(alias = "Fixo")]
    Fixed,
}

impl CostKind {
    pub fn label(&self) -> &'static str {
        match self {
            CostKind::Variable => "Variável",
            CostKind::Fixed => "Fixo",
        }
    }

    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            CostKind::Variable => VARIABLE_COST_CATEGORIES,
            CostKind::Fixed => FIXED_COST_CATEGORIES,
        }
    }
}

impl std::fmt::Display for CostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
