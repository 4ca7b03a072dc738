//! Farm improvement (benfeitoria) models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An infrastructure investment paid in installments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Improvement {
    pub id: String,
    pub farm_id: String,
    pub name: String,
    pub total_value: Decimal,
    pub installments: Installments,
    pub payment_start_date: String,
}

/// Installment progress of an improvement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Installments {
    /// Installments already paid
    pub current: u32,
    pub total: u32,
}

impl Installments {
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.current)
    }
}
