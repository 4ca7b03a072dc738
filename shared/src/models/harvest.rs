//! Harvest models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{div_or_zero, mul_or_zero, KG_PER_TON, SACK_WEIGHT_KG};

/// A harvest record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Harvest {
    pub id: String,
    pub safra_id: String,
    pub date: String,
    pub quantity: Decimal,
    pub unit: HarvestUnit,
    /// Price per `unit`
    pub unit_price: Decimal,
    pub responsible: String,
}

impl Harvest {
    /// Gross value of the harvest (quantity × unit price); 0 on overflow
    pub fn revenue(&self) -> Decimal {
        mul_or_zero(self.quantity, self.unit_price)
    }

    /// Quantity expressed in 60 kg standard sacks
    pub fn sacks(&self) -> Decimal {
        self.unit.to_sacks(self.quantity)
    }
}

/// Units a harvest quantity can be recorded in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HarvestUnit {
    #[serde(rename = "kg")]
    Kilogram,
    /// Standard 60 kg sack
    #[serde(rename = "saca")]
    Sack,
    #[serde(rename = "ton")]
    Ton,
}

impl HarvestUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            HarvestUnit::Kilogram => "kg",
            HarvestUnit::Sack => "saca",
            HarvestUnit::Ton => "ton",
        }
    }

    /// Convert a quantity in this unit to standard sacks
    pub fn to_sacks(&self, quantity: Decimal) -> Decimal {
        match self {
            HarvestUnit::Sack => quantity,
            HarvestUnit::Kilogram => div_or_zero(quantity, Decimal::from(SACK_WEIGHT_KG)),
            HarvestUnit::Ton => div_or_zero(
                mul_or_zero(quantity, Decimal::from(KG_PER_TON)),
                Decimal::from(SACK_WEIGHT_KG),
            ),
        }
    }
}

impl std::fmt::Display for HarvestUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown harvest unit: {0}")]
pub struct UnknownHarvestUnit(pub String);

impl std::str::FromStr for HarvestUnit {
    type Err = UnknownHarvestUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(HarvestUnit::Kilogram),
            "saca" | "sc" => Ok(HarvestUnit::Sack),
            "ton" | "t" => Ok(HarvestUnit::Ton),
            _ => Err(UnknownHarvestUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilograms_to_sacks() {
        assert_eq!(HarvestUnit::Kilogram.to_sacks(Decimal::from(120)), Decimal::from(2));
    }

    #[test]
    fn test_tons_to_sacks() {
        let sacks = HarvestUnit::Ton.to_sacks(Decimal::from(1));
        assert_eq!(sacks, Decimal::from(1000) / Decimal::from(60));
        assert_eq!(sacks.round_dp(3), Decimal::new(16667, 3));
    }

    #[test]
    fn test_tons_beyond_decimal_range_give_zero() {
        assert_eq!(HarvestUnit::Ton.to_sacks(Decimal::MAX), Decimal::ZERO);
    }

    #[test]
    fn test_sacks_unchanged() {
        assert_eq!(HarvestUnit::Sack.to_sacks(Decimal::from(5)), Decimal::from(5));
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("kg".parse::<HarvestUnit>(), Ok(HarvestUnit::Kilogram));
        assert_eq!("Saca".parse::<HarvestUnit>(), Ok(HarvestUnit::Sack));
        assert_eq!(" ton ".parse::<HarvestUnit>(), Ok(HarvestUnit::Ton));
        assert!("arroba".parse::<HarvestUnit>().is_err());
    }

    #[test]
    fn test_revenue() {
        let harvest = Harvest {
            id: "harvest1".to_string(),
            safra_id: "safra1".to_string(),
            date: "2024-03-18T00:00:00".to_string(),
            quantity: Decimal::from(4500),
            unit: HarvestUnit::Sack,
            unit_price: Decimal::from(55),
            responsible: "João da Silva".to_string(),
        };
        assert_eq!(harvest.revenue(), Decimal::from(247_500));
        assert_eq!(harvest.sacks(), Decimal::from(4500));
    }
}
