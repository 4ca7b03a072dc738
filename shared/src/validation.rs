//! Validation utilities for the Crop Cycle Manager
//!
//! The indicator calculator tolerates any input; these checks run when
//! records are entered so that bad data is caught at the door instead.

use rust_decimal::Decimal;

use crate::models::{Cost, CostKind};
use crate::types::parse_record_date;

// ============================================================================
// Crop Cycle Validations
// ============================================================================

/// Validate planted area (hectares) is positive
pub fn validate_area(area: Decimal) -> Result<(), &'static str> {
    if area <= Decimal::ZERO {
        return Err("Area must be greater than 0");
    }
    Ok(())
}

/// Validate soil pH is on the 0-14 scale
pub fn validate_soil_ph(ph: Decimal) -> Result<(), &'static str> {
    if ph < Decimal::ZERO || ph > Decimal::from(14) {
        return Err("Soil pH must be between 0 and 14");
    }
    Ok(())
}

// ============================================================================
// Monetary and Quantity Validations
// ============================================================================

/// Validate a monetary value is not negative
pub fn validate_money(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Monetary values cannot be negative");
    }
    Ok(())
}

/// Validate harvested quantity is positive
pub fn validate_harvest_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Harvest quantity must be greater than 0");
    }
    Ok(())
}

// ============================================================================
// Date Validations
// ============================================================================

/// Validate a record date can be parsed
pub fn validate_record_date(text: &str) -> Result<(), &'static str> {
    match parse_record_date(text) {
        Some(_) => Ok(()),
        None => Err("Invalid date format"),
    }
}

/// Validate an end date does not precede its start date
pub fn validate_date_order(start: &str, end: Option<&str>) -> Result<(), &'static str> {
    let Some(end) = end else {
        return Ok(());
    };
    let start = parse_record_date(start).ok_or("Invalid start date format")?;
    let end = parse_record_date(end).ok_or("Invalid end date format")?;
    if end < start {
        return Err("End date cannot be before start date");
    }
    Ok(())
}

// ============================================================================
// Cost Validations
// ============================================================================

/// Validate variable costs name a crop cycle and fixed costs do not
pub fn validate_cost_assignment(cost: &Cost) -> Result<(), &'static str> {
    let has_safra = cost
        .safra_id
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty());
    match (cost.kind, has_safra) {
        (CostKind::Variable, false) => Err("Variable costs must be assigned to a crop cycle"),
        (CostKind::Fixed, true) => Err("Fixed costs cannot be assigned to a crop cycle"),
        _ => Ok(()),
    }
}

/// Validate the category belongs to the vocabulary of its cost kind
pub fn validate_cost_category(kind: CostKind, category: &str) -> Result<(), &'static str> {
    let category = category.trim().to_lowercase();
    if kind
        .categories()
        .iter()
        .any(|c| c.to_lowercase() == category)
    {
        return Ok(());
    }
    match kind {
        CostKind::Variable => Err("Unknown variable cost category"),
        CostKind::Fixed => Err("Unknown fixed cost category"),
    }
}

// ============================================================================
// Asset Validations
// ============================================================================

/// Validate installment counters of an improvement
pub fn validate_installments(paid: u32, total: u32) -> Result<(), &'static str> {
    if total == 0 {
        return Err("Improvements need at least one installment");
    }
    if paid > total {
        return Err("Paid installments cannot exceed the total");
    }
    Ok(())
}

/// Validate a residual value percentage is between 0 and 100
pub fn validate_residual_percentage(percentage: Decimal) -> Result<(), &'static str> {
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err("Residual value percentage must be between 0 and 100");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate GPS coordinates are on the globe
pub fn validate_coordinates(latitude: Decimal, longitude: Decimal) -> Result<(), &'static str> {
    if latitude < Decimal::from(-90) || latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if longitude < Decimal::from(-180) || longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(kind: CostKind, safra_id: Option<&str>) -> Cost {
        Cost {
            id: "cost1".to_string(),
            safra_id: safra_id.map(str::to_string),
            date: "2024-03-20T00:00:00".to_string(),
            kind,
            category: "Outro".to_string(),
            description: String::new(),
            value: Decimal::from(10),
        }
    }

    // ========================================================================
    // Crop Cycle Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_area() {
        assert!(validate_area(Decimal::from(50)).is_ok());
        assert!(validate_area(Decimal::new(5, 1)).is_ok());
        assert!(validate_area(Decimal::ZERO).is_err());
        assert!(validate_area(Decimal::from(-3)).is_err());
    }

    #[test]
    fn test_validate_soil_ph() {
        assert!(validate_soil_ph(Decimal::new(55, 1)).is_ok());
        assert!(validate_soil_ph(Decimal::ZERO).is_ok());
        assert!(validate_soil_ph(Decimal::from(14)).is_ok());
        assert!(validate_soil_ph(Decimal::from(15)).is_err());
        assert!(validate_soil_ph(Decimal::from(-1)).is_err());
    }

    // ========================================================================
    // Monetary and Quantity Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_money() {
        assert!(validate_money(Decimal::ZERO).is_ok());
        assert!(validate_money(Decimal::new(1500050, 2)).is_ok());
        assert!(validate_money(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_harvest_quantity() {
        assert!(validate_harvest_quantity(Decimal::from(4500)).is_ok());
        assert!(validate_harvest_quantity(Decimal::ZERO).is_err());
    }

    // ========================================================================
    // Date Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_record_date() {
        assert!(validate_record_date("2023-10-15T00:00:00").is_ok());
        assert!(validate_record_date("2023-10-15").is_ok());
        assert!(validate_record_date("amanhã").is_err());
    }

    #[test]
    fn test_validate_date_order() {
        assert!(validate_date_order("2023-05-20", None).is_ok());
        assert!(validate_date_order("2023-05-20", Some("2023-10-30")).is_ok());
        assert!(validate_date_order("2023-05-20", Some("2023-05-20")).is_ok());
        assert!(validate_date_order("2023-05-20", Some("2023-01-01")).is_err());
        assert!(validate_date_order("2023-05-20", Some("never")).is_err());
    }

    // ========================================================================
    // Cost Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_cost_assignment() {
        assert!(validate_cost_assignment(&cost(CostKind::Variable, Some("safra1"))).is_ok());
        assert!(validate_cost_assignment(&cost(CostKind::Fixed, None)).is_ok());
        assert!(validate_cost_assignment(&cost(CostKind::Variable, None)).is_err());
        assert!(validate_cost_assignment(&cost(CostKind::Variable, Some(" "))).is_err());
        assert!(validate_cost_assignment(&cost(CostKind::Fixed, Some("safra1"))).is_err());
    }

    #[test]
    fn test_validate_cost_category() {
        assert!(validate_cost_category(CostKind::Variable, "Mão de Obra").is_ok());
        assert!(validate_cost_category(CostKind::Variable, "transporte").is_ok());
        assert!(validate_cost_category(CostKind::Fixed, "Impostos").is_ok());
        assert!(validate_cost_category(CostKind::Fixed, "Outro").is_ok());
        // Fixed-only category used on a variable cost
        assert!(validate_cost_category(CostKind::Variable, "Arrendamento").is_err());
        assert!(validate_cost_category(CostKind::Fixed, "Combustível").is_err());
    }

    // ========================================================================
    // Asset Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_installments() {
        assert!(validate_installments(30, 60).is_ok());
        assert!(validate_installments(0, 1).is_ok());
        assert!(validate_installments(60, 60).is_ok());
        assert!(validate_installments(0, 0).is_err());
        assert!(validate_installments(61, 60).is_err());
    }

    #[test]
    fn test_validate_residual_percentage() {
        assert!(validate_residual_percentage(Decimal::from(20)).is_ok());
        assert!(validate_residual_percentage(Decimal::ZERO).is_ok());
        assert!(validate_residual_percentage(Decimal::from(100)).is_ok());
        assert!(validate_residual_percentage(Decimal::from(101)).is_err());
        assert!(validate_residual_percentage(Decimal::from(-5)).is_err());
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_coordinates() {
        // Anitápolis, SC
        assert!(validate_coordinates(Decimal::new(-27901, 3), Decimal::new(-49130, 3)).is_ok());
        assert!(validate_coordinates(Decimal::from(91), Decimal::ZERO).is_err());
        assert!(validate_coordinates(Decimal::ZERO, Decimal::from(-181)).is_err());
    }

    // ========================================================================
    // Property Tests
    // ========================================================================

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_coordinates_inside_bounds_are_valid(
            lat in -90_000i64..=90_000,
            lon in -180_000i64..=180_000
        ) {
            prop_assert!(validate_coordinates(Decimal::new(lat, 3), Decimal::new(lon, 3)).is_ok());
        }

        #[test]
        fn prop_soil_ph_range(ph in -100i64..=200) {
            prop_assert_eq!(validate_soil_ph(Decimal::new(ph, 1)).is_ok(), (0..=140).contains(&ph));
        }
    }
}
