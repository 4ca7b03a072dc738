//! Machinery depreciation and improvement installment calculations

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Improvement, Machinery};
use crate::types::{div_or_zero, mul_or_zero, sub_or_zero};

/// Straight-line depreciation summary for a machine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineryDepreciation {
    pub residual_value: Decimal,
    /// Acquisition value minus residual value
    pub depreciable_amount: Decimal,
    pub annual_depreciation: Decimal,
}

/// Payment position of an improvement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImprovementBalance {
    pub installment_value: Decimal,
    pub paid_amount: Decimal,
    pub balance_due: Decimal,
    pub remaining_installments: u32,
}

/// Value left at end of life
pub fn residual_value(acquisition_value: Decimal, residual_percentage: Decimal) -> Decimal {
    div_or_zero(
        mul_or_zero(acquisition_value, residual_percentage),
        Decimal::ONE_HUNDRED,
    )
}

/// Straight-line yearly depreciation; 0 when the lifespan is 0
pub fn annual_depreciation(
    acquisition_value: Decimal,
    lifespan_years: u32,
    residual_percentage: Decimal,
) -> Decimal {
    if lifespan_years == 0 {
        return Decimal::ZERO;
    }
    let residual = residual_value(acquisition_value, residual_percentage);
    div_or_zero(
        sub_or_zero(acquisition_value, residual),
        Decimal::from(lifespan_years),
    )
}

pub fn machinery_depreciation(machinery: &Machinery) -> MachineryDepreciation {
    let residual = residual_value(
        machinery.acquisition_value,
        machinery.residual_value_percentage,
    );
    MachineryDepreciation {
        residual_value: residual,
        depreciable_amount: sub_or_zero(machinery.acquisition_value, residual),
        annual_depreciation: annual_depreciation(
            machinery.acquisition_value,
            machinery.lifespan_years,
            machinery.residual_value_percentage,
        ),
    }
}

/// Value of a single installment; 0 when there are no installments
pub fn installment_value(total_value: Decimal, installment_count: u32) -> Decimal {
    if installment_count == 0 {
        return Decimal::ZERO;
    }
    div_or_zero(total_value, Decimal::from(installment_count))
}

/// Amount still owed after `paid` of `count` installments
pub fn balance_due(total_value: Decimal, paid: u32, count: u32) -> Decimal {
    let remaining = Decimal::from(count) - Decimal::from(paid);
    mul_or_zero(remaining, installment_value(total_value, count))
}

pub fn improvement_balance(improvement: &Improvement) -> ImprovementBalance {
    let installments = improvement.installments;
    let value = installment_value(improvement.total_value, installments.total);
    ImprovementBalance {
        installment_value: value,
        paid_amount: mul_or_zero(value, Decimal::from(installments.current)),
        balance_due: balance_due(
            improvement.total_value,
            installments.current,
            installments.total,
        ),
        remaining_installments: installments.remaining(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Installments;

    fn tractor() -> Machinery {
        Machinery {
            id: "mach1".to_string(),
            farm_id: "farm1".to_string(),
            name: "Trator Valtra A950".to_string(),
            machine_type: "Trator".to_string(),
            acquisition_value: Decimal::from(250_000),
            acquisition_date: "2020-01-15T00:00:00".to_string(),
            lifespan_years: 10,
            residual_value_percentage: Decimal::from(20),
        }
    }

    fn silo() -> Improvement {
        Improvement {
            id: "imp1".to_string(),
            farm_id: "farm1".to_string(),
            name: "Construção de Silo".to_string(),
            total_value: Decimal::from(150_000),
            installments: Installments {
                current: 30,
                total: 60,
            },
            payment_start_date: "2021-07-20T00:00:00".to_string(),
        }
    }

    #[test]
    fn test_machinery_depreciation() {
        let summary = machinery_depreciation(&tractor());
        assert_eq!(summary.residual_value, Decimal::from(50_000));
        assert_eq!(summary.depreciable_amount, Decimal::from(200_000));
        assert_eq!(summary.annual_depreciation, Decimal::from(20_000));
    }

    #[test]
    fn test_zero_lifespan_has_no_depreciation() {
        assert_eq!(
            annual_depreciation(Decimal::from(1000), 0, Decimal::from(10)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_improvement_balance() {
        let balance = improvement_balance(&silo());
        assert_eq!(balance.installment_value, Decimal::from(2_500));
        assert_eq!(balance.paid_amount, Decimal::from(75_000));
        assert_eq!(balance.balance_due, Decimal::from(75_000));
        assert_eq!(balance.remaining_installments, 30);
    }

    #[test]
    fn test_zero_installments() {
        assert_eq!(installment_value(Decimal::from(100), 0), Decimal::ZERO);
        assert_eq!(balance_due(Decimal::from(100), 0, 0), Decimal::ZERO);
    }

    #[test]
    fn test_fully_paid() {
        assert_eq!(balance_due(Decimal::from(1200), 12, 12), Decimal::ZERO);
    }

    #[test]
    fn test_out_of_range_residual_gives_zero() {
        assert_eq!(residual_value(Decimal::MAX, Decimal::from(50)), Decimal::ZERO);
        let summary = machinery_depreciation(&Machinery {
            acquisition_value: Decimal::MAX,
            residual_value_percentage: Decimal::from(50),
            ..tractor()
        });
        assert_eq!(summary.depreciable_amount, Decimal::MAX);
    }
}
