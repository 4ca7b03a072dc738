//! Seed data for the in-memory store

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

use crate::models::{
    Cost, CostKind, Farm, FieldOperation, Harvest, HarvestUnit, Improvement, Installments,
    Machinery, OperationType, Safra,
};

/// Initial contents of every record collection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub farms: Vec<Farm>,
    #[serde(default)]
    pub safras: Vec<Safra>,
    #[serde(default)]
    pub operations: Vec<FieldOperation>,
    #[serde(default)]
    pub costs: Vec<Cost>,
    #[serde(default)]
    pub harvests: Vec<Harvest>,
    #[serde(default)]
    pub machinery: Vec<Machinery>,
    #[serde(default)]
    pub improvements: Vec<Improvement>,
}

impl Fixtures {
    /// Load fixtures from a JSON file with one array per collection
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixtures from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing fixtures in {}", path.display()))
    }

    /// Demonstration data: two farms, three crop cycles and their records
    pub fn demo() -> Self {
        let farms = vec![
            Farm {
                id: "farm1".to_string(),
                name: "Fazenda Boa Esperança".to_string(),
                location: "Anitápolis, SC".to_string(),
                producer_name: Some("João da Silva".to_string()),
                coordinates: None,
            },
            Farm {
                id: "farm2".to_string(),
                name: "Sítio Recanto Verde".to_string(),
                location: "Alfredo Wagner, SC".to_string(),
                producer_name: Some("João da Silva".to_string()),
                coordinates: None,
            },
        ];

        let safras = vec![
            demo_safra("safra1", "farm1", "Milho Verão 23/24", "Milho", "AG-7098", 50, "2023-10-15T00:00:00", true),
            demo_safra("safra2", "farm1", "Soja Safra 23/24", "Soja", "TMG-7062", 75, "2023-11-01T00:00:00", true),
            demo_safra("safra3", "farm2", "Trigo Inverno 23", "Trigo", "TBIO-Audaz", 30, "2023-05-20T00:00:00", false),
        ];

        let operations = vec![
            demo_operation("op1", "2023-10-16T00:00:00", OperationType::Planting, "-", 15_000),
            demo_operation("op2", "2023-11-20T00:00:00", OperationType::FertilizationAndLiming, "NPK 10-20-20", 25_000),
            demo_operation("op3", "2024-01-15T00:00:00", OperationType::PestControl, "Herbicida XPTO", 8_000),
        ];

        let costs = vec![
            Cost {
                id: "cost1".to_string(),
                safra_id: Some("safra1".to_string()),
                date: "2024-03-20T00:00:00".to_string(),
                kind: CostKind::Variable,
                category: "Mão de Obra".to_string(),
                description: "Pagamento colheita".to_string(),
                value: Decimal::from(12_000),
            },
            Cost {
                id: "cost2".to_string(),
                safra_id: Some("safra1".to_string()),
                date: "2024-03-25T00:00:00".to_string(),
                kind: CostKind::Variable,
                category: "Transporte".to_string(),
                description: "Frete para o silo".to_string(),
                value: Decimal::from(7_500),
            },
            Cost {
                id: "cost3".to_string(),
                safra_id: None,
                date: "2024-01-10T00:00:00".to_string(),
                kind: CostKind::Fixed,
                category: "Impostos".to_string(),
                description: "ITR".to_string(),
                value: Decimal::from(15_000),
            },
            Cost {
                id: "cost4".to_string(),
                safra_id: None,
                date: "2024-02-10T00:00:00".to_string(),
                kind: CostKind::Fixed,
                category: "Salários".to_string(),
                description: "Funcionário Fixo".to_string(),
                // Yearly salary of 23,657.5342 charged monthly
                value: Decimal::new(236_575_342, 4) / Decimal::from(12),
            },
        ];

        let harvests = vec![Harvest {
            id: "harvest1".to_string(),
            safra_id: "safra1".to_string(),
            date: "2024-03-18T00:00:00".to_string(),
            quantity: Decimal::from(4_500),
            unit: HarvestUnit::Sack,
            unit_price: Decimal::from(55),
            responsible: "João da Silva".to_string(),
        }];

        let machinery = vec![Machinery {
            id: "mach1".to_string(),
            farm_id: "farm1".to_string(),
            name: "Trator Valtra A950".to_string(),
            machine_type: "Trator".to_string(),
            acquisition_value: Decimal::from(250_000),
            acquisition_date: "2020-01-15T00:00:00".to_string(),
            lifespan_years: 10,
            residual_value_percentage: Decimal::from(20),
        }];

        let improvements = vec![Improvement {
            id: "imp1".to_string(),
            farm_id: "farm1".to_string(),
            name: "Construção de Silo".to_string(),
            total_value: Decimal::from(150_000),
            installments: Installments {
                current: 30,
                total: 60,
            },
            payment_start_date: "2021-07-20T00:00:00".to_string(),
        }];

        Self {
            farms,
            safras,
            operations,
            costs,
            harvests,
            machinery,
            improvements,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_safra(
    id: &str,
    farm_id: &str,
    name: &str,
    culture: &str,
    variety: &str,
    area: i64,
    start_date: &str,
    is_active: bool,
) -> Safra {
    Safra {
        id: id.to_string(),
        farm_id: farm_id.to_string(),
        name: name.to_string(),
        culture: culture.to_string(),
        variety: variety.to_string(),
        area: Decimal::from(area),
        start_date: start_date.to_string(),
        end_date: None,
        is_active,
        soil_analysis: None,
    }
}

fn demo_operation(
    id: &str,
    date: &str,
    operation_type: OperationType,
    details: &str,
    cost: i64,
) -> FieldOperation {
    FieldOperation {
        id: id.to_string(),
        safra_id: "safra1".to_string(),
        date: date.to_string(),
        operation_type,
        details: details.to_string(),
        cost: Decimal::from(cost),
    }
}
