//! Technical report generation
//!
//! A report holds one section per selected crop cycle with farm details,
//! indicators and the records behind them. Summary rows can be exported
//! as CSV.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{CalculationInputs, Farm, Safra, SafraIndicators};
use crate::store::Store;

#[derive(Clone)]
pub struct ReportService {
    store: Arc<Store>,
    title: String,
}

/// Complete technical report
#[derive(Debug, Clone, Serialize)]
pub struct SafraReport {
    pub title: String,
    /// Generation date, `YYYY-MM-DD`
    pub generated_at: String,
    pub sections: Vec<SafraReportSection>,
}

/// Report section for one crop cycle
#[derive(Debug, Clone, Serialize)]
pub struct SafraReportSection {
    pub safra: Safra,
    /// Absent when the cycle points at a farm that no longer exists
    pub farm: Option<Farm>,
    pub indicators: SafraIndicators,
    pub operations: Vec<OperationLine>,
    pub costs: Vec<CostLine>,
    pub harvests: Vec<HarvestLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationLine {
    pub date: String,
    pub operation_type: String,
    pub details: String,
    pub cost: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostLine {
    pub date: String,
    pub category: String,
    pub description: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct HarvestLine {
    pub date: String,
    pub quantity: Decimal,
    pub unit: String,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// Flat per-cycle row used for CSV export
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummaryRow {
    pub safra: String,
    pub farm: String,
    pub producer: String,
    pub culture: String,
    pub variety: String,
    pub area_ha: Decimal,
    pub status: String,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub gross_profit: Decimal,
    pub roi_percent: Decimal,
    pub productivity_sc_ha: Decimal,
    pub cost_per_sack: Decimal,
    pub profit_per_hectare: Decimal,
}

impl SafraReport {
    pub fn summary_rows(&self) -> Vec<ReportSummaryRow> {
        self.sections.iter().map(SafraReportSection::summary_row).collect()
    }
}

impl SafraReportSection {
    fn build(safra: &Safra, farms: &[Farm], inputs: &CalculationInputs) -> Self {
        let operations = inputs
            .operations
            .iter()
            .filter(|op| op.safra_id == safra.id)
            .map(|op| OperationLine {
                date: op.date.clone(),
                operation_type: op.operation_type.label().to_string(),
                details: op.details.clone(),
                cost: op.cost,
            })
            .collect();

        let costs = inputs
            .costs
            .iter()
            .filter(|c| c.safra_id.as_deref() == Some(safra.id.as_str()))
            .map(|c| CostLine {
                date: c.date.clone(),
                category: c.category.clone(),
                description: c.description.clone(),
                value: c.value,
            })
            .collect();

        let harvests = inputs
            .harvests
            .iter()
            .filter(|h| h.safra_id == safra.id)
            .map(|h| HarvestLine {
                date: h.date.clone(),
                quantity: h.quantity,
                unit: h.unit.symbol().to_string(),
                unit_price: h.unit_price,
                total: h.revenue(),
            })
            .collect();

        Self {
            safra: safra.clone(),
            farm: farms.iter().find(|f| f.id == safra.farm_id).cloned(),
            indicators: inputs.indicators_for(Some(safra)),
            operations,
            costs,
            harvests,
        }
    }

    pub fn summary_row(&self) -> ReportSummaryRow {
        let farm = self.farm.as_ref();
        ReportSummaryRow {
            safra: self.safra.name.clone(),
            farm: farm.map(|f| f.name.clone()).unwrap_or_default(),
            producer: farm
                .and_then(|f| f.producer_name.clone())
                .unwrap_or_default(),
            culture: self.safra.culture.clone(),
            variety: self.safra.variety.clone(),
            area_ha: self.safra.area,
            status: self.safra.status_label().to_string(),
            total_revenue: self.indicators.total_revenue.round_dp(2),
            total_cost: self.indicators.total_cost.round_dp(2),
            gross_profit: self.indicators.gross_profit.round_dp(2),
            roi_percent: self.indicators.roi.round_dp(2),
            productivity_sc_ha: self.indicators.productivity.round_dp(2),
            cost_per_sack: self.indicators.cost_per_sack.round_dp(2),
            profit_per_hectare: self.indicators.profit_per_hectare.round_dp(2),
        }
    }
}

impl ReportService {
    pub fn new(store: Arc<Store>, title: impl Into<String>) -> Self {
        Self {
            store,
            title: title.into(),
        }
    }

    /// Build a report for the selected crop cycles.
    ///
    /// Sections follow store order, not selection order. Unknown ids are
    /// skipped.
    pub async fn build_report(&self, safra_ids: &[String]) -> AppResult<SafraReport> {
        if safra_ids.is_empty() {
            return Err(AppError::invalid(
                "safra_ids",
                "Select at least one crop cycle",
            ));
        }

        let inputs = self.store.snapshot().await;
        let farms = self.store.farms.list().await;

        let sections: Vec<SafraReportSection> = inputs
            .safras
            .iter()
            .filter(|s| safra_ids.contains(&s.id))
            .map(|s| SafraReportSection::build(s, &farms, &inputs))
            .collect();

        tracing::info!(
            requested = safra_ids.len(),
            sections = sections.len(),
            "Technical report generated"
        );

        Ok(SafraReport {
            title: self.title.clone(),
            generated_at: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            sections,
        })
    }

    /// Serialize rows to CSV with a header line
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_REPORT_TITLE;
    use crate::store::Fixtures;

    fn service() -> ReportService {
        ReportService::new(
            Arc::new(Store::from_fixtures(Fixtures::demo())),
            DEFAULT_REPORT_TITLE,
        )
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_sections_follow_store_order() {
        let report = service()
            .build_report(&ids(&["safra3", "safra1"]))
            .await
            .unwrap();
        let names: Vec<&str> = report.sections.iter().map(|s| s.safra.id.as_str()).collect();
        assert_eq!(names, vec!["safra1", "safra3"]);
        assert_eq!(report.title, "Relatório Técnico de Safra");
    }

    #[tokio::test]
    async fn test_section_line_items() {
        let report = service().build_report(&ids(&["safra1"])).await.unwrap();
        let section = &report.sections[0];

        assert_eq!(section.farm.as_ref().map(|f| f.name.as_str()), Some("Fazenda Boa Esperança"));
        assert_eq!(section.operations.len(), 3);
        assert_eq!(section.operations[0].operation_type, "Plantio");
        // Only costs tied to the cycle; fixed costs show up in the indicators
        assert_eq!(section.costs.len(), 2);
        assert_eq!(section.harvests[0].total, Decimal::from(247_500));
        assert_eq!(section.harvests[0].unit, "saca");
    }

    #[tokio::test]
    async fn test_unknown_ids_are_skipped() {
        let report = service()
            .build_report(&ids(&["safra9", "safra2"]))
            .await
            .unwrap();
        assert_eq!(report.sections.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_selection_rejected() {
        assert!(matches!(
            service().build_report(&[]).await,
            Err(AppError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_csv_export_has_header_and_rows() {
        let report = service()
            .build_report(&ids(&["safra1", "safra2"]))
            .await
            .unwrap();
        let csv = ReportService::export_to_csv(&report.summary_rows()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("safra,farm,producer,culture"));
        assert!(lines[1].contains("Milho Verão 23/24"));
        assert!(lines[1].contains("Ativa"));
    }

    #[test]
    fn test_export_empty_rows() {
        let rows: Vec<ReportSummaryRow> = Vec::new();
        assert_eq!(ReportService::export_to_csv(&rows).unwrap(), "");
    }
}
