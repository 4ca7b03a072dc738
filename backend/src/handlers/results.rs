//! Results and report handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::results::SafraOverview;
use crate::services::{ReportService, ResultsService};
use crate::AppState;

/// Results overview, newest crop cycle first
pub async fn get_results_overview(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SafraOverview>>> {
    let service = ResultsService::new(state.store);
    Ok(Json(service.overview().await?))
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>, // "json" or "csv"
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub safra_ids: Vec<String>,
}

/// Generate a technical report for the selected crop cycles
pub async fn generate_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
    Json(body): Json<ReportRequest>,
) -> AppResult<impl IntoResponse> {
    let service = ReportService::new(state.store, state.config.report.title.clone());
    let report = service.build_report(&body.safra_ids).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportService::export_to_csv(&report.summary_rows())?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"relatorio_safra.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(report).into_response())
    }
}
