//! Business logic services for the Crop Cycle Manager

pub mod cost;
pub mod farm;
pub mod harvest;
pub mod improvement;
pub mod machinery;
pub mod operation;
pub mod report;
pub mod results;
pub mod safra;

pub use cost::CostService;
pub use farm::FarmService;
pub use harvest::HarvestService;
pub use improvement::ImprovementService;
pub use machinery::MachineryService;
pub use operation::OperationService;
pub use report::ReportService;
pub use results::ResultsService;
pub use safra::SafraService;

use crate::error::{AppError, AppResult};
use crate::store::{Record, Repository};

/// Turn a shared validation failure into a field error
pub(crate) fn check(field: &str, result: Result<(), &'static str>) -> AppResult<()> {
    result.map_err(|message| AppError::invalid(field, message))
}

/// Write back an edited record; `NotFound` if it was deleted meanwhile
pub(crate) async fn save<T: Record>(
    repository: &dyn Repository<T>,
    kind: &str,
    record: T,
) -> AppResult<T> {
    let id = record.id().to_string();
    repository
        .update(record)
        .await
        .ok_or_else(|| AppError::NotFound(format!("{} {}", kind, id)))
}
