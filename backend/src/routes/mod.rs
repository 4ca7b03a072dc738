//! Route definitions for the Crop Cycle Manager

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/farms", farm_routes())
        .nest("/safras", safra_routes())
        .nest("/operations", operation_routes())
        .nest("/costs", cost_routes())
        .nest("/harvests", harvest_routes())
        .nest("/machinery", machinery_routes())
        .nest("/improvements", improvement_routes())
        .route("/results", get(handlers::get_results_overview))
        .route("/reports", post(handlers::generate_report))
}

fn farm_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_farms).post(handlers::create_farm))
        .route(
            "/:farm_id",
            get(handlers::get_farm)
                .put(handlers::update_farm)
                .delete(handlers::delete_farm),
        )
}

fn safra_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_safras).post(handlers::create_safra))
        .route(
            "/:safra_id",
            get(handlers::get_safra)
                .put(handlers::update_safra)
                .delete(handlers::delete_safra),
        )
        .route("/:safra_id/finish", post(handlers::finish_safra))
        .route("/:safra_id/results", get(handlers::get_safra_results))
}

fn operation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_operations).post(handlers::create_operation))
        .route(
            "/:operation_id",
            get(handlers::get_operation)
                .put(handlers::update_operation)
                .delete(handlers::delete_operation),
        )
}

fn cost_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_costs).post(handlers::create_cost))
        .route(
            "/:cost_id",
            get(handlers::get_cost)
                .put(handlers::update_cost)
                .delete(handlers::delete_cost),
        )
}

fn harvest_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_harvests).post(handlers::record_harvest))
        .route(
            "/:harvest_id",
            get(handlers::get_harvest)
                .put(handlers::update_harvest)
                .delete(handlers::delete_harvest),
        )
}

fn machinery_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_machinery).post(handlers::create_machinery))
        .route(
            "/:machinery_id",
            get(handlers::get_machinery)
                .put(handlers::update_machinery)
                .delete(handlers::delete_machinery),
        )
}

fn improvement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_improvements).post(handlers::create_improvement),
        )
        .route(
            "/:improvement_id",
            get(handlers::get_improvement)
                .put(handlers::update_improvement)
                .delete(handlers::delete_improvement),
        )
}
