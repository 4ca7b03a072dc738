//! Crop Cycle Manager - Backend Server
//!
//! Records farms, crop cycles (safras), field operations, costs, harvests
//! and farm assets, and computes the financial and agronomic indicators of
//! each crop cycle.

use axum::{extract::State, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod store;

pub use config::Config;

use error::AppError;
use store::{Fixtures, Store};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load().map_err(|e| AppError::Configuration(e.to_string()))?;

    // Initialize tracing
    let json_logs = config.logging.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safra_server=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Starting Crop Cycle Manager Server");
    tracing::info!("Environment: {}", config.environment);

    let fixtures = load_fixtures(&config.store)?;
    let store = Store::from_fixtures(fixtures);
    let counts = store.counts().await;
    tracing::info!(
        farms = counts.farms,
        safras = counts.safras,
        operations = counts.operations,
        costs = counts.costs,
        harvests = counts.harvests,
        "Record store ready"
    );

    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
    };

    let app = create_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Pick the records the store starts with
fn load_fixtures(config: &config::StoreConfig) -> anyhow::Result<Fixtures> {
    if let Some(path) = &config.fixtures_path {
        tracing::info!("Loading fixtures from {}", path);
        return Fixtures::from_json_file(path);
    }
    if config.seed_fixtures {
        tracing::info!("Seeding demonstration records");
        return Ok(Fixtures::demo());
    }
    Ok(Fixtures::default())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root(State(state): State<AppState>) -> String {
    format!(
        "Crop Cycle Manager API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        state.config.environment
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn decimal(value: &Value) -> Option<Decimal> {
        value.as_str().and_then(|s| s.parse().ok())
    }

    fn app() -> Router {
        create_app(AppState {
            store: Arc::new(Store::from_fixtures(Fixtures::demo())),
            config: Arc::new(Config::default()),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    #[tokio::test]
    async fn test_health_reports_record_counts() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["records"]["safras"], 3);
        assert_eq!(body["records"]["improvements"], 1);
    }

    #[tokio::test]
    async fn test_list_safras_hides_inactive() {
        let (status, body) = get_json(app(), "/api/v1/safras").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(2));

        let (_, body) = get_json(app(), "/api/v1/safras?include_inactive=true").await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_safra_results_endpoint() {
        let (status, body) = get_json(app(), "/api/v1/safras/safra1/results").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["total_revenue"]), Some(Decimal::from(247_500)));
        assert_eq!(decimal(&body["productivity"]), Some(Decimal::from(90)));
    }

    #[tokio::test]
    async fn test_gzip_when_client_accepts_it() {
        let request = Request::builder()
            .uri("/api/v1/results")
            .header("accept-encoding", "gzip")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-encoding").map(|v| v.as_bytes()),
            Some(&b"gzip"[..])
        );
    }

    #[tokio::test]
    async fn test_unknown_safra_is_404_with_bilingual_error() {
        let (status, body) = get_json(app(), "/api/v1/safras/safra9/results").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["error"]["message_pt"].is_string());
    }

    #[tokio::test]
    async fn test_results_overview_order() {
        let (status, body) = get_json(app(), "/api/v1/results").await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|o| o["safra_id"].as_str())
            .collect();
        assert_eq!(ids, vec!["safra2", "safra1", "safra3"]);
    }

    #[tokio::test]
    async fn test_variable_costs_need_safra_id() {
        let (status, _) = get_json(app(), "/api/v1/costs?kind=variable").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get_json(app(), "/api/v1/costs?kind=variable&safra_id=safra1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(2));

        let (_, body) = get_json(app(), "/api/v1/costs?kind=fixed").await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_create_safra_returns_created() {
        let (status, body) = post_json(
            app(),
            "/api/v1/safras",
            json!({
                "farm_id": "farm1",
                "name": "Milho 24/25",
                "culture": "Milho",
                "variety": "AG-7098",
                "area": "40",
                "start_date": "2024-10-01"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let safra: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(safra["is_active"], true);
    }

    #[tokio::test]
    async fn test_create_safra_with_zero_area_is_rejected() {
        let (status, body) = post_json(
            app(),
            "/api/v1/safras",
            json!({
                "farm_id": "farm1",
                "name": "Milho 24/25",
                "culture": "Milho",
                "variety": "AG-7098",
                "area": 0,
                "start_date": "2024-10-01"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["error"]["field"], "area");
    }

    #[tokio::test]
    async fn test_report_csv_export() {
        let (status, body) = post_json(
            app(),
            "/api/v1/reports?format=csv",
            json!({ "safra_ids": ["safra1"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let csv = String::from_utf8(body).unwrap();
        assert!(csv.starts_with("safra,farm,"));
        assert_eq!(csv.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_report_json_sections() {
        let (status, body) = post_json(
            app(),
            "/api/v1/reports",
            json!({ "safra_ids": ["safra2", "safra1"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let report: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(report["sections"][0]["safra"]["id"], "safra1");
        assert_eq!(report["sections"][1]["safra"]["id"], "safra2");
    }

    #[tokio::test]
    async fn test_oversized_harvest_keeps_results_available() {
        let state = AppState {
            store: Arc::new(Store::from_fixtures(Fixtures::demo())),
            config: Arc::new(Config::default()),
        };
        let (status, _) = post_json(
            create_app(state.clone()),
            "/api/v1/harvests",
            json!({
                "safra_id": "safra1",
                "date": "2024-03-20",
                "quantity": "100000000000000000000",
                "unit": "saca",
                "unit_price": "10000000000"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = get_json(create_app(state.clone()), "/api/v1/safras/safra1/results").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["total_revenue"]), Some(Decimal::from(247_500)));

        let (status, _) = get_json(create_app(state.clone()), "/api/v1/results").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post_json(
            create_app(state),
            "/api/v1/reports",
            json!({ "safra_ids": ["safra1"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_fixtures_disabled_gives_empty_store() {
        let config = crate::config::StoreConfig {
            seed_fixtures: false,
            fixtures_path: None,
        };
        let fixtures = load_fixtures(&config).unwrap();
        assert!(fixtures.safras.is_empty());
    }
}
