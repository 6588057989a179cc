// ARR Estimator - Web Server
// Stateless JSON API over the estimation model

use arr_estimator::{
    logging, sensitivity_series, ComparisonStats, EstimateTable, EstimationConfig,
    EstimationError, KeyInsights, Report, ScenarioKind,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
struct AppState {
    config: Arc<EstimationConfig>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Response {
        (
            StatusCode::OK,
            Json(Self {
                success: true,
                data: Some(data),
                error: None,
            }),
        )
            .into_response()
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message),
        }),
    )
        .into_response()
}

fn model_error(err: EstimationError) -> Response {
    let status = match err {
        EstimationError::UnknownEntity { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    tracing::warn!(error = %err, "request rejected");
    error_response(status, err.to_string())
}

/// Estimates response
#[derive(Serialize)]
struct EstimatesResponse {
    config: EstimationConfig,
    estimates: EstimateTable,
    comparison: ComparisonStats,
    insights: KeyInsights,
}

#[derive(Serialize)]
struct SensitivityPoint {
    rate: f64,
    estimate: f64,
}

#[derive(Serialize)]
struct SensitivityResponse {
    entity: String,
    headcount: u32,
    points: Vec<SensitivityPoint>,
}

/// Apply `bear`, `base`, `bull` and `custom.<entity>` query overrides.
/// Values are clamped into the slider bounds, as the dashboard would.
fn apply_overrides(
    config: &EstimationConfig,
    params: &HashMap<String, String>,
) -> Result<EstimationConfig, EstimationError> {
    let mut next = config.clone();

    for (key, raw) in params {
        let rate: f64 = raw.parse().map_err(|_| EstimationError::Parse {
            reason: format!("{} is not a number: {}", key, raw),
        })?;

        if let Some(name) = key.strip_prefix("custom.") {
            let name = urlencoding::decode(name)
                .map(|n| n.into_owned())
                .unwrap_or_else(|_| name.to_string());
            next = next.with_override_rate(&name, rate)?;
        } else if let Some(kind) = ScenarioKind::from_name(key) {
            next = next.with_scenario_rate(kind, rate)?;
        } else {
            return Err(EstimationError::Parse {
                reason: format!("unknown parameter: {}", key),
            });
        }
    }

    Ok(next)
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    ApiResponse::ok("OK")
}

/// GET /api/config - Startup configuration
async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::ok(state.config.as_ref().clone())
}

/// GET /api/estimates - Estimate table, comparison stats and insights
async fn get_estimates(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let config = match apply_overrides(&state.config, &params) {
        Ok(config) => config,
        Err(err) => return model_error(err),
    };

    let result = config.estimates().and_then(|estimates| {
        let comparison = ComparisonStats::compute(&config.entities, &estimates)?;
        let insights = KeyInsights::build(&config, &estimates)?;
        Ok((estimates, comparison, insights))
    });

    match result {
        Ok((estimates, comparison, insights)) => ApiResponse::ok(EstimatesResponse {
            config,
            estimates,
            comparison,
            insights,
        }),
        Err(err) => model_error(err),
    }
}

/// GET /api/entities/:name/sensitivity - Sensitivity curve for one entity
async fn get_sensitivity(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let decoded = urlencoding::decode(&name)
        .unwrap_or_else(|_| name.clone().into())
        .into_owned();

    match state.config.entity(&decoded) {
        Ok(entity) => {
            let points = sensitivity_series(entity, state.config.sensitivity_range.rates())
                .map(|(rate, estimate)| SensitivityPoint { rate, estimate })
                .collect();
            ApiResponse::ok(SensitivityResponse {
                entity: entity.name.clone(),
                headcount: entity.headcount,
                points,
            })
        }
        Err(err) => model_error(err),
    }
}

/// GET /api/report - Full report snapshot
async fn get_report(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let config = match apply_overrides(&state.config, &params) {
        Ok(config) => config,
        Err(err) => return model_error(err),
    };

    match Report::build(&config) {
        Ok(report) => ApiResponse::ok(report),
        Err(err) => {
            tracing::error!(error = %err, "failed to build report");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/config", get(get_config))
        .route("/estimates", get(get_estimates))
        .route("/entities/:name/sensitivity", get(get_sensitivity))
        .route("/report", get(get_report))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_stderr("arr-server");

    let config = match std::env::var("ARR_CONFIG") {
        Ok(path) => EstimationConfig::from_file(path)?,
        Err(_) => EstimationConfig::default(),
    };

    let state = AppState {
        config: Arc::new(config),
    };

    let addr = std::env::var("ARR_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "server running");
    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/estimates?base=160000", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_apply_overrides() {
        let config = EstimationConfig::default();
        let next = apply_overrides(
            &config,
            &params(&[("base", "160000"), ("custom.Alation", "999999")]),
        )
        .unwrap();

        assert_eq!(next.rate(ScenarioKind::Base).unwrap(), 160_000.0);
        assert_eq!(next.custom_rate("Alation").unwrap(), 300_000.0);
    }

    #[test]
    fn test_apply_overrides_saturates_infinite_rates() {
        let config = EstimationConfig::default();
        let next = apply_overrides(&config, &params(&[("bull", "inf"), ("bear", "-inf")])).unwrap();
        assert_eq!(next.rate(ScenarioKind::Bull).unwrap(), 300_000.0);
        assert_eq!(next.rate(ScenarioKind::Bear).unwrap(), 50_000.0);
    }

    #[test]
    fn test_apply_overrides_rejects_bad_input() {
        let config = EstimationConfig::default();
        assert!(apply_overrides(&config, &params(&[("base", "lots")])).is_err());
        assert!(apply_overrides(&config, &params(&[("moon", "1")])).is_err());
        assert!(matches!(
            apply_overrides(&config, &params(&[("custom.Nobody", "100000")])),
            Err(EstimationError::UnknownEntity { .. })
        ));
    }

    fn state() -> AppState {
        AppState {
            config: Arc::new(EstimationConfig::default()),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_sensitivity_handler_returns_full_domain() {
        let response = get_sensitivity(State(state()), Path("Collibra".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let points = body["data"]["points"].as_array().unwrap();
        assert_eq!(points.len(), 25);
        assert_eq!(points[0]["rate"], 50_000.0);
        assert_eq!(points[0]["estimate"], 48_700_000.0);
        assert_eq!(body["data"]["headcount"], 974);
    }

    #[tokio::test]
    async fn test_sensitivity_handler_unknown_entity_is_not_found() {
        let response = get_sensitivity(State(state()), Path("Nobody".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_estimates_handler_status_codes() {
        let ok = get_estimates(State(state()), Query(params(&[("base", "160000")])))
            .await
            .into_response();
        assert_eq!(ok.status(), StatusCode::OK);
        let body = body_json(ok).await;
        assert_eq!(body["data"]["comparison"]["pair"]["larger"], "Collibra");

        let missing = get_estimates(State(state()), Query(params(&[("custom.Nobody", "1")])))
            .await
            .into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let bad = get_estimates(State(state()), Query(params(&[("base", "lots")])))
            .await
            .into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }
}
