use std::net::SocketAddr;

use axum::{
    Json,
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    LatencyUnit,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{
    core::{Precision, ProductionPlan},
    payload::ProductionPlanRequest,
    planner::{PlanError, plan},
    prelude::*,
};

pub fn router(precision: Precision) -> Router {
    Router::new()
        .route("/productionplan", post(production_plan))
        .route("/productionplan/", post(production_plan))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new().level(Level::INFO).latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(precision)
}

#[instrument(skip_all)]
pub async fn serve(address: SocketAddr, precision: Precision) -> Result {
    let listener =
        TcpListener::bind(address).await.with_context(|| format!("failed to bind to {address}"))?;
    info!(%address, "listening…");
    axum::serve(listener, router(precision))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down…");
        })
        .await
        .context("the server has failed")
}

async fn production_plan(
    State(precision): State<Precision>,
    Json(request): Json<ProductionPlanRequest>,
) -> Result<Json<ProductionPlan>, PlanError> {
    Ok(Json(plan(&request, precision)?))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

impl IntoResponse for PlanError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Infeasible(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Fuels(_) | Self::Load(_) | Self::PowerPlant(_) => StatusCode::BAD_REQUEST,
        };
        warn!(%status, error = %self, "rejected");
        (status, Json(json!({"error": self.kind(), "message": self.to_string()}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{Method, Request, header::CONTENT_TYPE};
    use tower::ServiceExt;

    use super::*;

    async fn send(method: Method, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router(Precision::default()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn test_production_plan() {
        let (status, body) =
            send(Method::POST, "/productionplan", include_str!("../payloads/payload1.json")).await;
        assert_eq!(status, StatusCode::OK);
        let plan = body.as_array().unwrap();
        assert_eq!(plan.len(), 6);
        assert!(plan.contains(&json!({"name": "windpark2", "p": 21.6})));
        assert!(plan.contains(&json!({"name": "gasfiredbig1", "p": 368.4})));
        assert!(plan.contains(&json!({"name": "tj1", "p": 0.0})));
    }

    #[tokio::test]
    async fn test_empty_fleet() {
        let payload = r#"{
            "load": 0,
            "fuels": {"gas(euro/MWh)": 13.4, "kerosine(euro/MWh)": 50.8, "co2(euro/ton)": 20, "wind(%)": 60},
            "powerplants": []
        }"#;
        let (status, body) = send(Method::POST, "/productionplan/", payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_infeasible() {
        let payload = r#"{
            "load": 60,
            "fuels": {"gas(euro/MWh)": 13.4, "kerosine(euro/MWh)": 50.8, "co2(euro/ton)": 20, "wind(%)": 60},
            "powerplants": [{"name": "g", "type": "gasfired", "efficiency": 0.5, "pmin": 80, "pmax": 100}]
        }"#;
        let (status, body) = send(Method::POST, "/productionplan", payload).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "infeasible_dispatch");
    }

    #[tokio::test]
    async fn test_off_grid_load() {
        let payload = r#"{
            "load": 60.05,
            "fuels": {"gas(euro/MWh)": 13.4, "kerosine(euro/MWh)": 50.8, "co2(euro/ton)": 20, "wind(%)": 60},
            "powerplants": []
        }"#;
        let (status, body) = send(Method::POST, "/productionplan", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_load");
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let (status, _) = send(Method::POST, "/productionplan", r#"{"load": 480,"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_field() {
        let (status, _) = send(Method::POST, "/productionplan", r#"{"load": 480}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        for method in [Method::PUT, Method::DELETE, Method::PATCH] {
            let (status, _) = send(method, "/productionplan/", "").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Method::GET, "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }
}
