use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - liveness plus a storage round trip
pub async fn health_check(State(app): State<AppState>) -> Response {
    let database = match sqlx::query("SELECT 1").execute(&app.pool).await {
        Ok(_) => "operational",
        Err(e) => {
            log::error!("Health check database query failed: {e}");
            "unavailable"
        }
    };

    let (status, label) = if database == "operational" {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let health = json!({
        "status": label,
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": database,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status, Json(health)).into_response()
}
