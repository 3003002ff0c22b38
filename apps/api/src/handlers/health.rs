use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tracing::error;

use crate::dto::HealthResponse;
use crate::state::AppState;

const POSTGRES_UNAVAILABLE: &str = "postgres is unavailable";

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let Some(pool) = state.postgres_pool else {
        return (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                postgres: "disabled",
                detail: None,
            }),
        );
    };

    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                postgres: "ok",
                detail: None,
            }),
        ),
        Err(error) => {
            error!(%error, "postgres health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    postgres: "error",
                    detail: Some(POSTGRES_UNAVAILABLE.to_owned()),
                }),
            )
        }
    }
}
