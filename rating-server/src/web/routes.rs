//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{error, info, warn};

use crate::rating::{RatingError, RatingProvider};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: RatingProvider + Send + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/rank", post(rank_addresses::<P>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Rate and rank candidate addresses.
async fn rank_addresses<P>(
    State(state): State<AppState<P>>,
    body: Bytes,
) -> Result<Json<RankResponse>, AppError>
where
    P: RatingProvider + Send + 'static,
{
    // Parse JSON manually so we can log the body on failure
    let req: RankRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid rank request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let request = req.into_rating_request();
    let report = state.engine.rate(&request).await?;

    info!(
        rated = report.ranked.len(),
        failed = report.failures.len(),
        "ranking complete"
    );

    Ok(Json(RankResponse::from_report(&request.addresses, report)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<RatingError> for AppError {
    fn from(e: RatingError) -> Self {
        match e {
            RatingError::Configuration(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LatLon, StopKind, TravelTimeEntry};
    use crate::maps::MockProvider;
    use crate::rating::{LookupError, RatingConfig, RatingEngine};

    fn state() -> AppState<MockProvider> {
        let a = LatLon::new(41.7943, -87.5907).unwrap();
        let b = LatLon::new(41.7886, -87.5987).unwrap();
        let provider = MockProvider::new()
            .with_address("a", a)
            .with_address("b", b)
            .with_nearby(StopKind::Cta, a, [TravelTimeEntry::new("47", 120.0)])
            .with_nearby(StopKind::Cta, b, [TravelTimeEntry::new("47", 600.0)]);
        AppState::new(RatingEngine::new(provider, RatingConfig::default()))
    }

    #[tokio::test]
    async fn rank_returns_ordered_results() {
        let body = Bytes::from(
            r#"{"addresses": ["b", "a", "c"], "transit_prefs": {"cta": "high"}}"#,
        );

        let Json(response) = rank_addresses(State(state()), body).await.unwrap();

        assert_eq!(response.ranked[0].address, "a");
        assert_eq!(response.ranked[1].address, "b");
        assert_eq!(response.results[0].rank, Some(2));
        assert!(response.results[2].error.is_some());
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let result = rank_addresses(State(state()), Bytes::from("{not json")).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn configuration_error_is_bad_request() {
        let body = Bytes::from(r#"{"addresses": ["a"], "transit_prefs": {"cta": "high"}}"#);
        let err = rank_addresses(State(state()), body).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest { .. }));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lookup_error_is_internal() {
        let err = AppError::from(RatingError::Lookup(LookupError::UnknownRoute(999)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_check() {
        assert_eq!(health().await, "ok");
    }

    #[test]
    fn router_builds() {
        let _router = create_router(state());
    }
}
