//! Top-level router: liveness probe, the `/api` tree and request tracing.

use axum::Json;
use axum::Router;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};

use crate::error::ErrorBody;
use crate::state::AppState;

/// Assemble the panel's HTTP surface around `state`.
///
/// Every request is traced through [`TraceLayer`]; unknown paths answer a
/// JSON `404`.
pub fn build<P, N, I>(state: AppState<P, N, I>) -> Router
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", crate::api::routes())
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn unknown_route(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: format!("no route for {}", uri.path()),
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::test_support::app;

    #[tokio::test]
    async fn should_answer_liveness_probe() {
        let (router, _) = app();

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn should_answer_json_not_found_for_unknown_path() {
        let (router, _) = app();

        let response = router
            .oneshot(Request::get("/api/garage-door").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "no route for /api/garage-door");
    }
}
