use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the auxiliary HTTP router: `/status` and `/version`, duplicated
/// under `/api/v1/...`. `silent` suppresses the access-log layer without
/// touching the rest of the process's logging setup.
pub fn build_app(build_version: impl Into<String>, silent: bool) -> Router {
    let state = AppState {
        build_version: build_version.into().into(),
    };

    let routes = Router::new()
        .route("/status", get(handlers::status))
        .route("/version", get(handlers::version));

    let mut app = Router::new()
        .merge(routes.clone())
        .nest("/api/v1", routes)
        .with_state(state);

    if !silent {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn status_returns_ok() {
        let app = build_app("test-build", false);
        let resp = app
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn version_reports_the_configured_build_version() {
        let app = build_app("1.2.3", false);
        let resp = app
            .oneshot(Request::builder().uri("/version").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({ "version": "1.2.3" }));
    }

    #[tokio::test]
    async fn both_routes_are_reachable_under_api_v1() {
        let app = build_app("1.2.3", false);
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
