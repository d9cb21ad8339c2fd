use axum::{
    extract::{Request, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tower::ServiceExt;
use crate::agent::routes::ErrorResponse;
use crate::server::{AppState, API_PREFIX, REVIEWER_NAME};

/// UI document served for every non-API path
pub const UI_DOCUMENT: &str = include_str!("../../ui/index.html");

pub async fn ui_document() -> Html<&'static str> {
    Html(UI_DOCUMENT)
}

/// Forward `/api/<op>` to the reviewer agent as `/<op>`.
///
/// Method, headers and body pass through untouched and the agent's
/// response is returned as-is.
pub async fn forward_to_agent(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let handle = match state.agents.get(REVIEWER_NAME).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("Agent '{}' unavailable: {}", REVIEWER_NAME, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: format!("agent unavailable: {}", e) }),
            )
                .into_response();
        }
    };

    let (mut parts, body) = request.into_parts();
    let path = parts.uri.path().strip_prefix(API_PREFIX).unwrap_or("/");
    let path_and_query = match parts.uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    parts.uri = match Uri::builder().path_and_query(path_and_query).build() {
        Ok(uri) => uri,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })).into_response();
        }
    };

    tracing::debug!("Forwarding {} {} to agent '{}'", parts.method, parts.uri, REVIEWER_NAME);
    let request = Request::from_parts(parts, body);
    match handle.service.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::{sqlite_agent, StubInference};
    use crate::agent::AgentDirectory;
    use crate::server::app;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use axum::Router;
    use serde_json::{json, Value};

    fn test_app(inference: Arc<StubInference>) -> Router {
        let agents = AgentDirectory::new(move |_| Ok(sqlite_agent(Arc::clone(&inference))));
        app(Arc::new(AppState { agents }))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_review_then_history_scenario() {
        let inference = StubInference::replying(json!({ "response": "Always returns True; likely a bug." }));
        let app = test_app(inference.clone());

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/review",
                json!({ "code": "def f(x): return x==x", "language": "Python" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "feedback": "Always returns True; likely a bug." })
        );

        let history = body_json(app.oneshot(get("/api/history")).await.unwrap()).await;
        let entries = history["history"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["language"], "Python");
        assert!(entries[0]["id"].is_i64());
        assert!(entries[0]["timestamp"].is_i64());
        assert!(entries[0].get("code").is_none());
        assert!(entries[0].get("feedback").is_none());
    }

    #[tokio::test]
    async fn test_suggestions_through_router() {
        let inference = StubInference::replying("Prefer ? over unwrap.");
        let app = test_app(inference.clone());

        let body = body_json(
            app.clone()
                .oneshot(post_json("/api/suggestions", json!({ "pattern": "unwrap" })))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body, json!({ "suggestions": null }));
        assert_eq!(inference.calls(), 0);

        app.clone()
            .oneshot(post_json("/api/review", json!({ "code": "x.unwrap()", "language": "Rust" })))
            .await
            .unwrap();

        let body = body_json(
            app.oneshot(post_json("/api/suggestions", json!({ "pattern": "unwrap" })))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body, json!({ "suggestions": "Prefer ? over unwrap." }));
        assert_eq!(inference.calls(), 2);
    }

    #[tokio::test]
    async fn test_large_review_passes_through() {
        let inference = StubInference::replying("Very long.");
        let app = test_app(inference.clone());

        let code = "x".repeat(3 * 1024 * 1024);
        let response = app
            .clone()
            .oneshot(post_json("/api/review", json!({ "code": code, "language": "Rust" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "feedback": "Very long." }));
        assert_eq!(inference.calls(), 1);
        assert!(inference.last_prompt().unwrap().contains(&code));
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_not_found() {
        let app = test_app(StubInference::replying("ok"));

        let response = app.clone().oneshot(get("/api/unknown")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Not found");

        let response = app.oneshot(get("/api/review")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_other_paths_serve_ui() {
        let app = test_app(StubInference::replying("ok"));

        for uri in ["/", "/index.html", "/some/deep/link"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
            assert!(content_type.starts_with("text/html"));
            assert_eq!(body_text(response).await, UI_DOCUMENT);
        }

        let response = app.oneshot(post_json("/submit", json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_agent_unavailable_is_server_error() {
        let agents = AgentDirectory::new(|_| Err(crate::Error::Config("no store".to_string())));
        let app = app(Arc::new(AppState { agents }));

        let response = app.oneshot(get("/api/history")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
