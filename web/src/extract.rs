//! Parameter extraction for action services.
//!
//! [`ActionParams`] merges the three request-side parameter sources into a
//! single [`Params`] map, in order (later sources win):
//!
//! 1. JSON object body — ignored when absent, malformed, or not an object
//! 2. Query-string pairs — merged as JSON strings
//! 3. Route parameters — merged as JSON strings
//!
//! Extraction never fails; a request with none of the sources yields an
//! empty map.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    Json,
};
use entity_controller_core::Params;
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;

/// Merged request parameters for one action invocation.
///
/// # Examples
///
/// ```ignore
/// async fn handler(ActionParams(params): ActionParams) -> Json<Value> {
///     Json(json!({ "id": params.get_str("id") }))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ActionParams(pub Params);

#[async_trait]
impl<S> FromRequest<S> for ActionParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // Route and query parameters live in the request head. Either may
        // be absent; outside a router the Path extraction always fails.
        let route = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .ok();
        let query = Query::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .ok();

        let req = Request::from_parts(parts, body);
        let body = match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Some(value),
            Err(_) => None,
        };

        let mut params = Params::new();

        if let Some(Value::Object(map)) = body {
            params.merge(Params::from(map));
        }

        if let Some(Query(pairs)) = query {
            for (key, value) in pairs {
                params.insert(key, Value::String(value));
            }
        }

        if let Some(Path(pairs)) = route {
            for (key, value) in pairs {
                params.insert(key, Value::String(value));
            }
        }

        Ok(Self(params))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde_json::json;
    use tower::ServiceExt;

    async fn echo(ActionParams(params): ActionParams) -> Json<Value> {
        Json(Value::from(params))
    }

    async fn merged(app: Router, request: Request<Body>) -> Value {
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_route_and_query_merge_as_strings() {
        let app = Router::new().route("/things/:id", get(echo));
        let request = Request::builder()
            .uri("/things/42?limit=10")
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            merged(app, request).await,
            json!({"id": "42", "limit": "10"})
        );
    }

    #[tokio::test]
    async fn test_body_merges_and_later_sources_win() {
        let app = Router::new().route("/things/:id", post(echo));
        let request = Request::builder()
            .method("POST")
            .uri("/things/42?limit=10")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({"name": "widget", "limit": 5, "id": "body"})).unwrap(),
            ))
            .unwrap();

        // Query overrides body, route parameters override both.
        assert_eq!(
            merged(app, request).await,
            json!({"name": "widget", "limit": "10", "id": "42"})
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_ignored() {
        let app = Router::new().route("/things", post(echo));
        let request = Request::builder()
            .method("POST")
            .uri("/things")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        assert_eq!(merged(app, request).await, json!({}));
    }

    #[tokio::test]
    async fn test_non_object_body_is_ignored() {
        let app = Router::new().route("/things", post(echo));
        let request = Request::builder()
            .method("POST")
            .uri("/things")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("[1, 2, 3]"))
            .unwrap();

        assert_eq!(merged(app, request).await, json!({}));
    }

    #[tokio::test]
    async fn test_extraction_outside_a_router() {
        let request = Request::builder()
            .uri("/anything?k=v")
            .body(Body::empty())
            .unwrap();

        let ActionParams(params) = ActionParams::from_request(request, &())
            .await
            .unwrap();

        assert_eq!(params.get_str("k"), Some("v"));
    }
}
