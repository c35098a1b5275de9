//! Per-action request services.
//!
//! An [`ActionService`] binds one named action of a shared [`Controller`]
//! to a route. Each request is translated into [`Params`] by
//! [`ActionParams`](crate::extract::ActionParams), dispatched through the
//! controller, and the outcome rendered as JSON — a successful result as a
//! 200 response, a rejection as a 400 body with message and optional code.
//!
//! # Example
//!
//! ```ignore
//! use axum::{routing::post_service, Router};
//! use entity_controller_web::ActionService;
//!
//! let create = ActionService::new(Arc::clone(&controller), "create")?;
//! let app = Router::new().route("/notes", post_service(create));
//! ```
//!
//! Rendering is customizable through the response hooks on
//! [`ActionServiceBuilder`]: `on_result` replaces the JSON rendering,
//! `on_post_result` runs after it (cleanup only), and `on_err` replaces the
//! error rendering.

use crate::error::ActionRejection;
use crate::extract::ActionParams;
use axum::{
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use entity_controller_core::{ActionError, Controller};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;
use tracing::Instrument;

type ResultRenderer = Box<dyn Fn(&Value) -> Response + Send + Sync>;
type PostResultHook = Box<dyn Fn(&Value) + Send + Sync>;
type ErrRenderer = Box<dyn Fn(ActionError) -> Response + Send + Sync>;

struct ServiceInner {
    controller: Arc<Controller>,
    action: String,
    on_result: Option<ResultRenderer>,
    on_post_result: Option<PostResultHook>,
    on_err: Option<ErrRenderer>,
}

/// Request-handling service for one named action.
///
/// Cheap to clone; mountable with `axum::routing::post_service` and
/// friends. Construction fails when the controller does not define the
/// action, so routing mistakes surface at startup rather than per request.
#[derive(Clone)]
pub struct ActionService {
    inner: Arc<ServiceInner>,
}

impl ActionService {
    /// Bind the named action with default rendering.
    ///
    /// # Errors
    ///
    /// [`ActionError::UnknownAction`] when the controller does not define
    /// the action.
    pub fn new(
        controller: Arc<Controller>,
        action: impl Into<String>,
    ) -> Result<Self, ActionError> {
        Self::builder(controller, action).build()
    }

    /// Start building a service with custom response hooks.
    #[must_use]
    pub fn builder(controller: Arc<Controller>, action: impl Into<String>) -> ActionServiceBuilder {
        ActionServiceBuilder {
            controller,
            action: action.into(),
            on_result: None,
            on_post_result: None,
            on_err: None,
        }
    }

    /// Name of the bound action.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.inner.action
    }
}

impl Service<Request> for ActionService {
    type Response = Response;
    type Error = std::convert::Infallible;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let inner = Arc::clone(&self.inner);

        let span = tracing::info_span!(
            "action_request",
            action = %inner.action,
            method = %req.method(),
            uri = %req.uri(),
        );

        Box::pin(
            async move {
                // Extraction is infallible.
                let ActionParams(params) = match ActionParams::from_request(req, &()).await {
                    Ok(params) => params,
                    Err(never) => match never {},
                };

                let response = match inner.controller.perform(&inner.action, params).await {
                    Ok(result) => {
                        let response = inner
                            .on_result
                            .as_ref()
                            .map_or_else(|| Json(&result).into_response(), |render| render(&result));

                        // Cleanup hook; the response is already rendered.
                        if let Some(after) = &inner.on_post_result {
                            after(&result);
                        }

                        response
                    },
                    Err(err) => {
                        tracing::debug!(error = %err, "action rejected");
                        match &inner.on_err {
                            Some(render) => render(err),
                            None => ActionRejection(err).into_response(),
                        }
                    },
                };

                Ok(response)
            }
            .instrument(span),
        )
    }
}

impl fmt::Debug for ActionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionService")
            .field("action", &self.inner.action)
            .finish_non_exhaustive()
    }
}

/// Builder configuring the response hooks of an [`ActionService`].
pub struct ActionServiceBuilder {
    controller: Arc<Controller>,
    action: String,
    on_result: Option<ResultRenderer>,
    on_post_result: Option<PostResultHook>,
    on_err: Option<ErrRenderer>,
}

impl ActionServiceBuilder {
    /// Replace the default JSON rendering of successful results.
    #[must_use]
    pub fn on_result<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value) -> Response + Send + Sync + 'static,
    {
        self.on_result = Some(Box::new(render));
        self
    }

    /// Run after the response is rendered. Cleanup only — the hook cannot
    /// touch the response.
    #[must_use]
    pub fn on_post_result<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.on_post_result = Some(Box::new(hook));
        self
    }

    /// Replace the default 400 JSON rendering of rejections.
    #[must_use]
    pub fn on_err<F>(mut self, render: F) -> Self
    where
        F: Fn(ActionError) -> Response + Send + Sync + 'static,
    {
        self.on_err = Some(Box::new(render));
        self
    }

    /// Finish building the service.
    ///
    /// # Errors
    ///
    /// [`ActionError::UnknownAction`] when the controller does not define
    /// the action.
    pub fn build(self) -> Result<ActionService, ActionError> {
        if !self.controller.contains(&self.action) {
            return Err(ActionError::UnknownAction(self.action));
        }

        Ok(ActionService {
            inner: Arc::new(ServiceInner {
                controller: self.controller,
                action: self.action,
                on_result: self.on_result,
                on_post_result: self.on_post_result,
                on_err: self.on_err,
            }),
        })
    }
}

impl fmt::Debug for ActionServiceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionServiceBuilder")
            .field("action", &self.action)
            .field("on_result", &self.on_result.is_some())
            .field("on_post_result", &self.on_post_result.is_some())
            .field("on_err", &self.on_err.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use entity_controller_core::{HookSet, Params};
    use serde_json::json;

    fn controller() -> Arc<Controller> {
        Arc::new(
            Controller::builder()
                .action(
                    "create",
                    HookSet::new()
                        .query(|_params: Params| async move { Ok(json!({"id": 1})) }),
                )
                .build(),
        )
    }

    #[test]
    fn test_unknown_action_fails_at_build() {
        let err = ActionService::new(controller(), "destroy").unwrap_err();
        assert!(matches!(err, ActionError::UnknownAction(name) if name == "destroy"));
    }

    #[test]
    fn test_known_action_builds() {
        let service = ActionService::new(controller(), "create").unwrap();
        assert_eq!(service.action(), "create");
    }

    #[test]
    fn test_builder_with_hooks_still_checks_the_name() {
        let err = ActionService::builder(controller(), "destroy")
            .on_result(|_result| StatusCode::CREATED.into_response())
            .build()
            .unwrap_err();
        assert!(matches!(err, ActionError::UnknownAction(_)));
    }
}
