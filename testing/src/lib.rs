//! # Entity Controller Testing
//!
//! Testing utilities for the action lifecycle:
//!
//! - [`RecordingHooks`]: a [`Hooks`] implementation that records the order
//!   in which hooks fire, with switchable validation/query failures
//! - [`params_from`]: build [`Params`] from a `serde_json::json!` literal
//! - [`init_tracing`]: install a compact tracing subscriber for tests
//!
//! ## Example
//!
//! ```
//! use entity_controller_core::Action;
//! use entity_controller_testing::{params_from, RecordingHooks};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let hooks = RecordingHooks::new();
//! let action = Action::new(hooks.clone());
//!
//! action.perform(params_from(json!({"name": "widget"}))).await.unwrap();
//!
//! assert_eq!(hooks.calls().first(), Some(&"pre_validate"));
//! # });
//! ```

use async_trait::async_trait;
use entity_controller_core::{ActionError, Hooks, Params};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, PoisonError};

/// Build [`Params`] from a JSON value.
///
/// Non-object values yield an empty map; use `json!({...})` literals.
#[must_use]
pub fn params_from(value: Value) -> Params {
    Params::from_value(value).unwrap_or_default()
}

/// Install a compact tracing subscriber for test debugging.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// [`Hooks`] implementation that records every hook invocation.
///
/// Clones share the same call log, so tests can keep a handle after moving
/// the hooks into an [`entity_controller_core::Action`].
#[derive(Clone, Debug, Default)]
pub struct RecordingHooks {
    calls: Arc<Mutex<Vec<&'static str>>>,
    fail_validate: bool,
    fail_query: bool,
    decorate_errors: bool,
}

impl RecordingHooks {
    /// Create hooks that succeed at every step.
    ///
    /// The default query returns `{"ok": true}` so result plumbing is
    /// observable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `on_validate` fail with a validation error.
    #[must_use]
    pub const fn failing_validation(mut self) -> Self {
        self.fail_validate = true;
        self
    }

    /// Make `on_query` fail with a query error.
    #[must_use]
    pub const fn failing_query(mut self) -> Self {
        self.fail_query = true;
        self
    }

    /// Make `on_err` attach the code `E_DECORATED` to errors it sees.
    #[must_use]
    pub const fn decorating_errors(mut self) -> Self {
        self.decorate_errors = true;
        self
    }

    /// Hook names recorded so far, in invocation order.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, name: &'static str) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name);
    }
}

#[async_trait]
impl Hooks for RecordingHooks {
    async fn on_pre_validate(&self, params: Params) -> entity_controller_core::Result<Params> {
        self.record("pre_validate");
        Ok(params)
    }

    async fn on_validate(&self, _params: &Params) -> entity_controller_core::Result<()> {
        self.record("validate");
        if self.fail_validate {
            Err(ActionError::validation("validation failed"))
        } else {
            Ok(())
        }
    }

    async fn on_err(&self, err: ActionError) -> ActionError {
        self.record("err");
        if self.decorate_errors {
            err.with_code("E_DECORATED")
        } else {
            err
        }
    }

    async fn on_post_validate(&self, params: Params) -> entity_controller_core::Result<Params> {
        self.record("post_validate");
        Ok(params)
    }

    async fn on_pre_query(&self, params: Params) -> entity_controller_core::Result<Params> {
        self.record("pre_query");
        Ok(params)
    }

    async fn on_query(&self, _params: &Params) -> entity_controller_core::Result<Value> {
        self.record("query");
        if self.fail_query {
            Err(ActionError::query("query failed"))
        } else {
            Ok(json!({"ok": true}))
        }
    }

    async fn on_post_query(
        &self,
        _params: &Params,
        result: Value,
    ) -> entity_controller_core::Result<Value> {
        self.record("post_query");
        Ok(result)
    }
}
