//! The action pipeline.
//!
//! An [`Action`] wraps a [`Hooks`] implementation and runs the lifecycle:
//!
//! ```text
//! on_pre_validate → on_validate → on_post_validate → on_pre_query
//!     → on_query → on_post_query
//! ```
//!
//! A failing `on_validate` is decorated by `on_err` and short-circuits the
//! pipeline; any other hook failure propagates directly.

use crate::error::Result;
use crate::hooks::Hooks;
use crate::params::Params;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A named asynchronous operation wrapped with lifecycle hooks.
///
/// Cheap to clone; the hooks are shared behind an [`Arc`]. Invocations are
/// fully independent — no state persists across calls.
///
/// # Examples
///
/// ```
/// use entity_controller_core::{Action, HookSet, Params};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let action = Action::new(
///     HookSet::new().query(|params: Params| async move {
///         Ok(json!({ "echo": params.get_str("name") }))
///     }),
/// );
///
/// let mut params = Params::new();
/// params.insert("name", "widget");
///
/// let result = action.perform(params).await.unwrap();
/// assert_eq!(result, json!({"echo": "widget"}));
/// # });
/// ```
#[derive(Clone)]
pub struct Action {
    hooks: Arc<dyn Hooks>,
}

impl Action {
    /// Wrap a [`Hooks`] implementation into an action.
    pub fn new<H: Hooks + 'static>(hooks: H) -> Self {
        Self {
            hooks: Arc::new(hooks),
        }
    }

    /// Wrap an already shared [`Hooks`] implementation.
    #[must_use]
    pub fn from_arc(hooks: Arc<dyn Hooks>) -> Self {
        Self { hooks }
    }

    /// Run the lifecycle pipeline with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure. Validation failures pass through
    /// `on_err` before being returned; every other failure propagates
    /// unchanged.
    pub async fn perform(&self, params: Params) -> Result<Value> {
        let params = self.hooks.on_pre_validate(params).await?;

        if let Err(err) = self.hooks.on_validate(&params).await {
            let err = self.hooks.on_err(err).await;
            tracing::debug!(error = %err, "action validation failed");
            return Err(err);
        }

        let params = self.hooks.on_post_validate(params).await?;
        let params = self.hooks.on_pre_query(params).await?;

        let result = self.hooks.on_query(&params).await?;
        self.hooks.on_post_query(&params, result).await
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}
