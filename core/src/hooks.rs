//! Lifecycle hooks for actions.
//!
//! An action's behavior is described by the [`Hooks`] trait: seven optional
//! callbacks invoked at fixed points around one required asynchronous
//! operation (`on_query`). Every method has a pass-through default, so an
//! implementation only overrides the points it cares about.
//!
//! For ad-hoc actions, [`HookSet`] implements [`Hooks`] from plain async
//! closures:
//!
//! ```
//! use entity_controller_core::{ActionError, HookSet, Params};
//! use serde_json::json;
//!
//! let hooks = HookSet::new()
//!     .validate(|params: Params| async move {
//!         if params.contains("name") {
//!             Ok(())
//!         } else {
//!             Err(ActionError::validation("name is required"))
//!         }
//!     })
//!     .query(|params: Params| async move {
//!         Ok(json!({ "created": params.get_str("name") }))
//!     });
//! ```

use crate::error::{ActionError, Result};
use crate::params::Params;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// The seven lifecycle hooks of an action.
///
/// Invocation order is fixed: `on_pre_validate`, `on_validate`,
/// `on_post_validate`, `on_pre_query`, `on_query`, `on_post_query`.
/// A failing `on_validate` is passed through `on_err` and short-circuits
/// the pipeline; failures from any other hook propagate directly.
///
/// Parameter-rewriting hooks take ownership of the [`Params`] and return
/// the (possibly modified) map; read-only hooks borrow it.
#[async_trait]
pub trait Hooks: Send + Sync {
    /// Runs before validation; may rewrite the parameters.
    ///
    /// # Errors
    ///
    /// Propagates directly to the caller, without `on_err`.
    async fn on_pre_validate(&self, params: Params) -> Result<Params> {
        Ok(params)
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// A returned error is passed through [`Hooks::on_err`] and then
    /// surfaced to the caller; no later hook runs.
    async fn on_validate(&self, _params: &Params) -> Result<()> {
        Ok(())
    }

    /// Decorates a validation error before it is surfaced.
    ///
    /// Only invoked for `on_validate` failures.
    async fn on_err(&self, err: ActionError) -> ActionError {
        err
    }

    /// Runs after validation succeeds; may rewrite the parameters.
    ///
    /// # Errors
    ///
    /// Propagates directly to the caller, without `on_err`.
    async fn on_post_validate(&self, params: Params) -> Result<Params> {
        Ok(params)
    }

    /// Runs immediately before the query; may rewrite the parameters.
    ///
    /// # Errors
    ///
    /// Propagates directly to the caller, without `on_err`.
    async fn on_pre_query(&self, params: Params) -> Result<Params> {
        Ok(params)
    }

    /// The wrapped asynchronous operation.
    ///
    /// Defaults to returning an empty JSON object.
    ///
    /// # Errors
    ///
    /// Propagates directly to the caller, without `on_err`.
    async fn on_query(&self, _params: &Params) -> Result<Value> {
        Ok(Value::Object(Map::new()))
    }

    /// Transforms the query result; the return value replaces it.
    ///
    /// # Errors
    ///
    /// Propagates directly to the caller, without `on_err`.
    async fn on_post_query(&self, _params: &Params, result: Value) -> Result<Value> {
        Ok(result)
    }
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

type ParamHook = Box<dyn Fn(Params) -> BoxFuture<Result<Params>> + Send + Sync>;
type ValidateHook = Box<dyn Fn(Params) -> BoxFuture<Result<()>> + Send + Sync>;
type ErrHook = Box<dyn Fn(ActionError) -> BoxFuture<ActionError> + Send + Sync>;
type QueryHook = Box<dyn Fn(Params) -> BoxFuture<Result<Value>> + Send + Sync>;
type PostQueryHook = Box<dyn Fn(Params, Value) -> BoxFuture<Result<Value>> + Send + Sync>;

/// Closure-based [`Hooks`] implementation.
///
/// Each setter installs one hook; unset hooks keep the trait defaults.
/// Read-only hooks (`validate`, `query`, `post_query`) receive an owned
/// snapshot of the parameters, so closures can freely move them into the
/// returned future.
#[derive(Default)]
pub struct HookSet {
    pre_validate: Option<ParamHook>,
    validate: Option<ValidateHook>,
    err: Option<ErrHook>,
    post_validate: Option<ParamHook>,
    pre_query: Option<ParamHook>,
    query: Option<QueryHook>,
    post_query: Option<PostQueryHook>,
}

impl HookSet {
    /// Create a hook set with every hook unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the pre-validate hook.
    #[must_use]
    pub fn pre_validate<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Params>> + Send + 'static,
    {
        self.pre_validate = Some(Box::new(move |params| Box::pin(hook(params))));
        self
    }

    /// Install the validation hook.
    #[must_use]
    pub fn validate<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.validate = Some(Box::new(move |params| Box::pin(hook(params))));
        self
    }

    /// Install the validation-error decorator.
    #[must_use]
    pub fn err<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(ActionError) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionError> + Send + 'static,
    {
        self.err = Some(Box::new(move |err| Box::pin(hook(err))));
        self
    }

    /// Install the post-validate hook.
    #[must_use]
    pub fn post_validate<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Params>> + Send + 'static,
    {
        self.post_validate = Some(Box::new(move |params| Box::pin(hook(params))));
        self
    }

    /// Install the pre-query hook.
    #[must_use]
    pub fn pre_query<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Params>> + Send + 'static,
    {
        self.pre_query = Some(Box::new(move |params| Box::pin(hook(params))));
        self
    }

    /// Install the query operation.
    #[must_use]
    pub fn query<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.query = Some(Box::new(move |params| Box::pin(hook(params))));
        self
    }

    /// Install the post-query result transform.
    #[must_use]
    pub fn post_query<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Params, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.post_query = Some(Box::new(move |params, result| Box::pin(hook(params, result))));
        self
    }
}

#[async_trait]
impl Hooks for HookSet {
    async fn on_pre_validate(&self, params: Params) -> Result<Params> {
        match &self.pre_validate {
            Some(hook) => hook(params).await,
            None => Ok(params),
        }
    }

    async fn on_validate(&self, params: &Params) -> Result<()> {
        match &self.validate {
            Some(hook) => hook(params.clone()).await,
            None => Ok(()),
        }
    }

    async fn on_err(&self, err: ActionError) -> ActionError {
        match &self.err {
            Some(hook) => hook(err).await,
            None => err,
        }
    }

    async fn on_post_validate(&self, params: Params) -> Result<Params> {
        match &self.post_validate {
            Some(hook) => hook(params).await,
            None => Ok(params),
        }
    }

    async fn on_pre_query(&self, params: Params) -> Result<Params> {
        match &self.pre_query {
            Some(hook) => hook(params).await,
            None => Ok(params),
        }
    }

    async fn on_query(&self, params: &Params) -> Result<Value> {
        match &self.query {
            Some(hook) => hook(params.clone()).await,
            None => Ok(Value::Object(Map::new())),
        }
    }

    async fn on_post_query(&self, params: &Params, result: Value) -> Result<Value> {
        match &self.post_query {
            Some(hook) => hook(params.clone(), result).await,
            None => Ok(result),
        }
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSet")
            .field("pre_validate", &self.pre_validate.is_some())
            .field("validate", &self.validate.is_some())
            .field("err", &self.err.is_some())
            .field("post_validate", &self.post_validate.is_some())
            .field("pre_query", &self.pre_query.is_some())
            .field("query", &self.query.is_some())
            .field("post_query", &self.post_query.is_some())
            .finish()
    }
}
