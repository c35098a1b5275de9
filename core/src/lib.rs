//! # Entity Controller Core
//!
//! Wraps arbitrary asynchronous business logic ("actions") into a uniform
//! lifecycle: validate, query, post-process. Each action runs up to seven
//! optional hooks in fixed order around one required asynchronous operation,
//! short-circuiting when validation fails.
//!
//! ## Core Concepts
//!
//! - **Params**: transient string-keyed JSON map built per invocation
//! - **Hooks**: the seven lifecycle callbacks (`async` trait with defaults)
//! - **`HookSet`**: closure-based hook configuration
//! - **Action**: one wrapped operation, runnable via [`Action::perform`]
//! - **Controller**: a named collection of actions
//!
//! ## Lifecycle
//!
//! ```text
//! on_pre_validate → on_validate ──err──> on_err ──> rejected
//!        │ ok
//! on_post_validate → on_pre_query → on_query → on_post_query → result
//! ```
//!
//! Invocations are fully independent: no shared mutable state, no ordering
//! guarantees between concurrent calls, nothing persisted across calls.
//!
//! ## Example
//!
//! ```
//! use entity_controller_core::{ActionError, Controller, HookSet, Params};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let controller = Controller::builder()
//!     .action(
//!         "create",
//!         HookSet::new()
//!             .validate(|params: Params| async move {
//!                 if params.contains("name") {
//!                     Ok(())
//!                 } else {
//!                     Err(ActionError::validation("name is required"))
//!                 }
//!             })
//!             .query(|params: Params| async move {
//!                 Ok(json!({ "name": params.get_str("name") }))
//!             }),
//!     )
//!     .build();
//!
//! let mut params = Params::new();
//! params.insert("name", "widget");
//! let result = controller.perform("create", params).await.unwrap();
//! assert_eq!(result, json!({"name": "widget"}));
//! # });
//! ```

pub mod action;
pub mod controller;
pub mod error;
pub mod hooks;
pub mod params;

pub use action::Action;
pub use controller::{Controller, ControllerBuilder};
pub use error::{ActionError, Result};
pub use hooks::{HookSet, Hooks};
pub use params::Params;
