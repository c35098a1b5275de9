//! Axum web integration for Entity Controller.
//!
//! Adapts lifecycle-wrapped actions into request-handling services: each
//! request is translated into a plain parameter map, dispatched through a
//! [`Controller`](entity_controller_core::Controller), and the outcome
//! rendered as a JSON response.
//!
//! # Request Flow
//!
//! 1. **Request** arrives at a mounted [`ActionService`]
//! 2. **Extract** parameters — JSON body, query string, route parameters
//!    merged into one map (later sources win)
//! 3. **Perform** the bound action through the controller's lifecycle
//! 4. **Render** the result as JSON, or the rejection as a 400 body with
//!    message and optional code
//!
//! # Example
//!
//! ```ignore
//! use axum::{routing::post_service, Router};
//! use entity_controller_core::{Controller, HookSet};
//! use entity_controller_web::ActionService;
//! use std::sync::Arc;
//!
//! let controller = Arc::new(
//!     Controller::builder()
//!         .action("create", HookSet::new().query(|params| async move {
//!             Ok(json!({ "name": params.get_str("name") }))
//!         }))
//!         .build(),
//! );
//!
//! let app = Router::new().route(
//!     "/notes",
//!     post_service(ActionService::new(controller, "create")?),
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extract;
pub mod service;

// Re-export key types for convenience
pub use error::{ActionRejection, ErrorBody};
pub use extract::ActionParams;
pub use service::{ActionService, ActionServiceBuilder};
