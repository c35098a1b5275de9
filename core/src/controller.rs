//! Controller composition.
//!
//! A [`Controller`] is a named map of [`Action`]s sharing one lifecycle
//! contract. Dispatching by name keeps the web adapter a thin lookup.

use crate::action::Action;
use crate::error::{ActionError, Result};
use crate::hooks::Hooks;
use crate::params::Params;
use serde_json::Value;
use std::collections::HashMap;

/// A named collection of actions.
///
/// # Examples
///
/// ```
/// use entity_controller_core::{Controller, HookSet, Params};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let controller = Controller::builder()
///     .action(
///         "create",
///         HookSet::new().query(|_params: Params| async move { Ok(json!({"id": 1})) }),
///     )
///     .build();
///
/// let result = controller.perform("create", Params::new()).await.unwrap();
/// assert_eq!(result, json!({"id": 1}));
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct Controller {
    actions: HashMap<String, Action>,
}

impl Controller {
    /// Start building a controller.
    #[must_use]
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::default()
    }

    /// Look up an action by name.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Whether an action with the given name is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Names of all defined actions, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Perform the named action with the given parameters.
    ///
    /// # Errors
    ///
    /// [`ActionError::UnknownAction`] when no action with that name is
    /// defined; otherwise whatever the action's pipeline returns.
    pub async fn perform(&self, name: &str, params: Params) -> Result<Value> {
        match self.actions.get(name) {
            Some(action) => action.perform(params).await,
            None => Err(ActionError::UnknownAction(name.to_string())),
        }
    }
}

/// Builder assembling a [`Controller`] from named hook sets.
#[derive(Debug, Clone, Default)]
pub struct ControllerBuilder {
    actions: HashMap<String, Action>,
}

impl ControllerBuilder {
    /// Register an action under the given name, replacing any previous
    /// registration for that name.
    #[must_use]
    pub fn action<H: Hooks + 'static>(mut self, name: impl Into<String>, hooks: H) -> Self {
        self.actions.insert(name.into(), Action::new(hooks));
        self
    }

    /// Finish building the controller.
    #[must_use]
    pub fn build(self) -> Controller {
        Controller {
            actions: self.actions,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::hooks::HookSet;
    use serde_json::json;

    fn sample_controller() -> Controller {
        Controller::builder()
            .action(
                "create",
                HookSet::new().query(|_params: Params| async move { Ok(json!({"id": 1})) }),
            )
            .action("list", HookSet::new())
            .build()
    }

    #[tokio::test]
    async fn test_perform_dispatches_by_name() {
        let controller = sample_controller();
        let result = controller.perform("create", Params::new()).await.unwrap();
        assert_eq!(result, json!({"id": 1}));
    }

    #[tokio::test]
    async fn test_unknown_action_is_an_error() {
        let controller = sample_controller();
        let err = controller.perform("destroy", Params::new()).await.unwrap_err();
        assert!(matches!(err, ActionError::UnknownAction(name) if name == "destroy"));
    }

    #[test]
    fn test_lookup_and_names() {
        let controller = sample_controller();
        assert!(controller.contains("create"));
        assert!(controller.action("list").is_some());
        assert!(!controller.contains("destroy"));

        let mut names: Vec<&str> = controller.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["create", "list"]);
    }

    #[test]
    fn test_later_registration_wins() {
        let controller = Controller::builder()
            .action("create", HookSet::new())
            .action(
                "create",
                HookSet::new().query(|_params: Params| async move { Ok(json!({"v": 2})) }),
            )
            .build();

        let result = tokio_test::block_on(controller.perform("create", Params::new())).unwrap();
        assert_eq!(result, json!({"v": 2}));
    }
}
