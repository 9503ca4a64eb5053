use koira_context::{ComponentType, ObjectHost, ObjectId};

use crate::error::FixtureError;
use crate::hook::{TestHook, TestRun};

/// Name given to the instantiated object when none is configured.
pub const DEFAULT_OBJECT_NAME: &str = "Test GameObject";

/// Instantiates one named object before a test and destroys it afterwards.
///
/// Teardown of an instance that never existed is a quiet no-op, so a setup
/// failure elsewhere is not masked by a second error from this fixture.
pub struct GameObjectFixture {
    name: String,
    components: Vec<ComponentType>,
    instance: Option<ObjectId>,
}

impl GameObjectFixture {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_OBJECT_NAME.to_string(),
            components: Vec::new(),
            instance: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_component(mut self, component: impl Into<ComponentType>) -> Self {
        self.components.push(component.into());
        self
    }

    pub fn with_components<I>(mut self, components: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ComponentType>,
    {
        self.components.extend(components.into_iter().map(Into::into));
        self
    }

    /// Handle of the live instance between before and after, if any.
    pub fn instance(&self) -> Option<ObjectId> {
        self.instance
    }
}

impl Default for GameObjectFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHook for GameObjectFixture {
    fn before_test(&mut self, run: &mut TestRun<'_>) -> Result<(), FixtureError> {
        let object = run
            .host
            .instantiate(&self.name, &self.components)
            .map_err(|unknown| FixtureError::InstantiateFailed {
                name: self.name.clone(),
                component: unknown.0,
            })?;
        log::info!("instantiated `{}` for `{}`", self.name, run.test_name);
        self.instance = Some(object);
        Ok(())
    }

    fn after_test(&mut self, run: &mut TestRun<'_>) -> Result<(), FixtureError> {
        if let Some(object) = self.instance.take() {
            run.destroy_object(object);
        }
        Ok(())
    }
}
