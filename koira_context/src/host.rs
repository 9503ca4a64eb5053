use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use crate::ids::{ObjectId, SceneId};

/// Objects every [`SceneSetup::DefaultObjects`] scene starts with. The same
/// names are exempt from fixture teardown.
pub const DEFAULT_SCENE_OBJECTS: [&str; 2] = ["Main Camera", "Directional Light"];

/// Baseline contents of a freshly created scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSetup {
    Empty,
    DefaultObjects,
}

impl SceneSetup {
    /// Stable name used when a generated scene has no asset path to take
    /// its name from.
    pub fn label(self) -> &'static str {
        match self {
            Self::Empty => "EmptyScene",
            Self::DefaultObjects => "DefaultObjects",
        }
    }
}

/// Component attached at instantiation time, referenced by type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentType(pub Cow<'static, str>);

impl ComponentType {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ComponentType {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for ComponentType {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// Reported by [`ObjectHost::instantiate`] when a requested component type
/// is not known to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownComponent(pub String);

impl Display for UnknownComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown component type `{}`", self.0)
    }
}

impl std::error::Error for UnknownComponent {}

/// Scene side of the editor: creation, naming, persistence, enumeration.
pub trait SceneHost {
    /// Create a scene with the given baseline contents and make it the
    /// active scene.
    fn create_scene(&mut self, setup: SceneSetup) -> SceneId;

    fn active_scene(&self) -> SceneId;

    fn scene_name(&self, scene: SceneId) -> Option<String>;

    fn set_scene_name(&mut self, scene: SceneId, name: &str);

    /// Persist a scene under an asset path. `false` means the save failed.
    fn save_scene(&mut self, scene: SceneId, path: &str) -> bool;

    /// Remove a persisted asset. `false` means nothing was deleted.
    fn delete_asset(&mut self, path: &str) -> bool;

    /// Make the scene persisted under `path` active. Play-mode capability.
    fn load_scene(&mut self, path: &str) -> bool;

    /// Root objects of a scene, in their natural enumeration order.
    fn root_objects(&self, scene: SceneId) -> Vec<ObjectId>;
}

/// Object side of the editor: instantiation and release.
///
/// Release timing is a host capability, not a caller choice: the editor can
/// tear an object down synchronously, while a running simulation only frees
/// it at the end of the current cycle.
pub trait ObjectHost {
    /// Instantiate a named root object in the active scene, attaching the
    /// requested components in order.
    fn instantiate(
        &mut self,
        name: &str,
        components: &[ComponentType],
    ) -> Result<ObjectId, UnknownComponent>;

    fn object_name(&self, object: ObjectId) -> Option<String>;

    /// Release an object synchronously.
    fn destroy_now(&mut self, object: ObjectId);

    /// Release an object at the end of the current cycle.
    fn destroy_deferred(&mut self, object: ObjectId);
}

/// Everything a fixture needs from the editor, in one object-safe bundle.
pub trait EditorHost: SceneHost + ObjectHost {}

impl<T: SceneHost + ObjectHost> EditorHost for T {}
