use std::fmt::{Display, Formatter};

use uuid::Uuid;

/// Handle to a scene owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(Uuid);

impl SceneId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for SceneId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "scene:{}", self.0)
    }
}

/// Handle to an object living in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(Uuid);

impl ObjectId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "object:{}", self.0)
    }
}
