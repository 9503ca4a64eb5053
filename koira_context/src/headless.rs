use indexmap::{IndexMap, IndexSet};

use crate::host::{
    ComponentType, DEFAULT_SCENE_OBJECTS, ObjectHost, SceneHost, SceneSetup, UnknownComponent,
};
use crate::ids::{ObjectId, SceneId};

#[derive(Debug)]
struct SceneRecord {
    name: String,
    roots: Vec<ObjectId>,
}

#[derive(Debug)]
struct ObjectRecord {
    name: String,
    components: Vec<ComponentType>,
    scene: SceneId,
}

/// In-memory editor host.
///
/// Keeps the whole editor state as plain ordered tables so fixture behavior
/// can be asserted without a running engine. Boots with a single empty
/// active scene named `Untitled`, like the editor does.
#[derive(Debug)]
pub struct HeadlessHost {
    scenes: IndexMap<SceneId, SceneRecord>,
    objects: IndexMap<ObjectId, ObjectRecord>,
    assets: IndexMap<String, SceneId>,
    components: IndexSet<String>,
    active: SceneId,
    pending_destroy: Vec<ObjectId>,
    fail_next_save: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        let boot = SceneId::generate();
        let mut scenes = IndexMap::new();
        scenes.insert(
            boot,
            SceneRecord {
                name: "Untitled".to_string(),
                roots: Vec::new(),
            },
        );
        Self {
            scenes,
            objects: IndexMap::new(),
            assets: IndexMap::new(),
            components: IndexSet::new(),
            active: boot,
            pending_destroy: Vec::new(),
            fail_next_save: false,
        }
    }

    /// Make a component type available to `instantiate`.
    pub fn register_component(&mut self, name: impl Into<String>) {
        self.components.insert(name.into());
    }

    /// Force the next `save_scene` call to report failure.
    pub fn fail_next_save(&mut self) {
        self.fail_next_save = true;
    }

    /// Apply queued deferred destructions. Stands in for the engine's
    /// end-of-frame release point.
    pub fn end_cycle(&mut self) {
        let pending = std::mem::take(&mut self.pending_destroy);
        if !pending.is_empty() {
            log::debug!("releasing {} deferred objects", pending.len());
        }
        for object in pending {
            self.unlink(object);
        }
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn pending_destroy_count(&self) -> usize {
        self.pending_destroy.len()
    }

    pub fn asset_saved(&self, path: &str) -> bool {
        self.assets.contains_key(path)
    }

    /// Component type names attached to an object, in attach order.
    pub fn object_components(&self, object: ObjectId) -> Vec<String> {
        self.objects
            .get(&object)
            .map(|record| {
                record
                    .components
                    .iter()
                    .map(|component| component.name().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn unlink(&mut self, object: ObjectId) {
        let Some(record) = self.objects.shift_remove(&object) else {
            return;
        };
        if let Some(scene) = self.scenes.get_mut(&record.scene) {
            scene.roots.retain(|root| *root != object);
        }
    }

    fn spawn_in_active(&mut self, name: &str, components: Vec<ComponentType>) -> ObjectId {
        let id = ObjectId::generate();
        self.objects.insert(
            id,
            ObjectRecord {
                name: name.to_string(),
                components,
                scene: self.active,
            },
        );
        if let Some(scene) = self.scenes.get_mut(&self.active) {
            scene.roots.push(id);
        }
        id
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneHost for HeadlessHost {
    fn create_scene(&mut self, setup: SceneSetup) -> SceneId {
        let id = SceneId::generate();
        self.scenes.insert(
            id,
            SceneRecord {
                name: String::new(),
                roots: Vec::new(),
            },
        );
        self.active = id;
        if setup == SceneSetup::DefaultObjects {
            for name in DEFAULT_SCENE_OBJECTS {
                self.spawn_in_active(name, Vec::new());
            }
        }
        log::debug!("created {} scene {id}", setup.label());
        id
    }

    fn active_scene(&self) -> SceneId {
        self.active
    }

    fn scene_name(&self, scene: SceneId) -> Option<String> {
        self.scenes.get(&scene).map(|record| record.name.clone())
    }

    fn set_scene_name(&mut self, scene: SceneId, name: &str) {
        if let Some(record) = self.scenes.get_mut(&scene) {
            record.name = name.to_string();
        }
    }

    fn save_scene(&mut self, scene: SceneId, path: &str) -> bool {
        if self.fail_next_save {
            self.fail_next_save = false;
            return false;
        }
        if !self.scenes.contains_key(&scene) {
            return false;
        }
        self.assets.insert(path.to_string(), scene);
        true
    }

    fn delete_asset(&mut self, path: &str) -> bool {
        self.assets.shift_remove(path).is_some()
    }

    fn load_scene(&mut self, path: &str) -> bool {
        match self.assets.get(path) {
            Some(&scene) => {
                self.active = scene;
                true
            }
            None => false,
        }
    }

    fn root_objects(&self, scene: SceneId) -> Vec<ObjectId> {
        self.scenes
            .get(&scene)
            .map(|record| record.roots.clone())
            .unwrap_or_default()
    }
}

impl ObjectHost for HeadlessHost {
    fn instantiate(
        &mut self,
        name: &str,
        components: &[ComponentType],
    ) -> Result<ObjectId, UnknownComponent> {
        for component in components {
            if !self.components.contains(component.name()) {
                return Err(UnknownComponent(component.name().to_string()));
            }
        }
        Ok(self.spawn_in_active(name, components.to_vec()))
    }

    fn object_name(&self, object: ObjectId) -> Option<String> {
        self.objects.get(&object).map(|record| record.name.clone())
    }

    fn destroy_now(&mut self, object: ObjectId) {
        self.unlink(object);
    }

    fn destroy_deferred(&mut self, object: ObjectId) {
        if self.objects.contains_key(&object) {
            self.pending_destroy.push(object);
        }
    }
}
