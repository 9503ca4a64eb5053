use koira_context::{DEFAULT_SCENE_OBJECTS, ObjectHost, SceneHost, SceneSetup};

use crate::error::FixtureError;
use crate::hook::{TestHook, TestRun};
use crate::scene_path::{canonical_scene_path, scene_file_name};

/// Creates a scene before a test and sweeps it clean afterwards.
///
/// The scene starts empty or with the engine's default objects; when a path
/// is configured the scene is also persisted before the test and its asset
/// deleted after. Under [`SceneSetup::DefaultObjects`] the default objects
/// survive teardown, everything else at the scene root goes.
pub struct SceneFixture {
    setup: SceneSetup,
    scene_path: Option<String>,
}

impl SceneFixture {
    pub fn new(setup: SceneSetup) -> Self {
        Self {
            setup,
            scene_path: None,
        }
    }

    /// Like [`SceneFixture::new`], with the scene persisted under `raw`.
    /// The path is canonicalized once, here; a blank `raw` means no
    /// persistence.
    pub fn with_path(setup: SceneSetup, raw: &str) -> Self {
        Self {
            setup,
            scene_path: canonical_scene_path(Some(raw)),
        }
    }

    /// Canonical asset path the scene is saved under, if any.
    pub fn scene_path(&self) -> Option<&str> {
        self.scene_path.as_deref()
    }

    fn test_scene_name(&self) -> String {
        let base = match &self.scene_path {
            Some(path) => scene_file_name(path),
            None => self.setup.label(),
        };
        format!("Test [SceneFixture] {base}")
    }
}

impl TestHook for SceneFixture {
    fn before_test(&mut self, run: &mut TestRun<'_>) -> Result<(), FixtureError> {
        if run.mode.is_playing() {
            // Play mode would load the saved scene by name here; that
            // loader has never been wired up, so fail instead of no-opping.
            return Err(FixtureError::PlayModeUnsupported {
                fixture: "SceneFixture",
            });
        }

        let name = self.test_scene_name();
        let active = run.host.active_scene();
        if run.host.scene_name(active).as_deref() == Some(name.as_str()) {
            // Re-run without reset: the test scene is already in place.
            return Ok(());
        }

        let scene = run.host.create_scene(self.setup);
        run.host.set_scene_name(scene, &name);
        log::info!("created scene `{name}` for `{}`", run.test_name);

        if let Some(path) = &self.scene_path {
            if !run.host.save_scene(scene, path) {
                return Err(FixtureError::SaveFailed { path: path.clone() });
            }
        }
        Ok(())
    }

    fn after_test(&mut self, run: &mut TestRun<'_>) -> Result<(), FixtureError> {
        if run.mode.is_playing() {
            return Err(FixtureError::PlayModeUnsupported {
                fixture: "SceneFixture",
            });
        }

        let active = run.host.active_scene();
        for object in run.host.root_objects(active) {
            if self.setup == SceneSetup::DefaultObjects {
                let name = run.host.object_name(object);
                if name
                    .as_deref()
                    .is_some_and(|name| DEFAULT_SCENE_OBJECTS.contains(&name))
                {
                    continue;
                }
            }
            run.destroy_object(object);
        }

        if let Some(path) = &self.scene_path {
            if !run.host.delete_asset(path) {
                return Err(FixtureError::DeleteFailed { path: path.clone() });
            }
            log::info!("deleted scene asset `{path}`");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use koira_context::{ExecutionMode, HeadlessHost};

    use super::*;

    fn editor_run<'a>(host: &'a mut HeadlessHost, test_name: &'a str) -> TestRun<'a> {
        TestRun {
            test_name,
            mode: ExecutionMode::Editor,
            host,
        }
    }

    fn root_names(host: &HeadlessHost) -> Vec<String> {
        host.root_objects(host.active_scene())
            .into_iter()
            .map(|object| host.object_name(object).expect("missing object"))
            .collect()
    }

    #[test]
    fn path_is_canonicalized_at_construction() {
        let fixture = SceneFixture::with_path(SceneSetup::Empty, "Level1");
        assert_eq!(fixture.scene_path(), Some("Assets/Level1.unity"));

        let fixture = SceneFixture::with_path(SceneSetup::Empty, "Assets/Level1.unity");
        assert_eq!(fixture.scene_path(), Some("Assets/Level1.unity"));

        let fixture = SceneFixture::with_path(SceneSetup::Empty, "   ");
        assert_eq!(fixture.scene_path(), None);
    }

    #[test]
    fn before_creates_and_names_the_test_scene() {
        let mut fixture = SceneFixture::new(SceneSetup::DefaultObjects);
        let mut host = HeadlessHost::new();
        fixture
            .before_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect("before failed");

        let active = host.active_scene();
        assert_eq!(
            host.scene_name(active).as_deref(),
            Some("Test [SceneFixture] DefaultObjects")
        );
        assert_eq!(root_names(&host), ["Main Camera", "Directional Light"]);
    }

    #[test]
    fn before_twice_does_not_create_a_second_scene() {
        let mut fixture = SceneFixture::new(SceneSetup::Empty);
        let mut host = HeadlessHost::new();
        fixture
            .before_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect("before failed");
        let scenes = host.scene_count();
        let active = host.active_scene();

        fixture
            .before_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect("before failed");
        assert_eq!(host.scene_count(), scenes);
        assert_eq!(host.active_scene(), active);
    }

    #[test]
    fn before_persists_the_scene_when_a_path_is_set() {
        let mut fixture = SceneFixture::with_path(SceneSetup::Empty, "Level1");
        let mut host = HeadlessHost::new();
        fixture
            .before_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect("before failed");

        assert!(host.asset_saved("Assets/Level1.unity"));
        assert_eq!(
            host.scene_name(host.active_scene()).as_deref(),
            Some("Test [SceneFixture] Level1.unity")
        );
    }

    #[test]
    fn failed_save_is_fatal_and_names_the_path() {
        let mut fixture = SceneFixture::with_path(SceneSetup::Empty, "Level1");
        let mut host = HeadlessHost::new();
        host.fail_next_save();

        let err = fixture
            .before_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect_err("expected save failure");
        assert_eq!(
            err,
            FixtureError::SaveFailed {
                path: "Assets/Level1.unity".to_string()
            }
        );
    }

    #[test]
    fn teardown_keeps_default_objects_and_removes_the_rest() {
        let mut fixture = SceneFixture::new(SceneSetup::DefaultObjects);
        let mut host = HeadlessHost::new();
        fixture
            .before_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect("before failed");
        host.instantiate("Enemy", &[]).expect("failed to instantiate");

        fixture
            .after_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect("after failed");
        assert_eq!(root_names(&host), ["Main Camera", "Directional Light"]);
    }

    #[test]
    fn empty_setup_teardown_removes_everything() {
        let mut fixture = SceneFixture::new(SceneSetup::Empty);
        let mut host = HeadlessHost::new();
        fixture
            .before_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect("before failed");
        for name in ["Main Camera", "Directional Light", "Enemy"] {
            host.instantiate(name, &[]).expect("failed to instantiate");
        }

        fixture
            .after_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect("after failed");
        assert!(root_names(&host).is_empty());
    }

    #[test]
    fn teardown_deletes_the_persisted_asset() {
        let mut fixture = SceneFixture::with_path(SceneSetup::Empty, "Level1");
        let mut host = HeadlessHost::new();
        fixture
            .before_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect("before failed");
        assert!(host.asset_saved("Assets/Level1.unity"));

        fixture
            .after_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect("after failed");
        assert!(!host.asset_saved("Assets/Level1.unity"));
    }

    #[test]
    fn failed_delete_is_fatal_and_names_the_path() {
        let mut fixture = SceneFixture::with_path(SceneSetup::Empty, "Level1");
        let mut host = HeadlessHost::new();

        // Nothing was ever saved under the path, so deletion reports failure.
        let err = fixture
            .after_test(&mut editor_run(&mut host, "enemy_spawns"))
            .expect_err("expected delete failure");
        assert_eq!(
            err,
            FixtureError::DeleteFailed {
                path: "Assets/Level1.unity".to_string()
            }
        );
    }

    #[test]
    fn play_mode_fails_loudly_in_both_hooks() {
        let mut fixture = SceneFixture::new(SceneSetup::Empty);
        let mut host = HeadlessHost::new();
        let mut run = TestRun {
            test_name: "enemy_spawns",
            mode: ExecutionMode::Play,
            host: &mut host,
        };

        let expected = FixtureError::PlayModeUnsupported {
            fixture: "SceneFixture",
        };
        assert_eq!(fixture.before_test(&mut run), Err(expected.clone()));
        assert_eq!(fixture.after_test(&mut run), Err(expected));
    }
}
