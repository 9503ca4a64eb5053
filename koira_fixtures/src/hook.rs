use koira_context::{EditorHost, ExecutionMode, ObjectHost, ObjectId};

use crate::error::FixtureError;

/// One test invocation as the fixtures see it: which test is running, in
/// which mode, against which host.
pub struct TestRun<'a> {
    pub test_name: &'a str,
    pub mode: ExecutionMode,
    pub host: &'a mut dyn EditorHost,
}

impl TestRun<'_> {
    /// Release `object` with the timing the current mode allows:
    /// synchronous in the editor, end-of-cycle in a running simulation.
    pub fn destroy_object(&mut self, object: ObjectId) {
        if self.mode.is_playing() {
            self.host.destroy_deferred(object);
        } else {
            self.host.destroy_now(object);
        }
    }
}

/// Before/after pair invoked around a single test body.
///
/// Hooks are independent and composable; any number of them may wrap the
/// same test. Each instance owns exactly the resources it created.
pub trait TestHook {
    fn before_test(&mut self, run: &mut TestRun<'_>) -> Result<(), FixtureError>;

    fn after_test(&mut self, run: &mut TestRun<'_>) -> Result<(), FixtureError>;
}

/// Drive `body` with every hook's before/after pair around it.
///
/// Befores run in registration order; the first failure skips the body and
/// the remaining befores. Afters always run, in reverse order, so a hook
/// that never set up still gets the chance to decline cleanly. The first
/// error encountered is the one returned.
pub fn run_with_hooks<F>(
    hooks: &mut [&mut dyn TestHook],
    test_name: &str,
    mode: ExecutionMode,
    host: &mut dyn EditorHost,
    body: F,
) -> Result<(), FixtureError>
where
    F: FnOnce(&mut TestRun<'_>),
{
    let mut run = TestRun {
        test_name,
        mode,
        host,
    };
    let mut first_error = None;

    for hook in hooks.iter_mut() {
        if let Err(err) = hook.before_test(&mut run) {
            log::warn!("before hook failed for `{test_name}`: {err}");
            first_error = Some(err);
            break;
        }
    }

    if first_error.is_none() {
        body(&mut run);
    }

    for hook in hooks.iter_mut().rev() {
        if let Err(err) = hook.after_test(&mut run) {
            log::warn!("after hook failed for `{test_name}`: {err}");
            first_error.get_or_insert(err);
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
