use thiserror::Error;

/// Fatal fixture failures.
///
/// Nothing here is caught or retried locally; every error propagates to the
/// test runner, which fails the test.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// Scene fixtures cannot run in play mode: loading the test scene by
    /// name inside a running simulation has never been wired up.
    #[error("{fixture} is not supported in play mode")]
    PlayModeUnsupported { fixture: &'static str },

    #[error("failed to save scene to `{path}`")]
    SaveFailed { path: String },

    #[error("failed to delete scene asset `{path}`")]
    DeleteFailed { path: String },

    #[error("failed to instantiate `{name}`: unknown component type `{component}`")]
    InstantiateFailed { name: String, component: String },
}
