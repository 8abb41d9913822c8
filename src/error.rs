use std::borrow::Cow;

use thiserror::Error;

use crate::hook::HookKind;

/// Errors that stop registration or abort a whole run.
///
/// Failing tests are not errors, they end up as [`TestStatus::Failed`](crate::outcome::TestStatus)
/// in the [`RunReport`](crate::RunReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A test with the same name was already registered in the same buffer.
    #[error("test \"{name}\" already exists")]
    DuplicateTest { name: Cow<'static, str> },

    /// A lifecycle hook returned an error or panicked.
    ///
    /// Hooks wrap many tests, so there is no single test to blame and the run stops.
    #[error("{hook} hook of group '{group}' failed: {reason}")]
    HookFailed {
        group: String,
        hook: HookKind,
        reason: String,
    },
}
