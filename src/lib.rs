//! A small sequential test harness.
//!
//! Tests are organised in groups. Each group owns an optional context value
//! shared by its tests and by its `before all`, `before each`, `after each`
//! and `after all` hooks. Groups are either declared as [`Group`] values or
//! registered imperatively through [`setup`] and a [`Registry`].
//!
//! ```no_run
//! use grouptest::{Group, setup};
//!
//! struct Db {
//!     rows: usize,
//! }
//!
//! let report = grouptest::harness()
//!     .with_group(setup("imperative", |r| {
//!         r.test("adds", |t| {
//!             t.expect(1 + 1, 2);
//!         })
//!     }))
//!     .with_group(
//!         Group::new("declarative", Db { rows: 0 })
//!             .with_before_each(|db: &mut Db| db.rows += 1)
//!             .with_test("sees a row", |t| {
//!                 t.assert_with(t.rows == 1, "expected one row");
//!             })?,
//!     )
//!     .run()?;
//! assert!(report.is_success());
//! # Ok::<(), grouptest::Error>(())
//! ```

pub mod formatter;
pub mod handle;
pub mod hook;
pub mod outcome;
pub mod panic;

mod error;
pub use error::*;

mod group;
pub use group::*;

mod registry;
pub use registry::*;

mod runner;
pub use runner::*;

mod harness;
pub use harness::*;

mod report;
pub use report::*;

#[cfg(test)]
mod test_support;

pub mod prelude {
    pub use crate::{
        Error, Group, Harness, Registry, RunReport, TestGroup,
        handle::{AssertionFailure, TestHandle},
        harness::harness,
        run_tests, setup,
    };
}
