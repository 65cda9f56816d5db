//! vboxbuild shared - error types and constants
//!
//! Used by the builder library, the `vboxbuild` CLI and the test doubles.

pub mod constants;
pub mod errors;

pub use errors::{BuildError, BuildResult};
