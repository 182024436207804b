//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Every port has an in-memory stand-in. Sources and clients can be built
//! failing, and content sources can be slowed down with `with_delay` to
//! exercise the per-source timeout.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
