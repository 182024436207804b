//! Request identity

pub mod viewer;

pub use viewer::{viewer_middleware, Viewer};
