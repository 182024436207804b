//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod content_sources;
pub mod interactions;
pub mod profiles;

pub use content_sources::{NewsSource, QuestionSource, ReviewSource, SourceFilter, StorySource};
pub use interactions::InteractionClient;
pub use profiles::ProfileProvider;
