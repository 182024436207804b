//! HTTP adapters
//!
//! reqwest clients for the content, profile and interaction services.

pub mod content_client;
pub mod interaction_client;
pub mod profile_client;
pub mod service_client;

pub use content_client::ContentServiceClient;
pub use interaction_client::InteractionServiceClient;
pub use profile_client::ProfileServiceClient;
pub use service_client::ServiceClient;
