//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod feed_aggregator;
pub mod feed_config;
pub mod feed_item_mapper;
pub mod feed_service;
pub mod feed_sorter;
pub mod paginator;
pub mod relevance_scorer;
pub mod stats_service;
pub mod suggestion_service;
pub mod time_format;
pub mod trending_service;

pub use feed_service::FeedService;
