//! CarFeed API Server
//!
//! Personalized feed aggregation and ranking for the car community. Pulls news,
//! reviews, questions and stories from the content service, ranks them for the
//! viewer, and serves the merged feed with its side panels.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::{ContentServiceClient, InteractionServiceClient, ProfileServiceClient, ServiceClient};
use app::FeedService;
use config::Config;

/// Feed service wired to the HTTP collaborators
pub type HttpFeedService = FeedService<
    ContentServiceClient,
    ContentServiceClient,
    ContentServiceClient,
    ContentServiceClient,
    ProfileServiceClient,
    InteractionServiceClient,
>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<HttpFeedService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Wire the feed service to the configured upstream services
fn build_feed_service(config: &Config) -> HttpFeedService {
    let settings = config.feed_settings();
    // Feed sources have their own deadline; this one bounds profile and interaction calls
    let http = reqwest::Client::builder()
        .timeout(settings.source_timeout * 2)
        .connect_timeout(Duration::from_secs(2))
        .build()
        .expect("Failed to build HTTP client");

    let content = Arc::new(ContentServiceClient::new(ServiceClient::new(
        http.clone(),
        &config.content_service_url,
    )));
    let profiles = Arc::new(ProfileServiceClient::new(ServiceClient::new(
        http.clone(),
        &config.profile_service_url,
    )));
    let interactions = Arc::new(InteractionServiceClient::new(ServiceClient::new(
        http,
        &config.interaction_service_url,
    )));

    FeedService::new(
        content.clone(),
        content.clone(),
        content.clone(),
        content,
        profiles,
        interactions,
        settings,
    )
}

fn build_router(state: AppState) -> Router {
    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("Failed to build governor config"),
    );

    // Rate-limited routes (everything that writes to the interaction service)
    let rate_limited_routes = Router::new()
        .route("/feed/seen", post(handlers::mark_seen))
        .route("/feed/interact", post(handlers::interact))
        .route("/feed/bookmark", post(handlers::bookmark))
        .route("/feed/hide", post(handlers::hide))
        .route("/feed/report", post(handlers::report))
        .route("/feed/comments", post(handlers::add_comment))
        .layer(GovernorLayer {
            config: governor_config,
        });

    Router::new()
        // Feeds
        .route("/feed", get(handlers::get_feed))
        .route("/feed/trending", get(handlers::get_trending_feed))
        .route("/feed/friends", get(handlers::get_friends_feed))
        // Side views
        .route("/feed/stories", get(handlers::get_stories))
        .route("/feed/topics", get(handlers::get_topics))
        .route("/feed/suggestions", get(handlers::get_suggestions))
        .route("/feed/stats", get(handlers::get_stats))
        .route("/feed/popular", get(handlers::get_popular))
        .route(
            "/feed/comments/:content_type/:content_id",
            get(handlers::get_comments),
        )
        // Merge rate-limited routes
        .merge(rate_limited_routes)
        // Viewer header applies to every feed route
        .layer(middleware::from_fn(auth::viewer_middleware))
        // Health check (no viewer)
        .route("/health", get(health))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,carfeed_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CarFeed API...");

    // Load configuration
    let config = Config::from_env();
    let feed_service = Arc::new(build_feed_service(&config));
    tracing::info!(
        content = %config.content_service_url,
        profiles = %config.profile_service_url,
        interactions = %config.interaction_service_url,
        "Upstream services configured"
    );

    let app = build_router(AppState { feed_service });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
