//! Content service client
//!
//! One client serves all four content families; each family is its own
//! endpoint and is failed independently by the aggregator.

use async_trait::async_trait;
use urlencoding::encode;

use super::service_client::ServiceClient;
use crate::domain::entities::{NewsArticle, Question, Review, Story};
use crate::domain::ports::{NewsSource, QuestionSource, ReviewSource, SourceFilter, StorySource};
use crate::error::SourceError;

pub struct ContentServiceClient {
    service: ServiceClient,
}

impl ContentServiceClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }

    fn list_url(&self, collection: &str, filter: &SourceFilter) -> String {
        format!(
            "{}?{}",
            self.service.api_url(&format!("/{}", collection)),
            filter_query(filter)
        )
    }
}

/// Encode a filter as `limit=..&authors=..&since=..`
fn filter_query(filter: &SourceFilter) -> String {
    let mut params = vec![format!("limit={}", filter.limit)];
    if let Some(ids) = &filter.author_ids {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        params.push(format!("authors={}", encode(&joined)));
    }
    if let Some(since) = filter.since {
        params.push(format!("since={}", encode(&since.to_rfc3339())));
    }
    params.join("&")
}

#[async_trait]
impl NewsSource for ContentServiceClient {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<NewsArticle>, SourceError> {
        self.service
            .get_json(&self.list_url("news/published", filter))
            .await
    }
}

#[async_trait]
impl ReviewSource for ContentServiceClient {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<Review>, SourceError> {
        self.service
            .get_json(&self.list_url("reviews/approved", filter))
            .await
    }
}

#[async_trait]
impl QuestionSource for ContentServiceClient {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<Question>, SourceError> {
        self.service.get_json(&self.list_url("questions", filter)).await
    }
}

#[async_trait]
impl StorySource for ContentServiceClient {
    async fn fetch(&self, filter: &SourceFilter) -> Result<Vec<Story>, SourceError> {
        self.service
            .get_json(&self.list_url("stories/active", filter))
            .await
    }
}
