//! Profile service client

use async_trait::async_trait;

use super::service_client::ServiceClient;
use crate::domain::entities::{UserId, UserSummary};
use crate::domain::ports::ProfileProvider;
use crate::error::SourceError;

pub struct ProfileServiceClient {
    service: ServiceClient,
}

impl ProfileServiceClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }

    fn user_url(&self, user_id: &UserId, suffix: &str) -> String {
        self.service.api_url(&format!("/users/{}{}", user_id, suffix))
    }
}

#[async_trait]
impl ProfileProvider for ProfileServiceClient {
    async fn get_interests(&self, user_id: &UserId) -> Result<Vec<String>, SourceError> {
        self.service
            .get_json(&self.user_url(user_id, "/interests"))
            .await
    }

    async fn get_friend_ids(&self, user_id: &UserId) -> Result<Vec<UserId>, SourceError> {
        self.service
            .get_json(&self.user_url(user_id, "/friends"))
            .await
    }

    async fn get_user_summary(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserSummary>, SourceError> {
        self.service.get_optional(&self.user_url(user_id, "")).await
    }
}
