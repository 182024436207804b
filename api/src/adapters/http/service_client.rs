//! Shared JSON/HTTP plumbing for the collaborator services

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Base URL plus a pooled reqwest client
#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
    ) -> Result<T, SourceError> {
        let response = self.http.get(url).send().await?;
        handle_response(response).await
    }

    /// GET that maps a 404 to `None`
    pub async fn get_optional<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
    ) -> Result<Option<T>, SourceError> {
        let response = self.http.get(url).send().await?;
        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        handle_response(response).await.map(Some)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, SourceError> {
        let response = self.http.post(url).json(body).send().await?;
        handle_response(response).await
    }

    pub async fn post_empty<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<(), SourceError> {
        let response = self.http.post(url).json(body).send().await?;
        handle_empty_response(response).await
    }
}

async fn handle_response<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, SourceError> {
    let status = response.status();

    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| SourceError::Deserialization(e.to_string()))
    } else {
        Err(error_for(response).await)
    }
}

async fn handle_empty_response(response: reqwest::Response) -> Result<(), SourceError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_for(response).await)
    }
}

async fn error_for(response: reqwest::Response) -> SourceError {
    let status = response.status().as_u16();
    match status {
        429 => SourceError::Unavailable("rate limited".to_string()),
        502..=504 => SourceError::Unavailable(format!("upstream returned {}", status)),
        _ => {
            let message = response.text().await.unwrap_or_default();
            SourceError::Api { status, message }
        }
    }
}
