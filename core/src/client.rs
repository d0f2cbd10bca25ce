//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostsClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`, so the caller owns the network round-trip.

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Post;

/// Synchronous, stateless client for the posts API.
#[derive(Debug, Clone)]
pub struct PostsClient {
    base_url: String,
}

impl PostsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        get(format!("{}/posts", self.base_url))
    }

    pub fn build_get_post(&self, id: u64) -> HttpRequest {
        get(format!("{}/posts/{id}", self.base_url))
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, FetchError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, FetchError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url,
        headers: vec![("accept".to_string(), "application/json".to_string())],
    }
}

/// Any 2xx counts as success for both endpoints.
fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if (200..=299).contains(&response.status) {
        return Ok(());
    }
    Err(FetchError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}
