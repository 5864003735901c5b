use std::time::Duration;

use reqwest::Client;
use storage::dto::matching::{RecommendRequest, RecommendResponse};

/// Client for the external matching engine.
///
/// Every failure mode here — timeout, connection refused, non-2xx, bad
/// body — is absorbed by the caller's local fallback and never reaches the
/// end user.
#[derive(Clone)]
pub struct MatchingClient {
    client: Client,
    base_url: String,
}

impl MatchingClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    pub async fn recommend(&self, request: &RecommendRequest) -> reqwest::Result<RecommendResponse> {
        let url = format!("{}/api/v1/matching/recommend", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        response.json::<RecommendResponse>().await
    }
}
