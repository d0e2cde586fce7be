use super::util::with_retry;
use crate::core::backend::{EmailRequest, FundraisingBackend, ImproveRequest};
use crate::core::config::BackendConfig;
use crate::core::investor::{EmailDraft, InvestorMatch};
use crate::core::pitch::PitchData;
use crate::core::profile::StartupProfile;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, error};

const RETRY_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
struct InvestorsResponse {
    #[serde(default)]
    investors: Vec<InvestorMatch>,
}

/// Client for the fundraising backend's JSON API.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    retries: usize,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("raisekit/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            retries: config.retries,
        })
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Posting to {}", url);

        let response = with_retry(
            || self.client.post(&url).json(body).send(),
            self.retries,
            RETRY_DELAY_MS,
        )
        .await
        .with_context(|| format!("Request to {url} failed"))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to get response text")?;

        if !status.is_success() {
            error!(%status, response = %response_text, "Backend returned an error");
            return Err(anyhow!("Backend returned {status} for {path}: {response_text}"));
        }

        match serde_json::from_str(&response_text) {
            Ok(data) => Ok(data),
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse backend response"
                );
                Err(e).with_context(|| format!("Failed to parse response from {path}"))
            }
        }
    }
}

#[async_trait]
impl FundraisingBackend for HttpBackend {
    async fn generate_pitch(&self, profile: &StartupProfile) -> Result<PitchData> {
        let pitch: PitchData = self.post_json("/api/pitch", profile).await?;
        debug!(sections = pitch.len(), "Received generated pitch");
        Ok(pitch)
    }

    async fn improve_section(&self, request: &ImproveRequest) -> Result<PitchData> {
        self.post_json("/api/pitch/improve", request).await
    }

    async fn match_investors(&self, profile: &StartupProfile) -> Result<Vec<InvestorMatch>> {
        let response: InvestorsResponse = self.post_json("/api/investors/match", profile).await?;
        debug!(count = response.investors.len(), "Received investor matches");
        Ok(response.investors)
    }

    async fn draft_email(&self, request: &EmailRequest) -> Result<EmailDraft> {
        self.post_json("/api/email", request).await
    }
}
