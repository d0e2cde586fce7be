//! Abstraction over the fundraising backend

use crate::core::investor::{EmailDraft, InvestorMatch};
use crate::core::pitch::PitchData;
use crate::core::profile::StartupProfile;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImproveRequest {
    pub section: String,
    pub feedback: String,
    pub pitch: PitchData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRequest {
    pub profile: StartupProfile,
    pub investor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investor_firm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

#[async_trait]
pub trait FundraisingBackend: Send + Sync {
    async fn generate_pitch(&self, profile: &StartupProfile) -> Result<PitchData>;

    /// Returns the backend's rewrite. It may hold only the improved section and
    /// may use a different key than the one requested.
    async fn improve_section(&self, request: &ImproveRequest) -> Result<PitchData>;

    async fn match_investors(&self, profile: &StartupProfile) -> Result<Vec<InvestorMatch>>;

    async fn draft_email(&self, request: &EmailRequest) -> Result<EmailDraft>;
}
