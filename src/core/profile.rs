use crate::core::valuation::ValuationInput;
use serde::{Deserialize, Serialize};

/// What a founder tells us about their company.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StartupProfile {
    pub company_name: String,
    pub stage: String,
    pub industry: String,
    pub location: String,
    pub founded_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traction: Option<String>,
}

impl StartupProfile {
    pub fn valuation_input(&self) -> ValuationInput {
        ValuationInput {
            stage: self.stage.clone(),
            industry: self.industry.clone(),
            location: self.location.clone(),
            founded_date: self.founded_date.clone(),
        }
    }
}
