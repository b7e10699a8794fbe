//! Request and response bodies for the scan API.

use serde::{Deserialize, Serialize};

use crate::scan::RiskAssessment;

/// Body of `POST /scan`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScanBody {
    #[serde(default)]
    pub url: Option<String>,
}

/// JSON response for a completed scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    pub domain: String,
    pub domain_age: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u32>,
    pub warnings: Vec<String>,
    pub is_phishing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_platform: Option<bool>,
}

impl From<&RiskAssessment> for ScanResponse {
    fn from(assessment: &RiskAssessment) -> Self {
        Self {
            url: assessment.url.clone(),
            final_url: assessment.final_url.clone(),
            domain: assessment.domain.clone(),
            domain_age: assessment.domain_age.to_string(),
            risk_score: assessment.risk_score,
            warnings: assessment.warnings.clone(),
            is_phishing: assessment.is_phishing,
            trusted_platform: assessment.trusted_platform.then_some(true),
        }
    }
}

/// JSON body for 4xx/5xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
