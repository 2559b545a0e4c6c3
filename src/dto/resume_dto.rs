use serde::{Deserialize, Serialize};

use crate::models::resume_analysis::ResumeAnalysis;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResumeResponse {
    pub analysis: ResumeAnalysis,
    pub profile_synced: bool,
    /// Present when the analysis was saved but the profile update failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
