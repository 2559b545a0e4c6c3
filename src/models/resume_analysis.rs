use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted analysis run. Rows are create-only; "latest" is the newest
/// `analyzed_at` for a given user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_url: String,
    pub file_name: String,
    pub ats_score: i32,
    pub extracted_text: String,
    pub keywords: Json<KeywordReport>,
    pub sections: Json<SectionFlags>,
    pub formatting: Json<FormattingReport>,
    pub overall_suggestions: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

/// `found` and `missing` both follow the vocabulary's declaration order;
/// `missing` is capped at 10 entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordReport {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFlags {
    pub has_contact_info: bool,
    pub has_education: bool,
    pub has_experience: bool,
    pub has_skills: bool,
    pub has_projects: bool,
}

impl SectionFlags {
    pub fn present_count(&self) -> u32 {
        [
            self.has_contact_info,
            self.has_education,
            self.has_experience,
            self.has_skills,
            self.has_projects,
        ]
        .iter()
        .filter(|flag| **flag)
        .count() as u32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingReport {
    pub score: i32,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}
