use std::path::Path;
use std::time::Duration;

use sqlx::types::Json;
use sqlx::PgPool;
use tokio::fs;
use uuid::Uuid;

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::models::resume_analysis::ResumeAnalysis;
use crate::services::ats_service;
use crate::services::extractor_service::{self, ResumeFileType};

/// Retained prefix of the extracted text on the persisted record.
const EXTRACTED_TEXT_LIMIT: usize = 1000;

const ANALYSIS_COLUMNS: &str = "id, user_id, resume_url, file_name, ats_score, extracted_text, \
     keywords, sections, formatting, overall_suggestions, analyzed_at";

#[derive(Clone)]
pub struct AnalysisService {
    pool: PgPool,
}

#[derive(Debug)]
pub struct AnalysisOutcome {
    pub analysis: ResumeAnalysis,
    /// False when the analysis row was saved but the student profile update
    /// failed; callers surface this as a partial-success warning.
    pub profile_synced: bool,
}

impl AnalysisService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the full pipeline against a stored upload and persists exactly
    /// one analysis row. The stored file is deleted on any failure up to and
    /// including persistence, so a failed call leaves no orphaned storage.
    /// Each call creates a fresh row; identical content is not deduplicated.
    pub async fn analyze_upload(
        &self,
        user_id: Uuid,
        stored_path: &Path,
        resume_url: &str,
        file_name: &str,
        file_type: ResumeFileType,
    ) -> Result<AnalysisOutcome> {
        let analysis = match self
            .run_pipeline(user_id, stored_path, resume_url, file_name, file_type)
            .await
        {
            Ok(analysis) => analysis,
            Err(err) => {
                self.discard_upload(stored_path).await;
                return Err(err);
            }
        };

        let profile_synced = match self
            .sync_profile(user_id, resume_url, &analysis.keywords.found)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    user_id = %user_id,
                    analysis_id = %analysis.id,
                    "profile sync failed after analysis: {}",
                    err
                );
                false
            }
        };

        Ok(AnalysisOutcome {
            analysis,
            profile_synced,
        })
    }

    pub async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<ResumeAnalysis>> {
        let analysis = sqlx::query_as::<_, ResumeAnalysis>(&format!(
            "SELECT {ANALYSIS_COLUMNS} FROM resume_analyses \
             WHERE user_id = $1 ORDER BY analyzed_at DESC LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(analysis)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ResumeAnalysis>> {
        let analyses = sqlx::query_as::<_, ResumeAnalysis>(&format!(
            "SELECT {ANALYSIS_COLUMNS} FROM resume_analyses \
             WHERE user_id = $1 ORDER BY analyzed_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(analyses)
    }

    async fn run_pipeline(
        &self,
        user_id: Uuid,
        stored_path: &Path,
        resume_url: &str,
        file_name: &str,
        file_type: ResumeFileType,
    ) -> Result<ResumeAnalysis> {
        let data = fs::read(stored_path).await?;
        let text = extract_with_timeout(data, file_type).await?;

        let found = ats_service::match_keywords(&text);
        let sections = ats_service::detect_sections(&text);
        let score = ats_service::calculate_score(&text, &sections, found.len());
        let formatting = ats_service::formatting_report(&text);
        let overall_suggestions = ats_service::build_suggestions(&sections, found.len(), score);
        let keywords = ats_service::keyword_report(found);
        let excerpt = text_excerpt(&text, EXTRACTED_TEXT_LIMIT);

        let analysis = sqlx::query_as::<_, ResumeAnalysis>(&format!(
            "INSERT INTO resume_analyses \
                (user_id, resume_url, file_name, ats_score, extracted_text, \
                 keywords, sections, formatting, overall_suggestions) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {ANALYSIS_COLUMNS}"
        ))
        .bind(user_id)
        .bind(resume_url)
        .bind(file_name)
        .bind(score)
        .bind(&excerpt)
        .bind(Json(&keywords))
        .bind(Json(&sections))
        .bind(Json(&formatting))
        .bind(&overall_suggestions)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::PersistenceFailed)?;

        Ok(analysis)
    }

    /// Overwrites the profile resume URL, and the skill list when the
    /// analysis found any keywords. Last analysis wins; concurrent uploads
    /// from the same user are not serialized.
    async fn sync_profile(&self, user_id: Uuid, resume_url: &str, skills: &[String]) -> Result<()> {
        let result = if skills.is_empty() {
            sqlx::query("UPDATE students SET resume_url = $2, updated_at = now() WHERE id = $1")
                .bind(user_id)
                .bind(resume_url)
                .execute(&self.pool)
                .await
        } else {
            sqlx::query(
                "UPDATE students SET resume_url = $2, skills = $3, updated_at = now() \
                 WHERE id = $1",
            )
            .bind(user_id)
            .bind(resume_url)
            .bind(skills)
            .execute(&self.pool)
            .await
        };

        let result = result.map_err(Error::ProfileSyncFailed)?;
        if result.rows_affected() == 0 {
            return Err(Error::ProfileSyncFailed(sqlx::Error::RowNotFound));
        }
        Ok(())
    }

    async fn discard_upload(&self, stored_path: &Path) {
        if let Err(err) = fs::remove_file(stored_path).await {
            tracing::error!(
                "failed to remove uploaded resume {}: {}",
                stored_path.display(),
                err
            );
        }
    }
}

/// Extraction is synchronous CPU work inside the parser crates, so it runs on
/// a blocking worker under a bounded timeout; a hang on a malformed binary
/// surfaces as an extraction failure instead of a stuck request.
async fn extract_with_timeout(data: Vec<u8>, file_type: ResumeFileType) -> Result<String> {
    let timeout = Duration::from_secs(get_config().extraction_timeout_secs);
    let task =
        tokio::task::spawn_blocking(move || extractor_service::extract_text(&data, file_type));
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(Error::ExtractionFailed(anyhow::anyhow!(
            "extraction task failed: {}",
            join_err
        ))),
        Err(_) => Err(Error::ExtractionFailed(anyhow::anyhow!(
            "extraction timed out after {}s",
            timeout.as_secs()
        ))),
    }
}

/// Character-safe prefix of the extracted text.
pub fn text_excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_keeps_short_text_intact() {
        assert_eq!(text_excerpt("hello", 1000), "hello");
    }

    #[test]
    fn excerpt_truncates_by_characters_not_bytes() {
        let text = "é".repeat(1200);
        let excerpt = text_excerpt(&text, 1000);
        assert_eq!(excerpt.chars().count(), 1000);
        assert!(excerpt.chars().all(|c| c == 'é'));
    }
}
