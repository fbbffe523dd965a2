//! Resume analysis — one LLM call that turns raw resume text into a
//! structured skills/career breakdown.
//!
//! Policy: this operation never fails on malformed model output. A reply
//! that does not parse as JSON degrades to a placeholder analysis carrying
//! the first 500 characters of the raw reply, flagged `degraded`. Only
//! transport and API failures raise.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::errors::ServiceError;
use crate::llm_client::{extract_json, truncate_chars, ChatClient, Message};
use crate::resume::prompts::{resume_analysis_system, RESUME_ANALYSIS_PROMPT_TEMPLATE};

pub mod prompts;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;
const FALLBACK_SUMMARY_CHARS: usize = 500;

/// Structured output of resume analysis.
///
/// Every field defaults, so a valid-but-partial model object still parses.
/// `degraded` is set only by [`ResumeAnalysis::fallback`] — it is skipped
/// during deserialization so model output can never claim it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeAnalysis {
    pub extracted_skills: Vec<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub career_paths: Vec<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub ai_summary: String,
    pub experience_level: String,
    pub recommended_roles: Vec<String>,
    /// True when this analysis was synthesized by the fallback policy
    /// rather than parsed from the model's structured reply.
    #[serde(skip_deserializing)]
    pub degraded: bool,
}

impl ResumeAnalysis {
    /// Placeholder analysis used when the model reply was not valid JSON.
    fn fallback(raw_reply: &str) -> Self {
        Self {
            career_paths: vec!["Further analysis needed".to_string()],
            strengths: vec!["Content reviewed".to_string()],
            improvements: vec!["Unable to provide detailed analysis".to_string()],
            ai_summary: truncate_chars(raw_reply, FALLBACK_SUMMARY_CHARS),
            experience_level: "Unknown".to_string(),
            degraded: true,
            ..Self::default()
        }
    }
}

/// Analyzes resume text via the chat endpoint.
///
/// The resume text is embedded verbatim; truncation, if any, is the remote
/// model's concern.
pub async fn analyze_resume(
    chat: &dyn ChatClient,
    resume_text: &str,
) -> Result<ResumeAnalysis, ServiceError> {
    let prompt = RESUME_ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let messages = [Message::system(resume_analysis_system()), Message::user(prompt)];

    let reply = chat
        .send(&messages, TEMPERATURE, MAX_TOKENS)
        .await
        .map_err(|e| {
            error!("Error analyzing resume: {e}");
            ServiceError::ResumeAnalysis(e.to_string())
        })?;

    match extract_json::<ResumeAnalysis>(&reply) {
        Ok(analysis) => Ok(analysis),
        Err(e) => {
            warn!("Failed to parse JSON from resume analysis reply, using fallback structure: {e}");
            Ok(ResumeAnalysis::fallback(&reply))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_analysis_deserializes_full_object() {
        let json = r#"{
            "extracted_skills": ["Rust", "SQL"],
            "technical_skills": ["Rust"],
            "soft_skills": ["Communication"],
            "career_paths": ["Backend Engineer"],
            "strengths": ["Systems depth"],
            "improvements": ["Add metrics to bullets"],
            "ai_summary": "Strong systems engineer.",
            "experience_level": "Senior level",
            "recommended_roles": ["Staff Engineer"]
        }"#;
        let analysis: ResumeAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.extracted_skills, vec!["Rust", "SQL"]);
        assert_eq!(analysis.experience_level, "Senior level");
        assert!(!analysis.degraded);
    }

    #[test]
    fn test_resume_analysis_tolerates_missing_fields() {
        let json = r#"{"ai_summary": "Short profile.", "extracted_skills": ["Go"]}"#;
        let analysis: ResumeAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.ai_summary, "Short profile.");
        assert!(analysis.career_paths.is_empty());
        assert!(analysis.experience_level.is_empty());
    }

    #[test]
    fn test_model_output_cannot_set_degraded_flag() {
        let json = r#"{"ai_summary": "x", "degraded": true}"#;
        let analysis: ResumeAnalysis = serde_json::from_str(json).unwrap();
        assert!(!analysis.degraded);
    }

    #[test]
    fn test_fallback_shape() {
        let prose = "Sorry, I cannot analyze this.";
        let analysis = ResumeAnalysis::fallback(prose);
        assert!(analysis.extracted_skills.is_empty());
        assert!(analysis.technical_skills.is_empty());
        assert!(analysis.soft_skills.is_empty());
        assert!(analysis.recommended_roles.is_empty());
        assert_eq!(analysis.career_paths, vec!["Further analysis needed"]);
        assert_eq!(analysis.strengths, vec!["Content reviewed"]);
        assert_eq!(analysis.experience_level, "Unknown");
        assert_eq!(analysis.ai_summary, prose);
        assert!(analysis.degraded);
    }

    #[test]
    fn test_fallback_truncates_summary_to_500_chars() {
        let prose = "a".repeat(800);
        let analysis = ResumeAnalysis::fallback(&prose);
        assert_eq!(analysis.ai_summary.chars().count(), 500);
    }
}
