//! Aptitude testing — personalized question generation and result analysis.
//!
//! Two policies, deliberately asymmetric:
//! - Question generation is all-or-nothing. A batch that fails to parse or
//!   does not hold exactly 15 questions raises; a short or malformed batch
//!   would corrupt the scoring that runs on submission.
//! - Result analysis degrades on malformed model output the same way
//!   resume analysis does, because a placeholder assessment is more useful
//!   to the student than a failed request.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::aptitude::prompts::{
    question_generation_system, result_analysis_system, QUESTION_GENERATION_PROMPT_TEMPLATE,
    RESULT_ANALYSIS_PROMPT_TEMPLATE,
};
use crate::aptitude::scoring::{performance_summary, score_by_section};
use crate::errors::ServiceError;
use crate::llm_client::{extract_json, truncate_chars, ChatClient, Message};

pub mod prompts;
pub mod scoring;

/// A generated batch must hold exactly this many questions.
pub const QUESTION_COUNT: usize = 15;

const GENERATION_TEMPERATURE: f32 = 0.8;
const GENERATION_MAX_TOKENS: u32 = 3000;
const ANALYSIS_TEMPERATURE: f32 = 0.7;
const ANALYSIS_MAX_TOKENS: u32 = 1500;
const FALLBACK_ASSESSMENT_CHARS: usize = 500;

/// Education stage of the student. Each level carries its own three-section
/// assessment taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "10th")]
    Tenth,
    #[serde(rename = "12th")]
    Twelfth,
}

impl EducationLevel {
    /// The three assessment sections for this level.
    pub fn sections(&self) -> [&'static str; 3] {
        match self {
            EducationLevel::Tenth => ["Science", "Commerce", "Humanities"],
            EducationLevel::Twelfth => ["STEM", "Business", "Creative"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Tenth => "10th",
            EducationLevel::Twelfth => "12th",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A single generated aptitude question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AptitudeQuestion {
    pub id: u32,
    pub section: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: u32,
    pub difficulty: Difficulty,
    pub why_this_question: String,
}

/// Caller-supplied answers: question id (as a string key) to the chosen
/// option index. May be incomplete; unanswered questions score as incorrect.
pub type AnswerSet = HashMap<String, u32>;

/// Optional student profile used to personalize prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub interests: Vec<String>,
    pub career_goals: Option<String>,
    /// Opaque to this layer; forwarded to the model as-is.
    pub previous_scores: Option<Value>,
}

/// Structured output of result analysis. Same leniency and `degraded`
/// semantics as `ResumeAnalysis`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggested_careers: Vec<String>,
    pub improvement_tips: Vec<String>,
    pub overall_assessment: String,
    pub next_steps: Vec<String>,
    /// True when this analysis was synthesized by the fallback policy.
    #[serde(skip_deserializing)]
    pub degraded: bool,
}

impl ResultAnalysis {
    /// Minimal analysis used when the model reply was not valid JSON.
    fn fallback(raw_reply: &str) -> Self {
        Self {
            strengths: vec!["Test completed successfully".to_string()],
            weaknesses: vec!["Analysis pending".to_string()],
            suggested_careers: vec!["Multiple options available".to_string()],
            improvement_tips: vec!["Continue learning and exploring".to_string()],
            overall_assessment: truncate_chars(raw_reply, FALLBACK_ASSESSMENT_CHARS),
            next_steps: vec![
                "Review results".to_string(),
                "Consult with counselor".to_string(),
            ],
            degraded: true,
        }
    }
}

/// Generates a 15-question personalized aptitude test.
///
/// Returns the batch unmodified on success. Decode and cardinality
/// failures raise — there is no synthetic fallback question set.
pub async fn generate_questions(
    chat: &dyn ChatClient,
    education_level: EducationLevel,
    user_profile: Option<&UserProfile>,
) -> Result<Vec<AptitudeQuestion>, ServiceError> {
    let context = build_profile_context(education_level, user_profile);
    let prompt = QUESTION_GENERATION_PROMPT_TEMPLATE
        .replace("{context}", &context)
        .replace("{level}", education_level.as_str())
        .replace("{sections}", &education_level.sections().join(", "));
    let messages = [
        Message::system(question_generation_system()),
        Message::user(prompt),
    ];

    let reply = chat
        .send(&messages, GENERATION_TEMPERATURE, GENERATION_MAX_TOKENS)
        .await
        .map_err(|e| {
            error!("Error generating aptitude questions: {e}");
            ServiceError::QuestionGeneration(e.to_string())
        })?;

    let questions: Vec<AptitudeQuestion> = extract_json(&reply).map_err(|e| {
        error!("Failed to parse questions from model reply: {e}");
        ServiceError::QuestionGeneration(format!("could not parse questions from model output: {e}"))
    })?;

    if questions.len() != QUESTION_COUNT {
        error!(
            "Model returned {} questions instead of {}",
            questions.len(),
            QUESTION_COUNT
        );
        return Err(ServiceError::QuestionGeneration(format!(
            "expected {} questions, model returned {}",
            QUESTION_COUNT,
            questions.len()
        )));
    }

    Ok(questions)
}

/// Analyzes answered questions: deterministic local scoring first, then one
/// LLM call for the narrative guidance.
pub async fn analyze_results(
    chat: &dyn ChatClient,
    questions: &[AptitudeQuestion],
    answers: &AnswerSet,
    user_profile: Option<&UserProfile>,
) -> Result<ResultAnalysis, ServiceError> {
    let scores = score_by_section(questions, answers);
    let summary = performance_summary(&scores);

    let profile_context = match user_profile {
        Some(profile) => {
            let serialized = serde_json::to_string_pretty(profile).map_err(|e| {
                error!("Failed to serialize user profile: {e}");
                ServiceError::ResultsAnalysis(format!("failed to serialize user profile: {e}"))
            })?;
            format!("\nUser Profile: {serialized}")
        }
        None => String::new(),
    };

    let prompt = RESULT_ANALYSIS_PROMPT_TEMPLATE
        .replace("{performance_summary}", &summary)
        .replace("{profile_context}", &profile_context);
    let messages = [
        Message::system(result_analysis_system()),
        Message::user(prompt),
    ];

    let reply = chat
        .send(&messages, ANALYSIS_TEMPERATURE, ANALYSIS_MAX_TOKENS)
        .await
        .map_err(|e| {
            error!("Error analyzing aptitude results: {e}");
            ServiceError::ResultsAnalysis(e.to_string())
        })?;

    match extract_json::<ResultAnalysis>(&reply) {
        Ok(analysis) => Ok(analysis),
        Err(e) => {
            warn!("Failed to parse result analysis JSON, using minimal structure: {e}");
            Ok(ResultAnalysis::fallback(&reply))
        }
    }
}

/// Enumerates whatever profile fields are present into the prompt context.
fn build_profile_context(
    education_level: EducationLevel,
    user_profile: Option<&UserProfile>,
) -> String {
    let mut context = format!("Education Level: {education_level}");
    if let Some(profile) = user_profile {
        if !profile.interests.is_empty() {
            context.push_str(&format!("\nInterests: {}", profile.interests.join(", ")));
        }
        if let Some(goals) = profile.career_goals.as_deref() {
            if !goals.is_empty() {
                context.push_str(&format!("\nCareer Goals: {goals}"));
            }
        }
    }
    context
}
