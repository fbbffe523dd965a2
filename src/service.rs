//! Service facade — one configured instance, constructed at startup and
//! shared by reference everywhere an analysis is needed.
//!
//! Construct with [`AnalysisService::from_env`] in production, or inject
//! any [`ChatClient`] via [`AnalysisService::new`] to run the full parsing
//! and fallback logic against a scripted transport.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::aptitude::{self, AnswerSet, AptitudeQuestion, EducationLevel, ResultAnalysis, UserProfile};
use crate::config::Config;
use crate::errors::ServiceError;
use crate::llm_client::{ChatClient, HttpChatClient};
use crate::resume::{self, ResumeAnalysis};

/// Entry point for all three analysis operations.
///
/// Read-only after construction; cheap to clone and safe to share across
/// tasks. Imposes no rate limiting of its own.
#[derive(Clone)]
pub struct AnalysisService {
    chat: Arc<dyn ChatClient>,
}

impl AnalysisService {
    pub fn new(chat: Arc<dyn ChatClient>) -> Self {
        Self { chat }
    }

    /// Builds the service from environment configuration. Fails before any
    /// network interaction if the required secret is absent.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        info!("Chat client initialized (model: {})", config.model);
        Ok(Self::new(Arc::new(HttpChatClient::new(&config))))
    }

    /// Analyzes resume text. Always returns an analysis on a successful
    /// model call — malformed model output degrades rather than failing.
    pub async fn analyze_resume(&self, resume_text: &str) -> Result<ResumeAnalysis, ServiceError> {
        resume::analyze_resume(self.chat.as_ref(), resume_text).await
    }

    /// Generates a personalized 15-question aptitude test. All-or-nothing:
    /// either a valid batch or an error.
    pub async fn generate_aptitude_questions(
        &self,
        education_level: EducationLevel,
        user_profile: Option<&UserProfile>,
    ) -> Result<Vec<AptitudeQuestion>, ServiceError> {
        aptitude::generate_questions(self.chat.as_ref(), education_level, user_profile).await
    }

    /// Scores answered questions locally, then asks the model for narrative
    /// guidance. Malformed model output degrades rather than failing.
    pub async fn analyze_aptitude_results(
        &self,
        questions: &[AptitudeQuestion],
        answers: &AnswerSet,
        user_profile: Option<&UserProfile>,
    ) -> Result<ResultAnalysis, ServiceError> {
        aptitude::analyze_results(self.chat.as_ref(), questions, answers, user_profile).await
    }
}
