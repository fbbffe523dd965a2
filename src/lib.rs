//! Lodestar — AI career-guidance analysis service layer.
//!
//! Formats prompts, calls a remote chat-completion endpoint, and parses the
//! model's textual reply into structured results for three operations:
//! resume analysis, aptitude question generation, and aptitude result
//! analysis. This crate is a client only: no listener, no persistence.
//!
//! The entry point is [`AnalysisService`], constructed once at application
//! startup (from the environment via [`AnalysisService::from_env`], or with
//! an injected [`ChatClient`] for tests) and shared across callers.

pub mod aptitude;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod resume;
pub mod service;

pub use aptitude::{
    AnswerSet, AptitudeQuestion, Difficulty, EducationLevel, ResultAnalysis, UserProfile,
};
pub use aptitude::scoring::SectionScore;
pub use config::Config;
pub use errors::ServiceError;
pub use llm_client::{ChatClient, HttpChatClient, LlmError, Message};
pub use resume::ResumeAnalysis;
pub use service::AnalysisService;
