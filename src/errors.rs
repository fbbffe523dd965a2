use thiserror::Error;

/// Domain-level error type, one variant per public operation.
///
/// The payload carries the original cause's message so callers surface
/// "<operation> failed: <cause>" without losing the underlying reason.
///
/// Decode failures from the model never appear here for the two analysis
/// operations — those degrade to a placeholder result instead. Question
/// generation is the deliberate exception: a malformed batch would corrupt
/// downstream scoring, so it always raises.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Resume analysis failed: {0}")]
    ResumeAnalysis(String),

    #[error("Question generation failed: {0}")]
    QuestionGeneration(String),

    #[error("Results analysis failed: {0}")]
    ResultsAnalysis(String),
}
