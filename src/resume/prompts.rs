// All LLM prompt constants for resume analysis.
// Reuses the cross-cutting JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_FRAGMENT;

pub const RESUME_ANALYSIS_SYSTEM: &str =
    "You are an expert career counselor and resume analyst. \
    Provide detailed, actionable feedback.";

/// Builds the full system prompt: persona plus JSON-only discipline.
pub fn resume_analysis_system() -> String {
    format!("{RESUME_ANALYSIS_SYSTEM} {JSON_ONLY_FRAGMENT}")
}

/// Resume analysis prompt template. Replace `{resume_text}` before sending.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and provide detailed insights in JSON format.

Resume Text:
{resume_text}

Provide your analysis as a JSON object with this EXACT schema (no extra fields):
{
    "extracted_skills": ["skill1", "skill2"],
    "technical_skills": ["technical skill1", "technical skill2"],
    "soft_skills": ["soft skill1", "soft skill2"],
    "career_paths": ["career path1", "career path2"],
    "strengths": ["strength1", "strength2"],
    "improvements": ["improvement1", "improvement2"],
    "ai_summary": "A comprehensive summary of the resume",
    "experience_level": "Entry/Mid/Senior level",
    "recommended_roles": ["role1", "role2"]
}

Focus on:
1. Extracting both technical and soft skills
2. Suggesting realistic career paths based on experience and skills
3. Highlighting what the candidate does well
4. Providing actionable improvements (not generic advice)
5. Recommending specific job roles that match the profile"#;
