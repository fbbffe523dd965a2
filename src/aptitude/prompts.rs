// All LLM prompt constants for aptitude question generation and result
// analysis. Reuses the cross-cutting JSON-only fragment.

use crate::llm_client::prompts::JSON_ONLY_FRAGMENT;

pub const QUESTION_GENERATION_SYSTEM: &str =
    "You are an expert educational psychologist and test designer. \
    Create engaging, fair, and insightful questions.";

pub fn question_generation_system() -> String {
    format!("{QUESTION_GENERATION_SYSTEM} {JSON_ONLY_FRAGMENT}")
}

/// Question generation prompt template.
/// Replace: `{context}`, `{level}`, `{sections}`
pub const QUESTION_GENERATION_PROMPT_TEMPLATE: &str = r#"Generate 15 aptitude test questions personalized for a student.

Student Profile:
{context}

Requirements:
1. Create exactly 5 questions for each of these three sections: {sections}
2. Questions should assess analytical thinking, problem-solving, and domain aptitude
3. Difficulty should be appropriate for {level} level
4. Questions should be slightly personalized based on the student's interests and goals
5. Each question must have exactly 4 options with one correct answer

Return ONLY a JSON array with this EXACT per-item structure:
[
    {
        "id": 1,
        "section": "one of: {sections}",
        "question": "Question text here?",
        "options": ["Option A", "Option B", "Option C", "Option D"],
        "correct_option": 0,
        "difficulty": "Easy",
        "why_this_question": "Brief explanation of why this question is relevant"
    }
]

Make sure:
- IDs are sequential from 1 to 15
- "difficulty" is exactly one of "Easy", "Medium", "Hard"
- Mix of difficulty levels: 5 easy, 7 medium, 3 hard
- Questions are clear and unambiguous
- Options are all plausible but with one clearly correct answer"#;

pub const RESULT_ANALYSIS_SYSTEM: &str =
    "You are a compassionate career counselor focused on helping students \
    discover their potential.";

pub fn result_analysis_system() -> String {
    format!("{RESULT_ANALYSIS_SYSTEM} {JSON_ONLY_FRAGMENT}")
}

/// Result analysis prompt template.
/// Replace: `{performance_summary}`, `{profile_context}`
pub const RESULT_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following aptitude test results and provide personalized career guidance.

Performance Summary:
{performance_summary}
{profile_context}

Provide analysis as a JSON object with this EXACT schema:
{
    "strengths": ["specific strength 1", "specific strength 2"],
    "weaknesses": ["specific weakness 1", "specific weakness 2"],
    "suggested_careers": ["career 1", "career 2"],
    "improvement_tips": ["actionable tip 1", "actionable tip 2"],
    "overall_assessment": "A comprehensive assessment paragraph",
    "next_steps": ["step 1", "step 2"]
}

Focus on:
1. Identifying genuine strengths based on performance
2. Suggesting realistic careers aligned with strong areas
3. Providing specific, actionable improvement tips
4. Encouraging and supportive overall assessment"#;
