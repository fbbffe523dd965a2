// Cross-cutting prompt fragments.
// Each operation keeps its own prompts.rs alongside it; this file holds
// only the pieces shared by all of them.

/// System prompt fragment appended to every operation's persona line.
/// The fence-extraction helper still tolerates models that ignore it.
pub const JSON_ONLY_FRAGMENT: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
