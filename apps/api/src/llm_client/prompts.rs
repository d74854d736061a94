// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the pieces they have in common.

/// Keeps the model on the numbers we actually supply.
pub const DATA_GROUNDING_INSTRUCTION: &str = "\
    Cite specific numbers from the supplied data. \
    Do NOT invent salary, growth, or openings figures from general knowledge. \
    Acknowledge uncertainty where data is limited.";

/// Tone shared by every student-facing answer.
pub const STUDENT_TONE_INSTRUCTION: &str = "Be supportive and encouraging but data-driven.";
