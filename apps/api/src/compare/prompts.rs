use crate::compare::ComparisonSnapshot;
use crate::llm_client::prompts::{DATA_GROUNDING_INSTRUCTION, STUDENT_TONE_INSTRUCTION};

pub const ANALYSIS_SYSTEM: &str = "You are a career decision analyst with expertise in \
    labor markets and data analysis. Provide concise, data-driven analysis.";

pub const ANALYSIS_MAX_TOKENS: u32 = 600;

pub const ANALYSIS_FALLBACK: &str = "Unable to generate analysis.";

pub fn build_analysis_prompt(student: &str, snapshots: &[ComparisonSnapshot]) -> String {
    let data = serde_json::to_string_pretty(snapshots).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Analyze the trade-offs between the following post-graduation paths for {student}.

Path data:
{data}

Provide:
1. A 2-3 sentence executive summary of the key trade-off
2. Dimension-by-dimension analysis: compensation trajectory, time investment, market outlook, stability, growth potential
3. A personalized recommendation based on the student's profile
4. One non-obvious insight

Constraints:
- {DATA_GROUNDING_INSTRUCTION}
- Consider opportunity cost and net present value
- {STUDENT_TONE_INSTRUCTION}
- 200-250 words max"
    )
}
