use crate::llm_client::prompts::{DATA_GROUNDING_INSTRUCTION, STUDENT_TONE_INSTRUCTION};
use crate::models::career::Career;
use crate::models::profile::UserProfile;

pub const FALLBACK_REPLY: &str = "I'm sorry, I couldn't generate a response. Please try again.";

/// "User context: ..." line describing who the advisor is talking to.
pub fn user_context(profile: Option<&UserProfile>) -> String {
    let named = profile
        .filter(|p| !p.name.trim().is_empty())
        .map(|p| format!(" named {}", p.name.trim()))
        .unwrap_or_default();

    match profile.filter(|p| !p.year.is_empty()) {
        Some(p) => {
            let major = if p.major.is_empty() { "undergraduate" } else { &p.major };
            let interests = if p.interests.is_empty() {
                "exploring options".to_string()
            } else {
                p.interests.join(", ")
            };
            format!(
                "User context: A {} {major} student{named} interested in {interests}.",
                p.year
            )
        }
        None => format!("User context: An undergraduate student{named} exploring career options."),
    }
}

fn career_context(career: &Career) -> String {
    let data = serde_json::to_string_pretty(career).unwrap_or_else(|_| "{}".to_string());
    format!(
        "\n\nThe user is asking about this specific career from our database:\n{data}\n\n\
         Use this data to answer their question. {DATA_GROUNDING_INSTRUCTION}"
    )
}

pub fn build_system_prompt(profile: Option<&UserProfile>, about: Option<&Career>) -> String {
    let context = user_context(profile);
    let career = about.map(career_context).unwrap_or_default();
    format!(
        "You are PathIQ, an AI career advisor with real-time access to labor market data.
You help undergraduate students explore and compare post-graduation career paths.

{context}

Guidelines:
- ALWAYS use the provided tools to query the database before answering; do not make up numbers
- Cite data sources (BLS, O*NET) when sharing statistics
- Suggest 2-3 specific career paths when relevant
- Keep responses concise (100-150 words)
- {STUDENT_TONE_INSTRUCTION}
- If asked about paths not in the database, acknowledge limitations
- End with a follow-up question or actionable next step
- Format salary values with dollar signs and commas
- When comparing, highlight the key trade-off clearly{career}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_context_without_profile() {
        assert_eq!(
            user_context(None),
            "User context: An undergraduate student exploring career options."
        );
    }

    #[test]
    fn test_user_context_name_without_year() {
        let profile = UserProfile {
            name: "Ada".to_string(),
            major: "Physics".to_string(),
            ..Default::default()
        };
        assert_eq!(
            user_context(Some(&profile)),
            "User context: An undergraduate student named Ada exploring career options."
        );
    }

    #[test]
    fn test_user_context_full_profile() {
        let profile = UserProfile {
            name: "Ada".to_string(),
            year: "Junior".to_string(),
            major: "Physics".to_string(),
            interests: vec!["research".to_string(), "data".to_string()],
            ..Default::default()
        };
        assert_eq!(
            user_context(Some(&profile)),
            "User context: A Junior Physics student named Ada interested in research, data."
        );
    }

    #[test]
    fn test_user_context_defaults_major_and_interests() {
        let profile = UserProfile {
            year: "Senior".to_string(),
            ..Default::default()
        };
        assert_eq!(
            user_context(Some(&profile)),
            "User context: A Senior undergraduate student interested in exploring options."
        );
    }

    #[test]
    fn test_system_prompt_embeds_career_only_when_given() {
        let bare = build_system_prompt(None, None);
        assert!(bare.contains("You are PathIQ"));
        assert!(!bare.contains("specific career from our database"));

        let career = Career {
            id: "actuary".to_string(),
            title: "Actuary".to_string(),
            salary_median: Some(120_000),
            ..Default::default()
        };
        let prompt = build_system_prompt(None, Some(&career));
        assert!(prompt.contains("specific career from our database"));
        assert!(prompt.contains("\"title\": \"Actuary\""));
        assert!(prompt.ends_with(DATA_GROUNDING_INSTRUCTION));
    }
}
