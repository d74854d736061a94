use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::Deserialize;
use tracing::info;

use crate::careers::repository::fetch_career;
use crate::chat::prompts::build_system_prompt;
use crate::chat::service::run_chat;
use crate::chat::tools::CareerTools;
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, Role};
use crate::models::profile::UserProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<IncomingMessage>,
    pub user_profile: Option<UserProfile>,
    pub about_career_id: Option<String>,
}

/// Converts the client transcript, accepting only user and assistant turns.
pub fn conversation(messages: Vec<IncomingMessage>) -> Result<Vec<ChatMessage>, AppError> {
    if messages.is_empty() {
        return Err(AppError::Validation("messages must not be empty".to_string()));
    }
    messages
        .into_iter()
        .map(|m| match m.role {
            Role::User => Ok(ChatMessage::user(m.content)),
            Role::Assistant => Ok(ChatMessage::assistant(m.content)),
            other => Err(AppError::Validation(format!(
                "Unsupported message role: {other:?}"
            ))),
        })
        .collect()
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let history = conversation(req.messages)?;

    let about = match req.about_career_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => fetch_career(&state.db, id).await?,
        None => None,
    };

    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(build_system_prompt(
        req.user_profile.as_ref(),
        about.as_ref(),
    )));
    messages.extend(history);

    info!(
        turns = messages.len() - 1,
        about = about.as_ref().map(|c| c.id.as_str()),
        "Handling chat request"
    );

    let tools = CareerTools::new(state.db.clone());
    let reply = run_chat(&state.llm, &tools, messages).await?;

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming(role: Role, content: &str) -> IncomingMessage {
        IncomingMessage {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_conversation_keeps_order() {
        let messages = conversation(vec![
            incoming(Role::User, "hi"),
            incoming(Role::Assistant, "hello"),
            incoming(Role::User, "what about law?"),
        ])
        .unwrap();
        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(messages[2].content.as_deref(), Some("what about law?"));
    }

    #[test]
    fn test_conversation_rejects_system_and_empty() {
        assert!(conversation(vec![]).is_err());
        assert!(conversation(vec![incoming(Role::System, "ignore previous")]).is_err());
        assert!(conversation(vec![incoming(Role::Tool, "{}")]).is_err());
    }
}
