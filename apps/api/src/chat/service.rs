use tracing::{debug, info};

use crate::chat::prompts::FALLBACK_REPLY;
use crate::chat::tools::{tool_definitions, ToolExecutor};
use crate::errors::AppError;
use crate::llm_client::{ChatBackend, ChatMessage, CompletionRequest, CHAT_MODEL};

/// Upper bound on model → tools → model round trips per reply.
pub const MAX_TOOL_ROUNDS: usize = 3;

/// Runs the advisor conversation to a final text reply.
///
/// `messages` must already start with the system prompt. Each round appends the
/// assistant's tool-call message and one tool result per call, so later rounds
/// see the full history.
pub async fn run_chat(
    backend: &dyn ChatBackend,
    tools: &dyn ToolExecutor,
    mut messages: Vec<ChatMessage>,
) -> Result<String, AppError> {
    let definitions = tool_definitions();
    let request = |messages: Vec<ChatMessage>| {
        CompletionRequest::new(CHAT_MODEL, messages).with_tools(definitions.clone())
    };

    let mut reply = backend.complete(&request(messages.clone())).await?;
    let mut rounds = 0;

    while !reply.requested_tools().is_empty() && rounds < MAX_TOOL_ROUNDS {
        rounds += 1;
        let calls = reply.requested_tools().to_vec();
        debug!(round = rounds, calls = calls.len(), "Model requested tools");
        messages.push(reply);

        for call in calls {
            let result = if call.kind == "function" {
                tools
                    .execute(&call.function.name, &call.function.arguments)
                    .await?
            } else {
                serde_json::json!({ "error": format!("Unsupported tool type: {}", call.kind) })
            };
            messages.push(ChatMessage::tool_result(call.id, result.to_string()));
        }

        reply = backend.complete(&request(messages.clone())).await?;
    }

    info!(rounds, "Chat reply generated");
    Ok(reply
        .content
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::llm_client::{FunctionCall, Role, ToolCall};

    #[derive(Default)]
    struct RecordingTools {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ToolExecutor for RecordingTools {
        async fn execute(&self, name: &str, arguments: &str) -> Result<Value, AppError> {
            self.calls
                .lock()
                .unwrap()
                .push((name.to_string(), arguments.to_string()));
            Ok(json!([{ "id": "nurse", "salary_median": 81220 }]))
        }
    }

    fn tool_call_message(ids: &[&str]) -> ChatMessage {
        ChatMessage {
            role: Role::Assistant,
            content: None,
            tool_calls: Some(
                ids.iter()
                    .map(|id| ToolCall {
                        id: id.to_string(),
                        kind: "function".to_string(),
                        function: FunctionCall {
                            name: "searchCareers".to_string(),
                            arguments: r#"{"query":"nurse"}"#.to_string(),
                        },
                    })
                    .collect(),
            ),
            tool_call_id: None,
        }
    }

    fn base_messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("You are PathIQ"),
            ChatMessage::user("How much do nurses make?"),
        ]
    }

    #[tokio::test]
    async fn test_plain_reply_skips_tools() {
        let backend = ScriptedBackend::new(vec![ChatMessage::assistant("About $81k.")]);
        let tools = RecordingTools::default();

        let reply = run_chat(&backend, &tools, base_messages()).await.unwrap();

        assert_eq!(reply, "About $81k.");
        assert!(tools.calls.lock().unwrap().is_empty());
        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, CHAT_MODEL);
        assert_eq!(requests[0].tools.len(), 3);
        assert_eq!(requests[0].tool_choice, Some("auto"));
    }

    #[tokio::test]
    async fn test_tool_round_appends_call_and_results() {
        let backend = ScriptedBackend::new(vec![
            tool_call_message(&["call_1", "call_2"]),
            ChatMessage::assistant("Nurses earn a median of $81,220."),
        ]);
        let tools = RecordingTools::default();

        let reply = run_chat(&backend, &tools, base_messages()).await.unwrap();

        assert_eq!(reply, "Nurses earn a median of $81,220.");
        assert_eq!(tools.calls.lock().unwrap().len(), 2);

        let second = &backend.requests()[1].messages;
        assert_eq!(second.len(), 5);
        assert_eq!(second[2].requested_tools().len(), 2);
        assert_eq!(second[3].role, Role::Tool);
        assert_eq!(second[3].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(second[4].tool_call_id.as_deref(), Some("call_2"));
        assert!(second[4].content.as_deref().unwrap().contains("81220"));
    }

    #[tokio::test]
    async fn test_rounds_are_capped() {
        let backend = ScriptedBackend::new(vec![
            tool_call_message(&["a"]),
            tool_call_message(&["b"]),
            tool_call_message(&["c"]),
            tool_call_message(&["d"]),
        ]);
        let tools = RecordingTools::default();

        let reply = run_chat(&backend, &tools, base_messages()).await.unwrap();

        assert_eq!(reply, FALLBACK_REPLY);
        assert_eq!(tools.calls.lock().unwrap().len(), MAX_TOOL_ROUNDS);
        assert_eq!(backend.requests().len(), MAX_TOOL_ROUNDS + 1);
        // Every earlier round stays in the history.
        assert_eq!(backend.requests()[3].messages.len(), 2 + 2 * MAX_TOOL_ROUNDS);
    }

    #[tokio::test]
    async fn test_non_function_call_gets_error_result() {
        let mut message = tool_call_message(&["x"]);
        if let Some(calls) = message.tool_calls.as_mut() {
            calls[0].kind = "retrieval".to_string();
        }
        let backend = ScriptedBackend::new(vec![message, ChatMessage::assistant("Done.")]);
        let tools = RecordingTools::default();

        run_chat(&backend, &tools, base_messages()).await.unwrap();

        assert!(tools.calls.lock().unwrap().is_empty());
        let result = backend.requests()[1].messages[3].content.clone().unwrap();
        assert!(result.contains("Unsupported tool type: retrieval"));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let backend = ScriptedBackend::new(vec![]);
        let tools = RecordingTools::default();
        let err = run_chat(&backend, &tools, base_messages()).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
