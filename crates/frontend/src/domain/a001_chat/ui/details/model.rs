//! Chat - Model (API functions)

use contracts::domain::a001_chat::aggregate::{
    ChatMessage, ChatModel, ChatModelsResponse, ChatSession, CreateSessionDto, RenameSessionDto,
    SendMessageDto,
};

use crate::shared::http::{self, ApiResult};

pub async fn fetch_models() -> ApiResult<Vec<ChatModel>> {
    let response: ChatModelsResponse = http::get_json("/chat/models").await?;
    Ok(response.models)
}

pub async fn fetch_sessions() -> ApiResult<Vec<ChatSession>> {
    http::get_json("/chat/sessions").await
}

pub async fn create_session(model: String, title: Option<String>) -> ApiResult<ChatSession> {
    http::post_json("/chat/sessions", &CreateSessionDto { model, title }).await
}

pub async fn rename_session(id: i64, title: String) -> ApiResult<ChatSession> {
    http::patch_json(&format!("/chat/sessions/{}", id), &RenameSessionDto { title }).await
}

pub async fn delete_session(id: i64) -> ApiResult<()> {
    http::delete(&format!("/chat/sessions/{}", id)).await
}

pub async fn fetch_messages(session_id: i64) -> ApiResult<Vec<ChatMessage>> {
    http::get_json(&format!("/chat/sessions/{}/messages", session_id)).await
}

/// The gateway answers with the assistant reply; callers reload the list anyway.
pub async fn send_message(
    session_id: i64,
    content: String,
    file_ids: &[i64],
) -> ApiResult<ChatMessage> {
    http::post_json(&messages_path(session_id, file_ids), &SendMessageDto { content }).await
}

/// `file_ids` goes in the query string as a comma-separated list.
fn messages_path(session_id: i64, file_ids: &[i64]) -> String {
    let base = format!("/chat/sessions/{}/messages", session_id);
    if file_ids.is_empty() {
        return base;
    }
    let joined = file_ids
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{}?file_ids={}", base, urlencoding::encode(&joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_path_without_files() {
        assert_eq!(messages_path(4, &[]), "/chat/sessions/4/messages");
    }

    #[test]
    fn messages_path_joins_file_ids() {
        assert_eq!(
            messages_path(4, &[7, 12]),
            "/chat/sessions/4/messages?file_ids=7%2C12"
        );
    }
}
