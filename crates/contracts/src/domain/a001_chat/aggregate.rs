use serde::{Deserialize, Serialize};

/// Model offered by `GET /chat/models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatModel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub provider: String,
}

/// `GET /chat/models` wraps the list in an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatModelsResponse {
    pub models: Vec<ChatModel>,
}

/// Conversation bound to exactly one model for its whole life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    pub title: String,
    pub model: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionDto {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameSessionDto {
    pub title: String,
}

/// Роль автора сообщения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    #[serde(other)]
    Unknown,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::Unknown => "unknown",
        }
    }
}

/// File metadata embedded in a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAttachment {
    pub id: i64,
    pub filename: String,
    #[serde(default)]
    pub file_size: Option<i64>,
}

/// Сообщение сессии. Порядок задаёт сервер.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    #[serde(default)]
    pub session_id: Option<i64>,
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tokens: Option<i64>,
    #[serde(default)]
    pub attachments: Option<Vec<MessageAttachment>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }

    pub fn attachment_names(&self) -> Vec<&str> {
        self.attachments
            .iter()
            .flatten()
            .map(|a| a.filename.as_str())
            .collect()
    }
}

/// Body of `POST /chat/sessions/:id/messages`; file ids travel in the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageDto {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_with_attachments_and_unknown_role() {
        let msgs: Vec<ChatMessage> = serde_json::from_str(
            r#"[
                {"id":1,"session_id":4,"role":"user","content":"hi",
                 "attachments":[{"id":9,"filename":"notes.txt","file_size":120}]},
                {"id":2,"session_id":4,"role":"assistant","content":"hello","model":"gpt-4","tokens":42},
                {"id":3,"session_id":4,"role":"tool","content":"?"}
            ]"#,
        )
        .unwrap();
        assert!(msgs[0].is_user());
        assert_eq!(msgs[0].attachment_names(), vec!["notes.txt"]);
        assert_eq!(msgs[1].tokens, Some(42));
        assert!(msgs[1].attachment_names().is_empty());
        assert_eq!(msgs[2].role, ChatRole::Unknown);
    }

    #[test]
    fn create_session_omits_missing_title() {
        let dto = CreateSessionDto {
            model: "gpt-4".into(),
            title: None,
        };
        assert_eq!(
            serde_json::to_value(dto).unwrap(),
            serde_json::json!({ "model": "gpt-4" })
        );
    }
}
