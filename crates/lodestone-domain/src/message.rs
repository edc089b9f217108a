//! Conversation messages and chat-history folding

use serde::{Deserialize, Serialize};

/// Role of a conversation participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// End-user messages; the last one is the active query
    User,
    /// Model replies
    Assistant,
}

impl Role {
    /// Wire-format name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Who produced the message
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ConversationMessage {
    /// Create a message with an explicit role
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Split a conversation into the active query and a folded history string.
///
/// The active query is the content of the LAST user-role message. Every other
/// message is folded, in original order, into a `role: content` history string
/// (the located message itself is removed, not duplicated).
///
/// Returns `None` when the conversation holds no user-role message.
pub fn split_active_query(messages: &[ConversationMessage]) -> Option<(&str, String)> {
    let idx = messages.iter().rposition(|m| m.role == Role::User)?;

    let mut history = String::new();
    for (i, message) in messages.iter().enumerate() {
        if i == idx {
            continue;
        }
        history.push_str(message.role.as_str());
        history.push_str(": ");
        history.push_str(&message.content);
        history.push('\n');
    }

    Some((messages[idx].content.as_str(), history.trim_end().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_message_serde_lowercase_roles() {
        let message = ConversationMessage::user("hello");
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hello"}"#);

        let parsed: ConversationMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert_eq!(parsed.role, Role::Assistant);
        assert_eq!(parsed.content, "hi");
    }

    #[test]
    fn test_split_picks_last_user_message() {
        let conversation = vec![
            ConversationMessage::system("Be helpful."),
            ConversationMessage::user("first question"),
            ConversationMessage::assistant("first answer"),
            ConversationMessage::user("second question"),
        ];

        let (query, history) = split_active_query(&conversation).unwrap();
        assert_eq!(query, "second question");
        assert_eq!(
            history,
            "system: Be helpful.\nuser: first question\nassistant: first answer"
        );
    }

    #[test]
    fn test_split_removes_active_query_from_history() {
        let conversation = vec![ConversationMessage::user("only question")];

        let (query, history) = split_active_query(&conversation).unwrap();
        assert_eq!(query, "only question");
        assert!(history.is_empty());
    }

    #[test]
    fn test_split_without_user_message() {
        let conversation = vec![
            ConversationMessage::system("Be helpful."),
            ConversationMessage::assistant("ready"),
        ];
        assert!(split_active_query(&conversation).is_none());
    }

    #[test]
    fn test_split_empty_conversation() {
        assert!(split_active_query(&[]).is_none());
    }
}
