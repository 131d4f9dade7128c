use crate::config::GenerationConfig;
use crate::session::types::{Message, MessageRole};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Model,
}

impl From<MessageRole> for TurnRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::Researcher => TurnRole::User,
            MessageRole::Persona => TurnRole::Model,
        }
    }
}

/// One conversation turn as sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }
}

impl From<&Message> for Turn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.into(),
            text: message.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    /// Oldest first; the newest researcher text is the last turn.
    pub turns: Vec<Turn>,
    pub system_instruction: String,
    pub sampling: GenerationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// `None` when the service answered without any text part.
    pub text: Option<String>,
}

impl GenerationResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}
