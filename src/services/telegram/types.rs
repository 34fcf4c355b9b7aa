use serde::{Deserialize, Serialize};

/// Bot API `sendMessage` request body
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
}

/// Envelope every Bot API method answers with
#[derive(Debug, Clone, Deserialize)]
pub struct BotApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SendError {
    #[error("Telegram request failed: {0}")]
    Transport(String),
    #[error("Telegram rejected message (status {status}): {description}")]
    Rejected { status: u16, description: String },
    #[error("Telegram returned malformed body: {0}")]
    Decode(String),
}
