use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::Config;
use crate::services::telegram::{BotApiResponse, SendError, SendMessageRequest};

/// Delivers text to a single fixed recipient
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), SendError>;
}

/// Telegram Bot API notifier bound to one chat
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(api_url: String, token: String, chat_id: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_url,
            token,
            chat_id,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.telegram_api_url.clone(),
            config.telegram_token.clone(),
            config.telegram_chat_id.clone(),
            config.request_timeout,
        )
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), SendError> {
        tracing::info!(chat_id = %self.chat_id, "Sending Telegram message: {}", message);

        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text: message,
            })
            .send()
            .await
            // reqwest errors embed the URL, which carries the bot token
            .map_err(|e| SendError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SendError::Transport(e.without_url().to_string()))?;

        match serde_json::from_str::<BotApiResponse>(&text) {
            Ok(body) if status.is_success() && body.ok => {}
            Ok(body) => {
                return Err(SendError::Rejected {
                    status: status.as_u16(),
                    description: body
                        .description
                        .unwrap_or_else(|| "no description".to_string()),
                })
            }
            Err(e) if status.is_success() => return Err(SendError::Decode(e.to_string())),
            Err(_) => {
                return Err(SendError::Rejected {
                    status: status.as_u16(),
                    description: text,
                })
            }
        }

        tracing::info!(chat_id = %self.chat_id, "Telegram message sent: {}", message);
        Ok(())
    }
}
