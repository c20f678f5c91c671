//! Discord REST client over reqwest. Implements [`Bot`] for outbound messages
//! (create with reply reference, edit, multipart attachment upload) and
//! [`HistoryProvider`] for `GET /channels/{id}/messages` pagination. Wire
//! structs are converted to core types at this boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ebot_core::{Author, Bot, ChatMessage, EbotError, HistoryProvider, MessageHandle, Result};
use reqwest::multipart;
use serde::{Deserialize, Serialize};

use crate::config::DiscordConfig;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// REST client holding the process-lifetime session (HTTP client + token).
pub struct DiscordRestClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// The bot's own identity, fetched at login.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: String,
    username: String,
    #[serde(default)]
    bot: bool,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    id: String,
    channel_id: String,
    author: ApiUser,
    content: String,
    timestamp: DateTime<Utc>,
}

impl ApiMessage {
    fn into_core(self) -> ChatMessage {
        ChatMessage {
            id: self.id,
            author: Author {
                id: self.author.id,
                username: self.author.username,
                is_bot: self.author.bot,
            },
            content: self.content,
            created_at: self.timestamp,
            channel_id: self.channel_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
    message_reference: MessageReference<'a>,
}

#[derive(Debug, Serialize)]
struct MessageReference<'a> {
    message_id: &'a str,
}

#[derive(Debug, Serialize)]
struct EditMessage<'a> {
    content: &'a str,
}

/// Error body Discord returns on failures; `message` carries wordings like
/// "Missing Permissions" and "Missing Access" that the dispatcher classifies.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl DiscordRestClient {
    pub fn new(config: &DiscordConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| EbotError::Config(format!("Failed to create HTTP client: {}", e)))?;
        let base_url = config
            .api_url
            .clone()
            .unwrap_or_else(|| DISCORD_API_BASE.to_string());
        Ok(Self {
            client,
            base_url,
            token: config.bot_token.clone(),
        })
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token)
    }

    /// Fetches the bot's own identity; succeeding here is the login check.
    pub async fn current_user(&self) -> Result<CurrentUser> {
        let response = self
            .client
            .get(format!("{}/users/@me", self.base_url))
            .header("Authorization", self.auth())
            .send()
            .await
            .map_err(|e| EbotError::Bot(e.to_string()))?;
        let response = check(response).await?;
        response
            .json::<CurrentUser>()
            .await
            .map_err(|e| EbotError::Bot(e.to_string()))
    }

    async fn create_message(
        &self,
        channel_id: &str,
        body: &CreateMessage<'_>,
    ) -> Result<ApiMessage> {
        let response = self
            .client
            .post(format!("{}/channels/{}/messages", self.base_url, channel_id))
            .header("Authorization", self.auth())
            .json(body)
            .send()
            .await
            .map_err(|e| EbotError::Bot(e.to_string()))?;
        let response = check(response).await?;
        response
            .json::<ApiMessage>()
            .await
            .map_err(|e| EbotError::Bot(e.to_string()))
    }
}

/// Maps non-success responses to [`EbotError::Bot`] carrying Discord's own
/// error wording when the body parses, or the raw body otherwise.
async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let cause = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.message)
        .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));
    Err(EbotError::Bot(cause))
}

#[async_trait]
impl Bot for DiscordRestClient {
    async fn reply_to(&self, message: &ChatMessage, text: &str) -> Result<MessageHandle> {
        let sent = self
            .create_message(
                &message.channel_id,
                &CreateMessage {
                    content: text,
                    message_reference: MessageReference {
                        message_id: &message.id,
                    },
                },
            )
            .await?;
        Ok(MessageHandle {
            channel_id: sent.channel_id,
            message_id: sent.id,
        })
    }

    async fn edit_message(&self, handle: &MessageHandle, text: &str) -> Result<()> {
        let response = self
            .client
            .patch(format!(
                "{}/channels/{}/messages/{}",
                self.base_url, handle.channel_id, handle.message_id
            ))
            .header("Authorization", self.auth())
            .json(&EditMessage { content: text })
            .send()
            .await
            .map_err(|e| EbotError::Bot(e.to_string()))?;
        check(response).await?;
        Ok(())
    }

    async fn send_file(&self, channel_id: &str, filename: &str, bytes: Vec<u8>) -> Result<()> {
        let payload = serde_json::json!({
            "attachments": [{ "id": 0, "filename": filename }]
        });
        let form = multipart::Form::new()
            .text("payload_json", payload.to_string())
            .part(
                "files[0]",
                multipart::Part::bytes(bytes)
                    .file_name(filename.to_string())
                    .mime_str("application/json")
                    .map_err(|e| EbotError::Bot(e.to_string()))?,
            );
        let response = self
            .client
            .post(format!("{}/channels/{}/messages", self.base_url, channel_id))
            .header("Authorization", self.auth())
            .multipart(form)
            .send()
            .await
            .map_err(|e| EbotError::Bot(e.to_string()))?;
        check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryProvider for DiscordRestClient {
    async fn fetch_page(
        &self,
        channel_id: &str,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<ChatMessage>> {
        let mut request = self
            .client
            .get(format!("{}/channels/{}/messages", self.base_url, channel_id))
            .header("Authorization", self.auth())
            .query(&[("limit", limit.to_string())]);
        if let Some(before) = before {
            request = request.query(&[("before", before)]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| EbotError::Bot(e.to_string()))?;
        let response = check(response).await?;
        let page = response
            .json::<Vec<ApiMessage>>()
            .await
            .map_err(|e| EbotError::Bot(e.to_string()))?;
        Ok(page.into_iter().map(ApiMessage::into_core).collect())
    }
}
