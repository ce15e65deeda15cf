//! Telegram notification client
//!
//! Posts the rendered report through the Bot API `sendMessage` method.

use crate::domain::error::DomainError;
use crate::domain::ports::notifier::Notifier;
use crate::infrastructure::retry::{retry, RetryPolicy};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Request body for sendMessage
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

pub struct TelegramNotifier {
    bot_token: Option<String>,
    chat_id: Option<String>,
    policy: RetryPolicy,
    client: reqwest::Client,
}

impl TelegramNotifier {
    /// Blank values count as missing.
    pub fn new(bot_token: Option<String>, chat_id: Option<String>, policy: RetryPolicy) -> Self {
        Self {
            bot_token: bot_token.filter(|s| !s.trim().is_empty()),
            chat_id: chat_id.filter(|s| !s.trim().is_empty()),
            policy,
            client: reqwest::Client::builder()
                .timeout(policy.timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    fn credentials(&self) -> Result<(&str, &str), DomainError> {
        match (self.bot_token.as_deref(), self.chat_id.as_deref()) {
            (Some(token), Some(chat)) => Ok((token, chat)),
            _ => Err(DomainError::Configuration(
                "TELEGRAM_TOKEN or CHAT_ID not set".into(),
            )),
        }
    }

    async fn post(&self, token: &str, request: &SendMessageRequest<'_>) -> Result<(), DomainError> {
        let url = format!("{TELEGRAM_API}/bot{token}/sendMessage");

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            // reqwest errors embed the URL, which carries the token
            .map_err(|e| DomainError::Notification(e.without_url().to_string()))?;

        if resp.status().is_success() {
            debug!("Telegram message sent successfully");
            Ok(())
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            Err(DomainError::Notification(format!(
                "Telegram API error: {status} - {body}"
            )))
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    async fn send(&self, text: &str) -> Result<(), DomainError> {
        let (token, chat_id) = self.credentials()?;
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "Markdown",
            disable_web_page_preview: true,
        };
        retry(&self.policy, "telegram", || self.post(token, &request)).await
    }
}
