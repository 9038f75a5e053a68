//! Support assistant backed by the Gemini `generateContent` endpoint.
//!
//! [`SupportBot`] is the raw client; [`SupportChat`] wraps it with the
//! transcript the widget shows and never surfaces an error to the shopper.

use std::{fmt, time::Duration};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use brandstore_config::{AppConfig, StoreConfig, SupportConfig};

const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum SupportError {
    #[error("missing Gemini API key")]
    ApiKeyMissing,
    #[error("support http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid support response: {0}")]
    Response(#[from] serde_json::Error),
    #[error("support reply contained no text")]
    EmptyReply,
}

/// Register the assistant speaks in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dialect {
    #[default]
    PortSaidi,
    Formal,
}

impl Dialect {
    pub fn toggled(self) -> Self {
        match self {
            Dialect::PortSaidi => Dialect::Formal,
            Dialect::Formal => Dialect::PortSaidi,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::PortSaidi => "PORT_SAIDI",
            Dialect::Formal => "FORMAL",
        }
    }

    pub fn input_hint(self) -> &'static str {
        match self {
            Dialect::PortSaidi => "قول يا زميلي عايز إيه..",
            Dialect::Formal => "كيف يمكنني مساعدتك؟",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }

    fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }
}

#[derive(Clone)]
struct ResolvedSupportConfig {
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl fmt::Debug for ResolvedSupportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSupportConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Stateless client for one question/answer exchange.
#[derive(Debug, Clone)]
pub struct SupportBot {
    client: Client,
    resolved: ResolvedSupportConfig,
    store: StoreConfig,
}

impl SupportBot {
    pub fn new(config: &AppConfig) -> Result<Self, SupportError> {
        Self::from_parts(&config.support, &config.store)
    }

    pub fn from_parts(support: &SupportConfig, store: &StoreConfig) -> Result<Self, SupportError> {
        let api_key = support
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty());

        match (&support.api_key, &api_key) {
            (Some(_), _) => debug!(source = "config", "support api key resolved"),
            (None, Some(_)) => debug!(source = "env", "support api key resolved"),
            (None, None) => warn!("no support api key configured, replies will fall back"),
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(support.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            resolved: ResolvedSupportConfig {
                api_key,
                base_url: support.base_url.trim_end_matches('/').to_string(),
                model: support.model.clone(),
            },
            store: store.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.resolved.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.resolved.model
    }

    pub fn support_phone(&self) -> &str {
        &self.store.support_phone
    }

    /// Persona and shop facts sent as the system instruction.
    pub fn system_instruction(&self, dialect: Dialect) -> String {
        let tone = match dialect {
            Dialect::PortSaidi => {
                "Speak as a warm, colloquial Port Said local. Call the customer \"ya zemeely\" \
                 and keep the mood friendly and encouraging."
            }
            Dialect::Formal => "Answer in polished Modern Standard Arabic with a professional tone.",
        };

        format!(
            "You are \"Doghry\", the support assistant of {name} ({address}).\n\
             The shop offers airtime recharge and mobile bills, Vodafone Cash and other \
             mobile wallets, InstaPay transfers, and mobile accessories at wholesale and retail prices.\n\
             Wallet balances may go negative to record debt owed to the shop.\n\
             The support line is {phone}.\n\
             {tone}\n\
             Requested dialect: {dialect}.",
            name = self.store.name,
            address = self.store.address,
            phone = self.store.support_phone,
        )
    }

    /// Sends one user message and returns the concatenated reply text.
    pub async fn reply(&self, dialect: Dialect, message: &str) -> Result<String, SupportError> {
        let api_key = self
            .resolved
            .api_key
            .as_deref()
            .ok_or(SupportError::ApiKeyMissing)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.resolved.base_url, self.resolved.model
        );
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(self.system_instruction(dialect)),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(message.to_string()),
                }],
            }],
        };

        debug!(model = %self.resolved.model, %dialect, "sending support request");

        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let raw = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&raw)?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(SupportError::EmptyReply);
        }

        Ok(text)
    }
}

/// The visible conversation in the support widget.
#[derive(Debug, Clone)]
pub struct SupportChat {
    bot: SupportBot,
    dialect: Dialect,
    transcript: Vec<ChatMessage>,
}

pub const GREETING: &str = "يا أهلاً بيك يا زميلي في براند ستور! أنا \"دغري\" أخوك البورسعيدي.. \
     عايز تشحن ولا مديونيتك مضايقاك؟ ولا أكلمك رسمي شوية؟";
pub const REPEAT_REPLY: &str = "معلش يا زميلي، الشبكة مريحة.. قول تاني كدة؟";

impl SupportChat {
    pub fn new(bot: SupportBot) -> Self {
        Self {
            bot,
            dialect: Dialect::default(),
            transcript: vec![ChatMessage::bot(GREETING)],
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn toggle_dialect(&mut self) -> Dialect {
        self.dialect = self.dialect.toggled();
        info!(dialect = %self.dialect, "support dialect changed");
        self.dialect
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn fallback_reply(&self) -> String {
        format!(
            "يا ساتر! حصلت مشكلة في الاتصال.. كلمنا فون أحسن على {}",
            self.bot.support_phone()
        )
    }

    /// Appends the user turn and the bot's answer. Blank input is ignored.
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage::user(message));

        let text = match self.bot.reply(self.dialect, message).await {
            Ok(text) => text,
            Err(SupportError::EmptyReply) => REPEAT_REPLY.to_string(),
            Err(error) => {
                warn!(%error, "support reply failed");
                self.fallback_reply()
            }
        };

        self.transcript.push(ChatMessage::bot(text));
        self.transcript.last()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}
