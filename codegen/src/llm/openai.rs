use std::{borrow::Cow, time::Duration};

use crate::{ChatModel, LLM};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

pub struct OpenAi<'a> {
    api_key: &'a str,
    model: ChatModel,
    base_url: Cow<'a, str>,
    system_prompt: Option<Cow<'a, str>>,
    client: reqwest::blocking::Client,
}

impl<'a> OpenAi<'a> {
    pub fn new(
        api_key: &'a str,
        model: ChatModel,
        system_prompt: Option<Cow<'a, str>>,
    ) -> Result<Self, OpenAiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            api_key,
            model,
            base_url: Cow::Borrowed(DEFAULT_BASE_URL),
            system_prompt,
            client,
        })
    }

    /// Point the client at another OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<Cow<'a, str>>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn messages(&self, message: &str) -> Vec<json_model::Message> {
        use json_model::Message;

        let Some(system_prompt) = self.system_prompt.as_deref() else {
            return vec![Message::new("user", message)];
        };

        match self.model.instruction_role() {
            Some(role) => vec![
                Message::new(role, system_prompt),
                Message::new("user", message),
            ],
            None => vec![Message::new("user", format!("{system_prompt}\n\n{message}"))],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("OpenAI API error {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("OpenAI returned no message content")]
    EmptyResponse,
}

impl LLM for OpenAi<'_> {
    type Error = OpenAiError;

    #[tracing::instrument(skip_all, fields(model = %self.model))]
    fn chat(&mut self, message: &str) -> Result<String, Self::Error> {
        use json_model::*;

        let req_body = ChatCompletionRequest {
            model: self.model.as_str(),
            messages: self.messages(message),
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        tracing::info!(%url, "Requesting completion");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(self.api_key)
            .json(&req_body)
            .send()?;
        let status = resp.status();
        let body = resp.text()?;

        if !status.is_success() {
            // prefer the provider's own message, the raw body otherwise
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|err| err.error.message)
                .unwrap_or(body);
            return Err(OpenAiError::Api { status, message });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(OpenAiError::EmptyResponse)
    }
}

mod json_model {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize)]
    pub struct Message {
        pub role: &'static str,
        pub content: String,
    }

    impl Message {
        pub fn new(role: &'static str, content: impl Into<String>) -> Self {
            Self {
                role,
                content: content.into(),
            }
        }
    }

    #[derive(Serialize)]
    pub struct ChatCompletionRequest<'a> {
        pub model: &'a str,
        pub messages: Vec<Message>,
    }

    #[derive(Deserialize)]
    pub struct ChatCompletionResponse {
        #[serde(default)]
        pub choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    pub struct Choice {
        pub message: ResponseMessage,
    }

    #[derive(Deserialize)]
    pub struct ResponseMessage {
        pub content: Option<String>,
    }

    #[derive(Deserialize)]
    pub struct ErrorResponse {
        pub error: ErrorDetail,
    }

    #[derive(Deserialize)]
    pub struct ErrorDetail {
        pub message: String,
    }
}
