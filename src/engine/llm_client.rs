use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::model::settings::LlmSettings;

/// Anything that can turn a prompt into completion text.
/// Failures are plain errors; callers decide on a fallback.
pub trait ChatClient {
    fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChatMessageResponse,
}

#[derive(Deserialize)]
pub struct ChatMessageResponse {
    pub content: String,
}

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct HttpChatClient {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
}

impl HttpChatClient {
    /// `model` overrides the model named in `settings`.
    pub fn from_settings(settings: &LlmSettings, model: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()
            .context("failed to build HTTP client")?;

        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            model: model.unwrap_or(&settings.model).to_string(),
            temperature: settings.temperature,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn test_connection(&self) -> Result<String> {
        let url = models_url(&self.endpoint);
        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp: serde_json::Value = request
            .send()
            .with_context(|| format!("cannot reach {}", url))?
            .error_for_status()?
            .json()?;

        Ok(format!(
            "Connected ({} models available)",
            resp["data"].as_array().map(|a| a.len()).unwrap_or(0)
        ))
    }
}

impl ChatClient for HttpChatClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let req = ChatCompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
        };

        let mut request = self.client.post(&self.endpoint).json(&req);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()?
            .error_for_status()?
            .json::<ChatCompletionResponse>()?;

        resp.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("completion returned no choices"))
    }
}

fn models_url(endpoint: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    let base = base.strip_suffix("/chat/completions").unwrap_or(base);
    format!("{}/models", base)
}
