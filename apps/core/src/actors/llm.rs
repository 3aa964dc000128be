use crate::actors::messages::{AppError, LlmMessage};
use crate::actors::traits::LlmActor;
use crate::config::LlmConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{error, info, instrument};

/// A handle to the `LlmActor`.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running LLM actor. It abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct LlmActorHandle {
    sender: mpsc::Sender<LlmMessage>,
    reply_timeout: Duration,
}

impl LlmActorHandle {
    /// Creates a new `LlmActor` talking to an OpenAI-compatible chat completions API
    /// and returns a handle to it.
    ///
    /// This will spawn the `LlmActorRunner` in a new Tokio task.
    pub fn new(config: LlmConfig) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        // Leave room for the HTTP timeout to fire first.
        let reply_timeout = config.request_timeout + Duration::from_secs(5);
        let actor = LlmActorRunner::new(receiver, config);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            reply_timeout,
        }
    }

    /// A convenience method for generating text with default parameters.
    pub async fn generate(&self, prompt: String) -> Result<String, AppError> {
        self.generate_with_params(prompt, None, None).await
    }
}

#[async_trait]
impl LlmActor for LlmActorHandle {
    async fn generate_with_params(
        &self,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
    ) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = LlmMessage::Generate {
            prompt,
            system_prompt,
            temperature,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(self.reply_timeout, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }
}

// --- Actor Runner (Internal Logic) ---
struct LlmActorRunner {
    receiver: mpsc::Receiver<LlmMessage>,
    client: Client,
    config: LlmConfig,
}

impl LlmActorRunner {
    fn new(receiver: mpsc::Receiver<LlmMessage>, config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                error!("Failed to build HTTP client, using defaults: {}", e);
                Client::new()
            });

        Self {
            receiver,
            client,
            config,
        }
    }

    async fn run(mut self) {
        info!(model = %self.config.model, "LlmActor started");

        if self.config.api_key.is_none() {
            info!("OPENAI_API_KEY is not set; therapeutic responses are disabled");
        }

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }

        info!("LlmActor stopped");
    }

    async fn handle_message(&mut self, msg: LlmMessage) {
        match msg {
            LlmMessage::Generate {
                prompt,
                system_prompt,
                temperature,
                responder,
            } => {
                let result = self
                    .generate_completion(prompt, system_prompt, temperature)
                    .await;
                if let Err(e) = &result {
                    error!("LLM completion failed: {}", e);
                }
                let _ = responder.send(result);
            }
        }
    }

    fn build_request(&self, api_key: &str, payload: &serde_json::Value) -> Result<reqwest::RequestBuilder, AppError> {
        let mut headers = HeaderMap::new();
        let auth_value: HeaderValue = format!("Bearer {}", api_key)
            .parse()
            .map_err(|_| AppError::Config("OPENAI_API_KEY contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .headers(headers)
            .json(payload))
    }

    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn generate_completion(
        &self,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
    ) -> Result<String, AppError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": prompt }));

        let payload = json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": temperature.unwrap_or(self.config.temperature),
            "max_tokens": self.config.max_tokens,
        });

        let res = self.build_request(api_key, &payload)?.send().await?;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Completion request failed with status {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = res.json().await?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::Upstream("Completion response had no content".to_string()))
    }
}
