//! Ollama 채팅 클라이언트
//!
//! ref: https://github.com/ollama/ollama/blob/main/docs/api.md#generate-a-chat-completion

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AgentConfig;

use super::{ChatClient, ChatError, ChatMessage, ChatOptions, ChatResponse};

/// Ollama `/api/chat` 클라이언트
#[derive(Debug)]
pub struct OllamaChat {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaChat {
    /// 기본 타임아웃으로 생성
    ///
    /// # Arguments
    /// * `base_url` - Ollama 서버 주소 (예: `http://localhost:11434`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let config = AgentConfig {
            ollama_host: base_url.into(),
            ..AgentConfig::default()
        };
        Self::from_config(&config)
    }

    /// 설정값으로 생성 (호스트 URL 검증 포함)
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let base_url = config.ollama_host.trim_end_matches('/').to_string();

        url::Url::parse(&base_url)
            .with_context(|| format!("Invalid Ollama host: {}", base_url))?;

        let client = reqwest::Client::builder()
            .timeout(config.chat_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// 서버 주소 반환
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// `/api/chat` 요청 본문
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: ChatOptions,
}

/// Ollama 에러 응답
#[derive(Debug, Deserialize)]
struct OllamaErrorBody {
    error: String,
}

#[async_trait]
impl ChatClient for OllamaChat {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<ChatResponse, ChatError> {
        let request = ChatRequest {
            model,
            messages,
            stream: false,
            options,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(ChatError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(ChatError::Network)?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<OllamaErrorBody>(&body) {
                return Err(ChatError::Api {
                    message: error.error,
                });
            }
            return Err(ChatError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(ChatError::Parse)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

// ============================================================================
// Tests
// ============================================================================
