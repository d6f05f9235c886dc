//! LLM 모듈 - 채팅 완성(chat completion) 인터페이스
//!
//! 소스 선택과 답변 합성이 공통으로 사용하는 채팅 클라이언트 트레이트입니다.
//!
//! ## 사용법
//! ```rust,ignore
//! let client = OllamaChat::new("http://localhost:11434")?;
//! let messages = [ChatMessage::system("..."), ChatMessage::user("question")];
//! let response = client.chat("gemma3:12b", &messages, ChatOptions::with_temperature(0.0)).await?;
//! ```

pub mod ollama;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ollama::OllamaChat;

// ============================================================================
// Message Types
// ============================================================================

/// 메시지 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// 채팅 메시지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// 샘플링 옵션
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChatOptions {
    pub temperature: f32,
}

impl ChatOptions {
    pub fn with_temperature(temperature: f32) -> Self {
        Self { temperature }
    }
}

/// 채팅 응답
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
}

// ============================================================================
// Errors
// ============================================================================

/// 채팅 요청 실패
#[derive(Debug, Error)]
pub enum ChatError {
    /// 연결 실패, 타임아웃 등
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// 2xx가 아닌 HTTP 상태 (에러 본문 파싱 불가)
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// 백엔드가 보고한 에러 메시지
    #[error("model API error: {message}")]
    Api { message: String },

    /// 응답 JSON 파싱 실패
    #[error("failed to parse chat response: {0}")]
    Parse(#[source] serde_json::Error),
}

// ============================================================================
// ChatClient Trait
// ============================================================================

/// 채팅 완성 클라이언트 트레이트
///
/// 실패는 [`ChatError`]로 반환되며, 호출 측에서 반드시 처리합니다.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// 메시지 목록을 보내고 모델의 응답 메시지를 받음
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<ChatResponse, ChatError>;

    /// 클라이언트(백엔드) 이름
    fn name(&self) -> &str;
}
