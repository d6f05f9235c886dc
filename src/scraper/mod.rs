//! 웹 스크래퍼 모듈 - URL 페이지 가져오기 + 본문 텍스트 추출
//!
//! - [`PageFetcher`]: 단일 HTTP GET으로 HTML 본문을 가져오는 인터페이스
//! - [`HttpFetcher`]: reqwest 기반 구현 (브라우저 User-Agent, 고정 타임아웃)
//! - [`extract`]: HTML → 정규화된 한 줄 텍스트

pub mod extract;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;

use crate::config::AgentConfig;

pub use extract::{extract_text, normalize_whitespace, ExtractError};

// ============================================================================
// Errors
// ============================================================================

/// 페이지 가져오기 실패
///
/// 호출자 입장에서는 모두 같은 실패로 취급되며, 구분은 로그에만 남습니다.
#[derive(Debug, Error)]
pub enum FetchError {
    /// 2xx가 아닌 HTTP 상태
    #[error("HTTP status indicates error: {status}")]
    Status { status: u16 },

    /// 요청 타임아웃
    #[error("request timed out")]
    Timeout,

    /// DNS, 연결 거부/리셋, 본문 읽기 실패 등
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err)
        }
    }
}

/// 가져오기 + 추출 실패
///
/// 오케스트레이터는 두 경우를 모두 "사용 가능한 컨텍스트 없음"으로 처리합니다.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

// ============================================================================
// PageFetcher Trait
// ============================================================================

/// 페이지 가져오기 인터페이스
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// URL에 GET 요청을 보내고 디코딩된 HTML 본문을 반환
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

// ============================================================================
// HttpFetcher
// ============================================================================

/// reqwest 기반 페이지 가져오기
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// User-Agent와 타임아웃을 지정하여 생성
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self { client })
    }

    /// 설정값으로 생성
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Self::new(&config.user_agent, config.fetch_timeout)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// 본문은 Content-Type의 charset으로 디코딩 (없으면 UTF-8)
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::info!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("Fetched {} chars from {}", body.chars().count(), url);

        Ok(body)
    }
}

// ============================================================================
// Scrape
// ============================================================================

/// URL을 가져와 본문 텍스트까지 추출
pub async fn scrape_text(fetcher: &dyn PageFetcher, url: &str) -> Result<String, ScrapeError> {
    let html = fetcher.fetch(url).await?;
    let text = extract_text(&html)?;
    tracing::debug!("Extracted {} chars from {}", text.len(), url);
    Ok(text)
}

// ============================================================================
// Tests
// ============================================================================
