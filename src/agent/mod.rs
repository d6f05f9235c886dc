//! 검색 에이전트 - 질문 하나를 끝까지 처리하는 오케스트레이터
//!
//! 흐름: 후속 질문 판별 → (소스 선택 → 스크래핑 → 세션 갱신) → 답변 합성
//!
//! 하위 단계의 실패는 모두 각 단계 경계에서 `Result`로 돌아오며,
//! [`SearchAgent::query`]는 항상 [`QueryResult`]를 반환합니다.

mod selector;
mod session;
mod synthesizer;
mod whitelist;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::AgentConfig;
use crate::llm::{ChatClient, OllamaChat};
use crate::scraper::{scrape_text, HttpFetcher, PageFetcher};

pub use selector::{
    build_selection_prompt, parse_selection, select_source, SelectionError, SELECTION_TEMPERATURE,
};
pub use session::{is_follow_up_phrase, SessionContext, SessionState, FOLLOW_UP_PHRASES};
pub use synthesizer::{
    build_synthesis_prompt, synthesize_answer, SYNTHESIS_FALLBACK, SYNTHESIS_TEMPERATURE,
};
pub use whitelist::{Whitelist, WhitelistError};

/// 소스를 고르지 못했을 때의 답변
pub const NO_SOURCE_ANSWER: &str =
    "I could not determine a relevant source from the whitelist to answer your question.";

/// 스크래핑 실패 시 답변
pub fn scrape_failed_answer(source: &str) -> String {
    format!(
        "I was unable to retrieve or process the content from {}.",
        source
    )
}

// ============================================================================
// Query Result
// ============================================================================

/// 질의가 끝난 경로
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOutcome {
    /// 새 소스를 선택/스크래핑하여 답변
    Answered,
    /// 직전 컨텍스트를 재사용하여 답변
    FollowUp,
    /// 소스 선택 실패
    NoSource,
    /// 가져오기/추출 실패
    ScrapeFailed,
}

/// 질의 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    /// 답변 (실패 시 안내 문구)
    pub answer: String,
    /// 사용한(또는 시도한) 소스 URL
    pub source: Option<String>,
    /// 처리 경로
    pub outcome: QueryOutcome,
}

// ============================================================================
// SearchAgent
// ============================================================================

/// 화이트리스트 기반 검색 에이전트
///
/// 질의 간 상태는 [`SessionState`] 하나뿐이며, `query`가 `&mut self`를 받으므로
/// 한 에이전트에서 질의가 겹칠 수 없습니다.
pub struct SearchAgent {
    whitelist: Whitelist,
    model: String,
    chat: Box<dyn ChatClient>,
    fetcher: Box<dyn PageFetcher>,
    session: SessionState,
}

impl SearchAgent {
    /// 협력 객체를 직접 지정하여 생성
    pub fn new(
        whitelist: Whitelist,
        model: impl Into<String>,
        chat: Box<dyn ChatClient>,
        fetcher: Box<dyn PageFetcher>,
    ) -> Self {
        let model = model.into();
        tracing::info!(
            "Agent initialized with model '{}' ({}) and {} whitelisted sites",
            model,
            chat.name(),
            whitelist.len()
        );

        Self {
            whitelist,
            model,
            chat,
            fetcher,
            session: SessionState::new(),
        }
    }

    /// 설정값으로 Ollama + HTTP 페처 구성
    pub fn from_config(whitelist: Whitelist, config: &AgentConfig) -> Result<Self> {
        let chat = OllamaChat::from_config(config).context("Ollama 클라이언트 생성 실패")?;
        let fetcher = HttpFetcher::from_config(config).context("HttpFetcher 생성 실패")?;

        Ok(Self::new(
            whitelist,
            config.model.clone(),
            Box::new(chat),
            Box::new(fetcher),
        ))
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// 질문 처리
    pub async fn query(&mut self, question: &str) -> QueryResult {
        let reused = self.session.follow_up_context(question).cloned();

        let (context, source, outcome) = match reused {
            Some(last) => {
                tracing::info!("Detected follow-up question, reusing last context");
                (last.context, last.source, QueryOutcome::FollowUp)
            }
            None => {
                let source = match select_source(
                    self.chat.as_ref(),
                    &self.model,
                    question,
                    &self.whitelist,
                )
                .await
                {
                    Ok(source) => source,
                    Err(e) => {
                        tracing::warn!("Source selection failed: {}", e);
                        return QueryResult {
                            answer: NO_SOURCE_ANSWER.to_string(),
                            source: None,
                            outcome: QueryOutcome::NoSource,
                        };
                    }
                };
                tracing::info!("Source selected: {}", source);

                let context = match scrape_text(self.fetcher.as_ref(), &source).await {
                    Ok(context) => context,
                    Err(e) => {
                        tracing::warn!("Scraping {} failed: {}", source, e);
                        return QueryResult {
                            answer: scrape_failed_answer(&source),
                            source: Some(source),
                            outcome: QueryOutcome::ScrapeFailed,
                        };
                    }
                };

                self.session.record(context.clone(), source.clone());
                (context, source, QueryOutcome::Answered)
            }
        };

        let answer = synthesize_answer(self.chat.as_ref(), &self.model, question, &context).await;

        QueryResult {
            answer,
            source: Some(source),
            outcome,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
