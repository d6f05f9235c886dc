//! local-search-agent - 화이트리스트 기반 웹 검색 에이전트
//!
//! 질문에 맞는 사이트 하나를 LLM으로 고르고, 본문을 스크래핑한 뒤
//! 그 내용만으로 답변을 합성합니다. "tell me more" 같은 후속 질문은
//! 직전 컨텍스트를 재사용합니다.

pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod scraper;

#[cfg(test)]
mod testing;

// Re-exports
pub use agent::{
    QueryOutcome, QueryResult, SearchAgent, SelectionError, SessionContext, SessionState,
    Whitelist, WhitelistError,
};
pub use config::{AgentConfig, DEFAULT_SITES};
pub use llm::{ChatClient, ChatError, ChatMessage, ChatOptions, ChatResponse, OllamaChat, Role};
pub use crate::scraper::{
    extract_text, normalize_whitespace, ExtractError, FetchError, HttpFetcher, PageFetcher,
    ScrapeError,
};
