//! 에이전트 설정
//!
//! 우선순위: CLI 플래그 > 환경변수 > 기본값
//! - `OLLAMA_HOST`: Ollama 서버 주소
//! - `LOCAL_SEARCH_MODEL`: 사용할 모델 이름

use std::time::Duration;

/// 기본 모델
pub const DEFAULT_MODEL: &str = "gemma3:12b";

/// 기본 Ollama 서버 주소
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// 스크래핑 시 사용하는 브라우저 User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 페이지 가져오기 타임아웃
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// 모델 응답 타임아웃 (로컬 모델은 느릴 수 있음)
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(300);

const ENV_OLLAMA_HOST: &str = "OLLAMA_HOST";
const ENV_MODEL: &str = "LOCAL_SEARCH_MODEL";

/// 기본 사이트 목록 (인도 뉴스 섹션)
pub const DEFAULT_SITES: [&str; 8] = [
    "https://www.thehindu.com/news/national/",
    "https://timesofindia.indiatimes.com/india",
    "https://indianexpress.com/section/india/",
    "https://www.hindustantimes.com/india-news",
    "https://www.ndtv.com/india",
    "https://www.indiatoday.in/india",
    "https://www.firstpost.com/category/india",
    "https://thewire.in/category/politics/external-affairs",
];

/// 에이전트 설정
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// 모델 이름
    pub model: String,
    /// Ollama 서버 주소
    pub ollama_host: String,
    /// 페이지 가져오기 타임아웃
    pub fetch_timeout: Duration,
    /// 모델 응답 타임아웃
    pub chat_timeout: Duration,
    /// 스크래핑 User-Agent
    pub user_agent: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            fetch_timeout: FETCH_TIMEOUT,
            chat_timeout: CHAT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AgentConfig {
    /// 환경변수에서 설정 로드 (없거나 빈 값이면 기본값)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로 설정 로드
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = non_empty(ENV_OLLAMA_HOST) {
            tracing::debug!("Using Ollama host from {}", ENV_OLLAMA_HOST);
            config.ollama_host = normalize_host(&host);
        }

        if let Some(model) = non_empty(ENV_MODEL) {
            tracing::debug!("Using model from {}", ENV_MODEL);
            config.model = model;
        }

        config
    }

    /// CLI 플래그로 덮어쓰기
    pub fn with_overrides(mut self, model: Option<String>, host: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(host) = host {
            self.ollama_host = normalize_host(&host);
        }
        self
    }
}

/// `OLLAMA_HOST=127.0.0.1:11434` 처럼 스킴이 없으면 http를 붙임
fn normalize_host(host: &str) -> String {
    let host = host.trim();
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}
