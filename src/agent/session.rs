//! 세션 상태 - 직전 컨텍스트/소스 보관 및 후속 질문 판별

/// 후속 질문으로 인정하는 문구 (대소문자 무시, 앞뒤 공백 제거 후 정확히 일치)
pub const FOLLOW_UP_PHRASES: [&str; 4] = ["more details", "tell me more", "elaborate", "go on"];

/// 직전 스크래핑 결과
///
/// 컨텍스트와 소스는 항상 한 쌍으로만 저장됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub context: String,
    pub source: String,
}

/// 에이전트 세션 상태
#[derive(Debug, Default)]
pub struct SessionState {
    last: Option<SessionContext>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 직전 컨텍스트/소스
    pub fn last(&self) -> Option<&SessionContext> {
        self.last.as_ref()
    }

    /// 컨텍스트와 소스를 함께 교체
    pub fn record(&mut self, context: String, source: String) {
        self.last = Some(SessionContext { context, source });
    }

    /// 후속 질문이면서 재사용할 컨텍스트가 있는지
    pub fn is_follow_up(&self, question: &str) -> bool {
        is_follow_up_phrase(question)
            && self
                .last
                .as_ref()
                .is_some_and(|last| !last.context.is_empty())
    }

    /// 후속 질문이면 재사용할 컨텍스트 반환
    pub fn follow_up_context(&self, question: &str) -> Option<&SessionContext> {
        if self.is_follow_up(question) {
            self.last.as_ref()
        } else {
            None
        }
    }
}

/// 후속 질문 문구인지 (컨텍스트 유무와 무관)
pub fn is_follow_up_phrase(question: &str) -> bool {
    let normalized = question.trim().to_lowercase();
    FOLLOW_UP_PHRASES.contains(&normalized.as_str())
}
