//! 화이트리스트 - 선택 가능한 URL 목록
//!
//! 순서는 생성 시 고정되며, 모델에게는 1부터 번호를 매겨 보여줍니다.
//! 번호가 곧 선택 결과이므로 절대 재정렬하지 않습니다.

use thiserror::Error;

/// 화이트리스트 생성 실패
#[derive(Debug, Error)]
pub enum WhitelistError {
    #[error("whitelist must contain at least one URL")]
    Empty,

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// 비어 있지 않은, 순서가 고정된 URL 목록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    urls: Vec<String>,
}

impl Whitelist {
    /// URL 목록 검증 후 생성
    ///
    /// 원본 문자열을 그대로 보관합니다 (정규화하지 않음).
    pub fn new<I, S>(urls: I) -> Result<Self, WhitelistError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();

        if urls.is_empty() {
            return Err(WhitelistError::Empty);
        }

        for url in &urls {
            url::Url::parse(url).map_err(|source| WhitelistError::InvalidUrl {
                url: url.clone(),
                source,
            })?;
        }

        Ok(Self { urls })
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// 항상 false (생성 시 검증됨)
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// 0부터 시작하는 인덱스로 조회
    pub fn get(&self, index: usize) -> Option<&str> {
        self.urls.get(index).map(String::as_str)
    }

    /// `1. url` 형식의 번호 목록
    pub fn numbered_listing(&self) -> String {
        self.urls
            .iter()
            .enumerate()
            .map(|(i, url)| format!("{}. {}", i + 1, url))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
