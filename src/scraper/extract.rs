//! HTML 본문 텍스트 추출
//!
//! 비콘텐츠 태그(script, nav 등)를 서브트리째 제거한 뒤
//! 콘텐츠 태그(p, h1-h6, li, article, div)의 텍스트를 문서 순서대로 모읍니다.
//!
//! `div`/`article` 같은 컨테이너와 그 안의 `p`, `li`가 모두 수집되므로
//! 같은 텍스트가 중복으로 나올 수 있습니다. 링크/보일러플레이트 잡음보다
//! 중복이 낫다고 보고 그대로 유지합니다.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// 추출 전에 통째로 제거할 태그
pub const TAGS_TO_REMOVE: [&str; 6] = ["script", "style", "nav", "footer", "header", "aside"];

/// 텍스트를 수집할 태그
pub const TAGS_TO_SCRAPE: [&str; 10] = [
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "article", "div",
];

/// 텍스트 추출 실패
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 태그 셀렉터 생성 실패
    #[error("invalid tag selector: {0}")]
    Selector(String),

    /// 추출 결과가 비어 있음
    #[error("no text content found")]
    Empty,
}

/// HTML에서 정규화된 한 줄 텍스트 추출
///
/// 입력은 이미 문자셋에 맞게 디코딩된 문자열입니다 ([`super::HttpFetcher`] 참고).
/// 결과가 비어 있으면 [`ExtractError::Empty`]를 반환합니다.
pub fn extract_text(html: &str) -> Result<String, ExtractError> {
    let mut document = Html::parse_document(html);

    let remove_selector = tag_selector(&TAGS_TO_REMOVE)?;
    let scrape_selector = tag_selector(&TAGS_TO_SCRAPE)?;

    // 1. 비콘텐츠 노드 분리 (서브트리 포함)
    let removed: Vec<_> = document
        .root_element()
        .select(&remove_selector)
        .map(|element| element.id())
        .collect();

    for id in removed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    // 2. 콘텐츠 태그별 텍스트 수집
    let chunks: Vec<String> = document
        .root_element()
        .select(&scrape_selector)
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
        .collect();

    // 3. 공백 정리
    let text = normalize_whitespace(&chunks.join(" "));

    if text.is_empty() {
        return Err(ExtractError::Empty);
    }

    Ok(text)
}

/// 연속 공백(개행, 탭 포함)을 공백 하나로 합치고 양끝을 자릅니다.
pub fn normalize_whitespace(text: &str) -> String {
    if let Ok(re) = regex::Regex::new(r"\s+") {
        re.replace_all(text, " ").trim().to_string()
    } else {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// 요소 하위 텍스트 노드를 각각 trim 후 공백으로 연결
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn tag_selector(tags: &[&str]) -> Result<Selector, ExtractError> {
    Selector::parse(&tags.join(", ")).map_err(|e| ExtractError::Selector(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
