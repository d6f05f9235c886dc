//! 소스 선택 - 모델에게 화이트리스트 번호 하나를 고르게 함
//!
//! 모델이 숫자만 답한다고 믿지 않습니다. 응답에서 처음 나오는 10진 숫자열을
//! 1부터 시작하는 번호로 해석합니다. 퍼지 매칭이나 재시도는 하지 않습니다.

use regex::Regex;
use thiserror::Error;

use crate::llm::{ChatClient, ChatError, ChatMessage, ChatOptions};

use super::whitelist::Whitelist;

/// 선택은 결정적이어야 함
pub const SELECTION_TEMPERATURE: f32 = 0.0;

/// 소스 선택 실패
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("source selection request failed: {0}")]
    Model(#[from] ChatError),

    #[error("model did not return a number: {reply:?}")]
    NoIndex { reply: String },

    #[error("model returned an invalid number: {choice} (available: 1-{len})")]
    OutOfRange { choice: String, len: usize },
}

/// 소스 선택 시스템 프롬프트
pub fn build_selection_prompt(whitelist: &Whitelist) -> String {
    format!(
        r#"
You are an expert at selecting the most relevant online resource.
Your task is to choose the single best option from the following list to answer the user's query.
Respond with ONLY the number of the most appropriate option. Do not provide any other text or explanation.

Here is the list of available websites:
{}
"#,
        whitelist.numbered_listing()
    )
}

/// 모델 응답에서 0부터 시작하는 인덱스 파싱
///
/// 숫자열은 유니코드 10진 숫자(`\d`)로 찾으므로 `٣`, `３` 같은 숫자도 인정합니다.
///
/// # Arguments
/// * `reply` - 모델 응답 원문
/// * `len` - 화이트리스트 길이
pub fn parse_selection(reply: &str, len: usize) -> Result<usize, SelectionError> {
    let reply = reply.trim();
    let no_index = || SelectionError::NoIndex {
        reply: reply.to_string(),
    };

    let digit = Regex::new(r"^\d$").map_err(|_| no_index())?;
    let digits = Regex::new(r"\d+")
        .map_err(|_| no_index())?
        .find(reply)
        .map(|m| m.as_str())
        .ok_or_else(no_index)?;

    decimal_value(&digit, digits)
        .and_then(|number| number.checked_sub(1))
        .filter(|&index| index < len)
        .ok_or_else(|| SelectionError::OutOfRange {
            choice: digits.to_string(),
            len,
        })
}

/// 유니코드 10진 숫자열의 값 (usize 범위를 넘으면 None)
fn decimal_value(digit: &Regex, digits: &str) -> Option<usize> {
    digits.chars().try_fold(0usize, |acc, ch| {
        let value = digit_value(digit, ch)?;
        acc.checked_mul(10)?.checked_add(value as usize)
    })
}

/// 10진 숫자 하나의 값
///
/// 유니코드 Nd 문자는 0부터 9까지 연속된 코드 포인트 블록으로 배치되므로,
/// 연속된 숫자 구간의 시작점부터의 거리를 10으로 나눈 나머지가 값입니다.
fn digit_value(digit: &Regex, ch: char) -> Option<u32> {
    if let Some(value) = ch.to_digit(10) {
        return Some(value);
    }

    let is_digit = |code: u32| {
        char::from_u32(code).is_some_and(|c| digit.is_match(c.encode_utf8(&mut [0u8; 4])))
    };

    let code = ch as u32;
    if !is_digit(code) {
        return None;
    }

    let mut start = code;
    while start > 0 && is_digit(start - 1) {
        start -= 1;
    }

    Some((code - start) % 10)
}

/// 질문에 가장 적합한 화이트리스트 URL 선택
pub async fn select_source(
    client: &dyn ChatClient,
    model: &str,
    question: &str,
    whitelist: &Whitelist,
) -> Result<String, SelectionError> {
    let messages = [
        ChatMessage::system(build_selection_prompt(whitelist)),
        ChatMessage::user(question),
    ];

    let response = client
        .chat(
            model,
            &messages,
            ChatOptions::with_temperature(SELECTION_TEMPERATURE),
        )
        .await?;

    tracing::debug!("Selection reply: {:?}", response.message.content);

    let index = parse_selection(&response.message.content, whitelist.len())?;

    whitelist
        .get(index)
        .map(str::to_string)
        .ok_or_else(|| SelectionError::OutOfRange {
            choice: (index + 1).to_string(),
            len: whitelist.len(),
        })
}

// ============================================================================
// Tests
// ============================================================================
