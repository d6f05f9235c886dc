//! 답변 합성 - 주어진 컨텍스트만으로 답하도록 모델에 요청

use crate::llm::{ChatClient, ChatMessage, ChatOptions};

/// 요약에 약간의 자유도를 줌
pub const SYNTHESIS_TEMPERATURE: f32 = 0.1;

/// 모델 호출 실패 시 답변 대신 반환하는 문구
pub const SYNTHESIS_FALLBACK: &str = "An error occurred while generating the answer.";

/// 컨텍스트를 그대로 포함한 시스템 프롬프트
pub fn build_synthesis_prompt(context: &str) -> String {
    format!(
        r#"
You are a factual information extraction engine. Your task is to answer the user's question based *only* on the provided context.
Follow these rules strictly:
1. DO NOT use any of your own knowledge.
2. ONLY use information present in the 'CONTEXT' section.
3. If the user asks a vague question like "tell me more", provide a more detailed summary of the context.
4. Extract key facts and direct quotes from the text to support your summary.

--- CONTEXT ---
{}
--- END CONTEXT ---
"#,
        context
    )
}

/// 질문과 컨텍스트로 답변 생성
///
/// 실패해도 에러를 올리지 않고 [`SYNTHESIS_FALLBACK`]을 답변으로 돌려줍니다.
pub async fn synthesize_answer(
    client: &dyn ChatClient,
    model: &str,
    question: &str,
    context: &str,
) -> String {
    let messages = [
        ChatMessage::system(build_synthesis_prompt(context)),
        ChatMessage::user(question),
    ];

    match client
        .chat(
            model,
            &messages,
            ChatOptions::with_temperature(SYNTHESIS_TEMPERATURE),
        )
        .await
    {
        Ok(response) => response.message.content,
        Err(e) => {
            tracing::warn!("Answer synthesis failed: {}", e);
            SYNTHESIS_FALLBACK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatError;
    use crate::testing::ScriptedChat;

    #[test]
    fn test_prompt_embeds_context_verbatim() {
        let context = "Line with  two spaces and {braces}";
        let prompt = build_synthesis_prompt(context);
        assert!(prompt.contains("--- CONTEXT ---\nLine with  two spaces and {braces}\n--- END CONTEXT ---"));
        assert!(prompt.contains("DO NOT use any of your own knowledge."));
    }

    #[tokio::test]
    async fn test_synthesize_returns_model_reply() {
        let chat = ScriptedChat::new();
        chat.push_reply("Summary: breaking news today.");

        let answer = synthesize_answer(&chat, "llama3", "What's new?", "Breaking news today").await;
        assert_eq!(answer, "Summary: breaking news today.");

        let requests = chat.requests();
        assert_eq!(requests.len(), 1);
        assert!((requests[0].temperature - 0.1).abs() < f32::EPSILON);
        assert!(requests[0].messages[0].content.contains("Breaking news today"));
        assert_eq!(requests[0].messages[1], ChatMessage::user("What's new?"));
    }

    #[tokio::test]
    async fn test_synthesize_failure_falls_back() {
        let chat = ScriptedChat::new();
        chat.push_error(ChatError::Http {
            status: 500,
            body: "internal".to_string(),
        });

        let answer = synthesize_answer(&chat, "llama3", "q", "context").await;
        assert_eq!(answer, SYNTHESIS_FALLBACK);
    }
}
