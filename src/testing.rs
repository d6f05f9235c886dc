//! 테스트 전용 더블 및 로컬 HTTP 서버 헬퍼

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::llm::{ChatClient, ChatError, ChatMessage, ChatOptions, ChatResponse};
use crate::scraper::{FetchError, PageFetcher};

// ============================================================================
// ScriptedChat
// ============================================================================

/// 기록된 채팅 요청
#[derive(Debug, Clone)]
pub struct RecordedChat {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// 미리 정한 응답을 순서대로 돌려주는 채팅 클라이언트
#[derive(Clone, Default)]
pub struct ScriptedChat {
    replies: Arc<Mutex<VecDeque<Result<String, ChatError>>>>,
    requests: Arc<Mutex<Vec<RecordedChat>>>,
}

impl ScriptedChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: &str) {
        self.replies
            .lock()
            .expect("lock poisoned")
            .push_back(Ok(reply.to_string()));
    }

    pub fn push_error(&self, error: ChatError) {
        self.replies
            .lock()
            .expect("lock poisoned")
            .push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<RecordedChat> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<ChatResponse, ChatError> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push(RecordedChat {
                model: model.to_string(),
                messages: messages.to_vec(),
                temperature: options.temperature,
            });

        let next = self.replies.lock().expect("lock poisoned").pop_front();
        match next {
            Some(Ok(content)) => Ok(ChatResponse {
                message: ChatMessage::assistant(content),
            }),
            Some(Err(error)) => Err(error),
            None => Err(ChatError::Api {
                message: "no scripted reply left".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ============================================================================
// ScriptedFetcher
// ============================================================================

/// 미리 정한 페이지/에러를 순서대로 돌려주는 페처
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    pages: Arc<Mutex<VecDeque<Result<String, FetchError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, html: &str) {
        self.pages
            .lock()
            .expect("lock poisoned")
            .push_back(Ok(html.to_string()));
    }

    pub fn push_error(&self, error: FetchError) {
        self.pages
            .lock()
            .expect("lock poisoned")
            .push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().expect("lock poisoned").push(url.to_string());
        self.pages
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or(Err(FetchError::Status { status: 404 }))
    }
}

// ============================================================================
// Local HTTP server
// ============================================================================

/// 요청 하나에 고정 응답을 보내는 서버를 띄우고 (URL, 받은 요청 원문)을 반환
pub async fn serve_once(
    status: u16,
    content_type: &str,
    body: impl AsRef<[u8]>,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    let (tx, rx) = oneshot::channel();

    let body = body.as_ref();
    let mut response = format!(
        "HTTP/1.1 {} Test\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body);

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let request = read_request(&mut socket).await;
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
            let _ = tx.send(request);
        }
    });

    (format!("http://{}/", addr), rx)
}

/// 연결은 받지만 응답하지 않는 서버 (타임아웃 테스트용)
pub async fn serve_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            drop(socket);
        }
    });

    format!("http://{}/", addr)
}

/// 아무도 listen하지 않는 주소
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    drop(listener);
    format!("http://{}/", addr)
}

/// 헤더 + Content-Length 만큼의 본문을 읽음
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&data).into_owned()
}
