#![allow(dead_code)]

use async_trait::async_trait;
use chat_relay::agent::{AgentError, AgentResponse, AgentTransport};
use chat_relay::llm::{LlmError, LlmProvider};
use chat_relay::models::{ChatMessage, NewChatMessage, SendMessageRequest};
use chat_relay::relay::{BotIdentity, RelayService};
use chat_relay::store::{InMemoryMessageStore, MessageStore, StoreError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use testcontainers::{core::WaitFor, GenericImage, RunnableImage};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

// ============================================================================
// PostgreSQL container
// ============================================================================

pub const POSTGRES_IMAGE: &str = "postgres";
pub const POSTGRES_TAG: &str = "16-alpine";
pub const POSTGRES_PORT: u16 = 5432;
pub const POSTGRES_USER: &str = "postgres";
pub const POSTGRES_PASSWORD: &str = "chat_password";
pub const POSTGRES_DB: &str = "postgres";

/// Create a runnable PostgreSQL container
pub fn create_postgres_container() -> RunnableImage<GenericImage> {
    let image = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
        .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ));

    RunnableImage::from(image).with_tag(POSTGRES_TAG)
}

/// Build a connection string for the running container
pub fn build_connection_string(host: &str, port: u16) -> String {
    format!(
        "postgresql://{}:{}@{}:{}/{}",
        POSTGRES_USER, POSTGRES_PASSWORD, host, port, POSTGRES_DB
    )
}

// ============================================================================
// LLM double
// ============================================================================

/// What the scripted LLM does on every call
#[derive(Debug, Clone)]
pub enum LlmScript {
    Reply(String),
    Status(u16),
    Unreachable,
}

pub struct ScriptedLlm {
    script: LlmScript,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(script: LlmScript) -> Arc<Self> {
        Arc::new(Self {
            script,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(LlmScript::Reply(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn chat(&self, message: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(message.to_string());
        match &self.script {
            LlmScript::Reply(text) => Ok(text.clone()),
            LlmScript::Status(status) => Err(LlmError::HttpError {
                status: *status,
                body: "scripted failure".to_string(),
            }),
            LlmScript::Unreachable => Err(LlmError::TransportError(
                "connection refused".to_string(),
            )),
        }
    }
}

// ============================================================================
// Store double
// ============================================================================

/// In-memory store whose n-th insert (1-based) fails
pub struct FlakyStore {
    pub inner: InMemoryMessageStore,
    fail_on_insert: usize,
    inserts: AtomicUsize,
}

impl FlakyStore {
    pub fn failing_on(fail_on_insert: usize) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryMessageStore::new(),
            fail_on_insert,
            inserts: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl MessageStore for FlakyStore {
    async fn insert_message(&self, msg: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let n = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_on_insert {
            return Err(StoreError::ConnectionError("store unavailable".to_string()));
        }
        self.inner.insert_message(msg).await
    }

    async fn list_messages(&self) -> Result<Vec<ChatMessage>, StoreError> {
        self.inner.list_messages().await
    }
}

// ============================================================================
// Relay helpers
// ============================================================================

pub fn relay(store: Arc<dyn MessageStore>, llm: Arc<dyn LlmProvider>) -> RelayService {
    RelayService::new(store, llm, BotIdentity::default())
}

pub fn user_request(content: &str) -> SendMessageRequest {
    SendMessageRequest {
        name: Some("You".to_string()),
        avatar_url: Some("https://img.daisyui.com/images/profile/demo/anakeen@192.webp".to_string()),
        content: Some(content.to_string()),
        position: Some("end".to_string()),
    }
}

// ============================================================================
// Agent transport double
// ============================================================================

/// Transport that blocks every call until released
pub struct GatedTransport {
    pub calls: AtomicUsize,
    pub started: Notify,
    release: Notify,
    result: Result<Option<String>, u16>,
}

impl GatedTransport {
    /// Answers with `answer` once released
    pub fn answering(answer: Option<&str>) -> Arc<Self> {
        Self::with_result(Ok(answer.map(str::to_string)))
    }

    /// Fails with an HTTP status once released
    pub fn failing(status: u16) -> Arc<Self> {
        Self::with_result(Err(status))
    }

    fn with_result(result: Result<Option<String>, u16>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            started: Notify::new(),
            release: Notify::new(),
            result,
        })
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentTransport for GatedTransport {
    async fn ask(&self, _query: &str) -> Result<AgentResponse, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;

        match &self.result {
            Ok(answer) => Ok(AgentResponse {
                answer: answer.clone(),
                ..Default::default()
            }),
            Err(status) => Err(AgentError::Http {
                status: *status,
                reason: "Internal Server Error".to_string(),
            }),
        }
    }
}

// ============================================================================
// Raw HTTP stub
// ============================================================================

pub struct StubServer {
    pub base_url: String,
    /// Resolves to the raw request text once the response was written
    pub request: JoinHandle<String>,
}

/// Serve exactly one request with a fixed status and JSON body
pub async fn stub_http_once(status: u16, reason: &'static str, body: &str) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );

    let request = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let raw = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        raw
    });

    StubServer {
        base_url: format!("http://{}", addr),
        request,
    }
}

/// Accept one request and never answer it. The notify fires once the
/// request has been read.
pub async fn stub_http_hanging() -> (String, Arc<Notify>, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Notify::new());

    let signal = Arc::clone(&received);
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        signal.notify_one();
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        drop(socket);
    });

    (format!("http://{}", addr), received, handle)
}

/// An address nothing listens on
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
