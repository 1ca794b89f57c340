//! Agent proxy: forwards user queries to a remote agent endpoint and keeps
//! the resulting conversation in memory.
//!
//! ```no_run
//! use chat_relay::agent::{AgentSession, HttpAgentTransport, SubmitOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpAgentTransport::new("http://localhost:8000/api/v1/agent/ask_agent")?;
//! let session = AgentSession::new(transport);
//!
//! if let SubmitOutcome::Answered(turn) = session.submit("Which products sold best?").await {
//!     println!("{}", turn.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod console;
pub mod error;
pub mod session;
pub mod transport;
pub mod types;

pub use console::run_console;
pub use error::AgentError;
pub use session::{AgentSession, SubmitOutcome, NO_ANSWER_TEXT};
pub use transport::{AgentTransport, HttpAgentTransport, DEFAULT_AGENT_ENDPOINT};
pub use types::{AgentRequest, AgentResponse, Attachment, Notice, Role, Turn};
