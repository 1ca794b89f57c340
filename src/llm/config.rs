//! LLM workspace connection settings

/// Settings for an AnythingLLM-style workspace chat endpoint
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the LLM server, without trailing slash
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// Workspace slug the chat is sent to
    pub workspace_id: String,
    /// Session the workspace keeps history under
    pub session_id: String,
    /// Chat mode ("query" answers from workspace documents only)
    pub mode: String,
}

impl LlmConfig {
    /// Create a new configuration with the default session and mode
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        workspace_id: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            workspace_id: workspace_id.into(),
            session_id: "dev".to_string(),
            mode: "query".to_string(),
        }
    }

    /// Set the session id
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Set the chat mode
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Workspace chat endpoint
    pub fn chat_url(&self) -> String {
        format!(
            "{}/api/v1/workspace/{}/chat",
            self.base_url, self.workspace_id
        )
    }
}
