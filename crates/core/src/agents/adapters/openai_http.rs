//! Blocking HTTP client for OpenAI-compatible endpoints.

use crate::agents::base::AgentError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Where OpenAI-compatible requests go and how they authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiEndpoint {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl OpenAiEndpoint {
    /// Read `OPENAI_BASE_URL` and `OPENAI_API_KEY` from the environment.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// POST `body` to `path` on a blocking thread and return the JSON reply.
    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, AgentError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| AgentError::NotAvailable("OPENAI_API_KEY is not set".to_string()))?;
        let url = self.url(path);

        tokio::task::spawn_blocking(move || {
            let response = ureq::post(&url)
                .set("Content-Type", "application/json")
                .set("Authorization", &format!("Bearer {api_key}"))
                .send_json(body)
                .map_err(|e| match e {
                    ureq::Error::Status(code, response) => {
                        let detail = response.into_string().unwrap_or_default();
                        AgentError::ApiError(format!("{url} returned {code}: {detail}"))
                    }
                    ureq::Error::Transport(t) => {
                        AgentError::ExecutionError(format!("request to {url} failed: {t}"))
                    }
                })?;

            response
                .into_json::<serde_json::Value>()
                .map_err(|e| AgentError::StreamParseError(format!("invalid JSON reply: {e}")))
        })
        .await
        .map_err(|e| AgentError::ExecutionError(format!("HTTP task failed: {e}")))?
    }
}

/// Pull `error.message` out of an API reply, if present.
pub fn api_error_message(reply: &serde_json::Value) -> Option<String> {
    reply
        .get("error")
        .map(|error| {
            error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string()
        })
}
