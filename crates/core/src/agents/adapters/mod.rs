//! Agent adapter implementations.

mod claude_adapter;
mod gemini_adapter;
mod image_adapter;
pub mod mock_agent;
mod openai_adapter;
pub mod openai_http;

pub use claude_adapter::ClaudeAdapter;
pub use gemini_adapter::GeminiAdapter;
pub use image_adapter::ImageAdapter;
pub use mock_agent::MockAgent;
pub use openai_adapter::OpenAiAdapter;
pub use openai_http::OpenAiEndpoint;
