//! AI adapter module. Implements AiPort for LLM integration.
//!
//! Provides the Gemini adapter and a mock adapter for offline runs.

pub mod gemini_adapter;
pub mod mock_adapter;
pub mod prompts;

pub use gemini_adapter::{GeminiAdapter, strip_code_fence};
pub use mock_adapter::MockAiAdapter;
