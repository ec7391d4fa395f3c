//! Prospector LLM - chat-completion abstraction for optional text generation.
//!
//! Name suggestion and description enrichment both ask a chat model for a
//! short piece of text. Both are optional: callers hold an
//! `Option<Arc<dyn LlmProvider>>` resolved once at startup and fall back to
//! static values when it is `None` or a request fails.
//!
//! # Example
//!
//! ```rust,no_run
//! use prospector_llm::{CompletionRequest, LlmProvider, OpenAiProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OpenAiProvider::with_model("sk-...", "gpt-3.5-turbo")?;
//! let request = CompletionRequest::new("Generate 3 professional names")
//!     .with_max_tokens(100);
//! let response = provider.complete(request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod provider;
pub mod providers;

// Re-export commonly used types
pub use error::{LlmError, Result};
pub use provider::{CompletionRequest, CompletionResponse, LlmProvider, Message, Role, Usage};
pub use providers::OpenAiProvider;
