//! Prompt store crate for promptdeck.
//!
//! This crate provides the client side of the hosted prompt store: a
//! trait-based abstraction over prompt retrieval plus the concrete
//! adapters behind it.
//!
//! # Adapters
//! - **HTTP**: hosted prompt-management service (default)
//! - **In-memory**: deterministic store for tests and offline use
//!
//! # Example
//! ```no_run
//! use promptdeck_store::{PromptStore, providers::HttpPromptStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = HttpPromptStore::new("https://us.cloud.langfuse.com", "pk-...", "sk-...")?;
//! let prompt = store.get_prompt("summarize_text", "prod").await?;
//! println!("{}", prompt.template);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{extract_placeholders, PromptStore, StoredPrompt};
pub use factory::create_store;
pub use providers::{HttpPromptStore, InMemoryPromptStore};
