//! Prompt resolution for promptdeck.
//!
//! This crate provides the resolver that turns a prompt name, a label,
//! and a variable map into a compiled prompt string:
//! - Retrieval through an injected [`PromptStore`](promptdeck_store::PromptStore)
//! - Handlebars template rendering with fail-fast missing-variable checks
//!
//! # Example
//! ```no_run
//! use promptdeck_resolver::PromptResolver;
//! use promptdeck_store::create_store;
//! use std::collections::HashMap;
//!
//! # async fn example(config: promptdeck_core::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = PromptResolver::new(create_store(&config)?, "prod");
//!
//! let mut vars = HashMap::new();
//! vars.insert("text".to_string(), "An article worth summarizing.".to_string());
//!
//! let compiled = resolver.resolve("summarize_text", &vars).await?;
//! println!("{}", compiled);
//! # Ok(())
//! # }
//! ```

pub mod resolver;
pub mod types;

// Re-export main types
pub use resolver::PromptResolver;
pub use types::{CompiledPrompt, CompiledPromptMetadata};
