//! In-memory prompt store.
//!
//! Deterministic store used by resolver tests and offline demos. Holds
//! prompts keyed by `(name, label)`; a prompt is registered once per
//! label it carries.

use crate::client::{PromptStore, StoredPrompt};
use promptdeck_core::{AppError, AppResult};
use std::collections::HashMap;

/// In-memory store for testing and development.
#[derive(Debug, Default)]
pub struct InMemoryPromptStore {
    prompts: HashMap<(String, String), StoredPrompt>,
}

impl InMemoryPromptStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prompt under every label it carries.
    pub fn insert(&mut self, prompt: StoredPrompt) {
        for label in &prompt.labels {
            self.prompts
                .insert((prompt.name.clone(), label.clone()), prompt.clone());
        }
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_prompt(mut self, prompt: StoredPrompt) -> Self {
        self.insert(prompt);
        self
    }

    /// Number of registered `(name, label)` entries.
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Whether the store holds no prompts.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

#[async_trait::async_trait]
impl PromptStore for InMemoryPromptStore {
    fn store_name(&self) -> &str {
        "memory"
    }

    async fn get_prompt(&self, name: &str, label: &str) -> AppResult<StoredPrompt> {
        self.prompts
            .get(&(name.to_string(), label.to_string()))
            .cloned()
            .ok_or_else(|| AppError::NotFound {
                name: name.to_string(),
                label: label.to_string(),
            })
    }
}
