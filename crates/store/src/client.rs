//! Prompt store abstraction and stored prompt type.
//!
//! This module defines the core abstraction for retrieving prompt
//! templates from a store, keyed by name and deployment label.

use once_cell::sync::Lazy;
use promptdeck_core::AppResult;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Matches simple `{{placeholder}}` expressions. Block helpers and
/// partials (`{{#if}}`, `{{> partial}}`) are intentionally not matched.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}").expect("placeholder regex is valid")
});

/// A prompt template as returned by the store.
///
/// The store resolves `(name, label)` to a concrete version externally;
/// this type carries the result of that resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPrompt {
    /// Prompt name, unique within the store
    pub name: String,

    /// Concrete version the label resolved to
    pub version: u32,

    /// Raw template text with `{{placeholder}}` syntax
    pub template: String,

    /// Deployment labels attached to this version
    #[serde(default)]
    pub labels: Vec<String>,
}

impl StoredPrompt {
    /// Create a stored prompt with no labels.
    pub fn new(name: impl Into<String>, version: u32, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version,
            template: template.into(),
            labels: Vec::new(),
        }
    }

    /// Attach deployment labels.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// The set of placeholder names this template declares.
    pub fn variables(&self) -> BTreeSet<String> {
        extract_placeholders(&self.template)
    }
}

/// Extract the placeholder names declared by a template.
///
/// Only simple `{{name}}` expressions count; dotted paths are kept
/// whole (`{{user.name}}` declares `user.name`).
pub fn extract_placeholders(template: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Trait for prompt stores.
///
/// Abstracts the backing store (hosted HTTP service, in-memory fake) so
/// the resolver and its tests can inject either. Implementations perform
/// no retries; a failed call surfaces directly to the caller.
#[async_trait::async_trait]
pub trait PromptStore: Send + Sync {
    /// Get the store adapter name (e.g., "http", "memory").
    fn store_name(&self) -> &str;

    /// Fetch the prompt deployed under `label` for `name`.
    ///
    /// # Errors
    /// `NotFound` when no prompt matches the pair, `Upstream` when the
    /// store cannot be reached or returns an unusable payload.
    async fn get_prompt(&self, name: &str, label: &str) -> AppResult<StoredPrompt>;
}
