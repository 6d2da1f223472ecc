//! Compiled prompt types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fully compiled prompt.
///
/// The text is never partially substituted: construction only happens
/// after every declared placeholder received a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledPrompt {
    /// Final text with all placeholders replaced
    pub text: String,

    /// Metadata about the compilation
    pub metadata: CompiledPromptMetadata,
}

/// Metadata about a compiled prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledPromptMetadata {
    /// Source prompt name
    #[serde(rename = "promptName")]
    pub prompt_name: String,

    /// Concrete version the label resolved to
    pub version: u32,

    /// Label the prompt was fetched under
    pub label: String,

    /// Template variables that were substituted
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: HashMap<String, String>,
}

impl CompiledPrompt {
    /// Create a new compiled prompt.
    pub fn new(
        text: String,
        prompt_name: String,
        version: u32,
        label: String,
        resolved_variables: HashMap<String, String>,
    ) -> Self {
        Self {
            text,
            metadata: CompiledPromptMetadata {
                prompt_name,
                version,
                label,
                resolved_variables,
            },
        }
    }

    /// The compiled text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for CompiledPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
