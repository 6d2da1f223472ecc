//! Prompt resolver: fetch a labeled template and substitute variables.

use crate::types::CompiledPrompt;
use handlebars::Handlebars;
use promptdeck_core::{AppError, AppResult};
use promptdeck_store::PromptStore;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves prompt names to compiled prompt strings.
///
/// Each call is independent: the resolver holds only the injected store
/// and the default label, so it can be shared across tasks freely.
/// Substitution is all-or-nothing; a template placeholder without a
/// matching variable fails the whole call before any rendering happens.
pub struct PromptResolver {
    store: Arc<dyn PromptStore>,
    default_label: String,
}

impl PromptResolver {
    /// Create a resolver over a store with a default deployment label.
    pub fn new(store: Arc<dyn PromptStore>, default_label: impl Into<String>) -> Self {
        Self {
            store,
            default_label: default_label.into(),
        }
    }

    /// The label used when `resolve` is called without an override.
    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    /// Resolve a prompt under the default label.
    ///
    /// # Arguments
    /// * `name` - Prompt name in the store
    /// * `variables` - Values for the template's placeholders
    ///
    /// # Errors
    /// `InvalidInput` for an empty name, `NotFound` when the store has no
    /// prompt for the pair, `MissingVariables` when the template declares
    /// a placeholder with no supplied value, `Upstream` when the store
    /// cannot be reached.
    pub async fn resolve(
        &self,
        name: &str,
        variables: &HashMap<String, String>,
    ) -> AppResult<CompiledPrompt> {
        self.resolve_with_label(name, variables, &self.default_label)
            .await
    }

    /// Resolve a prompt under an explicit label, overriding the default.
    pub async fn resolve_with_label(
        &self,
        name: &str,
        variables: &HashMap<String, String>,
        label: &str,
    ) -> AppResult<CompiledPrompt> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "Prompt name cannot be empty".to_string(),
            ));
        }

        let label = label.trim();
        if label.is_empty() {
            return Err(AppError::InvalidInput("Label cannot be empty".to_string()));
        }

        tracing::debug!("Resolving prompt '{}' with label '{}'", name, label);

        let prompt = self.store.get_prompt(name, label).await?;

        let declared = prompt.variables();
        let missing: Vec<String> = declared
            .iter()
            .filter(|var| !variables.contains_key(*var))
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Err(AppError::MissingVariables {
                name: name.to_string(),
                missing,
            });
        }

        let text = render_template(&prompt.template, variables)?;

        // Record only the variables the template actually consumed
        let resolved_variables: HashMap<String, String> = declared
            .iter()
            .filter_map(|var| variables.get(var).map(|value| (var.clone(), value.clone())))
            .collect();

        tracing::info!(
            "Compiled prompt '{}' v{} ({} variables)",
            prompt.name,
            prompt.version,
            resolved_variables.len()
        );

        Ok(CompiledPrompt::new(
            text,
            prompt.name,
            prompt.version,
            label.to_string(),
            resolved_variables,
        ))
    }
}

/// Render a Handlebars template with variables.
///
/// Strict mode stays on as a backstop: placeholder shapes the declared-set
/// scan cannot see (block parameters, dotted lookups into absent objects)
/// still fail instead of rendering blank.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Prompts are plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Template(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Template(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptdeck_store::{InMemoryPromptStore, StoredPrompt};

    const SUMMARIZE_INPUT: &str =
        "Langfuse is a platform for monitoring and managing LLM applications.";

    fn test_resolver() -> PromptResolver {
        let store = InMemoryPromptStore::new()
            .with_prompt(
                StoredPrompt::new("summarize_text", 7, "Summarize: {{text}}")
                    .with_labels(vec!["prod".to_string()]),
            )
            .with_prompt(
                StoredPrompt::new("summarize_text", 9, "Draft summary of: {{text}}")
                    .with_labels(vec!["staging".to_string()]),
            )
            .with_prompt(
                StoredPrompt::new("greeting", 1, "Hello {{first}} {{last}}!")
                    .with_labels(vec!["prod".to_string()]),
            )
            .with_prompt(
                StoredPrompt::new("static_banner", 2, "All systems nominal.")
                    .with_labels(vec!["prod".to_string()]),
            );

        PromptResolver::new(Arc::new(store), "prod")
    }

    fn vars(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_resolve_substitutes_all_placeholders() {
        let resolver = test_resolver();
        let compiled = resolver
            .resolve("summarize_text", &vars(&[("text", SUMMARIZE_INPUT)]))
            .await
            .unwrap();

        assert_eq!(
            compiled.as_str(),
            "Summarize: Langfuse is a platform for monitoring and managing LLM applications."
        );
        assert!(!compiled.text.contains("{{"));
        assert_eq!(compiled.metadata.version, 7);
        assert_eq!(compiled.metadata.label, "prod");
        assert_eq!(
            compiled.metadata.resolved_variables.get("text"),
            Some(&SUMMARIZE_INPUT.to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_variable_fails_fast() {
        let resolver = test_resolver();
        let err = resolver
            .resolve("summarize_text", &HashMap::new())
            .await
            .unwrap_err();

        match err {
            AppError::MissingVariables { name, missing } => {
                assert_eq!(name, "summarize_text");
                assert_eq!(missing, vec!["text".to_string()]);
            }
            other => panic!("unexpected error variant: {}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_variables_are_sorted_and_complete() {
        let resolver = test_resolver();
        let err = resolver
            .resolve("greeting", &HashMap::new())
            .await
            .unwrap_err();

        match err {
            AppError::MissingVariables { missing, .. } => {
                assert_eq!(missing, vec!["first".to_string(), "last".to_string()]);
            }
            other => panic!("unexpected error variant: {}", other),
        }
    }

    #[tokio::test]
    async fn test_partially_supplied_variables_fail() {
        let resolver = test_resolver();
        let err = resolver
            .resolve("greeting", &vars(&[("first", "Ada")]))
            .await
            .unwrap_err();

        match err {
            AppError::MissingVariables { missing, .. } => {
                assert_eq!(missing, vec!["last".to_string()]);
            }
            other => panic!("unexpected error variant: {}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_prompt_is_not_found() {
        let resolver = test_resolver();
        let err = resolver
            .resolve("nonexistent_prompt", &HashMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_name_is_invalid_input() {
        let resolver = test_resolver();
        let err = resolver.resolve("  ", &HashMap::new()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_empty_label_is_invalid_input() {
        let resolver = test_resolver();
        let err = resolver
            .resolve_with_label("summarize_text", &HashMap::new(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_label_override_selects_other_version() {
        let resolver = test_resolver();
        let compiled = resolver
            .resolve_with_label("summarize_text", &vars(&[("text", "news")]), "staging")
            .await
            .unwrap();

        assert_eq!(compiled.as_str(), "Draft summary of: news");
        assert_eq!(compiled.metadata.version, 9);
        assert_eq!(compiled.metadata.label, "staging");
    }

    #[tokio::test]
    async fn test_template_without_placeholders_accepts_empty_map() {
        let resolver = test_resolver();
        let compiled = resolver
            .resolve("static_banner", &HashMap::new())
            .await
            .unwrap();
        assert_eq!(compiled.as_str(), "All systems nominal.");
    }

    #[tokio::test]
    async fn test_extra_variables_are_ignored() {
        let resolver = test_resolver();
        let compiled = resolver
            .resolve(
                "summarize_text",
                &vars(&[("text", "content"), ("unused", "value")]),
            )
            .await
            .unwrap();

        assert_eq!(compiled.as_str(), "Summarize: content");
        assert!(!compiled.metadata.resolved_variables.contains_key("unused"));
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let resolver = test_resolver();
        let variables = vars(&[("text", SUMMARIZE_INPUT)]);

        let first = resolver.resolve("summarize_text", &variables).await.unwrap();
        let second = resolver.resolve("summarize_text", &variables).await.unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_render_simple_template() {
        let result = render_template("Question: {{q}}", &vars(&[("q", "Why Rust?")]));
        assert_eq!(result.unwrap(), "Question: Why Rust?");
    }

    #[test]
    fn test_render_does_not_escape_html() {
        let result = render_template("{{v}}", &vars(&[("v", "<b>&</b>")]));
        assert_eq!(result.unwrap(), "<b>&</b>");
    }

    #[test]
    fn test_render_strict_mode_rejects_unknown_lookup() {
        let result = render_template("{{missing}}", &HashMap::new());
        assert!(matches!(result, Err(AppError::Template(_))));
    }
}
