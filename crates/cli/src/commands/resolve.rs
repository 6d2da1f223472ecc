//! Resolve command handler.
//!
//! Fetches a labeled prompt from the store and prints the compiled text.

use clap::Args;
use promptdeck_core::{config::AppConfig, AppError, AppResult};
use promptdeck_resolver::PromptResolver;
use promptdeck_store::create_store;
use std::collections::HashMap;

/// Fetch a prompt and substitute variables into it
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Prompt name in the store
    pub name: String,

    /// Template variable as KEY=VALUE (repeatable)
    #[arg(short = 'V', long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Label override for this call (default comes from config)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Output compiled prompt with metadata as JSON
    #[arg(long)]
    pub json: bool,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::debug!("Resolve command options: {:?}", self);

        let variables = parse_vars(&self.vars)?;

        let store = create_store(config)?;
        let resolver = PromptResolver::new(store, &config.default_label);

        let compiled = match &self.label {
            Some(label) => {
                resolver
                    .resolve_with_label(&self.name, &variables, label)
                    .await?
            }
            None => resolver.resolve(&self.name, &variables).await?,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&compiled)?);
        } else {
            println!("{}", compiled);
        }

        Ok(())
    }
}

/// Parse repeated KEY=VALUE flags into a variable map.
pub(crate) fn parse_vars(raw: &[String]) -> AppResult<HashMap<String, String>> {
    let mut variables = HashMap::new();

    for entry in raw {
        let (key, value) = entry.split_once('=').ok_or_else(|| {
            AppError::InvalidInput(format!("Variable '{}' is not in KEY=VALUE form", entry))
        })?;

        if key.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Variable '{}' has an empty key",
                entry
            )));
        }

        variables.insert(key.trim().to_string(), value.to_string());
    }

    Ok(variables)
}
