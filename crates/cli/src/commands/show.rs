//! Show command handler.
//!
//! Fetches a labeled prompt and prints its raw template without
//! compiling it, for inspecting what the store will serve.

use clap::Args;
use promptdeck_core::{config::AppConfig, AppError, AppResult};
use promptdeck_store::create_store;

/// Fetch a prompt and print its raw template
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Prompt name in the store
    pub name: String,

    /// Label override for this call (default comes from config)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Output the prompt with its declared variables as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "Prompt name cannot be empty".to_string(),
            ));
        }

        let label = self.label.as_deref().unwrap_or(&config.default_label);

        let store = create_store(config)?;
        let prompt = store.get_prompt(name, label).await?;
        let variables: Vec<String> = prompt.variables().into_iter().collect();

        if self.json {
            let output = serde_json::json!({
                "name": prompt.name,
                "version": prompt.version,
                "labels": prompt.labels,
                "variables": variables,
                "template": prompt.template,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("name:      {} (v{})", prompt.name, prompt.version);
            println!("labels:    {}", prompt.labels.join(", "));
            println!("variables: {}", variables.join(", "));
            println!();
            println!("{}", prompt.template);
        }

        Ok(())
    }
}
