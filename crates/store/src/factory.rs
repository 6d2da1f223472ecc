//! Prompt store factory.
//!
//! Builds a store client from application configuration, resolving the
//! credential pair and endpoint.

use crate::client::PromptStore;
use crate::providers::HttpPromptStore;
use promptdeck_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;

/// Create a prompt store client from the application configuration.
///
/// # Errors
/// Returns `Config` when either half of the credential pair is missing.
pub fn create_store(config: &AppConfig) -> AppResult<Arc<dyn PromptStore>> {
    let public_key = config.public_key.clone().ok_or_else(|| {
        AppError::Config(
            "Store public key not set (PROMPTDECK_PUBLIC_KEY or store.publicKeyEnv)".to_string(),
        )
    })?;

    let secret_key = config.secret_key.clone().ok_or_else(|| {
        AppError::Config(
            "Store secret key not set (PROMPTDECK_SECRET_KEY or store.secretKeyEnv)".to_string(),
        )
    })?;

    let store = HttpPromptStore::with_timeout(
        &config.endpoint,
        public_key,
        secret_key,
        config.timeout_secs,
    )?;

    Ok(Arc::new(store))
}
