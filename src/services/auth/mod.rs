pub mod token_provider;

pub use token_provider::TokenProvider;

use std::sync::Arc;

use crate::config::Config;

/// Factory: build `TokenProvider` from application `Config`.
pub fn build_token_provider(config: &Config) -> anyhow::Result<Arc<TokenProvider>> {
    let provider = TokenProvider::new(
        &config.access_jwt_public_key_pem,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )
    .map_err(|e| anyhow::anyhow!(e))?;

    Ok(Arc::new(provider))
}
