use super::ProvideEndpoint;
use crate::constants::*;
use async_trait::async_trait;
use dragonchain_core::{Context, Result};

/// EnvEndpointProvider reads the endpoint from `DRAGONCHAIN_ENDPOINT`.
#[derive(Debug, Default)]
pub struct EnvEndpointProvider;

impl EnvEndpointProvider {
    /// Create a new EnvEndpointProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideEndpoint for EnvEndpointProvider {
    async fn provide_endpoint(&self, ctx: &Context) -> Result<Option<String>> {
        Ok(ctx.env_var(DRAGONCHAIN_ENDPOINT).filter(|v| !v.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_context_with_env;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_env_endpoint_provider() -> anyhow::Result<()> {
        let ctx = test_context_with_env(HashMap::from([(
            DRAGONCHAIN_ENDPOINT.to_string(),
            "https://banana.api.dragonchain.com".to_string(),
        )]));

        let endpoint = EnvEndpointProvider::new().provide_endpoint(&ctx).await?;
        assert_eq!(
            endpoint,
            Some("https://banana.api.dragonchain.com".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_unset_is_a_miss() -> anyhow::Result<()> {
        let ctx = test_context_with_env(HashMap::new());
        assert!(EnvEndpointProvider::new()
            .provide_endpoint(&ctx)
            .await?
            .is_none());
        Ok(())
    }
}
