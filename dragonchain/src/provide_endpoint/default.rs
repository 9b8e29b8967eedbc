use super::{
    ConfigFileEndpointProvider, EnvEndpointProvider, MatchmakingEndpointProvider, ProvideEndpoint,
};
use async_trait::async_trait;
use dragonchain_core::{Context, Result};
use std::fmt::{self, Debug};

/// DefaultEndpointProvider tries every endpoint source in the standard order.
///
/// Resolution order:
///
/// 1. `DRAGONCHAIN_ENDPOINT` environment variable
/// 2. Credentials file (`endpoint` field of the section named by chain id)
/// 3. Matchmaking registration lookup
///
/// The first source that yields an endpoint wins; misses and errors fall
/// through to the next source.
pub struct DefaultEndpointProvider {
    providers: Vec<Box<dyn ProvideEndpoint>>,
}

impl DefaultEndpointProvider {
    /// Create a new `DefaultEndpointProvider` for the given chain id.
    pub fn new(dragonchain_id: impl Into<String>) -> Self {
        let dragonchain_id = dragonchain_id.into();
        Self {
            providers: vec![
                Box::new(EnvEndpointProvider::new()),
                Box::new(ConfigFileEndpointProvider::new(dragonchain_id.clone())),
                Box::new(MatchmakingEndpointProvider::new(dragonchain_id)),
            ],
        }
    }

    /// Create a new provider with a credentials file path override.
    pub fn with_credentials_file(
        dragonchain_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let dragonchain_id = dragonchain_id.into();
        Self {
            providers: vec![
                Box::new(EnvEndpointProvider::new()),
                Box::new(ConfigFileEndpointProvider::new(dragonchain_id.clone()).with_path(path)),
                Box::new(MatchmakingEndpointProvider::new(dragonchain_id)),
            ],
        }
    }

    /// Create an endpoint provider chain from a vector of providers.
    pub fn from_vec(providers: Vec<Box<dyn ProvideEndpoint>>) -> Self {
        Self { providers }
    }
}

impl Debug for DefaultEndpointProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultEndpointProvider")
            .field("providers_count", &self.providers.len())
            .finish()
    }
}

#[async_trait]
impl ProvideEndpoint for DefaultEndpointProvider {
    async fn provide_endpoint(&self, ctx: &Context) -> Result<Option<String>> {
        for provider in &self.providers {
            log::debug!("trying endpoint provider: {provider:?}");

            match provider.provide_endpoint(ctx).await {
                Ok(Some(endpoint)) => {
                    log::debug!("loaded endpoint from provider: {provider:?}");
                    return Ok(Some(endpoint));
                }
                Ok(None) => {
                    log::debug!("no endpoint found in provider: {provider:?}");
                    continue;
                }
                Err(e) => {
                    log::warn!("error loading endpoint from provider {provider:?}: {e:?}");
                    continue;
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::test_utils::{MockHttpSend, NoHttp};
    use dragonchain_core::StaticEnv;
    use dragonchain_file_read_tokio::TokioFileRead;
    use std::collections::HashMap;
    use std::io::Write;

    #[tokio::test]
    async fn test_env_wins_over_file_and_matchmaking() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[banana]")?;
        writeln!(file, "endpoint = https://file.api.dragonchain.com")?;

        let ctx = Context::new(TokioFileRead, NoHttp).with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([(
                DRAGONCHAIN_ENDPOINT.to_string(),
                "https://env.api.dragonchain.com".to_string(),
            )]),
        });

        let provider = DefaultEndpointProvider::with_credentials_file(
            "banana",
            file.path().to_str().unwrap(),
        );
        assert_eq!(
            provider.provide_endpoint(&ctx).await?,
            Some("https://env.api.dragonchain.com".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_falls_through_to_matchmaking() -> anyhow::Result<()> {
        let http = MockHttpSend::new(200, r#"{"url": "https://mm.api.dragonchain.com"}"#);
        let ctx = Context::new(TokioFileRead, http).with_env(StaticEnv::default());

        let provider =
            DefaultEndpointProvider::with_credentials_file("banana", "/does/not/exist");
        assert_eq!(
            provider.provide_endpoint(&ctx).await?,
            Some("https://mm.api.dragonchain.com".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_exhaustion_yields_none() -> anyhow::Result<()> {
        // Matchmaking answers without a url field, so every source misses.
        let http = MockHttpSend::new(200, r#"{"state": "pending"}"#);
        let ctx = Context::new(TokioFileRead, http).with_env(StaticEnv::default());

        let provider =
            DefaultEndpointProvider::with_credentials_file("banana", "/does/not/exist");
        assert!(provider.provide_endpoint(&ctx).await?.is_none());
        Ok(())
    }
}
