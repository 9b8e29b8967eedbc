use crate::provide_credential::{
    ConfigFileCredentialProvider, EnvCredentialProvider, SmartContractCredentialProvider,
};
use crate::Credential;
use async_trait::async_trait;
use dragonchain_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider tries every credential source in the standard
/// order.
///
/// Resolution order:
///
/// 1. Environment variables (`AUTH_KEY` / `AUTH_KEY_ID`)
/// 2. Credentials file (`~/.dragonchain/credentials`, section named by chain id)
/// 3. Smart contract secret mount (when running inside a contract sandbox)
///
/// Explicit keys passed at construction time are handled separately via
/// `StaticCredentialProvider` and take precedence over this whole chain.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` for the given chain id.
    pub fn new(dragonchain_id: impl Into<String>) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(ConfigFileCredentialProvider::new(dragonchain_id))
            .push(SmartContractCredentialProvider::new());

        Self { chain }
    }

    /// Create a new provider with a credentials file path override.
    pub fn with_credentials_file(
        dragonchain_id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(ConfigFileCredentialProvider::new(dragonchain_id).with_path(path))
            .push(SmartContractCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
