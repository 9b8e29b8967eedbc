use crate::Credential;
use async_trait::async_trait;
use dragonchain_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed auth key pair.
///
/// This provider is used when the caller supplied the auth key and auth key
/// id explicitly at construction time; it overrides every other source for
/// the lifetime of the client.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    auth_key_id: String,
    auth_key: String,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with an auth key id and auth key.
    pub fn new(auth_key_id: &str, auth_key: &str) -> Self {
        Self {
            auth_key_id: auth_key_id.to_string(),
            auth_key: auth_key.to_string(),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(Credential::new(&self.auth_key_id, &self.auth_key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_context;

    #[tokio::test]
    async fn test_static_credential_provider() -> anyhow::Result<()> {
        let provider = StaticCredentialProvider::new("test_key_id", "test_key");
        let cred = provider.provide_credential(&test_context()).await?;

        let cred = cred.unwrap();
        assert_eq!(cred.auth_key_id, "test_key_id");
        assert_eq!(cred.auth_key, "test_key");
        Ok(())
    }
}
