use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use dragonchain_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads the auth key pair from environment variables.
///
/// This provider looks for:
/// - `AUTH_KEY`: the secret HMAC key
/// - `AUTH_KEY_ID`: the auth key identifier
///
/// The two variables are read together as one atomic source: if only one of
/// them is set, the source counts as a miss and resolution moves on.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let auth_key = ctx.env_var(AUTH_KEY).filter(|v| !v.is_empty());
        let auth_key_id = ctx.env_var(AUTH_KEY_ID).filter(|v| !v.is_empty());

        match (auth_key_id, auth_key) {
            (Some(id), Some(key)) => Ok(Some(Credential::new(id, key))),
            _ => Ok(None),
        }
    }
}
