use crate::config::{load_credentials_file, section_field};
use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use dragonchain_core::{Context, ProvideCredential, Result};
use log::debug;

/// ConfigFileCredentialProvider loads the auth key pair from the credentials
/// file.
///
/// The file is looked up at `~/.dragonchain/credentials` unless a path is
/// supplied, and the pair is read from the section named after the chain id:
///
/// ```ini
/// [banana]
/// auth_key = ...
/// auth_key_id = ...
/// ```
///
/// A missing file, malformed file, missing section, or missing field is a
/// miss, not an error.
#[derive(Debug)]
pub struct ConfigFileCredentialProvider {
    dragonchain_id: String,
    path: Option<String>,
}

impl ConfigFileCredentialProvider {
    /// Create a new ConfigFileCredentialProvider for the given chain id.
    pub fn new(dragonchain_id: impl Into<String>) -> Self {
        Self {
            dragonchain_id: dragonchain_id.into(),
            path: None,
        }
    }

    /// Set the path to the credentials file.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for ConfigFileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(conf) = load_credentials_file(ctx, self.path.as_deref()).await else {
            return Ok(None);
        };

        let auth_key = section_field(&conf, &self.dragonchain_id, AUTH_KEY_FIELD);
        let auth_key_id = section_field(&conf, &self.dragonchain_id, AUTH_KEY_ID_FIELD);

        match (auth_key_id, auth_key) {
            (Some(id), Some(key)) => Ok(Some(Credential::new(id, key))),
            _ => {
                debug!(
                    "credentials file has no complete pair for dragonchain {}",
                    self.dragonchain_id
                );
                Ok(None)
            }
        }
    }
}
