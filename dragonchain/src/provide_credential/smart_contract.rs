use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use dragonchain_core::{Context, ProvideCredential, Result};
use log::debug;

/// SmartContractCredentialProvider loads the auth key pair from the secret
/// mount of a running smart contract.
///
/// Inside the managed execution sandbox, each contract gets its auth keys
/// mounted as files named after the running contract id:
///
/// - `/var/openfaas/secrets/sc-<SMART_CONTRACT_ID>-auth-key-id`
/// - `/var/openfaas/secrets/sc-<SMART_CONTRACT_ID>-secret-key`
///
/// Both files must be readable; any read failure (or an unset
/// `SMART_CONTRACT_ID`) is a miss.
#[derive(Debug, Default)]
pub struct SmartContractCredentialProvider {
    mount_dir: Option<String>,
}

impl SmartContractCredentialProvider {
    /// Create a new SmartContractCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the secret mount directory for nonstandard sandboxes.
    pub fn with_mount_dir(mut self, dir: impl Into<String>) -> Self {
        self.mount_dir = Some(dir.into());
        self
    }

    fn secret_path(&self, smart_contract_id: &str, name: &str) -> String {
        let dir = self.mount_dir.as_deref().unwrap_or(SECRET_MOUNT_DIR);
        format!("{dir}/{SECRET_PREFIX}-{smart_contract_id}-{name}")
    }
}

#[async_trait]
impl ProvideCredential for SmartContractCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(smart_contract_id) = ctx.env_var(SMART_CONTRACT_ID).filter(|v| !v.is_empty())
        else {
            return Ok(None);
        };

        let auth_key_id = match ctx
            .file_read_as_string(&self.secret_path(&smart_contract_id, AUTH_KEY_ID_SECRET))
            .await
        {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read auth key id secret: {err:?}");
                return Ok(None);
            }
        };

        let auth_key = match ctx
            .file_read_as_string(&self.secret_path(&smart_contract_id, SECRET_KEY_SECRET))
            .await
        {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read secret key secret: {err:?}");
                return Ok(None);
            }
        };

        Ok(Some(Credential::new(auth_key_id, auth_key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_context_with_env;
    use std::collections::HashMap;
    use std::fs;

    #[tokio::test]
    async fn test_loads_pair_from_secret_mount() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("sc-contract1-auth-key-id"), "mounted_key_id")?;
        fs::write(dir.path().join("sc-contract1-secret-key"), "mounted_key")?;

        let ctx = test_context_with_env(HashMap::from([(
            SMART_CONTRACT_ID.to_string(),
            "contract1".to_string(),
        )]));

        let provider = SmartContractCredentialProvider::new()
            .with_mount_dir(dir.path().to_str().unwrap());
        let cred = provider.provide_credential(&ctx).await?.unwrap();

        assert_eq!(cred.auth_key_id, "mounted_key_id");
        assert_eq!(cred.auth_key, "mounted_key");
        Ok(())
    }

    #[tokio::test]
    async fn test_outside_sandbox_is_a_miss() -> anyhow::Result<()> {
        let ctx = test_context_with_env(HashMap::new());

        let provider = SmartContractCredentialProvider::new();
        assert!(provider.provide_credential(&ctx).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_secret_is_a_miss() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        // Only one of the two secrets exists.
        fs::write(dir.path().join("sc-contract1-auth-key-id"), "mounted_key_id")?;

        let ctx = test_context_with_env(HashMap::from([(
            SMART_CONTRACT_ID.to_string(),
            "contract1".to_string(),
        )]));

        let provider = SmartContractCredentialProvider::new()
            .with_mount_dir(dir.path().to_str().unwrap());
        assert!(provider.provide_credential(&ctx).await?.is_none());
        Ok(())
    }
}
