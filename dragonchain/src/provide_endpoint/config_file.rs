use super::ProvideEndpoint;
use crate::config::{load_credentials_file, section_field};
use crate::constants::*;
use async_trait::async_trait;
use dragonchain_core::{Context, Result};

/// ConfigFileEndpointProvider reads the endpoint from the credentials file,
/// from the `endpoint` field of the section named after the chain id.
#[derive(Debug)]
pub struct ConfigFileEndpointProvider {
    dragonchain_id: String,
    path: Option<String>,
}

impl ConfigFileEndpointProvider {
    /// Create a new ConfigFileEndpointProvider for the given chain id.
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
impl ProvideEndpoint for ConfigFileEndpointProvider {
    async fn provide_endpoint(&self, ctx: &Context) -> Result<Option<String>> {
        let Some(conf) = load_credentials_file(ctx, self.path.as_deref()).await else {
            return Ok(None);
        };

        Ok(section_field(&conf, &self.dragonchain_id, ENDPOINT_FIELD))
    }
}
