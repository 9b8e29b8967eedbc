use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = C>>,
    builder: Arc<dyn SignRequest<Credential = C>>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            builder: Arc::new(builder),
        }
    }

    /// Sign the request parts in place with the given serialized body.
    ///
    /// The credential is resolved on every call rather than cached, so
    /// rotated keys are picked up without rebuilding the signer.
    pub async fn sign(&self, parts: &mut http::request::Parts, body: &[u8]) -> Result<()> {
        let credential = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .filter(|c| c.is_valid());

        self.builder
            .sign_request(&self.ctx, parts, body, credential.as_ref())
            .await
    }
}
