use crate::{Context, Result};
use std::fmt::Debug;
use std::sync::Arc;

/// SigningCredential is implemented by credential types that can be used to
/// sign requests.
pub trait SigningCredential: Clone + Debug + Send + Sync + 'static {
    /// Check if the credential is complete enough to sign with.
    ///
    /// A credential with only part of its fields populated must report
    /// invalid so that resolution falls through to the next source instead of
    /// partially applying it.
    fn is_valid(&self) -> bool;
}

/// ProvideCredential is the trait used by the signer to load a credential
/// from one source.
///
/// Returning `Ok(None)` means "this source has nothing", which lets a chain
/// of providers fall through to the next source.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + 'static {
    /// Credential returned by this provider.
    type Credential: SigningCredential;

    /// Load the credential from this source.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

#[async_trait::async_trait]
impl<C: SigningCredential> ProvideCredential for Arc<dyn ProvideCredential<Credential = C>> {
    type Credential = C;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.as_ref().provide_credential(ctx).await
    }
}

/// SignRequest is the trait used by the signer to build the authorization
/// material for one request.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Credential used by this signer.
    type Credential: SigningCredential;

    /// Sign the request parts in place.
    ///
    /// ## Body
    ///
    /// The `body` parameter carries the serialized request body (empty slice
    /// when the request has none) so that implementations can fold a content
    /// hash into the signed message.
    async fn sign_request(
        &self,
        ctx: &Context,
        parts: &mut http::request::Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()>;
}
