//! Endpoint providers, tried in order by [`DefaultEndpointProvider`].

use dragonchain_core::{Context, Result};
use std::fmt::Debug;

/// ProvideEndpoint is the trait used to resolve the base URL for a chain
/// from one source.
///
/// Returning `Ok(None)` means "this source has nothing", which lets a chain
/// of providers fall through to the next source.
#[async_trait::async_trait]
pub trait ProvideEndpoint: Debug + Send + Sync + 'static {
    /// Load the endpoint from this source.
    async fn provide_endpoint(&self, ctx: &Context) -> Result<Option<String>>;
}

mod config_file;
pub use config_file::ConfigFileEndpointProvider;

mod default;
pub use default::DefaultEndpointProvider;

mod env;
pub use env::EnvEndpointProvider;

mod matchmaking;
pub use matchmaking::MatchmakingEndpointProvider;
