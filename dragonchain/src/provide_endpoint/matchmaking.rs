use super::ProvideEndpoint;
use crate::constants::*;
use async_trait::async_trait;
use bytes::Bytes;
use dragonchain_core::{Context, Result};
use log::debug;

/// MatchmakingEndpointProvider asks the matchmaking service where a chain
/// lives.
///
/// Performs `GET https://matchmaking.api.dragonchain.com/registration/<id>`
/// and expects a JSON body with a `url` field. The lookup is bounded to 30
/// seconds; a timeout, transport error, non-success status, or missing `url`
/// field is a miss, never surfaced as a raw transport error.
#[derive(Debug)]
pub struct MatchmakingEndpointProvider {
    dragonchain_id: String,
}

impl MatchmakingEndpointProvider {
    /// Create a new MatchmakingEndpointProvider for the given chain id.
    pub fn new(dragonchain_id: impl Into<String>) -> Self {
        Self {
            dragonchain_id: dragonchain_id.into(),
        }
    }
}

#[async_trait]
impl ProvideEndpoint for MatchmakingEndpointProvider {
    async fn provide_endpoint(&self, ctx: &Context) -> Result<Option<String>> {
        let uri = format!("{MATCHMAKING_REGISTRATION_URL}/{}", self.dragonchain_id);
        let req = match http::Request::get(&uri).body(Bytes::new()) {
            Ok(req) => req,
            Err(err) => {
                debug!("failed to build matchmaking request for {uri}: {err:?}");
                return Ok(None);
            }
        };

        let resp = match tokio::time::timeout(MATCHMAKING_TIMEOUT, ctx.http_send_as_string(req))
            .await
        {
            Err(_) => {
                debug!("matchmaking lookup for {} timed out", self.dragonchain_id);
                return Ok(None);
            }
            Ok(Err(err)) => {
                debug!(
                    "matchmaking lookup for {} failed: {err:?}",
                    self.dragonchain_id
                );
                return Ok(None);
            }
            Ok(Ok(resp)) => resp,
        };

        if !resp.status().is_success() {
            debug!(
                "matchmaking lookup for {} returned {}",
                self.dragonchain_id,
                resp.status()
            );
            return Ok(None);
        }

        let registration: serde_json::Value = match serde_json::from_str(resp.body()) {
            Ok(v) => v,
            Err(err) => {
                debug!("matchmaking response is not json: {err:?}");
                return Ok(None);
            }
        };

        match registration.get("url").and_then(|v| v.as_str()) {
            Some(url) if !url.is_empty() => Ok(Some(url.to_string())),
            _ => {
                debug!(
                    "matchmaking response for {} has no url field",
                    self.dragonchain_id
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_context_with_http, MockHttpSend};

    #[tokio::test]
    async fn test_resolves_url_from_registration() -> anyhow::Result<()> {
        let http = MockHttpSend::new(200, r#"{"url": "https://banana.api.dragonchain.com"}"#);
        let requests = http.requests.clone();
        let ctx = test_context_with_http(http);

        let endpoint = MatchmakingEndpointProvider::new("banana")
            .provide_endpoint(&ctx)
            .await?;
        assert_eq!(
            endpoint,
            Some("https://banana.api.dragonchain.com".to_string())
        );

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].uri().to_string(),
            "https://matchmaking.api.dragonchain.com/registration/banana"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_url_field_is_a_miss() -> anyhow::Result<()> {
        let http = MockHttpSend::new(200, r#"{"state": "active"}"#);
        let ctx = test_context_with_http(http);

        let endpoint = MatchmakingEndpointProvider::new("banana")
            .provide_endpoint(&ctx)
            .await?;
        assert!(endpoint.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_non_json_response_is_a_miss() -> anyhow::Result<()> {
        let http = MockHttpSend::new(200, "<html>gateway error</html>");
        let ctx = test_context_with_http(http);

        let endpoint = MatchmakingEndpointProvider::new("banana")
            .provide_endpoint(&ctx)
            .await?;
        assert!(endpoint.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_error_status_is_a_miss() -> anyhow::Result<()> {
        let http = MockHttpSend::new(404, r#"{"error": "registration not found"}"#);
        let ctx = test_context_with_http(http);

        let endpoint = MatchmakingEndpointProvider::new("banana")
            .provide_endpoint(&ctx)
            .await?;
        assert!(endpoint.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_transport_error_is_a_miss() -> anyhow::Result<()> {
        let ctx = crate::test_utils::test_context();

        let endpoint = MatchmakingEndpointProvider::new("banana")
            .provide_endpoint(&ctx)
            .await?;
        assert!(endpoint.is_none());
        Ok(())
    }
}
