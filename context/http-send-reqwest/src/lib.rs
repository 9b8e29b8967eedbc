//! Reqwest-based HTTP sending implementation for the dragonchain SDK.
//!
//! This crate provides `ReqwestHttpSend`, which implements the `HttpSend`
//! trait from `dragonchain_core` on top of a `reqwest::Client`. Transport
//! policy (timeouts, proxies, TLS verification) belongs to the client passed
//! in, so each SDK instance carries its own policy instead of sharing
//! process-wide state.
//!
//! ## Example
//!
//! ```no_run
//! use dragonchain_http_send_reqwest::ReqwestHttpSend;
//! use reqwest::Client;
//! use std::time::Duration;
//!
//! # fn main() -> anyhow::Result<()> {
//! let client = Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//! let http = ReqwestHttpSend::new(client);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use dragonchain_core::{Error, HttpSend, Result};
use http_body_util::BodyExt;
use reqwest::{Client, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
