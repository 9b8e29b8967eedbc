//! Shared helpers for unit tests.

use async_trait::async_trait;
use bytes::Bytes;
use dragonchain_core::{Context, Error, HttpSend, Result, StaticEnv};
use dragonchain_file_read_tokio::TokioFileRead;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// HttpSend that fails every call. Used to prove a code path never reaches
/// the network.
#[derive(Debug)]
pub(crate) struct NoHttp;

#[async_trait]
impl HttpSend for NoHttp {
    async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected("no http call expected in this test"))
    }
}

/// HttpSend that records every request and answers with a canned response.
#[derive(Debug, Clone)]
pub(crate) struct MockHttpSend {
    status: u16,
    body: String,
    pub(crate) requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.requests.lock().unwrap().push(req);

        Ok(http::Response::builder()
            .status(self.status)
            .body(Bytes::from(self.body.clone()))
            .expect("canned response must be valid"))
    }
}

pub(crate) fn test_context() -> Context {
    Context::new(TokioFileRead, NoHttp).with_env(StaticEnv::default())
}

pub(crate) fn test_context_with_env(envs: HashMap<String, String>) -> Context {
    Context::new(TokioFileRead, NoHttp).with_env(StaticEnv {
        home_dir: None,
        envs,
    })
}

pub(crate) fn test_context_with_http(http: MockHttpSend) -> Context {
    Context::new(TokioFileRead, http).with_env(StaticEnv::default())
}
