//! Core components for signing Dragonchain API requests.
//!
//! This crate provides the foundational types and traits for the dragonchain
//! SDK. It defines the abstractions that keep credential resolution and
//! request signing independent from any concrete runtime or HTTP client.
//!
//! ## Overview
//!
//! The crate is built around a few key concepts:
//!
//! - **Context**: A container that holds implementations for file reading,
//!   HTTP sending, and environment access
//! - **Traits**: Abstract interfaces for credential loading
//!   (`ProvideCredential`) and request signing (`SignRequest`)
//! - **Signer**: The orchestrator that resolves a credential and signs a
//!   request with it
//!
//! ## Example
//!
//! ```no_run
//! use dragonchain_core::{
//!     Context, ProvideCredential, Result, SignRequest, SigningCredential,
//! };
//! use async_trait::async_trait;
//!
//! // Define your credential type
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key_id: String,
//!     key: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key_id.is_empty() && !self.key.is_empty()
//!     }
//! }
//!
//! // Implement credential loader
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl ProvideCredential for MyProvider {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             key_id: "my-key-id".to_string(),
//!             key: "my-secret-key".to_string(),
//!         }))
//!     }
//! }
//!
//! // Implement request signer
//! #[derive(Debug)]
//! struct MySigner;
//!
//! #[async_trait]
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         _parts: &mut http::request::Parts,
//!         _body: &[u8],
//!         _credential: Option<&Self::Credential>,
//!     ) -> Result<()> {
//!         // Build the authorization header here
//!         todo!()
//!     }
//! }
//! ```
//!
//! ## Traits
//!
//! - [`FileRead`]: For asynchronous file reading
//! - [`HttpSend`]: For sending HTTP requests
//! - [`Env`]: For environment variable access
//! - [`ProvideCredential`]: For loading credentials from various sources
//! - [`SignRequest`]: For building service-specific authorization headers
//! - [`SigningCredential`]: For validating credentials

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, FileRead, HttpSend, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};
mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod chain;
pub use chain::ProvideCredentialChain;
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;

pub use hash::HmacAlgorithm;
