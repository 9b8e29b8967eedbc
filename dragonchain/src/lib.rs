//! Rust SDK for the Dragonchain REST API.
//!
//! The client signs every request with an HMAC over a canonical message
//! built from the request attributes, proving both identity and
//! non-tampering to the chain. Credentials and endpoints are resolved
//! through ordered provider chains: explicit values, environment variables,
//! the credentials file, and (for credentials) the smart contract secret
//! mount or (for endpoints) the matchmaking service.
//!
//! ## Example
//!
//! ```no_run
//! use dragonchain::{DragonchainClient, QueryParams};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> dragonchain::Result<()> {
//!     // Resolves id, endpoint, and credentials from the environment or
//!     // ~/.dragonchain/credentials.
//!     let client = DragonchainClient::builder().build().await?;
//!
//!     let posted = client
//!         .create_transaction("banana_type", json!({"hello": "world"}), None, None)
//!         .await?;
//!     println!("posted: {}", posted.response);
//!
//!     let found = client
//!         .query_transactions(&QueryParams::new().with_query("txn_type:banana_type"))
//!         .await?;
//!     println!("found: {}", found.response);
//!
//!     Ok(())
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod client;
pub use client::{DragonchainClient, DragonchainClientBuilder};

mod config;

mod credential;
pub use credential::Credential;

mod models;
pub use models::{
    BitcoinInterchainParams, BulkTransactionPayload, CustomIndex, EthereumInterchainParams,
    ExecutionOrder, SmartContractParams, SmartContractUpdate,
};

pub mod provide_credential;
pub mod provide_endpoint;

mod query;
pub use query::QueryParams;

mod response;
pub use response::{ApiResponse, ResponseFormat};

mod sign_request;
pub use sign_request::{string_to_sign, RequestSigner};

#[cfg(test)]
mod test_utils;

pub use dragonchain_core::{Context, Error, ErrorKind, HmacAlgorithm, Result};
