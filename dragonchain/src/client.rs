//! The Dragonchain client and its builder.

use crate::config::resolve_dragonchain_id;
use crate::constants::*;
use crate::models::{
    BitcoinInterchainParams, BulkTransactionPayload, CustomIndex, EthereumInterchainParams,
    SmartContractParams, SmartContractUpdate,
};
use crate::provide_credential::{DefaultCredentialProvider, StaticCredentialProvider};
use crate::provide_endpoint::{DefaultEndpointProvider, ProvideEndpoint};
use crate::query::QueryParams;
use crate::response::{ApiResponse, ResponseFormat};
use crate::sign_request::RequestSigner;
use crate::Credential;
use bytes::Bytes;
use dragonchain_core::{Context, Error, HmacAlgorithm, ProvideCredential, Result, Signer};
use dragonchain_file_read_tokio::TokioFileRead;
use dragonchain_http_send_reqwest::ReqwestHttpSend;
use http::header::CONTENT_TYPE;
use http::Method;
use log::{debug, warn};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Where the client gets its credentials from.
///
/// Kept on the client so the signer can be rebuilt when the identity is
/// replaced wholesale.
#[derive(Debug, Clone)]
enum CredentialSource {
    Static(Credential),
    Default { credentials_file: Option<String> },
}

impl CredentialSource {
    fn provider(&self, dragonchain_id: &str) -> Arc<dyn ProvideCredential<Credential = Credential>> {
        match self {
            CredentialSource::Static(cred) => Arc::new(StaticCredentialProvider::new(
                &cred.auth_key_id,
                &cred.auth_key,
            )),
            CredentialSource::Default {
                credentials_file: Some(path),
            } => Arc::new(DefaultCredentialProvider::with_credentials_file(
                dragonchain_id,
                path,
            )),
            CredentialSource::Default {
                credentials_file: None,
            } => Arc::new(DefaultCredentialProvider::new(dragonchain_id)),
        }
    }
}

/// Client for one Dragonchain.
///
/// The identity (chain id and endpoint) is fixed at construction time;
/// [`DragonchainClient::set_identity`] replaces both together, never one
/// alone. Every request is signed with a freshly resolved credential and a
/// fresh timestamp.
///
/// ## Example
///
/// ```no_run
/// use dragonchain::DragonchainClient;
///
/// # async fn example() -> dragonchain::Result<()> {
/// let client = DragonchainClient::builder()
///     .dragonchain_id("banana")
///     .build()
///     .await?;
///
/// let status = client.get_status().await?;
/// println!("{}: {}", status.status, status.response);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DragonchainClient {
    ctx: Context,
    dragonchain_id: String,
    endpoint: String,
    algorithm: HmacAlgorithm,
    credential_source: CredentialSource,
    signer: Signer<Credential>,
}

/// Builder for [`DragonchainClient`].
///
/// Anything not supplied explicitly is resolved at build time: the chain id
/// from `DRAGONCHAIN_ID` or the credentials file, the endpoint from
/// `DRAGONCHAIN_ENDPOINT`, the credentials file, or matchmaking, and the
/// credentials from the default provider chain on every request.
#[derive(Debug, Default)]
pub struct DragonchainClientBuilder {
    dragonchain_id: Option<String>,
    endpoint: Option<String>,
    auth_key: Option<String>,
    auth_key_id: Option<String>,
    algorithm: HmacAlgorithm,
    credentials_file: Option<String>,
    accept_invalid_certs: bool,
    context: Option<Context>,
}

impl DragonchainClientBuilder {
    /// Set the id of the chain to talk to.
    pub fn dragonchain_id(mut self, id: impl Into<String>) -> Self {
        self.dragonchain_id = Some(id.into());
        self
    }

    /// Set the base URL of the chain, skipping endpoint resolution.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the auth key explicitly. Takes effect only together with
    /// [`DragonchainClientBuilder::auth_key_id`]; a lone key is ignored.
    pub fn auth_key(mut self, auth_key: impl Into<String>) -> Self {
        self.auth_key = Some(auth_key.into());
        self
    }

    /// Set the auth key id explicitly. Takes effect only together with
    /// [`DragonchainClientBuilder::auth_key`]; a lone key id is ignored.
    pub fn auth_key_id(mut self, auth_key_id: impl Into<String>) -> Self {
        self.auth_key_id = Some(auth_key_id.into());
        self
    }

    /// Select the HMAC algorithm used for signing. Defaults to SHA256.
    pub fn algorithm(mut self, algorithm: HmacAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Override the credentials file location.
    pub fn credentials_file(mut self, path: impl Into<String>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// Disable TLS certificate verification for this client only.
    ///
    /// Development use only. The policy is carried by this client's HTTP
    /// transport; no process-wide state is touched, so other clients in the
    /// same process keep strict verification. Ignored when a custom context
    /// is supplied, since the transport belongs to the context then.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Supply a custom context (file reader, HTTP client, environment).
    pub fn context(mut self, ctx: Context) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Resolve everything that was not supplied explicitly and build the
    /// client.
    pub async fn build(self) -> Result<DragonchainClient> {
        let ctx = match self.context {
            Some(ctx) => ctx,
            None => {
                if self.accept_invalid_certs {
                    warn!("TLS certificate verification is disabled for this client");
                }
                let client = reqwest::Client::builder()
                    .danger_accept_invalid_certs(self.accept_invalid_certs)
                    .build()
                    .map_err(|e| {
                        Error::unexpected("failed to build http client").with_source(e)
                    })?;
                Context::new(TokioFileRead, ReqwestHttpSend::new(client))
            }
        };

        let dragonchain_id = match self.dragonchain_id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => resolve_dragonchain_id(&ctx, self.credentials_file.as_deref()).await?,
        };

        let endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => {
                let provider = match &self.credentials_file {
                    Some(path) => {
                        DefaultEndpointProvider::with_credentials_file(&dragonchain_id, path)
                    }
                    None => DefaultEndpointProvider::new(&dragonchain_id),
                };
                provider.provide_endpoint(&ctx).await?.ok_or_else(|| {
                    Error::not_found(format!(
                        "could not find endpoint for dragonchain {dragonchain_id}"
                    ))
                })?
            }
        };
        let endpoint = endpoint.trim_end_matches('/').to_string();

        let credential_source = match (self.auth_key_id, self.auth_key) {
            (Some(id), Some(key)) if !id.is_empty() && !key.is_empty() => {
                CredentialSource::Static(Credential::new(id, key))
            }
            _ => CredentialSource::Default {
                credentials_file: self.credentials_file,
            },
        };

        let signer = Signer::new(
            ctx.clone(),
            credential_source.provider(&dragonchain_id),
            RequestSigner::new(&dragonchain_id).with_algorithm(self.algorithm),
        );

        Ok(DragonchainClient {
            ctx,
            dragonchain_id,
            endpoint,
            algorithm: self.algorithm,
            credential_source,
            signer,
        })
    }
}

impl DragonchainClient {
    /// Start building a client.
    pub fn builder() -> DragonchainClientBuilder {
        DragonchainClientBuilder::default()
    }

    /// The id of the chain this client talks to.
    pub fn dragonchain_id(&self) -> &str {
        &self.dragonchain_id
    }

    /// The base URL this client talks to, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Replace the client identity.
    ///
    /// Both fields are replaced together; there is no way to change one
    /// without the other.
    pub fn set_identity(&mut self, dragonchain_id: impl Into<String>, endpoint: impl Into<String>) {
        self.dragonchain_id = dragonchain_id.into();
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self.signer = Signer::new(
            self.ctx.clone(),
            self.credential_source.provider(&self.dragonchain_id),
            RequestSigner::new(&self.dragonchain_id).with_algorithm(self.algorithm),
        );
    }

    /// Sign and dispatch an arbitrary request against the chain.
    ///
    /// This is the escape hatch for endpoints without a dedicated method.
    /// `format` declares how the response body should be interpreted.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        format: ResponseFormat,
    ) -> Result<ApiResponse> {
        ensure(path.starts_with('/'), "parameter 'path' must begin with '/'")?;
        let body = match body {
            Some(value) => Some(encode_body(&value)?),
            None => None,
        };
        self.dispatch(method, path, body, None, format).await
    }

    // Status

    /// Get the status of the chain.
    pub async fn get_status(&self) -> Result<ApiResponse> {
        self.get("/status").await
    }

    // Transactions

    /// Post a transaction of a registered type.
    pub async fn create_transaction(
        &self,
        txn_type: &str,
        payload: Value,
        tag: Option<&str>,
        callback_url: Option<&str>,
    ) -> Result<ApiResponse> {
        ensure(!txn_type.is_empty(), "parameter 'txn_type' must be provided")?;

        let mut body = Map::new();
        body.insert("version".into(), json!("1"));
        body.insert("txn_type".into(), json!(txn_type));
        body.insert("payload".into(), payload);
        if let Some(tag) = tag.filter(|t| !t.is_empty()) {
            body.insert("tag".into(), json!(tag));
        }

        self.post("/transaction", &Value::Object(body), callback_url)
            .await
    }

    /// Post up to 250 transactions in one call.
    pub async fn create_bulk_transaction(
        &self,
        transactions: &[BulkTransactionPayload],
    ) -> Result<ApiResponse> {
        ensure(
            (1..=250).contains(&transactions.len()),
            "parameter 'transactions' must contain between 1 and 250 transactions",
        )?;
        for txn in transactions {
            ensure(
                !txn.txn_type.is_empty(),
                "every bulk transaction must provide 'txn_type'",
            )?;
        }

        let body = transactions
            .iter()
            .map(|txn| {
                let mut entry = Map::new();
                entry.insert("version".into(), json!("1"));
                entry.insert("txn_type".into(), json!(txn.txn_type));
                entry.insert("payload".into(), txn.payload.clone());
                if let Some(tag) = txn.tag.as_deref().filter(|t| !t.is_empty()) {
                    entry.insert("tag".into(), json!(tag));
                }
                Value::Object(entry)
            })
            .collect::<Vec<_>>();

        self.post("/transaction_bulk", &Value::Array(body), None)
            .await
    }

    /// Get a transaction by id.
    pub async fn get_transaction(&self, transaction_id: &str) -> Result<ApiResponse> {
        ensure(
            !transaction_id.is_empty(),
            "parameter 'transaction_id' must be provided",
        )?;
        self.get(&format!("/transaction/{transaction_id}")).await
    }

    /// Search transactions.
    pub async fn query_transactions(&self, params: &QueryParams) -> Result<ApiResponse> {
        self.get(&format!("/transaction{}", params.to_query_string()))
            .await
    }

    // Blocks

    /// Get a block by id.
    pub async fn get_block(&self, block_id: &str) -> Result<ApiResponse> {
        ensure(!block_id.is_empty(), "parameter 'block_id' must be provided")?;
        self.get(&format!("/block/{block_id}")).await
    }

    /// Search blocks.
    pub async fn query_blocks(&self, params: &QueryParams) -> Result<ApiResponse> {
        self.get(&format!("/block{}", params.to_query_string())).await
    }

    // Smart contracts

    /// Get a smart contract by id or by its transaction type.
    ///
    /// Exactly one of `smart_contract_id` and `transaction_type` must be
    /// provided.
    pub async fn get_smart_contract(
        &self,
        smart_contract_id: Option<&str>,
        transaction_type: Option<&str>,
    ) -> Result<ApiResponse> {
        match (smart_contract_id, transaction_type) {
            (Some(_), Some(_)) => Err(Error::bad_request(
                "only one of 'smart_contract_id' and 'transaction_type' may be provided",
            )),
            (None, None) => Err(Error::bad_request(
                "one of 'smart_contract_id' or 'transaction_type' must be provided",
            )),
            (Some(id), None) => {
                ensure(!id.is_empty(), "parameter 'smart_contract_id' must be provided")?;
                self.get(&format!("/contract/{id}")).await
            }
            (None, Some(txn_type)) => {
                ensure(
                    !txn_type.is_empty(),
                    "parameter 'transaction_type' must be provided",
                )?;
                self.get(&format!("/contract/txn_type/{txn_type}")).await
            }
        }
    }

    /// List all smart contracts on the chain.
    pub async fn list_smart_contracts(&self) -> Result<ApiResponse> {
        self.get("/contract").await
    }

    /// Create a smart contract.
    pub async fn create_smart_contract(&self, params: &SmartContractParams) -> Result<ApiResponse> {
        ensure(
            !params.txn_type.is_empty(),
            "parameter 'txn_type' must be provided",
        )?;
        ensure(!params.image.is_empty(), "parameter 'image' must be provided")?;
        ensure(!params.cmd.is_empty(), "parameter 'cmd' must be provided")?;
        ensure(
            !(params.schedule_interval_in_seconds.is_some() && params.cron_expression.is_some()),
            "parameters 'schedule_interval_in_seconds' and 'cron_expression' are mutually exclusive",
        )?;

        let mut body = Map::new();
        body.insert("version".into(), json!("3"));
        body.insert("txn_type".into(), json!(params.txn_type));
        body.insert("image".into(), json!(params.image));
        body.insert("cmd".into(), json!(params.cmd));
        body.insert("execution_order".into(), json!(params.execution_order.as_str()));
        if !params.args.is_empty() {
            body.insert("args".into(), json!(params.args));
        }
        if let Some(env) = &params.environment_variables {
            body.insert("env".into(), env.clone());
        }
        if let Some(secrets) = &params.secrets {
            body.insert("secrets".into(), secrets.clone());
        }
        if let Some(seconds) = params.schedule_interval_in_seconds {
            body.insert("seconds".into(), json!(seconds));
        }
        if let Some(cron) = &params.cron_expression {
            body.insert("cron".into(), json!(cron));
        }
        if let Some(auth) = &params.registry_credentials {
            body.insert("auth".into(), json!(auth));
        }

        self.post("/contract", &Value::Object(body), None).await
    }

    /// Update a smart contract. Unset fields keep their current value.
    pub async fn update_smart_contract(
        &self,
        smart_contract_id: &str,
        update: &SmartContractUpdate,
    ) -> Result<ApiResponse> {
        ensure(
            !smart_contract_id.is_empty(),
            "parameter 'smart_contract_id' must be provided",
        )?;
        ensure(
            !(update.schedule_interval_in_seconds.is_some() && update.cron_expression.is_some()),
            "parameters 'schedule_interval_in_seconds' and 'cron_expression' are mutually exclusive",
        )?;

        let mut body = Map::new();
        body.insert("version".into(), json!("3"));
        if let Some(image) = &update.image {
            body.insert("image".into(), json!(image));
        }
        if let Some(cmd) = &update.cmd {
            body.insert("cmd".into(), json!(cmd));
        }
        if let Some(args) = &update.args {
            body.insert("args".into(), json!(args));
        }
        if let Some(order) = update.execution_order {
            body.insert("execution_order".into(), json!(order.as_str()));
        }
        if let Some(enabled) = update.enabled {
            let state = if enabled { "active" } else { "inactive" };
            body.insert("desired_state".into(), json!(state));
        }
        if let Some(env) = &update.environment_variables {
            body.insert("env".into(), env.clone());
        }
        if let Some(secrets) = &update.secrets {
            body.insert("secrets".into(), secrets.clone());
        }
        if let Some(seconds) = update.schedule_interval_in_seconds {
            body.insert("seconds".into(), json!(seconds));
        }
        if let Some(cron) = &update.cron_expression {
            body.insert("cron".into(), json!(cron));
        }
        if let Some(auth) = &update.registry_credentials {
            body.insert("auth".into(), json!(auth));
        }

        self.put(&format!("/contract/{smart_contract_id}"), &Value::Object(body))
            .await
    }

    /// Delete a smart contract.
    pub async fn delete_smart_contract(&self, smart_contract_id: &str) -> Result<ApiResponse> {
        ensure(
            !smart_contract_id.is_empty(),
            "parameter 'smart_contract_id' must be provided",
        )?;
        self.delete(&format!("/contract/{smart_contract_id}")).await
    }

    /// Read a secret of the currently running smart contract.
    ///
    /// Only works inside a contract sandbox, where secrets are mounted at
    /// `/var/openfaas/secrets/sc-<SMART_CONTRACT_ID>-<name>`.
    pub async fn get_smart_contract_secret(&self, secret_name: &str) -> Result<String> {
        ensure(
            !secret_name.is_empty(),
            "parameter 'secret_name' must be provided",
        )?;
        let smart_contract_id = self
            .ctx
            .env_var(SMART_CONTRACT_ID)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::not_found(
                    "SMART_CONTRACT_ID not set: secrets are only available inside a smart contract runtime",
                )
            })?;

        self.ctx
            .file_read_as_string(&format!(
                "{SECRET_MOUNT_DIR}/{SECRET_PREFIX}-{smart_contract_id}-{secret_name}"
            ))
            .await
    }

    // Transaction types

    /// List all registered transaction types.
    pub async fn list_transaction_types(&self) -> Result<ApiResponse> {
        self.get("/transaction-types").await
    }

    /// Get a transaction type by name.
    pub async fn get_transaction_type(&self, transaction_type: &str) -> Result<ApiResponse> {
        ensure(
            !transaction_type.is_empty(),
            "parameter 'transaction_type' must be provided",
        )?;
        self.get(&format!("/transaction-type/{transaction_type}"))
            .await
    }

    /// Register a transaction type, optionally with custom indexes.
    pub async fn create_transaction_type(
        &self,
        transaction_type: &str,
        custom_indexes: Option<&[CustomIndex]>,
    ) -> Result<ApiResponse> {
        ensure(
            !transaction_type.is_empty(),
            "parameter 'transaction_type' must be provided",
        )?;

        let mut body = Map::new();
        body.insert("version".into(), json!("2"));
        body.insert("txn_type".into(), json!(transaction_type));
        if let Some(indexes) = custom_indexes {
            body.insert(
                "custom_indexes".into(),
                serde_json::to_value(indexes).map_err(|e| {
                    Error::unexpected("failed to serialize custom indexes").with_source(e)
                })?,
            );
        }

        self.post("/transaction-type", &Value::Object(body), None)
            .await
    }

    /// Delete a transaction type.
    pub async fn delete_transaction_type(&self, transaction_type: &str) -> Result<ApiResponse> {
        ensure(
            !transaction_type.is_empty(),
            "parameter 'transaction_type' must be provided",
        )?;
        self.delete(&format!("/transaction-type/{transaction_type}"))
            .await
    }

    // Interchain networks

    /// Register a bitcoin network for interchain use.
    pub async fn create_bitcoin_interchain(
        &self,
        params: &BitcoinInterchainParams,
    ) -> Result<ApiResponse> {
        ensure(!params.name.is_empty(), "parameter 'name' must be provided")?;
        ensure(
            params.testnet.is_some() || params.private_key.is_some(),
            "parameter 'testnet' must be provided when 'private_key' is not",
        )?;

        let mut body = Map::new();
        body.insert("version".into(), json!("1"));
        body.insert("name".into(), json!(params.name));
        if let Some(testnet) = params.testnet {
            body.insert("testnet".into(), json!(testnet));
        }
        if let Some(key) = &params.private_key {
            body.insert("private_key".into(), json!(key));
        }
        if let Some(addr) = &params.rpc_address {
            body.insert("rpc_address".into(), json!(addr));
        }
        if let Some(auth) = &params.rpc_authorization {
            body.insert("rpc_authorization".into(), json!(auth));
        }
        if let Some(scan) = params.utxo_scan {
            body.insert("utxo_scan".into(), json!(scan));
        }

        self.post("/interchain/bitcoin", &Value::Object(body), None)
            .await
    }

    /// Register an ethereum network for interchain use.
    pub async fn create_ethereum_interchain(
        &self,
        params: &EthereumInterchainParams,
    ) -> Result<ApiResponse> {
        ensure(!params.name.is_empty(), "parameter 'name' must be provided")?;
        ensure(
            params.chain_id.is_some() || params.rpc_address.is_some(),
            "parameter 'chain_id' must be provided when 'rpc_address' is not",
        )?;

        let mut body = Map::new();
        body.insert("version".into(), json!("1"));
        body.insert("name".into(), json!(params.name));
        if let Some(key) = &params.private_key {
            body.insert("private_key".into(), json!(key));
        }
        if let Some(addr) = &params.rpc_address {
            body.insert("rpc_address".into(), json!(addr));
        }
        if let Some(chain_id) = params.chain_id {
            body.insert("chain_id".into(), json!(chain_id));
        }

        self.post("/interchain/ethereum", &Value::Object(body), None)
            .await
    }

    /// Get a registered interchain network.
    pub async fn get_interchain_network(
        &self,
        blockchain: &str,
        name: &str,
    ) -> Result<ApiResponse> {
        ensure(!blockchain.is_empty(), "parameter 'blockchain' must be provided")?;
        ensure(!name.is_empty(), "parameter 'name' must be provided")?;
        self.get(&format!("/interchain/{blockchain}/{name}")).await
    }

    /// List registered interchain networks for a blockchain.
    pub async fn list_interchain_networks(&self, blockchain: &str) -> Result<ApiResponse> {
        ensure(!blockchain.is_empty(), "parameter 'blockchain' must be provided")?;
        self.get(&format!("/interchain/{blockchain}")).await
    }

    /// Delete a registered interchain network.
    pub async fn delete_interchain_network(
        &self,
        blockchain: &str,
        name: &str,
    ) -> Result<ApiResponse> {
        ensure(!blockchain.is_empty(), "parameter 'blockchain' must be provided")?;
        ensure(!name.is_empty(), "parameter 'name' must be provided")?;
        self.delete(&format!("/interchain/{blockchain}/{name}"))
            .await
    }

    /// Have the chain sign a transaction for a registered interchain
    /// network. `transaction` must be a JSON object of network-specific
    /// fields.
    pub async fn sign_interchain_transaction(
        &self,
        blockchain: &str,
        name: &str,
        transaction: Value,
    ) -> Result<ApiResponse> {
        ensure(!blockchain.is_empty(), "parameter 'blockchain' must be provided")?;
        ensure(!name.is_empty(), "parameter 'name' must be provided")?;
        let Value::Object(fields) = transaction else {
            return Err(Error::bad_request(
                "parameter 'transaction' must be a json object",
            ));
        };

        let mut body = Map::new();
        body.insert("version".into(), json!("1"));
        body.extend(fields);

        self.post(
            &format!("/interchain/transaction/{blockchain}/{name}"),
            &Value::Object(body),
            None,
        )
        .await
    }

    // Api keys

    /// Create a new api key for the chain.
    pub async fn create_api_key(&self, nickname: Option<&str>) -> Result<ApiResponse> {
        let mut body = Map::new();
        if let Some(nickname) = nickname.filter(|n| !n.is_empty()) {
            body.insert("nickname".into(), json!(nickname));
        }
        self.post("/api-key", &Value::Object(body), None).await
    }

    /// Get an api key by id.
    pub async fn get_api_key(&self, key_id: &str) -> Result<ApiResponse> {
        ensure(!key_id.is_empty(), "parameter 'key_id' must be provided")?;
        self.get(&format!("/api-key/{key_id}")).await
    }

    /// List api keys.
    pub async fn list_api_keys(&self) -> Result<ApiResponse> {
        self.get("/api-key").await
    }

    /// Change the nickname of an api key.
    pub async fn update_api_key(&self, key_id: &str, nickname: &str) -> Result<ApiResponse> {
        ensure(!key_id.is_empty(), "parameter 'key_id' must be provided")?;
        ensure(!nickname.is_empty(), "parameter 'nickname' must be provided")?;
        self.put(&format!("/api-key/{key_id}"), &json!({ "nickname": nickname }))
            .await
    }

    /// Delete an api key.
    pub async fn delete_api_key(&self, key_id: &str) -> Result<ApiResponse> {
        ensure(!key_id.is_empty(), "parameter 'key_id' must be provided")?;
        self.delete(&format!("/api-key/{key_id}")).await
    }

    // Dispatch plumbing

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.dispatch(Method::GET, path, None, None, ResponseFormat::Json)
            .await
    }

    async fn post(
        &self,
        path: &str,
        body: &Value,
        callback_url: Option<&str>,
    ) -> Result<ApiResponse> {
        self.dispatch(
            Method::POST,
            path,
            Some(encode_body(body)?),
            callback_url,
            ResponseFormat::Json,
        )
        .await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.dispatch(
            Method::PUT,
            path,
            Some(encode_body(body)?),
            None,
            ResponseFormat::Json,
        )
        .await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.dispatch(Method::DELETE, path, None, None, ResponseFormat::Json)
            .await
    }

    /// Build, sign, and send one request, then normalize the response.
    ///
    /// Non-2xx statuses are not errors here; they come back with `ok` false
    /// so the caller can inspect status and body. Only transport failures
    /// and unparseable bodies error.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        callback_url: Option<&str>,
        format: ResponseFormat,
    ) -> Result<ApiResponse> {
        let uri: http::Uri = format!("{}{}", self.endpoint, path).parse()?;

        let mut req = http::Request::builder().method(method).uri(uri);
        if body.is_some() {
            req = req.header(CONTENT_TYPE, "application/json");
        }
        if let Some(callback_url) = callback_url {
            req = req.header(CALLBACK_URL_HEADER, callback_url);
        }
        let (mut parts, _) = req.body(())?.into_parts();

        let body = body.unwrap_or_default();
        self.signer.sign(&mut parts, &body).await?;

        debug!("dispatching {} {}", parts.method, parts.uri);
        let resp = self
            .ctx
            .http_send(http::Request::from_parts(parts, Bytes::from(body)))
            .await?;

        let (parts, bytes) = resp.into_parts();
        let status = parts.status;
        debug!("received {status} for {path}");

        let response = match format {
            ResponseFormat::Json => serde_json::from_slice(&bytes).map_err(|e| {
                Error::unexpected("unable to parse response as json").with_source(e)
            })?,
            ResponseFormat::Text => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            ok: status.is_success(),
            response,
        })
    }
}

fn ensure(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::bad_request(message))
    }
}

fn encode_body(body: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(body)
        .map_err(|e| Error::unexpected("failed to serialize request body").with_source(e))
}
