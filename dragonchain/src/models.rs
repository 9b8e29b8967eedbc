//! Typed inputs for client operations.
//!
//! Responses are returned as raw JSON in [`crate::ApiResponse`]; only the
//! request side is typed, since that is where local validation happens.

use serde::Serialize;
use serde_json::Value;

/// One transaction in a bulk submission.
#[derive(Debug, Clone, Serialize)]
pub struct BulkTransactionPayload {
    /// Registered transaction type to post to.
    pub txn_type: String,
    /// Arbitrary JSON payload.
    pub payload: Value,
    /// Searchable tag, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Execution order of a smart contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionOrder {
    /// Invocations may run concurrently.
    #[default]
    Parallel,
    /// Invocations run one at a time, in order.
    Serial,
}

impl ExecutionOrder {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ExecutionOrder::Parallel => "parallel",
            ExecutionOrder::Serial => "serial",
        }
    }
}

/// Parameters for creating a smart contract.
///
/// `schedule_interval_in_seconds` and `cron_expression` are mutually
/// exclusive; setting both fails validation before any network call.
#[derive(Debug, Clone)]
pub struct SmartContractParams {
    /// Transaction type to register for the contract.
    pub txn_type: String,
    /// Docker image to run.
    pub image: String,
    /// Command to run in the image.
    pub cmd: String,
    /// Arguments for the command.
    pub args: Vec<String>,
    /// Execution order of invocations.
    pub execution_order: ExecutionOrder,
    /// Environment variables made available to the contract.
    pub environment_variables: Option<Value>,
    /// Secrets made available to the contract.
    pub secrets: Option<Value>,
    /// Invoke the contract on a fixed interval.
    pub schedule_interval_in_seconds: Option<u32>,
    /// Invoke the contract on a cron schedule.
    pub cron_expression: Option<String>,
    /// Basic-auth credentials for a private docker registry.
    pub registry_credentials: Option<String>,
}

impl SmartContractParams {
    /// Create contract params with the required fields.
    pub fn new(
        txn_type: impl Into<String>,
        image: impl Into<String>,
        cmd: impl Into<String>,
    ) -> Self {
        Self {
            txn_type: txn_type.into(),
            image: image.into(),
            cmd: cmd.into(),
            args: Vec::new(),
            execution_order: ExecutionOrder::default(),
            environment_variables: None,
            secrets: None,
            schedule_interval_in_seconds: None,
            cron_expression: None,
            registry_credentials: None,
        }
    }
}

/// Fields to change on an existing smart contract. Unset fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct SmartContractUpdate {
    /// Replace the docker image.
    pub image: Option<String>,
    /// Replace the command.
    pub cmd: Option<String>,
    /// Replace the command arguments.
    pub args: Option<Vec<String>>,
    /// Replace the execution order.
    pub execution_order: Option<ExecutionOrder>,
    /// Enable or disable the contract.
    pub enabled: Option<bool>,
    /// Replace the environment variables.
    pub environment_variables: Option<Value>,
    /// Replace the secrets.
    pub secrets: Option<Value>,
    /// Replace the schedule interval.
    pub schedule_interval_in_seconds: Option<u32>,
    /// Replace the cron schedule.
    pub cron_expression: Option<String>,
    /// Replace the registry credentials.
    pub registry_credentials: Option<String>,
}

/// Parameters for registering a bitcoin interchain network.
#[derive(Debug, Clone)]
pub struct BitcoinInterchainParams {
    /// Name of the network registration.
    pub name: String,
    /// Whether the network is a testnet. Required unless `private_key` is
    /// provided.
    pub testnet: Option<bool>,
    /// Base64-encoded WIF private key. Generated server-side when absent.
    pub private_key: Option<String>,
    /// Address of a bitcoin RPC node to use.
    pub rpc_address: Option<String>,
    /// Basic-auth string for the RPC node.
    pub rpc_authorization: Option<String>,
    /// Whether to force a full UTXO rescan.
    pub utxo_scan: Option<bool>,
}

impl BitcoinInterchainParams {
    /// Create params for the named network registration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            testnet: None,
            private_key: None,
            rpc_address: None,
            rpc_authorization: None,
            utxo_scan: None,
        }
    }
}

/// Parameters for registering an ethereum interchain network.
#[derive(Debug, Clone)]
pub struct EthereumInterchainParams {
    /// Name of the network registration.
    pub name: String,
    /// Hex or base64 private key. Generated server-side when absent.
    pub private_key: Option<String>,
    /// Address of an ethereum RPC node to use.
    pub rpc_address: Option<String>,
    /// Ethereum chain id. Required unless `rpc_address` is provided.
    pub chain_id: Option<u32>,
}

impl EthereumInterchainParams {
    /// Create params for the named network registration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            private_key: None,
            rpc_address: None,
            chain_id: None,
        }
    }
}

/// One custom index on a transaction type.
#[derive(Debug, Clone, Serialize)]
pub struct CustomIndex {
    /// JSONPath into the transaction payload to index.
    pub path: String,
    /// Name the indexed field is queried by.
    pub field_name: String,
    /// Index type: `text`, `tag`, or `number`.
    #[serde(rename = "type")]
    pub index_type: String,
    /// Type-specific index options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}
