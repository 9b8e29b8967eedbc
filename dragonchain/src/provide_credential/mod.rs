//! Credential providers, tried in order by [`DefaultCredentialProvider`].

mod config_file;
pub use config_file::ConfigFileCredentialProvider;

mod default;
pub use default::DefaultCredentialProvider;

mod env;
pub use env::EnvCredentialProvider;

mod smart_contract;
pub use smart_contract::SmartContractCredentialProvider;

mod r#static;
pub use r#static::StaticCredentialProvider;
