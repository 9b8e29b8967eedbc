use std::time::Duration;

// Headers attached to every authenticated request.
pub const DRAGONCHAIN_HEADER: &str = "dragonchain";
pub const TIMESTAMP_HEADER: &str = "timestamp";
pub const CALLBACK_URL_HEADER: &str = "X-Callback-URL";

// Env values consumed by the resolvers.
pub const DRAGONCHAIN_ID: &str = "DRAGONCHAIN_ID";
pub const DRAGONCHAIN_ENDPOINT: &str = "DRAGONCHAIN_ENDPOINT";
pub const AUTH_KEY: &str = "AUTH_KEY";
pub const AUTH_KEY_ID: &str = "AUTH_KEY_ID";
pub const SMART_CONTRACT_ID: &str = "SMART_CONTRACT_ID";

// Smart contract secret mount convention. Secrets for the running contract
// live at <dir>/<prefix>-<SMART_CONTRACT_ID>-<name>.
pub const SECRET_MOUNT_DIR: &str = "/var/openfaas/secrets";
pub const SECRET_PREFIX: &str = "sc";
pub const AUTH_KEY_ID_SECRET: &str = "auth-key-id";
pub const SECRET_KEY_SECRET: &str = "secret-key";

// Matchmaking service consulted when no endpoint is configured locally.
pub const MATCHMAKING_REGISTRATION_URL: &str =
    "https://matchmaking.api.dragonchain.com/registration";
pub const MATCHMAKING_TIMEOUT: Duration = Duration::from_secs(30);

// Credentials file, relative to the home dir.
pub const DEFAULT_CREDENTIALS_PATH: &str = "~/.dragonchain/credentials";
pub const DEFAULT_SECTION: &str = "default";
pub const DRAGONCHAIN_ID_FIELD: &str = "dragonchain_id";
pub const AUTH_KEY_FIELD: &str = "auth_key";
pub const AUTH_KEY_ID_FIELD: &str = "auth_key_id";
pub const ENDPOINT_FIELD: &str = "endpoint";
