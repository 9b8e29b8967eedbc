//! Credentials file handling.
//!
//! The credentials file is an INI file at `~/.dragonchain/credentials` with a
//! `[default]` section holding the default `dragonchain_id` and one section
//! per chain id holding `auth_key`, `auth_key_id`, and optionally `endpoint`:
//!
//! ```ini
//! [default]
//! dragonchain_id = banana
//!
//! [banana]
//! auth_key_id = JSDMWFUJDVTC
//! auth_key = n3hlldsFxFdP2De0yMu6A4MFRh1HGzFvn6rJ0ICZzkE
//! endpoint = https://banana.api.dragonchain.com
//! ```
//!
//! Every failure while reading or parsing the file is a miss, never an
//! error: resolution falls through to the next source.

use crate::constants::*;
use dragonchain_core::{Context, Error, Result};
use ini::Ini;
use log::debug;

/// Load the credentials file, swallowing every failure as a miss.
pub(crate) async fn load_credentials_file(ctx: &Context, path: Option<&str>) -> Option<Ini> {
    let path = path.unwrap_or(DEFAULT_CREDENTIALS_PATH);

    let expanded = match ctx.expand_home_dir(path) {
        Some(expanded) => expanded,
        None => {
            debug!("failed to expand homedir for credentials file {path}");
            return None;
        }
    };

    let content = match ctx.file_read_as_string(&expanded).await {
        Ok(content) => content,
        Err(err) => {
            debug!("failed to read credentials file {expanded}: {err:?}");
            return None;
        }
    };

    match Ini::load_from_str(&content) {
        Ok(conf) => Some(conf),
        Err(err) => {
            debug!("failed to parse credentials file {expanded}: {err:?}");
            None
        }
    }
}

/// Look up a non-empty field in a section of the credentials file.
pub(crate) fn section_field(conf: &Ini, section: &str, field: &str) -> Option<String> {
    conf.section(Some(section))
        .and_then(|props| props.get(field))
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}

/// Resolve the dragonchain id to talk to: `DRAGONCHAIN_ID` in the
/// environment, then `dragonchain_id` in the `[default]` section of the
/// credentials file.
pub(crate) async fn resolve_dragonchain_id(
    ctx: &Context,
    credentials_file: Option<&str>,
) -> Result<String> {
    if let Some(id) = ctx.env_var(DRAGONCHAIN_ID).filter(|v| !v.is_empty()) {
        return Ok(id);
    }

    if let Some(conf) = load_credentials_file(ctx, credentials_file).await {
        if let Some(id) = section_field(&conf, DEFAULT_SECTION, DRAGONCHAIN_ID_FIELD) {
            return Ok(id);
        }
    }

    Err(Error::not_found(
        "could not ascertain dragonchain id: not in environment or credentials file",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_context_with_env as ctx_with_env;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_credentials(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[tokio::test]
    async fn test_missing_file_is_a_miss() {
        let ctx = ctx_with_env(HashMap::new());
        assert!(load_credentials_file(&ctx, Some("/does/not/exist")).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_a_miss() {
        let file = write_credentials("[banana\nnot even close to ini");
        let ctx = ctx_with_env(HashMap::new());
        assert!(
            load_credentials_file(&ctx, Some(file.path().to_str().unwrap()))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_section_lookup() {
        let file = write_credentials(
            "[default]\ndragonchain_id = banana\n\n[banana]\nauth_key = key\nauth_key_id = keyId\n",
        );
        let ctx = ctx_with_env(HashMap::new());
        let conf = load_credentials_file(&ctx, Some(file.path().to_str().unwrap()))
            .await
            .unwrap();

        assert_eq!(
            section_field(&conf, "banana", AUTH_KEY_FIELD),
            Some("key".to_string())
        );
        assert_eq!(section_field(&conf, "banana", ENDPOINT_FIELD), None);
        assert_eq!(section_field(&conf, "apple", AUTH_KEY_FIELD), None);
    }

    #[tokio::test]
    async fn test_dragonchain_id_env_wins_over_file() {
        let file = write_credentials("[default]\ndragonchain_id = from_file\n");
        let ctx = ctx_with_env(HashMap::from([(
            DRAGONCHAIN_ID.to_string(),
            "from_env".to_string(),
        )]));

        let id = resolve_dragonchain_id(&ctx, Some(file.path().to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(id, "from_env");
    }

    #[tokio::test]
    async fn test_dragonchain_id_falls_back_to_file() {
        let file = write_credentials("[default]\ndragonchain_id = from_file\n");
        let ctx = ctx_with_env(HashMap::new());

        let id = resolve_dragonchain_id(&ctx, Some(file.path().to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(id, "from_file");
    }

    #[tokio::test]
    async fn test_dragonchain_id_exhaustion_is_not_found() {
        let ctx = ctx_with_env(HashMap::new());

        let err = resolve_dragonchain_id(&ctx, Some("/does/not/exist"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), dragonchain_core::ErrorKind::NotFound);
    }
}
