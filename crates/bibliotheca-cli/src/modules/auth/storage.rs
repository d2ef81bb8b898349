use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration as ChronoDuration, Utc};
use tracing::{debug, warn};

use crate::modules::system::http::parse_rfc3339;
use crate::EXPIRY_SKEW_SECONDS;

pub(crate) const ID_TOKEN: &str = "idtoken";
pub(crate) const EXPIRATION: &str = "expiration.key";
pub(crate) const LOGIN_STATE: &str = "state.login";
pub(crate) const ID_TOKEN_NONCE: &str = "nonce.idtoken";
pub(crate) const LOGIN_ERROR: &str = "error";

pub(crate) const SESSION_KEYS: [&str; 5] =
    [ID_TOKEN, EXPIRATION, LOGIN_STATE, ID_TOKEN_NONCE, LOGIN_ERROR];

/// Persistent key/value storage for the sign-in session.
pub(crate) trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// Stored identity token, or `None` when missing or about to expire.
pub(crate) fn load_id_token(storage: &dyn SessionStorage) -> anyhow::Result<Option<String>> {
    let Some(token) = storage.get(ID_TOKEN)? else {
        return Ok(None);
    };
    let expires_at = storage.get(EXPIRATION)?.as_deref().and_then(parse_rfc3339);
    if let Some(expires_at) = expires_at {
        if Utc::now() + ChronoDuration::seconds(EXPIRY_SKEW_SECONDS) >= expires_at {
            debug!(expires_at = %expires_at, "stored identity token expired");
            return Ok(None);
        }
    }
    Ok(Some(token))
}

pub(crate) fn clear_session(storage: &dyn SessionStorage) -> anyhow::Result<()> {
    for key in SESSION_KEYS {
        storage.remove(key)?;
    }
    Ok(())
}

pub(crate) struct KeyringStorage {
    context_name: String,
}

impl KeyringStorage {
    const SERVICE: &'static str = "bibliotheca-cli";

    pub(crate) fn new(context_name: impl Into<String>) -> Self {
        Self {
            context_name: context_name.into(),
        }
    }

    fn entry(&self, key: &str) -> anyhow::Result<keyring::Entry> {
        let user = format!("{}::{}", self.context_name, key);
        keyring::Entry::new(Self::SERVICE, &user)
            .map_err(|err| anyhow::anyhow!("failed to access keyring: {err}"))
    }
}

impl SessionStorage for KeyringStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(anyhow::anyhow!(
                "failed to load '{key}' from keychain for context '{}': {err}",
                self.context_name
            )),
        }
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|err| anyhow::anyhow!("failed to store '{key}' in keychain: {err}"))?;
        debug!(context = %self.context_name, key = %key, "stored session value in keyring");
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => {
                warn!(context = %self.context_name, key = %key, "failed to delete session value: {err}");
                Ok(())
            }
        }
    }
}

/// Process-local storage, used when a token is passed on the command line.
#[derive(Default)]
pub(crate) struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub(crate) fn with_id_token(token: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(HashMap::from([(ID_TOKEN.to_string(), token.into())])),
        }
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("failed to lock session storage"))
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_roundtrip() -> anyhow::Result<()> {
        let storage = MemoryStorage::default();
        storage.set(ID_TOKEN, "token")?;
        assert_eq!(storage.get(ID_TOKEN)?, Some("token".to_string()));
        storage.remove(ID_TOKEN)?;
        assert_eq!(storage.get(ID_TOKEN)?, None);
        Ok(())
    }

    #[test]
    fn token_without_expiry_is_usable() -> anyhow::Result<()> {
        let storage = MemoryStorage::with_id_token("token");
        assert_eq!(load_id_token(&storage)?, Some("token".to_string()));
        Ok(())
    }

    #[test]
    fn expired_token_is_ignored() -> anyhow::Result<()> {
        let storage = MemoryStorage::with_id_token("token");
        storage.set(EXPIRATION, &(Utc::now() - ChronoDuration::hours(1)).to_rfc3339())?;
        assert_eq!(load_id_token(&storage)?, None);

        storage.set(EXPIRATION, &(Utc::now() + ChronoDuration::hours(1)).to_rfc3339())?;
        assert_eq!(load_id_token(&storage)?, Some("token".to_string()));
        Ok(())
    }

    #[test]
    fn clear_session_removes_every_key() -> anyhow::Result<()> {
        let storage = MemoryStorage::with_id_token("token");
        storage.set(LOGIN_STATE, "state")?;
        storage.set(ID_TOKEN_NONCE, "nonce")?;
        clear_session(&storage)?;
        for key in SESSION_KEYS {
            assert_eq!(storage.get(key)?, None);
        }
        Ok(())
    }
}
