// Persisted bearer token, kept in the OS keychain under one fixed key.
//
// All remote-call sites read the token through this trait instead of
// touching the keychain directly; a 401 anywhere funnels into `clear`.

use anyhow::{anyhow, Context, Result};

const KEYRING_SERVICE: &str = "com.quire.editor";
const KEYRING_ACCOUNT: &str = "api_token";

/// Process-wide credential store: one bearer token, surviving restarts,
/// cleared on logout or rejection.
pub trait CredentialStore: Clone {
    fn set_token(&self, token: &str) -> Result<()>;
    fn token(&self) -> Result<Option<String>>;
    fn clear(&self) -> Result<()>;
}

// ── Keychain-backed store ───────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct KeyringCredentials;

impl KeyringCredentials {
    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT)
            .context("failed to initialize keychain entry")
    }
}

impl CredentialStore for KeyringCredentials {
    fn set_token(&self, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            return Err(anyhow!("bearer token must not be empty"));
        }
        self.entry()?.set_password(token).context("failed to write keychain entry")
    }

    fn token(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(error).context("failed to read keychain entry"),
        }
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(error).context("failed to delete keychain entry"),
        }
    }
}

// ── In-memory store ─────────────────────────────────────────────────

/// Keychain-free store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentials {
    token: std::sync::Arc<std::sync::Mutex<Option<String>>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set_token(token).expect("non-empty token");
        store
    }
}

impl CredentialStore for MemoryCredentials {
    fn set_token(&self, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            return Err(anyhow!("bearer token must not be empty"));
        }
        *self.token.lock().expect("credential lock") = Some(token.to_string());
        Ok(())
    }

    fn token(&self) -> Result<Option<String>> {
        Ok(self.token.lock().expect("credential lock").clone())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().expect("credential lock") = None;
        Ok(())
    }
}
