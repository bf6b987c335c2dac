// Remote document store client.
//
// Thin typed wrapper over the store's HTTP API. Every authenticated call
// reads the bearer token from the credential store at call time; any 401
// clears it before the error is surfaced, so no later call can reuse a
// rejected token.

use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use quire_common::protocol::{
    ApiErrorBody, AuthResponse, CredentialError, LoginRequest, RegisterRequest, SaveFileRequest,
};
use quire_common::types::{RemoteFile, User};

use crate::credentials::CredentialStore;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Missing or rejected bearer token; the stored token has been cleared.
    #[error("not authenticated with the remote store")]
    Unauthorized,
    /// Non-2xx response with the store's error message.
    #[error("remote store rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("failed to reach the remote store")]
    Network(#[from] reqwest::Error),
    #[error("invalid API base URL `{0}`: must be https, or http on localhost")]
    InvalidBaseUrl(String),
    #[error(transparent)]
    Invalid(#[from] CredentialError),
    #[error("credential store failure: {0}")]
    Credentials(String),
}

/// The remote store's operation surface, kept as a seam so the bridge can
/// run against a mock.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, RemoteError>;
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, RemoteError>;
    async fn me(&self) -> Result<User, RemoteError>;
    async fn logout(&self) -> Result<(), RemoteError>;
    async fn save_file(&self, request: &SaveFileRequest) -> Result<RemoteFile, RemoteError>;
    async fn list_files(&self) -> Result<Vec<RemoteFile>, RemoteError>;
    async fn delete_file(&self, id: &str) -> Result<(), RemoteError>;
}

// ── HTTP implementation ─────────────────────────────────────────────

pub struct HttpRemoteStore<C> {
    http: reqwest::Client,
    base_url: String,
    credentials: C,
}

impl<C: CredentialStore> HttpRemoteStore<C> {
    pub fn new(base_url: &str, credentials: C) -> Result<Self, RemoteError> {
        let base_url = validate_base_url(base_url)?;
        Ok(Self { http: reqwest::Client::new(), base_url, credentials })
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Token for an authenticated call. A missing token short-circuits to
    /// `Unauthorized` without a network round trip.
    fn bearer(&self) -> Result<String, RemoteError> {
        match self.credentials.token() {
            Ok(Some(token)) => Ok(token),
            Ok(None) => Err(RemoteError::Unauthorized),
            Err(error) => Err(RemoteError::Credentials(error.to_string())),
        }
    }

    fn store_token(&self, auth: &AuthResponse) -> Result<(), RemoteError> {
        self.credentials.set_token(&auth.token).map_err(|e| RemoteError::Credentials(e.to_string()))
    }

    /// Map non-2xx responses to errors. Any 401 invalidates the stored
    /// token (forced logout).
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            if let Err(error) = self.credentials.clear() {
                warn!(%error, "failed to clear rejected token");
            }
            return Err(RemoteError::Unauthorized);
        }
        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
            };
            return Err(RemoteError::Api { status: status.as_u16(), message });
        }
        Ok(response)
    }
}

impl<C: CredentialStore> RemoteStore for HttpRemoteStore<C> {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, RemoteError> {
        request.validate()?;
        debug!(email = %request.email, "registering account");
        let response = self.http.post(self.endpoint("/register")).json(request).send().await?;
        let auth: AuthResponse = self.check(response).await?.json().await?;
        self.store_token(&auth)?;
        Ok(auth)
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, RemoteError> {
        request.validate()?;
        debug!(email = %request.email, "logging in");
        let response = self.http.post(self.endpoint("/login")).json(request).send().await?;
        let auth: AuthResponse = self.check(response).await?.json().await?;
        self.store_token(&auth)?;
        Ok(auth)
    }

    async fn me(&self) -> Result<User, RemoteError> {
        let token = self.bearer()?;
        let response =
            self.http.get(self.endpoint("/me")).bearer_auth(token).send().await?;
        Ok(self.check(response).await?.json().await?)
    }

    async fn logout(&self) -> Result<(), RemoteError> {
        let token = self.bearer()?;
        let response =
            self.http.post(self.endpoint("/logout")).bearer_auth(token).send().await?;
        self.check(response).await?;
        Ok(())
    }

    async fn save_file(&self, request: &SaveFileRequest) -> Result<RemoteFile, RemoteError> {
        let token = self.bearer()?;
        debug!(title = %request.title, "saving document to remote store");
        let response =
            self.http.post(self.endpoint("/files")).bearer_auth(token).json(request).send().await?;
        Ok(self.check(response).await?.json().await?)
    }

    async fn list_files(&self) -> Result<Vec<RemoteFile>, RemoteError> {
        let token = self.bearer()?;
        let response =
            self.http.get(self.endpoint("/files")).bearer_auth(token).send().await?;
        Ok(self.check(response).await?.json().await?)
    }

    async fn delete_file(&self, id: &str) -> Result<(), RemoteError> {
        let token = self.bearer()?;
        debug!(%id, "deleting remote document");
        let response = self
            .http
            .delete(self.endpoint(&format!("/files/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }
}

fn validate_base_url(value: &str) -> Result<String, RemoteError> {
    let parsed = Url::parse(value).map_err(|_| RemoteError::InvalidBaseUrl(value.to_string()))?;
    let allowed = match parsed.scheme() {
        "https" => true,
        "http" => is_loopback_host(parsed.host_str()),
        _ => false,
    };
    if !allowed {
        return Err(RemoteError::InvalidBaseUrl(value.to_string()));
    }
    Ok(value.trim_end_matches('/').to_string())
}

fn is_loopback_host(host: Option<&str>) -> bool {
    let Some(host) = host else {
        return false;
    };
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.parse::<std::net::IpAddr>().is_ok_and(|addr| addr.is_loopback())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentials;

    #[test]
    fn base_url_accepts_https_and_loopback_http() {
        assert!(validate_base_url("https://store.example.com/api").is_ok());
        assert!(validate_base_url("http://localhost:5000/api").is_ok());
        assert!(validate_base_url("http://127.0.0.1:5000/api").is_ok());
    }

    #[test]
    fn base_url_rejects_plain_http_and_garbage() {
        assert!(matches!(
            validate_base_url("http://store.example.com/api"),
            Err(RemoteError::InvalidBaseUrl(_))
        ));
        assert!(matches!(validate_base_url("not a url"), Err(RemoteError::InvalidBaseUrl(_))));
        assert!(matches!(
            validate_base_url("ftp://localhost/api"),
            Err(RemoteError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn trailing_slash_is_normalized_away() {
        let store =
            HttpRemoteStore::new("http://localhost:5000/api/", MemoryCredentials::new()).unwrap();
        assert_eq!(store.endpoint("/files"), "http://localhost:5000/api/files");
    }

    #[tokio::test]
    async fn authenticated_calls_without_a_token_never_hit_the_network() {
        // Port 9 (discard) would hang or refuse; the call must fail before
        // any connection is attempted.
        let store =
            HttpRemoteStore::new("http://127.0.0.1:9/api", MemoryCredentials::new()).unwrap();
        assert!(matches!(store.me().await, Err(RemoteError::Unauthorized)));
        assert!(matches!(store.list_files().await, Err(RemoteError::Unauthorized)));
    }

    #[tokio::test]
    async fn register_validates_before_sending() {
        let store =
            HttpRemoteStore::new("http://127.0.0.1:9/api", MemoryCredentials::new()).unwrap();
        let request = RegisterRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "short".into(),
        };
        assert!(matches!(
            store.register(&request).await,
            Err(RemoteError::Invalid(CredentialError::PasswordTooShort))
        ));
    }
}
