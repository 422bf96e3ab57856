use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::configuration::Environment;
use crate::http_utils::HttpClient;
use crate::keyring::{Keyring, KeyringError};
use crate::payments_api::ApiError;

pub const LOGIN_PATH: &str = "/api/v1/authentication/login";
pub const CLIENT_ID_ENV: &str = "PAYCLI_CLIENT_ID";
pub const API_KEY_ENV: &str = "PAYCLI_API_KEY";

const KEY_CLIENT_ID: &str = "client-id";
const KEY_API_KEY: &str = "api-key";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no credentials found for the {environment} environment, run 'paycli auth login' or set PAYCLI_CLIENT_ID and PAYCLI_API_KEY")]
    MissingCredentials { environment: Environment },
    #[error("authentication failed: {0}")]
    AuthFailed(String),
    #[error("{0}")]
    Transport(#[from] ApiError),
    #[error("{0}")]
    Keyring(#[from] KeyringError),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// API credentials. The API key is never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("api_key", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Credentials from explicit values (flags or their environment
    /// variables) when both are present, otherwise from the keyring.
    pub fn resolve(
        environment: Environment,
        client_id: Option<String>,
        api_key: Option<String>,
    ) -> Result<Credentials, AuthError> {
        let client_id = client_id.filter(|v| !v.is_empty());
        let api_key = api_key.filter(|v| !v.is_empty());
        if let (Some(client_id), Some(api_key)) = (client_id, api_key) {
            debug!("Using credentials from the command line or environment");
            return Ok(Credentials::new(client_id, api_key));
        }

        let name = environment.to_string();
        let keyring = Keyring::default();
        match (
            keyring.get(&name, KEY_CLIENT_ID)?,
            keyring.get(&name, KEY_API_KEY)?,
        ) {
            (Some(client_id), Some(api_key)) => {
                debug!("Using credentials stored for {}", name);
                Ok(Credentials::new(client_id, api_key))
            }
            _ => Err(AuthError::MissingCredentials { environment }),
        }
    }

    pub fn store(&self, environment: Environment) -> Result<(), AuthError> {
        let name = environment.to_string();
        let keyring = Keyring::default();
        keyring.put(&name, KEY_CLIENT_ID, &self.client_id)?;
        keyring.put(&name, KEY_API_KEY, &self.api_key)?;
        Ok(())
    }

    pub fn forget(environment: Environment) -> Result<(), AuthError> {
        let name = environment.to_string();
        let keyring = Keyring::default();
        keyring.delete(&name, KEY_CLIENT_ID)?;
        keyring.delete(&name, KEY_API_KEY)?;
        Ok(())
    }
}

pub struct AuthClient {
    http: HttpClient,
}

impl AuthClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, AuthError> {
        debug!(
            "Authenticating client {} against {}",
            credentials.client_id,
            self.http.url(LOGIN_PATH)
        );
        let headers = [
            ("x-client-id", credentials.client_id.as_str()),
            ("x-api-key", credentials.api_key.as_str()),
        ];
        match self.http.post_with_headers::<TokenResponse>(LOGIN_PATH, &headers).await {
            Ok(response) => {
                debug!("Authentication successful, token expires at {:?}", response.expires_at);
                Ok(response)
            }
            Err(ApiError::Status { status, body }) if status == 401 || status == 403 => {
                error!("Authentication request failed with status {}: {}", status, body);
                Err(AuthError::AuthFailed(format!(
                    "HTTP {}, check the client ID and API key",
                    status
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_access_token(&self, credentials: &Credentials) -> Result<String, AuthError> {
        Ok(self.login(credentials).await?.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_credentials_take_precedence() {
        let credentials = Credentials::resolve(
            Environment::Demo,
            Some("client".to_string()),
            Some("secret".to_string()),
        )
        .unwrap();
        assert_eq!(credentials, Credentials::new("client", "secret"));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let rendered = format!("{:?}", Credentials::new("client", "secret"));
        assert!(rendered.contains("client"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_token_response_parses() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"token":"abc","expires_at":"2026-01-01T00:00:00+0000"}"#)
                .unwrap();
        assert_eq!(response.token, "abc");
        assert!(response.expires_at.is_some());
    }
}
