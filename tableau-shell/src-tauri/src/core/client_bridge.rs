//! ClientBridge - HTTP bridge to the chef-server
//!
//! All shell commands go through here. The bridge holds the base URL and
//! the bearer token of the active session; handlers never talk to the
//! network directly.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Server rejected the request ({code}): {message}")]
    Api { code: String, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl BridgeError {
    /// Stable code for the shell's response envelope
    pub fn code(&self) -> String {
        match self {
            BridgeError::NotAuthenticated => "E3001".to_string(),
            BridgeError::Api { code, .. } => code.clone(),
            BridgeError::Network(_) => "E9000".to_string(),
        }
    }
}

/// Error body shape returned by the server
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

pub struct ClientBridge {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ClientBridge {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            token: None,
        }
    }

    /// Store the bearer token of the active session
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn handle<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BridgeError> {
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let status = response.status();
            let body = response.json::<ErrorBody>().await.unwrap_or(ErrorBody {
                code: format!("E{}", status.as_u16()),
                message: status.to_string(),
            });
            Err(BridgeError::Api {
                code: body.code,
                message: body.message,
            })
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BridgeError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        self.handle(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BridgeError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        self.handle(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BridgeError> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await?;
        self.handle(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, BridgeError> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        self.handle(response).await
    }
}
