//!
//! ```rust,ignore
//! // 1. Using the builder with explicit configuration
//! let client = ImageClient::builder()
//!     .host("https://api.vectorengine.ai")
//!     .bearer_auth(load_token(Path::new("token.txt"))?)
//!     .timeout(120)
//!     .build()?;
//!
//! // 2. Using environment variables
//! let client = ImageClient::builder().from_env().build()?;
//! ```
use crate::{Credentials, ImageClient, DEFAULT_HOST, DEFAULT_MODEL};
use log::debug;
use reqwest::Client;
use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Error type for `ImageClientBuilder` operations
#[derive(Error, Debug)]
pub enum ImageClientBuilderError {
    #[error("No credentials given, set {0} or supply a token")]
    MissingCredentials(String),

    #[error("URL parsing error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("HTTP client initialization error: {0}")]
    ClientInitError(String),

    #[error("Timeout must be positive")]
    InvalidTimeout,
}

/// Names of the environment variables understood by [`ImageClientBuilder::from_env`]
pub struct ImageEnvVars;

impl ImageEnvVars {
    pub const HOST: &'static str = "CLAWEDIT_IMAGE_HOST";
    pub const MODEL: &'static str = "CLAWEDIT_IMAGE_MODEL";
    pub const TOKEN: &'static str = "CLAWEDIT_IMAGE_TOKEN";
}

/// Builder for creating `ImageClient` instances
#[derive(Default)]
pub struct ImageClientBuilder {
    host: Option<String>,
    model: Option<String>,
    credentials: Option<Credentials>,
    timeout: Option<u64>,
}

impl ImageClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host, defaults to [`DEFAULT_HOST`]
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the model, defaults to [`DEFAULT_MODEL`]
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Bearer(token.into()));
        self
    }

    /// Sets a request timeout in seconds
    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Picks up host, model and token from the environment where set
    #[must_use]
    pub fn from_env(self) -> Self {
        let mut builder = self;

        if let Ok(host) = env::var(ImageEnvVars::HOST) {
            builder = builder.host(host);
        }
        if let Ok(model) = env::var(ImageEnvVars::MODEL) {
            builder = builder.model(model);
        }
        if let Ok(token) = env::var(ImageEnvVars::TOKEN) {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    /// Builds an `ImageClient` from the configured parameters
    ///
    /// # Errors
    /// Fails without credentials, with an unparsable host, a zero timeout or if
    /// the HTTP client cannot be set up.
    pub fn build(self) -> Result<ImageClient, ImageClientBuilderError> {
        let credentials = self
            .credentials
            .ok_or_else(|| ImageClientBuilderError::MissingCredentials(ImageEnvVars::TOKEN.to_string()))?;
        let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let host_url = Url::parse(&host)?;

        let mut client_builder = Client::builder();
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(ImageClientBuilderError::InvalidTimeout);
            }
            client_builder = client_builder.timeout(Duration::from_secs(timeout));
        }
        let client = client_builder
            .build()
            .map_err(|e| ImageClientBuilderError::ClientInitError(e.to_string()))?;

        let image_client = ImageClient {
            host: host_url,
            model,
            credentials,
            client,
        };
        debug!("Created image client: {:?}", image_client);
        Ok(image_client)
    }
}
