//!
//! `imagegen` posts a text prompt to a Gemini style `generateContent` endpoint and
//! stores the base64 encoded image it answers with.
//!
//! ```rust,ignore
//! let token = imagegen::load_token(Path::new("token.txt"))?;
//! let client = ImageClient::new("https://api.vectorengine.ai", Credentials::Bearer(token))?;
//! let image = client.generate("a pixel art slime", "1:1", "0.5K").await?;
//! let path = imagegen::save_image(&image, None, Path::new("."))?;
//! ```
use std::fmt::{self, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use chrono::{DateTime, Local};
use log::{debug, info};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Method, RequestBuilder, StatusCode,
};
use thiserror::Error;
use url::{ParseError, Url};

use models::{GenerateContentRequest, GenerateContentResponse, InlineData};

pub mod builder;
pub mod models;

pub use builder::ImageClientBuilder;

pub const DEFAULT_HOST: &str = "https://api.vectorengine.ai";
pub const DEFAULT_MODEL: &str = "gemini-3.1-flash-image-preview";
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";
pub const DEFAULT_IMAGE_SIZE: &str = "0.5K";

type Result<T> = std::result::Result<T, ImageGenError>;

#[derive(Error, Debug)]
pub enum ImageGenError {
    #[error("The image service rejected the token")]
    Unauthorized,
    #[error("Not found: '{0}'")]
    NotFound(String),
    #[error("Image service error ({code}):\n{body}")]
    Fault { code: StatusCode, body: String },
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Could not serialize/deserialize: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid service URL: {0}")]
    ParseError(#[from] ParseError),
    #[error("No image in the response: {0}")]
    NoImage(String),
    #[error("Image data is not valid base64: {0}")]
    DecodeError(#[from] base64::DecodeError),
    #[error("No API token found in {0}")]
    TokenNotFound(PathBuf),
    #[error("Unable to write {path}: {source}")]
    WriteImage {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Clone)]
pub enum Credentials {
    Anonymous,
    Bearer(String),
}

impl Credentials {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Anonymous => request,
            Credentials::Bearer(ref token) => request.bearer_auth(token.to_owned()),
        }
    }
}

/// Keeps the token out of the logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Anonymous => write!(f, "Anonymous"),
            Credentials::Bearer(_) => write!(f, "Bearer(***)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImageClient {
    host: Url,
    model: String,
    credentials: Credentials,
    client: Client,
}

impl ImageClient {
    /// Creates a client for the default model
    ///
    /// # Errors
    /// Fails if `host` is not a valid URL.
    pub fn new<H>(host: H, credentials: Credentials) -> Result<ImageClient>
    where
        H: Into<String>,
    {
        let host = Url::parse(&host.into())?;

        Ok(ImageClient {
            host,
            model: DEFAULT_MODEL.to_string(),
            credentials,
            client: Client::new(),
        })
    }

    #[must_use]
    pub fn builder() -> ImageClientBuilder {
        ImageClientBuilder::new()
    }

    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends the request and hands back the body of a successful response
    async fn request(&self, method: Method, endpoint: &str, body: Option<Vec<u8>>) -> Result<String> {
        let url = self.host.join(endpoint)?;

        let mut request = self
            .client
            .request(method, url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        request = self.credentials.apply(request);

        if let Some(body) = body {
            request = request.body(body);
        }
        debug!("request '{:?}'", request);

        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("status {:?} body length {}", status, body.len());
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ImageGenError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ImageGenError::NotFound(url.to_string())),
            failed if failed.is_client_error() || failed.is_server_error() => {
                Err(ImageGenError::Fault { code: status, body })
            }
            _ => Ok(body),
        }
    }

    fn generate_resource(&self) -> String {
        format!("/v1beta/models/{}:generateContent", self.model)
    }

    /// Asks the model for an image matching `prompt`.
    ///
    /// # Errors
    /// * HTTP failures, reported by status
    /// * A response which is not JSON
    /// * `NoImage`, carrying the response body, when no candidate holds inline data
    pub async fn generate(&self, prompt: &str, aspect_ratio: &str, image_size: &str) -> Result<InlineData> {
        let request = GenerateContentRequest::for_prompt(prompt, aspect_ratio, image_size);
        let data = serde_json::to_string(&request)?;
        info!("Generating {aspect_ratio} {image_size} image with {}", self.model);

        let body = self
            .request(Method::POST, &self.generate_resource(), Some(data.into_bytes()))
            .await?;
        let response = serde_json::from_str::<GenerateContentResponse>(&body)?;
        if let Some(text) = response.text() {
            debug!("Model says: {text}");
        }
        response
            .first_image()
            .cloned()
            .ok_or(ImageGenError::NoImage(body))
    }
}

/// Reads the API token from `path`, surrounding white space removed.
///
/// # Errors
/// `TokenNotFound` if the file cannot be read or holds nothing but white space.
pub fn load_token(path: &Path) -> Result<String> {
    let token = fs::read_to_string(path).map_err(|_| ImageGenError::TokenNotFound(path.into()))?;
    let token = token.trim();
    if token.is_empty() {
        return Err(ImageGenError::TokenNotFound(path.into()));
    }
    Ok(token.to_string())
}

/// File extension matching a mime type, `png` for anything unrecognised
#[must_use]
pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

/// `generated_<timestamp>.<ext>`
#[must_use]
pub fn default_file_name(timestamp: DateTime<Local>, mime_type: &str) -> String {
    format!(
        "generated_{}.{}",
        timestamp.format("%Y%m%d_%H%M%S"),
        extension_for(mime_type)
    )
}

/// Decodes the image and writes it to `output`, or to a timestamped file in
/// `output_dir` when no output is given. Returns the path written.
///
/// # Errors
/// Fails on invalid base64 data or when the file cannot be written.
pub fn save_image(image: &InlineData, output: Option<&Path>, output_dir: &Path) -> Result<PathBuf> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(image.data.trim())?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => output_dir.join(default_file_name(Local::now(), &image.mime_type)),
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ImageGenError::WriteImage {
                path: path.clone(),
                source,
            })?;
        }
    }
    fs::write(&path, bytes).map_err(|source| ImageGenError::WriteImage {
        path: path.clone(),
        source,
    })?;
    info!("Image saved to {}", path.display());
    Ok(path)
}
