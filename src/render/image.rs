use crate::card::CardError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use url::Url;

const LOG_TARGET: &str = "     image";

/// Largest background image accepted for embedding.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const FALLBACK_MIME_TYPE: &str = "image/png";

/// A raster image ready to be inlined as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedImage {
    pub mime_type: String,
    pub base64: String,
}

impl EmbeddedImage {
    /// Encode raw image bytes.
    #[must_use]
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            base64: STANDARD.encode(bytes),
        }
    }

    /// The `data:` URI for this image.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Fetches an image by URL and prepares it for embedding.
pub trait ImageEncoder: Send + Sync {
    fn encode(&self, url: &Url) -> impl Future<Output = Result<EmbeddedImage, CardError>> + Send;
}

/// [`ImageEncoder`] that downloads images over HTTP.
#[derive(Debug, Clone)]
pub struct HttpImageEncoder {
    client: reqwest::Client,
}

impl HttpImageEncoder {
    pub fn new(user_agent: &str, timeout: Duration) -> crate::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().user_agent(user_agent).timeout(timeout).build()?,
        })
    }
}

impl ImageEncoder for HttpImageEncoder {
    async fn encode(&self, url: &Url) -> Result<EmbeddedImage, CardError> {
        log::debug!(target: LOG_TARGET, "Downloading background image from '{url}'");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .into_app_err_with(|| format!("could not download image from '{url}'"))
            .map_err(CardError::upstream)?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(CardError::NotFound(format!("image '{url}'")));
        }

        let resp = resp
            .error_for_status()
            .into_app_err_with(|| format!("image download from '{url}' was rejected"))
            .map_err(CardError::upstream)?;

        let mime_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase());

        let mime_type = match mime_type {
            Some(mime) if mime.starts_with("image/") => mime,
            Some(mime) if mime != "application/octet-stream" => {
                return Err(CardError::invalid(format!("'{url}' is not an image (content type '{mime}')")));
            }
            _ => FALLBACK_MIME_TYPE.to_string(),
        };

        if resp.content_length().is_some_and(|len| len > MAX_IMAGE_BYTES as u64) {
            return Err(CardError::invalid(format!("image at '{url}' is larger than {MAX_IMAGE_BYTES} bytes")));
        }

        let bytes = resp
            .bytes()
            .await
            .into_app_err_with(|| format!("could not read image body from '{url}'"))
            .map_err(CardError::upstream)?;

        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(CardError::invalid(format!("image at '{url}' is larger than {MAX_IMAGE_BYTES} bytes")));
        }

        if bytes.is_empty() {
            return Err(CardError::upstream(app_err!("image at '{url}' is empty")));
        }

        log::debug!(target: LOG_TARGET, "Embedding {} bytes of {mime_type} from '{url}'", bytes.len());

        Ok(EmbeddedImage::from_bytes(mime_type, &bytes))
    }
}
