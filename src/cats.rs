// Content service client: asks cataas.com for a cat picture with the
// caption drawn on it and hands back the raw image bytes.

use crate::config::IMAGE_CONNECT_TIMEOUT;
use crate::error::{BackupError, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{debug, warn};

/// Blocking client for the content service.
#[derive(Clone)]
pub struct CatClient {
    client: Client,
    base_url: String,
}

impl CatClient {
    /// Create a client for `base_url`. Only connecting is time-limited;
    /// the download itself may take as long as it needs.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(IMAGE_CONNECT_TIMEOUT)
            .timeout(None)
            .build()?;
        Ok(CatClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// `<base>/cat/says/<text>`, with the caption encoded as one path
    /// segment so slashes or question marks stay part of the text.
    pub fn image_url(&self, text: &str) -> Result<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| BackupError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| BackupError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["cat", "says", text]);
        Ok(url)
    }

    /// Download the captioned image. Non-2xx responses and empty bodies
    /// are errors.
    pub fn fetch_image(&self, text: &str) -> Result<Vec<u8>> {
        let url = self.image_url(text)?;
        debug!(%url, "requesting cat image");
        let res = self.client.get(url).send()?;
        let status = res.status();
        if !status.is_success() {
            warn!(%status, "content service rejected the request");
            return Err(BackupError::UnexpectedStatus {
                step: "image fetch",
                status,
            });
        }
        let bytes = res.bytes()?;
        if bytes.is_empty() {
            return Err(BackupError::EmptyImage);
        }
        debug!(len = bytes.len(), "cat image received");
        Ok(bytes.to_vec())
    }
}
