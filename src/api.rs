// Storage provider client: a small blocking wrapper over the Yandex Disk
// resources API. Covers folder creation, the two-step upload (ask for a
// pre-signed URL, then PUT to it) and the metadata lookup that follows.

use crate::error::{BackupError, Result};
use crate::record::UploadedFileInfo;
use chrono::Local;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Outcome of [`DiskClient::ensure_folder`]. Both variants mean the
/// folder is ready to receive files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    Created,
    AlreadyExists,
}

/// Response of the `/upload` endpoint. Only `href` matters to us.
#[derive(Deserialize, Debug)]
struct UploadLink {
    href: Option<String>,
}

/// Subset of the resource metadata returned by the provider.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceInfo {
    pub path: Option<String>,
    pub size: Option<u64>,
}

/// Blocking client for the disk resources API. Holds the base URL of the
/// resources endpoint and the token sent with every call.
#[derive(Clone)]
pub struct DiskClient {
    client: Client,
    base_url: String,
    auth_scheme: String,
    token: String,
}

/// Object name used on the disk for a caption. Slashes would otherwise be
/// read as nested folders.
pub fn file_stem_for(caption: &str) -> String {
    caption.trim().replace(['/', '\\'], "_")
}

impl DiskClient {
    /// Create a client for `base_url` that authenticates as
    /// `<auth_scheme> <token>`. No request timeout is set.
    pub fn new(
        base_url: impl Into<String>,
        auth_scheme: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder().timeout(None).build()?;
        Ok(DiskClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_scheme: auth_scheme.into(),
            token: token.into(),
        })
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let val = format!("{} {}", self.auth_scheme, self.token);
        let val = HeaderValue::from_str(&val)
            .map_err(|_| BackupError::InvalidInput("token contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, val);
        Ok(headers)
    }

    /// Create `name` at the disk root. An existing folder is not an error.
    pub fn ensure_folder(&self, name: &str) -> Result<FolderStatus> {
        debug!(folder = name, "creating folder");
        let res = self
            .client
            .put(&self.base_url)
            .query(&[("path", name)])
            .headers(self.auth_headers()?)
            .send()?;
        match res.status() {
            StatusCode::CREATED => {
                info!(folder = name, "folder created");
                Ok(FolderStatus::Created)
            }
            StatusCode::CONFLICT => {
                info!(folder = name, "folder already exists");
                Ok(FolderStatus::AlreadyExists)
            }
            status => {
                warn!(folder = name, %status, "folder creation failed");
                Err(BackupError::UnexpectedStatus {
                    step: "folder creation",
                    status,
                })
            }
        }
    }

    /// Upload `content` as `<folder>/<name>.jpg`, overwriting any object
    /// already there, and return what the provider reports about it.
    pub fn upload_image(
        &self,
        folder: &str,
        name: &str,
        content: Vec<u8>,
    ) -> Result<UploadedFileInfo> {
        let file_name = format!("{name}.jpg");
        let remote_path = format!("{folder}/{file_name}");
        let uploaded_len = content.len() as u64;

        let href = self.upload_href(&remote_path)?;
        debug!(path = %remote_path, len = uploaded_len, "uploading bytes");

        // The href is pre-signed, so no auth header here.
        let res = self.client.put(&href).body(content).send()?;
        let status = res.status();
        if !status.is_success() {
            warn!(%status, "upload rejected");
            return Err(BackupError::UnexpectedStatus {
                step: "file upload",
                status,
            });
        }

        let info = self.resource_info(&remote_path)?;
        info!(path = %remote_path, size = ?info.size, "upload complete");
        Ok(UploadedFileInfo {
            file_name,
            size: info.size.unwrap_or(uploaded_len),
            created: Local::now(),
            path: info.path.unwrap_or(remote_path),
        })
    }

    fn upload_href(&self, remote_path: &str) -> Result<String> {
        let res = self
            .client
            .get(format!("{}/upload", self.base_url))
            .query(&[("path", remote_path), ("overwrite", "true")])
            .headers(self.auth_headers()?)
            .send()?;
        let status = res.status();
        let body = res.text()?;
        let link = serde_json::from_str::<UploadLink>(&body).ok();
        match link.and_then(|l| l.href) {
            Some(href) => Ok(href),
            None => {
                warn!(%status, "provider did not return an upload URL");
                Err(BackupError::MissingUploadHref(format!("{status} - {body}")))
            }
        }
    }

    /// Metadata for an object on the disk.
    pub fn resource_info(&self, remote_path: &str) -> Result<ResourceInfo> {
        let res = self
            .client
            .get(&self.base_url)
            .query(&[("path", remote_path)])
            .headers(self.auth_headers()?)
            .send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(BackupError::UnexpectedStatus {
                step: "metadata lookup",
                status,
            });
        }
        Ok(res.json()?)
    }
}
