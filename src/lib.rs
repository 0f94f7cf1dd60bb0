// Library root
// -----------
// The binary (`main.rs`) only sets up logging and calls into `ui`; the
// workflow lives here so it can be driven from tests.
//
// Module responsibilities:
// - `config`: endpoints and output path, read from the environment.
// - `error`: `BackupError` and the crate `Result` alias.
// - `cats`: fetches captioned images from the content service.
// - `api`: folder creation, upload and metadata calls to the disk API.
// - `record`: request/record types and the JSON sidecar writer.
// - `backup`: the linear backup workflow.
// - `ui`: interactive prompts.
pub mod api;
pub mod backup;
pub mod cats;
pub mod config;
pub mod error;
pub mod record;
pub mod ui;

pub use backup::CatBackup;
pub use config::Settings;
pub use error::{BackupError, Result};
pub use record::{BackupRecord, BackupRequest, UploadedFileInfo};
