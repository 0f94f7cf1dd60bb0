// The backup workflow itself: folder, image, upload, record. Each step
// prints where it is; the first failure ends the run.

use crate::api::{file_stem_for, DiskClient, FolderStatus};
use crate::cats::CatClient;
use crate::config::Settings;
use crate::error::Result;
use crate::record::{persist_record, BackupRecord, BackupRequest};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// One configured backup: both service clients plus where the record
/// goes.
pub struct CatBackup {
    disk: DiskClient,
    cats: CatClient,
    record_path: PathBuf,
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

impl CatBackup {
    /// Build the clients from `settings`, authenticating to the disk
    /// with `token`.
    pub fn new(settings: &Settings, token: &str) -> Result<Self> {
        Ok(CatBackup {
            disk: DiskClient::new(&settings.disk_api_url, &settings.auth_scheme, token)?,
            cats: CatClient::new(&settings.cats_base_url)?,
            record_path: settings.record_path.clone(),
        })
    }

    /// Run the whole workflow for `request`, returning the record that
    /// was written to disk.
    pub fn run(&self, request: &BackupRequest) -> Result<BackupRecord> {
        request.validate()?;
        println!(
            "Starting backup of a cat picture with caption '{}'",
            request.text
        );
        let result = self.run_steps(request);
        if let Err(e) = &result {
            error!("backup aborted: {e}");
        }
        result
    }

    fn run_steps(&self, request: &BackupRequest) -> Result<BackupRecord> {
        let folder = &request.group_name;
        match self.disk.ensure_folder(folder)? {
            FolderStatus::Created => println!("Folder '{folder}' created on the disk"),
            FolderStatus::AlreadyExists => println!("Folder '{folder}' is ready on the disk"),
        }

        println!("Fetching a picture from the content service...");
        let pb = spinner("Downloading image...")?;
        let image = self.cats.fetch_image(&request.text);
        pb.finish_and_clear();
        let image = image?;
        info!(len = image.len(), "image fetched");

        println!("Uploading to the disk...");
        let pb = spinner("Uploading...")?;
        let uploaded = self
            .disk
            .upload_image(folder, &file_stem_for(&request.text), image);
        pb.finish_and_clear();
        let uploaded = uploaded?;

        let size = uploaded.size;
        let record = BackupRecord::new(request, vec![uploaded]);
        persist_record(&record, &self.record_path)?;
        println!("Backup info saved to {}", self.record_path.display());
        println!("Backup finished, uploaded file size: {size} bytes");
        Ok(record)
    }
}
