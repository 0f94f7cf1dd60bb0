// UI layer: prompts for the three inputs with `dialoguer` and hands them
// to the backup workflow. Failures are reported here and end the session.

use crate::backup::CatBackup;
use crate::config::Settings;
use crate::record::BackupRequest;
use anyhow::Result;
use dialoguer::{Input, Password};

/// Ask for caption, token and folder, then run one backup.
pub fn run_interactive(settings: &Settings) -> Result<()> {
    println!("=== Cat picture backup ===");

    let text: String = Input::new()
        .with_prompt("Caption for the picture")
        .interact_text()?;
    // Hidden input, the token is a credential.
    let token: String = Password::new().with_prompt("Disk token").interact()?;
    let group: String = Input::new()
        .with_prompt("Folder (group) name")
        .interact_text()?;

    let request = match BackupRequest::new(text, group, token) {
        Ok(req) => req,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };

    let backup = CatBackup::new(settings, &request.token)?;
    match backup.run(&request) {
        Ok(_) => println!("Backup completed successfully!"),
        Err(e) => println!("Backup finished with errors: {}", e),
    }
    Ok(())
}
