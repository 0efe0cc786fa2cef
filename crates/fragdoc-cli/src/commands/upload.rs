use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use fragdoc::models::{AccessLevel, SelectedFile};

#[derive(Args)]
pub struct UploadArgs {
    /// Path of the file to upload
    pub file: PathBuf,

    /// Access level for the document
    #[arg(long, default_value = "public")]
    pub access: AccessLevel,

    /// Group allowed to read a restricted document
    #[arg(long, default_value = "")]
    pub group: String,

    /// Send the file to the audio-transcription ingest instead
    #[arg(long)]
    pub audio: bool,
}

pub async fn run(args: UploadArgs) -> Result<()> {
    let file = SelectedFile::read(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;

    let mut controller = super::authenticated_controller().await?;
    controller.select_file(file);
    controller.set_access(args.access);
    controller.set_group(args.group);

    if args.audio {
        controller.upload_audio().await;
    } else {
        controller.upload().await;
    }

    match controller.upload_status() {
        Some(status) if status.starts_with("Fehler") => {
            println!("{} {}", style("✗").red(), status);
        }
        Some(status) => {
            println!("{} {}", style("✓").green(), status);
        }
        None => println!("Nichts hochgeladen"),
    }
    Ok(())
}
