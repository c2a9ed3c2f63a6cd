use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use super::print_json;
use crate::domain::ids::VideoId;
use crate::infrastructure::client::TubelyClient;

#[derive(Debug, Subcommand)]
pub enum ThumbnailCommands {
    /// Upload an image as a video's thumbnail
    Upload(UploadThumbnailCommand),
}

pub async fn run(client: &TubelyClient, cmd: ThumbnailCommands) -> Result<()> {
    match cmd {
        ThumbnailCommands::Upload(c) => upload_thumbnail(client, c).await,
    }
}

#[derive(Debug, Args)]
pub struct UploadThumbnailCommand {
    pub video_id: VideoId,
    pub file: PathBuf,
    /// Override the content type guessed from the file extension
    #[arg(long)]
    pub content_type: Option<String>,
}

pub async fn upload_thumbnail(client: &TubelyClient, command: UploadThumbnailCommand) -> Result<()> {
    let video = client
        .thumbnails()
        .upload(
            command.video_id,
            &command.file,
            command.content_type.as_deref(),
        )
        .await?;
    print_json(&video)
}
