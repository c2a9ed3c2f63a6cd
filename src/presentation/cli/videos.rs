use anyhow::Result;
use clap::{Args, Subcommand};

use super::print_json;
use crate::domain::ids::VideoId;
use crate::domain::videos::NewVideo;
use crate::infrastructure::client::TubelyClient;

#[derive(Debug, Subcommand)]
pub enum VideoCommands {
    /// Create a video owned by the token's user
    Create(CreateVideoCommand),
    /// Get a video by ID
    Get(GetVideoCommand),
    /// List your videos
    List,
}

pub async fn run(client: &TubelyClient, cmd: VideoCommands) -> Result<()> {
    match cmd {
        VideoCommands::Create(c) => create_video(client, c).await,
        VideoCommands::Get(c) => get_video(client, c).await,
        VideoCommands::List => list_videos(client).await,
    }
}

#[derive(Debug, Args)]
pub struct CreateVideoCommand {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
}

pub async fn create_video(client: &TubelyClient, command: CreateVideoCommand) -> Result<()> {
    let payload = NewVideo {
        title: command.title,
        description: command.description,
    };
    let video = client.videos().create(&payload).await?;
    print_json(&video)
}

#[derive(Debug, Args)]
pub struct GetVideoCommand {
    pub id: VideoId,
}

pub async fn get_video(client: &TubelyClient, command: GetVideoCommand) -> Result<()> {
    let video = client.videos().get(command.id).await?;
    print_json(&video)
}

pub async fn list_videos(client: &TubelyClient) -> Result<()> {
    let videos = client.videos().list().await?;
    print_json(&videos)
}
