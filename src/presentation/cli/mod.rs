pub mod thumbnails;
pub mod tokens;
pub mod videos;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thumbnails::ThumbnailCommands;
use tokens::TokenCommands;
use videos::VideoCommands;

use crate::application::state::ThumbnailStorage;

#[derive(Debug, Parser)]
#[command(author, version, about = "Host videos and their thumbnails", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "TUBELY_URL",
        default_value = "http://localhost:8091"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Manage videos
    Video {
        #[command(subcommand)]
        command: VideoCommands,
    },

    /// Upload thumbnails
    Thumbnail {
        #[command(subcommand)]
        command: ThumbnailCommands,
    },

    /// Issue access tokens locally from the shared secret
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThumbnailStorageKind {
    /// Write files under the assets root
    Disk,
    /// Keep thumbnails in process memory
    Memory,
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(
        long,
        env = "TUBELY_DATABASE_URL",
        default_value = "sqlite://tubely.db"
    )]
    pub database_url: String,

    #[arg(long, env = "TUBELY_BIND_ADDRESS", default_value = "127.0.0.1:8091")]
    pub bind_address: SocketAddr,

    /// Base URL used when building thumbnail URLs
    #[arg(
        long,
        env = "TUBELY_PUBLIC_URL",
        default_value = "http://localhost:8091"
    )]
    pub public_url: String,

    #[arg(long, env = "TUBELY_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    #[arg(long, env = "TUBELY_ASSETS_ROOT", default_value = "./assets")]
    pub assets_root: PathBuf,

    #[arg(
        long,
        env = "TUBELY_THUMBNAIL_STORAGE",
        value_enum,
        default_value_t = ThumbnailStorageKind::Disk
    )]
    pub thumbnail_storage: ThumbnailStorageKind,
}

impl ServeCommand {
    pub fn thumbnail_storage(&self) -> ThumbnailStorage {
        match self.thumbnail_storage {
            ThumbnailStorageKind::Disk => ThumbnailStorage::Disk {
                assets_root: self.assets_root.clone(),
            },
            ThumbnailStorageKind::Memory => ThumbnailStorage::Memory,
        }
    }
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
