use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tubely::application::{ServerConfig, serve};
use tubely::infrastructure::client::TubelyClient;
use tubely::presentation::cli::{Cli, Commands, ServeCommand, thumbnails, tokens, videos};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => run_server(cmd).await,
        Commands::Video { command } => {
            let client = TubelyClient::from_base_url(&cli.api_url)?;
            videos::run(&client, command).await
        }
        Commands::Thumbnail { command } => {
            let client = TubelyClient::from_base_url(&cli.api_url)?;
            thumbnails::run(&client, command).await
        }
        Commands::Token { command } => tokens::run(command),
    }
}

async fn run_server(command: ServeCommand) -> Result<()> {
    let thumbnail_storage = command.thumbnail_storage();

    let config = ServerConfig {
        bind_address: command.bind_address,
        database_url: command.database_url,
        public_url: command.public_url,
        jwt_secret: command.jwt_secret,
        thumbnail_storage,
    };

    serve(config).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
