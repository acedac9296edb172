use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use vier_content::{
    CategoryRepo, Content, ContentRepository, EpisodeByNodeIdKey, EpisodeKey, EpisodeRepo,
    EpisodeUuid, HttpTransport, ProgramKey, ProgramRepo, SearchRepo, Settings,
};

#[derive(Parser)]
#[command(name = "vier", about = "Resolve programs, episodes and search hits from the VIER catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Every program on the home page, with playlists (slow: one request per program)
    Programs,
    /// A single program by page path
    Program {
        /// e.g. /de-slimste-mens-ter-wereld
        path: String,
    },
    /// An episode by program path and node id
    Episode { program_path: String, node_id: String },
    /// An episode by its own page URL and node id (full episode or clip)
    EpisodeUrl { url: String, node_id: String },
    /// An episode by video id
    Video { uuid: String },
    /// Free-text search
    Search { query: String },
    /// Category list
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load().context("Failed to load settings")?;
    info!(base_url = %settings.base_url, sites = ?settings.sites, "Settings loaded");

    let transport = HttpTransport::from_settings(&settings).context("Failed to build HTTP client")?;
    let repo = ContentRepository::new(Arc::new(transport), settings.endpoints());

    let content = match cli.command {
        Commands::Programs => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
            pb.set_message("Fetching programs...");
            pb.enable_steady_tick(Duration::from_millis(120));
            let programs = repo.fetch_programs().await;
            pb.finish_and_clear();
            Content::Programs(programs?)
        }
        Commands::Program { path } => Content::SingleProgram(repo.fetch_program(&ProgramKey::new(path)).await?),
        Commands::Episode { program_path, node_id } => {
            let key = EpisodeKey { program_path, node_id };
            Content::SingleEpisode(repo.fetch_episode(&key).await?)
        }
        Commands::EpisodeUrl { url, node_id } => {
            let key = EpisodeByNodeIdKey { url, node_id };
            Content::SingleEpisode(repo.fetch_episode_by_node_id(&key).await?)
        }
        Commands::Video { uuid } => Content::SingleEpisode(repo.fetch_episode_by_uuid(&EpisodeUuid(uuid)).await?),
        Commands::Search { query } => Content::SearchResults(repo.search(&query).await?),
        Commands::Categories => Content::Categories(repo.fetch_categories().await?),
    };

    println!("{}", serde_json::to_string_pretty(&content)?);

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
