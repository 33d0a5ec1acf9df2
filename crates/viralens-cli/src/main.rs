use clap::{Parser, Subcommand};
use viralens_core::DurationBucket;

mod analyze;
mod key;
mod outline;
mod search;

#[derive(Debug, Parser)]
#[command(name = "viralens")]
#[command(about = "Find high viral-ratio videos in a niche and analyze their audience")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the catalog and rank results by view-to-subscriber ratio.
    Search {
        /// Free-text niche query, e.g. "cooking shorts".
        query: String,
        /// Video length filter: any, short (<4m), medium (4-20m), long (>20m).
        #[arg(long, default_value = "any")]
        duration: DurationBucket,
        /// Minimum viral ratio to keep; defaults to VIRALENS_MIN_RATIO.
        #[arg(long)]
        min_ratio: Option<f64>,
    },
    /// Fetch one video's comments and request a strategic audience analysis.
    Analyze {
        /// Video id from a previous search.
        video_id: String,
    },
    /// Expand one extracted keyword into a script outline.
    Outline {
        keyword: String,
        /// Title of the video whose audience wants this keyword.
        #[arg(long)]
        context: String,
    },
    /// Manage the stored YouTube API key.
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Debug, Subcommand)]
enum KeyAction {
    /// Store the key for future runs.
    Set { value: String },
    /// Show where the key lives and a masked preview.
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = viralens_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            query,
            duration,
            min_ratio,
        } => search::run_search(&config, &query, duration, min_ratio).await,
        Commands::Analyze { video_id } => analyze::run_analyze(&config, &video_id).await,
        Commands::Outline { keyword, context } => {
            outline::run_outline(&config, &keyword, &context).await
        }
        Commands::Key { action } => match action {
            KeyAction::Set { value } => key::run_key_set(&config, &value),
            KeyAction::Show => key::run_key_show(&config),
        },
    }
}
