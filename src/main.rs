//! # Shelfwise CLI (`shelf`)
//!
//! Builds the recommender from the configured dataset and answers queries.
//!
//! ## Usage
//!
//! ```bash
//! shelf --config ./config/shelf.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `shelf recommend "<title>"` | Rank books similar to a title |
//! | `shelf stats` | Summarize the loaded corpus |
//!
//! ## Examples
//!
//! ```bash
//! # Ten recommendations with the configured weights
//! shelf recommend "Becoming"
//!
//! # Popularity only, as JSON
//! shelf recommend "Becoming" --weight-content 0 --weight-popularity 1 --format json
//!
//! # Bar chart of the top five
//! shelf recommend "Becoming" --top-n 5 --format chart
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use shelfwise::recommend::RecommendOptions;
use shelfwise::{config, engine, recommend, stats};

/// Shelfwise CLI — hybrid content + popularity book recommendations.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/shelf.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "shelf",
    about = "Shelfwise — hybrid content + popularity book recommendations",
    version,
    long_about = "Shelfwise vectorizes each book's title, author and genre with TF-IDF, \
    computes pairwise cosine similarity, and blends it with min-max normalized rating and \
    review counts to rank books similar to a queried title."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/shelf.toml")]
    config: PathBuf,

    /// Override `[dataset].path` from the config file.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Recommend books similar to a title.
    ///
    /// The title must match a dataset title exactly, ignoring case.
    Recommend {
        /// Title of the book to find neighbours for.
        title: String,

        /// Number of recommendations to return.
        #[arg(long)]
        top_n: Option<usize>,

        /// Weight of content similarity in the combined score.
        #[arg(long)]
        weight_content: Option<f64>,

        /// Weight of popularity in the combined score.
        #[arg(long)]
        weight_popularity: Option<f64>,

        /// Output format: `text`, `json`, or `chart`.
        #[arg(long, default_value = "text")]
        format: String,

        /// Include a per-result score breakdown.
        #[arg(long)]
        explain: bool,
    },

    /// Show corpus statistics.
    ///
    /// Item and vocabulary counts, zero vectors, popularity ranges, and
    /// warnings for constant metrics.
    Stats,
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut cfg = config::load_config(&cli.config)?;
    if let Some(path) = cli.dataset {
        cfg.dataset.path = path;
    }

    let recommender = engine::build_recommender(&cfg)?;

    match cli.command {
        Commands::Recommend {
            title,
            top_n,
            weight_content,
            weight_popularity,
            format,
            explain,
        } => {
            let opts = RecommendOptions {
                top_n,
                weight_content,
                weight_popularity,
                format,
                explain,
            };
            recommend::run_recommend(&cfg, &recommender, &title, &opts)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg, &recommender)?;
        }
    }

    Ok(())
}
