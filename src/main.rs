//! # folio CLI
//!
//! The `folio` binary runs the portfolio site and inspects its content
//! directory.
//!
//! ## Usage
//!
//! ```bash
//! folio --config ./config/folio.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `folio serve` | Start the portfolio HTTP server |
//! | `folio content list` | Print the parsed project table |
//! | `folio content check` | Parse every content file, fail on the first malformed one |

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use folio::{config, content, server};

/// folio — a self-hosted portfolio site with a markdown content pipeline
/// and an embeddings proxy.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/folio.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "folio",
    about = "folio — a self-hosted portfolio site with a markdown content pipeline and an embeddings proxy",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/folio.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the portfolio HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves the
    /// site pages plus the embeddings proxy endpoint.
    Serve,

    /// Inspect the content directory.
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
}

/// Content inspection subcommands.
#[derive(Subcommand)]
enum ContentAction {
    /// List parsed project documents (slug, title, summary).
    List,

    /// Parse every content file and fail on the first malformed one.
    ///
    /// Useful before deploying new content: the projects page fails as a
    /// whole if any file in the directory is broken.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Content { action } => match action {
            ContentAction::List => {
                content::run_list(&cfg)?;
            }
            ContentAction::Check => {
                content::run_check(&cfg)?;
            }
        },
    }

    Ok(())
}
