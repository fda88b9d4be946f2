mod profiles;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spdb_core::{config::DEFAULT_MIN_HTML_LEN, Platform};

#[derive(Debug, Parser)]
#[command(name = "spdb-cli")]
#[command(about = "Social profile database command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract a profile from a saved HTML page and print it as JSON
    Extract {
        /// Profile URL the page was captured from
        #[arg(long)]
        url: String,
        /// Path to the captured HTML
        #[arg(long)]
        html_file: PathBuf,
        /// Store the extracted profile in the database
        #[arg(long)]
        save: bool,
        /// Print single-line JSON instead of pretty output
        #[arg(long)]
        compact: bool,
        /// Reject pages shorter than this many characters
        #[arg(long, env = "SPDB_MIN_HTML_LEN", default_value_t = DEFAULT_MIN_HTML_LEN)]
        min_html_len: usize,
    },
    /// Print the platform a URL belongs to
    Detect { url: String },
    /// List supported platforms
    Platforms,
    /// List stored profiles for a platform, newest first
    List {
        platform: Platform,
        /// Maximum number of profiles to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Extract {
            url,
            html_file,
            save,
            compact,
            min_html_len,
        }) => {
            let options = profiles::ExtractOptions {
                url,
                html_file,
                save,
                compact,
                min_html_len,
            };
            profiles::run_extract(&options).await?;
        }
        Some(Commands::Detect { url }) => {
            println!("{}", profiles::detect_label(&url));
        }
        Some(Commands::Platforms) => {
            for platform in spdb_extract::supported_platforms() {
                println!("{platform}");
            }
        }
        Some(Commands::List { platform, limit }) => {
            let pool = connect().await?;
            profiles::run_list(&pool, platform, limit).await?;
        }
        Some(Commands::Db { command }) => {
            let pool = connect().await?;
            match command {
                DbCommands::Ping => {
                    spdb_db::health_check(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = spdb_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        None => println!("spdb-cli ready; run with --help for commands"),
    }

    Ok(())
}

/// Logs go to stderr so JSON on stdout stays machine-readable.
fn init_tracing() -> anyhow::Result<()> {
    let fallback = std::env::var("SPDB_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

pub(crate) async fn connect() -> anyhow::Result<sqlx::PgPool> {
    let config = spdb_core::load_app_config()?;
    let pool_config = spdb_db::PoolConfig::from_app_config(&config);
    let pool = spdb_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests;
