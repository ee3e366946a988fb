mod classify;
mod import;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dinescout_core::StoreBackend;
use dinescout_db::{PgRestaurantStore, RestaurantStore};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dinescout-cli")]
#[command(about = "dinescout operator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Import restaurant documents from a JSON file
    Import {
        /// JSON file: an array of documents, or pages of `{"restaurant": {...}}` entries
        path: PathBuf,
        /// Parse and count documents without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Classify an image and print the cuisine tags it yields
    Classify {
        /// Image file to send to the classifier
        path: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("dinescout-cli: run with --help to list commands");
        return Ok(());
    };

    let config = dinescout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Db { command } => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    PgRestaurantStore::new(pool).ping().await?;
                    println!("database: ok");
                }
                DbCommands::Migrate => {
                    let applied = dinescout_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Commands::Import { path, dry_run } => {
            if dry_run {
                import::run_import(None, &path).await?;
            } else {
                let store = PgRestaurantStore::new(connect(&config).await?);
                import::run_import(Some(&store), &path).await?;
            }
        }
        Commands::Classify { path } => classify::run_classify(&config, &path).await?,
    }

    Ok(())
}

async fn connect(config: &dinescout_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    if config.store_backend == StoreBackend::Memory {
        anyhow::bail!("DINESCOUT_STORE=memory has no database; use the postgres store for this command");
    }
    Ok(dinescout_db::connect_pool_from_config(config).await?)
}

#[cfg(test)]
mod tests;
