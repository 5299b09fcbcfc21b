//! Operator tool for the task schema.
//!
//! ```text
//! taskmaster-schema ensure-tables            create tasks table + indexes if missing
//! taskmaster-schema stamp [--revision R]     repair a dangling version marker
//! taskmaster-schema stamp --force            overwrite the marker unconditionally
//! taskmaster-schema status                   show table presence and marker
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use taskmaster_db::schema::{self, StampPlan};
use taskmaster_db::PoolSettings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "taskmaster-schema")]
#[command(about = "Bootstrap the task schema and repair the migration version marker")]
#[command(version)]
struct Cli {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the tasks table and its indexes if they do not exist.
    EnsureTables,

    /// Point the version marker at a known revision.
    Stamp {
        /// Revision to write.
        #[arg(long, default_value = schema::LATEST_REVISION)]
        revision: String,

        /// Overwrite the marker even if it already names a known revision.
        #[arg(long)]
        force: bool,
    },

    /// Show whether the tasks table exists and the current marker.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskmaster_db=info,taskmaster_schema=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let pool = taskmaster_db::create_pool(&cli.database_url, &PoolSettings::default())
        .await
        .context("failed to connect to database")?;
    tracing::info!(database = %redact(&cli.database_url), "Connected");

    match cli.command {
        Command::EnsureTables => {
            let report = schema::ensure_task_schema(&pool).await?;
            if report.table_created {
                println!("tasks table created");
            } else {
                println!("tasks table already exists");
            }
            if let Some(plan) = report.stamped {
                print_plan(&plan);
            }
        }
        Command::Stamp { revision, force } => {
            let plan = schema::stamp_revision(&pool, &revision, force).await?;
            print_plan(&plan);
        }
        Command::Status => {
            let exists = schema::table_exists(&pool, "tasks").await?;
            let marker = schema::current_revision(&pool).await?;
            println!("tasks table: {}", if exists { "present" } else { "missing" });
            match marker {
                Some(rev) if schema::is_known_revision(&rev) => println!("version marker: {rev}"),
                Some(rev) => println!("version marker: {rev} (unknown revision)"),
                None => println!("version marker: none"),
            }
        }
    }

    pool.close().await;
    Ok(())
}

fn print_plan(plan: &StampPlan) {
    match plan {
        StampPlan::Keep(rev) => println!("version marker unchanged: {rev}"),
        StampPlan::Set { from, to } => println!(
            "version marker: {} -> {to}",
            from.as_deref().unwrap_or("none")
        ),
    }
}

/// Hide credentials in a connection string before logging it.
fn redact(url: &str) -> String {
    match url.split_once('@') {
        Some((_, host)) => format!("***@{host}"),
        None => url.to_string(),
    }
}
