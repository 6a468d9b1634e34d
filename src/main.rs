//! emission-rollup - one-shot aggregation runner.
//!
//! Loads configuration from the environment, connects to PostgreSQL and
//! prints the requested aggregation as JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use emission_rollup::adapters::{
    PostgresEmissionSumReader, PostgresOrganizationDirectory, RedisAggregationCache,
};
use emission_rollup::application::{
    AggregationProvider, AggregationService, CachedAggregationService, ComputeAggregationHandler,
    ComputeAggregationQuery, GetMonthlySummaryHandler, GetMonthlySummaryQuery,
    HierarchyResolver, InvalidateAggregationCommand, InvalidateAggregationHandler,
    ListDescendantsHandler, ListDescendantsQuery,
};
use emission_rollup::config::{AppConfig, RuntimeConfig};

/// emission-rollup - hierarchical emission aggregation
#[derive(Parser, Debug)]
#[command(name = "emission-rollup")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the rolled-up aggregation for one organization
    Aggregate {
        #[command(flatten)]
        org: OrgArgs,

        /// Reporting month (1-12); omit for the full year
        #[arg(long)]
        month: Option<String>,
    },

    /// Per-month class totals for a reporting year
    Monthly {
        #[command(flatten)]
        org: OrgArgs,
    },

    /// List the organizations at or below PATH
    Descendants {
        /// Hierarchy path prefix (e.g. /1/5)
        path: String,
    },

    /// Drop cached aggregations after a write at PATH
    Invalidate {
        /// Hierarchy path of the organization that was written to
        path: String,
    },

    /// Apply database migrations and exit
    Migrate,
}

#[derive(Args, Debug)]
struct OrgArgs {
    /// Requesting organization id
    #[arg(long)]
    organization_id: String,

    /// Request as the headquarters
    #[arg(long)]
    headquarters: bool,

    /// Hierarchy path, required for partners (e.g. /1/5)
    #[arg(long)]
    path: Option<String>,

    /// Reporting year
    #[arg(long)]
    year: String,
}

fn init_tracing(runtime: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(runtime.log_level.clone()));

    // stdout carries the JSON result; logs go to stderr.
    if runtime.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.runtime);

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await
        .context("failed to connect to PostgreSQL")?;

    if config.database.run_migrations || matches!(cli.command, Commands::Migrate) {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;
        info!("Migrations applied");
    }

    let directory = Arc::new(PostgresOrganizationDirectory::new(pool.clone()));
    let service = Arc::new(AggregationService::new(
        Arc::new(PostgresEmissionSumReader::new(pool)),
        directory.clone(),
        config.aggregation.max_concurrent_queries,
    ));

    let cached = match config.cache.redis_url.as_deref().filter(|_| config.cache.enabled) {
        Some(url) => {
            let client = redis::Client::open(url).context("invalid Redis URL")?;
            let conn = client
                .get_multiplexed_tokio_connection()
                .await
                .context("failed to connect to Redis")?;
            info!("Aggregation cache enabled (ttl {}s)", config.cache.ttl_secs);
            Some(Arc::new(CachedAggregationService::new(
                service.clone(),
                Arc::new(RedisAggregationCache::new(conn)),
                config.cache.ttl(),
            )))
        }
        None => None,
    };

    match cli.command {
        Commands::Aggregate { org, month } => {
            let provider: Arc<dyn AggregationProvider> = match &cached {
                Some(cached) => cached.clone() as Arc<dyn AggregationProvider>,
                None => service.clone() as Arc<dyn AggregationProvider>,
            };
            let result = ComputeAggregationHandler::new(provider)
                .handle(ComputeAggregationQuery {
                    is_headquarters: org.headquarters,
                    organization_id: Some(org.organization_id),
                    hierarchy_path: org.path,
                    year: org.year,
                    month,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Monthly { org } => {
            let months = GetMonthlySummaryHandler::new(service)
                .handle(GetMonthlySummaryQuery {
                    is_headquarters: org.headquarters,
                    organization_id: Some(org.organization_id),
                    hierarchy_path: org.path,
                    year: org.year,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&months)?);
        }
        Commands::Descendants { path } => {
            let ids = ListDescendantsHandler::new(Arc::new(HierarchyResolver::new(directory)))
                .handle(ListDescendantsQuery {
                    hierarchy_path: path,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&ids)?);
        }
        Commands::Invalidate { path } => {
            let cached = cached.context("cache is disabled; nothing to invalidate")?;
            let result = InvalidateAggregationHandler::new(cached)
                .handle(InvalidateAggregationCommand {
                    hierarchy_path: path,
                })
                .await?;
            info!(
                organizations = result.organizations,
                removed = result.entries_removed,
                "Cache invalidated"
            );
        }
        Commands::Migrate => {}
    }

    Ok(())
}
