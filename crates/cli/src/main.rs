//! buildscope CLI - build metric collection and reporting.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use buildscope_core::{BuildMetric, MetricId, ReportIdentity};
use buildscope_report::{collect_metric, BuildContext, MetricHistory, ReportConfig, ReportGenerator};
use buildscope_storage::{JsonMetricStore, MetricFilter, MetricStore};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DAY_MS: i64 = 86_400_000;

#[derive(Parser)]
#[command(name = "buildscope")]
#[command(about = "Build metric collection and historical reports", long_about = None)]
struct Cli {
    /// Metric store directory
    #[arg(long, global = true, default_value = ".buildscope")]
    store: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect a metric from a build trace and store it
    Collect {
        /// Build trace (JSON)
        #[arg(long)]
        trace: PathBuf,
    },
    /// Store an already collected metric
    Record {
        /// Metric (JSON)
        #[arg(long)]
        file: PathBuf,
    },
    /// Generate a report from stored metrics
    Report {
        /// Branch name
        #[arg(long)]
        branch: String,
        /// Requested task, repeatable
        #[arg(long = "task", required = true)]
        tasks: Vec<String>,
        /// Number of days of history
        #[arg(long, default_value = "7")]
        days: i64,
        /// Report configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output file, stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List stored metrics
    List {
        /// Filter by branch
        #[arg(long)]
        branch: Option<String>,
    },
    /// Show a stored metric
    Show {
        /// Metric ID
        id: String,
    },
    /// Delete a stored metric
    Delete {
        /// Metric ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut store = JsonMetricStore::new(&cli.store).await?;

    match cli.command {
        Commands::Collect { trace } => {
            let context: BuildContext = read_json(&trace).await?;
            let metric = collect_metric(&context)?;
            store.save_metric(&metric).await?;
            println!("Collected metric: {}", metric.id);
        }
        Commands::Record { file } => {
            let metric: BuildMetric = read_json(&file).await?;
            store.save_metric(&metric).await?;
            println!("Recorded metric: {}", metric.id);
        }
        Commands::Report { branch, tasks, days, config, out } => {
            if days <= 0 {
                anyhow::bail!("--days must be positive");
            }

            let config = match config {
                Some(path) => read_json::<ReportConfig>(&path).await?,
                None => ReportConfig::default(),
            };
            let generator = ReportGenerator::new().with_config(config)?;

            let now = chrono::Utc::now().timestamp_millis();
            let filter = MetricFilter {
                branch: Some(branch.clone()),
                requested_tasks: Some(tasks.clone()),
                since: Some(now.saturating_sub(days.saturating_mul(DAY_MS))),
            };
            let history = MetricHistory::new(store.list_metrics(&filter).await?);
            info!("Loaded {} metrics from the last {} days", history.len(), days);

            let report = generator.generate(ReportIdentity::new(branch, tasks), &history)?;
            let json = serde_json::to_string_pretty(&report)?;
            match out {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Report written to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::List { branch } => {
            let filter = MetricFilter {
                branch,
                ..Default::default()
            };
            let metrics = store.list_metrics(&filter).await?;

            println!("Metrics ({})", metrics.len());
            for metric in metrics {
                println!(
                    "  {} | {} | {} | {} | {}",
                    metric.id,
                    format_time(&metric),
                    metric.branch,
                    metric.requested_tasks.join(" "),
                    format_outcome(&metric),
                );
            }
        }
        Commands::Show { id } => {
            let id = parse_id(&id)?;
            let Some(metric) = store.load_metric(id).await? else {
                println!("Metric not found");
                return Ok(());
            };
            println!("{}", serde_json::to_string_pretty(&metric)?);
        }
        Commands::Delete { id } => {
            let id = parse_id(&id)?;
            store.delete_metric(id).await?;
            println!("Deleted metric: {}", id);
        }
    }

    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn parse_id(id: &str) -> Result<MetricId> {
    id.parse().map_err(|_| anyhow::anyhow!("Invalid metric ID: {}", id))
}

fn format_time(metric: &BuildMetric) -> String {
    metric
        .created_at_time()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| metric.created_at.to_string())
}

fn format_outcome(metric: &BuildMetric) -> &'static str {
    match metric.outcome {
        Some(outcome) if outcome.is_success() => "success",
        Some(_) => "failure",
        None => "-",
    }
}
