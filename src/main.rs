mod batch;
mod error;
mod extract;
mod fetch;
mod input;
mod report;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use crate::error::ScrapeError;
use crate::report::ReportConfig;

#[derive(Parser)]
#[command(
    name = "outline_scraper",
    about = "Fetch pages and aggregate their heading outlines into one markdown report"
)]
struct Cli {
    /// Subdirectory under the workspace to write the report into
    output_dir: String,

    /// Newline-delimited URL list file
    #[arg(short, long, default_value = "sites.txt")]
    input: PathBuf,

    /// Max concurrent fetches (1 = strictly sequential)
    #[arg(short, long, default_value_t = 4)]
    concurrency: usize,

    /// Workspace root directory
    #[arg(long, default_value = report::DEFAULT_WORKSPACE)]
    workspace: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let urls = input::read_url_list(&cli.input)?;
    info!("Read {} URLs from {}", urls.len(), cli.input.display());

    let client = fetch::build_client()?;
    let batch = batch::run(&client, urls, cli.concurrency).await?;
    println!(
        "Fetched {} pages ({} ok, {} errors).",
        batch.stats.total, batch.stats.ok, batch.stats.errors
    );

    if batch.stats.ok == 0 {
        return Err(ScrapeError::NoResults(batch.stats.total).into());
    }

    let config = ReportConfig::with_workspace(cli.workspace);
    let draft = report::write(&config, &cli.output_dir, &batch)?;
    println!("Report written to {}", draft.display());

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
