mod dump;
mod export;
mod preset;

use std::path::PathBuf;

use clap::Parser;
use curdump_core::AppConfig;
use curdump_scraper::FetchOptions;
use tracing_subscriber::EnvFilter;

use crate::export::ExportFormat;

#[derive(Debug, Parser)]
#[command(name = "curdump")]
#[command(about = "Dump a Steam curator's reviews to JSON, CSV, or plain text")]
struct Cli {
    /// Curator id or curator page URL
    #[arg(required_unless_present = "quasarplay")]
    curator: Option<String>,

    /// Output file (default: curator_<id>_reviews.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Feed ordering passed to the store
    #[arg(long, default_value = "recent")]
    sort: String,

    /// Recommendations per page (overrides CURDUMP_BATCH_SIZE)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    batch_size: Option<u32>,

    /// Delay between page requests in milliseconds (overrides CURDUMP_INTER_REQUEST_DELAY_MS)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Dump both preset curators (퀘이사플레이, 퀘이사존) into the data directory
    #[arg(long)]
    quasarplay: bool,
}

impl Cli {
    /// Pagination options from config, with command-line overrides applied.
    fn fetch_options(&self, config: &AppConfig) -> FetchOptions {
        let mut options = FetchOptions::from_config(config, self.sort.clone());
        if let Some(batch_size) = self.batch_size {
            options.batch_size = batch_size;
        }
        if let Some(delay_ms) = self.delay_ms {
            options.inter_request_delay_ms = delay_ms;
        }
        options
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = curdump_core::load_app_config()?;

    let default_level = if cli.quiet {
        "warn"
    } else {
        config.log_level.as_str()
    };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let options = cli.fetch_options(&config);

    if cli.quasarplay {
        return dump::run_presets(&config, &options).await;
    }

    let Some(curator) = cli.curator.as_deref() else {
        anyhow::bail!("a curator id or URL is required (or pass --quasarplay)");
    };
    let request = dump::SingleDump {
        curator,
        output: cli.output.as_deref(),
        format: cli.format,
        show_progress: !cli.quiet,
    };
    dump::run_single(&config, &options, &request).await
}

#[cfg(test)]
mod tests;
