//! Dump command handlers.
//!
//! Called from `main` once config and logging are set up. A single-curator
//! run fails when nothing could be collected; a preset run logs and moves on
//! so one empty curator does not block the other.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use curdump_core::{AppConfig, CuratorExport, CuratorInfo, ReviewRecord};
use curdump_scraper::{parse_curator_id, ClientSettings, CuratorClient, FetchOptions};

use crate::export::{default_output_path, write_export, ExportFormat};
use crate::preset::QUASARPLAY_PRESETS;

/// Arguments for dumping one curator.
pub(crate) struct SingleDump<'a> {
    /// Curator id or curator page URL, as typed.
    pub curator: &'a str,
    pub output: Option<&'a Path>,
    pub format: ExportFormat,
    pub show_progress: bool,
}

fn build_client(config: &AppConfig) -> anyhow::Result<CuratorClient> {
    let client = CuratorClient::new(&ClientSettings::from(config))
        .map_err(|e| anyhow::anyhow!("failed to build curator client: {e}"))?;
    tracing::debug!(store_url = client.store_url(), "curator client ready");
    Ok(client)
}

/// Dumps one curator's reviews to a file.
///
/// # Errors
///
/// Returns an error if the curator argument is not an id or curator URL,
/// the feed cannot be reached, no reviews were collected, or the output
/// file cannot be written.
pub(crate) async fn run_single(
    config: &AppConfig,
    options: &FetchOptions,
    request: &SingleDump<'_>,
) -> anyhow::Result<()> {
    let curator_id = parse_curator_id(request.curator)
        .with_context(|| format!("invalid curator id or URL: {}", request.curator))?;
    let output = request
        .output
        .map_or_else(|| default_output_path(curator_id, request.format), Path::to_path_buf);

    tracing::info!(
        curator_id,
        format = ?request.format,
        output = %output.display(),
        "starting curator dump"
    );

    let client = build_client(config)?;
    let (info, games) = collect_curator(&client, curator_id, options, request.show_progress).await?;
    if games.is_empty() {
        anyhow::bail!("no reviews collected for curator {curator_id}");
    }

    let export = CuratorExport::new(&info, games, chrono::Utc::now());
    write_export(request.format, &output, &export)?;
    println!(
        "saved {} games for {} to {}",
        export.total_games,
        export.curator_name,
        output.display()
    );
    Ok(())
}

/// Dumps every preset curator as JSON into the data directory.
///
/// # Errors
///
/// Returns an error if the client cannot be built or an export cannot be
/// written. Curators whose fetch fails or yields nothing are logged and
/// skipped.
pub(crate) async fn run_presets(config: &AppConfig, options: &FetchOptions) -> anyhow::Result<()> {
    let client = build_client(config)?;

    for preset in &QUASARPLAY_PRESETS {
        tracing::info!(
            preset = preset.key,
            name = preset.name,
            curator_id = preset.curator_id,
            "starting preset dump"
        );

        let (info, games) = match collect_curator(&client, preset.curator_id, options, true).await {
            Ok(collected) => collected,
            Err(e) => {
                tracing::warn!(preset = preset.key, error = %e, "preset fetch failed — skipping");
                continue;
            }
        };
        if games.is_empty() {
            tracing::warn!(preset = preset.key, "no reviews collected — skipping");
            continue;
        }

        let output = preset.output_path(&config.data_dir);
        let export = CuratorExport::new(&info, games, chrono::Utc::now());
        write_export(ExportFormat::Json, &output, &export)?;
        println!(
            "[{}] saved {} games to {}",
            preset.name,
            export.total_games,
            output.display()
        );
    }

    Ok(())
}

async fn collect_curator(
    client: &CuratorClient,
    curator_id: u64,
    options: &FetchOptions,
    show_progress: bool,
) -> anyhow::Result<(CuratorInfo, Vec<ReviewRecord>)> {
    let info = client.fetch_curator_info(curator_id).await;
    tracing::info!(
        curator_id,
        name = %info.display_name(),
        followers = info.followers,
        "curator info"
    );

    let report = |done: u64, total: u64| {
        eprint!("\rprogress: {done}/{total}");
        let _ = std::io::stderr().flush();
    };
    let progress: Option<curdump_scraper::ProgressFn<'_>> =
        if show_progress { Some(&report) } else { None };

    let games = client
        .fetch_all_reviews(curator_id, options, progress)
        .await
        .with_context(|| format!("failed to fetch reviews for curator {curator_id}"))?;
    if show_progress {
        eprintln!();
    }
    Ok((info, games))
}
