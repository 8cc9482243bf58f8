//! CLI entry point for the snapstream tool.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use snapstream_core::{
    default_vault_path, DownloadItem, DownloadStatus, DownloadQueue, QualityOption, SearchOrchestrator,
    SearchResult, VaultStore, VideoDetails, TICK_INTERVAL,
};
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let vault_path = args.vault_path.clone().unwrap_or_else(default_vault_path);

    if args.vault {
        let vault = VaultStore::load(vault_path.clone());
        if vault.is_empty() {
            println!("Vault is empty ({})", vault_path.display());
        } else {
            println!("Vault ({}):", vault_path.display());
            for item in vault.items() {
                println!("  {} [{} {}] {}", item.title, item.quality, item.format, item.size);
            }
        }
        return Ok(());
    }

    let Some(url) = args.url.as_deref() else {
        info!("No URL provided.");
        info!("Example: snapstream 'https://www.youtube.com/watch?v=dQw4w9WgXcQ'");
        return Ok(());
    };

    let orchestrator = SearchOrchestrator::new().map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let video = match orchestrator.search(url).await {
        Ok(SearchResult::Video(video)) => video,
        Ok(SearchResult::Playlist(playlist)) => {
            bail!(
                "Playlist downloads are not supported yet ({} videos found).",
                playlist.video_count()
            );
        }
        Err(error) => bail!(error.user_message()),
    };

    print_details(&video);

    if args.list {
        return Ok(());
    }

    let option = select_option(&video, args.quality.as_deref(), args.audio)?;
    info!(quality = %option.quality, format = %option.format, "selected format");

    let created_at_millis = u64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis(),
    )
    .unwrap_or(0);
    let item = DownloadItem::new(&video, option, created_at_millis);

    let mut vault = VaultStore::load(vault_path);
    let mut queue = DownloadQueue::new();
    queue.enqueue(item);

    run_queue(&mut queue, &mut vault).await
}

/// Drives the queue tick loop until every item has settled, mirroring
/// progress on a spinner and recording completions in the vault.
async fn run_queue(queue: &mut DownloadQueue, vault: &mut VaultStore) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut completed = 0usize;
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.tick().await; // first tick resolves immediately

    loop {
        ticker.tick().await;
        let outcome = queue.tick(Instant::now());

        if let Some(item) = outcome.completed {
            completed += 1;
            vault.record(item.clone());
            spinner.set_message(format!("{} - {}", item.title, item.speed));
            info!(id = %item.id, quality = %item.quality, "download completed");
        }
        for id in &outcome.evicted {
            debug!(%id, "evicted completed item from active list");
        }

        if let Some(active) = queue
            .items()
            .iter()
            .find(|item| item.status == DownloadStatus::Downloading)
        {
            spinner.set_message(format!(
                "{} [{}] {}% - {}",
                active.title, active.quality, active.progress, active.speed
            ));
        }

        if queue.is_drained() {
            break;
        }
    }
    spinner.finish_and_clear();

    let failures: Vec<&DownloadItem> = queue
        .items()
        .iter()
        .filter(|item| item.status == DownloadStatus::Error)
        .collect();
    for item in &failures {
        warn!(id = %item.id, speed = %item.speed, "download failed");
    }

    if completed == 0 && !failures.is_empty() {
        bail!("Download failed: {}", failures[0].speed);
    }
    info!(completed, failed = failures.len(), "queue drained");
    Ok(())
}

/// Prints the resolved video details and available formats.
fn print_details(video: &VideoDetails) {
    println!("{}", video.title);
    println!("  by {}", video.author);
    if !video.video_qualities.is_empty() {
        println!("  Video:");
        for option in &video.video_qualities {
            match &option.note {
                Some(note) => println!(
                    "    {} {} ({}, {note})",
                    option.quality, option.format, option.size
                ),
                None => println!("    {} {} ({})", option.quality, option.format, option.size),
            }
        }
    }
    if !video.audio_qualities.is_empty() {
        println!("  Audio:");
        for option in &video.audio_qualities {
            println!("    {} {} ({})", option.quality, option.format, option.size);
        }
    }
}

/// Picks the quality option to download.
///
/// `--audio` takes the first audio format; `--quality` must match a video
/// quality exactly; otherwise the best (first) video format wins.
fn select_option<'a>(
    video: &'a VideoDetails,
    quality: Option<&str>,
    audio: bool,
) -> Result<&'a QualityOption> {
    if audio {
        return video
            .audio_qualities
            .first()
            .ok_or_else(|| anyhow::anyhow!("No audio formats available for this video."));
    }
    if let Some(wanted) = quality {
        return video
            .video_qualities
            .iter()
            .find(|option| option.quality.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Quality '{wanted}' is not available. Use --list to see the options."
                )
            });
    }
    video
        .video_qualities
        .first()
        .ok_or_else(|| anyhow::anyhow!("No video formats available for this video."))
}
