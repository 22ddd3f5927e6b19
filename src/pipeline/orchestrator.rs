//! Pipeline orchestration
//!
//! Runs the stages in a fixed order, each to completion: compile tokens,
//! fetch (optional), read tags, organize (optional), aggregate, write report.

use crate::catalog;
use crate::config::Settings;
use crate::discovery;
use crate::error::{Result, TimelinerError};
use crate::export;
use crate::fetch::{self, FetchSummary, Fetcher, YtDlpFetcher};
use crate::jobs;
use crate::metadata::MetadataNormalizer;
use crate::organize::{self, OrganizeSummary};
use crate::tags::{LoftyTagReader, TagReader};
use crate::types::{JobSet, LocatedTrack, SourceDir, SourceKind, TrackRecord};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Pipeline result summary
#[derive(Debug, Default)]
pub struct PipelineResult {
    /// Source folders cataloged
    pub sources: usize,
    /// Report rows written
    pub tracks: usize,
    /// Tracks cataloged from the file name because tags were unreadable
    pub untagged: usize,
    pub fetch: FetchSummary,
    pub organize: OrganizeSummary,
    /// URLs a dry run would fetch, empty otherwise
    pub planned_urls: Vec<String>,
    /// Written report, None in dry run mode
    pub report_path: Option<PathBuf>,
}

/// Run the full pipeline with the yt-dlp fetcher and lofty tag reader
pub fn run(settings: &Settings) -> Result<PipelineResult> {
    let fetcher = YtDlpFetcher::new(&settings.fetcher_binary);
    if settings.download && !fetcher.is_available() {
        warn!(
            "{} could not be started; downloads will fail. Install yt-dlp or set STL_YT_DLP.",
            settings.fetcher_binary.display()
        );
    }
    run_with(settings, &fetcher, &LoftyTagReader::new())
}

/// Run the full pipeline with the given collaborators
pub fn run_with(
    settings: &Settings,
    fetcher: &dyn Fetcher,
    tag_reader: &dyn TagReader,
) -> Result<PipelineResult> {
    let pipeline_start = Instant::now();

    if !settings.root.is_dir() {
        return Err(TimelinerError::ConfigError(format!(
            "working directory does not exist: {}\n\n  Tip: Check the path is correct and accessible.\n  Examples:\n    song-timeliner -C ~/Music/artists\n    song-timeliner -d UCxxxxxxxx some-soundcloud-user",
            settings.root.display()
        )));
    }

    // Phase 1: Jobs
    let jobs = jobs::compile(&settings.tokens);

    if settings.dry_run {
        return run_dry_run(&jobs, settings);
    }

    // Phase 2: Fetch
    let fetch_summary = if settings.download {
        let fetch_start = Instant::now();
        let planned = download_plan(&jobs, settings)?;
        let summary = fetch::fetch_jobs(&planned, &settings.root, fetcher, &settings.policy)?;
        info!(
            "Fetch completed in {:.2}s",
            fetch_start.elapsed().as_secs_f64()
        );
        summary
    } else {
        FetchSummary::default()
    };

    // Phase 3: Catalog
    let sources = discovery::resolve_sources(&settings.root, &jobs)?;
    let normalizer = MetadataNormalizer::new(tag_reader);
    debug!("Reading tags with {}", tag_reader.name());
    let (tracks, untagged) = catalog_sources(&sources, &normalizer, settings.show_progress);

    // Phase 4: Organize
    let organize_summary = if settings.organize {
        organize::organize(&tracks)
    } else {
        OrganizeSummary::default()
    };

    // Phase 5: Report
    let report = catalog::aggregate(
        &settings.root,
        &sources,
        tracks.into_iter().map(|t| t.record),
        settings.include_album,
    )?;
    let report_path = export::write_report(&report, &settings.root)?;

    info!(
        "Total pipeline time: {:.2}s",
        pipeline_start.elapsed().as_secs_f64()
    );

    Ok(PipelineResult {
        sources: sources.len(),
        tracks: report.len(),
        untagged,
        fetch: fetch_summary,
        organize: organize_summary,
        planned_urls: Vec::new(),
        report_path: Some(report_path),
    })
}

/// Jobs to fetch: the compiled jobs, or a refresh of every existing channel
/// folder when no tokens were given
fn download_plan(jobs: &JobSet, settings: &Settings) -> Result<JobSet> {
    if !jobs.is_empty() {
        return Ok(jobs.clone());
    }
    let refresh = discovery::refresh_jobs(&settings.root)?;
    info!(
        "No tokens given, refreshing {} existing folders",
        refresh.channel_jobs().len()
    );
    Ok(refresh)
}

/// Read tags for every audio file of every source, in source order
fn catalog_sources(
    sources: &[SourceDir],
    normalizer: &MetadataNormalizer<'_>,
    show_progress: bool,
) -> (Vec<LocatedTrack>, usize) {
    let files: Vec<(&SourceDir, PathBuf)> = sources
        .iter()
        .flat_map(|source| {
            discovery::scan_audio_files(source)
                .into_iter()
                .map(move |path| (source, path))
        })
        .collect();

    let progress_bar = if show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut untagged = 0;
    let tracks: Vec<LocatedTrack> = files
        .into_iter()
        .map(|(source, path)| {
            let record = match normalizer.normalize(&path) {
                Ok(metadata) => metadata.into_record(source.label()),
                Err(e) => {
                    warn!("{}", e);
                    untagged += 1;
                    TrackRecord::untagged(source.label(), &path)
                }
            };
            if let Some(ref pb) = progress_bar {
                pb.inc(1);
                pb.set_message(record.title.clone());
            }
            LocatedTrack {
                source: source.clone(),
                path,
                record,
            }
        })
        .collect();

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Catalog complete");
    }
    if untagged > 0 {
        warn!("{} tracks had no readable tags, cataloged by file name", untagged);
    }

    (tracks, untagged)
}

fn planned_urls(jobs: &JobSet) -> Vec<String> {
    jobs.channel_jobs()
        .iter()
        .map(|job| job.url.clone())
        .chain(jobs.album_groups().iter().flat_map(|group| group.urls()))
        .collect()
}

/// Dry run mode - show jobs and source folders without touching anything
fn run_dry_run(jobs: &JobSet, settings: &Settings) -> Result<PipelineResult> {
    println!();
    println!("=== DRY RUN MODE ===");
    println!();

    if jobs.is_empty() {
        println!("No tokens given, cataloging every folder in {}", settings.root.display());
    }
    let planned = if settings.download {
        println!("Would fetch:");
        download_plan(jobs, settings)?
    } else {
        jobs.clone()
    };
    for job in planned.channel_jobs() {
        println!("  {} -> {}", job.id, job.url);
    }
    for group in planned.album_groups() {
        println!("  {} ({} albums)", group.source_id, group.album_slugs.len());
        for url in group.urls() {
            println!("    {}", url);
        }
    }
    println!();

    let sources: Vec<SourceDir> = if settings.download && !jobs.is_empty() {
        // Folders would be created by the fetch
        jobs.channel_jobs()
            .iter()
            .map(|j| SourceDir::new(&settings.root, &j.id, SourceKind::Channel))
            .chain(jobs.album_groups().iter().map(|g| {
                SourceDir::new(&settings.root, &g.source_id, SourceKind::AlbumGroup)
            }))
            .collect()
    } else {
        discovery::resolve_sources(&settings.root, jobs)?
    };

    if sources.is_empty() {
        println!("No source folders found.");
    } else {
        println!("Would catalog:");
        for source in &sources {
            println!("  {}/", source.path.display());
        }
        println!();
        println!(
            "Would create: {}",
            settings.root.join(catalog::report_file_name(&sources)).display()
        );
    }
    println!();

    Ok(PipelineResult {
        sources: sources.len(),
        planned_urls: planned_urls(&planned),
        ..PipelineResult::default()
    })
}
