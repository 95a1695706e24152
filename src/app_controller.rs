use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::fmt;
use std::path::Path;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::library::Library;
use crate::merger::SubtitleMerger;
use crate::scanner::LibraryScanner;
use crate::subtitle_parser::SubtitleParser;
use crate::subtitle_processor::SubtitleTrack;

// @module: Application controller for batch subtitle merging

/// Counts reported at the end of a merge run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub merged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} merged, {} skipped, {} failed", self.merged, self.skipped, self.failed)
    }
}

/// Why an item was not merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyCombined,
    TrackCount(usize),
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Configured merge engine
    merger: SubtitleMerger,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let merger = SubtitleMerger::with_tolerance(config.merge.tolerance_seconds);

        Ok(Self { config, merger })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan a library root into a catalog
    pub fn scan(&self, root: &Path) -> Result<Library> {
        if !root.is_dir() {
            return Err(anyhow::anyhow!("Library root is not a directory: {:?}", root));
        }

        let scanner = LibraryScanner::new(SubtitleParser::new(), self.config.scan.clone());
        scanner
            .scan(root)
            .with_context(|| format!("Failed to scan library: {}", root.display()))
    }

    /// Scan the library and merge every eligible episode (and movie, if enabled)
    pub fn run(&self, root: &Path) -> Result<MergeSummary> {
        let start_time = std::time::Instant::now();
        info!("Starting subtitle merge process for {}", root.display());

        let library = self.scan(root)?;
        let summary = self.merge_library(&library);

        info!(
            "Merge run finished in {:.1}s: {}",
            start_time.elapsed().as_secs_f64(),
            summary
        );
        Ok(summary)
    }

    /// Merge every eligible item of an already scanned library
    pub fn merge_library(&self, library: &Library) -> MergeSummary {
        let mut items: Vec<(&str, &[SubtitleTrack])> = library
            .episodes()
            .map(|e| (e.name.as_str(), e.subtitles.as_slice()))
            .collect();

        if self.config.merge.include_movies {
            items.extend(library.movies.iter().map(|m| (m.name.as_str(), m.subtitles.as_slice())));
        }

        let progress = ProgressBar::new(items.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut summary = MergeSummary::default();
        for (name, subtitles) in items {
            progress.set_message(name.to_string());

            match self.select_pair(subtitles) {
                Ok((base, other)) => {
                    info!(
                        "Combining subtitles for {}: [{}, {}]",
                        name,
                        base.language.as_deref().unwrap_or("unknown"),
                        other.language.as_deref().unwrap_or("unknown")
                    );
                    match self.merger.merge_and_persist(base, other) {
                        Ok(_) => summary.merged += 1,
                        Err(e) => {
                            error!("Error merging {}: {}", name, e);
                            summary.failed += 1;
                        }
                    }
                }
                Err(SkipReason::AlreadyCombined) => {
                    info!("Skipping {}, already combined.", name);
                    summary.skipped += 1;
                }
                Err(SkipReason::TrackCount(count)) => {
                    debug!("Skipping {}: {} subtitle track(s)", name, count);
                    summary.skipped += 1;
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        summary
    }

    /// Choose (base, other) among an item's tracks.
    ///
    /// Exactly two non-combined tracks are required. The configured base
    /// language wins when present; otherwise language-tag order decides.
    pub fn select_pair<'a>(&self, subtitles: &'a [SubtitleTrack]) -> Result<(&'a SubtitleTrack, &'a SubtitleTrack), SkipReason> {
        let has_combined = subtitles.iter().any(|t| t.is_combined());
        if has_combined && !self.config.merge.force_overwrite {
            return Err(SkipReason::AlreadyCombined);
        }

        let mut tracks: Vec<&SubtitleTrack> = subtitles.iter().filter(|t| !t.is_combined()).collect();
        if tracks.len() != 2 {
            return Err(SkipReason::TrackCount(tracks.len()));
        }

        tracks.sort_by(|a, b| a.language.cmp(&b.language));

        if let Some(preferred) = self.config.merge.base_language.as_deref() {
            if tracks[1].language.as_deref() == Some(preferred) {
                tracks.swap(0, 1);
            } else if tracks[0].language.as_deref() != Some(preferred) {
                warn!(
                    "Base language '{}' not found among {:?}, using '{}'",
                    preferred,
                    tracks.iter().map(|t| t.language.as_deref().unwrap_or("unknown")).collect::<Vec<_>>(),
                    tracks[0].language.as_deref().unwrap_or("unknown")
                );
            }
        }

        Ok((tracks[0], tracks[1]))
    }

    /// Merge two explicit subtitle files
    pub fn merge_files(&self, base: &Path, other: &Path) -> Result<SubtitleTrack> {
        let parser = SubtitleParser::new();
        let base_track = parser.parse_file(base)?;
        let other_track = parser.parse_file(other)?;

        let merged = self
            .merger
            .merge_and_persist(&base_track, &other_track)
            .context("Failed to write merged subtitles")?;

        info!("Combined subtitles written to {}", merged.source.display());
        Ok(merged)
    }
}
