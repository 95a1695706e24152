/*!
 * Bilingual subtitle merge.
 *
 * Every entry of the base track is kept with its own timing. When the
 * aligner finds a counterpart in the other track, that counterpart's text is
 * appended on a new line.
 */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use log::{debug, info};

use crate::aligner::TimestampAligner;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{SubtitleEntry, SubtitleTrack, COMBINED_LANGUAGE};

/// Combines two subtitle tracks into one bilingual track
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtitleMerger {
    aligner: TimestampAligner,
}

impl SubtitleMerger {
    pub fn new(aligner: TimestampAligner) -> Self {
        Self { aligner }
    }

    /// Merger with a custom tolerance window in seconds
    pub fn with_tolerance(tolerance_seconds: f64) -> Self {
        Self::new(TimestampAligner::new(tolerance_seconds))
    }

    pub fn aligner(&self) -> &TimestampAligner {
        &self.aligner
    }

    /// Merge `other` into `base`.
    ///
    /// The result has one entry per base entry, renumbered from 1, with the
    /// base timing. Every base entry is aligned against the whole of
    /// `other`, so one entry of `other` may be used several times.
    pub fn merge(&self, base: &SubtitleTrack, other: &SubtitleTrack) -> SubtitleTrack {
        info!(
            "Starting merge: base={}, other={}",
            base.source.display(),
            other.source.display()
        );

        let mut matched = 0usize;
        let entries: Vec<SubtitleEntry> = base
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let text = match self.aligner.find_best_match(entry, &other.entries) {
                    Some(found) => {
                        matched += 1;
                        join_text(&entry.text, &found.text)
                    }
                    None => {
                        debug!("No aligned entry for base entry {} ({})", i + 1, entry.time_range);
                        entry.text.clone()
                    }
                };

                SubtitleEntry {
                    index: i + 1,
                    time_range: entry.time_range.clone(),
                    text,
                }
            })
            .collect();

        info!("Aligned {} of {} base entries", matched, entries.len());

        SubtitleTrack {
            source: FileManager::generate_combined_path(&base.source),
            format: base.format,
            language: Some(COMBINED_LANGUAGE.to_string()),
            entries,
        }
    }

    /// Write a track to its source path as SRT
    pub fn persist(&self, track: &SubtitleTrack) -> Result<PathBuf, SubtitleError> {
        let path = track.source.clone();
        let unwritable = |source| SubtitleError::DestinationUnwritable {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(unwritable)?;
        let mut writer = BufWriter::new(file);
        track.write_srt(&mut writer).map_err(unwritable)?;
        writer.flush().map_err(unwritable)?;

        info!("Saved merged subtitle to {}", path.display());
        Ok(path)
    }

    /// Merge, then persist next to the base track
    pub fn merge_and_persist(
        &self,
        base: &SubtitleTrack,
        other: &SubtitleTrack,
    ) -> Result<SubtitleTrack, SubtitleError> {
        let merged = self.merge(base, other);
        self.persist(&merged)?;
        Ok(merged)
    }
}

/// Stack two caption texts, one per line.
///
/// An empty side contributes no line, so the block never starts or ends with
/// a newline and survives a write/parse cycle unchanged.
fn join_text(base: &str, other: &str) -> String {
    match (base.is_empty(), other.is_empty()) {
        (_, true) => base.to_string(),
        (true, false) => other.to_string(),
        (false, false) => format!("{}\n{}", base, other),
    }
}
