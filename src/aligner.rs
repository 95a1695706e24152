/*!
 * Timestamp alignment between two subtitle tracks.
 *
 * Candidates are scanned in track order and the first one that qualifies is
 * returned. A later candidate that is numerically closer is never considered
 * once an earlier one satisfies the tolerance window.
 */

use log::debug;

use crate::subtitle_processor::SubtitleEntry;

/// Default tolerance window in seconds
pub const DEFAULT_TOLERANCE_SECONDS: f64 = 1.0;

/// First-match aligner over a candidate track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestampAligner {
    tolerance_seconds: f64,
}

impl Default for TimestampAligner {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE_SECONDS)
    }
}

impl TimestampAligner {
    pub fn new(tolerance_seconds: f64) -> Self {
        Self { tolerance_seconds }
    }

    pub fn tolerance_seconds(&self) -> f64 {
        self.tolerance_seconds
    }

    /// Find the first candidate aligned with `base`.
    ///
    /// A candidate qualifies when its raw range starts with the base's raw
    /// range, or when its start or its end lies within the tolerance of the
    /// base's start or end. Candidates with undecodable ranges are skipped.
    pub fn find_best_match<'a>(
        &self,
        base: &SubtitleEntry,
        candidates: &'a [SubtitleEntry],
    ) -> Option<&'a SubtitleEntry> {
        let base_range = base.time_range.as_str();
        let base_seconds = match base.seconds() {
            Ok(secs) => Some(secs),
            Err(e) => {
                debug!("Base entry {} has no usable range: {}", base.index, e);
                None
            }
        };

        for candidate in candidates {
            // Every range starts with "", so an empty base never prefix-matches
            if !base_range.is_empty() && candidate.time_range.starts_with(base_range) {
                debug!("Exact timestamp match found: {}", candidate.time_range);
                return Some(candidate);
            }

            let Some((base_start, base_end)) = base_seconds else {
                continue;
            };

            match candidate.seconds() {
                Ok((start, end)) => {
                    if (start - base_start).abs() <= self.tolerance_seconds
                        || (end - base_end).abs() <= self.tolerance_seconds
                    {
                        debug!(
                            "Timestamp match within tolerance: base {}, candidate {}",
                            base_range, candidate.time_range
                        );
                        return Some(candidate);
                    }
                }
                Err(e) => {
                    debug!("Skipping candidate {}: {}", candidate.index, e);
                }
            }
        }

        debug!("No aligned entry found for {}", base_range);
        None
    }
}
