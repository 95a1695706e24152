/*!
 * Tests for timestamp alignment
 */

use submerge::aligner::{TimestampAligner, DEFAULT_TOLERANCE_SECONDS};
use submerge::subtitle_processor::SubtitleEntry;

fn entry(index: usize, range: &str, text: &str) -> SubtitleEntry {
    SubtitleEntry::new(index, range, text)
}

#[test]
fn test_defaultAligner_shouldUseOneSecondTolerance() {
    assert_eq!(TimestampAligner::default().tolerance_seconds(), DEFAULT_TOLERANCE_SECONDS);
    assert_eq!(DEFAULT_TOLERANCE_SECONDS, 1.0);
}

/// The prefix candidate comes first in scan order, so it wins over the
/// numerically closer candidate that follows it.
#[test]
fn test_findBestMatch_withPrefixThenCloser_shouldReturnPrefix() {
    let aligner = TimestampAligner::new(1.0);
    let base = entry(1, "00:00:01,000 --> 00:00:02,000", "base");
    let candidates = vec![
        entry(1, "00:00:01,000 --> 00:00:02,000 extra", "prefix"),
        entry(2, "00:00:01,050 --> 00:00:02,050", "closer"),
    ];

    assert_eq!(aligner.find_best_match(&base, &candidates).unwrap().text, "prefix");
}

/// An earlier, looser candidate wins even though a later prefix match exists.
#[test]
fn test_findBestMatch_withToleranceThenPrefix_shouldReturnFirstQualifying() {
    let aligner = TimestampAligner::new(1.0);
    let base = entry(1, "00:00:01,000 --> 00:00:02,000", "base");
    let candidates = vec![
        entry(1, "00:00:01,800 --> 00:00:09,000", "loose"),
        entry(2, "00:00:01,000 --> 00:00:02,000", "exact"),
    ];

    assert_eq!(aligner.find_best_match(&base, &candidates).unwrap().text, "loose");
}

#[test]
fn test_findBestMatch_withEndWithinTolerance_shouldMatch() {
    let aligner = TimestampAligner::new(1.0);
    let base = entry(1, "00:00:10,000 --> 00:00:12,000", "base");
    let candidates = vec![entry(1, "00:00:08,000 --> 00:00:12,900", "end match")];

    assert!(aligner.find_best_match(&base, &candidates).is_some());
}

#[test]
fn test_findBestMatch_withBothOutsideTolerance_shouldReturnNone() {
    let aligner = TimestampAligner::new(1.0);
    let base = entry(1, "00:00:10,000 --> 00:00:12,000", "base");
    let candidates = vec![
        entry(1, "00:00:08,000 --> 00:00:09,000", "before"),
        entry(2, "00:00:13,500 --> 00:00:15,000", "after"),
    ];

    assert!(aligner.find_best_match(&base, &candidates).is_none());
}

#[test]
fn test_findBestMatch_withZeroTolerance_shouldRequireEqualBound() {
    let aligner = TimestampAligner::new(0.0);
    let base = entry(1, "00:00:10,000 --> 00:00:12,000", "base");

    let same_start = vec![entry(1, "00:00:10,000 --> 00:00:15,000", "same start")];
    assert!(aligner.find_best_match(&base, &same_start).is_some());

    let near = vec![entry(1, "00:00:10,001 --> 00:00:12,001", "near")];
    assert!(aligner.find_best_match(&base, &near).is_none());
}

#[test]
fn test_findBestMatch_withMalformedBase_shouldStillAllowPrefix() {
    let aligner = TimestampAligner::new(1.0);
    let base = entry(1, "00:00:01 --> later", "base");
    let candidates = vec![
        entry(1, "00:00:01,000 --> 00:00:02,000", "numeric"),
        entry(2, "00:00:01 --> later on", "prefix"),
    ];

    assert_eq!(aligner.find_best_match(&base, &candidates).unwrap().text, "prefix");
}
