/*!
 * Tests for subtitle merging and persistence
 */

use std::path::PathBuf;
use anyhow::Result;
use submerge::errors::SubtitleError;
use submerge::merger::SubtitleMerger;
use submerge::subtitle_processor::{SubtitleEntry, SubtitleFormat};
use crate::common;

#[test]
fn test_merge_withHelloBonjour_shouldCombineText() {
    let base = common::make_track("show.en.srt", &[("00:00:01,000 --> 00:00:03,000", "Hello")]);
    let other = common::make_track("show.fr.srt", &[("00:00:01,200 --> 00:00:03,200", "Bonjour")]);

    let merged = SubtitleMerger::with_tolerance(1.0).merge(&base, &other);

    assert_eq!(
        merged.entries,
        vec![SubtitleEntry::new(1, "00:00:01,000 --> 00:00:03,000", "Hello\nBonjour")]
    );
}

#[test]
fn test_merge_withGappyIndexes_shouldRenumberContiguously() {
    let mut base = common::make_track("a.srt", &[
        ("00:00:01,000 --> 00:00:02,000", "A"),
        ("00:00:03,000 --> 00:00:04,000", "B"),
        ("00:00:05,000 --> 00:00:06,000", "C"),
    ]);
    base.entries[0].index = 10;
    base.entries[1].index = 10;
    base.entries[2].index = 42;
    let other = common::make_track("b.srt", &[("00:00:05,100 --> 00:00:06,100", "Z")]);

    let merged = SubtitleMerger::default().merge(&base, &other);

    let indexes: Vec<usize> = merged.entries.iter().map(|e| e.index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
    assert_eq!(merged.len(), base.len());
    assert_eq!(merged.entries[2].text, "C\nZ");
    assert_eq!(merged.entries[0].text, "A");
}

#[test]
fn test_merge_shouldKeepBaseTimingAndMetadata() {
    let mut base = common::make_track("dir/show.en.srt", &[("00:00:01,000 --> 00:00:02,000", "A")]);
    base.language = Some("en".to_string());
    let other = common::make_track("dir/show.fr.srt", &[("00:00:01,500 --> 00:00:02,500", "B")]);

    let merged = SubtitleMerger::default().merge(&base, &other);

    assert_eq!(merged.entries[0].time_range, "00:00:01,000 --> 00:00:02,000");
    assert_eq!(merged.format, SubtitleFormat::Srt);
    assert_eq!(merged.language.as_deref(), Some("combined"));
    assert_eq!(merged.source, PathBuf::from("dir/show.en_combined.srt"));
    // Inputs stay untouched
    assert_eq!(base.language.as_deref(), Some("en"));
    assert_eq!(base.entries[0].text, "A");
}

#[test]
fn test_merge_withMalformedBaseEntry_shouldKeepAllEntries() {
    let base = common::make_track("a.srt", &[
        ("00:00:01,000 --> 00:00:02,000", "A"),
        ("not a range", "broken"),
        ("00:00:05,000 --> 00:00:06,000", "C"),
    ]);
    let other = common::make_track("b.srt", &[
        ("00:00:01,100 --> 00:00:02,100", "X"),
        ("00:00:05,100 --> 00:00:06,100", "Y"),
    ]);

    let merged = SubtitleMerger::default().merge(&base, &other);

    let texts: Vec<&str> = merged.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["A\nX", "broken", "C\nY"]);
}

#[test]
fn test_persist_withWritableDirectory_shouldWriteSrtBlocks() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = temp_dir.path().join("show.en.srt");
    let base = common::make_track(source.to_str().unwrap(), &[
        ("00:00:01,000 --> 00:00:03,000", "Hello"),
        ("00:00:04,000 --> 00:00:05,000", "Bye"),
    ]);
    let other = common::make_track("fr.srt", &[("00:00:01,200 --> 00:00:03,200", "Bonjour")]);

    let merger = SubtitleMerger::default();
    let merged = merger.merge(&base, &other);
    let written = merger.persist(&merged)?;

    assert_eq!(written, temp_dir.path().join("show.en_combined.srt"));
    let content = std::fs::read_to_string(&written)?;
    assert_eq!(
        content,
        "1\n00:00:01,000 --> 00:00:03,000\nHello\nBonjour\n\n2\n00:00:04,000 --> 00:00:05,000\nBye\n\n"
    );
    assert_eq!(content, merged.to_srt_string());
    Ok(())
}

#[test]
fn test_persist_withMissingDirectory_shouldFailDestinationUnwritable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = temp_dir.path().join("no_such_dir").join("show.en.srt");
    let base = common::make_track(source.to_str().unwrap(), &[("00:00:01,000 --> 00:00:02,000", "A")]);
    let other = common::make_track("b.srt", &[]);

    let merger = SubtitleMerger::default();
    let merged = merger.merge(&base, &other);
    let err = merger.persist(&merged).unwrap_err();

    assert!(matches!(err, SubtitleError::DestinationUnwritable { .. }));
    // The in-memory result is still usable
    assert_eq!(merged.entries[0].text, "A");
    Ok(())
}

#[test]
fn test_mergeAndPersist_shouldReturnPersistedTrack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let base_path = common::create_test_file(temp_dir.path(), "ep.en.srt", common::ENGLISH_SRT)?;
    let other_path = common::create_test_file(temp_dir.path(), "ep.fr.srt", common::FRENCH_SRT)?;
    let parser = submerge::SubtitleParser::new();

    let merged = SubtitleMerger::default()
        .merge_and_persist(&parser.parse_file(&base_path)?, &parser.parse_file(&other_path)?)?;

    assert!(merged.source.exists());
    assert_eq!(merged.entries[2].text, "Goodbye");
    Ok(())
}
