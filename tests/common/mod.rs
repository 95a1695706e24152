/*!
 * Common test utilities for the submerge test suite
 */

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

use submerge::subtitle_processor::{SubtitleEntry, SubtitleTrack};

/// English sample track
pub const ENGLISH_SRT: &str = "1
00:00:01,000 --> 00:00:03,000
Hello

2
00:00:05,000 --> 00:00:07,000
How are you?

3
00:00:10,000 --> 00:00:12,000
Goodbye
";

/// French sample track, slightly offset from the English one
pub const FRENCH_SRT: &str = "1
00:00:01,200 --> 00:00:03,200
Bonjour

2
00:00:05,400 --> 00:00:07,300
Comment allez-vous ?

3
00:00:20,000 --> 00:00:22,000
Au revoir
";

/// Routes library logs to the test output, once per test binary
pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates an empty file standing in for a video
pub fn create_fake_video(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, "")
}

/// Builds an in-memory track from (range, text) pairs, numbered from 1
pub fn make_track(source: &str, entries: &[(&str, &str)]) -> SubtitleTrack {
    let mut track = SubtitleTrack::new(source);
    track.entries = entries
        .iter()
        .enumerate()
        .map(|(i, (range, text))| SubtitleEntry::new(i + 1, *range, *text))
        .collect();
    track
}

/// Lays out a small library:
/// `Show/Season 1` with one episode carrying en+fr subtitles and one with
/// only en, plus a `Movie` folder with en+fr subtitles.
pub fn create_test_library(root: &Path) -> Result<()> {
    let season = root.join("Show").join("Season 1");
    create_fake_video(&season, "Show.S01E01.mkv")?;
    create_test_file(&season, "Show.S01E01.en.srt", ENGLISH_SRT)?;
    create_test_file(&season, "Show.S01E01.fr.srt", FRENCH_SRT)?;
    create_fake_video(&season, "Show.S01E02.mkv")?;
    create_test_file(&season, "Show.S01E02.en.srt", ENGLISH_SRT)?;

    let movie = root.join("Movie");
    create_fake_video(&movie, "Movie.mp4")?;
    create_test_file(&movie, "Movie.en.srt", ENGLISH_SRT)?;
    create_test_file(&movie, "Movie.fr.srt", FRENCH_SRT)?;

    Ok(())
}
