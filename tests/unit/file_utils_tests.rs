/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use submerge::app_config::ScanConfig;
use submerge::file_utils::{FileManager, FileType};
use crate::common;

/// Test that generate_combined_path keeps the directory and extension
#[test]
fn test_generate_combined_path_withLanguageTag_shouldInsertSuffix() {
    let output_path = FileManager::generate_combined_path("/tmp/tv/show.en.srt");
    assert_eq!(output_path, Path::new("/tmp/tv/show.en_combined.srt"));
}

#[test]
fn test_generate_combined_path_withOtherExtension_shouldReAddIt() {
    let output_path = FileManager::generate_combined_path("episode.fr.SRT");
    assert_eq!(output_path, Path::new("episode.fr_combined.SRT"));
}

#[test]
fn test_generate_combined_path_withoutExtension_shouldAppendSuffix() {
    let output_path = FileManager::generate_combined_path("dir/subtitles");
    assert_eq!(output_path, Path::new("dir/subtitles_combined"));
}

/// Test that list_dir returns direct children sorted by name
#[test]
fn test_list_dir_withNestedEntries_shouldListChildrenSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.txt", "b")?;
    common::create_test_file(temp_dir.path(), "a.txt", "a")?;
    common::create_test_file(temp_dir.path(), "sub/deep.txt", "deep")?;

    let entries = FileManager::list_dir(temp_dir.path())?;
    let names: Vec<String> = entries
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["a.txt", "b.txt", "sub"]);
    assert!(FileManager::has_subdirectories(temp_dir.path())?);
    assert!(!FileManager::has_subdirectories(temp_dir.path().join("sub"))?);

    Ok(())
}

#[test]
fn test_list_dir_withMissingDirectory_shouldFail() {
    assert!(FileManager::list_dir("./non_existent_directory_12345").is_err());
}

/// Test file type detection by extension
#[test]
fn test_detect_file_type_withKnownExtensions_shouldClassify() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let scan = ScanConfig::default();
    let video = common::create_fake_video(temp_dir.path(), "ep.MKV")?;
    let subtitle = common::create_test_file(temp_dir.path(), "ep.en.srt", "1")?;
    let other = common::create_test_file(temp_dir.path(), "notes.txt", "x")?;

    assert_eq!(FileManager::detect_file_type(&video, &scan), FileType::Video);
    assert_eq!(FileManager::detect_file_type(&subtitle, &scan), FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&other, &scan), FileType::Unknown);
    assert_eq!(FileManager::detect_file_type(temp_dir.path(), &scan), FileType::Unknown);

    Ok(())
}

/// Test appending log lines
#[test]
fn test_append_to_log_file_withTwoWrites_shouldAppend() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_file = temp_dir.path().join("logs").join("merge.log");

    FileManager::append_to_log_file(&log_file, "first")?;
    FileManager::append_to_log_file(&log_file, "second")?;

    let content = fs::read_to_string(&log_file)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" first"));
    assert!(lines[1].ends_with(" second"));

    Ok(())
}
