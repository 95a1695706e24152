use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use std::fs::OpenOptions;
use std::io::Write;
use chrono::Local;

use crate::app_config::ScanConfig;

// @module: File and directory utilities

/// Suffix appended to the stem of a merged subtitle file
pub const COMBINED_SUFFIX: &str = "_combined";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for a merged subtitle
    // @example: show.en.srt -> show.en_combined.srt
    pub fn generate_combined_path<P: AsRef<Path>>(source: P) -> PathBuf {
        let source = source.as_ref();
        let stem = source.file_stem().unwrap_or_default().to_string_lossy();

        let mut output_filename = format!("{}{}", stem, COMBINED_SUFFIX);
        if let Some(ext) = source.extension() {
            output_filename.push('.');
            output_filename.push_str(&ext.to_string_lossy());
        }

        source.with_file_name(output_filename)
    }

    /// Immediate children of a directory, sorted by file name
    pub fn list_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to read directory entry in {:?}", dir.as_ref()))?;
            result.push(entry.into_path());
        }

        Ok(result)
    }

    /// Whether a directory has at least one subdirectory
    pub fn has_subdirectories<P: AsRef<Path>>(dir: P) -> Result<bool> {
        Ok(Self::list_dir(dir)?.iter().any(|p| p.is_dir()))
    }

    /// Append content to a log file with timestamp
    pub fn append_to_log_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        // Open file in append mode, create if it doesn't exist
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path.as_ref()))?;

        writeln!(file, "{} {}", timestamp, content)
            .with_context(|| format!("Failed to write to log file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Classify a file by extension against the scan configuration
    pub fn detect_file_type<P: AsRef<Path>>(path: P, scan: &ScanConfig) -> FileType {
        let path = path.as_ref();

        if !path.is_file() {
            return FileType::Unknown;
        }

        let Some(ext) = path.extension() else {
            return FileType::Unknown;
        };
        let ext = ext.to_string_lossy();

        if ext.eq_ignore_ascii_case(scan.subtitle_extension.trim_start_matches('.')) {
            return FileType::Subtitle;
        }

        if scan
            .video_extensions
            .iter()
            .any(|v| ext.eq_ignore_ascii_case(v.trim_start_matches('.')))
        {
            return FileType::Video;
        }

        FileType::Unknown
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileType {
    /// Subtitle file (SRT)
    Subtitle,
    /// Video file with a configured extension
    Video,
    /// Unknown file type
    Unknown,
}
