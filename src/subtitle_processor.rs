use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use serde::Serialize;

use crate::errors::SubtitleError;
use crate::timestamp;

// @module: Subtitle entries and tracks

/// Language tag given to merged tracks
pub const COMBINED_LANGUAGE: &str = "combined";

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleEntry {
    // @field: Ordinal in the source track
    pub index: usize,

    // @field: Raw range line, empty when missing
    pub time_range: String,

    // @field: Caption lines joined with '\n'
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(index: usize, time_range: impl Into<String>, text: impl Into<String>) -> Self {
        SubtitleEntry {
            index,
            time_range: time_range.into(),
            text: text.into(),
        }
    }

    /// Start and end of the range line in seconds
    pub fn seconds(&self) -> Result<(f64, f64), SubtitleError> {
        timestamp::range_to_seconds(&self.time_range)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{}", self.time_range)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Textual subtitle formats understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    #[default]
    Srt,
}

impl SubtitleFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Ordered subtitle entries with their origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleTrack {
    /// Where the track was read from, or where a merged track is written to
    pub source: PathBuf,

    /// Subtitle format
    pub format: SubtitleFormat,

    /// Language tag from the filename, "combined" for merged tracks
    pub language: Option<String>,

    /// Entries in source order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleTrack {
    /// Create an empty SRT track
    pub fn new(source: impl Into<PathBuf>) -> Self {
        SubtitleTrack {
            source: source.into(),
            format: SubtitleFormat::Srt,
            language: None,
            entries: Vec::new(),
        }
    }

    /// Attach a language tag
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether this track is the output of a merge
    pub fn is_combined(&self) -> bool {
        self.language
            .as_deref()
            .is_some_and(|lang| lang.contains(COMBINED_LANGUAGE))
    }

    /// Serialize every entry as an SRT block
    pub fn write_srt<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for entry in &self.entries {
            write!(writer, "{}", entry)?;
        }
        Ok(())
    }

    /// The track rendered as SRT text
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|e| e.to_string()).collect()
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Subtitle({}, {}, {}, {} entries)",
            self.source.display(),
            self.format,
            self.language.as_deref().unwrap_or("unknown"),
            self.entries.len()
        )
    }
}
