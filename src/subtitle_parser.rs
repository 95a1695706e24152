/*!
 * Permissive SRT parser.
 *
 * Index lines, range lines and text blocks are collected in three separate
 * streams and zipped back together by position. A malformed caption only
 * degrades its own fields; the rest of the track survives.
 */

use std::fs;
use std::path::Path;
use log::{debug, info, warn};

use crate::errors::SubtitleError;
use crate::subtitle_processor::{SubtitleEntry, SubtitleTrack};

/// Parses SRT text into subtitle tracks
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtitleParser;

/// The three streams collected from a file, before pairing
#[derive(Debug, Default)]
struct RawStreams {
    indexes: Vec<usize>,
    time_ranges: Vec<String>,
    texts: Vec<String>,
}

impl SubtitleParser {
    pub fn new() -> Self {
        SubtitleParser
    }

    /// Read and parse a subtitle file.
    ///
    /// Fails with `SourceUnreadable` when the file is missing, unreadable or
    /// not valid UTF-8. Malformed content never fails the parse.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<SubtitleTrack, SubtitleError> {
        let path = path.as_ref();
        info!("Parsing subtitle file: {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| SubtitleError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let track = self.parse_str(&content, path);
        info!("Parsed {}: {} entries", path.display(), track.len());
        Ok(track)
    }

    /// Parse in-memory SRT content into a track attributed to `source`
    pub fn parse_str<P: AsRef<Path>>(&self, content: &str, source: P) -> SubtitleTrack {
        let mut track = SubtitleTrack::new(source.as_ref());
        track.entries = self.parse_lines(content.lines());
        track
    }

    /// Parse a sequence of lines into entries in source order
    pub fn parse_lines<'a, I>(&self, lines: I) -> Vec<SubtitleEntry>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let streams = Self::collect_streams(lines);
        Self::pair_streams(streams)
    }

    fn collect_streams<'a, I>(lines: I) -> RawStreams
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut streams = RawStreams::default();
        let mut current_text: Vec<&str> = Vec::new();

        for (line_no, line) in lines.into_iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if trimmed.bytes().all(|b| b.is_ascii_digit()) {
                match trimmed.parse::<usize>() {
                    Ok(index) => {
                        if !current_text.is_empty() {
                            streams.texts.push(current_text.join("\n"));
                            current_text.clear();
                        }
                        streams.indexes.push(index);
                        continue;
                    }
                    Err(_) => {
                        warn!("Index out of range at line {}, keeping it as text: {}", line_no + 1, trimmed);
                    }
                }
            } else if trimmed.contains("-->") {
                streams.time_ranges.push(trimmed.to_string());
                continue;
            }

            current_text.push(trimmed);
        }

        if !current_text.is_empty() {
            streams.texts.push(current_text.join("\n"));
        }

        debug!(
            "Collected {} indexes, {} ranges, {} text blocks",
            streams.indexes.len(),
            streams.time_ranges.len(),
            streams.texts.len()
        );
        streams
    }

    fn pair_streams(streams: RawStreams) -> Vec<SubtitleEntry> {
        let RawStreams { indexes, time_ranges, texts } = streams;
        let count = indexes.len();

        if time_ranges.len() != count || texts.len() != count {
            warn!(
                "Subtitle streams diverge: {} indexes, {} ranges, {} text blocks",
                count,
                time_ranges.len(),
                texts.len()
            );
        }
        if time_ranges.len() > count || texts.len() > count {
            warn!("Dropping surplus ranges or text blocks past entry {}", count);
        }

        let mut time_ranges = time_ranges.into_iter();
        let mut texts = texts.into_iter();

        indexes
            .into_iter()
            .map(|index| SubtitleEntry {
                index,
                time_range: time_ranges.next().unwrap_or_default(),
                text: texts.next().unwrap_or_default(),
            })
            .collect()
    }
}
