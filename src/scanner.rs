/*!
 * Media library scanner.
 *
 * Layout expected under the library root:
 *
 * ```text
 * root/
 *   Some Show/            <- has subdirectories: TV show
 *     Season 1/
 *       Ep01.mkv
 *       Ep01.en.srt
 *       Ep01.fr.srt
 *   Some Movie/           <- files only: movie
 *     Movie.mp4
 *     Movie.en.srt
 * ```
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::ScanConfig;
use crate::errors::LibraryError;
use crate::file_utils::{FileManager, FileType};
use crate::library::{Episode, Library, Movie, Season, TvShow};
use crate::subtitle_parser::SubtitleParser;
use crate::subtitle_processor::SubtitleTrack;

// @const: "<stem>.<lang tag>.<ext>" when no video stem is known
static SUBTITLE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\.((?:\w+\.)*\w+)\.[^.]+$").unwrap()
});

/// Video and subtitle files that share a stem
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentEntry {
    pub video: Option<PathBuf>,
    /// Subtitle paths keyed by language tag
    pub subtitles: BTreeMap<String, PathBuf>,
}

/// Walks a library root and builds the catalog
#[derive(Debug, Clone)]
pub struct LibraryScanner {
    parser: SubtitleParser,
    config: ScanConfig,
}

impl LibraryScanner {
    pub fn new(parser: SubtitleParser, config: ScanConfig) -> Self {
        Self { parser, config }
    }

    /// Scan every media folder directly under `root`
    pub fn scan<P: AsRef<Path>>(&self, root: P) -> Result<Library, LibraryError> {
        let root = root.as_ref();
        info!("Scanning media library: {}", root.display());

        let mut library = Library::new();
        for path in self.list(root)? {
            if !path.is_dir() {
                debug!("Skipping {}, not a directory.", path.display());
                continue;
            }

            let name = file_name(&path);
            let is_show = FileManager::has_subdirectories(&path)
                .map_err(|e| LibraryError::Scan { path: path.clone(), message: e.to_string() })?;

            if is_show {
                library.add_tv_show(self.scan_tv_show(&path, &name)?);
            } else {
                library.add_movie(self.scan_movie(&path, &name)?);
            }
        }

        info!(
            "Library scanned: {} TV shows, {} episodes, {} movies",
            library.tv_shows.len(),
            library.episode_count(),
            library.movies.len()
        );
        Ok(library)
    }

    fn scan_tv_show(&self, path: &Path, name: &str) -> Result<TvShow, LibraryError> {
        let mut tv_show = TvShow::new(name);

        for season_path in self.list(path)? {
            if !season_path.is_dir() {
                debug!("{} is not a season directory, skipping...", season_path.display());
                continue;
            }

            let mut season = Season::new(file_name(&season_path));
            for (episode_name, content) in self.find_content(&season_path)? {
                season.add_episode(Episode {
                    name: episode_name,
                    path: content.video.clone(),
                    subtitles: self.load_subtitles(&content),
                });
            }
            tv_show.add_season(season);
        }

        Ok(tv_show)
    }

    fn scan_movie(&self, path: &Path, name: &str) -> Result<Movie, LibraryError> {
        let content = self.find_content(path)?;

        let video = content.values().find_map(|c| c.video.clone());
        let subtitles = content.values().flat_map(|c| self.load_subtitles(c)).collect();

        Ok(Movie {
            name: name.to_string(),
            path: video,
            subtitles,
        })
    }

    /// Group the files of one directory by stem
    pub fn find_content<P: AsRef<Path>>(&self, dir: P) -> Result<BTreeMap<String, ContentEntry>, LibraryError> {
        let files = self.list(dir.as_ref())?;
        let mut content: BTreeMap<String, ContentEntry> = BTreeMap::new();
        let mut subtitle_files = Vec::new();

        for path in files {
            match FileManager::detect_file_type(&path, &self.config) {
                FileType::Video => {
                    let stem = path.file_stem().unwrap_or_default().to_string_lossy().to_string();
                    content.entry(stem).or_default().video = Some(path);
                }
                FileType::Subtitle => subtitle_files.push(path),
                FileType::Unknown => {}
            }
        }

        // Stems are only known once every video has been seen
        let video_stems: Vec<String> = content.keys().cloned().collect();
        for path in subtitle_files {
            let filename = file_name(&path);
            match split_subtitle_name(&filename, &video_stems) {
                Some((stem, tag)) => {
                    content.entry(stem).or_default().subtitles.insert(tag, path);
                }
                None => debug!("Ignoring subtitle without language tag: {}", filename),
            }
        }

        Ok(content)
    }

    /// Parse every subtitle of a content group, skipping unreadable ones
    fn load_subtitles(&self, content: &ContentEntry) -> Vec<SubtitleTrack> {
        content
            .subtitles
            .iter()
            .filter_map(|(tag, path)| match self.parser.parse_file(path) {
                Ok(track) => Some(track.with_language(tag.clone())),
                Err(e) => {
                    warn!("Skipping subtitle: {}", e);
                    None
                }
            })
            .collect()
    }

    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, LibraryError> {
        FileManager::list_dir(dir).map_err(|e| LibraryError::Scan {
            path: dir.to_path_buf(),
            message: format!("{:#}", e),
        })
    }
}

/// Split a subtitle file name into (stem, language tag).
///
/// The longest video stem the name starts with wins, so
/// `Show.S01E01.en.srt` groups with `Show.S01E01.mkv`. Without a matching
/// video the first dot ends the stem.
pub fn split_subtitle_name(filename: &str, video_stems: &[String]) -> Option<(String, String)> {
    let without_ext = filename.rsplit_once('.').map(|(head, _)| head)?;

    let known = video_stems
        .iter()
        .filter(|stem| {
            without_ext.len() > stem.len() + 1
                && without_ext.starts_with(stem.as_str())
                && without_ext.as_bytes()[stem.len()] == b'.'
        })
        .max_by_key(|stem| stem.len());

    if let Some(stem) = known {
        let tag = &without_ext[stem.len() + 1..];
        return Some((stem.clone(), tag.to_string()));
    }

    SUBTITLE_NAME_REGEX
        .captures(filename)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().to_string()
}
