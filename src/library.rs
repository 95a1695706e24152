/*!
 * In-memory media library catalog.
 *
 * Holds TV shows (seasons, episodes) and movies together with their parsed
 * subtitle tracks, and answers the paginated listing queries.
 */

use std::path::PathBuf;
use serde::Serialize;

use crate::errors::LibraryError;
use crate::subtitle_processor::SubtitleTrack;

/// Default page size for listing queries
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// A window over a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }
}

/// Slice `items` to the requested page, clamped to its bounds
pub fn paginate<T>(items: &[T], page: Page) -> &[T] {
    let start = page.skip.min(items.len());
    let end = start.saturating_add(page.limit).min(items.len());
    &items[start..end]
}

/// A single episode and its subtitle tracks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    pub name: String,
    /// Video file, if one was found next to the subtitles
    pub path: Option<PathBuf>,
    pub subtitles: Vec<SubtitleTrack>,
}

/// A movie folder and its subtitle tracks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub name: String,
    pub path: Option<PathBuf>,
    pub subtitles: Vec<SubtitleTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Season {
    pub name: String,
    pub episodes: Vec<Episode>,
}

impl Season {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            episodes: Vec::new(),
        }
    }

    pub fn add_episode(&mut self, episode: Episode) {
        self.episodes.push(episode);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TvShow {
    pub name: String,
    pub seasons: Vec<Season>,
}

impl TvShow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seasons: Vec::new(),
        }
    }

    pub fn add_season(&mut self, season: Season) {
        self.seasons.push(season);
    }
}

/// The whole catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Library {
    pub movies: Vec<Movie>,
    pub tv_shows: Vec<TvShow>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_movie(&mut self, movie: Movie) {
        self.movies.push(movie);
    }

    pub fn add_tv_show(&mut self, tv_show: TvShow) {
        self.tv_shows.push(tv_show);
    }

    pub fn episode_count(&self) -> usize {
        self.episodes().count()
    }

    /// Every episode of every show, in catalog order
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.tv_shows
            .iter()
            .flat_map(|show| show.seasons.iter())
            .flat_map(|season| season.episodes.iter())
    }

    pub fn list_movies(&self, page: Page) -> &[Movie] {
        paginate(&self.movies, page)
    }

    pub fn list_tv_shows(&self, page: Page) -> &[TvShow] {
        paginate(&self.tv_shows, page)
    }

    pub fn find_tv_show(&self, name: &str) -> Result<&TvShow, LibraryError> {
        self.tv_shows
            .iter()
            .find(|show| show.name == name)
            .ok_or_else(|| LibraryError::not_found("TV show", name))
    }

    pub fn find_movie(&self, name: &str) -> Result<&Movie, LibraryError> {
        self.movies
            .iter()
            .find(|movie| movie.name == name)
            .ok_or_else(|| LibraryError::not_found("Movie", name))
    }

    pub fn list_seasons(&self, show: &str, page: Page) -> Result<&[Season], LibraryError> {
        Ok(paginate(&self.find_tv_show(show)?.seasons, page))
    }

    pub fn list_episodes(&self, show: &str, season: &str, page: Page) -> Result<&[Episode], LibraryError> {
        let season = self
            .find_tv_show(show)?
            .seasons
            .iter()
            .find(|s| s.name == season)
            .ok_or_else(|| LibraryError::not_found("Season", season))?;
        Ok(paginate(&season.episodes, page))
    }

    /// Subtitles of the first episode with this name, across all shows
    pub fn episode_subtitles(&self, episode: &str, page: Page) -> Result<&[SubtitleTrack], LibraryError> {
        self.episodes()
            .find(|e| e.name == episode)
            .map(|e| paginate(&e.subtitles, page))
            .ok_or_else(|| LibraryError::not_found("Episode", episode))
    }

    pub fn movie_subtitles(&self, movie: &str, page: Page) -> Result<&[SubtitleTrack], LibraryError> {
        Ok(paginate(&self.find_movie(movie)?.subtitles, page))
    }
}
