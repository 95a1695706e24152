// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use submerge::app_config::{self, Config};
use submerge::app_controller::Controller;
use submerge::file_utils::FileManager;
use submerge::library::{Library, Page};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Options shared by every command that loads the configuration
#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug, Clone)]
struct MergeArgs {
    /// Media library root (falls back to `library_root` in the config)
    #[arg(value_name = "LIBRARY_ROOT")]
    library_root: Option<PathBuf>,

    /// Alignment tolerance in seconds
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Language tag to use as the base track (e.g. 'en')
    #[arg(short, long)]
    base_language: Option<String>,

    /// Re-merge items that already have a combined track
    #[arg(short, long)]
    force_overwrite: bool,

    /// Also merge subtitles of movie folders
    #[arg(long)]
    include_movies: bool,
}

#[derive(Args, Debug, Clone)]
struct PairArgs {
    /// Subtitle whose timing is kept
    #[arg(value_name = "BASE")]
    base: PathBuf,

    /// Subtitle whose text is appended
    #[arg(value_name = "OTHER")]
    other: PathBuf,

    /// Alignment tolerance in seconds
    #[arg(short, long)]
    tolerance: Option<f64>,
}

#[derive(Args, Debug, Clone)]
struct ListArgs {
    /// Media library root (falls back to `library_root` in the config)
    #[arg(long, value_name = "LIBRARY_ROOT")]
    root: Option<PathBuf>,

    /// Number of items to skip
    #[arg(long, default_value_t = 0)]
    skip: usize,

    /// Maximum number of items to print
    #[arg(long, default_value_t = submerge::library::DEFAULT_PAGE_LIMIT as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    limit: u64,

    #[command(subcommand)]
    target: ListTarget,
}

#[derive(Subcommand, Debug, Clone)]
enum ListTarget {
    /// List movies
    Movies,
    /// List TV shows
    Shows,
    /// List the seasons of a TV show
    Seasons { show: String },
    /// List the episodes of a season
    Episodes { show: String, season: String },
    /// List the subtitle tracks of an episode
    Subtitles { episode: String },
    /// List the subtitle tracks of a movie
    MovieSubtitles { movie: String },
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge subtitle pairs across a media library (default command)
    Merge(MergeArgs),

    /// Merge two explicit subtitle files
    Pair(PairArgs),

    /// Print the library catalog as JSON
    List(ListArgs),

    /// Generate shell completions for submerge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// submerge - bilingual subtitle merger
///
/// Scans a media library of videos with sidecar SRT subtitles and, for every
/// episode with exactly two subtitle tracks, writes a combined track that
/// shows both languages at once.
#[derive(Parser, Debug)]
#[command(name = "submerge")]
#[command(version)]
#[command(about = "Merge two subtitle tracks into one bilingual track")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "submerge aligns two subtitle tracks by timestamp and writes a combined track.

EXAMPLES:
    submerge /mnt/media/TV                       # Merge every eligible episode
    submerge -b en /mnt/media/TV                 # Use the English track as base
    submerge -t 0.5 --include-movies /mnt/media  # Tighter window, movies too
    submerge pair show.en.srt show.fr.srt        # Merge two files directly
    submerge list --root /mnt/media/TV shows     # Print TV shows as JSON
    submerge completions bash > submerge.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    merge: MergeArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

// @global: Log file configured after the config is loaded
static LOG_FILE: OnceCell<PathBuf> = OnceCell::new();

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let mut stderr = std::io::stderr();
        let _ = writeln!(
            stderr,
            "{}{} [{}] {}\x1B[0m",
            Self::color_for_level(record.level()),
            now,
            record.level(),
            record.args()
        );

        if let Some(path) = LOG_FILE.get() {
            let _ = FileManager::append_to_log_file(path, &format!("[{}] {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize with the most verbose filter and narrow it with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "submerge", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Merge(args)) => run_merge(&cli.common, args),
        Some(Commands::Pair(args)) => run_pair(&cli.common, args),
        Some(Commands::List(args)) => run_list(&cli.common, args),
        None => run_merge(&cli.common, cli.merge),
    }
}

/// Load the config, apply the log settings and return it
fn load_config(common: &CommonArgs) -> Result<Config> {
    let mut config = Config::load_or_create(&common.config_path)?;

    if let Some(log_level) = &common.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    if let Some(log_file) = &config.log_file {
        let _ = LOG_FILE.set(log_file.clone());
    }

    Ok(config)
}

fn resolve_root(cli_root: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    cli_root
        .or_else(|| config.library_root.clone())
        .ok_or_else(|| anyhow!("LIBRARY_ROOT is required when no library_root is configured"))
}

fn run_merge(common: &CommonArgs, args: MergeArgs) -> Result<()> {
    let mut config = load_config(common)?;

    // Override config with CLI options if provided
    if let Some(tolerance) = args.tolerance {
        config.merge.tolerance_seconds = tolerance;
    }
    if let Some(base_language) = args.base_language {
        config.merge.base_language = Some(base_language);
    }
    if args.force_overwrite {
        config.merge.force_overwrite = true;
    }
    if args.include_movies {
        config.merge.include_movies = true;
    }

    let root = resolve_root(args.library_root, &config)?;
    let controller = Controller::with_config(config)?;
    let summary = controller.run(&root)?;

    info!("Finished: {}", summary);
    Ok(())
}

fn run_pair(common: &CommonArgs, args: PairArgs) -> Result<()> {
    let mut config = load_config(common)?;
    if let Some(tolerance) = args.tolerance {
        config.merge.tolerance_seconds = tolerance;
    }

    let controller = Controller::with_config(config)?;
    let merged = controller.merge_files(&args.base, &args.other)?;

    info!("Success: {} ({} entries)", merged.source.display(), merged.len());
    Ok(())
}

fn run_list(common: &CommonArgs, args: ListArgs) -> Result<()> {
    let config = load_config(common)?;
    let root = resolve_root(args.root.clone(), &config)?;

    let controller = Controller::with_config(config)?;
    let library = controller.scan(&root)?;
    let page = Page::new(args.skip, args.limit as usize);

    let json = render_listing(&library, &args.target, page)?;
    println!("{}", json);
    Ok(())
}

fn render_listing(library: &Library, target: &ListTarget, page: Page) -> Result<String> {
    fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).context("Failed to serialize listing to JSON")
    }

    match target {
        ListTarget::Movies => to_json(library.list_movies(page)),
        ListTarget::Shows => to_json(library.list_tv_shows(page)),
        ListTarget::Seasons { show } => to_json(library.list_seasons(show, page)?),
        ListTarget::Episodes { show, season } => to_json(library.list_episodes(show, season, page)?),
        ListTarget::Subtitles { episode } => to_json(library.episode_subtitles(episode, page)?),
        ListTarget::MovieSubtitles { movie } => to_json(library.movie_subtitles(movie, page)?),
    }
}
