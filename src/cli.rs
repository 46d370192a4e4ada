// KidTube CLI binary

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use anyhow::Result;

use kidtube_lib::commands::{self, AdminSession, DeleteOutcome, ImportRequest, Orientation, PlaybackSession, PlayerState};
use kidtube_lib::constants::CATEGORIES;
use kidtube_lib::{db, media, store, AppConfig, CatalogStore, VideoRecord};

#[derive(Parser)]
#[command(name = "kidtube")]
#[command(about = "KidTube - A local video catalog for kids", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory (defaults to $KIDTUBE_DATA_DIR or ~/.kidtube)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Show info-level logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data folder and the video catalog
    Init,

    /// List the standard categories
    Categories,

    /// List video files that can be imported
    Pick {
        /// File or directory to scan
        path: PathBuf,
    },

    /// Import a video file into the catalog (admin)
    Import {
        /// Video file to copy into the catalog
        path: PathBuf,
        /// Video title
        #[arg(short, long)]
        title: String,
        /// Category (see `kidtube categories`)
        #[arg(short, long, default_value = CATEGORIES[0])]
        category: String,
        /// Cover image URL (http or https)
        #[arg(long)]
        thumbnail: Option<String>,
        /// Admin PIN
        #[arg(long)]
        pin: String,
    },

    /// Browse videos, grouped by category
    List {
        /// Only show this category (exact match)
        #[arg(short, long)]
        category: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List videos with file sizes (admin)
    AdminList {
        /// Admin PIN
        #[arg(long)]
        pin: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete a video file and its record (admin)
    Delete {
        /// Video ID
        id: String,
        /// Admin PIN
        #[arg(long)]
        pin: String,
    },

    /// Show what the player would present for a video
    Play {
        /// Video ID
        id: String,
        /// Window width in points
        #[arg(long, default_value = "390")]
        width: u32,
        /// Device held sideways
        #[arg(long)]
        landscape: bool,
        /// Simulate a tap on the video (toggles related videos)
        #[arg(long)]
        tap: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load(cli.data_dir.clone())?;

    match cli.command {
        Commands::Init => cmd_init(&config),
        Commands::Categories => cmd_categories(),
        Commands::Pick { path } => cmd_pick(path),
        command => {
            let catalog = open_catalog(&config)?;
            let result = match command {
                Commands::Import { path, title, category, thumbnail, pin } => {
                    cmd_import(catalog, &config, path, title, category, thumbnail, &pin)
                }
                Commands::List { category, json } => cmd_list(catalog, category, json),
                Commands::AdminList { pin, json } => cmd_admin_list(catalog, &config, &pin, json),
                Commands::Delete { id, pin } => cmd_delete(catalog, &config, &id, &pin),
                Commands::Play { id, width, landscape, tap } => cmd_play(catalog, &id, width, landscape, tap),
                Commands::Init | Commands::Categories | Commands::Pick { .. } => Ok(()),
            };
            finish(result, catalog.close())
        }
    }
}

/// The command's own outcome wins; a failed close only turns success into an error.
fn finish(result: Result<()>, closed: kidtube_lib::Result<()>) -> Result<()> {
    match (result, closed) {
        (Ok(()), Err(e)) => Err(e.into()),
        (Err(e), Err(close_err)) => {
            log::error!("Failed to close catalog: {}", close_err);
            Err(e)
        }
        (result, Ok(())) => result,
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .write_style(env_logger::WriteStyle::Auto)
        .target(env_logger::Target::Stderr)
        .init();
}

fn cmd_init(config: &AppConfig) -> Result<()> {
    let db_path = config.db_path();
    let existed = db_path.exists();

    db::init_data_folders(&config.data_dir)?;
    let catalog = store::install_global(&db_path)?;
    catalog.initialize()?;
    let count = catalog.count()?;
    catalog.close()?;

    if existed {
        println!("Catalog already initialized at {} ({} videos)", config.data_dir.display(), count);
    } else {
        println!("Initialized catalog at {}", config.data_dir.display());
    }
    println!("Structure:");
    println!("  videos.db   - Video catalog");
    println!("  videos/     - Imported video files");

    Ok(())
}

fn cmd_categories() -> Result<()> {
    for category in CATEGORIES {
        println!("{}", category);
    }
    Ok(())
}

fn cmd_pick(path: PathBuf) -> Result<()> {
    let files = media::discover_video_files(&path);

    if files.is_empty() {
        println!("No video files found in {}", path.display());
        return Ok(());
    }

    for file in &files {
        println!("{:>10}  {}", media::file_size(file).label(), file.display());
    }
    println!();
    println!("{} video files. Import one with 'kidtube import <file> --title <title> --pin <pin>'.", files.len());

    Ok(())
}

fn cmd_import(
    catalog: &CatalogStore,
    config: &AppConfig,
    path: PathBuf,
    title: String,
    category: String,
    thumbnail: Option<String>,
    pin: &str,
) -> Result<()> {
    let admin = AdminSession::unlock(catalog, config, pin)?;

    let mut request = ImportRequest::new(path, title).category(category);
    if let Some(thumbnail) = thumbnail {
        request = request.thumbnail(thumbnail);
    }

    let dest = admin.import_video(&request)?;
    println!("Saved '{}' [{}] to {}", request.title, request.category, dest.display());

    Ok(())
}

fn cmd_list(catalog: &CatalogStore, category: Option<String>, json: bool) -> Result<()> {
    if let Some(category) = category {
        let videos = commands::category_videos(catalog, &category)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&videos)?);
            return Ok(());
        }

        println!("Videos: {}", category);
        if videos.is_empty() {
            println!("No videos yet.");
        }
        print_videos(&videos);
        return Ok(());
    }

    let shelves = commands::shelves(catalog)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&shelves)?);
        return Ok(());
    }

    if shelves.is_empty() {
        println!("No videos found. Use 'kidtube import <file>' to add some.");
        return Ok(());
    }

    for shelf in &shelves {
        println!("{} ({})", shelf.category, shelf.videos.len());
        print_videos(&shelf.videos);
        println!();
    }

    Ok(())
}

fn cmd_admin_list(catalog: &CatalogStore, config: &AppConfig, pin: &str, json: bool) -> Result<()> {
    let admin = AdminSession::unlock(catalog, config, pin)?;
    let entries = admin.list_videos()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No saved videos.");
        return Ok(());
    }

    println!("{:>5}  {:>10}  {:>16}  {}", "ID", "Category", "Size", "Title");
    println!("{}", "-".repeat(60));
    for entry in &entries {
        println!("{:>5}  {:>10}  {:>16}  {}",
            entry.video.id,
            entry.video.category,
            entry.size,
            entry.video.title
        );
    }

    Ok(())
}

fn cmd_delete(catalog: &CatalogStore, config: &AppConfig, id: &str, pin: &str) -> Result<()> {
    let admin = AdminSession::unlock(catalog, config, pin)?;
    let id = store::parse_video_id(id)?;

    match admin.delete_video(id)? {
        DeleteOutcome::Deleted => println!("Deleted video {}", id),
        DeleteOutcome::NotFound => println!("No video with ID {}", id),
    }

    Ok(())
}

fn cmd_play(catalog: &CatalogStore, id: &str, width: u32, landscape: bool, tap: bool) -> Result<()> {
    let id = store::parse_video_id(id)?;
    let session = PlaybackSession::open(catalog, id)?;

    let mut state = PlayerState::new(width);
    let orientation = if landscape { Orientation::LandscapeLeft } else { Orientation::Portrait };
    state.on_orientation_change(orientation);
    if tap {
        state.on_tap();
    }

    let video = session.current();
    if state.shows_chrome() {
        println!("Title:       {}", video.title);
    }
    println!("Source:      {}", video.uri);
    println!("Poster:      {}", session.poster());
    println!("Fullscreen:  {}", if state.fullscreen { "yes" } else { "no" });

    if state.show_related {
        let related = session.related();
        println!();
        println!("Related videos:");
        if related.is_empty() {
            println!("  (none)");
        }
        for video in related {
            println!("  {:>5}  {}", video.id, video.title);
        }
    }

    Ok(())
}

// --- Helper Functions ---

fn open_catalog(config: &AppConfig) -> Result<&'static CatalogStore> {
    if !config.db_path().exists() {
        anyhow::bail!(
            "No catalog found at {}. Use 'kidtube init' to create one.",
            config.data_dir.display()
        );
    }

    let catalog = store::install_global(config.db_path())?;
    catalog.initialize()?;
    Ok(catalog)
}

fn print_videos(videos: &[VideoRecord]) {
    for video in videos {
        let title = if video.title.chars().count() > 40 {
            format!("{}...", video.title.chars().take(37).collect::<String>())
        } else {
            video.title.clone()
        };
        println!("  {:>5}  {}", video.id, title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kidtube_lib::KidTubeError;

    #[test]
    fn test_finish_keeps_command_error() {
        let command: Result<()> = Err(anyhow::anyhow!("no video with that id"));
        let closed = Err(KidTubeError::Other("close failed".to_string()));

        let err = finish(command, closed).unwrap_err();
        assert_eq!(err.to_string(), "no video with that id");
    }

    #[test]
    fn test_finish_reports_close_failure() {
        let closed = Err(KidTubeError::Other("close failed".to_string()));
        let err = finish(Ok(()), closed).unwrap_err();
        assert_eq!(err.to_string(), "close failed");

        assert!(finish(Ok(()), Ok(())).is_ok());
        assert!(finish(Err(anyhow::anyhow!("boom")), Ok(())).is_err());
    }
}
