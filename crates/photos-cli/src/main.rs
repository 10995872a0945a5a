//! Photos CLI: manage favorites and browse saved listings

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use photos::favorites::FavoritesStore;
use photos::model::{Photo, PhotoSource, PhotoUrls};
use photos_app::config::storage::SETTINGS_FILE;
use photos_app::data::{self, Backend, Settings};
use photos_app::paging::{Pager, StaticFeed};
use photos_app::view::{LayoutType, PhotoDetailModel, PhotoListModel};

#[derive(Parser)]
#[command(name = "photos", about = "Favorite photos from Pexels, Unsplash and Pixabay", version)]
struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Favorites backend: json or sqlite (defaults to the saved setting)
    #[arg(long, global = true, value_parser = parse_backend)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mark a photo as favorite
    Add {
        id: String,
        #[arg(value_parser = parse_source)]
        source: PhotoSource,
        /// Thumbnail shown in the favorites list
        #[arg(long)]
        preview: Option<String>,
    },
    /// Unmark a photo
    Remove {
        id: String,
        #[arg(value_parser = parse_source)]
        source: PhotoSource,
    },
    /// Flip the favorite state of a photo
    Toggle {
        id: String,
        #[arg(value_parser = parse_source)]
        source: PhotoSource,
    },
    /// Print whether a photo is a favorite
    Check {
        id: String,
        #[arg(value_parser = parse_source)]
        source: PhotoSource,
    },
    /// List favorites, oldest first
    List,
    /// Remove every favorite
    Clear,
    /// Page through a saved Pexels listing, marking favorites
    Browse {
        file: PathBuf,
        #[arg(long)]
        per_page: Option<u32>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Grid layout instead of a list
        #[arg(long)]
        grid: bool,
    },
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    s.parse::<Backend>().map_err(|e| e.to_string())
}

fn parse_source(s: &str) -> Result<PhotoSource, String> {
    s.parse::<PhotoSource>().map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let dir = match cli.data_dir {
        Some(dir) => dir,
        None => data::ensure_data_dir()?,
    };
    let settings_path = dir.join(SETTINGS_FILE);
    let settings = Settings::load_from(&settings_path)?;
    if !settings_path.exists() {
        // Leave an editable file behind on first run
        settings.save_to(&settings_path)?;
    }
    let backend = cli.backend.unwrap_or(settings.backend);
    log::debug!("data dir {:?}, backend {}", dir, backend);

    let store = Arc::new(FavoritesStore::new(data::open_repository(backend, &dir)?));

    match cli.command {
        Command::Add { id, source, preview } => {
            let mut photo = Photo::new(id, source);
            if let Some(url) = preview {
                photo = photo.with_urls(PhotoUrls::preview_only(url));
            }
            store.set_favorite(&photo, true)?;
            println!("★ {}", photo.key());
        }
        Command::Remove { id, source } => {
            let photo = Photo::new(id, source);
            store.set_favorite(&photo, false)?;
            println!("☆ {}", photo.key());
        }
        Command::Toggle { id, source } => {
            let detail = PhotoDetailModel::new(store.clone(), Photo::new(id, source))?;
            detail.take_favorite_init();
            detail.invert_favorite()?;
            if let Some(favorite) = detail.take_favorite_changed() {
                println!("{} {}", mark(favorite), detail.photo().key());
            }
        }
        Command::Check { id, source } => {
            let photo = Photo::new(id, source);
            let favorite = store.is_favorite(&photo)?;
            println!("{} {}", photo.key(), if favorite { "is a favorite" } else { "is not a favorite" });
        }
        Command::List => list(&store)?,
        Command::Clear => {
            let removed = store.clear()?;
            println!("Removed {} favorites", removed);
        }
        Command::Browse {
            file,
            per_page,
            pages,
            grid,
        } => {
            let layout = if grid { LayoutType::Grid } else { settings.layout };
            browse(&store, &file, per_page.unwrap_or(settings.per_page), pages, layout)?;
        }
    }

    Ok(())
}

fn mark(favorite: bool) -> &'static str {
    if favorite {
        "★"
    } else {
        "☆"
    }
}

fn list(store: &FavoritesStore) -> Result<(), Box<dyn std::error::Error>> {
    let favorites = store.list_favorites()?;
    if favorites.is_empty() {
        println!("No favorites yet");
        return Ok(());
    }
    for photo in favorites {
        match photo.preview_url() {
            Some(url) => println!("{}  {}", photo.key(), url),
            None => println!("{}", photo.key()),
        }
    }
    Ok(())
}

fn browse(
    store: &Arc<FavoritesStore>,
    file: &Path,
    per_page: u32,
    pages: u32,
    layout: LayoutType,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(file)?;
    let name = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "listing".into());
    let mut pager = Pager::new(StaticFeed::from_listing_json(name, &json)?).with_per_page(per_page);

    pager.refresh()?;
    for _ in 1..pages {
        if pager.state().is_end_reached() {
            break;
        }
        pager.load_next()?;
    }

    let model = PhotoListModel::new(store.clone(), layout);
    model.submit(pager.photos());

    let span = model.span_count().max(1) as usize;
    let rows = model.bind_all()?;
    for chunk in rows.chunks(span) {
        let cells: Vec<String> = chunk
            .iter()
            .map(|row| {
                let author = row.photo.photographer_name().unwrap_or("unknown");
                format!("{} {:<24}", mark(row.favorite), format!("{} ({})", row.photo.key(), author))
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }

    if !pager.state().is_end_reached() {
        println!("… more available (page {})", pager.next_page().unwrap_or_default());
    }
    Ok(())
}
