mod camera;
mod cli;
mod config;
mod database;
mod error;
mod filesystem;
mod platform;

use camera::ImportCamera;
use clap::Parser;
use cli::{Cli, Commands};
use config::AppConfig;
use database::SqliteKeyValueStore;
use error::AppError;
use filesystem::LocalFileStore;
use photo_gallery::{
    CaptureDevice, GalleryStore, HttpFetcher, Photo, RuntimeMode, StoredPhoto,
};

type AppGallery<C> = GalleryStore<C, LocalFileStore, SqliteKeyValueStore, HttpFetcher>;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn open_gallery<C: CaptureDevice>(camera: C, config: &AppConfig) -> Result<AppGallery<C>, AppError> {
    let data_dir = config.data_dir();
    let conn = database::init_database(&data_dir)?;
    let fetcher = HttpFetcher::new().map_err(|e| AppError::Other(e.to_string()))?;

    Ok(GalleryStore::new(
        camera,
        LocalFileStore::new(&data_dir),
        SqliteKeyValueStore::new(conn),
        fetcher,
        config.gallery_config(),
    ))
}

fn print_photo(index: usize, photo: &Photo) {
    println!(
        "{:>3}  {}  (preview: {})",
        index,
        photo.file_path,
        photo.preview_path().unwrap_or("-")
    );
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let configured_mode: Option<RuntimeMode> = cli.mode.or(config.mode);

    match cli.command {
        Commands::Capture { source } => {
            let capture_mode = platform::detect_runtime_mode(configured_mode);
            let mut gallery = open_gallery(ImportCamera::new(source, capture_mode), &config)?;

            gallery
                .load_saved(platform::detect_runtime_mode(configured_mode))
                .await?;
            let photo = gallery
                .add_new_to_gallery(platform::detect_runtime_mode(configured_mode))
                .await?;

            println!("Saved {}", photo.file_path);
        }
        Commands::List { json } => {
            let mode = platform::detect_runtime_mode(configured_mode);
            // Listing never captures; the camera source is unused.
            let mut gallery = open_gallery(ImportCamera::new(String::new(), mode), &config)?;
            gallery.load_saved(mode).await?;

            if json {
                let stored: Vec<StoredPhoto> =
                    gallery.photos().iter().map(StoredPhoto::from).collect();
                let text = serde_json::to_string_pretty(&stored)
                    .map_err(|e| AppError::Other(e.to_string()))?;
                println!("{}", text);
            } else if gallery.photos().is_empty() {
                println!("Gallery is empty");
            } else {
                for (i, photo) in gallery.photos().iter().enumerate() {
                    print_photo(i, photo);
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}
