//! # Photo Gallery
//!
//! A reusable photo gallery library: take a photo, keep it in app-private
//! storage and maintain a newest-first gallery list persisted in a key-value
//! store.
//!
//! This crate provides:
//! - The [`GalleryStore`] service (`add_new_to_gallery`, `load_saved`)
//! - Narrow collaborator traits for camera, file store, key-value store and
//!   blob fetching
//! - Base64 / data URL helpers
//! - In-memory collaborators for tests
//! - An HTTP blob fetcher (feature `fetch`)
//!
//! ## Platform Separation
//!
//! This crate focuses on cross-platform gallery logic. Platform-specific code
//! (app data directory, database, camera integration, runtime detection)
//! stays in the application crate.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_gallery::{GalleryConfig, GalleryStore, RuntimeMode};
//!
//! let mut gallery = GalleryStore::new(camera, files, store, fetcher, GalleryConfig::default());
//! gallery.load_saved(RuntimeMode::Native).await?;
//! let photo = gallery.add_new_to_gallery(RuntimeMode::Native).await?;
//! ```

pub mod encoding;
pub mod memory;
pub mod models;
pub mod ports;
pub mod service;

#[cfg(feature = "fetch")]
pub mod fetch;

pub use encoding::{DataUrlError, EncodedImage};
pub use models::{
    CameraSource, CaptureOptions, CapturedPhoto, Directory, GalleryConfig, Photo, PhotoDisplay,
    ResultType, RuntimeMode, StoredPhoto,
};
pub use ports::{
    Blob, BlobFetcher, CaptureDevice, CaptureError, FetchError, FileStore, KeyValueStore,
    StoreError,
};
pub use service::{GalleryError, GalleryStore};

#[cfg(feature = "fetch")]
pub use fetch::HttpFetcher;
