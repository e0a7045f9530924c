//! Collaborator interfaces of the gallery store.
//!
//! The gallery only ever talks to a camera, a file store, a key-value store
//! and (in web mode) a blob fetcher. Platform crates implement these; the
//! [`memory`](crate::memory) module has in-process versions for tests.

use crate::models::{CaptureOptions, CapturedPhoto, Directory};
use async_trait::async_trait;

/// Error type for capture devices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    PermissionDenied(String),
    Cancelled(String),
    Unavailable(String),
    Other(String),
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            CaptureError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            CaptureError::Unavailable(msg) => write!(f, "Camera unavailable: {}", msg),
            CaptureError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CaptureError {}

/// Error type for key-value stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "Storage backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Error type for blob fetchers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Request(String),
    Status(u16),
    Unsupported(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(msg) => write!(f, "Request failed: {}", msg),
            FetchError::Status(code) => write!(f, "Server returned status: {}", code),
            FetchError::Unsupported(url) => write!(f, "Unsupported URL: {}", url),
        }
    }
}

impl std::error::Error for FetchError {}

/// A fetched binary resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Camera abstraction. May wait indefinitely for the user.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    async fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError>;
}

/// Scoped persistent binary storage
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn write(&self, path: &str, data: &[u8], directory: Directory)
        -> std::io::Result<()>;

    /// Reads `path` inside `directory`, or as a plain local path when
    /// `directory` is `None`.
    async fn read(&self, path: &str, directory: Option<Directory>) -> std::io::Result<Vec<u8>>;

    /// Absolute URI of `path` inside `directory`
    async fn resolve_uri(&self, path: &str, directory: Directory) -> std::io::Result<String>;
}

/// Persistent string-keyed string store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Retrieves the resource behind a transient web path
#[async_trait]
pub trait BlobFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Blob, FetchError>;
}
