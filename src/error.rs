use photo_gallery::{CaptureError, GalleryError};
use std::fmt;

/// Central error types for the gallery app
#[derive(Debug)]
pub enum AppError {
    /// Database error (rusqlite)
    Database(rusqlite::Error),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Invalid or unreadable configuration
    Config(String),
    /// Gallery operation failed
    Gallery(GalleryError),
    /// Other failures, e.g. building the HTTP client
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Gallery(e) => write!(f, "{}", e),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<GalleryError> for AppError {
    fn from(e: GalleryError) -> Self {
        AppError::Gallery(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// Short messages for the terminal
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => "A database error occurred. Please try again.".to_string(),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
            AppError::Config(msg) => format!("Invalid configuration: {}", msg),
            AppError::Gallery(GalleryError::Capture(CaptureError::Cancelled(_))) => {
                "Photo capture was cancelled.".to_string()
            }
            AppError::Gallery(GalleryError::Capture(CaptureError::PermissionDenied(msg))) => {
                format!("Permission required: {}", msg)
            }
            AppError::Gallery(GalleryError::File(_)) => {
                "A photo file could not be read or written.".to_string()
            }
            AppError::Gallery(e) => e.to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }
}
