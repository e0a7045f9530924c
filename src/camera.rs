// Desktop stand-in for the device camera: "captures" by importing an
// existing image file, or an http(s) URL in web mode.

use async_trait::async_trait;
use photo_gallery::{CaptureDevice, CaptureError, CaptureOptions, CapturedPhoto, RuntimeMode};
use std::path::Path;

pub struct ImportCamera {
    source: String,
    mode: RuntimeMode,
}

impl ImportCamera {
    pub fn new(source: impl Into<String>, mode: RuntimeMode) -> Self {
        Self {
            source: source.into(),
            mode,
        }
    }
}

fn format_from_ext(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_else(|| "jpeg".to_string())
}

#[async_trait]
impl CaptureDevice for ImportCamera {
    async fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError> {
        log::debug!(
            "Importing {} (source={:?}, quality={})",
            self.source,
            options.source,
            options.quality
        );

        if self.source.starts_with("http://") || self.source.starts_with("https://") {
            // A native capture hands back a local file; URLs only exist as web paths.
            if self.mode.is_native() {
                return Err(CaptureError::Unavailable(format!(
                    "{} is a URL; URL sources need --mode web",
                    self.source
                )));
            }
            return Ok(CapturedPhoto {
                path: None,
                web_path: Some(self.source.clone()),
                format: format_from_ext(self.source.split('?').next().unwrap_or(&self.source)),
            });
        }

        let path = Path::new(&self.source);
        if !path.is_file() {
            return Err(CaptureError::Unavailable(format!(
                "No image at {}",
                self.source
            )));
        }

        let absolute = tokio::fs::canonicalize(path)
            .await
            .map_err(|e| CaptureError::Other(format!("Cannot resolve {}: {}", self.source, e)))?;
        let absolute = absolute.to_string_lossy().to_string();

        Ok(CapturedPhoto {
            web_path: Some(format!("file://{}", absolute)),
            format: format_from_ext(&absolute),
            path: Some(absolute),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_capture_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("shot.JPG");
        std::fs::write(&source, b"jpeg").unwrap();

        let camera = ImportCamera::new(source.to_string_lossy(), RuntimeMode::Native);
        let captured = camera
            .capture(&CaptureOptions::gallery_default())
            .await
            .unwrap();

        let path = captured.path.unwrap();
        assert!(Path::new(&path).is_absolute());
        assert_eq!(captured.web_path, Some(format!("file://{}", path)));
        assert_eq!(captured.format, "jpg");
    }

    #[tokio::test]
    async fn test_capture_url_in_web_mode() {
        let camera = ImportCamera::new("https://example.com/cat.png?size=large", RuntimeMode::Web);
        let captured = camera
            .capture(&CaptureOptions::gallery_default())
            .await
            .unwrap();

        assert!(captured.path.is_none());
        assert_eq!(
            captured.web_path.as_deref(),
            Some("https://example.com/cat.png?size=large")
        );
        assert_eq!(captured.format, "png");
    }

    #[tokio::test]
    async fn test_capture_missing_file() {
        let camera = ImportCamera::new("/definitely/not/here.jpg", RuntimeMode::Native);
        let err = camera
            .capture(&CaptureOptions::gallery_default())
            .await
            .unwrap_err();
        assert!(matches!(err, CaptureError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_url_rejected_in_default_mode() {
        use photo_gallery::memory::{MemoryFileStore, MemoryKeyValueStore, StaticFetcher};
        use photo_gallery::{GalleryConfig, GalleryError, GalleryStore};

        let mode = crate::platform::detect_runtime_mode(None);
        let mut gallery = GalleryStore::new(
            ImportCamera::new("https://example.com/cat.jpg", mode),
            MemoryFileStore::new(),
            MemoryKeyValueStore::new(),
            StaticFetcher::new(),
            GalleryConfig::default(),
        );

        let err = gallery.add_new_to_gallery(mode).await.unwrap_err();

        assert!(matches!(
            err,
            GalleryError::Capture(CaptureError::Unavailable(ref msg)) if msg.contains("--mode web")
        ));
        assert!(gallery.photos().is_empty());
        assert!(gallery.files().writes().is_empty());
    }
}
