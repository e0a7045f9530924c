use serde::{Deserialize, Serialize};

/// Execution context the gallery runs in.
///
/// `Native` has direct file system access (packaged mobile or desktop app),
/// `Web` has to fetch captured images as blobs and keeps data URLs around
/// for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Native,
    Web,
}

impl RuntimeMode {
    pub fn is_native(self) -> bool {
        matches!(self, RuntimeMode::Native)
    }
}

impl std::fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeMode::Native => write!(f, "native"),
            RuntimeMode::Web => write!(f, "web"),
        }
    }
}

impl std::str::FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "hybrid" => Ok(RuntimeMode::Native),
            "web" => Ok(RuntimeMode::Web),
            other => Err(format!("unknown runtime mode: {}", other)),
        }
    }
}

/// Mode-specific display data of a photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoDisplay {
    Native {
        preview_path: Option<String>,
    },
    Web {
        preview_path: Option<String>,
        /// `data:image/...;base64,...`, regenerated from disk on load
        inline_data: String,
    },
}

/// A photo in the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Resolved URI in native mode, bare file name in web mode
    pub file_path: String,
    pub display: PhotoDisplay,
}

impl Photo {
    pub fn preview_path(&self) -> Option<&str> {
        match &self.display {
            PhotoDisplay::Native { preview_path } | PhotoDisplay::Web { preview_path, .. } => {
                preview_path.as_deref()
            }
        }
    }

    pub fn inline_data(&self) -> Option<&str> {
        match &self.display {
            PhotoDisplay::Native { .. } => None,
            PhotoDisplay::Web { inline_data, .. } => Some(inline_data),
        }
    }

    pub fn mode(&self) -> RuntimeMode {
        match self.display {
            PhotoDisplay::Native { .. } => RuntimeMode::Native,
            PhotoDisplay::Web { .. } => RuntimeMode::Web,
        }
    }
}

/// Persisted shape of a photo record.
///
/// Keys match the layout already written by earlier versions of the app, so
/// existing `photos` entries keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPhoto {
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(
        rename = "webviewPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub webview_path: Option<String>,
    #[serde(rename = "base64", default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}

impl From<&Photo> for StoredPhoto {
    fn from(photo: &Photo) -> Self {
        // Inline data is never written: native records have none, web
        // records get it back from the file store on load.
        Self {
            file_path: photo.file_path.clone(),
            webview_path: photo.preview_path().map(str::to_string),
            base64: None,
        }
    }
}

/// How the capture device hands back its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Uri,
    Base64,
    DataUrl,
}

/// Where the capture device takes the image from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSource {
    Prompt,
    Camera,
    Photos,
}

/// Options passed to a capture device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    pub result_type: ResultType,
    pub source: CameraSource,
    /// JPEG quality, 0..=100
    pub quality: u8,
}

impl CaptureOptions {
    /// Fixed configuration used when adding a photo to the gallery
    pub fn gallery_default() -> Self {
        Self {
            result_type: ResultType::Uri,
            source: CameraSource::Camera,
            quality: 100,
        }
    }
}

/// Handle to a freshly captured image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// Local file path, set on native platforms
    pub path: Option<String>,
    /// Short-lived path usable for immediate display or fetching
    pub web_path: Option<String>,
    /// Image format reported by the device, e.g. "jpeg"
    pub format: String,
}

/// Logical storage scope of the file store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directory {
    /// Application private data
    Data,
}

/// Configuration for the gallery store
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Key of the persisted photo list in the key-value store
    pub storage_key: String,
    /// Extension appended to the timestamp file name
    pub file_extension: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            storage_key: "photos".to_string(),
            file_extension: "jpeg".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_photo_uses_legacy_keys() {
        let photo = Photo {
            file_path: "1700000000000.jpeg".to_string(),
            display: PhotoDisplay::Web {
                preview_path: Some("blob:xyz".to_string()),
                inline_data: "data:image/jpeg;base64,AAAA".to_string(),
            },
        };

        let json = serde_json::to_string(&StoredPhoto::from(&photo)).unwrap();
        assert_eq!(
            json,
            r#"{"filePath":"1700000000000.jpeg","webviewPath":"blob:xyz"}"#
        );
    }

    #[test]
    fn test_stored_photo_accepts_missing_optionals() {
        let stored: StoredPhoto = serde_json::from_str(r#"{"filePath":"a.jpeg"}"#).unwrap();
        assert_eq!(stored.file_path, "a.jpeg");
        assert!(stored.webview_path.is_none());
        assert!(stored.base64.is_none());
    }

    #[test]
    fn test_runtime_mode_from_str() {
        assert_eq!("native".parse::<RuntimeMode>(), Ok(RuntimeMode::Native));
        assert_eq!("Hybrid".parse::<RuntimeMode>(), Ok(RuntimeMode::Native));
        assert_eq!("web".parse::<RuntimeMode>(), Ok(RuntimeMode::Web));
        assert!("desktop".parse::<RuntimeMode>().is_err());
    }

    #[test]
    fn test_photo_accessors() {
        let native = Photo {
            file_path: "file:///data/1.jpeg".to_string(),
            display: PhotoDisplay::Native { preview_path: None },
        };
        assert_eq!(native.mode(), RuntimeMode::Native);
        assert!(native.preview_path().is_none());
        assert!(native.inline_data().is_none());
    }
}
