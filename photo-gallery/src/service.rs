use crate::encoding::{self, DataUrlError, EncodedImage, DEFAULT_MIME};
use crate::models::{
    CaptureOptions, CapturedPhoto, Directory, GalleryConfig, Photo, PhotoDisplay, RuntimeMode,
    StoredPhoto,
};
use crate::ports::{
    BlobFetcher, CaptureDevice, CaptureError, FetchError, FileStore, KeyValueStore, StoreError,
};

/// Error type for gallery operations
#[derive(Debug)]
pub enum GalleryError {
    Capture(CaptureError),
    File(std::io::Error),
    Store(StoreError),
    Fetch(FetchError),
    Decode(base64::DecodeError),
    DataUrl(DataUrlError),
    Serialize(serde_json::Error),
    /// The capture handle lacks the path the current mode needs
    MissingPath(&'static str),
}

impl std::fmt::Display for GalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GalleryError::Capture(e) => write!(f, "Capture error: {}", e),
            GalleryError::File(e) => write!(f, "File error: {}", e),
            GalleryError::Store(e) => write!(f, "Store error: {}", e),
            GalleryError::Fetch(e) => write!(f, "Fetch error: {}", e),
            GalleryError::Decode(e) => write!(f, "Base64 decode error: {}", e),
            GalleryError::DataUrl(e) => write!(f, "Data URL error: {}", e),
            GalleryError::Serialize(e) => write!(f, "Serialization error: {}", e),
            GalleryError::MissingPath(which) => {
                write!(f, "Captured photo has no {}", which)
            }
        }
    }
}

impl std::error::Error for GalleryError {}

impl From<CaptureError> for GalleryError {
    fn from(err: CaptureError) -> Self {
        GalleryError::Capture(err)
    }
}

impl From<std::io::Error> for GalleryError {
    fn from(err: std::io::Error) -> Self {
        GalleryError::File(err)
    }
}

impl From<StoreError> for GalleryError {
    fn from(err: StoreError) -> Self {
        GalleryError::Store(err)
    }
}

impl From<FetchError> for GalleryError {
    fn from(err: FetchError) -> Self {
        GalleryError::Fetch(err)
    }
}

impl From<base64::DecodeError> for GalleryError {
    fn from(err: base64::DecodeError) -> Self {
        GalleryError::Decode(err)
    }
}

impl From<DataUrlError> for GalleryError {
    fn from(err: DataUrlError) -> Self {
        GalleryError::DataUrl(err)
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::Serialize(err)
    }
}

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// Gallery of captured photos, newest first, mirrored into a key-value store.
///
/// Operations take `&mut self`; callers serialise concurrent use. A failed
/// store write after a successful capture leaves the new photo in memory but
/// not in the store.
pub struct GalleryStore<C, F, K, B> {
    camera: C,
    files: F,
    store: K,
    fetcher: B,
    config: GalleryConfig,
    clock: Clock,
    photos: Vec<Photo>,
}

impl<C, F, K, B> GalleryStore<C, F, K, B>
where
    C: CaptureDevice,
    F: FileStore,
    K: KeyValueStore,
    B: BlobFetcher,
{
    pub fn new(camera: C, files: F, store: K, fetcher: B, config: GalleryConfig) -> Self {
        Self {
            camera,
            files,
            store,
            fetcher,
            config,
            clock: Box::new(|| chrono::Utc::now().timestamp_millis()),
            photos: Vec::new(),
        }
    }

    /// Replaces the millisecond clock used for file names
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    /// Takes a photo, stores it and puts it at the front of the gallery
    pub async fn add_new_to_gallery(&mut self, mode: RuntimeMode) -> Result<&Photo, GalleryError> {
        log::debug!("=== add_new_to_gallery called ({}) ===", mode);

        let captured = self
            .camera
            .capture(&CaptureOptions::gallery_default())
            .await?;
        log::debug!(
            "Captured: path={:?}, web_path={:?}",
            captured.path,
            captured.web_path
        );

        let photo = self.save_picture(&captured, mode).await?;
        self.photos.insert(0, photo);

        self.persist().await?;

        log::info!(
            "Added photo {} ({} in gallery)",
            self.photos[0].file_path,
            self.photos.len()
        );
        Ok(&self.photos[0])
    }

    /// Replaces the in-memory gallery with the persisted one.
    ///
    /// In web mode every record gets its inline data re-read from the file
    /// store. The first missing file aborts the load and the previous
    /// in-memory gallery stays as it was.
    pub async fn load_saved(&mut self, mode: RuntimeMode) -> Result<(), GalleryError> {
        let raw = self.store.get(&self.config.storage_key).await?;
        let stored = parse_stored(raw.as_deref());
        log::debug!("Loaded {} persisted photo records", stored.len());

        let mut photos = Vec::with_capacity(stored.len());
        for record in stored {
            let display = match mode {
                RuntimeMode::Native => PhotoDisplay::Native {
                    preview_path: record.webview_path,
                },
                RuntimeMode::Web => {
                    let bytes = self
                        .files
                        .read(&record.file_path, Some(Directory::Data))
                        .await?;
                    PhotoDisplay::Web {
                        preview_path: record.webview_path,
                        inline_data: encoding::jpeg_data_url(&bytes),
                    }
                }
            };
            photos.push(Photo {
                file_path: record.file_path,
                display,
            });
        }

        self.photos = photos;
        Ok(())
    }

    /// Writes the gallery to the key-value store.
    ///
    /// Inline data is stripped regardless of mode: only web records carry
    /// it, and those get it back from the file store on load.
    pub async fn persist(&self) -> Result<(), GalleryError> {
        let stored: Vec<StoredPhoto> = self.photos.iter().map(StoredPhoto::from).collect();
        let value = serde_json::to_string(&stored)?;
        log::debug!(
            "Persisting {} photos under '{}'",
            stored.len(),
            self.config.storage_key
        );
        self.store.set(&self.config.storage_key, &value).await?;
        Ok(())
    }

    async fn save_picture(
        &self,
        captured: &CapturedPhoto,
        mode: RuntimeMode,
    ) -> Result<Photo, GalleryError> {
        let encoded = self.read_as_base64(captured, mode).await?;

        let file_name = format!("{}.{}", (self.clock)(), self.config.file_extension);
        let bytes = encoded.decode()?;
        self.files.write(&file_name, &bytes, Directory::Data).await?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), file_name);

        self.get_photo_file(captured, &file_name, &encoded, mode)
            .await
    }

    async fn read_as_base64(
        &self,
        captured: &CapturedPhoto,
        mode: RuntimeMode,
    ) -> Result<EncodedImage, GalleryError> {
        match mode {
            RuntimeMode::Native => {
                let path = captured
                    .path
                    .as_deref()
                    .ok_or(GalleryError::MissingPath("path"))?;
                let bytes = self.files.read(path, None).await?;
                Ok(encoding::encode_bytes(&bytes, &mime_for(captured)))
            }
            RuntimeMode::Web => {
                let web_path = captured
                    .web_path
                    .as_deref()
                    .ok_or(GalleryError::MissingPath("web path"))?;
                let blob = self.fetcher.fetch(web_path).await?;
                let fallback = blob.content_type.clone().unwrap_or_else(|| mime_for(captured));
                let data_url = encoding::encode_bytes(&blob.bytes, &fallback).to_data_url();
                Ok(encoding::parse_data_url(&data_url)?)
            }
        }
    }

    async fn get_photo_file(
        &self,
        captured: &CapturedPhoto,
        file_name: &str,
        encoded: &EncodedImage,
        mode: RuntimeMode,
    ) -> Result<Photo, GalleryError> {
        match mode {
            RuntimeMode::Native => {
                let uri = self.files.resolve_uri(file_name, Directory::Data).await?;
                Ok(Photo {
                    file_path: uri,
                    display: PhotoDisplay::Native {
                        preview_path: captured.web_path.clone(),
                    },
                })
            }
            RuntimeMode::Web => Ok(Photo {
                file_path: file_name.to_string(),
                display: PhotoDisplay::Web {
                    preview_path: captured.web_path.clone(),
                    inline_data: encoded.to_data_url(),
                },
            }),
        }
    }
}

fn mime_for(captured: &CapturedPhoto) -> String {
    match captured.format.to_ascii_lowercase().as_str() {
        "" | "jpg" | "jpeg" => DEFAULT_MIME.to_string(),
        other => format!("image/{}", other),
    }
}

/// Absent, `null` and unparsable values all load as an empty gallery
fn parse_stored(raw: Option<&str>) -> Vec<StoredPhoto> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Option<Vec<StoredPhoto>>>(raw) {
        Ok(records) => records.unwrap_or_default(),
        Err(e) => {
            log::warn!("Ignoring unparsable persisted photo list: {}", e);
            Vec::new()
        }
    }
}
