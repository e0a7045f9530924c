use async_trait::async_trait;
use photo_gallery::{Directory, FileStore};
use std::path::{Path, PathBuf};

/// Get the app data directory for the current platform
pub fn get_app_data_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        for d in [
            "/data/user/0/de.teilgedanken.snapshotgallery/files",
            "/data/data/de.teilgedanken.snapshotgallery/files",
        ] {
            let p = PathBuf::from(d);
            if p.exists() {
                return p;
            }
        }
        PathBuf::from("./data")
    }

    #[cfg(not(target_os = "android"))]
    {
        // On desktop, use ./data directory
        PathBuf::from("./data")
    }
}

/// File store on the local disk. `Directory::Data` maps to `<root>/files`.
pub struct LocalFileStore {
    files_dir: PathBuf,
}

impl LocalFileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            files_dir: data_dir.join("files"),
        }
    }

    fn locate(&self, path: &str, directory: Option<Directory>) -> PathBuf {
        match directory {
            Some(Directory::Data) => self.files_dir.join(path),
            None => PathBuf::from(path.strip_prefix("file://").unwrap_or(path)),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn write(
        &self,
        path: &str,
        data: &[u8],
        directory: Directory,
    ) -> std::io::Result<()> {
        let target = self.locate(path, Some(directory));
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, data).await?;
        log::debug!("Wrote file: {:?}", target);
        Ok(())
    }

    async fn read(&self, path: &str, directory: Option<Directory>) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.locate(path, directory)).await
    }

    async fn resolve_uri(&self, path: &str, directory: Directory) -> std::io::Result<String> {
        let target = self.locate(path, Some(directory));
        let absolute = if target.is_absolute() {
            target
        } else {
            std::env::current_dir()?.join(target)
        };
        Ok(format!("file://{}", absolute.display()))
    }
}
