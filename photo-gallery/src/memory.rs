//! In-process collaborators.
//!
//! Nothing here touches the disk or the network. The service tests run
//! against these.

use crate::models::{CaptureOptions, CapturedPhoto, Directory};
use crate::ports::{
    Blob, BlobFetcher, CaptureDevice, CaptureError, FetchError, FileStore, KeyValueStore,
    StoreError,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

fn not_found(path: &str) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("File does not exist: {}", path),
    )
}

/// File store backed by a map. `Data` entries and plain paths live in
/// separate namespaces, like a sandboxed data directory would.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    data: Mutex<HashMap<String, Vec<u8>>>,
    local: Mutex<HashMap<String, Vec<u8>>>,
    writes: Mutex<Vec<String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `write` fail, e.g. to simulate a full disk
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Places a file outside the data directory, e.g. a camera temp file
    pub fn insert_local(&self, path: &str, bytes: Vec<u8>) {
        self.local
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_string(), bytes);
    }

    pub fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.data
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(path)
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.data
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }

    /// Paths written to the data directory, in order
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn write(
        &self,
        path: &str,
        data: &[u8],
        _directory: Directory,
    ) -> std::io::Result<()> {
        if *self.fail_writes.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(std::io::Error::other("no space left on device"));
        }
        self.data
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_string(), data.to_vec());
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_string());
        Ok(())
    }

    async fn read(&self, path: &str, directory: Option<Directory>) -> std::io::Result<Vec<u8>> {
        let map = match directory {
            Some(Directory::Data) => &self.data,
            None => &self.local,
        };
        map.lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    async fn resolve_uri(&self, path: &str, _directory: Directory) -> std::io::Result<String> {
        Ok(format!("memory://data/{}", path))
    }
}

/// Key-value store backed by a map
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
    fail_reads: Mutex<bool>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Makes every following `set` fail, e.g. to simulate a full quota
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Makes every following `get` fail
    pub fn fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(StoreError::Backend("quota exceeded".to_string()));
        }
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if *self.fail_reads.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(StoreError::Backend("storage unavailable".to_string()));
        }
        Ok(self.raw(key))
    }
}

/// Camera that always returns the same result
#[derive(Debug)]
pub struct StaticCamera {
    result: Result<CapturedPhoto, CaptureError>,
    calls: Mutex<Vec<CaptureOptions>>,
}

impl StaticCamera {
    pub fn returning(photo: CapturedPhoto) -> Self {
        Self {
            result: Ok(photo),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: CaptureError) -> Self {
        Self {
            result: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Options of every capture call so far
    pub fn calls(&self) -> Vec<CaptureOptions> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl CaptureDevice for StaticCamera {
    async fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(options.clone());
        self.result.clone()
    }
}

/// Fetcher serving blobs from a map
#[derive(Debug, Default)]
pub struct StaticFetcher {
    blobs: HashMap<String, Blob>,
    fetched: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(mut self, url: &str, bytes: Vec<u8>, content_type: Option<&str>) -> Self {
        self.blobs.insert(
            url.to_string(),
            Blob {
                bytes,
                content_type: content_type.map(str::to_string),
            },
        );
        self
    }

    /// URLs requested so far
    pub fn fetched(&self) -> Vec<String> {
        self.fetched
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl BlobFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Blob, FetchError> {
        self.fetched
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());
        self.blobs.get(url).cloned().ok_or(FetchError::Status(404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_namespaces() {
        let store = MemoryFileStore::new();
        store.insert_local("/tmp/a.jpg", vec![1u8, 2, 3]);
        store.write("a.jpeg", &[4, 5], Directory::Data).await.unwrap();

        assert_eq!(store.read("/tmp/a.jpg", None).await.unwrap(), vec![1u8, 2, 3]);
        assert_eq!(
            store.read("a.jpeg", Some(Directory::Data)).await.unwrap(),
            vec![4u8, 5]
        );
        let err = store.read("/tmp/a.jpg", Some(Directory::Data)).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(store.writes(), vec!["a.jpeg".to_string()]);
    }

    #[tokio::test]
    async fn test_kv_store_failing_writes() {
        let store = MemoryKeyValueStore::with_entry("photos", "[]");
        store.fail_writes(true);
        assert!(store.set("photos", "x").await.is_err());
        assert_eq!(store.get("photos").await.unwrap(), Some("[]".to_string()));
    }
}
