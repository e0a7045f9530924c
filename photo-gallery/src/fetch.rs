use crate::ports::{Blob, BlobFetcher, FetchError};
use async_trait::async_trait;

const USER_AGENT: &str = concat!("PhotoGallery/", env!("CARGO_PKG_VERSION"));

/// Fetches captured images over HTTP(S), or from disk for `file://` URLs
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Request(format!("Client build failed: {}", e)))?;

        Ok(Self { client })
    }

    async fn fetch_file(&self, path: &str) -> Result<Blob, FetchError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| FetchError::Request(format!("Reading {} failed: {}", path, e)))?;
        Ok(Blob {
            bytes,
            content_type: None,
        })
    }

    async fn fetch_http(&self, url: &str) -> Result<Blob, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Request(format!("Reading body failed: {}", e)))?;

        Ok(Blob {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

#[async_trait]
impl BlobFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Blob, FetchError> {
        log::debug!("Fetching blob: {}", url);

        if let Some(path) = url.strip_prefix("file://") {
            self.fetch_file(path).await
        } else if url.starts_with("http://") || url.starts_with("https://") {
            self.fetch_http(url).await
        } else {
            Err(FetchError::Unsupported(url.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.jpg");
        std::fs::write(&path, b"jpeg bytes").unwrap();

        let fetcher = HttpFetcher::new().unwrap();
        let blob = fetcher
            .fetch(&format!("file://{}", path.display()))
            .await
            .unwrap();
        assert_eq!(blob.bytes, b"jpeg bytes");
        assert!(blob.content_type.is_none());
    }

    #[tokio::test]
    async fn test_fetch_rejects_blob_scheme() {
        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch("blob:xyz").await.unwrap_err();
        assert_eq!(err, FetchError::Unsupported("blob:xyz".to_string()));
    }
}
