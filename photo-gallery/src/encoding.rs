use base64::{engine::general_purpose, Engine as _};

pub const DEFAULT_MIME: &str = "image/jpeg";

/// Error type for data URL parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataUrlError {
    /// `data:` header without the `,` that starts the payload
    MissingPayload,
    Decode(base64::DecodeError),
}

impl std::fmt::Display for DataUrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataUrlError::MissingPayload => write!(f, "Data URL has no payload separator"),
            DataUrlError::Decode(e) => write!(f, "Invalid base64 payload: {}", e),
        }
    }
}

impl std::error::Error for DataUrlError {}

impl From<base64::DecodeError> for DataUrlError {
    fn from(err: base64::DecodeError) -> Self {
        DataUrlError::Decode(err)
    }
}

/// Base64 encoded image with its mime type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime: String,
    /// Standard base64, no data URL prefix
    pub payload: String,
}

impl EncodedImage {
    /// Renders `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.payload)
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        general_purpose::STANDARD.decode(self.payload.as_bytes())
    }
}

/// Guesses the mime type from the image's magic bytes
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Jpeg => Some("image/jpeg"),
        image::ImageFormat::Png => Some("image/png"),
        image::ImageFormat::WebP => Some("image/webp"),
        image::ImageFormat::Gif => Some("image/gif"),
        image::ImageFormat::Bmp => Some("image/bmp"),
        image::ImageFormat::Tiff => Some("image/tiff"),
        _ => None,
    }
}

pub fn encode_bytes(bytes: &[u8], fallback_mime: &str) -> EncodedImage {
    let mime = sniff_mime(bytes).unwrap_or(fallback_mime);
    EncodedImage {
        mime: mime.to_string(),
        payload: general_purpose::STANDARD.encode(bytes),
    }
}

/// Accepts a `data:` URL or a bare base64 payload.
///
/// Bare payloads are assumed to be JPEG.
pub fn parse_data_url(input: &str) -> Result<EncodedImage, DataUrlError> {
    let input = input.trim();
    let (mime, payload) = match input.strip_prefix("data:") {
        Some(rest) => match rest.split_once(',') {
            Some((header, payload)) => {
                let mime = header.strip_suffix(";base64").unwrap_or(header);
                let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };
                (mime.to_string(), payload)
            }
            None => return Err(DataUrlError::MissingPayload),
        },
        None => (DEFAULT_MIME.to_string(), input),
    };

    // Validate now so a broken payload fails before anything is written.
    general_purpose::STANDARD.decode(payload.as_bytes())?;

    Ok(EncodedImage {
        mime,
        payload: payload.to_string(),
    })
}

/// Data URL used to display a stored JPEG file
pub fn jpeg_data_url(bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        DEFAULT_MIME,
        general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_sniff_jpeg() {
        assert_eq!(sniff_mime(JPEG_MAGIC), Some("image/jpeg"));
        assert_eq!(sniff_mime(b"hello"), None);
    }

    #[test]
    fn test_encode_falls_back_to_given_mime() {
        let encoded = encode_bytes(b"hello", "image/heic");
        assert_eq!(encoded.mime, "image/heic");
        assert_eq!(encoded.payload, "aGVsbG8=");
        assert_eq!(encoded.to_data_url(), "data:image/heic;base64,aGVsbG8=");
    }

    #[test]
    fn test_parse_prefixed_and_bare() {
        let prefixed = parse_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(prefixed.mime, "image/png");
        assert_eq!(prefixed.payload, "aGVsbG8=");
        assert_eq!(prefixed.decode().unwrap(), b"hello");

        let bare = parse_data_url("aGVsbG8=").unwrap();
        assert_eq!(bare.mime, DEFAULT_MIME);
        assert_eq!(bare.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_data_url("data:image/jpeg;base64,@@@"),
            Err(DataUrlError::Decode(_))
        ));
        assert_eq!(
            parse_data_url("data:image/jpeg;base64"),
            Err(DataUrlError::MissingPayload)
        );
    }

    #[test]
    fn test_jpeg_data_url() {
        assert_eq!(jpeg_data_url(b"hello"), "data:image/jpeg;base64,aGVsbG8=");
    }
}
