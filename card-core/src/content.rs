//! Generated artifacts revealed at the end of the experience.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// The personalized birthday message produced by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayContent {
    /// An anime/RPG style title.
    pub title: String,
    /// The main message.
    pub message: String,
    /// A haiku or short poem.
    pub poem: String,
}

/// The generated artwork, carried as a mime type plus base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub media_type: String,
    pub data: String,
}

impl GeneratedImage {
    /// Render as a `data:` URI suitable for any displayable-image handle.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }

    /// Decode the raw image bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }

    /// File extension matching the mime type.
    pub fn extension(&self) -> &str {
        match self.media_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_deserializes_from_schema_shape() {
        let raw = r#"{"title": "A Invocadora", "message": "Feliz aniversário!", "poem": "mármore e luz"}"#;
        let content: BirthdayContent = serde_json::from_str(raw).unwrap();
        assert_eq!(content.title, "A Invocadora");
        assert_eq!(content.poem, "mármore e luz");
    }

    #[test]
    fn test_content_rejects_missing_field() {
        let raw = r#"{"title": "A Invocadora", "message": "oi"}"#;
        assert!(serde_json::from_str::<BirthdayContent>(raw).is_err());
    }

    #[test]
    fn test_image_data_uri_and_bytes() {
        let image = GeneratedImage {
            media_type: "image/png".to_string(),
            data: STANDARD.encode(b"fake-png"),
        };

        assert_eq!(image.data_uri(), format!("data:image/png;base64,{}", image.data));
        assert_eq!(image.bytes().unwrap(), b"fake-png");
        assert_eq!(image.extension(), "png");
    }

    #[test]
    fn test_image_extension_from_mime() {
        let image = GeneratedImage {
            media_type: "image/jpeg".to_string(),
            data: String::new(),
        };
        assert_eq!(image.extension(), "jpg");
    }
}
