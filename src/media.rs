//! Output of generative media models
//!
//! Text-to-video and image models answer with a URL, a file-like object
//! carrying a URL, a raw byte stream, or a list of any of these. The shape is
//! resolved once here; callers only ever see `GeneratedMedia`.
//!
//! This is the boundary for external generation clients. They are not part of
//! this crate and hand their raw output to [`GeneratedMedia::resolve`].

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedMedia {
    /// Hosted by the model provider
    Remote(String),
    /// Delivered as bytes in the response
    Inline(Vec<u8>),
}

/// What a model call handed back before interpretation
#[derive(Debug, Clone)]
pub enum RawModelOutput {
    Json(Value),
    Stream(Vec<u8>),
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Model returned empty output")]
    EmptyOutput,

    #[error("Model returned an unsupported output shape: {0}")]
    UnsupportedShape(String),
}

impl GeneratedMedia {
    pub fn resolve(output: RawModelOutput) -> Result<Self, MediaError> {
        match output {
            RawModelOutput::Stream(bytes) if bytes.is_empty() => Err(MediaError::EmptyOutput),
            RawModelOutput::Stream(bytes) => Ok(GeneratedMedia::Inline(bytes)),
            RawModelOutput::Json(value) => Self::from_json(&value),
        }
    }

    fn from_json(value: &Value) -> Result<Self, MediaError> {
        match value {
            Value::String(s) if !s.trim().is_empty() => {
                Ok(GeneratedMedia::Remote(s.trim().to_string()))
            }
            Value::Object(map) => match map.get("url").and_then(Value::as_str) {
                Some(url) if !url.trim().is_empty() => {
                    Ok(GeneratedMedia::Remote(url.trim().to_string()))
                }
                _ => Err(MediaError::UnsupportedShape("object without url".to_string())),
            },
            // Only the first item of a batch is used
            Value::Array(items) => items
                .first()
                .ok_or(MediaError::EmptyOutput)
                .and_then(Self::from_json),
            Value::Null | Value::String(_) => Err(MediaError::EmptyOutput),
            other => Err(MediaError::UnsupportedShape(other.to_string())),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, GeneratedMedia::Remote(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_url() {
        let output = json!(" https://cdn.test/v.mp4 ");
        let media = GeneratedMedia::resolve(RawModelOutput::Json(output));
        assert_eq!(media.unwrap(), GeneratedMedia::Remote("https://cdn.test/v.mp4".into()));
    }

    #[test]
    fn test_list_of_file_objects() {
        let output = json!([
            { "url": "https://cdn.test/a.mp4" },
            { "url": "https://cdn.test/b.mp4" }
        ]);
        let media = GeneratedMedia::resolve(RawModelOutput::Json(output)).unwrap();
        assert_eq!(media, GeneratedMedia::Remote("https://cdn.test/a.mp4".into()));
        assert!(media.is_remote());
    }

    #[test]
    fn test_stream_is_inline() {
        let media = GeneratedMedia::resolve(RawModelOutput::Stream(vec![0, 0, 0, 24])).unwrap();
        assert_eq!(media, GeneratedMedia::Inline(vec![0, 0, 0, 24]));
    }

    #[test]
    fn test_empty_outputs() {
        assert!(matches!(
            GeneratedMedia::resolve(RawModelOutput::Stream(vec![])),
            Err(MediaError::EmptyOutput)
        ));
        assert!(matches!(
            GeneratedMedia::resolve(RawModelOutput::Json(json!([]))),
            Err(MediaError::EmptyOutput)
        ));
        assert!(matches!(
            GeneratedMedia::resolve(RawModelOutput::Json(json!("  "))),
            Err(MediaError::EmptyOutput)
        ));
    }

    #[test]
    fn test_unsupported_shape() {
        assert!(matches!(
            GeneratedMedia::resolve(RawModelOutput::Json(json!(42))),
            Err(MediaError::UnsupportedShape(_))
        ));
    }
}
