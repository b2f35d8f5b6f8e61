use serde::{Deserialize, Serialize};

/// A picture picked by the user, not yet uploaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Guess the content type from the file extension
    pub fn from_path_bytes(name: &str, bytes: Vec<u8>) -> Self {
        let lower = name.to_lowercase();
        let content_type = if lower.ends_with(".png") {
            "image/png"
        } else if lower.ends_with(".webp") {
            "image/webp"
        } else if lower.ends_with(".gif") {
            "image/gif"
        } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
            "image/jpeg"
        } else {
            "application/octet-stream"
        };
        Self::new(name, content_type, bytes)
    }
}

/// What an editor's image field currently holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum ImageSelection {
    #[default]
    None,
    /// Already in the object store under the given key
    Stored(String),
    /// Picked in this session; needs uploading on save
    Selected(ImageFile),
}

impl ImageSelection {
    pub fn is_empty(&self) -> bool {
        matches!(self, ImageSelection::None)
    }

    pub fn is_new(&self) -> bool {
        matches!(self, ImageSelection::Selected(_))
    }

    pub fn file(&self) -> Option<&ImageFile> {
        match self {
            ImageSelection::Selected(file) => Some(file),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_type_guess() {
        assert_eq!(ImageFile::from_path_bytes("me.PNG", vec![]).content_type, "image/png");
        assert_eq!(ImageFile::from_path_bytes("me.jpeg", vec![]).content_type, "image/jpeg");
        assert_eq!(
            ImageFile::from_path_bytes("me", vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_only_selected_is_new() {
        assert!(!ImageSelection::Stored("p1".into()).is_new());
        assert!(ImageSelection::Selected(ImageFile::new("a.png", "image/png", vec![1])).is_new());
    }
}
