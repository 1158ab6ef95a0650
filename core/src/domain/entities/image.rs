//! Profile image upload payload

/// Content types accepted for profile images
pub const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// An uploaded profile image
#[derive(Clone, PartialEq, Eq)]
pub struct ProfileImage {
    /// MIME type declared by the uploader
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ProfileImage {
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn is_allowed_type(&self) -> bool {
        ALLOWED_IMAGE_TYPES.contains(&self.content_type.as_str())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ProfileImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileImage")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
