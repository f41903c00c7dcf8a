use serde::{Deserialize, Serialize};

/// A creator's feed post, as far as sentiment scoring is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub text: String,
    /// Attached image, if any
    pub image_url: Option<String>,
}

impl Post {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Blank image URLs count as no image.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}
