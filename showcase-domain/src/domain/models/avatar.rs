/// An encoded image as exchanged with the image collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl Image {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// A single step in a filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterSpec {
    /// Crops to the centred square and clears everything outside the
    /// inscribed circle.
    Circle,
    /// Replaces every `scale` x `scale` block with its average colour.
    Pixellate { scale: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarOutput {
    /// The most pixellated variant, or the original image when no variant
    /// was produced.
    pub avatar: Image,
    /// Every variant, ordered by descending pixellation scale.
    pub pixelized: Vec<Image>,
}

impl AvatarOutput {
    pub fn new(avatar: Image, pixelized: Vec<Image>) -> Self {
        Self { avatar, pixelized }
    }
}
