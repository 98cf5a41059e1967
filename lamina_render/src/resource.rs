// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture and font handles and the resource-cache contract.
//!
//! Handles are assigned by a [`ResourceCache`] (or a renderer) and passed
//! through command lists without interpretation. A handle whose inner value
//! is `-1` is invalid; creation functions return it on failure.

use core::fmt;

use kurbo::Size;

/// An opaque reference to a renderer-managed texture.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureHandle(pub i32);

impl TextureHandle {
    /// The invalid texture. Command lists treat it as "solid fill".
    pub const INVALID: Self = Self(-1);

    /// Returns whether this handle refers to a texture.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != -1
    }
}

impl Default for TextureHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureHandle({})", self.0)
    }
}

/// An opaque reference to a loaded font at a fixed pixel size.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontHandle(pub i32);

impl FontHandle {
    /// The invalid font.
    pub const INVALID: Self = Self(-1);

    /// Returns whether this handle refers to a font.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != -1
    }
}

impl Default for FontHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FontHandle({})", self.0)
    }
}

/// Dimensions and channel count of a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureInfo {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Number of color channels.
    pub channels: u8,
}

impl TextureInfo {
    /// Returns the texture dimensions as a [`Size`].
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Vertical metrics of a font.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance between consecutive baselines.
    pub line_height: f64,
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascender: f64,
    /// Distance from the baseline to the bottom of the lowest glyph
    /// (negative below the baseline).
    pub descender: f64,
}

/// Failures reported by texture and font operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The texture could not be created or loaded.
    #[error("failed to create texture from `{0}`")]
    TextureFailed(alloc::string::String),
    /// The font could not be created or loaded.
    #[error("failed to create font from `{0}`")]
    FontFailed(alloc::string::String),
    /// A handle did not refer to a live resource.
    #[error("invalid resource handle {0}")]
    InvalidHandle(i32),
}

/// Creates and owns textures and fonts on behalf of widgets.
///
/// Creation never panics. On failure the returned handle is invalid and the
/// caller decides how to degrade (for instance, by rendering without text).
pub trait ResourceCache {
    /// Loads (or reuses) a font from `filename` rasterized at `pixel_size`.
    fn create_font(&mut self, filename: &str, pixel_size: u16) -> FontHandle;

    /// Returns the glyph atlas texture backing `font`.
    fn texture_for_font(&self, font: FontHandle) -> TextureHandle;

    /// Loads (or reuses) a texture from `filename`.
    fn create_texture(&mut self, filename: &str) -> TextureHandle;

    /// Releases a font handle.
    fn destroy_font(&mut self, font: FontHandle);

    /// Releases a texture handle.
    fn destroy_texture(&mut self, texture: TextureHandle);
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn handles_default_to_invalid() {
        assert!(!TextureHandle::default().is_valid());
        assert!(!FontHandle::default().is_valid());
        assert!(TextureHandle(0).is_valid());
        assert!(FontHandle(3).is_valid());
    }

    #[test]
    fn error_messages_name_the_resource() {
        let e = RenderError::TextureFailed("images/missing.png".into());
        assert_eq!(e.to_string(), "failed to create texture from `images/missing.png`");
        assert_eq!(RenderError::InvalidHandle(-1).to_string(), "invalid resource handle -1");
    }
}
