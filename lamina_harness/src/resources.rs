// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use lamina_render::{FontHandle, ResourceCache, TextureHandle};

#[derive(Clone, Debug)]
struct FontEntry {
    filename: String,
    pixel_size: u16,
    atlas: TextureHandle,
}

/// A [`ResourceCache`] that issues handles without loading anything.
///
/// Requests for the same file (and, for fonts, the same pixel size) return
/// the same handle. An empty filename yields an invalid handle, which is how
/// tests exercise the "resource failed to load" paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryResourceCache {
    fonts: Vec<Option<FontEntry>>,
    textures: Vec<Option<String>>,
}

impl MemoryResourceCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live fonts.
    #[must_use]
    pub fn font_count(&self) -> usize {
        self.fonts.iter().flatten().count()
    }

    /// Returns the number of live textures, font atlases included.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.iter().flatten().count()
    }

    /// Returns the file a texture was created from.
    #[must_use]
    pub fn texture_path(&self, texture: TextureHandle) -> Option<&str> {
        let idx = usize::try_from(texture.0).ok()?;
        self.textures.get(idx)?.as_deref()
    }
}

fn handle(idx: usize) -> i32 {
    i32::try_from(idx).unwrap_or(-1)
}

impl ResourceCache for MemoryResourceCache {
    fn create_font(&mut self, filename: &str, pixel_size: u16) -> FontHandle {
        if filename.is_empty() {
            return FontHandle::INVALID;
        }
        let existing = self.fonts.iter().position(|f| {
            f.as_ref()
                .is_some_and(|f| f.filename == filename && f.pixel_size == pixel_size)
        });
        if let Some(idx) = existing {
            return FontHandle(handle(idx));
        }
        let atlas = self.create_texture(&format!("{filename}@{pixel_size}"));
        self.fonts.push(Some(FontEntry {
            filename: filename.into(),
            pixel_size,
            atlas,
        }));
        FontHandle(handle(self.fonts.len() - 1))
    }

    fn texture_for_font(&self, font: FontHandle) -> TextureHandle {
        usize::try_from(font.0)
            .ok()
            .and_then(|idx| self.fonts.get(idx)?.as_ref())
            .map_or(TextureHandle::INVALID, |f| f.atlas)
    }

    fn create_texture(&mut self, filename: &str) -> TextureHandle {
        if filename.is_empty() {
            return TextureHandle::INVALID;
        }
        let existing = self
            .textures
            .iter()
            .position(|t| t.as_deref() == Some(filename));
        if let Some(idx) = existing {
            return TextureHandle(handle(idx));
        }
        self.textures.push(Some(filename.into()));
        TextureHandle(handle(self.textures.len() - 1))
    }

    fn destroy_font(&mut self, font: FontHandle) {
        let Some(entry) = usize::try_from(font.0)
            .ok()
            .and_then(|idx| self.fonts.get_mut(idx))
            .and_then(Option::take)
        else {
            return;
        };
        self.destroy_texture(entry.atlas);
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        if let Some(slot) = usize::try_from(texture.0)
            .ok()
            .and_then(|idx| self.textures.get_mut(idx))
        {
            *slot = None;
        }
    }
}
