// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graphics backend contract.
//!
//! A [`Renderer`] is an external collaborator: it owns the GPU (or whatever
//! rasterizes the frame), measures and lays out glyphs, and manages
//! textures. The compositor only ever hands it a finished
//! [`CommandList`].

use lamina_render::{CommandList, RenderError, TextRenderer, TextureHandle, TextureInfo};

use crate::compositor::Compositor;

/// A graphics backend driven by [`Compositor::draw`].
///
/// The compositor takes the renderer out of itself for the duration of a
/// draw, so every method that receives the compositor sees a consistent
/// tree but cannot reach the renderer through it.
pub trait Renderer: TextRenderer {
    /// Called once when the renderer is installed with
    /// [`Compositor::set_renderer`].
    fn startup(&mut self, compositor: &Compositor) {
        _ = compositor;
    }

    /// Called once when the renderer is replaced or the compositor is
    /// dropped.
    fn shutdown(&mut self, compositor: &Compositor) {
        _ = compositor;
    }

    /// Starts a frame, before any panel is rendered.
    fn begin_frame(&mut self, compositor: &Compositor);

    /// Finishes a frame, after [`draw_commands`](Self::draw_commands).
    fn end_frame(&mut self);

    /// Loads a texture from `path`.
    fn texture_create(&mut self, path: &str) -> Result<TextureHandle, RenderError>;

    /// Releases a texture.
    fn texture_destroy(&mut self, texture: TextureHandle);

    /// Returns the dimensions of a texture.
    fn texture_info(&self, texture: TextureHandle) -> Result<TextureInfo, RenderError>;

    /// Submits the frame's draw calls.
    fn draw_commands(&mut self, commands: &CommandList);
}
