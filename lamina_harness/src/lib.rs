// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless test doubles for lamina.
//!
//! [`HeadlessRenderer`] rasterizes nothing: it lays text out on a fixed
//! monospace grid ([`GLYPH_ADVANCE`] x [`LINE_HEIGHT`]) and records every
//! submitted command list in a shared [`FrameLog`]. [`MemoryResourceCache`]
//! issues font and texture handles from memory. [`InputDriver`] scripts
//! cursor and key input against a compositor.

#![no_std]

extern crate alloc;

mod input;
mod renderer;
mod resources;

pub use input::InputDriver;
pub use renderer::{FrameLog, GLYPH_ADVANCE, HeadlessRenderer, LINE_HEIGHT};
pub use resources::MemoryResourceCache;

use alloc::boxed::Box;

use lamina_core::Compositor;

/// Creates a compositor with a [`HeadlessRenderer`] and a
/// [`MemoryResourceCache`] installed, returning it with the renderer's frame
/// log.
#[must_use]
pub fn headless_compositor(width: f64, height: f64) -> (Compositor, FrameLog) {
    let log = FrameLog::default();
    let mut compositor = Compositor::new(width, height);
    let _ = compositor.set_renderer(Box::new(HeadlessRenderer::new(&log)));
    compositor.set_resource_cache(Box::new(MemoryResourceCache::new()));
    (compositor, log)
}
