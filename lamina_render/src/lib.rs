// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw-command lists and resource handles for lamina.
//!
//! Panels do not talk to a GPU. During a draw they append primitives to a
//! [`CommandList`]: a flat vertex buffer plus a sequence of [`Command`]
//! records, each naming a vertex range, a clip rect, a texture, and a
//! [`DrawType`]. An external renderer consumes the finished list once per
//! frame.
//!
//! Text is the one primitive the command list cannot build on its own.
//! [`CommandList::add_font`] reserves vertices and asks a [`TextRenderer`]
//! to fill them, so glyph layout stays with whoever owns the font atlas.
//!
//! Textures and fonts are referred to by small integer handles
//! ([`TextureHandle`], [`FontHandle`]) where `-1` means invalid. The
//! [`ResourceCache`] trait hands them out.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod color;
pub mod command;
pub mod resource;

pub use color::Color;
pub use command::{Command, CommandList, DrawType, TextRenderer, Vertex};
pub use resource::{FontHandle, FontMetrics, RenderError, ResourceCache, TextureHandle, TextureInfo};
