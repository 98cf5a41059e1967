// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command list: a per-frame vertex buffer and the draw calls over it.

use alloc::vec::Vec;

use bytemuck::{Pod, Zeroable};
use kurbo::{Point, Rect, Vec2};

use crate::color::Color;
use crate::resource::{FontHandle, FontMetrics, TextureHandle};

/// A single vertex as uploaded to the GPU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Position in compositor space (origin top-left, +y down).
    pub position: [f32; 2],
    /// Straight-alpha RGBA color.
    pub color: [u8; 4],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Creates a vertex from a compositor-space point.
    #[must_use]
    pub fn new(position: Point, color: Color, uv: [f32; 2]) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "vertex positions are uploaded as f32"
        )]
        let position = [position.x as f32, position.y as f32];
        Self {
            position,
            color: color.to_array(),
            uv,
        }
    }
}

/// How a renderer should interpret a command's vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawType {
    /// Solid or textured triangles.
    #[default]
    Generic,
    /// Glyph quads sampled from a font atlas.
    Font,
}

/// One draw call over a contiguous range of the vertex buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Command {
    /// Index of the first vertex.
    pub vertex_offset: usize,
    /// Number of vertices (a multiple of 3).
    pub vertex_count: usize,
    /// Scissor rectangle in compositor space, if clipping is active.
    pub clip_rect: Option<Rect>,
    /// Texture to sample; [`TextureHandle::INVALID`] for solid fills.
    pub texture: TextureHandle,
    /// Vertex interpretation.
    pub draw_type: DrawType,
}

/// Text measurement and glyph generation, implemented by renderers.
///
/// [`CommandList::add_font`] uses this to size and fill the vertex range for
/// a run of text.
pub trait TextRenderer {
    /// Returns the bounds of `text` drawn with `font`, relative to the pen
    /// origin.
    fn font_measure_string(&self, font: FontHandle, text: &str) -> Rect;

    /// Returns the vertical metrics of `font`.
    fn font_metrics(&self, font: FontHandle) -> FontMetrics;

    /// Returns how many vertices [`font_draw`](Self::font_draw) will write
    /// for `text`.
    fn font_count_vertices(&self, font: FontHandle, text: &str) -> usize;

    /// Writes glyph triangles for `text` laid out inside `bounds` into
    /// `vertices` and returns how many were written.
    fn font_draw(
        &mut self,
        font: FontHandle,
        text: &str,
        bounds: Rect,
        color: Color,
        vertices: &mut [Vertex],
    ) -> usize;
}

/// UV coordinates for the six vertices of a quad, in emission order
/// `p0, p1, p2, p2, p3, p0`, for corners bottom-left, bottom-right,
/// top-right, top-left. `v` grows downwards.
const QUAD_UVS: [[f32; 2]; 6] = [
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [1.0, 0.0],
    [0.0, 0.0],
    [0.0, 1.0],
];

/// Draw commands and their shared vertex buffer for one frame.
///
/// The list is reset at the start of every draw; nothing survives across
/// frames.
#[derive(Clone, Debug, Default)]
pub struct CommandList {
    commands: Vec<Command>,
    vertices: Vec<Vertex>,
    clip_stack: Vec<Rect>,
}

impl CommandList {
    /// Creates an empty command list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty command list with room for `vertices` vertices.
    #[must_use]
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            commands: Vec::new(),
            vertices: Vec::with_capacity(vertices),
            clip_stack: Vec::new(),
        }
    }

    /// Clears all commands, vertices, and clip state, keeping allocations.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.vertices.clear();
        self.clip_stack.clear();
    }

    /// Returns the recorded draw calls in submission order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Returns the shared vertex buffer.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the vertices belonging to `command`.
    #[must_use]
    pub fn command_vertices(&self, command: &Command) -> &[Vertex] {
        &self.vertices[command.vertex_offset..command.vertex_offset + command.vertex_count]
    }

    // -- Clipping --

    /// Returns the active clip rect, if any.
    #[must_use]
    pub fn clip_rect(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Pushes a clip rect, intersected with the one currently active.
    ///
    /// Commands added afterwards carry the result until the matching
    /// [`pop_clip_rect`](Self::pop_clip_rect).
    pub fn push_clip_rect(&mut self, rect: Rect) {
        let rect = match self.clip_rect() {
            Some(current) => current.intersect(rect),
            None => rect,
        };
        self.clip_stack.push(rect);
    }

    /// Pops the most recently pushed clip rect.
    pub fn pop_clip_rect(&mut self) {
        if self.clip_stack.pop().is_none() {
            log::debug!("pop_clip_rect called with an empty clip stack");
        }
    }

    // -- Primitives --

    /// Starts a new draw call using `texture` and `draw_type`.
    pub fn add_drawcall(&mut self, texture: TextureHandle, draw_type: DrawType) {
        self.commands.push(Command {
            vertex_offset: self.vertices.len(),
            vertex_count: 0,
            clip_rect: self.clip_rect(),
            texture,
            draw_type,
        });
    }

    /// Grows the vertex buffer by `count` vertices, attributes them to the
    /// current draw call, and returns them for writing.
    ///
    /// Starts a solid draw call first if none exists.
    pub fn primitive_reserve(&mut self, count: usize) -> &mut [Vertex] {
        if self.commands.is_empty() {
            self.add_drawcall(TextureHandle::INVALID, DrawType::Generic);
        }
        let start = self.vertices.len();
        self.vertices.resize(start + count, Vertex::default());
        if let Some(command) = self.commands.last_mut() {
            command.vertex_count += count;
        }
        &mut self.vertices[start..]
    }

    /// Emits two triangles covering the quadrilateral `quad` in the current
    /// draw call.
    ///
    /// Corners are expected in winding order; vertices are written as
    /// `p0, p1, p2, p2, p3, p0`.
    pub fn primitive_quad(&mut self, quad: &[Point; 4], color: Color) {
        let order = [0, 1, 2, 2, 3, 0];
        let out = self.primitive_reserve(6);
        for ((vertex, &corner), uv) in out.iter_mut().zip(order.iter()).zip(QUAD_UVS) {
            *vertex = Vertex::new(quad[corner], color, uv);
        }
    }

    /// Adds a draw call containing a single quad.
    pub fn add_rectangle(&mut self, quad: &[Point; 4], texture: TextureHandle, color: Color) {
        self.add_drawcall(texture, DrawType::Generic);
        self.primitive_quad(quad, color);
    }

    /// Adds a line from `start` to `end` as a quad `thickness` wide.
    ///
    /// Zero-length lines produce nothing.
    pub fn add_line(&mut self, start: Point, end: Point, color: Color, thickness: f64) {
        let Some(quad) = line_quad(start, end, thickness) else {
            return;
        };
        self.add_drawcall(TextureHandle::INVALID, DrawType::Generic);
        self.primitive_quad(&quad, color);
    }

    /// Adds a polyline through `points` as one draw call.
    pub fn add_lines(&mut self, points: &[Point], color: Color, thickness: f64) {
        if points.len() < 2 {
            return;
        }
        self.add_drawcall(TextureHandle::INVALID, DrawType::Generic);
        for pair in points.windows(2) {
            if let Some(quad) = line_quad(pair[0], pair[1], thickness) {
                self.primitive_quad(&quad, color);
            }
        }
    }

    /// Adds a run of text.
    ///
    /// The vertex count and glyph geometry come from `text_renderer`; the
    /// command samples `texture`, the glyph atlas of `font`.
    pub fn add_font(
        &mut self,
        text_renderer: &mut dyn TextRenderer,
        font: FontHandle,
        text: &str,
        bounds: Rect,
        texture: TextureHandle,
        color: Color,
    ) {
        if !font.is_valid() {
            log::debug!("add_font skipped: invalid font handle");
            return;
        }
        let count = text_renderer.font_count_vertices(font, text);
        if count == 0 {
            return;
        }
        self.add_drawcall(texture, DrawType::Font);
        let start = self.vertices.len();
        let written = {
            let out = self.primitive_reserve(count);
            text_renderer.font_draw(font, text, bounds, color, out)
        };
        if written < count {
            self.vertices.truncate(start + written);
            if let Some(command) = self.commands.last_mut() {
                command.vertex_count = written;
            }
        }
    }
}

/// Builds the quad for a thick line, or `None` for a degenerate line.
///
/// The offset is the z-axis cross product with the line direction, i.e. the
/// direction rotated a quarter turn, scaled to half the thickness.
fn line_quad(start: Point, end: Point, thickness: f64) -> Option<[Point; 4]> {
    let direction = end - start;
    if direction.hypot2() == 0.0 {
        return None;
    }
    let normal = Vec2::new(-direction.y, direction.x).normalize() * (thickness * 0.5);
    Some([start + normal, start - normal, end - normal, end + normal])
}
