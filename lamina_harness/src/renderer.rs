// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect};
use lamina_core::Compositor;
use lamina_core::renderer::Renderer;
use lamina_render::{
    Color, CommandList, FontHandle, FontMetrics, RenderError, TextRenderer, TextureHandle,
    TextureInfo, Vertex,
};

/// Horizontal advance of every glyph, in pixels.
pub const GLYPH_ADVANCE: f64 = 8.0;

/// Distance between baselines, in pixels.
pub const LINE_HEIGHT: f64 = 16.0;

/// Size reported for every texture the renderer creates.
const TEXTURE_SIZE: u32 = 64;

#[derive(Debug, Default)]
struct FrameLogInner {
    frames: Vec<CommandList>,
    startups: u32,
    shutdowns: u32,
}

/// Shared record of what a [`HeadlessRenderer`] was asked to do.
///
/// Clones share the same record, so a test keeps one handle while the
/// compositor owns the renderer.
#[derive(Clone, Debug, Default)]
pub struct FrameLog(Rc<RefCell<FrameLogInner>>);

impl FrameLog {
    /// Returns the number of frames submitted so far.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.0.borrow().frames.len()
    }

    /// Returns a copy of the most recently submitted command list.
    #[must_use]
    pub fn last_frame(&self) -> Option<CommandList> {
        self.0.borrow().frames.last().cloned()
    }

    /// Returns how often the renderer was started and shut down.
    #[must_use]
    pub fn lifecycle(&self) -> (u32, u32) {
        let inner = self.0.borrow();
        (inner.startups, inner.shutdowns)
    }

    /// Forgets every recorded frame.
    pub fn clear(&self) {
        self.0.borrow_mut().frames.clear();
    }
}

/// A [`Renderer`] that rasterizes nothing.
///
/// Text is laid out on a fixed grid: each character advances
/// [`GLYPH_ADVANCE`], each `'\n'` starts a new line [`LINE_HEIGHT`] lower,
/// and every non-whitespace character becomes one glyph quad (6 vertices).
#[derive(Debug)]
pub struct HeadlessRenderer {
    log: FrameLog,
    textures: BTreeMap<i32, String>,
    next_texture: i32,
    in_frame: bool,
}

impl HeadlessRenderer {
    /// Creates a renderer that records into `log`.
    #[must_use]
    pub fn new(log: &FrameLog) -> Self {
        Self {
            log: log.clone(),
            textures: BTreeMap::new(),
            next_texture: 0,
            in_frame: false,
        }
    }

    /// Returns whether a frame is open.
    #[must_use]
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }
}

fn glyphs(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    text.split('\n').enumerate().flat_map(|(row, line)| {
        line.chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(move |(col, _)| (row, col))
    })
}

#[expect(
    clippy::cast_precision_loss,
    reason = "glyph grid coordinates are small"
)]
fn grid(n: usize) -> f64 {
    n as f64
}

impl TextRenderer for HeadlessRenderer {
    fn font_measure_string(&self, font: FontHandle, text: &str) -> Rect {
        if !font.is_valid() {
            return Rect::ZERO;
        }
        let lines = text.split('\n');
        let (rows, cols) = lines.fold((0, 0), |(rows, cols), line| {
            (rows + 1, cols.max(line.chars().count()))
        });
        Rect::new(0.0, 0.0, grid(cols) * GLYPH_ADVANCE, grid(rows) * LINE_HEIGHT)
    }

    fn font_metrics(&self, font: FontHandle) -> FontMetrics {
        if !font.is_valid() {
            return FontMetrics::default();
        }
        FontMetrics {
            line_height: LINE_HEIGHT,
            ascender: 12.0,
            descender: -4.0,
        }
    }

    fn font_count_vertices(&self, font: FontHandle, text: &str) -> usize {
        if !font.is_valid() {
            return 0;
        }
        6 * glyphs(text).count()
    }

    fn font_draw(
        &mut self,
        font: FontHandle,
        text: &str,
        bounds: Rect,
        color: Color,
        vertices: &mut [Vertex],
    ) -> usize {
        if !font.is_valid() {
            return 0;
        }
        let order = [0, 1, 2, 2, 3, 0];
        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let mut written = 0;
        for (row, col) in glyphs(text) {
            let Some(out) = vertices.get_mut(written..written + 6) else {
                break;
            };
            let x = bounds.x0 + grid(col) * GLYPH_ADVANCE;
            let y = bounds.y0 + grid(row) * LINE_HEIGHT;
            let corners = [
                Point::new(x, y),
                Point::new(x + GLYPH_ADVANCE, y),
                Point::new(x + GLYPH_ADVANCE, y + LINE_HEIGHT),
                Point::new(x, y + LINE_HEIGHT),
            ];
            for (vertex, &corner) in out.iter_mut().zip(order.iter()) {
                *vertex = Vertex::new(corners[corner], color, uvs[corner]);
            }
            written += 6;
        }
        written
    }
}

impl Renderer for HeadlessRenderer {
    fn startup(&mut self, _: &Compositor) {
        self.log.0.borrow_mut().startups += 1;
    }

    fn shutdown(&mut self, _: &Compositor) {
        self.log.0.borrow_mut().shutdowns += 1;
    }

    fn begin_frame(&mut self, _: &Compositor) {
        self.in_frame = true;
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
    }

    fn texture_create(&mut self, path: &str) -> Result<TextureHandle, RenderError> {
        if path.is_empty() {
            return Err(RenderError::TextureFailed(String::new()));
        }
        let handle = self.next_texture;
        self.next_texture += 1;
        self.textures.insert(handle, path.into());
        Ok(TextureHandle(handle))
    }

    fn texture_destroy(&mut self, texture: TextureHandle) {
        self.textures.remove(&texture.0);
    }

    fn texture_info(&self, texture: TextureHandle) -> Result<TextureInfo, RenderError> {
        if !self.textures.contains_key(&texture.0) {
            return Err(RenderError::InvalidHandle(texture.0));
        }
        Ok(TextureInfo {
            width: TEXTURE_SIZE,
            height: TEXTURE_SIZE,
            channels: 4,
        })
    }

    fn draw_commands(&mut self, commands: &CommandList) {
        self.log.0.borrow_mut().frames.push(commands.clone());
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use kurbo::Size;
    use lamina_render::DrawType;

    use super::*;

    #[test]
    fn measures_on_a_monospace_grid() {
        let renderer = HeadlessRenderer::new(&FrameLog::default());
        let font = FontHandle(0);
        assert_eq!(renderer.font_measure_string(font, "abcd"), Rect::new(0.0, 0.0, 32.0, 16.0));
        assert_eq!(
            renderer.font_measure_string(font, "ab\nabc"),
            Rect::new(0.0, 0.0, 24.0, 32.0)
        );
        assert_eq!(renderer.font_count_vertices(font, "a b\nc"), 18);
        assert_eq!(renderer.font_count_vertices(FontHandle::INVALID, "abc"), 0);
    }

    #[test]
    fn glyphs_land_on_their_cells() {
        let mut renderer = HeadlessRenderer::new(&FrameLog::default());
        let mut list = CommandList::new();
        list.add_font(
            &mut renderer,
            FontHandle(0),
            "a\n b",
            Rect::new(10.0, 20.0, 100.0, 100.0),
            TextureHandle(3),
            Color::WHITE,
        );
        let command = list.commands()[0];
        assert_eq!(command.draw_type, DrawType::Font);
        assert_eq!(command.vertex_count, 12);
        // Second glyph: row 1, column 1.
        assert_eq!(list.vertices()[6].position, [18.0, 36.0]);
    }

    #[test]
    fn textures_need_a_path() {
        let mut renderer = HeadlessRenderer::new(&FrameLog::default());
        assert!(matches!(
            renderer.texture_create(""),
            Err(RenderError::TextureFailed(_))
        ));
        let texture = renderer
            .texture_create("atlas.png")
            .expect("non-empty path creates a texture");
        let info = renderer.texture_info(texture);
        assert_eq!(info.map(|i| i.size()), Ok(Size::new(64.0, 64.0)));
        renderer.texture_destroy(texture);
        assert_eq!(
            renderer.texture_info(texture),
            Err(RenderError::InvalidHandle(texture.0))
        );
    }

    #[test]
    fn records_frames_and_lifecycle() {
        let log = FrameLog::default();
        {
            let mut compositor = Compositor::new(50.0, 50.0);
            let _ = compositor.set_renderer(Box::new(HeadlessRenderer::new(&log)));
            let root = compositor.root();
            let panel = compositor.create_panel(root);
            compositor.panels_mut().set_size(panel, Size::new(10.0, 10.0));
            let _ = compositor.tick(0.0);
            compositor.draw();
            compositor.draw();
            assert_eq!(log.lifecycle(), (1, 0));
        }
        assert_eq!(log.lifecycle(), (1, 1));
        assert_eq!(log.frame_count(), 2);
        assert_eq!(log.last_frame().map(|f| f.commands().len()), Some(1));
    }
}
