// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by the compositor tests.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect};
use lamina_render::{
    Color, CommandList, FontHandle, FontMetrics, RenderError, TextRenderer, TextureHandle,
    TextureInfo, Vertex,
};

use super::Compositor;
use crate::event::{EventArgs, EventKind};
use crate::panel::PanelId;
use crate::renderer::Renderer;
use crate::widget::{Widget, handle_panel_event};

/// One handler invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Entry {
    pub name: &'static str,
    pub kind: EventKind,
    pub local: Point,
}

/// Shared, clonable log of handler invocations.
#[derive(Clone, Debug, Default)]
pub(crate) struct Log(Rc<RefCell<Vec<Entry>>>);

impl Log {
    pub(crate) fn push(&self, name: &'static str, args: &EventArgs) {
        self.0.borrow_mut().push(Entry {
            name,
            kind: args.kind,
            local: args.local,
        });
    }

    pub(crate) fn entries(&self) -> Vec<Entry> {
        self.0.borrow().clone()
    }

    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.0.borrow().iter().map(|e| e.name).collect()
    }

    pub(crate) fn locals(&self) -> Vec<Point> {
        self.0.borrow().iter().map(|e| e.local).collect()
    }

    /// Kinds seen by `name`, in order.
    pub(crate) fn kinds(&self, name: &str) -> Vec<EventKind> {
        self.0
            .borrow()
            .iter()
            .filter(|e| e.name == name)
            .map(|e| e.kind)
            .collect()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Logs every event and otherwise behaves as a plain panel.
#[derive(Debug)]
pub(crate) struct Recorder {
    pub name: &'static str,
    pub log: Log,
    /// Mark every event handled.
    pub consume: bool,
}

impl Recorder {
    pub(crate) fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            consume: false,
        }
    }
}

impl Widget for Recorder {
    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        self.log.push(self.name, args);
        if self.consume {
            args.handled = true;
        } else {
            handle_panel_event(compositor, id, args);
        }
    }
}

/// Counts updates.
#[derive(Debug, Default)]
pub(crate) struct Counter {
    pub count: u32,
}

impl Widget for Counter {
    fn update(&mut self, _: &mut Compositor, _: PanelId, _: f64) {
        self.count += 1;
    }
}

/// Renderer that records frame brackets and submitted command counts.
#[derive(Clone, Debug, Default)]
pub(crate) struct CountingRenderer {
    pub frames: Rc<RefCell<Vec<usize>>>,
}

impl TextRenderer for CountingRenderer {
    fn font_measure_string(&self, _: FontHandle, _: &str) -> Rect {
        Rect::ZERO
    }

    fn font_metrics(&self, _: FontHandle) -> FontMetrics {
        FontMetrics::default()
    }

    fn font_count_vertices(&self, _: FontHandle, _: &str) -> usize {
        0
    }

    fn font_draw(&mut self, _: FontHandle, _: &str, _: Rect, _: Color, _: &mut [Vertex]) -> usize {
        0
    }
}

impl Renderer for CountingRenderer {
    fn begin_frame(&mut self, _: &Compositor) {}

    fn end_frame(&mut self) {}

    fn texture_create(&mut self, path: &str) -> Result<TextureHandle, RenderError> {
        Err(RenderError::TextureFailed(path.into()))
    }

    fn texture_destroy(&mut self, _: TextureHandle) {}

    fn texture_info(&self, texture: TextureHandle) -> Result<TextureInfo, RenderError> {
        Err(RenderError::InvalidHandle(texture.0))
    }

    fn draw_commands(&mut self, commands: &CommandList) {
        self.frames.borrow_mut().push(commands.commands().len());
    }
}
