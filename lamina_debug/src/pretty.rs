// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! the compositor's accumulated tick time, printed in milliseconds.

use std::io::Write;

use lamina_core::PanelId;
use lamina_core::trace::{
    CaptureChangedEvent, DispatchEvent, DropTargetChangedEvent, FocusChangedEvent, FrameSummary,
    HotChangedEvent, PhaseBeginEvent, PhaseEndEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Formats an optional panel as `3@0`, or `-`.
struct Panel(Option<PanelId>);

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{}@{}", id.index(), id.generation()),
            None => f.write_str("-"),
        }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_dispatch(&mut self, e: &DispatchEvent) {
        let _ = writeln!(
            self.writer,
            "[dispatch] frame={} {} target={} consumer={}",
            e.frame_index,
            e.kind.name(),
            Panel(e.target),
            Panel(e.consumer),
        );
    }

    fn on_hot_changed(&mut self, e: &HotChangedEvent) {
        let _ = writeln!(
            self.writer,
            "[hot] frame={} {} -> {}",
            e.frame_index,
            Panel(e.old),
            Panel(e.new),
        );
    }

    fn on_focus_changed(&mut self, e: &FocusChangedEvent) {
        let _ = writeln!(
            self.writer,
            "[focus] frame={} {} -> {}",
            e.frame_index,
            Panel(e.old),
            Panel(e.new),
        );
    }

    fn on_capture_changed(&mut self, e: &CaptureChangedEvent) {
        let _ = writeln!(
            self.writer,
            "[capture] frame={} panel={} button={:?}",
            e.frame_index,
            Panel(e.panel),
            e.button,
        );
    }

    fn on_drop_target_changed(&mut self, e: &DropTargetChangedEvent) {
        let _ = writeln!(
            self.writer,
            "[drop] frame={} {} -> {}",
            e.frame_index,
            Panel(e.old),
            Panel(e.new),
        );
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:begin] frame={} {} at {:.3}ms",
            e.frame_index,
            e.phase.name(),
            e.time * 1e3,
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:end] frame={} {} at {:.3}ms",
            e.frame_index,
            e.phase.name(),
            e.time * 1e3,
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] frame={} transforms={} layouts={} passes={} commands={} vertices={}",
            s.frame_index, s.transforms, s.layouts, s.layout_passes, s.commands, s.vertices,
        );
    }
}
