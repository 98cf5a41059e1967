// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for input routing and the frame cycle.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! compositor instrumentation calls at each stage. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing. When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`FrameSummaryBuilder`] collects the per-frame counters from a tick and
//! the following draw and produces a [`FrameSummary`].

use alloc::rc::Rc;
use core::cell::RefCell;

use lamina_render::CommandList;

use crate::event::{CursorButton, EventKind};
use crate::panel::{FrameChanges, PanelId};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which phase of the frame cycle is being measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Widget updates.
    Update,
    /// Transform recomputation and layout passes.
    Layout,
    /// Command list generation and submission.
    Draw,
}

impl PhaseKind {
    /// Returns the stable wire tag of this phase.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Inverse of [`tag`](Self::tag).
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => Self::Update,
            1 => Self::Layout,
            2 => Self::Draw,
            _ => return None,
        })
    }

    /// Returns the phase name, for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Update => "Update",
            Self::Layout => "Layout",
            Self::Draw => "Draw",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after an event finished travelling down the ancestor chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispatchEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// What was dispatched.
    pub kind: EventKind,
    /// The panel the event was dispatched to.
    pub target: Option<PanelId>,
    /// The panel that consumed it, if any.
    pub consumer: Option<PanelId>,
}

/// Emitted when the hot panel changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HotChangedEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Previous hot panel.
    pub old: Option<PanelId>,
    /// New hot panel.
    pub new: Option<PanelId>,
}

/// Emitted when keyboard focus changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusChangedEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Previous focus.
    pub old: Option<PanelId>,
    /// New focus.
    pub new: Option<PanelId>,
}

/// Emitted when capture starts or ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureChangedEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// The captured panel, or `None` when capture was released.
    pub panel: Option<PanelId>,
    /// The button that owns the capture.
    pub button: CursorButton,
}

/// Emitted when the drop target under a drag changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropTargetChangedEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Previous drop target.
    pub old: Option<PanelId>,
    /// New drop target.
    pub new: Option<PanelId>,
}

/// Marks the beginning of a frame-cycle phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseBeginEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is starting.
    pub phase: PhaseKind,
    /// Accumulated tick time in seconds.
    pub time: f64,
}

/// Marks the end of a frame-cycle phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseEndEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is ending.
    pub phase: PhaseKind,
    /// Accumulated tick time in seconds.
    pub time: f64,
}

/// Per-frame counters produced by [`FrameSummaryBuilder`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSummary {
    /// Frame counter.
    pub frame_index: u64,
    /// Accumulated tick time in seconds.
    pub time: f64,
    /// Panels whose world transform was recomputed.
    pub transforms: u32,
    /// Layouts that ran.
    pub layouts: u32,
    /// Transform/layout passes before the tree settled.
    pub layout_passes: u32,
    /// Draw calls recorded.
    pub commands: u32,
    /// Vertices recorded.
    pub vertices: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the compositor.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after every dispatch.
    fn on_dispatch(&mut self, e: &DispatchEvent) {
        _ = e;
    }

    /// Called when the hot panel changes.
    fn on_hot_changed(&mut self, e: &HotChangedEvent) {
        _ = e;
    }

    /// Called when keyboard focus changes.
    fn on_focus_changed(&mut self, e: &FocusChangedEvent) {
        _ = e;
    }

    /// Called when capture starts or ends.
    fn on_capture_changed(&mut self, e: &CaptureChangedEvent) {
        _ = e;
    }

    /// Called when the drop target changes.
    fn on_drop_target_changed(&mut self, e: &DropTargetChangedEvent) {
        _ = e;
    }

    /// Called at the beginning of a frame-cycle phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a frame-cycle phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called with the per-frame summary at the end of a draw.
    fn on_frame_summary(&mut self, s: &FrameSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

impl<S: TraceSink + ?Sized> TraceSink for Rc<RefCell<S>> {
    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.borrow_mut().on_dispatch(e);
    }

    fn on_hot_changed(&mut self, e: &HotChangedEvent) {
        self.borrow_mut().on_hot_changed(e);
    }

    fn on_focus_changed(&mut self, e: &FocusChangedEvent) {
        self.borrow_mut().on_focus_changed(e);
    }

    fn on_capture_changed(&mut self, e: &CaptureChangedEvent) {
        self.borrow_mut().on_capture_changed(e);
    }

    fn on_drop_target_changed(&mut self, e: &DropTargetChangedEvent) {
        self.borrow_mut().on_drop_target_changed(e);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.borrow_mut().on_phase_begin(e);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.borrow_mut().on_phase_end(e);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.borrow_mut().on_frame_summary(s);
    }
}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! tracer_method {
    ($(#[$doc:meta])* $name:ident, $on:ident, $ty:ty) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$ty) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$on(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    tracer_method!(
        /// Emits a [`DispatchEvent`].
        dispatch, on_dispatch, DispatchEvent
    );
    tracer_method!(
        /// Emits a [`HotChangedEvent`].
        hot_changed, on_hot_changed, HotChangedEvent
    );
    tracer_method!(
        /// Emits a [`FocusChangedEvent`].
        focus_changed, on_focus_changed, FocusChangedEvent
    );
    tracer_method!(
        /// Emits a [`CaptureChangedEvent`].
        capture_changed, on_capture_changed, CaptureChangedEvent
    );
    tracer_method!(
        /// Emits a [`DropTargetChangedEvent`].
        drop_target_changed, on_drop_target_changed, DropTargetChangedEvent
    );
    tracer_method!(
        /// Emits a [`PhaseBeginEvent`].
        phase_begin, on_phase_begin, PhaseBeginEvent
    );
    tracer_method!(
        /// Emits a [`PhaseEndEvent`].
        phase_end, on_phase_end, PhaseEndEvent
    );
    tracer_method!(
        /// Emits a [`FrameSummary`].
        frame_summary, on_frame_summary, FrameSummary
    );
}

// ---------------------------------------------------------------------------
// FrameSummaryBuilder
// ---------------------------------------------------------------------------

/// Collects the counters of one tick and the following draw into a
/// [`FrameSummary`].
#[derive(Debug)]
pub struct FrameSummaryBuilder {
    summary: FrameSummary,
}

impl FrameSummaryBuilder {
    /// Starts building a summary for the given frame.
    #[must_use]
    pub fn new(frame_index: u64, time: f64) -> Self {
        Self {
            summary: FrameSummary {
                frame_index,
                time,
                ..FrameSummary::default()
            },
        }
    }

    /// Records what the tick recomputed.
    pub fn record_changes(&mut self, changes: &FrameChanges) {
        self.summary.transforms = saturating_u32(changes.transforms.len());
        self.summary.layouts = saturating_u32(changes.layouts.len());
        self.summary.layout_passes = changes.passes;
    }

    /// Records what the draw produced.
    pub fn record_commands(&mut self, list: &CommandList) {
        self.summary.commands = saturating_u32(list.commands().len());
        self.summary.vertices = saturating_u32(list.vertices().len());
    }

    /// Consumes the builder and produces the final [`FrameSummary`].
    #[must_use]
    pub fn finish(self) -> FrameSummary {
        self.summary
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
