// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as tagged little-endian records. [`decode`] reads them back as
//! an iterator of [`RecordedEvent`].
//!
//! Panels are stored as a presence byte followed by the slot index and
//! generation, so a decoded [`PanelId`] compares equal to the recorded one.

use lamina_core::trace::{
    CaptureChangedEvent, DispatchEvent, DropTargetChangedEvent, FocusChangedEvent, FrameSummary,
    HotChangedEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind, TraceSink,
};
use lamina_core::{CursorButton, EventKind, PanelId};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_DISPATCH: u8 = 1;
const TAG_HOT_CHANGED: u8 = 2;
const TAG_FOCUS_CHANGED: u8 = 3;
const TAG_CAPTURE_CHANGED: u8 = 4;
const TAG_DROP_TARGET_CHANGED: u8 = 5;
const TAG_PHASE_BEGIN: u8 = 6;
const TAG_PHASE_END: u8 = 7;
const TAG_FRAME_SUMMARY: u8 = 8;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_panel(&mut self, panel: Option<PanelId>) {
        match panel {
            Some(id) => {
                self.write_u8(1);
                self.write_u32(id.index());
                self.write_u32(id.generation());
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
                self.write_u32(0);
            }
        }
    }

    fn write_transition(
        &mut self,
        tag: u8,
        frame_index: u64,
        old: Option<PanelId>,
        new: Option<PanelId>,
    ) {
        self.write_u8(tag);
        self.write_u64(frame_index);
        self.write_panel(old);
        self.write_panel(new);
    }
}

impl TraceSink for RecorderSink {
    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.write_u8(TAG_DISPATCH);
        self.write_u64(e.frame_index);
        self.write_u8(e.kind.tag());
        self.write_panel(e.target);
        self.write_panel(e.consumer);
    }

    fn on_hot_changed(&mut self, e: &HotChangedEvent) {
        self.write_transition(TAG_HOT_CHANGED, e.frame_index, e.old, e.new);
    }

    fn on_focus_changed(&mut self, e: &FocusChangedEvent) {
        self.write_transition(TAG_FOCUS_CHANGED, e.frame_index, e.old, e.new);
    }

    fn on_capture_changed(&mut self, e: &CaptureChangedEvent) {
        self.write_u8(TAG_CAPTURE_CHANGED);
        self.write_u64(e.frame_index);
        self.write_panel(e.panel);
        self.write_u8(e.button.tag());
    }

    fn on_drop_target_changed(&mut self, e: &DropTargetChangedEvent) {
        self.write_transition(TAG_DROP_TARGET_CHANGED, e.frame_index, e.old, e.new);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.write_u8(TAG_PHASE_BEGIN);
        self.write_u64(e.frame_index);
        self.write_u8(e.phase.tag());
        self.write_f64(e.time);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.write_u8(TAG_PHASE_END);
        self.write_u64(e.frame_index);
        self.write_u8(e.phase.tag());
        self.write_f64(e.time);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.write_u8(TAG_FRAME_SUMMARY);
        self.write_u64(s.frame_index);
        self.write_f64(s.time);
        self.write_u32(s.transforms);
        self.write_u32(s.layouts);
        self.write_u32(s.layout_passes);
        self.write_u32(s.commands);
        self.write_u32(s.vertices);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`DispatchEvent`].
    Dispatch(DispatchEvent),
    /// A [`HotChangedEvent`].
    HotChanged(HotChangedEvent),
    /// A [`FocusChangedEvent`].
    FocusChanged(FocusChangedEvent),
    /// A [`CaptureChangedEvent`].
    CaptureChanged(CaptureChangedEvent),
    /// A [`DropTargetChangedEvent`].
    DropTargetChanged(DropTargetChangedEvent),
    /// A [`PhaseBeginEvent`].
    PhaseBegin(PhaseBeginEvent),
    /// A [`PhaseEndEvent`].
    PhaseEnd(PhaseEndEvent),
    /// A [`FrameSummary`].
    FrameSummary(FrameSummary),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.take().map(f64::from_le_bytes)
    }

    fn read_panel(&mut self) -> Option<Option<PanelId>> {
        let present = self.read_u8()?;
        let idx = self.read_u32()?;
        let generation = self.read_u32()?;
        Some((present != 0).then(|| PanelId::from_raw(idx, generation)))
    }

    fn read_kind(&mut self) -> Option<EventKind> {
        EventKind::from_tag(self.read_u8()?)
    }

    fn read_button(&mut self) -> Option<CursorButton> {
        CursorButton::from_tag(self.read_u8()?)
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        PhaseKind::from_tag(self.read_u8()?)
    }

    fn decode_dispatch(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Dispatch(DispatchEvent {
            frame_index: self.read_u64()?,
            kind: self.read_kind()?,
            target: self.read_panel()?,
            consumer: self.read_panel()?,
        }))
    }

    /// Reads the frame index and old/new panels shared by the transition
    /// records.
    fn read_transition(&mut self) -> Option<(u64, Option<PanelId>, Option<PanelId>)> {
        Some((self.read_u64()?, self.read_panel()?, self.read_panel()?))
    }

    fn decode_capture_changed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::CaptureChanged(CaptureChangedEvent {
            frame_index: self.read_u64()?,
            panel: self.read_panel()?,
            button: self.read_button()?,
        }))
    }

    fn decode_phase_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseBegin(PhaseBeginEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
            time: self.read_f64()?,
        }))
    }

    fn decode_phase_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseEnd(PhaseEndEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
            time: self.read_f64()?,
        }))
    }

    fn decode_frame_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameSummary(FrameSummary {
            frame_index: self.read_u64()?,
            time: self.read_f64()?,
            transforms: self.read_u32()?,
            layouts: self.read_u32()?,
            layout_passes: self.read_u32()?,
            commands: self.read_u32()?,
            vertices: self.read_u32()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_DISPATCH => self.decode_dispatch(),
            TAG_HOT_CHANGED => {
                let (frame_index, old, new) = self.read_transition()?;
                Some(RecordedEvent::HotChanged(HotChangedEvent { frame_index, old, new }))
            }
            TAG_FOCUS_CHANGED => {
                let (frame_index, old, new) = self.read_transition()?;
                Some(RecordedEvent::FocusChanged(FocusChangedEvent { frame_index, old, new }))
            }
            TAG_CAPTURE_CHANGED => self.decode_capture_changed(),
            TAG_DROP_TARGET_CHANGED => {
                let (frame_index, old, new) = self.read_transition()?;
                Some(RecordedEvent::DropTargetChanged(DropTargetChangedEvent {
                    frame_index,
                    old,
                    new,
                }))
            }
            TAG_PHASE_BEGIN => self.decode_phase_begin(),
            TAG_PHASE_END => self.decode_phase_end(),
            TAG_FRAME_SUMMARY => self.decode_frame_summary(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
