// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][trace-format] JSON to the given writer.
//!
//! [trace-format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use lamina_core::PanelId;
use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are the compositor's accumulated tick time in microseconds.
/// Phase and summary records carry that time; input records (dispatch, hot,
/// focus, capture, drop target) are stamped with the most recent time seen
/// before them in the recording.
///
/// # Errors
///
/// Returns any error from writing to `writer`.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut now_us = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Dispatch(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": e.kind.name(),
                    "cat": "Dispatch",
                    "ts": now_us,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "target": panel(e.target),
                        "consumer": panel(e.consumer),
                    }
                }));
            }
            RecordedEvent::HotChanged(e) => {
                events.push(transition("HotChanged", now_us, e.frame_index, e.old, e.new));
            }
            RecordedEvent::FocusChanged(e) => {
                events.push(transition("FocusChanged", now_us, e.frame_index, e.old, e.new));
            }
            RecordedEvent::DropTargetChanged(e) => {
                events.push(transition("DropTargetChanged", now_us, e.frame_index, e.old, e.new));
            }
            RecordedEvent::CaptureChanged(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "CaptureChanged",
                    "cat": "Input",
                    "ts": now_us,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "panel": panel(e.panel),
                        "button": format!("{:?}", e.button),
                    }
                }));
            }
            RecordedEvent::PhaseBegin(e) => {
                now_us = seconds_to_us(e.time);
                events.push(json!({
                    "ph": "B",
                    "name": e.phase.name(),
                    "cat": "Frame",
                    "ts": now_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                now_us = seconds_to_us(e.time);
                events.push(json!({
                    "ph": "E",
                    "name": e.phase.name(),
                    "cat": "Frame",
                    "ts": now_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::FrameSummary(s) => {
                now_us = seconds_to_us(s.time);
                events.push(json!({
                    "ph": "i",
                    "name": "FrameSummary",
                    "cat": "Summary",
                    "ts": now_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "transforms": s.transforms,
                        "layouts": s.layouts,
                        "layout_passes": s.layout_passes,
                        "commands": s.commands,
                        "vertices": s.vertices,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn seconds_to_us(seconds: f64) -> f64 {
    seconds * 1e6
}

/// Formats a panel as `"index@generation"`, or JSON null.
fn panel(id: Option<PanelId>) -> Value {
    id.map_or(Value::Null, |id| {
        Value::String(format!("{}@{}", id.index(), id.generation()))
    })
}

fn transition(
    name: &str,
    now_us: f64,
    frame_index: u64,
    old: Option<PanelId>,
    new: Option<PanelId>,
) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": "Input",
        "ts": now_us,
        "pid": 0,
        "tid": 1,
        "s": "t",
        "args": {
            "frame_index": frame_index,
            "old": panel(old),
            "new": panel(new),
        }
    })
}

#[cfg(test)]
mod tests {
    use lamina_core::EventKind;
    use lamina_core::trace::{DispatchEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind, TraceSink};

    use super::*;
    use crate::recorder::RecorderSink;

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_phase_begin(&PhaseBeginEvent {
            frame_index: 3,
            phase: PhaseKind::Update,
            time: 0.5,
        });
        rec.on_phase_end(&PhaseEndEvent {
            frame_index: 3,
            phase: PhaseKind::Update,
            time: 0.5,
        });
        rec.on_dispatch(&DispatchEvent {
            frame_index: 3,
            kind: EventKind::CursorMove,
            target: Some(PanelId::from_raw(2, 0)),
            consumer: None,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["name"], "Update");
        assert_eq!(parsed[0]["ts"], 500_000.0);
        assert_eq!(parsed[1]["ph"], "E");

        // Input records inherit the last phase time.
        assert_eq!(parsed[2]["name"], "CursorMove");
        assert_eq!(parsed[2]["ts"], 500_000.0);
        assert_eq!(parsed[2]["args"]["target"], "2@0");
        assert_eq!(parsed[2]["args"]["consumer"], Value::Null);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
