// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Development diagnostics for lamina.
//!
//! The [`TraceSink`](lamina_core::trace::TraceSink) implementations here
//! observe a running compositor:
//!
//! - [`pretty::PrettyPrintSink`] writes one human-readable line per event.
//! - [`recorder::RecorderSink`] encodes events into a compact binary buffer,
//!   read back with [`recorder::decode`].
//! - [`chrome::export`] turns a recording into Chrome Trace Event Format
//!   JSON.
//!
//! [`tree`] snapshots the panel hierarchy as indented text or JSON.

pub mod chrome;
pub mod pretty;
pub mod recorder;
pub mod tree;
