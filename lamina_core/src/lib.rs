// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode GUI compositor: panel tree, input routing, and frame cycle.
//!
//! `lamina_core` owns a tree of *panels* (rectangular scene nodes with a
//! transform, flags, and optional behaviour) rooted at a [`Compositor`]. It
//! is `no_std` compatible (with `alloc`) and stores panels in a
//! struct-of-arrays arena addressed by generational [`PanelId`] handles, so
//! a destroyed panel can never be reached through an old handle.
//!
//! # Architecture
//!
//! ```text
//!   platform input ──► Compositor::cursor_* / key_event
//!                          │ hit test (z-order, front to back)
//!                          ▼
//!                      dispatch_recursive  (root ─► … ─► target)
//!                          │ Layout first, then Widget
//!                          ▼
//!                      panel state changes (marks dirty channels)
//!
//!   Compositor::tick ──► Widget::update ──► transforms + layouts ──► Listener
//!   Compositor::draw ──► render_children (back to front) ──► CommandList ──► Renderer
//! ```
//!
//! **[`panel`]**: the arena ([`PanelStore`](panel::PanelStore)), topology,
//! per-panel properties, z-order, and transform evaluation.
//!
//! **[`dirty`]**: dirty-tracking channels via `understory_dirty`.
//! Transform changes propagate to descendants; layout and topology changes
//! are local.
//!
//! **[`compositor`]**: the root of the tree. Owns focus, hot, capture, and
//! drop-target state; turns raw cursor and key input into events; drives
//! update and draw once per frame.
//!
//! **[`event`]**: event kinds, [`EventArgs`](event::EventArgs), and the
//! [`EventFilter`](event::EventFilter) and [`Listener`](event::Listener)
//! hooks.
//!
//! **[`widget`]**: the [`Widget`](widget::Widget) trait through which
//! concrete controls override update, render, and event handling.
//!
//! **[`layout`]**: the [`Layout`](layout::Layout) hook and the stock
//! horizontal and vertical [`BoxLayout`](layout::BoxLayout).
//!
//! **[`renderer`]**: the [`Renderer`](renderer::Renderer) contract that a
//! graphics backend implements.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) and event types for
//! dispatch and frame instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod compositor;
pub mod dirty;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod panel;
pub mod renderer;
pub mod trace;
pub mod transform;
pub mod widget;

pub use compositor::{Compositor, CompositorConfig, TreeError};
pub use event::{CursorButton, EventArgs, EventKind, Modifiers};
pub use panel::{PanelFlags, PanelId};
pub use widget::{Delegate, Widget};

pub use lamina_render as render;
