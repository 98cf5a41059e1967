// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel tree data model.
//!
//! A *panel* is a rectangular node in the compositor tree. Each panel has:
//!
//! - An identity ([`PanelId`]): a generational handle that becomes stale
//!   when the panel is destroyed.
//! - Topology: parent, first-child, and sibling links forming an ordered
//!   tree, plus a per-sibling `z_depth` that defines paint and pick order.
//! - **Local properties** set by callers: origin, size, rotation, scale,
//!   [`PanelFlags`], colors, and an optional background texture.
//! - **Computed properties** produced each tick: `local_transform`,
//!   `world_transform`, and the compositor-space quad (`geometry`).
//! - Optional behaviour: a [`Widget`](crate::Widget) and a
//!   [`Layout`](crate::layout::Layout).
//!
//! # Dirty tracking
//!
//! Mutations mark the corresponding [`dirty`](crate::dirty) channel:
//!
//! - **TRANSFORM** propagates to all descendants, since world transforms are
//!   inherited.
//! - **LAYOUT** is local; resizing a panel or changing its children marks it.
//! - **TOPOLOGY** records structural changes.

mod evaluate;
mod flags;
mod id;
mod store;
mod traverse;

pub use evaluate::FrameChanges;
pub use flags::PanelFlags;
pub use id::{INVALID, PanelId};
pub use store::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, PanelStore};
pub use traverse::{Ancestors, Children};
