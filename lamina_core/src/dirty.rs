// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Lamina uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! decide which panels need their transforms or layouts recomputed on the
//! next [`Compositor::tick`](crate::Compositor::tick).
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`TRANSFORM`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) over child→parent
//!   dependency edges. Moving, resizing, rotating, or scaling a panel marks
//!   its whole subtree, because world transforms are inherited.
//!
//! - **Local-only**: [`LAYOUT`] is marked with the default policy on the
//!   panel whose children need repositioning (its size changed, a child was
//!   added, removed, shown, or hidden, or a layout was installed).
//!
//! - **Structural**: [`TOPOLOGY`] is marked on the parent for every
//!   attach and detach, and on creation and destruction. It only feeds
//!   [`FrameChanges::topology_changed`](crate::panel::FrameChanges::topology_changed).

use understory_dirty::Channel;

/// Origin, size, rotation, scale, or ancestry changed. Requires world
/// transform and geometry recomputation for the subtree.
pub const TRANSFORM: Channel = Channel::new(0);

/// The panel's children need to be laid out again.
pub const LAYOUT: Channel = Channel::new(1);

/// Tree topology changed.
pub const TOPOLOGY: Channel = Channel::new(2);
