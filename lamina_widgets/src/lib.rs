// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stock controls for the lamina compositor.
//!
//! Every control is a [`Widget`](lamina_core::Widget) attached to a panel.
//! Controls that own child panels (a scrollbar's thumb, a slider's handle, a
//! timeline's scrubber) are built with an associated `create` function that
//! creates the panel, its children, and the widget in one step and returns
//! the panel's handle. Reach the widget afterwards with
//! [`Compositor::widget`](lamina_core::Compositor::widget) or
//! [`Compositor::with_widget`](lamina_core::Compositor::with_widget).
//!
//! | control | behaviour |
//! |---|---|
//! | [`Label`] | lines of text over a background |
//! | [`Button`] | a label that queues `Click` when pressed and released |
//! | [`Scrollbar`] | a track with a draggable thumb and a `0..=1` value |
//! | [`ScrollablePanel`] | a label whose text scrolls with a vertical scrollbar |
//! | [`Slider`] | a horizontal value picker |
//! | [`Graph`] | per-channel rolling line plots |
//! | [`Timeline`] | a frame ruler with a scrubber |
//! | [`DockingContainer`] | a drop target that fits dropped panels into regions |
//! | [`MenuBar`] | a strip of buttons that open drop-down [`Menu`]s of [`MenuItem`]s |
//! | [`TabControl`] | a row of tab buttons over pages shown one at a time |

#![no_std]

extern crate alloc;

mod button;
mod docking;
mod graph;
mod label;
mod menu;
mod scrollable;
mod scrollbar;
mod slider;
mod tabcontrol;
mod timeline;

pub use button::Button;
pub use docking::{DockRegion, DockingContainer};
pub use graph::Graph;
pub use label::Label;
pub use menu::{MENU_BAR_HEIGHT, Menu, MenuBar, MenuItem};
pub use scrollable::{SCROLL_BAR_WIDTH, ScrollablePanel};
pub use scrollbar::Scrollbar;
pub use slider::Slider;
pub use tabcontrol::{TAB_SIZE, TabControl};
pub use timeline::{Timeline, TimelineScrubber};

use kurbo::{Affine, Point, Rect};
use lamina_core::geometry::panel_quad;
use lamina_core::{Compositor, PanelId};

/// Maps a rectangle in `id`'s local space to a compositor-space quad, in the
/// same corner order as the panel's own geometry.
pub(crate) fn local_quad(compositor: &Compositor, id: PanelId, rect: Rect) -> [Point; 4] {
    let transform = compositor.panels().world_transform(id);
    panel_quad(transform * Affine::translate(rect.origin().to_vec2()), rect.size())
}

/// Maps a local point of `id` to compositor space.
pub(crate) fn to_compositor(compositor: &Compositor, id: PanelId, local: Point) -> Point {
    compositor.panels().world_transform(id) * local
}
