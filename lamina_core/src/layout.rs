// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child layout strategies.
//!
//! A panel may own one [`Layout`]. During a tick the layout runs whenever
//! the panel was marked for layout (resized, children added or removed,
//! a child shown or hidden) or its transform changed. During dispatch the
//! layout sees each event before the panel's widget does.

use alloc::vec::Vec;
use core::any::Any;

use kurbo::{Point, Rect, Size};

use crate::compositor::Compositor;
use crate::event::EventArgs;
use crate::panel::PanelId;

/// Repositions a panel's children.
pub trait Layout: Any {
    /// Lays out `children` (in insertion order) inside `panel`.
    fn update(&mut self, compositor: &mut Compositor, panel: PanelId, children: &[PanelId]);

    /// Gets first refusal on events travelling through `panel`.
    fn handle_event(&mut self, compositor: &mut Compositor, panel: PanelId, args: &mut EventArgs) {
        _ = (compositor, panel, args);
    }
}

/// Main axis of a [`BoxLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Items are placed left to right.
    Horizontal,
    /// Items are placed top to bottom.
    Vertical,
}

/// One entry of a [`BoxLayout`].
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutItem {
    /// A panel, sized to one share of the free extent.
    Panel(PanelId),
    /// Fixed empty space; only the main-axis component is used.
    Spacer(Size),
    /// A nested box, given one share of the free extent.
    Layout(BoxLayout),
}

/// Splits the panel along one axis into equal shares.
///
/// Spacers take their fixed extent first; every visible panel and nested
/// layout then gets `(total - spacers) / (items - spacers)` along the main
/// axis and the full cross-axis extent. Hidden and destroyed panels take no
/// space.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxLayout {
    direction: Direction,
    items: Vec<LayoutItem>,
}

impl BoxLayout {
    /// Creates an empty layout along `direction`.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            items: Vec::new(),
        }
    }

    /// Creates an empty left-to-right layout.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    /// Creates an empty top-to-bottom layout.
    #[must_use]
    pub fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    /// Returns the main axis.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the items in placement order.
    #[must_use]
    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// Appends a panel.
    pub fn add_panel(&mut self, panel: PanelId) {
        self.items.push(LayoutItem::Panel(panel));
    }

    /// Appends fixed space.
    pub fn add_spacer(&mut self, size: Size) {
        self.items.push(LayoutItem::Spacer(size));
    }

    /// Appends a nested layout.
    pub fn add_layout(&mut self, layout: Self) {
        self.items.push(LayoutItem::Layout(layout));
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Places the items inside `area` (in the owning panel's space).
    pub fn place(&self, compositor: &mut Compositor, area: Rect) {
        let horizontal = self.direction == Direction::Horizontal;
        let main = |s: Size| if horizontal { s.width } else { s.height };
        let total = main(area.size());

        let mut shares = 0_usize;
        let mut fixed = 0.0;
        for item in &self.items {
            match item {
                LayoutItem::Panel(panel) => {
                    if takes_space(compositor, *panel) {
                        shares += 1;
                    }
                }
                LayoutItem::Spacer(size) => fixed += main(*size),
                LayoutItem::Layout(_) => shares += 1,
            }
        }
        let extent = if shares == 0 {
            0.0
        } else {
            #[expect(
                clippy::cast_precision_loss,
                reason = "item counts are far below f64 precision"
            )]
            let shares = shares as f64;
            ((total - fixed) / shares).max(0.0)
        };

        let slot = |cursor: f64, length: f64| {
            if horizontal {
                Rect::from_origin_size(Point::new(cursor, area.y0), Size::new(length, area.height()))
            } else {
                Rect::from_origin_size(Point::new(area.x0, cursor), Size::new(area.width(), length))
            }
        };
        let mut cursor = if horizontal { area.x0 } else { area.y0 };
        for item in &self.items {
            match item {
                LayoutItem::Panel(panel) => {
                    if !takes_space(compositor, *panel) {
                        continue;
                    }
                    compositor.panels_mut().set_bounds(*panel, slot(cursor, extent));
                    cursor += extent;
                }
                LayoutItem::Spacer(size) => cursor += main(*size),
                LayoutItem::Layout(nested) => {
                    nested.place(compositor, slot(cursor, extent));
                    cursor += extent;
                }
            }
        }
    }
}

impl Layout for BoxLayout {
    fn update(&mut self, compositor: &mut Compositor, panel: PanelId, _children: &[PanelId]) {
        let size = compositor.panels().size(panel);
        self.place(compositor, Rect::from_origin_size(Point::ZERO, size));
    }
}

fn takes_space(compositor: &Compositor, panel: PanelId) -> bool {
    let panels = compositor.panels();
    panels.is_alive(panel) && panels.is_visible(panel)
}
