// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop container that docks dragged panels into edge or centre regions.

use kurbo::{Point, Rect, Size};
use lamina_core::renderer::Renderer;
use lamina_core::widget::{handle_panel_event, render_children, render_panel};
use lamina_core::{Compositor, EventArgs, EventKind, PanelFlags, PanelId, Widget};
use lamina_render::{Color, CommandList, TextureHandle};

use crate::local_quad;

/// Fraction of the width (or height) taken by each side region.
const SIDE_FRACTION: f64 = 0.15;
const HIGHLIGHT: Color = Color::rgba(0, 64, 128, 128);

/// One of the five drop regions of a [`DockingContainer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DockRegion {
    /// The full-height strip along the left edge.
    Left,
    /// The strip along the top edge, between the side strips.
    Top,
    /// The full-height strip along the right edge.
    Right,
    /// The strip along the bottom edge, between the side strips.
    Bottom,
    /// Everything inside the four strips.
    Center,
}

impl DockRegion {
    /// Every region, in hit-test order.
    pub const ALL: [Self; 5] = [Self::Left, Self::Top, Self::Right, Self::Bottom, Self::Center];

    /// Returns the region's rectangle inside a container of `size`.
    #[must_use]
    pub fn rect(self, size: Size) -> Rect {
        let side = size.width * SIDE_FRACTION;
        let band = size.height * SIDE_FRACTION;
        let (w, h) = (size.width, size.height);
        match self {
            Self::Left => Rect::new(0.0, 0.0, side, h),
            Self::Top => Rect::new(side, 0.0, w - side, band),
            Self::Right => Rect::new(w - side, 0.0, w, h),
            Self::Bottom => Rect::new(side, h - band, w - side, h),
            Self::Center => Rect::new(side, band, w - side, h - band),
        }
    }

    /// Returns the first region containing `local`, edges included.
    #[must_use]
    pub fn at(size: Size, local: Point) -> Option<Self> {
        Self::ALL.into_iter().find(|region| {
            let r = region.rect(size);
            (r.x0..=r.x1).contains(&local.x) && (r.y0..=r.y1).contains(&local.y)
        })
    }
}

/// A drop target that adopts dropped panels and fits them into a region.
///
/// While a captured panel is dragged over the container, the region under
/// the cursor is highlighted. Dropping reparents the captured panel into
/// the container and sets its bounds to the region's rectangle.
#[derive(Debug, Default)]
pub struct DockingContainer {
    highlighted: Option<DockRegion>,
}

impl DockingContainer {
    /// Creates a docking container panel under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId) -> PanelId {
        let id = compositor.create_widget_panel(parent, Self::default());
        compositor.panels_mut().add_flags(id, PanelFlags::CAN_DROP);
        id
    }

    /// Returns the region currently highlighted by a drag.
    #[must_use]
    pub fn highlighted(&self) -> Option<DockRegion> {
        self.highlighted
    }

    fn dock(&self, compositor: &mut Compositor, id: PanelId, item: PanelId, region: DockRegion) {
        if let Err(err) = compositor.add_child(id, item) {
            log::warn!("cannot dock {item:?} into {id:?}: {err}");
            return;
        }
        let size = compositor.panels().size(id);
        compositor.panels_mut().set_bounds(item, region.rect(size));
    }
}

impl Widget for DockingContainer {
    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        render_panel(compositor, id, list);
        if let Some(region) = self.highlighted {
            let rect = region.rect(compositor.panels().size(id));
            let quad = local_quad(compositor, id, rect);
            list.add_rectangle(&quad, TextureHandle::INVALID, HIGHLIGHT);
        }
        render_children(compositor, id, renderer, list);
    }

    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        if args.sender == Some(id) {
            let size = compositor.panels().size(id);
            match args.kind {
                EventKind::CursorDropEnter | EventKind::CursorDropMove => {
                    self.highlighted = DockRegion::at(size, args.local);
                    args.handled = true;
                }
                EventKind::CursorDropExit => self.highlighted = None,
                EventKind::CursorDrop => {
                    self.highlighted = None;
                    if let (Some(item), Some(region)) = (args.capture, DockRegion::at(size, args.local)) {
                        self.dock(compositor, id, item, region);
                        args.handled = true;
                    }
                }
                _ => {}
            }
        }
        if !args.handled {
            handle_panel_event(compositor, id, args);
        }
    }
}
