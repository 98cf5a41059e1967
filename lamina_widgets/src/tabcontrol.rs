// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabbed pages selected by a row of buttons.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use lamina_core::{Compositor, Delegate, PanelFlags, PanelId, Widget};
use lamina_render::Color;

use crate::Button;

/// Size of every tab button.
pub const TAB_SIZE: Size = Size::new(40.0, 20.0);

const TAB_FONT: &str = "fonts/debug.ttf";
const TAB_FONT_SIZE: u16 = 16;
const BACKGROUND: Color = Color::rgb(128, 0, 0);
const TAB_HOVER: Color = Color::rgb(0, 255, 255);

#[derive(Clone, Copy, Debug)]
struct Tab {
    button: PanelId,
    page: Option<PanelId>,
}

/// A row of tab buttons over a page area showing one page at a time.
///
/// Each tab pairs a [`Button`] with an optional page panel, which is
/// reparented into the control and sized to fill the area below the
/// buttons. Clicking a tab's button shows its page and hides the previous
/// one. The control can be dragged like a window.
#[derive(Debug, Default)]
pub struct TabControl {
    tabs: Vec<Tab>,
    active: Option<usize>,
    /// Fired with the new tab index when the active tab changes.
    pub on_tab_changed: Delegate<usize>,
}

impl TabControl {
    /// Creates an empty tab control under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId) -> PanelId {
        let id = compositor.create_widget_panel(parent, Self::default());
        let panels = compositor.panels_mut();
        panels.set_name(id, "TabControl");
        panels.add_flags(id, PanelFlags::CAN_MOVE);
        panels.set_background_color(id, BACKGROUND);
        id
    }

    /// Appends a tab captioned `name` showing `page`, and makes it active.
    ///
    /// Returns the new tab's index.
    pub fn add_tab(compositor: &mut Compositor, control: PanelId, name: &str, page: Option<PanelId>) -> usize {
        let index = compositor.widget::<Self>(control).map_or(0, Self::tab_count);

        let button = Button::create(compositor, control, name);
        compositor.with_widget(button, |b: &mut Button, c| {
            let _ = b.label_mut().set_font(c, TAB_FONT, TAB_FONT_SIZE);
            b.set_hover_color(TAB_HOVER);
            b.on_click.connect(move |c, _, ()| {
                c.with_widget(control, |t: &mut Self, c| t.show_tab(c, control, index));
            });
        });
        #[expect(clippy::cast_precision_loss, reason = "tab counts are tiny")]
        let x = TAB_SIZE.width * index as f64;
        let panels = compositor.panels_mut();
        panels.set_name(button, name);
        panels.set_bounds(button, Rect::from_origin_size((x, 0.0), TAB_SIZE));

        if let Some(page) = page {
            if let Err(err) = compositor.add_child(control, page) {
                log::warn!("tab page {page:?} not adopted: {err}");
            }
            let size = compositor.panels().size(control);
            compositor.panels_mut().set_bounds(page, page_bounds(size));
        }

        compositor.with_widget(control, |t: &mut Self, c| {
            t.tabs.push(Tab { button, page });
            t.show_tab(c, control, index);
        });
        index
    }

    /// Shows tab `index`, hiding the page of the previously active tab.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a tab.
    pub fn show_tab(&mut self, compositor: &mut Compositor, id: PanelId, index: usize) {
        assert!(index < self.tabs.len(), "tab index out of range");
        if self.active == Some(index) {
            return;
        }
        if let Some(page) = self.active.and_then(|i| self.tabs[i].page) {
            compositor.panels_mut().set_visible(page, false);
        }
        self.active = Some(index);
        if let Some(page) = self.tabs[index].page {
            compositor.panels_mut().set_visible(page, true);
        }
        self.on_tab_changed.invoke(compositor, id, index);
    }

    /// Returns the number of tabs.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Returns the index of the tab being shown.
    #[must_use]
    pub fn active_tab(&self) -> Option<usize> {
        self.active
    }

    /// Returns the button of tab `index`.
    #[must_use]
    pub fn tab_button(&self, index: usize) -> Option<PanelId> {
        self.tabs.get(index).map(|t| t.button)
    }

    /// Returns the page of tab `index`.
    #[must_use]
    pub fn tab_page(&self, index: usize) -> Option<PanelId> {
        self.tabs.get(index).and_then(|t| t.page)
    }
}

fn page_bounds(size: Size) -> Rect {
    Rect::new(0.0, TAB_SIZE.height, size.width, size.height.max(TAB_SIZE.height))
}

impl Widget for TabControl {
    fn update(&mut self, compositor: &mut Compositor, id: PanelId, _: f64) {
        let bounds = page_bounds(compositor.panels().size(id));
        for page in self.tabs.iter().filter_map(|t| t.page) {
            if compositor.panels().is_alive(page) {
                compositor.panels_mut().set_bounds(page, bounds);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use kurbo::Point;
    use lamina_harness::{InputDriver, headless_compositor};

    use super::*;

    struct Fixture {
        compositor: Compositor,
        control: PanelId,
        pages: [PanelId; 2],
        changes: Rc<RefCell<Vec<usize>>>,
    }

    fn fixture() -> Fixture {
        let (mut compositor, _) = headless_compositor(300.0, 300.0);
        let root = compositor.root();
        let control = TabControl::create(&mut compositor, root);
        compositor
            .panels_mut()
            .set_bounds(control, Rect::new(10.0, 10.0, 210.0, 110.0));
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        compositor.with_widget(control, |t: &mut TabControl, _| {
            t.on_tab_changed.connect(move |_, _, i| sink.borrow_mut().push(i));
        });
        let first = compositor.create_panel(root);
        let second = compositor.create_panel(root);
        let a = TabControl::add_tab(&mut compositor, control, "one", Some(first));
        let b = TabControl::add_tab(&mut compositor, control, "two", Some(second));
        assert_eq!((a, b), (0, 1));
        let _ = compositor.tick(0.0);
        Fixture {
            compositor,
            control,
            pages: [first, second],
            changes,
        }
    }

    fn active(f: &Fixture) -> Option<usize> {
        f.compositor.widget::<TabControl>(f.control).and_then(TabControl::active_tab)
    }

    #[test]
    fn newest_tab_is_shown_and_pages_fill_below_buttons() {
        let f = fixture();
        let panels = f.compositor.panels();
        assert_eq!(active(&f), Some(1));
        assert!(!panels.is_visible(f.pages[0]));
        assert!(panels.is_visible(f.pages[1]));
        assert_eq!(panels.parent(f.pages[0]), Some(f.control));
        assert_eq!(panels.bounds(f.pages[0]), Rect::new(0.0, 20.0, 200.0, 100.0));
        let second = f
            .compositor
            .widget::<TabControl>(f.control)
            .and_then(|t| t.tab_button(1));
        assert_eq!(second.map(|b| panels.bounds(b)), Some(Rect::new(40.0, 0.0, 80.0, 20.0)));
        assert_eq!(*f.changes.borrow(), vec![0, 1]);
    }

    #[test]
    fn clicking_tab_button_switches_page() {
        let mut f = fixture();
        // The first tab button sits at (10, 10) in compositor space.
        InputDriver::new(&mut f.compositor).click(Point::new(30.0, 20.0));
        assert_eq!(active(&f), Some(0));
        assert!(f.compositor.panels().is_visible(f.pages[0]));
        assert!(!f.compositor.panels().is_visible(f.pages[1]));
        assert_eq!(*f.changes.borrow(), vec![0, 1, 0]);

        // Showing the active tab again changes nothing.
        InputDriver::new(&mut f.compositor).click(Point::new(31.0, 20.0));
        assert_eq!(*f.changes.borrow(), vec![0, 1, 0]);
    }

    #[test]
    fn pages_follow_control_resize() {
        let mut f = fixture();
        f.compositor
            .panels_mut()
            .set_size(f.control, Size::new(120.0, 60.0));
        let _ = f.compositor.tick(0.0);
        let panels = f.compositor.panels();
        assert_eq!(panels.bounds(f.pages[1]), Rect::new(0.0, 20.0, 120.0, 60.0));
    }

    #[test]
    #[should_panic(expected = "tab index out of range")]
    fn showing_missing_tab_panics() {
        let mut f = fixture();
        let control = f.control;
        f.compositor
            .with_widget(control, |t: &mut TabControl, c| t.show_tab(c, control, 5));
    }
}
