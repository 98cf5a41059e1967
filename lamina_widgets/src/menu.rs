// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop-down menus and the menu bar that opens them.
//!
//! A [`MenuBar`] spans the top of its parent and owns one [`Button`] per
//! menu. Pressing a bar button toggles its [`Menu`], a drop-down column of
//! [`MenuItem`]s placed just below the bar. While a menu is open, moving
//! over another bar button switches to that button's menu. A menu closes
//! when an item is released on it or when it loses focus.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use lamina_core::renderer::Renderer;
use lamina_core::widget::{handle_panel_event, render_children, render_panel};
use lamina_core::{Compositor, CursorButton, Delegate, EventArgs, EventKind, PanelFlags, PanelId, Widget};
use lamina_render::{Color, CommandList, TextureHandle};

use crate::{Button, Label, to_compositor};

/// Height of the menu bar.
pub const MENU_BAR_HEIGHT: f64 = 24.0;

const MENU_FONT: &str = "fonts/debug.ttf";
const MENU_FONT_SIZE: u16 = 16;

const BAR_COLOR: Color = Color::rgb(38, 38, 38);
const BAR_HOVER_COLOR: Color = Color::rgb(51, 51, 51);
const ITEM_COLOR: Color = Color::BLACK;
const ITEM_HOVER_COLOR: Color = Color::rgb(51, 51, 51);
const SEPARATOR_COLOR: Color = Color::rgb(77, 77, 77);

/// Padding added around an item's text, in each axis.
const ITEM_PADDING: f64 = 16.0;
/// Horizontal padding added to a bar button's caption.
const BUTTON_PADDING: f64 = 8.0;
const SEPARATOR_HEIGHT: f64 = 2.0;
const ITEM_TEXT_INSET: f64 = 6.0;

/// One row of a [`Menu`]: a selectable entry or a separator line.
#[derive(Debug)]
pub struct MenuItem {
    label: Label,
    separator: bool,
    text_origin: Point,
    /// Fired when the item is released on.
    pub on_activate: Delegate<()>,
}

impl MenuItem {
    fn entry(text: impl Into<String>) -> Self {
        Self {
            label: Label::new(text),
            separator: false,
            text_origin: Point::ZERO,
            on_activate: Delegate::new(),
        }
    }

    fn separator() -> Self {
        Self {
            separator: true,
            ..Self::entry("")
        }
    }

    /// Returns the caption.
    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Returns whether this row is a separator.
    #[must_use]
    pub fn is_separator(&self) -> bool {
        self.separator
    }
}

impl Widget for MenuItem {
    fn update(&mut self, compositor: &mut Compositor, id: PanelId, _: f64) {
        let height = compositor.panels().size(id).height;
        let text = self.label.text_size().height;
        self.text_origin = Point::new(ITEM_TEXT_INSET, ((height - text) * 0.5).floor());
    }

    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        let background = if self.separator {
            SEPARATOR_COLOR
        } else if compositor.hot() == Some(id) {
            ITEM_HOVER_COLOR
        } else {
            ITEM_COLOR
        };
        let panels = compositor.panels();
        list.add_rectangle(&panels.geometry(id), TextureHandle::INVALID, background);
        if !self.separator {
            let color = panels.foreground_color(id);
            self.label
                .render_text(compositor, id, renderer, list, self.text_origin, color);
        }
        render_children(compositor, id, renderer, list);
    }

    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        if self.separator || args.sender != Some(id) || args.target != Some(id) {
            return;
        }
        match args.kind {
            EventKind::CursorButtonPressed => args.handled = true,
            EventKind::CursorButtonReleased => {
                self.on_activate.invoke(compositor, id, ());
                args.handled = true;
            }
            _ => {}
        }
    }
}

/// A drop-down column of [`MenuItem`]s.
///
/// The menu sizes itself every update: items are stacked top to bottom,
/// all as wide as the widest caption. A menu with no items keeps its size.
#[derive(Debug)]
pub struct Menu {
    title: String,
}

impl Menu {
    /// Creates a hidden menu under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId, title: impl Into<String>) -> PanelId {
        let title = title.into();
        let id = compositor.create_panel(parent);
        let panels = compositor.panels_mut();
        panels.set_name(id, title.as_str());
        panels.set_visible(id, false);
        let _ = compositor.set_widget(id, Box::new(Self { title }));
        id
    }

    /// Returns the title shown on the bar.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Appends an item captioned `text` that runs `action` when chosen.
    pub fn add_item<F>(compositor: &mut Compositor, menu: PanelId, text: impl Into<String>, action: F) -> PanelId
    where
        F: FnMut(&mut Compositor, PanelId, ()) + 'static,
    {
        let mut item = MenuItem::entry(text);
        let _ = item.label.set_font(compositor, MENU_FONT, MENU_FONT_SIZE);
        item.on_activate.connect(action);
        let id = compositor.create_widget_panel(menu, item);
        compositor.panels_mut().set_name(id, "menu item");
        id
    }

    /// Appends a separator line.
    pub fn add_separator(compositor: &mut Compositor, menu: PanelId) -> PanelId {
        let id = compositor.create_widget_panel(menu, MenuItem::separator());
        let panels = compositor.panels_mut();
        panels.set_name(id, "menu separator");
        panels.remove_flags(id, PanelFlags::CURSOR_ENABLED);
        panels.set_size(id, Size::new(1.0, SEPARATOR_HEIGHT));
        id
    }

    /// Shows the menu.
    pub fn show(compositor: &mut Compositor, menu: PanelId) {
        compositor.panels_mut().set_visible(menu, true);
    }

    /// Hides the menu.
    pub fn hide(compositor: &mut Compositor, menu: PanelId) {
        compositor.panels_mut().set_visible(menu, false);
    }

    /// Shows the menu if hidden and hides it if shown.
    pub fn toggle(compositor: &mut Compositor, menu: PanelId) {
        let open = Self::is_open(compositor, menu);
        compositor.panels_mut().set_visible(menu, !open);
    }

    /// Returns whether the menu is showing.
    #[must_use]
    pub fn is_open(compositor: &Compositor, menu: PanelId) -> bool {
        compositor.panels().is_visible(menu)
    }
}

impl Widget for Menu {
    fn update(&mut self, compositor: &mut Compositor, id: PanelId, _: f64) {
        let items: Vec<PanelId> = compositor.panels().children(id).collect();
        let mut heights = Vec::with_capacity(items.len());
        let mut width: f64 = 0.0;
        let mut y = 0.0;
        for &item in &items {
            let measured = compositor.with_widget(item, |it: &mut MenuItem, c| {
                it.label.measure(c);
                (it.separator, it.label.text_size())
            });
            let height = match measured {
                Some((false, text)) => {
                    width = width.max(text.width + ITEM_PADDING);
                    text.height + ITEM_PADDING
                }
                _ => compositor.panels().size(item).height,
            };
            compositor.panels_mut().set_origin(item, Point::new(0.0, y));
            heights.push(height);
            y += height;
        }
        for (&item, height) in items.iter().zip(heights) {
            compositor.panels_mut().set_size(item, Size::new(width, height));
        }
        if width > 0.0 && y > 0.0 {
            compositor.panels_mut().set_size(id, Size::new(width, y));
        }
    }

    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        render_children(compositor, id, renderer, list);
    }

    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        if args.kind != EventKind::CursorButtonReleased {
            return;
        }
        let on_item = args
            .target
            .is_some_and(|t| t != id && compositor.panels().parent(t) == Some(id));
        if args.sender == Some(id) && on_item {
            Self::hide(compositor, id);
            if compositor.focus() == Some(id) {
                compositor.set_focus(None);
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct BarEntry {
    button: PanelId,
    menu: PanelId,
}

/// A horizontal strip of menu buttons along the top of its parent.
///
/// The bar stays on top of its siblings and tracks its parent's width. Its
/// hit area includes any open menu, so drop-downs hanging below the bar
/// still receive input.
#[derive(Debug, Default)]
pub struct MenuBar {
    entries: Vec<BarEntry>,
    next_origin: f64,
}

impl MenuBar {
    /// Creates a menu bar under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId) -> PanelId {
        let id = compositor.create_widget_panel(parent, Self::default());
        let width = compositor.panels().size(parent).width;
        let panels = compositor.panels_mut();
        panels.set_name(id, "MenuBar");
        panels.add_flags(id, PanelFlags::ALWAYS_ON_TOP);
        panels.set_background_color(id, BAR_COLOR);
        panels.set_bounds(id, Rect::new(0.0, 0.0, width, MENU_BAR_HEIGHT));
        id
    }

    /// Adds a menu titled `title` with its bar button, and returns the
    /// menu panel for [`Menu::add_item`].
    pub fn add_menu(compositor: &mut Compositor, bar: PanelId, title: impl Into<String>) -> PanelId {
        let title = title.into();
        let x = compositor.widget::<Self>(bar).map_or(0.0, |b| b.next_origin);

        let button = Button::create(compositor, bar, title.as_str());
        let caption = compositor.with_widget(button, |b: &mut Button, c| {
            let _ = b.label_mut().set_font(c, MENU_FONT, MENU_FONT_SIZE);
            b.set_hover_color(BAR_HOVER_COLOR);
            let font = b.label().font();
            c.renderer()
                .map_or(0.0, |r| r.font_measure_string(font, b.label().text()).width())
        });
        let width = caption.unwrap_or(0.0) + BUTTON_PADDING;
        let panels = compositor.panels_mut();
        panels.set_name(button, title.as_str());
        panels.set_background_color(button, BAR_COLOR);
        panels.set_bounds(button, Rect::new(x, 0.0, x + width, MENU_BAR_HEIGHT));

        let menu = Menu::create(compositor, bar, title);
        compositor
            .panels_mut()
            .set_bounds(menu, Rect::new(x, MENU_BAR_HEIGHT, x + width, 2.0 * MENU_BAR_HEIGHT));

        compositor.with_widget(bar, |b: &mut Self, _| {
            b.entries.push(BarEntry { button, menu });
            b.next_origin = x + width;
        });
        menu
    }

    /// Returns the menus in the order they were added.
    pub fn menus(&self) -> impl Iterator<Item = PanelId> + '_ {
        self.entries.iter().map(|e| e.menu)
    }

    /// Returns the bar button that opens `menu`.
    #[must_use]
    pub fn button_for(&self, menu: PanelId) -> Option<PanelId> {
        self.entries.iter().find(|e| e.menu == menu).map(|e| e.button)
    }

    fn menu_for_button(&self, button: Option<PanelId>) -> Option<PanelId> {
        let button = button?;
        self.entries.iter().find(|e| e.button == button).map(|e| e.menu)
    }

    fn owns_menu(&self, panel: Option<PanelId>) -> bool {
        panel.is_some_and(|p| self.entries.iter().any(|e| e.menu == p))
    }

    fn open(compositor: &mut Compositor, menu: PanelId) {
        Menu::show(compositor, menu);
        compositor.set_focus(Some(menu));
    }
}

impl Widget for MenuBar {
    fn update(&mut self, compositor: &mut Compositor, id: PanelId, _: f64) {
        let panels = compositor.panels();
        let Some(parent) = panels.parent(id) else {
            return;
        };
        let size = Size::new(panels.size(parent).width, MENU_BAR_HEIGHT);
        let panels = compositor.panels_mut();
        panels.set_maximum_size(id, size);
        panels.set_size(id, size);
    }

    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        render_panel(compositor, id, list);
        render_children(compositor, id, renderer, list);
    }

    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        if args.sender != Some(id) {
            return;
        }
        let target_menu = self.menu_for_button(args.target);
        match (args.kind, target_menu) {
            (EventKind::CursorButtonPressed, Some(menu)) if args.cursor_button == CursorButton::Left => {
                if Menu::is_open(compositor, menu) {
                    Menu::hide(compositor, menu);
                    compositor.set_focus(None);
                } else {
                    Self::open(compositor, menu);
                }
                args.handled = true;
            }
            (EventKind::CursorMove, Some(menu)) => {
                let switch = args.focus.filter(|&f| {
                    f != menu && self.owns_menu(Some(f)) && Menu::is_open(compositor, f)
                });
                if let Some(open) = switch {
                    Menu::hide(compositor, open);
                    Self::open(compositor, menu);
                    args.handled = true;
                }
            }
            (EventKind::FocusLost, None) if self.owns_menu(args.target) => {
                if let Some(menu) = args.target {
                    Menu::hide(compositor, menu);
                }
                args.handled = true;
            }
            (EventKind::CursorButtonPressed, None) if args.target == Some(id) => {
                compositor.set_focus(Some(id));
                args.handled = true;
            }
            _ => {}
        }
        if !args.handled {
            handle_panel_event(compositor, id, args);
        }
    }

    fn hit_test_local(&self, compositor: &Compositor, id: PanelId, local: Point) -> bool {
        if compositor.panels().hit_test_local(id, local) {
            return true;
        }
        let point = to_compositor(compositor, id, local);
        self.entries
            .iter()
            .any(|e| compositor.hit_test_panel(e.menu, point))
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use lamina_harness::{InputDriver, headless_compositor};

    use super::*;

    struct Fixture {
        compositor: Compositor,
        bar: PanelId,
        file: PanelId,
        edit: PanelId,
        chosen: Rc<RefCell<Vec<&'static str>>>,
    }

    fn fixture() -> Fixture {
        let (mut compositor, _) = headless_compositor(200.0, 200.0);
        let root = compositor.root();
        let bar = MenuBar::create(&mut compositor, root);
        let file = MenuBar::add_menu(&mut compositor, bar, "File");
        let edit = MenuBar::add_menu(&mut compositor, bar, "Edit");
        let chosen = Rc::new(RefCell::new(Vec::new()));
        for (menu, name) in [(file, "Open"), (file, "Quit"), (edit, "Undo")] {
            let sink = Rc::clone(&chosen);
            let _ = Menu::add_item(&mut compositor, menu, name, move |_, _, ()| {
                sink.borrow_mut().push(name);
            });
        }
        let _ = compositor.tick(0.0);
        Fixture {
            compositor,
            bar,
            file,
            edit,
            chosen,
        }
    }

    fn button(f: &Fixture, menu: PanelId) -> PanelId {
        let b = f.compositor.widget::<MenuBar>(f.bar).and_then(|b| b.button_for(menu));
        b.expect("menu has a bar button")
    }

    #[test]
    fn bar_lays_out_buttons_and_hidden_menus() {
        let f = fixture();
        let panels = f.compositor.panels();
        assert_eq!(panels.bounds(f.bar), Rect::new(0.0, 0.0, 200.0, 24.0));
        // "File" is four 8px glyphs plus padding.
        assert_eq!(panels.bounds(button(&f, f.file)), Rect::new(0.0, 0.0, 40.0, 24.0));
        assert_eq!(panels.bounds(button(&f, f.edit)), Rect::new(40.0, 0.0, 80.0, 24.0));
        assert_eq!(panels.origin(f.file), Point::new(0.0, 24.0));
        assert_eq!(panels.origin(f.edit), Point::new(40.0, 24.0));
        assert!(!Menu::is_open(&f.compositor, f.file));
        assert!(panels.has_flags(f.bar, PanelFlags::ALWAYS_ON_TOP));
        assert_eq!(f.compositor.widget::<Menu>(f.edit).map(Menu::title), Some("Edit"));
    }

    #[test]
    fn toggle_flips_visibility() {
        let mut f = fixture();
        Menu::toggle(&mut f.compositor, f.edit);
        assert!(Menu::is_open(&f.compositor, f.edit));
        Menu::toggle(&mut f.compositor, f.edit);
        assert!(!Menu::is_open(&f.compositor, f.edit));
    }

    #[test]
    fn menu_stacks_items_and_separators() {
        let mut f = fixture();
        let sep = Menu::add_separator(&mut f.compositor, f.file);
        let _ = f.compositor.tick(0.0);
        let panels = f.compositor.panels();
        // Two 32x16 captions padded to 48x32, then a 2px separator.
        assert_eq!(panels.size(f.file), Size::new(48.0, 66.0));
        assert_eq!(panels.bounds(sep), Rect::new(0.0, 64.0, 48.0, 66.0));
        let items: Vec<PanelId> = panels.children(f.file).collect();
        assert_eq!(panels.bounds(items[1]), Rect::new(0.0, 32.0, 48.0, 64.0));
        assert!(!panels.has_flags(sep, PanelFlags::CURSOR_ENABLED));
    }

    #[test]
    fn pressing_bar_button_toggles_menu() {
        let mut f = fixture();
        InputDriver::new(&mut f.compositor).click(Point::new(20.0, 12.0));
        assert!(Menu::is_open(&f.compositor, f.file));
        assert_eq!(f.compositor.focus(), Some(f.file));

        InputDriver::new(&mut f.compositor).click(Point::new(21.0, 12.0));
        assert!(!Menu::is_open(&f.compositor, f.file));
        assert_eq!(f.compositor.focus(), None);
    }

    #[test]
    fn choosing_item_runs_action_and_closes_menu() {
        let mut f = fixture();
        InputDriver::new(&mut f.compositor)
            .click(Point::new(20.0, 12.0))
            .tick(0.0)
            // "Quit" spans y 56..88 in compositor space.
            .click(Point::new(20.0, 70.0));
        assert_eq!(*f.chosen.borrow(), vec!["Quit"]);
        assert!(!Menu::is_open(&f.compositor, f.file));
        assert_eq!(f.compositor.focus(), None);
    }

    #[test]
    fn hovering_other_button_switches_open_menu() {
        let mut f = fixture();
        InputDriver::new(&mut f.compositor)
            .click(Point::new(20.0, 12.0))
            .move_to(Point::new(60.0, 12.0));
        assert!(!Menu::is_open(&f.compositor, f.file));
        assert!(Menu::is_open(&f.compositor, f.edit));
        assert_eq!(f.compositor.focus(), Some(f.edit));
    }

    #[test]
    fn clicking_elsewhere_closes_menu() {
        let mut f = fixture();
        InputDriver::new(&mut f.compositor)
            .click(Point::new(20.0, 12.0))
            .click(Point::new(150.0, 150.0));
        assert!(!Menu::is_open(&f.compositor, f.file));
        assert_eq!(f.compositor.focus(), Some(f.compositor.root()));
        assert!(f.chosen.borrow().is_empty());
    }
}
