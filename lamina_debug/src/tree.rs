// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel tree snapshots.
//!
//! [`dump`] renders the hierarchy under the root as indented text, one
//! panel per line in child order. [`to_json`] produces the same snapshot
//! as nested JSON objects.

use std::fmt::Write;

use lamina_core::{Compositor, PanelFlags, PanelId};
use serde_json::{Value, json};

/// Names of the caller-controlled flags; dirty bits are left out so a
/// snapshot does not depend on when the last tick ran.
fn flag_names(flags: PanelFlags) -> Vec<&'static str> {
    let flags = flags - (PanelFlags::TRANSFORM_DIRTY | PanelFlags::NEEDS_LAYOUT);
    flags.iter_names().map(|(name, _)| name).collect()
}

fn id_string(id: PanelId) -> String {
    format!("{}@{}", id.index(), id.generation())
}

/// Renders the panel tree as indented text.
///
/// Each line reads `name id bounds=(x0, y0, x1, y1) [FLAGS]`, indented two
/// spaces per level. Unnamed panels print as `panel`.
#[must_use]
pub fn dump(compositor: &Compositor) -> String {
    let mut out = String::new();
    dump_panel(compositor, compositor.root(), 0, &mut out);
    out
}

fn dump_panel(compositor: &Compositor, id: PanelId, depth: usize, out: &mut String) {
    let panels = compositor.panels();
    let b = panels.bounds(id);
    let _ = writeln!(
        out,
        "{:indent$}{} {} bounds=({}, {}, {}, {}) [{}]",
        "",
        panels.name(id).unwrap_or("panel"),
        id_string(id),
        b.x0,
        b.y0,
        b.x1,
        b.y1,
        flag_names(panels.flags(id)).join(" | "),
        indent = depth * 2,
    );
    for child in panels.children(id) {
        dump_panel(compositor, child, depth + 1, out);
    }
}

/// Snapshots the panel tree as nested JSON objects.
///
/// Every object has `id`, `name` (or null), `bounds` as `[x0, y0, x1, y1]`,
/// `world_bounds` in compositor space, `flags` as a list of names, and
/// `children`.
#[must_use]
pub fn to_json(compositor: &Compositor) -> Value {
    panel_json(compositor, compositor.root())
}

fn panel_json(compositor: &Compositor, id: PanelId) -> Value {
    let panels = compositor.panels();
    let b = panels.bounds(id);
    let w = panels.screen_bounds(id);
    let children: Vec<Value> = panels
        .children(id)
        .map(|child| panel_json(compositor, child))
        .collect();
    json!({
        "id": id_string(id),
        "name": panels.name(id),
        "bounds": [b.x0, b.y0, b.x1, b.y1],
        "world_bounds": [w.x0, w.y0, w.x1, w.y1],
        "flags": flag_names(panels.flags(id)),
        "children": children,
    })
}
