// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame cycle: update, settle transforms and layouts, draw.

use alloc::vec::Vec;
use core::mem;

use crate::panel::{FrameChanges, PanelFlags, PanelId};
use crate::trace::{FrameSummaryBuilder, PhaseBeginEvent, PhaseEndEvent, PhaseKind};
use crate::widget::render_subtree;

use super::Compositor;

impl Compositor {
    /// Advances the compositor by `dt` seconds.
    ///
    /// Runs every widget's update, then recomputes dirty transforms and runs
    /// pending layouts until the tree settles (or
    /// [`max_layout_passes`](super::CompositorConfig::max_layout_passes) is
    /// reached), then delivers queued application events to the listener.
    pub fn tick(&mut self, dt: f64) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.tick_into(dt, &mut changes);
        changes
    }

    /// Like [`tick`](Self::tick), but reuses a caller-provided buffer.
    pub fn tick_into(&mut self, dt: f64, changes: &mut FrameChanges) {
        changes.clear();
        self.frame_index += 1;
        self.time += dt;

        self.phase_begin(PhaseKind::Update);
        self.update_widgets(dt);
        self.phase_end(PhaseKind::Update);

        self.phase_begin(PhaseKind::Layout);
        self.settle(changes);
        self.phase_end(PhaseKind::Layout);

        changes.topology_changed = self.panels.drain_topology();
        self.process_events();
        self.last_changes.clone_from(changes);
    }

    /// Builds the command list for the whole tree and submits it.
    ///
    /// Does nothing (beyond a debug log) when no renderer is installed.
    pub fn draw(&mut self) {
        let Some(mut renderer) = self.renderer.take() else {
            log::debug!("draw skipped: no renderer installed");
            return;
        };
        let mut list = mem::take(&mut self.command_list);
        list.reset();

        self.phase_begin(PhaseKind::Draw);
        renderer.begin_frame(self);
        if self.panels.is_visible(self.root) {
            render_subtree(self, self.root, &mut *renderer, &mut list);
        }
        renderer.draw_commands(&list);
        renderer.end_frame();

        let mut summary = FrameSummaryBuilder::new(self.frame_index, self.time);
        summary.record_changes(&self.last_changes);
        summary.record_commands(&list);

        self.command_list = list;
        self.renderer = Some(renderer);
        self.phase_end(PhaseKind::Draw);
        let summary = summary.finish();
        self.tracer().frame_summary(&summary);
    }

    /// Updates the root, then each top-level window from back to front with
    /// its subtree in child order.
    fn update_widgets(&mut self, dt: f64) {
        let root = self.root;
        self.update_panel(root, dt);
        let windows: Vec<PanelId> = self.panels.zsorted(root).into_iter().rev().collect();
        for window in windows {
            self.update_subtree(window, dt);
        }
    }

    fn update_subtree(&mut self, id: PanelId, dt: f64) {
        if !self.panels.is_alive(id) {
            return;
        }
        self.update_panel(id, dt);
        if !self.panels.is_alive(id) {
            return;
        }
        let children: Vec<PanelId> = self.panels.children(id).collect();
        for child in children {
            self.update_subtree(child, dt);
        }
    }

    fn update_panel(&mut self, id: PanelId, dt: f64) {
        if let Some(mut widget) = self.panels.widget[id.idx as usize].take() {
            widget.update(self, id, dt);
            self.restore_widget(id, widget);
        }
    }

    /// Alternates transform recomputation and layout until nothing is dirty.
    fn settle(&mut self, changes: &mut FrameChanges) {
        let max_passes = self.config.max_layout_passes;
        loop {
            let transformed = self.panels.recompute_transforms();
            let pending = self.panels.drain_layouts(&transformed);
            changes.transforms.extend_from_slice(&transformed);
            if pending.is_empty() {
                break;
            }
            if changes.passes >= max_passes {
                log::warn!(
                    "layout did not settle after {max_passes} passes; {} panels deferred to the next tick",
                    pending.len()
                );
                for idx in pending {
                    if let Some(id) = self.panels.id_at(idx) {
                        self.panels.invalidate_layout(id);
                    }
                }
                break;
            }
            changes.passes += 1;
            for idx in pending {
                if self.run_layout(idx) {
                    changes.layouts.push(idx);
                }
            }
        }
        changes.transforms.sort_unstable();
        changes.transforms.dedup();
    }

    /// Runs the layout of the panel at `idx`, returning whether it had one.
    fn run_layout(&mut self, idx: u32) -> bool {
        let Some(id) = self.panels.id_at(idx) else {
            return false;
        };
        self.panels.flags[idx as usize].remove(PanelFlags::NEEDS_LAYOUT);
        let Some(mut layout) = self.panels.layout[idx as usize].take() else {
            return false;
        };
        let children: Vec<PanelId> = self.panels.children(id).collect();
        layout.update(self, id, &children);
        self.restore_layout(id, layout);
        true
    }

    fn phase_begin(&mut self, phase: PhaseKind) {
        let e = PhaseBeginEvent {
            frame_index: self.frame_index,
            phase,
            time: self.time,
        };
        self.tracer().phase_begin(&e);
    }

    fn phase_end(&mut self, phase: PhaseKind) {
        let e = PhaseEndEvent {
            frame_index: self.frame_index,
            phase,
            time: self.time,
        };
        self.tracer().phase_end(&e);
    }
}
