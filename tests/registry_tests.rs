// Host-side tests for surface lifecycle bookkeeping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod smudge {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod layout {
        include!("../src/core/layout.rs");
    }
    pub mod registry {
        include!("../src/core/registry.rs");
    }
}

use smudge::constants::INTERACTIVE_MIN_WIDTH;
use smudge::layout::Viewport;
use smudge::registry::{Surface, SurfaceRegistry};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct Probe {
    visible: bool,
    pointer: Vec<(f32, f32)>,
    updates: u32,
    resized_to: Option<Viewport>,
    destroyed: Rc<Cell<u32>>,
}

impl Surface for Probe {
    type Gpu = ();

    fn on_enter_view(&mut self) {
        self.visible = true;
    }
    fn on_leave_view(&mut self) {
        self.visible = false;
    }
    fn is_visible(&self) -> bool {
        self.visible
    }
    fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.push((x, y));
    }
    fn update(&mut self, _gpu: &()) {
        self.updates += 1;
    }
    fn resize(&mut self, _gpu: &(), viewport: &Viewport) {
        self.resized_to = Some(*viewport);
    }
    fn destroy(&mut self) {
        self.destroyed.set(self.destroyed.get() + 1);
    }
}

fn wide() -> Viewport {
    Viewport::new(1280.0, 800.0, 1.0)
}

fn registry(viewport: Viewport) -> SurfaceRegistry<u32, Probe> {
    SurfaceRegistry::new(viewport, INTERACTIVE_MIN_WIDTH)
}

#[test]
fn enter_before_ready_is_a_noop() {
    let mut reg = registry(wide());
    let mut calls = 0;
    let created = reg.enter(false, vec![1, 2], |_, _| {
        calls += 1;
        Some(Probe::default())
    });
    assert_eq!(created, 0);
    assert_eq!(calls, 0);
    assert!(reg.is_empty());
}

#[test]
fn enter_without_targets_is_a_noop() {
    let mut reg = registry(wide());
    assert_eq!(reg.enter(true, vec![], |_, _| Some(Probe::default())), 0);
    assert!(reg.is_empty());
}

#[test]
fn enter_twice_keeps_one_surface_per_target() {
    let mut reg = registry(wide());
    assert_eq!(reg.enter(true, vec![1, 2, 3], |_, _| Some(Probe::default())), 3);
    assert_eq!(reg.enter(true, vec![1, 2, 3], |_, _| Some(Probe::default())), 0);
    assert_eq!(reg.len(), 3);

    // newly tagged targets still get a surface
    assert_eq!(reg.enter(true, vec![1, 4], |_, _| Some(Probe::default())), 1);
    assert_eq!(reg.len(), 4);
    assert!(reg.contains(&4));
}

#[test]
fn factory_may_decline_a_target() {
    let mut reg = registry(wide());
    let created = reg.enter(true, vec![1, 2, 3], |k, _| {
        (*k != 2).then(Probe::default)
    });
    assert_eq!(created, 2);
    assert!(!reg.contains(&2));
}

#[test]
fn factory_sees_the_shared_viewport() {
    let vp = wide();
    let mut reg = registry(vp);
    reg.enter(true, vec![1], |_, seen| {
        assert_eq!(*seen, vp);
        Some(Probe::default())
    });
}

#[test]
fn leave_destroys_everything_once() {
    let destroyed = Rc::new(Cell::new(0));
    let mut reg = registry(wide());
    reg.enter(true, vec![1, 2], |_, _| {
        Some(Probe {
            destroyed: destroyed.clone(),
            ..Probe::default()
        })
    });

    assert_eq!(reg.leave(), 2);
    assert_eq!(destroyed.get(), 2);
    assert!(reg.is_empty());

    assert_eq!(reg.leave(), 0);
    assert_eq!(destroyed.get(), 2);
}

#[test]
fn view_changes_only_touch_the_named_target() {
    let mut reg = registry(wide());
    reg.enter(true, vec![1, 2], |_, _| Some(Probe::default()));
    assert_eq!(reg.visible().count(), 0);

    reg.set_in_view(&1, true);
    assert!(reg.get(&1).is_some_and(|s| s.visible));
    assert!(reg.get(&2).is_some_and(|s| !s.visible));
    assert_eq!(reg.visible().count(), 1);

    reg.set_in_view(&1, false);
    assert_eq!(reg.visible().count(), 0);

    // unknown targets are ignored
    reg.set_in_view(&9, true);
    assert_eq!(reg.visible().count(), 0);
}

#[test]
fn pointer_reaches_every_surface_on_wide_layouts() {
    let mut reg = registry(wide());
    reg.enter(true, vec![1, 2], |_, _| Some(Probe::default()));
    assert!(reg.is_interactive());

    reg.pointer_moved(10.0, 20.0);
    assert_eq!(reg.get(&1).map(|s| s.pointer.clone()), Some(vec![(10.0, 20.0)]));
    assert_eq!(reg.get(&2).map(|s| s.pointer.len()), Some(1));
}

#[test]
fn pointer_is_ignored_on_narrow_layouts() {
    let mut reg = registry(Viewport::new(990.0, 800.0, 1.0));
    reg.enter(true, vec![1], |_, _| Some(Probe::default()));
    assert!(!reg.is_interactive());

    reg.pointer_moved(10.0, 20.0);
    assert_eq!(reg.get(&1).map(|s| s.pointer.len()), Some(0));
}

#[test]
fn threshold_width_counts_as_interactive() {
    let reg = registry(Viewport::new(INTERACTIVE_MIN_WIDTH, 800.0, 1.0));
    assert!(reg.is_interactive());
}

#[test]
fn resize_stores_viewport_and_fans_out() {
    let mut reg = registry(wide());
    reg.enter(true, vec![1, 2], |_, _| Some(Probe::default()));

    let narrow = Viewport::new(600.0, 900.0, 2.0);
    reg.resize(&(), narrow);
    assert_eq!(*reg.viewport(), narrow);
    assert!(!reg.is_interactive());
    assert_eq!(reg.get(&1).and_then(|s| s.resized_to), Some(narrow));
    assert_eq!(reg.get(&2).and_then(|s| s.resized_to), Some(narrow));
}

#[test]
fn update_all_reaches_every_surface() {
    let mut reg = registry(wide());
    reg.enter(true, vec![1, 2], |_, _| Some(Probe::default()));
    reg.update_all(&());
    reg.update_all(&());
    assert_eq!(reg.get(&1).map(|s| s.updates), Some(2));
    assert_eq!(reg.get(&2).map(|s| s.updates), Some(2));
}
