// Bookkeeping for the set of render surfaces attached to the page.
//
// The registry is generic over the target key (a DOM element on the web)
// and the surface type, so the lifecycle rules can be exercised without a
// browser.

use super::layout::Viewport;

/// Per-target render surface driven by the registry.
pub trait Surface {
    /// Shared GPU context handed to per-frame and resize work.
    type Gpu;

    fn on_enter_view(&mut self);
    fn on_leave_view(&mut self);
    fn is_visible(&self) -> bool;
    /// Pointer position in viewport coordinates.
    fn pointer_moved(&mut self, x: f32, y: f32);
    fn update(&mut self, gpu: &Self::Gpu);
    fn resize(&mut self, gpu: &Self::Gpu, viewport: &Viewport);
    fn destroy(&mut self);
}

pub struct SurfaceRegistry<K, S> {
    entries: Vec<(K, S)>,
    viewport: Viewport,
    interactive_min_width: f32,
}

impl<K: PartialEq, S: Surface> SurfaceRegistry<K, S> {
    pub fn new(viewport: Viewport, interactive_min_width: f32) -> Self {
        Self {
            entries: Vec::new(),
            viewport,
            interactive_min_width,
        }
    }

    /// Create a surface for every target that does not have one yet.
    ///
    /// Does nothing when `ready` is false or `targets` is empty. `make` may
    /// decline a target by returning `None`. Returns how many surfaces were
    /// created.
    pub fn enter<F>(&mut self, ready: bool, targets: Vec<K>, mut make: F) -> usize
    where
        F: FnMut(&K, &Viewport) -> Option<S>,
    {
        if !ready {
            log::debug!("[registry] enter before assets are ready; ignoring");
            return 0;
        }
        if targets.is_empty() {
            log::debug!("[registry] enter with no tagged elements; ignoring");
            return 0;
        }
        let mut created = 0;
        for target in targets {
            if self.contains(&target) {
                continue;
            }
            if let Some(surface) = make(&target, &self.viewport) {
                self.entries.push((target, surface));
                created += 1;
            }
        }
        log::info!(
            "[registry] attached {} surface(s), {} total",
            created,
            self.entries.len()
        );
        created
    }

    /// Destroy every surface. Entries leave the active set before their
    /// resources are released. Returns how many were destroyed.
    pub fn leave(&mut self) -> usize {
        let mut entries = std::mem::take(&mut self.entries);
        for (_, surface) in entries.iter_mut() {
            surface.destroy();
        }
        if !entries.is_empty() {
            log::info!("[registry] destroyed {} surface(s)", entries.len());
        }
        entries.len()
    }

    pub fn set_in_view(&mut self, target: &K, in_view: bool) {
        let Some(surface) = self.get_mut(target) else {
            return;
        };
        if in_view {
            surface.on_enter_view();
        } else {
            surface.on_leave_view();
        }
    }

    /// Forward a pointer move to every surface. Ignored on narrow layouts,
    /// where the effect stays purely animated.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if !self.is_interactive() {
            return;
        }
        for (_, surface) in self.entries.iter_mut() {
            surface.pointer_moved(x, y);
        }
    }

    pub fn resize(&mut self, gpu: &S::Gpu, viewport: Viewport) {
        self.viewport = viewport;
        for (_, surface) in self.entries.iter_mut() {
            surface.resize(gpu, &self.viewport);
        }
    }

    pub fn update_all(&mut self, gpu: &S::Gpu) {
        for (_, surface) in self.entries.iter_mut() {
            surface.update(gpu);
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &S> {
        self.entries
            .iter()
            .map(|(_, s)| s)
            .filter(|s| s.is_visible())
    }

    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.viewport.width >= self.interactive_min_width
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn contains(&self, target: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == target)
    }

    pub fn get(&self, target: &K) -> Option<&S> {
        self.entries.iter().find(|(k, _)| k == target).map(|(_, s)| s)
    }

    fn get_mut(&mut self, target: &K) -> Option<&mut S> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == target)
            .map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
