// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An ordered set of pointers sharing one service.

use grasp_utils::{HandPair, LaserLockInfo};
use tracing::debug;

use crate::pointer::Pointer;
use crate::render::PointerStyle;
use crate::service::{PickType, PointerData, PointerService};

/// Owns a [`PointerService`] and the pointers created through it.
///
/// Pointers are addressed by creation index. Index-based operations ignore indices that
/// are out of range. All pointers are released together, by
/// [`remove_pointers`](Self::remove_pointers) or when the manager is dropped.
#[derive(Debug)]
pub struct PointerManager<S: PointerService> {
    service: S,
    style: PointerStyle,
    pointers: Vec<Pointer<S::Handle>>,
}

impl<S: PointerService> PointerManager<S> {
    /// A manager with the default [`PointerStyle`].
    pub fn new(service: S) -> Self {
        Self::with_style(service, PointerStyle::default())
    }

    /// A manager whose pointers use `style`.
    pub fn with_style(service: S, style: PointerStyle) -> Self {
        Self {
            service,
            style,
            pointers: Vec::new(),
        }
    }

    /// Create a pointer and append it; returns its service handle.
    pub fn create_pointer(
        &mut self,
        hud_layer: bool,
        pick_type: PickType,
        data: PointerData,
    ) -> S::Handle {
        let pointer = Pointer::create(&mut self.service, hud_layer, pick_type, data, &self.style);
        let id = pointer.id();
        debug!(index = self.pointers.len(), ?id, hand = ?pointer.hand(), "created pointer");
        self.pointers.push(pointer);
        id
    }

    /// Show pointer `index`.
    pub fn make_pointer_visible(&mut self, index: usize) {
        if let Some(pointer) = self.pointers.get_mut(index) {
            pointer.make_visible();
        }
    }

    /// Hide pointer `index`.
    pub fn make_pointer_invisible(&mut self, index: usize) {
        if let Some(pointer) = self.pointers.get_mut(index) {
            pointer.make_invisible();
        }
    }

    /// Lock or unlock the end of pointer `index`; see [`Pointer::lock_end`].
    pub fn lock_pointer_end(&mut self, index: usize, lock: Option<&LaserLockInfo>) {
        if let Some(pointer) = self.pointers.get_mut(index) {
            pointer.lock_end(&mut self.service, lock);
        }
    }

    /// Recompute every pointer's render state.
    pub fn update_pointers_render_state(
        &mut self,
        trigger_clicks: &HandPair<bool>,
        trigger_values: &HandPair<f32>,
    ) {
        for pointer in &self.pointers {
            pointer.update_render_state(&mut self.service, trigger_clicks, trigger_values);
        }
    }

    /// Release every pointer and empty the manager.
    pub fn remove_pointers(&mut self) {
        if self.pointers.is_empty() {
            return;
        }
        debug!(count = self.pointers.len(), "removing pointers");
        for pointer in self.pointers.drain(..) {
            pointer.remove(&mut self.service);
        }
    }

    /// Pointer `index`.
    pub fn pointer(&self, index: usize) -> Option<&Pointer<S::Handle>> {
        self.pointers.get(index)
    }

    /// All pointers, in creation order.
    pub fn pointers(&self) -> &[Pointer<S::Handle>] {
        &self.pointers
    }

    /// Number of pointers.
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    /// Returns `true` if there are no pointers.
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// The service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The service, mutably. Use it for pass-through operations such as enabling a pointer.
    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }
}

impl<S: PointerService> Drop for PointerManager<S> {
    fn drop(&mut self) {
        self.remove_pointers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerState;
    use crate::render::RenderState;
    use crate::service::fake::{Call, Recorder};
    use grasp_utils::{Hand, ObjectId};

    fn manager_with_two() -> PointerManager<Recorder> {
        let mut manager = PointerManager::new(Recorder::default());
        manager.create_pointer(false, PickType::Ray, PointerData::new(Hand::Left));
        manager.create_pointer(true, PickType::Ray, PointerData::new(Hand::Right));
        manager
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut manager = manager_with_two();
        manager.make_pointer_visible(5);
        manager.make_pointer_invisible(5);
        manager.lock_pointer_end(5, Some(&LaserLockInfo::new(ObjectId(1), false, Hand::Left)));
        assert!(manager.pointers().iter().all(|p| p.state() == PointerState::Hidden));
    }

    #[test]
    fn bulk_render_update() {
        let mut manager = manager_with_two();
        manager.make_pointer_visible(0);
        manager.make_pointer_visible(1);
        manager.lock_pointer_end(1, Some(&LaserLockInfo::new(ObjectId(1), false, Hand::Right)));
        manager.service_mut().calls.clear();

        manager.update_pointers_render_state(&HandPair::new(true, false), &HandPair::new(1.0, 0.0));
        let (left, right) = (manager.pointers()[0].id(), manager.pointers()[1].id());
        assert_eq!(
            manager.service().calls,
            vec![
                Call::RenderState(left, Some(RenderState::Full)),
                Call::RenderState(right, Some(RenderState::Hold)),
            ]
        );
    }

    #[test]
    fn remove_pointers_releases_everything() {
        let mut manager = manager_with_two();
        let ids: Vec<u32> = manager.pointers().iter().map(|p| p.id()).collect();
        manager.remove_pointers();
        assert!(manager.is_empty());
        let removed: Vec<&Call> = manager
            .service()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Remove(_)))
            .collect();
        assert_eq!(removed, [&Call::Remove(ids[0]), &Call::Remove(ids[1])]);

        manager.service_mut().calls.clear();
        manager.remove_pointers();
        assert!(manager.service().calls.is_empty());
    }

    #[test]
    fn enable_and_disable_pass_through() {
        let mut manager = manager_with_two();
        manager.service_mut().calls.clear();
        let pointer = manager.pointer(0).cloned().unwrap();
        pointer.disable(manager.service_mut());
        pointer.enable(manager.service_mut());
        assert_eq!(
            manager.service().calls,
            vec![Call::Disable(pointer.id()), Call::Enable(pointer.id())]
        );
    }
}
