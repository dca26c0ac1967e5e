// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single hand laser.

use grasp_utils::{Hand, HandPair, LaserLockInfo, ObjectId};
use tracing::debug;

use crate::render::{PointerStyle, RenderState, select_render_state};
use crate::service::{PickType, PointerConfig, PointerData, PointerService};

/// Where a pointer is in its visibility/lock cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerState {
    /// Not shown.
    Hidden,
    /// Shown, end follows the pick.
    Visible,
    /// Shown, end stuck to a target.
    Locked(ObjectId),
}

/// One pointer resource in the host, plus its visibility and lock state.
///
/// Pointers are created and torn down by a [`PointerManager`](crate::manager::PointerManager);
/// there is no way to release a single pointer.
#[derive(Clone, Debug)]
pub struct Pointer<H> {
    id: H,
    hand: Hand,
    visible: bool,
    locked: Option<ObjectId>,
    trigger_on_value: f32,
}

impl<H: Copy> Pointer<H> {
    pub(crate) fn create<S: PointerService<Handle = H> + ?Sized>(
        service: &mut S,
        hud_layer: bool,
        pick_type: PickType,
        data: PointerData,
        style: &PointerStyle,
    ) -> Self {
        let hand = data.hand;
        let config = PointerConfig {
            data,
            hud_layer,
            render_states: style.render_states(hud_layer),
            default_render_states: style.default_render_states(hud_layer),
        };
        let id = service.create_pointer(pick_type, &config);
        service.set_render_state(id, None);
        service.enable_pointer(id);
        Self {
            id,
            hand,
            visible: false,
            locked: None,
            trigger_on_value: style.trigger_on_value,
        }
    }

    /// The service handle.
    pub fn id(&self) -> H {
        self.id
    }

    /// The hand whose trigger drives the render state.
    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// Whether the pointer is logically visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The lock target, if locked.
    pub fn locked(&self) -> Option<ObjectId> {
        self.locked
    }

    /// Visibility and lock, combined. A hidden pointer reports [`PointerState::Hidden`]
    /// even if it kept its lock.
    pub fn state(&self) -> PointerState {
        match (self.visible, self.locked) {
            (false, _) => PointerState::Hidden,
            (true, None) => PointerState::Visible,
            (true, Some(target)) => PointerState::Locked(target),
        }
    }

    /// Resume picking.
    pub fn enable<S: PointerService<Handle = H> + ?Sized>(&self, service: &mut S) {
        service.enable_pointer(self.id);
    }

    /// Stop picking.
    pub fn disable<S: PointerService<Handle = H> + ?Sized>(&self, service: &mut S) {
        service.disable_pointer(self.id);
    }

    /// Show the pointer.
    pub fn make_visible(&mut self) {
        self.visible = true;
    }

    /// Hide the pointer. The lock, if any, is kept.
    pub fn make_invisible(&mut self) {
        self.visible = false;
    }

    /// Lock the end onto `lock`'s target, or clear the lock with `None`.
    ///
    /// Locking only happens from the visible, unlocked state, and only with a target;
    /// otherwise the current lock is kept. Clearing while unlocked does nothing.
    pub fn lock_end<S: PointerService<Handle = H> + ?Sized>(
        &mut self,
        service: &mut S,
        lock: Option<&LaserLockInfo>,
    ) {
        match lock {
            Some(lock) => {
                let Some(target) = lock.target_id else {
                    return;
                };
                if self.visible && self.locked.is_none() {
                    service.set_lock_end(self.id, Some((target, lock.is_overlay)), lock.offset);
                    self.locked = Some(target);
                    debug!(hand = ?self.hand, ?target, "locked pointer end");
                }
            }
            None => {
                if self.locked.take().is_some() {
                    service.set_lock_end(self.id, None, None);
                    debug!(hand = ?self.hand, "unlocked pointer end");
                }
            }
        }
    }

    /// Push the render state for the current trigger state to the service, and return it.
    pub fn update_render_state<S: PointerService<Handle = H> + ?Sized>(
        &self,
        service: &mut S,
        trigger_clicks: &HandPair<bool>,
        trigger_values: &HandPair<f32>,
    ) -> Option<RenderState> {
        let state = select_render_state(
            self.visible,
            self.locked.is_some(),
            trigger_clicks[self.hand],
            trigger_values[self.hand],
            self.trigger_on_value,
        );
        service.set_render_state(self.id, state);
        state
    }

    pub(crate) fn remove<S: PointerService<Handle = H> + ?Sized>(self, service: &mut S) {
        service.remove_pointer(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fake::{Call, Recorder};
    use glam::Vec3;

    fn pointer(service: &mut Recorder) -> Pointer<u32> {
        Pointer::create(
            service,
            false,
            PickType::Ray,
            PointerData::new(Hand::Right),
            &PointerStyle::default(),
        )
    }

    #[test]
    fn creation_hides_and_enables() {
        let mut service = Recorder::default();
        let p = pointer(&mut service);
        assert_eq!(
            service.calls,
            vec![
                Call::Create(PickType::Ray, Hand::Right),
                Call::RenderState(p.id(), None),
                Call::Enable(p.id()),
            ]
        );
        assert_eq!(p.state(), PointerState::Hidden);
    }

    #[test]
    fn locking_while_hidden_does_nothing() {
        let mut service = Recorder::default();
        let mut p = pointer(&mut service);
        service.calls.clear();
        p.lock_end(&mut service, Some(&LaserLockInfo::new(ObjectId(3), false, Hand::Right)));
        assert_eq!(p.locked(), None);
        assert!(service.calls.is_empty());
    }

    #[test]
    fn clearing_while_unlocked_does_nothing() {
        let mut service = Recorder::default();
        let mut p = pointer(&mut service);
        p.make_visible();
        service.calls.clear();
        p.lock_end(&mut service, None);
        assert!(service.calls.is_empty());
    }

    #[test]
    fn first_lock_wins_until_cleared() {
        let mut service = Recorder::default();
        let mut p = pointer(&mut service);
        p.make_visible();
        let offset = Vec3::new(0.0, 0.1, 0.0);
        p.lock_end(
            &mut service,
            Some(&LaserLockInfo::new(ObjectId(3), true, Hand::Right).with_offset(offset)),
        );
        p.lock_end(&mut service, Some(&LaserLockInfo::new(ObjectId(4), false, Hand::Right)));
        assert_eq!(p.state(), PointerState::Locked(ObjectId(3)));

        p.lock_end(&mut service, None);
        assert_eq!(p.state(), PointerState::Visible);
        let id = p.id();
        assert_eq!(
            service.calls[3..],
            [
                Call::LockEnd(id, Some((ObjectId(3), true)), Some(offset)),
                Call::LockEnd(id, None, None),
            ]
        );
    }

    #[test]
    fn lock_without_target_is_ignored() {
        let mut service = Recorder::default();
        let mut p = pointer(&mut service);
        p.make_visible();
        let empty = LaserLockInfo {
            target_id: None,
            ..LaserLockInfo::new(ObjectId(1), false, Hand::Right)
        };
        p.lock_end(&mut service, Some(&empty));
        assert_eq!(p.locked(), None);
    }

    #[test]
    fn render_state_tracks_trigger_and_lock() {
        let mut service = Recorder::default();
        let mut p = pointer(&mut service);
        let clicks = HandPair::new(true, false);
        let values = HandPair::new(1.0, 0.5);

        assert_eq!(p.update_render_state(&mut service, &clicks, &values), None);
        p.make_visible();
        assert_eq!(
            p.update_render_state(&mut service, &clicks, &values),
            Some(RenderState::Half)
        );
        p.lock_end(&mut service, Some(&LaserLockInfo::new(ObjectId(9), false, Hand::Right)));
        assert_eq!(
            p.update_render_state(&mut service, &clicks, &values),
            Some(RenderState::Hold)
        );
        assert_eq!(
            service.calls.last(),
            Some(&Call::RenderState(p.id(), Some(RenderState::Hold)))
        );
    }

    #[test]
    fn hidden_pointer_keeps_its_lock() {
        let mut service = Recorder::default();
        let mut p = pointer(&mut service);
        p.make_visible();
        p.lock_end(&mut service, Some(&LaserLockInfo::new(ObjectId(9), false, Hand::Right)));
        p.make_invisible();
        assert_eq!(p.state(), PointerState::Hidden);
        assert_eq!(p.locked(), Some(ObjectId(9)));
    }
}
