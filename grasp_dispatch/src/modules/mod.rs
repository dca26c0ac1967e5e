// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in modules and helpers registering them in left/right pairs.

mod hud_overlay_pointer;
mod in_vr_edit_mode;

pub use hud_overlay_pointer::{
    HUD_LASER_OFFSET, HUD_OVERLAY_POINTER_PRIORITY, HudOverlayPointer, RETICLE_MARGIN,
};
pub use in_vr_edit_mode::{IN_VR_EDIT_MODE_PRIORITY, InVrEditMode};

use grasp_utils::Hand;

use crate::scheduler::Dispatcher;

/// Register a [`HudOverlayPointer`] for each hand, left first.
pub fn register_hud_overlay_pointers(dispatcher: &mut Dispatcher) {
    for hand in Hand::BOTH {
        dispatcher.register(
            HudOverlayPointer::name(hand),
            Box::new(HudOverlayPointer::new(hand)),
        );
    }
}

/// Remove both HUD overlay pointers.
pub fn unregister_hud_overlay_pointers(dispatcher: &mut Dispatcher) {
    for hand in Hand::BOTH {
        dispatcher.unregister(HudOverlayPointer::name(hand));
    }
}

/// Register an [`InVrEditMode`] suppressor for each hand, left first.
pub fn register_in_vr_edit_mode(dispatcher: &mut Dispatcher) {
    for hand in Hand::BOTH {
        dispatcher.register(InVrEditMode::name(hand), Box::new(InVrEditMode::new(hand)));
    }
}

/// Remove both edit-mode suppressors.
pub fn unregister_in_vr_edit_mode(dispatcher: &mut Dispatcher) {
    for hand in Hand::BOTH {
        dispatcher.unregister(InVrEditMode::name(hand));
    }
}
