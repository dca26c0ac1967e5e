// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter applying dispatcher frame reports to pointers.
//!
//! ## Feature
//!
//! Enable with `dispatch_adapter`.

use grasp_dispatch::scheduler::FrameReport;

use crate::manager::PointerManager;
use crate::service::PointerService;

/// Show and lock the lasers of active modules; hide and unlock every other pointer.
///
/// A module's [`hand_laser`](grasp_dispatch::types::ModuleParameters::hand_laser) names the
/// pointer index it drives. When several active modules name the same pointer, the first
/// in priority order wins. Pointers are made visible before their lock is applied, so a
/// module's laser lock takes effect in the same frame the module becomes active.
pub fn apply_frame<S: PointerService>(manager: &mut PointerManager<S>, report: &FrameReport) {
    let mut driven = vec![false; manager.len()];
    for outcome in report.active() {
        let Some(laser) = outcome.hand_laser else {
            continue;
        };
        if driven.get(laser) != Some(&false) {
            continue;
        }
        driven[laser] = true;
        manager.make_pointer_visible(laser);
        let lock = outcome
            .active_result()
            .and_then(|result| result.laser_lock.as_ref());
        manager.lock_pointer_end(laser, lock);
    }
    for (index, _) in driven.iter().enumerate().filter(|(_, driven)| !**driven) {
        manager.make_pointer_invisible(index);
        manager.lock_pointer_end(index, None);
    }
}
