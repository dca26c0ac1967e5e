// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer lasers: frame reports drive the visibility, locks, and render states of two hand
//! lasers through a logging pointer service.
//!
//! Run:
//! - `cargo run -p grasp_demos --example pointer_lasers`
//! - `RUST_LOG=debug cargo run -p grasp_demos --example pointer_lasers`

use core::time::Duration;

use glam::Vec3;
use grasp_dispatch::module::{DispatcherModule, ModuleContext};
use grasp_dispatch::scheduler::Dispatcher;
use grasp_dispatch::situation::{RayPick, Situation};
use grasp_dispatch::types::{
    ActivitySlots, ModuleError, ModuleParameters, RunResult, SituationFields,
};
use grasp_pointer::adapters::dispatch::apply_frame;
use grasp_pointer::manager::PointerManager;
use grasp_pointer::render::RenderState;
use grasp_pointer::service::{PickType, PointerConfig, PointerData, PointerService};
use grasp_utils::{Hand, HandPair, LaserLockInfo, ObjectId};
use tracing::info;

/// Prints what a host renderer would be asked to do.
#[derive(Debug, Default)]
struct LoggingService {
    next: u32,
}

impl PointerService for LoggingService {
    type Handle = u32;

    fn create_pointer(&mut self, pick_type: PickType, config: &PointerConfig) -> u32 {
        self.next += 1;
        info!(id = self.next, ?pick_type, hand = ?config.data.hand, "create");
        self.next
    }

    fn set_render_state(&mut self, pointer: u32, state: Option<RenderState>) {
        info!(pointer, state = state.map_or("none", |s| s.name()), "render");
    }

    fn enable_pointer(&mut self, pointer: u32) {
        info!(pointer, "enable");
    }

    fn disable_pointer(&mut self, pointer: u32) {
        info!(pointer, "disable");
    }

    fn remove_pointer(&mut self, pointer: u32) {
        info!(pointer, "remove");
    }

    fn set_lock_end(&mut self, pointer: u32, target: Option<(ObjectId, bool)>, offset: Option<Vec3>) {
        info!(pointer, ?target, ?offset, "lock end");
    }
}

/// Points at whatever the hand's ray hits while the trigger is squeezed.
struct RayGrab {
    hand: Hand,
}

impl RayGrab {
    fn check(&self, situation: &Situation) -> Result<RunResult, ModuleError> {
        let pick = situation.ray_picks()?[self.hand];
        let squeezed = situation.trigger_values()?[self.hand] > 0.5;
        Ok(match pick.object_id {
            Some(target) if squeezed && pick.intersects => RunResult::active()
                .with_targets([target])
                .with_laser_lock(LaserLockInfo::new(target, false, self.hand)),
            _ => RunResult::inactive(),
        })
    }
}

impl DispatcherModule for RayGrab {
    fn parameters(&self) -> ModuleParameters {
        ModuleParameters::new(
            150,
            ActivitySlots::hand(self.hand),
            SituationFields::TRIGGER_VALUES | SituationFields::RAY_PICKS,
            0,
        )
        .with_hand_laser(self.hand.index())
    }

    fn is_ready(
        &mut self,
        situation: &Situation,
        _: &mut ModuleContext<'_>,
    ) -> Result<RunResult, ModuleError> {
        self.check(situation)
    }

    fn run(
        &mut self,
        situation: &Situation,
        _: f32,
        _: &mut ModuleContext<'_>,
    ) -> Result<RunResult, ModuleError> {
        self.check(situation)
    }
}

fn main() {
    grasp_demos::init_logging();

    let mut dispatcher = Dispatcher::default();
    for hand in Hand::BOTH {
        dispatcher.register(format!("{hand:?}RayGrab"), Box::new(RayGrab { hand }));
    }

    let mut pointers = PointerManager::new(LoggingService::default());
    for hand in Hand::BOTH {
        pointers.create_pointer(false, PickType::Ray, PointerData::new(hand));
    }

    let hit = RayPick {
        object_id: Some(ObjectId(42)),
        intersects: true,
        intersection: Vec3::new(0.0, 1.0, -3.0),
        distance: 3.0,
    };
    let mut now = Duration::ZERO;
    for right in [0.0, 0.7, 1.0, 0.2] {
        let situation = Situation {
            trigger_values: Some(HandPair::new(0.0, right)),
            trigger_clicks: Some(HandPair::new(false, right >= 1.0)),
            ray_picks: Some(HandPair::splat(hit)),
            ..Situation::default()
        };
        let report = dispatcher.update(&situation, now);
        now += Duration::from_millis(16);

        apply_frame(&mut pointers, &report);
        pointers.update_pointers_render_state(
            &HandPair::new(false, right >= 1.0),
            &HandPair::new(0.0, right),
        );
        for (index, pointer) in pointers.pointers().iter().enumerate() {
            info!(frame = report.frame, index, state = ?pointer.state());
        }
    }
    // Dropping the manager releases both pointers.
}
