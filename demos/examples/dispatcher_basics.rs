// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher basics: two modules contend for the right hand.
//!
//! Run:
//! - `cargo run -p grasp_demos --example dispatcher_basics`
//! - `RUST_LOG=grasp_dispatch=trace cargo run -p grasp_demos --example dispatcher_basics`

use core::time::Duration;

use grasp_dispatch::module::{DispatcherModule, ModuleContext};
use grasp_dispatch::scheduler::{Dispatcher, Disposition};
use grasp_dispatch::situation::Situation;
use grasp_dispatch::types::{
    ActivitySlots, ModuleError, ModuleParameters, RunResult, SituationFields,
};
use grasp_utils::{Hand, HandPair};
use tracing::info;

/// Active while the trigger of `hand` is above `threshold`.
struct TriggerGate {
    priority: i32,
    hand: Hand,
    threshold: f32,
}

impl TriggerGate {
    fn check(&self, situation: &Situation) -> Result<RunResult, ModuleError> {
        Ok(if situation.trigger_values()?[self.hand] > self.threshold {
            RunResult::active()
        } else {
            RunResult::inactive()
        })
    }
}

impl DispatcherModule for TriggerGate {
    fn parameters(&self) -> ModuleParameters {
        ModuleParameters::new(
            self.priority,
            ActivitySlots::hand(self.hand) | ActivitySlots::hand_trigger(self.hand),
            SituationFields::TRIGGER_VALUES,
            0,
        )
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
    // Lower number wins: the far grab outranks the scroller once both are ready.
    dispatcher.register(
        "RightScroller",
        Box::new(TriggerGate {
            priority: 300,
            hand: Hand::Right,
            threshold: 0.1,
        }),
    );
    dispatcher.register(
        "RightFarGrab",
        Box::new(TriggerGate {
            priority: 100,
            hand: Hand::Right,
            threshold: 0.6,
        }),
    );

    let mut now = Duration::ZERO;
    for right in [0.0, 0.3, 0.8, 0.3, 0.0] {
        let situation = Situation {
            trigger_values: Some(HandPair::new(0.0, right)),
            ..Situation::default()
        };
        let report = dispatcher.update(&situation, now);
        now += Duration::from_millis(16);

        for outcome in &report.outcomes {
            let verdict = match &outcome.disposition {
                Disposition::Ran(result) if result.active => "running",
                Disposition::Ran(_) | Disposition::Idle => "idle",
                Disposition::Blocked { .. } => "blocked",
                Disposition::MissingData { .. } => "missing data",
                Disposition::Throttled { .. } => "throttled",
                Disposition::Failed(_) => "failed",
            };
            info!(frame = report.frame, trigger = right, module = %outcome.name, verdict);
        }
        info!(
            frame = report.frame,
            owner = ?report.slot_owner(ActivitySlots::RIGHT_HAND),
            "right hand owner"
        );
    }
}
