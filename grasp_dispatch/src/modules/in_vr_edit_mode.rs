// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Holds every slot of a hand while an in-VR editor has taken over the controllers.

use grasp_utils::Hand;

use crate::command::{DispatcherCommand, Suppression};
use crate::module::{DispatcherModule, ModuleContext};
use crate::situation::Situation;
use crate::types::{ActivitySlots, ModuleError, ModuleParameters, RunResult, SituationFields};

/// Priority of the edit-mode suppressors. Low enough that the tablet laser still works.
pub const IN_VR_EDIT_MODE_PRIORITY: i32 = 200;

const SLEEP_MILLIS: u64 = 100;

/// Suppresses lower-priority modules on one hand while edit mode is on.
///
/// Suppression is switched by [`DispatcherCommand::EditModeSuppression`]. While on, the module
/// is active and claims the hand, its equip slot and its trigger, except when the hand is
/// using the tablet stylus, grabbing the tablet, or teleporting.
#[derive(Clone, Debug)]
pub struct InVrEditMode {
    hand: Hand,
    suppressing: bool,
}

impl InVrEditMode {
    /// A suppressor for `hand`, initially off.
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            suppressing: false,
        }
    }

    /// Registered name of the suppressor for `hand`.
    pub const fn name(hand: Hand) -> &'static str {
        match hand {
            Hand::Left => "LeftHandInVREditMode",
            Hand::Right => "RightHandInVREditMode",
        }
    }

    /// Whether suppression is on.
    pub fn is_suppressing(&self) -> bool {
        self.suppressing
    }

    fn tablet_stylus(&self) -> &'static str {
        match self.hand {
            Hand::Left => "LeftTabletStylusInput",
            Hand::Right => "RightTabletStylusInput",
        }
    }

    fn near_grab_overlay(&self) -> &'static str {
        match self.hand {
            Hand::Left => "LeftNearParentingGrabOverlay",
            Hand::Right => "RightNearParentingGrabOverlay",
        }
    }

    fn teleporter(&self) -> &'static str {
        match self.hand {
            Hand::Left => "LeftTeleporter",
            Hand::Right => "RightTeleporter",
        }
    }

    fn grabbing_tablet(&self, situation: &Situation, ctx: &ModuleContext<'_>) -> bool {
        let Some(tablet) = situation.hud.as_ref().and_then(|hud| hud.tablet) else {
            return false;
        };
        let name = self.near_grab_overlay();
        ctx.is_running(name)
            && ctx
                .result_of(name)
                .is_some_and(|result| result.targets.contains(&tablet.tablet))
    }
}

impl DispatcherModule for InVrEditMode {
    fn parameters(&self) -> ModuleParameters {
        ModuleParameters::new(
            IN_VR_EDIT_MODE_PRIORITY,
            ActivitySlots::all_for(self.hand),
            SituationFields::empty(),
            SLEEP_MILLIS,
        )
    }

    fn is_ready(
        &mut self,
        _situation: &Situation,
        _ctx: &mut ModuleContext<'_>,
    ) -> Result<RunResult, ModuleError> {
        Ok(if self.suppressing {
            RunResult::active()
        } else {
            RunResult::inactive()
        })
    }

    fn run(
        &mut self,
        situation: &Situation,
        _delta_time: f32,
        ctx: &mut ModuleContext<'_>,
    ) -> Result<RunResult, ModuleError> {
        if !self.suppressing
            || ctx.is_running(self.tablet_stylus())
            || self.grabbing_tablet(situation, ctx)
            || ctx.is_running(self.teleporter())
        {
            return Ok(RunResult::inactive());
        }
        Ok(RunResult::active())
    }

    fn on_command(&mut self, command: &DispatcherCommand) {
        let DispatcherCommand::EditModeSuppression(suppression) = command;
        self.suppressing = *suppression == Suppression::Both;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::register_in_vr_edit_mode;
    use crate::scheduler::{Disposition, Dispatcher};
    use crate::situation::{HudContext, TabletIds};
    use core::time::Duration;
    use grasp_utils::ObjectId;

    const ME: ObjectId = ObjectId(11);
    const TABLET: ObjectId = ObjectId(500);

    struct Peer {
        priority: i32,
        slots: ActivitySlots,
        targets: Vec<ObjectId>,
    }

    impl DispatcherModule for Peer {
        fn parameters(&self) -> ModuleParameters {
            ModuleParameters::new(self.priority, self.slots, SituationFields::empty(), 0)
        }

        fn is_ready(
            &mut self,
            _: &Situation,
            _: &mut ModuleContext<'_>,
        ) -> Result<RunResult, ModuleError> {
            Ok(RunResult::active())
        }

        fn run(
            &mut self,
            _: &Situation,
            _: f32,
            _: &mut ModuleContext<'_>,
        ) -> Result<RunResult, ModuleError> {
            Ok(RunResult::active().with_targets(self.targets.iter().copied()))
        }
    }

    fn at(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn suppress(dispatcher: &mut Dispatcher, suppression: Suppression) {
        let channel = dispatcher.config().edit_mode_channel.clone();
        assert_eq!(
            dispatcher.handle_message(&channel, suppression.as_str(), ME),
            Ok(true)
        );
    }

    #[test]
    fn commands_toggle_suppression() {
        let mut module = InVrEditMode::new(Hand::Left);
        assert!(!module.is_suppressing());
        module.on_command(&DispatcherCommand::EditModeSuppression(Suppression::Both));
        assert!(module.is_suppressing());
        module.on_command(&DispatcherCommand::EditModeSuppression(Suppression::Off));
        assert!(!module.is_suppressing());
    }

    #[test]
    fn suppression_claims_both_hands_and_releases_on_the_same_frame() {
        let mut dispatcher = Dispatcher::with_local_actor(ME);
        register_in_vr_edit_mode(&mut dispatcher);
        dispatcher.register(
            "Laser",
            Box::new(Peer {
                priority: 600,
                slots: ActivitySlots::RIGHT_HAND,
                targets: Vec::new(),
            }),
        );

        let situation = Situation::default();
        let report = dispatcher.update(&situation, at(0));
        assert!(report.is_active("Laser"));

        suppress(&mut dispatcher, Suppression::Both);
        let report = dispatcher.update(&situation, at(10));
        assert!(report.is_active(InVrEditMode::name(Hand::Left)));
        assert!(report.is_active(InVrEditMode::name(Hand::Right)));
        assert_eq!(
            report.claimed,
            ActivitySlots::all_for(Hand::Left) | ActivitySlots::all_for(Hand::Right)
        );
        assert!(matches!(
            report.outcome("Laser").map(|o| &o.disposition),
            Some(Disposition::Blocked { .. })
        ));

        suppress(&mut dispatcher, Suppression::Off);
        let report = dispatcher.update(&situation, at(20));
        assert!(!report.is_active(InVrEditMode::name(Hand::Right)));
        assert!(report.is_active("Laser"));
    }

    #[test]
    fn teleporting_or_grabbing_the_tablet_lifts_suppression() {
        let mut dispatcher = Dispatcher::with_local_actor(ME);
        register_in_vr_edit_mode(&mut dispatcher);
        dispatcher.register(
            "RightTeleporter",
            Box::new(Peer {
                priority: 10,
                slots: ActivitySlots::MOUSE,
                targets: Vec::new(),
            }),
        );
        dispatcher.register(
            "LeftNearParentingGrabOverlay",
            Box::new(Peer {
                priority: 10,
                slots: ActivitySlots::empty(),
                targets: vec![TABLET],
            }),
        );
        suppress(&mut dispatcher, Suppression::Both);

        let situation = Situation {
            hud: Some(HudContext {
                tablet: Some(TabletIds {
                    tablet: TABLET,
                    screen: ObjectId(501),
                    home_button: ObjectId(502),
                }),
                ..HudContext::default()
            }),
            ..Situation::default()
        };
        let report = dispatcher.update(&situation, at(0));
        for hand in Hand::BOTH {
            assert_eq!(
                report
                    .outcome(InVrEditMode::name(hand))
                    .map(|o| &o.disposition),
                Some(&Disposition::Ran(RunResult::inactive())),
                "{hand:?}"
            );
        }
        assert_eq!(report.claimed_for(Hand::Left), ActivitySlots::empty());
    }
}
