// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the dispatcher: activity slots, situation fields, module parameters, run results, and errors.
//!
//! ## Overview
//!
//! These types describe the module protocol and its inputs/outputs.
//! They are consumed by the [`scheduler`](crate::scheduler) and produced by the
//! [`DispatcherModule`](crate::module::DispatcherModule) implementations.

use core::time::Duration;

use grasp_utils::{Hand, LaserLockInfo, ObjectId};

bitflags::bitflags! {
    /// Named exclusive resources a module must hold to run.
    ///
    /// At most one active module may hold a given slot in a frame. Slots are hand-specific,
    /// so the left and right halves of this set act as the per-hand claim sets.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ActivitySlots: u8 {
        /// `leftHand`: general use of the left hand.
        const LEFT_HAND          = 0b0000_0001;
        /// `rightHand`: general use of the right hand.
        const RIGHT_HAND         = 0b0000_0010;
        /// `leftHandEquip`: something equipped in the left hand.
        const LEFT_HAND_EQUIP    = 0b0000_0100;
        /// `rightHandEquip`: something equipped in the right hand.
        const RIGHT_HAND_EQUIP   = 0b0000_1000;
        /// `leftHandTrigger`: the left trigger.
        const LEFT_HAND_TRIGGER  = 0b0001_0000;
        /// `rightHandTrigger`: the right trigger.
        const RIGHT_HAND_TRIGGER = 0b0010_0000;
        /// `mouse`: the desktop mouse.
        const MOUSE              = 0b0100_0000;
    }
}

const SLOT_NAMES: [(&str, ActivitySlots); 7] = [
    ("leftHand", ActivitySlots::LEFT_HAND),
    ("rightHand", ActivitySlots::RIGHT_HAND),
    ("leftHandEquip", ActivitySlots::LEFT_HAND_EQUIP),
    ("rightHandEquip", ActivitySlots::RIGHT_HAND_EQUIP),
    ("leftHandTrigger", ActivitySlots::LEFT_HAND_TRIGGER),
    ("rightHandTrigger", ActivitySlots::RIGHT_HAND_TRIGGER),
    ("mouse", ActivitySlots::MOUSE),
];

impl ActivitySlots {
    /// The general slot of `hand`.
    pub const fn hand(hand: Hand) -> Self {
        match hand {
            Hand::Left => Self::LEFT_HAND,
            Hand::Right => Self::RIGHT_HAND,
        }
    }

    /// The equip slot of `hand`.
    pub const fn hand_equip(hand: Hand) -> Self {
        match hand {
            Hand::Left => Self::LEFT_HAND_EQUIP,
            Hand::Right => Self::RIGHT_HAND_EQUIP,
        }
    }

    /// The trigger slot of `hand`.
    pub const fn hand_trigger(hand: Hand) -> Self {
        match hand {
            Hand::Left => Self::LEFT_HAND_TRIGGER,
            Hand::Right => Self::RIGHT_HAND_TRIGGER,
        }
    }

    /// Every slot belonging to `hand`.
    pub const fn all_for(hand: Hand) -> Self {
        Self::hand(hand)
            .union(Self::hand_equip(hand))
            .union(Self::hand_trigger(hand))
    }

    /// Look up a slot by its textual name (`"rightHand"`, `"leftHandEquip"`, ...).
    pub fn from_slot_name(name: &str) -> Result<Self, SlotNameError> {
        SLOT_NAMES
            .iter()
            .find(|(slot_name, _)| *slot_name == name)
            .map(|&(_, slot)| slot)
            .ok_or_else(|| SlotNameError(name.to_owned()))
    }

    /// Build a set from textual slot names.
    pub fn from_slot_names<'a>(
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, SlotNameError> {
        names
            .into_iter()
            .try_fold(Self::empty(), |acc, name| Ok(acc | Self::from_slot_name(name)?))
    }

    /// Textual names of the slots in this set.
    pub fn slot_names(self) -> impl Iterator<Item = &'static str> {
        SLOT_NAMES
            .into_iter()
            .filter(move |(_, slot)| self.contains(*slot))
            .map(|(name, _)| name)
    }
}

bitflags::bitflags! {
    /// Parts of the per-frame [`Situation`](crate::situation::Situation) snapshot.
    ///
    /// Modules list the fields they need in [`ModuleParameters::required_fields`]; the
    /// scheduler skips a module whose fields are not all populated this frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SituationFields: u8 {
        /// Controller poses and validity.
        const CONTROLLER_LOCATIONS     = 0b0000_0001;
        /// Analog trigger values.
        const TRIGGER_VALUES           = 0b0000_0010;
        /// Trigger click states.
        const TRIGGER_CLICKS           = 0b0000_0100;
        /// World ray-pick results.
        const RAY_PICKS                = 0b0000_1000;
        /// HUD ray-pick results.
        const HUD_RAY_PICKS            = 0b0001_0000;
        /// Properties of entities near each hand.
        const NEARBY_ENTITY_PROPERTIES = 0b0010_0000;
        /// Viewport, desktop windows, and tablet identifiers.
        const HUD                      = 0b0100_0000;
    }
}

/// Scheduling requirements of a module, fixed at registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleParameters {
    /// Lower runs earlier. Ties keep registration order.
    pub priority: i32,
    /// Slots the module must hold exclusively to run.
    pub activity_slots: ActivitySlots,
    /// Situation fields that must be populated before `is_ready` is asked.
    pub required_fields: SituationFields,
    /// Minimum spacing between successive `run` calls.
    pub sleep_between_runs: Duration,
    /// Index of the laser pointer this module drives, if any.
    pub hand_laser: Option<usize>,
}

impl ModuleParameters {
    /// Parameters with no laser binding.
    pub const fn new(
        priority: i32,
        activity_slots: ActivitySlots,
        required_fields: SituationFields,
        sleep_millis_between_runs: u64,
    ) -> Self {
        Self {
            priority,
            activity_slots,
            required_fields,
            sleep_between_runs: Duration::from_millis(sleep_millis_between_runs),
            hand_laser: None,
        }
    }

    /// Bind the module to a laser pointer index.
    pub const fn with_hand_laser(mut self, laser: usize) -> Self {
        self.hand_laser = Some(laser);
        self
    }
}

/// What a module reports from `is_ready` or `run`.
///
/// An inactive result carries no targets and no laser lock; see [`RunResult::is_well_formed`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunResult {
    /// Whether the module is doing something this frame.
    pub active: bool,
    /// Objects the module is acting on, for highlighting and for other modules.
    pub targets: Vec<ObjectId>,
    /// Situation fields the module needs on its next `run`.
    pub required_for_run: SituationFields,
    /// Where the hand's laser should lock, if anywhere.
    pub laser_lock: Option<LaserLockInfo>,
}

impl RunResult {
    /// A result that claims nothing.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// An active result with no targets.
    pub fn active() -> Self {
        Self {
            active: true,
            ..Self::default()
        }
    }

    /// Set the targets.
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = ObjectId>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    /// Set the fields needed on the next `run`.
    pub fn with_required_for_run(mut self, fields: SituationFields) -> Self {
        self.required_for_run = fields;
        self
    }

    /// Set the laser lock.
    pub fn with_laser_lock(mut self, lock: LaserLockInfo) -> Self {
        self.laser_lock = Some(lock);
        self
    }

    /// `false` if an inactive result carries targets or a laser lock.
    pub fn is_well_formed(&self) -> bool {
        self.active || (self.targets.is_empty() && self.laser_lock.is_none())
    }
}

/// An unknown textual activity slot name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown activity slot `{0}`")]
pub struct SlotNameError(pub String);

/// Why a module could not produce a result this frame.
///
/// The scheduler logs the error and skips the module's slot claim for the frame.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    /// A situation field the module reads was not populated.
    #[error("situation is missing {0:?}")]
    MissingSituation(SituationFields),
    /// The module returned an inactive result with targets or a laser lock.
    #[error("malformed run result: {0}")]
    MalformedResult(&'static str),
    /// Module-specific failure.
    #[error("{0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_round_trip() {
        let slots = ActivitySlots::from_slot_names(["rightHand", "rightHandEquip"]).unwrap();
        assert_eq!(slots, ActivitySlots::RIGHT_HAND | ActivitySlots::RIGHT_HAND_EQUIP);
        let names: Vec<&str> = slots.slot_names().collect();
        assert_eq!(names, vec!["rightHand", "rightHandEquip"]);
    }

    #[test]
    fn unknown_slot_name_is_an_error() {
        let err = ActivitySlots::from_slot_names(["leftHand", "tail"]).unwrap_err();
        assert_eq!(err, SlotNameError("tail".to_owned()));
        assert_eq!(err.to_string(), "unknown activity slot `tail`");
    }

    #[test]
    fn per_hand_slot_sets_are_disjoint() {
        let left = ActivitySlots::all_for(Hand::Left);
        let right = ActivitySlots::all_for(Hand::Right);
        assert!(!left.intersects(right));
        assert_eq!(left.bits().count_ones(), 3);
        assert!(right.contains(ActivitySlots::hand_trigger(Hand::Right)));
        assert!(!left.contains(ActivitySlots::MOUSE));
    }

    #[test]
    fn parameters_builder() {
        let params = ModuleParameters::new(540, ActivitySlots::RIGHT_HAND, SituationFields::empty(), 100)
            .with_hand_laser(3);
        assert_eq!(params.sleep_between_runs, Duration::from_millis(100));
        assert_eq!(params.hand_laser, Some(3));
    }

    #[test]
    fn inactive_results_must_be_empty() {
        assert!(RunResult::inactive().is_well_formed());
        assert!(RunResult::active().with_targets([ObjectId(4)]).is_well_formed());
        let bad = RunResult {
            active: false,
            targets: vec![ObjectId(4)],
            ..RunResult::default()
        };
        assert!(!bad.is_well_formed());
        let bad_lock = RunResult {
            laser_lock: Some(LaserLockInfo::new(ObjectId(1), false, Hand::Left)),
            ..RunResult::inactive()
        };
        assert!(!bad_lock.is_well_formed());
    }
}
