// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grabbability classification.
//!
//! Entities opt in or out of grabbing through a `grabbableKey` object inside their
//! `userData` JSON blob:
//!
//! ```json
//! { "grabbableKey": { "grabbable": false, "wantsTrigger": true } }
//! ```
//!
//! Missing keys, a missing blob, and malformed JSON all fall back to [`GrabbableData::default`].
//! Keys are read one at a time, so a bad value for one key never discards the others.

use alloc::string::String;

use serde_json::{Map, Value};

use crate::types::EntityProperties;

/// Grab settings parsed from an entity's metadata blob.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GrabbableData {
    /// Whether the entity may be grabbed at all.
    pub grabbable: bool,
    /// Whether hand IK should be ignored while holding it.
    pub ignore_ik: bool,
    /// Whether the held entity is moved kinematically.
    pub kinematic: bool,
    /// Whether the entity wants trigger events while held.
    pub wants_trigger: bool,
    /// Whether the entity reacts to trigger presses without being grabbed.
    pub triggerable: bool,
}

impl Default for GrabbableData {
    fn default() -> Self {
        Self {
            grabbable: true,
            ignore_ik: true,
            kinematic: true,
            wants_trigger: false,
            triggerable: false,
        }
    }
}

impl GrabbableData {
    /// Read each known key of a `grabbableKey` object; absent keys keep their default.
    ///
    /// Present keys are read by truthiness, so `0`, `""` and `null` count as `false`.
    pub fn from_key(key: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let flag = |name: &str, default: bool| key.get(name).map_or(default, is_truthy);
        Self {
            grabbable: flag("grabbable", defaults.grabbable),
            ignore_ik: flag("ignoreIK", defaults.ignore_ik),
            kinematic: flag("kinematic", defaults.kinematic),
            wants_trigger: flag("wantsTrigger", defaults.wants_trigger),
            triggerable: flag("triggerable", defaults.triggerable),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse the grab settings from an entity's metadata, with permissive defaults.
///
/// A missing or malformed blob, or a `grabbableKey` that is not an object, yields
/// [`GrabbableData::default`].
pub fn grabbable_data(props: &EntityProperties) -> GrabbableData {
    props
        .user_data
        .as_deref()
        .and_then(|blob| serde_json::from_str::<Value>(blob).ok())
        .and_then(|user_data| match user_data.get("grabbableKey") {
            Some(Value::Object(key)) => Some(GrabbableData::from_key(key)),
            _ => None,
        })
        .unwrap_or_default()
}

/// Returns `true` if an entity may be grabbed by hand.
///
/// Locked entities, entities that opt out, and forbidden types
/// ([`EntityType::FORBIDDEN_GRAB_TYPES`](crate::EntityType::FORBIDDEN_GRAB_TYPES)) are not grabbable.
pub fn is_grabbable(props: &EntityProperties) -> bool {
    grabbable_data(props).grabbable && !props.locked && !props.entity_type.is_grab_forbidden()
}

/// Returns `true` if an entity is simulated by physics with a collision shape.
pub fn props_are_physical(props: &EntityProperties) -> bool {
    props.dynamic
        && props
            .shape_type
            .as_deref()
            .is_some_and(|shape| !shape.is_empty() && shape != "none")
}

/// Returns `true` if an entity may be grabbed at range with a laser.
///
/// Only physical entities can be distance grabbed.
pub fn is_distance_grabbable(props: &EntityProperties) -> bool {
    is_grabbable(props) && props_are_physical(props)
}
