// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Physics nudges for released entities.

use glam::Vec3;

use crate::host::EntityStore;
use crate::types::ObjectId;

/// Speed below which the physics engine may put a dynamic entity to rest.
pub const DYNAMIC_LINEAR_VELOCITY_THRESHOLD: f32 = 0.05;

/// Velocity given to a resting entity so it starts integrating again.
pub const RELEASE_NUDGE_VELOCITY: Vec3 = Vec3::new(0.0, 0.2, 0.0);

/// Give a nearly still, unparented dynamic entity a small upward velocity.
///
/// An entity held very still at a distance and then released can be left inactive by the
/// physics engine; the nudge makes it fall. Returns `true` if the velocity was changed.
pub fn ensure_minimum_velocity<S: EntityStore + ?Sized>(store: &mut S, id: ObjectId) -> bool {
    let Some(props) = store.entity_properties(id) else {
        return false;
    };
    let unparented = props.parent_id.is_none_or(ObjectId::is_null);
    if props.dynamic && unparented && props.velocity.length() < DYNAMIC_LINEAR_VELOCITY_THRESHOLD {
        store.set_velocity(id, RELEASE_NUDGE_VELOCITY);
        return true;
    }
    false
}

/// Returns `true` if any physics action is attached to the entity.
pub fn entity_has_actions<S: EntityStore + ?Sized>(store: &S, id: ObjectId) -> bool {
    store.action_count(id) > 0
}
