// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grasp Utils: geometry and grab-classification helpers for controller dispatcher modules.
//!
//! Dispatcher modules decide every frame whether a hand should point, grab, or stay idle.
//! Those decisions lean on a handful of pure helpers, collected here:
//!
//! - Plane projection of a world point onto an entity or overlay surface, in the surface's
//!   2D space with Y growing downward ([`project_onto_plane`]).
//! - Distance from a point to an oriented bounding box ([`distance_to_box`]).
//! - Grabbability classification from entity properties and the free-form `userData`
//!   metadata blob ([`is_grabbable`], [`is_distance_grabbable`]).
//! - Parent-chain walkers and joint-relative child lookups against a host [`EntityStore`].
//! - [`ensure_minimum_velocity`], which nudges a released dynamic entity so physics picks it up.
//!
//! ## Host collaborators
//!
//! This crate owns no world state. Entity and overlay properties are read from a host-provided
//! [`EntityStore`], and avatar joints from an [`AvatarJoints`] implementation.
//! Everything else is a pure function of its arguments.
//!
//! ## Spaces
//!
//! World space is 3D and uses [`glam`] (`Vec3`, `Quat`). Surface and screen space is 2D and uses
//! [`kurbo`] (`Point`, `Size`, `Rect`), matching the overlay/HUD coordinates used by pointer modules.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use grasp_utils::{distance_to_box, is_grabbable, EntityProperties, EntityType, Placement};
//!
//! let props = EntityProperties {
//!     entity_type: EntityType::Box,
//!     position: Vec3::new(0.0, 1.0, 0.0),
//!     dimensions: Vec3::splat(0.5),
//!     ..Default::default()
//! };
//! assert!(is_grabbable(&props));
//!
//! // A point 1m above the top face of a 0.5m cube centered at y=1.
//! let placement = Placement::from_entity(&props);
//! let d = distance_to_box(Vec3::new(0.0, 2.25, 0.0), &placement);
//! assert!((d - 1.0).abs() < 1e-5);
//!
//! let locked = EntityProperties { locked: true, ..props };
//! assert!(!is_grabbable(&locked));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod consts;
mod grab;
mod hierarchy;
mod host;
mod motion;
mod projection;
mod types;

pub use grab::{GrabbableData, grabbable_data, is_distance_grabbable, is_grabbable, props_are_physical};
pub use hierarchy::{
    controller_joint_index, entity_parents, find_group_parent, find_hand_child_entities,
};
pub use host::{AvatarJoints, CameraMode, EntityStore};
pub use motion::{
    DYNAMIC_LINEAR_VELOCITY_THRESHOLD, RELEASE_NUDGE_VELOCITY, ensure_minimum_velocity,
    entity_has_actions,
};
pub use projection::{
    OVERLAY_PLANE_DEPTH, Placement, distance_to_box, distance_to_entity_bounds,
    project_onto_entity_plane, project_onto_overlay, project_onto_overlay_plane,
    project_onto_plane,
};
pub use types::{
    EntityProperties, EntityType, Hand, HandPair, LaserLockInfo, NestableType, ObjectId, OverlayPose,
};

#[cfg(test)]
pub(crate) mod fake;
