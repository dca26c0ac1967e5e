// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface projection and oriented-box distance.

use glam::{Quat, Vec3};
use kurbo::Point;

use crate::consts::DEFAULT_REGISTRATION_POINT;
use crate::host::EntityStore;
use crate::types::{EntityProperties, ObjectId, OverlayPose};

/// Depth given to overlays when projecting onto their XY plane.
pub const OVERLAY_PLANE_DEPTH: f32 = 0.01;

/// Pose, size, and registration point of an oriented box.
///
/// Dimensions must be non-zero on every axis used for projection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// World position of the registration point.
    pub position: Vec3,
    /// World orientation.
    pub rotation: Quat,
    /// Size along each local axis.
    pub dimensions: Vec3,
    /// Normalized point within the box that `position` refers to.
    pub registration_point: Vec3,
}

impl Placement {
    /// Placement of an entity's bounding box.
    pub fn from_entity(props: &EntityProperties) -> Self {
        Self {
            position: props.position,
            rotation: props.rotation,
            dimensions: props.dimensions,
            registration_point: props.registration_point,
        }
    }

    /// Placement of an overlay, treated as a flat centered plane.
    pub fn from_overlay(pose: &OverlayPose) -> Self {
        let mut dimensions = pose.dimensions;
        dimensions.z = OVERLAY_PLANE_DEPTH;
        Self {
            position: pose.position,
            rotation: pose.rotation,
            dimensions,
            registration_point: DEFAULT_REGISTRATION_POINT,
        }
    }

    /// Transform a world point into this box's local frame.
    pub fn to_local(&self, world_point: Vec3) -> Vec3 {
        self.rotation.inverse() * (world_point - self.position)
    }
}

/// Project a world point onto the XY plane of a placement.
///
/// The result is in the surface's own units, measured from its top-left corner:
/// X grows to the right and Y grows downward.
pub fn project_onto_plane(world_point: Vec3, placement: &Placement) -> Point {
    let local = placement.to_local(world_point);
    let normalized = local / placement.dimensions + placement.registration_point;
    Point::new(
        f64::from(normalized.x * placement.dimensions.x),
        // Flip Y: surfaces lay out top-down.
        f64::from((1.0 - normalized.y) * placement.dimensions.y),
    )
}

/// Project a world point onto an entity's XY plane.
pub fn project_onto_entity_plane(world_point: Vec3, props: &EntityProperties) -> Point {
    project_onto_plane(world_point, &Placement::from_entity(props))
}

/// Project a world point onto an overlay's XY plane.
pub fn project_onto_overlay_plane(world_point: Vec3, pose: &OverlayPose) -> Point {
    project_onto_plane(world_point, &Placement::from_overlay(pose))
}

/// Look up an overlay and project a world point onto its XY plane.
///
/// Returns `None` if the overlay does not exist.
pub fn project_onto_overlay<S: EntityStore + ?Sized>(
    store: &S,
    overlay: ObjectId,
    world_point: Vec3,
) -> Option<Point> {
    let pose = store.overlay_pose(overlay)?;
    Some(project_onto_overlay_plane(world_point, &pose))
}

/// Distance from a world point to the surface of an oriented box.
///
/// Zero when the point is inside or on the box.
pub fn distance_to_box(world_point: Vec3, placement: &Placement) -> f32 {
    let local = placement.to_local(world_point);
    let local_min = -(placement.registration_point * placement.dimensions);
    let local_max = (Vec3::ONE - placement.registration_point) * placement.dimensions;
    let clamped = local.max(local_min).min(local_max);
    clamped.distance(local)
}

/// Distance from a world point to an entity's bounding box.
pub fn distance_to_entity_bounds(world_point: Vec3, props: &EntityProperties) -> f32 {
    distance_to_box(world_point, &Placement::from_entity(props))
}
