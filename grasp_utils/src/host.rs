// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborator traits: entity/overlay property store and avatar joints.

use alloc::vec::Vec;

use glam::Vec3;

use crate::types::{EntityProperties, NestableType, ObjectId, OverlayPose};

/// Read/write access to the host's entity and overlay properties.
///
/// Lookups return `None` for unknown identifiers; callers treat absence as a normal
/// terminal condition (for example, the end of a parent chain), never as an error.
pub trait EntityStore {
    /// Properties of an entity, or `None` if it does not exist.
    fn entity_properties(&self, id: ObjectId) -> Option<EntityProperties>;

    /// Pose of an overlay, or `None` if it does not exist.
    fn overlay_pose(&self, id: ObjectId) -> Option<OverlayPose>;

    /// What kind of scene-graph node `id` refers to.
    fn nestable_type(&self, id: ObjectId) -> NestableType;

    /// Identifiers of the objects parented to `joint` of `parent`.
    fn children_of_joint(&self, parent: ObjectId, joint: usize) -> Vec<ObjectId>;

    /// Number of physics actions attached to an entity.
    fn action_count(&self, id: ObjectId) -> usize;

    /// Overwrite an entity's linear velocity.
    fn set_velocity(&mut self, id: ObjectId, velocity: Vec3);
}

/// Camera mode, which decides which faux controller joints are in use.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CameraMode {
    /// First-person camera.
    FirstPerson,
    /// Third-person camera.
    ThirdPerson,
    /// Any other camera mode (mirror, independent, ...).
    Other,
}

/// The local avatar's identity and joints.
pub trait AvatarJoints {
    /// Network session identifier of the local avatar.
    fn session_id(&self) -> ObjectId;

    /// Local alias of the avatar, used by objects parented before a session existed.
    fn self_id(&self) -> ObjectId;

    /// Index of a named joint, if the skeleton has it.
    fn joint_index(&self, name: &str) -> Option<usize>;

    /// Whether hand controllers are connected.
    fn hand_controller_available(&self) -> bool;

    /// Current camera mode.
    fn camera_mode(&self) -> CameraMode;
}
