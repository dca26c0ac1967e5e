// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared types: hands, object identifiers, and entity property snapshots.

use alloc::string::String;
use core::ops::{Index, IndexMut};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_REGISTRATION_POINT;

/// One of the two hand controllers.
///
/// The discriminant doubles as the index into per-hand arrays ([`HandPair`]) and into the
/// pointer/laser tables of the pointer crate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Hand {
    /// Left hand, index `0`.
    Left = 0,
    /// Right hand, index `1`.
    Right = 1,
}

impl Hand {
    /// Both hands, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Index of this hand in per-hand arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The opposite hand.
    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Map an index back to a hand, if it is `0` or `1`.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            _ => None,
        }
    }
}

/// A value per hand, indexable by [`Hand`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HandPair<T> {
    values: [T; 2],
}

impl<T> HandPair<T> {
    /// Build from the left and right values.
    pub const fn new(left: T, right: T) -> Self {
        Self {
            values: [left, right],
        }
    }

    /// Iterate `(hand, value)` pairs, left first.
    pub fn iter(&self) -> impl Iterator<Item = (Hand, &T)> {
        Hand::BOTH.into_iter().zip(self.values.iter())
    }

    /// Apply `f` to both values.
    pub fn map<U>(self, mut f: impl FnMut(Hand, T) -> U) -> HandPair<U> {
        let [left, right] = self.values;
        HandPair::new(f(Hand::Left, left), f(Hand::Right, right))
    }
}

impl<T: Clone> HandPair<T> {
    /// The same value for both hands.
    pub fn splat(value: T) -> Self {
        Self::new(value.clone(), value)
    }
}

impl<T> Index<Hand> for HandPair<T> {
    type Output = T;

    fn index(&self, hand: Hand) -> &T {
        &self.values[hand.index()]
    }
}

impl<T> IndexMut<Hand> for HandPair<T> {
    fn index_mut(&mut self, hand: Hand) -> &mut T {
        &mut self.values[hand.index()]
    }
}

/// Opaque identifier of an entity, overlay, or avatar in the host.
///
/// The host hands out 128-bit identifiers; [`ObjectId::NULL`] is the nil id and is treated
/// as "no object" everywhere (for example an unparented entity has a null or absent parent).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u128);

impl ObjectId {
    /// The nil identifier.
    pub const NULL: Self = Self(0);

    /// Returns `true` for the nil identifier.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Kind of an entity, as reported by the host.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum EntityType {
    /// Unrecognized or missing type.
    #[default]
    Unknown,
    /// Box primitive.
    Box,
    /// Sphere primitive.
    Sphere,
    /// Generic shape primitive.
    Shape,
    /// Imported model.
    Model,
    /// Text panel.
    Text,
    /// Image panel.
    Image,
    /// Web surface.
    Web,
    /// Light source.
    Light,
    /// Poly-line stroke.
    PolyLine,
    /// Voxel volume.
    PolyVox,
    /// Particle emitter.
    ParticleEffect,
    /// Zone volume.
    Zone,
    /// Material override.
    Material,
    /// Grid.
    Grid,
}

impl EntityType {
    /// Types that can never be grabbed, whatever their metadata says.
    pub const FORBIDDEN_GRAB_TYPES: [Self; 4] = [Self::Unknown, Self::Light, Self::PolyLine, Self::Zone];

    /// Returns `true` if entities of this type are never grabbable.
    pub fn is_grab_forbidden(self) -> bool {
        Self::FORBIDDEN_GRAB_TYPES.contains(&self)
    }

    /// Parse the host's type name. Unrecognized names map to [`EntityType::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Box" => Self::Box,
            "Sphere" => Self::Sphere,
            "Shape" => Self::Shape,
            "Model" => Self::Model,
            "Text" => Self::Text,
            "Image" => Self::Image,
            "Web" => Self::Web,
            "Light" => Self::Light,
            "PolyLine" => Self::PolyLine,
            "PolyVox" => Self::PolyVox,
            "ParticleEffect" => Self::ParticleEffect,
            "Zone" => Self::Zone,
            "Material" => Self::Material,
            "Grid" => Self::Grid,
            _ => Self::Unknown,
        }
    }

    /// The host's name for this type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Box => "Box",
            Self::Sphere => "Sphere",
            Self::Shape => "Shape",
            Self::Model => "Model",
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Web => "Web",
            Self::Light => "Light",
            Self::PolyLine => "PolyLine",
            Self::PolyVox => "PolyVox",
            Self::ParticleEffect => "ParticleEffect",
            Self::Zone => "Zone",
            Self::Material => "Material",
            Self::Grid => "Grid",
        }
    }
}

/// What kind of node an identifier refers to in the host's scene graph.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NestableType {
    /// An entity.
    Entity,
    /// An avatar.
    Avatar,
    /// An overlay.
    Overlay,
    /// Unknown or stale identifier.
    Unknown,
}

/// Snapshot of the entity properties dispatcher modules read.
///
/// Mirrors [`DISPATCHER_PROPERTIES`](crate::consts::DISPATCHER_PROPERTIES), plus `velocity`
/// which [`ensure_minimum_velocity`](crate::ensure_minimum_velocity) needs.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityProperties {
    /// Identifier of the entity.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Entity kind.
    pub entity_type: EntityType,
    /// World position of the registration point.
    pub position: Vec3,
    /// World orientation.
    pub rotation: Quat,
    /// Size along each local axis.
    pub dimensions: Vec3,
    /// Normalized point within the box that `position` refers to; `(0.5, 0.5, 0.5)` is the center.
    pub registration_point: Vec3,
    /// Gravity applied when simulated.
    pub gravity: Vec3,
    /// Linear velocity.
    pub velocity: Vec3,
    /// Whether the entity is simulated by physics.
    pub dynamic: bool,
    /// Whether the entity ignores collisions.
    pub collisionless: bool,
    /// Whether the entity is locked against edits.
    pub locked: bool,
    /// Collision shape name; `None` or `"none"` means no collision shape.
    pub shape_type: Option<String>,
    /// Parent object, if any.
    pub parent_id: Option<ObjectId>,
    /// Joint of the parent the entity is attached to, if any.
    pub parent_joint_index: Option<usize>,
    /// Mass density.
    pub density: f32,
    /// Free-form metadata blob, usually JSON.
    pub user_data: Option<String>,
}

impl Default for EntityProperties {
    fn default() -> Self {
        Self {
            id: ObjectId::NULL,
            name: String::new(),
            entity_type: EntityType::Unknown,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            dimensions: Vec3::ONE,
            registration_point: DEFAULT_REGISTRATION_POINT,
            gravity: Vec3::ZERO,
            velocity: Vec3::ZERO,
            dynamic: false,
            collisionless: false,
            locked: false,
            shape_type: None,
            parent_id: None,
            parent_joint_index: None,
            density: 1000.0,
            user_data: None,
        }
    }
}

/// Pose and size of a flat overlay (a HUD panel, a tablet screen).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayPose {
    /// World position of the overlay center.
    pub position: Vec3,
    /// World orientation.
    pub rotation: Quat,
    /// Size; the Z component is ignored when projecting onto the overlay.
    pub dimensions: Vec3,
}

/// Where a hand's laser should visually lock while a module is active.
///
/// A lock without a `target_id` is ignored by pointers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LaserLockInfo {
    /// Entity or overlay the laser end sticks to.
    pub target_id: Option<ObjectId>,
    /// Whether `target_id` names an overlay rather than an entity.
    pub is_overlay: bool,
    /// Hand whose laser is locked.
    pub hand: Hand,
    /// Offset of the lock point in the target's frame.
    pub offset: Option<Vec3>,
}

impl LaserLockInfo {
    /// Lock onto `target_id` with no offset.
    pub const fn new(target_id: ObjectId, is_overlay: bool, hand: Hand) -> Self {
        Self {
            target_id: Some(target_id),
            is_overlay,
            hand,
            offset: None,
        }
    }

    /// Set the lock offset.
    pub const fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_indices_round_trip() {
        for hand in Hand::BOTH {
            assert_eq!(Hand::from_index(hand.index()), Some(hand));
        }
        assert_eq!(Hand::from_index(2), None);
        assert_eq!(Hand::Left.other(), Hand::Right);
    }

    #[test]
    fn hand_pair_indexing() {
        let mut pair = HandPair::new(0.1_f32, 0.9);
        assert_eq!(pair[Hand::Right], 0.9);
        pair[Hand::Left] = 0.5;
        let doubled = pair.map(|_, v| v * 2.0);
        assert_eq!(doubled[Hand::Left], 1.0);
        let hands: alloc::vec::Vec<Hand> = pair.iter().map(|(h, _)| h).collect();
        assert_eq!(hands, alloc::vec![Hand::Left, Hand::Right]);
    }

    #[test]
    fn entity_type_names() {
        assert_eq!(EntityType::from_name("Zone"), EntityType::Zone);
        assert_eq!(EntityType::from_name("Spaceship"), EntityType::Unknown);
        assert_eq!(EntityType::from_name(EntityType::Model.name()), EntityType::Model);
        assert!(EntityType::Light.is_grab_forbidden());
        assert!(!EntityType::Box.is_grab_forbidden());
    }
}
