// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning constants shared by dispatcher modules and pointers.

use glam::Vec3;

/// Milliseconds per second.
pub const MSECS_PER_SEC: f32 = 1000.0;
/// Inches to meters.
pub const INCHES_TO_METERS: f32 = 1.0 / 39.3701;

/// Haptic pulse strength, `0..=1`.
pub const HAPTIC_PULSE_STRENGTH: f32 = 1.0;
/// Haptic pulse duration in milliseconds.
pub const HAPTIC_PULSE_DURATION: f32 = 13.0;

/// Trigger value below which the trigger counts as released.
pub const TRIGGER_OFF_VALUE: f32 = 0.1;
/// Trigger value above which the trigger is squeezed enough to start a search or near grab.
pub const TRIGGER_ON_VALUE: f32 = TRIGGER_OFF_VALUE + 0.05;
/// Bumper value above which the bumper counts as pressed.
pub const BUMPER_ON_VALUE: f32 = 0.5;

/// Maximum length of a pick ray.
pub const PICK_MAX_DISTANCE: f32 = 500.0;
/// How far from the camera to search for an intersection.
pub const DEFAULT_SEARCH_SPHERE_DISTANCE: f32 = 1000.0;
/// Radius of the search ray against objects for near grabbing.
pub const NEAR_GRAB_PICK_RADIUS: f32 = 0.25;
/// Radius around the hand in which entities count as near.
pub const NEAR_GRAB_RADIUS: f32 = 1.0;

/// Release a grabbed entity once its bounding box is this far from the hand.
pub const TEAR_AWAY_DISTANCE: f32 = 0.1;
/// Number of consecutive checks the entity must stay torn away.
pub const TEAR_AWAY_COUNT: u32 = 2;
/// Seconds between tear-away checks.
pub const TEAR_AWAY_CHECK_TIME: f32 = 0.15;

/// Registration point of an entity centered on its position.
pub const DEFAULT_REGISTRATION_POINT: Vec3 = Vec3::splat(0.5);

/// Properties dispatcher modules request for nearby entities.
pub const DISPATCHER_PROPERTIES: [&str; 16] = [
    "position",
    "registrationPoint",
    "rotation",
    "gravity",
    "collidesWith",
    "dynamic",
    "collisionless",
    "locked",
    "name",
    "shapeType",
    "parentID",
    "parentJointIndex",
    "density",
    "dimensions",
    "userData",
    "type",
];

/// An 8-bit RGB color.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Laser color while the trigger is half squeezed.
pub const COLORS_GRAB_SEARCHING_HALF_SQUEEZE: Rgb8 = Rgb8::new(10, 10, 255);
/// Laser color while the trigger is fully squeezed.
pub const COLORS_GRAB_SEARCHING_FULL_SQUEEZE: Rgb8 = Rgb8::new(250, 10, 10);
/// Laser color while holding something at a distance.
pub const COLORS_GRAB_DISTANCE_HOLD: Rgb8 = Rgb8::new(238, 75, 214);
