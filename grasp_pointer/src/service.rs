// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host's ray-pick and render service.

use core::fmt::Debug;

use glam::Vec3;
use grasp_utils::consts::PICK_MAX_DISTANCE;
use grasp_utils::{Hand, ObjectId};

use crate::render::{RenderState, RenderStyle};

/// Kind of pick backing a pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PickType {
    /// A straight ray.
    Ray,
    /// A stylus tip.
    Stylus,
    /// A parabolic arc.
    Parabola,
}

/// Caller-supplied pointer settings.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerData {
    /// Hand whose trigger drives the pointer.
    pub hand: Hand,
    /// Longest pick distance.
    pub max_distance: f32,
    /// Joint the pointer follows, if not the hand itself.
    pub joint: Option<String>,
}

impl PointerData {
    /// Settings for `hand` with the default pick distance.
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            max_distance: PICK_MAX_DISTANCE,
            joint: None,
        }
    }

    /// Follow `joint`.
    pub fn with_joint(mut self, joint: impl Into<String>) -> Self {
        self.joint = Some(joint.into());
        self
    }
}

/// Everything the service needs to create a pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerConfig {
    /// Caller settings.
    pub data: PointerData,
    /// Whether the pointer draws in the HUD layer.
    pub hud_layer: bool,
    /// Visuals when the pick hits something.
    pub render_states: [RenderStyle; 3],
    /// Visuals when the pick hits nothing.
    pub default_render_states: [RenderStyle; 3],
}

/// Creates, shows, and locks pointer resources in the host.
pub trait PointerService {
    /// Opaque pointer handle.
    type Handle: Copy + Eq + Debug;

    /// Create a pointer resource.
    fn create_pointer(&mut self, pick_type: PickType, config: &PointerConfig) -> Self::Handle;

    /// Show the visuals of `state`, or nothing for `None`.
    fn set_render_state(&mut self, pointer: Self::Handle, state: Option<RenderState>);

    /// Start picking.
    fn enable_pointer(&mut self, pointer: Self::Handle);

    /// Stop picking.
    fn disable_pointer(&mut self, pointer: Self::Handle);

    /// Release the pointer resource.
    fn remove_pointer(&mut self, pointer: Self::Handle);

    /// Stick the pointer end to `target` (id, is-overlay), or release it for `None`.
    fn set_lock_end(
        &mut self,
        pointer: Self::Handle,
        target: Option<(ObjectId, bool)>,
        offset: Option<Vec3>,
    );
}
