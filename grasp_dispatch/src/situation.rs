// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame situation snapshot shared read-only by every module.
//!
//! The host gathers controller poses, trigger state, ray-pick results, and nearby entity
//! properties once per frame. Each part is optional; [`Situation::available_fields`] reports
//! which parts were populated so the scheduler can skip modules whose
//! [`required_fields`](crate::types::ModuleParameters::required_fields) are missing.

use glam::{Quat, Vec3};
use grasp_utils::{EntityProperties, HandPair, ObjectId};
use kurbo::{Point, Rect, Size};

use crate::types::{ModuleError, SituationFields};

/// Pose of a hand controller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ControllerLocation {
    /// Whether the controller is tracked this frame.
    pub valid: bool,
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub orientation: Quat,
}

impl Default for ControllerLocation {
    fn default() -> Self {
        Self {
            valid: false,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

/// Result of a world-space ray pick from one hand.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RayPick {
    /// The picked entity or overlay.
    pub object_id: Option<ObjectId>,
    /// Whether the ray hit anything.
    pub intersects: bool,
    /// World intersection point.
    pub intersection: Vec3,
    /// Distance from the ray origin to the intersection.
    pub distance: f32,
}

/// Result of a HUD ray pick from one hand.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HudRayPick {
    /// Whether the ray hit the HUD surface.
    pub intersects: bool,
    /// World intersection point.
    pub intersection: Vec3,
    /// The intersection in overlay (desktop) pixel coordinates.
    pub overlay_point: Point,
}

/// Identifiers of the tablet surfaces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TabletIds {
    /// The tablet itself.
    pub tablet: ObjectId,
    /// The tablet's web screen.
    pub screen: ObjectId,
    /// The tablet's home button.
    pub home_button: ObjectId,
}

/// Desktop and tablet state used by the HUD modules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudContext {
    /// Size of the overlay viewport in pixels.
    pub viewport: Size,
    /// Desktop windows, in overlay pixel coordinates.
    pub desktop_windows: Vec<Rect>,
    /// Tablet identifiers, when a tablet is shown.
    pub tablet: Option<TabletIds>,
}

impl HudContext {
    /// Returns `true` if `point` lies on any desktop window.
    pub fn is_point_on_desktop_window(&self, point: Point) -> bool {
        self.desktop_windows.iter().any(|w| w.contains(point))
    }
}

/// Read-only per-frame snapshot of controller and world state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Situation {
    /// Controller poses.
    pub controller_locations: Option<HandPair<ControllerLocation>>,
    /// Analog trigger values in `[0, 1]`.
    pub trigger_values: Option<HandPair<f32>>,
    /// Trigger click states.
    pub trigger_clicks: Option<HandPair<bool>>,
    /// World ray picks.
    pub ray_picks: Option<HandPair<RayPick>>,
    /// HUD ray picks.
    pub hud_ray_picks: Option<HandPair<HudRayPick>>,
    /// Properties of entities near each hand, nearest first.
    pub nearby_entity_properties: Option<HandPair<Vec<EntityProperties>>>,
    /// Desktop and tablet state.
    pub hud: Option<HudContext>,
}

fn field<'a, T>(value: &'a Option<T>, flag: SituationFields) -> Result<&'a T, ModuleError> {
    value.as_ref().ok_or(ModuleError::MissingSituation(flag))
}

impl Situation {
    /// Which fields are populated.
    pub fn available_fields(&self) -> SituationFields {
        let mut fields = SituationFields::empty();
        fields.set(
            SituationFields::CONTROLLER_LOCATIONS,
            self.controller_locations.is_some(),
        );
        fields.set(SituationFields::TRIGGER_VALUES, self.trigger_values.is_some());
        fields.set(SituationFields::TRIGGER_CLICKS, self.trigger_clicks.is_some());
        fields.set(SituationFields::RAY_PICKS, self.ray_picks.is_some());
        fields.set(SituationFields::HUD_RAY_PICKS, self.hud_ray_picks.is_some());
        fields.set(
            SituationFields::NEARBY_ENTITY_PROPERTIES,
            self.nearby_entity_properties.is_some(),
        );
        fields.set(SituationFields::HUD, self.hud.is_some());
        fields
    }

    /// Controller poses, or [`ModuleError::MissingSituation`].
    pub fn controller_locations(&self) -> Result<&HandPair<ControllerLocation>, ModuleError> {
        field(&self.controller_locations, SituationFields::CONTROLLER_LOCATIONS)
    }

    /// Trigger values, or [`ModuleError::MissingSituation`].
    pub fn trigger_values(&self) -> Result<&HandPair<f32>, ModuleError> {
        field(&self.trigger_values, SituationFields::TRIGGER_VALUES)
    }

    /// Trigger clicks, or [`ModuleError::MissingSituation`].
    pub fn trigger_clicks(&self) -> Result<&HandPair<bool>, ModuleError> {
        field(&self.trigger_clicks, SituationFields::TRIGGER_CLICKS)
    }

    /// World ray picks, or [`ModuleError::MissingSituation`].
    pub fn ray_picks(&self) -> Result<&HandPair<RayPick>, ModuleError> {
        field(&self.ray_picks, SituationFields::RAY_PICKS)
    }

    /// HUD ray picks, or [`ModuleError::MissingSituation`].
    pub fn hud_ray_picks(&self) -> Result<&HandPair<HudRayPick>, ModuleError> {
        field(&self.hud_ray_picks, SituationFields::HUD_RAY_PICKS)
    }

    /// Nearby entity properties, or [`ModuleError::MissingSituation`].
    pub fn nearby_entity_properties(
        &self,
    ) -> Result<&HandPair<Vec<EntityProperties>>, ModuleError> {
        field(
            &self.nearby_entity_properties,
            SituationFields::NEARBY_ENTITY_PROPERTIES,
        )
    }

    /// HUD context, or [`ModuleError::MissingSituation`].
    pub fn hud(&self) -> Result<&HudContext, ModuleError> {
        field(&self.hud, SituationFields::HUD)
    }
}
