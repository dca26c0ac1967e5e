// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives the desktop reticle from a hand laser aimed at the HUD.

use grasp_utils::Hand;
use grasp_utils::consts::TRIGGER_ON_VALUE;
use kurbo::{Point, Rect, Size};

use crate::module::{DispatcherModule, ModuleContext};
use crate::situation::Situation;
use crate::types::{ActivitySlots, ModuleError, ModuleParameters, RunResult, SituationFields};

/// Priority of the HUD overlay pointers.
pub const HUD_OVERLAY_POINTER_PRIORITY: i32 = 540;

/// Distance in pixels the reticle keeps from the viewport edges.
pub const RETICLE_MARGIN: f64 = 25.0;

/// Laser index of the left HUD pointer; the right one follows it.
pub const HUD_LASER_OFFSET: usize = 2;

const SLEEP_MILLIS: u64 = 100;

/// Moves the reticle over desktop windows while the trigger is squeezed.
///
/// Only one hand drives the reticle at a time: a pointer stays inactive while its
/// counterpart on the other hand is running. Once the trigger clicks, the pointer keeps
/// running even when the reticle leaves the desktop windows, until the click is released.
#[derive(Clone, Debug)]
pub struct HudOverlayPointer {
    hand: Hand,
    trigger_clicked: bool,
}

impl HudOverlayPointer {
    /// A pointer for `hand`.
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            trigger_clicked: false,
        }
    }

    /// Registered name of the pointer for `hand`.
    pub const fn name(hand: Hand) -> &'static str {
        match hand {
            Hand::Left => "LeftHudOverlayPointer",
            Hand::Right => "RightHudOverlayPointer",
        }
    }

    /// The hand this pointer follows.
    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// Area the reticle is kept in.
    pub fn reticle_area(viewport: Size) -> Rect {
        Rect::new(
            RETICLE_MARGIN,
            RETICLE_MARGIN,
            viewport.width - RETICLE_MARGIN,
            viewport.height - RETICLE_MARGIN,
        )
    }

    /// Clamp an overlay point into the reticle area of `viewport`.
    ///
    /// When the viewport is too small for the margins, the point lands on the minimum.
    pub fn reticle_position(viewport: Size, point: Point) -> Point {
        let area = Self::reticle_area(viewport);
        Point::new(
            point.x.min(area.x1).max(area.x0),
            point.y.min(area.y1).max(area.y0),
        )
    }

    fn pointing_at_tablet(&self, situation: &Situation) -> Result<bool, ModuleError> {
        let Some(tablet) = situation.hud()?.tablet else {
            return Ok(false);
        };
        let picked = situation.ray_picks()?[self.hand].object_id;
        Ok(picked.is_some_and(|id| id == tablet.screen || id == tablet.home_button))
    }

    fn process_laser(&mut self, situation: &Situation) -> Result<bool, ModuleError> {
        let location = situation.controller_locations()?[self.hand];
        if situation.trigger_values()?[self.hand] < TRIGGER_ON_VALUE
            || !location.valid
            || self.pointing_at_tablet(situation)?
        {
            return Ok(false);
        }
        let hud = situation.hud()?;
        let point = Self::reticle_position(
            hud.viewport,
            situation.hud_ray_picks()?[self.hand].overlay_point,
        );
        if !hud.is_point_on_desktop_window(point) && !self.trigger_clicked {
            return Ok(false);
        }
        self.trigger_clicked = situation.trigger_clicks()?[self.hand];
        Ok(true)
    }
}

impl DispatcherModule for HudOverlayPointer {
    fn parameters(&self) -> ModuleParameters {
        ModuleParameters::new(
            HUD_OVERLAY_POINTER_PRIORITY,
            ActivitySlots::hand(self.hand),
            SituationFields::CONTROLLER_LOCATIONS
                | SituationFields::TRIGGER_VALUES
                | SituationFields::TRIGGER_CLICKS
                | SituationFields::RAY_PICKS
                | SituationFields::HUD_RAY_PICKS
                | SituationFields::HUD,
            SLEEP_MILLIS,
        )
        .with_hand_laser(self.hand.index() + HUD_LASER_OFFSET)
    }

    fn is_ready(
        &mut self,
        situation: &Situation,
        ctx: &mut ModuleContext<'_>,
    ) -> Result<RunResult, ModuleError> {
        if ctx.is_running(Self::name(self.hand.other())) {
            return Ok(RunResult::inactive());
        }
        Ok(if self.process_laser(situation)? {
            RunResult::active()
        } else {
            RunResult::inactive()
        })
    }

    fn run(
        &mut self,
        situation: &Situation,
        _delta_time: f32,
        ctx: &mut ModuleContext<'_>,
    ) -> Result<RunResult, ModuleError> {
        self.is_ready(situation, ctx)
    }
}
