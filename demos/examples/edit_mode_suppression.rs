// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edit-mode suppression: a message on the edit-mode channel makes the suppressors claim both
//! hands, shutting out the HUD overlay pointers until it is switched off again.
//!
//! Run:
//! - `cargo run -p grasp_demos --example edit_mode_suppression`

use core::time::Duration;

use glam::Vec3;
use grasp_dispatch::config::EDIT_MODE_CHANNEL;
use grasp_dispatch::modules::{
    HudOverlayPointer, InVrEditMode, register_hud_overlay_pointers, register_in_vr_edit_mode,
};
use grasp_dispatch::scheduler::Dispatcher;
use grasp_dispatch::situation::{ControllerLocation, HudContext, HudRayPick, RayPick, Situation};
use grasp_utils::{Hand, HandPair, ObjectId};
use kurbo::{Point, Rect, Size};
use tracing::{info, warn};

const ME: ObjectId = ObjectId(7);

fn situation() -> Situation {
    let location = ControllerLocation {
        valid: true,
        position: Vec3::new(0.0, 1.2, 0.0),
        ..ControllerLocation::default()
    };
    let hud_pick = HudRayPick {
        intersects: true,
        intersection: Vec3::new(0.0, 1.5, -1.0),
        overlay_point: Point::new(400.0, 300.0),
    };
    Situation {
        controller_locations: Some(HandPair::splat(location)),
        trigger_values: Some(HandPair::new(0.0, 0.9)),
        trigger_clicks: Some(HandPair::new(false, true)),
        ray_picks: Some(HandPair::splat(RayPick::default())),
        hud_ray_picks: Some(HandPair::splat(hud_pick)),
        nearby_entity_properties: None,
        hud: Some(HudContext {
            viewport: Size::new(1920.0, 1080.0),
            desktop_windows: vec![Rect::new(100.0, 100.0, 900.0, 700.0)],
            tablet: None,
        }),
    }
}

fn main() {
    grasp_demos::init_logging();

    let mut dispatcher = Dispatcher::with_local_actor(ME);
    register_in_vr_edit_mode(&mut dispatcher);
    register_hud_overlay_pointers(&mut dispatcher);

    let situation = situation();
    let pointer = HudOverlayPointer::name(Hand::Right);
    let suppressor = InVrEditMode::name(Hand::Right);
    let mut now = Duration::ZERO;

    let messages = [None, Some("both"), None, Some("none"), None];
    for message in messages {
        if let Some(message) = message {
            match dispatcher.handle_message(EDIT_MODE_CHANNEL, message, ME) {
                Ok(_) => info!(message, "edit mode message queued"),
                Err(err) => warn!(%err, "edit mode message rejected"),
            }
        }
        let report = dispatcher.update(&situation, now);
        now += Duration::from_millis(150);
        info!(
            frame = report.frame,
            hud_pointer = report.is_active(pointer),
            suppressor = report.is_active(suppressor),
            "frame"
        );
    }

    // Only the local actor may switch suppression.
    if let Err(err) = dispatcher.handle_message(EDIT_MODE_CHANNEL, "both", ObjectId(99)) {
        info!(%err, "foreign sender ignored");
    }
}
