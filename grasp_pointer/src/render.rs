// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render states and the visuals behind them.

use core::fmt;

use glam::Vec3;
use grasp_utils::consts::{
    COLORS_GRAB_DISTANCE_HOLD, COLORS_GRAB_SEARCHING_FULL_SQUEEZE,
    COLORS_GRAB_SEARCHING_HALF_SQUEEZE, DEFAULT_SEARCH_SPHERE_DISTANCE, Rgb8, TRIGGER_ON_VALUE,
};
use serde::{Deserialize, Serialize};

/// A named visual configuration of a pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderState {
    /// Trigger partly squeezed.
    Half,
    /// Trigger clicked.
    Full,
    /// End locked onto a target.
    Hold,
}

impl RenderState {
    /// All states, in the order they are handed to the pointer service.
    pub const ALL: [Self; 3] = [Self::Half, Self::Full, Self::Hold];

    /// The name the pointer service knows the state by.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Half => "half",
            Self::Full => "full",
            Self::Hold => "hold",
        }
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the render state from pointer and trigger state.
///
/// `None` hides the pointer geometry, even while the pointer is logically visible.
///
/// ```
/// use grasp_pointer::render::{select_render_state, RenderState};
///
/// assert_eq!(select_render_state(true, true, false, 0.0, 0.15), Some(RenderState::Hold));
/// assert_eq!(select_render_state(true, false, true, 1.0, 0.15), Some(RenderState::Full));
/// assert_eq!(select_render_state(true, false, false, 0.5, 0.15), Some(RenderState::Half));
/// assert_eq!(select_render_state(true, false, false, 0.1, 0.15), None);
/// assert_eq!(select_render_state(false, true, true, 1.0, 0.15), None);
/// ```
pub fn select_render_state(
    visible: bool,
    locked: bool,
    trigger_clicked: bool,
    trigger_value: f32,
    trigger_on_value: f32,
) -> Option<RenderState> {
    if !visible {
        None
    } else if locked {
        Some(RenderState::Hold)
    } else if trigger_clicked {
        Some(RenderState::Full)
    } else if trigger_value > trigger_on_value {
        Some(RenderState::Half)
    } else {
        None
    }
}

/// Line drawn from the hand to the pointer end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathVisual {
    /// Line color.
    pub color: Rgb8,
    /// Opacity.
    pub alpha: f32,
    /// Glow amount.
    pub glow: f32,
    /// Draw on top of geometry that would hide it.
    pub draw_in_front: bool,
    /// Draw in the HUD layer.
    pub draw_hud_layer: bool,
}

/// Sphere drawn at the pointer end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EndVisual {
    /// Sphere color.
    pub color: Rgb8,
    /// Opacity.
    pub alpha: f32,
    /// Sphere size.
    pub dimensions: Vec3,
    /// Draw on top of geometry that would hide it.
    pub draw_in_front: bool,
    /// Draw in the HUD layer.
    pub draw_hud_layer: bool,
}

/// The visuals of one render state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderStyle {
    /// Which state this is.
    pub state: RenderState,
    /// The line.
    pub path: PathVisual,
    /// The end sphere, if the state draws one.
    pub end: Option<EndVisual>,
    /// Length of the line when nothing is hit; `None` for hit-driven states.
    pub distance: Option<f32>,
}

/// Tunables shared by every pointer a manager creates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerStyle {
    /// Edge length of the end sphere.
    pub search_sphere_size: f32,
    /// Line length when nothing is hit.
    pub default_distance: f32,
    /// Trigger value above which the `half` state shows.
    pub trigger_on_value: f32,
}

impl Default for PointerStyle {
    fn default() -> Self {
        Self {
            search_sphere_size: 0.0132,
            default_distance: DEFAULT_SEARCH_SPHERE_DISTANCE,
            trigger_on_value: TRIGGER_ON_VALUE,
        }
    }
}

impl PointerStyle {
    fn path(color: Rgb8, hud_layer: bool) -> PathVisual {
        PathVisual {
            color,
            alpha: 1.0,
            glow: 1.0,
            draw_in_front: !hud_layer,
            draw_hud_layer: hud_layer,
        }
    }

    fn end(&self, color: Rgb8, hud_layer: bool) -> EndVisual {
        EndVisual {
            color,
            alpha: 0.9,
            dimensions: Vec3::splat(self.search_sphere_size),
            draw_in_front: !hud_layer,
            draw_hud_layer: hud_layer,
        }
    }

    fn color(state: RenderState) -> Rgb8 {
        match state {
            RenderState::Half => COLORS_GRAB_SEARCHING_HALF_SQUEEZE,
            RenderState::Full => COLORS_GRAB_SEARCHING_FULL_SQUEEZE,
            RenderState::Hold => COLORS_GRAB_DISTANCE_HOLD,
        }
    }

    /// Visuals used when the pick hits something. `hold` draws no end sphere.
    pub fn render_states(&self, hud_layer: bool) -> [RenderStyle; 3] {
        RenderState::ALL.map(|state| RenderStyle {
            state,
            path: Self::path(Self::color(state), hud_layer),
            end: (state != RenderState::Hold).then(|| self.end(Self::color(state), hud_layer)),
            distance: None,
        })
    }

    /// Visuals used when the pick hits nothing: lines of [`default_distance`](Self::default_distance).
    pub fn default_render_states(&self, hud_layer: bool) -> [RenderStyle; 3] {
        RenderState::ALL.map(|state| RenderStyle {
            state,
            path: Self::path(Self::color(state), hud_layer),
            end: None,
            distance: Some(self.default_distance),
        })
    }
}
