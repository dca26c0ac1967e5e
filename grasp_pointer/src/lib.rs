// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grasp Pointer: hand laser state on top of a host ray-pick/render service.
//!
//! ## Overview
//!
//! A [`Pointer`](crate::pointer::Pointer) wraps one pointer resource in the host's
//! [`PointerService`](crate::service::PointerService) and tracks two bits of state:
//! whether it is visible, and which target, if any, its end is locked onto.
//! A [`PointerManager`](crate::manager::PointerManager) owns the service and an ordered list of
//! pointers addressed by index.
//!
//! ## States
//!
//! - Hidden: nothing is drawn.
//! - Visible: the render state follows the trigger. `full` while clicked, `half` above the
//!   trigger threshold, nothing below it.
//! - Locked: the end sticks to a target and the `hold` state is drawn.
//!
//! Locking only happens from the visible, unlocked state; the first lock wins until it is
//! cleared. See [`select_render_state`](crate::render::select_render_state).
//!
//! ## Lifetime
//!
//! Pointers are released all at once, by
//! [`PointerManager::remove_pointers`](crate::manager::PointerManager::remove_pointers) or when the
//! manager is dropped. There is no per-pointer removal.
//!
//! ## Adapters
//!
//! With the `dispatch_adapter` feature, `adapters::dispatch::apply_frame` drives pointers
//! from a `grasp_dispatch` frame report.

pub mod adapters;
pub mod manager;
pub mod pointer;
pub mod render;
pub mod service;
