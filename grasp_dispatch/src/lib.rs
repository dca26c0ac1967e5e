// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grasp Dispatch: deterministic, priority-ordered arbitration of controller input modules.
//!
//! ## Overview
//!
//! A VR client runs many small behaviors against the same two hand controllers: lasers,
//! near grabs, distance grabs, teleport, HUD pointers, and editors that take the controllers
//! over. Each behavior is a [`DispatcherModule`](crate::module::DispatcherModule). Once per frame
//! the [`Dispatcher`](crate::scheduler::Dispatcher) decides which modules may act.
//!
//! ## Modules
//!
//! A module declares [`ModuleParameters`](crate::types::ModuleParameters) once, at registration:
//! a priority (lower runs earlier), the [`ActivitySlots`](crate::types::ActivitySlots) it needs
//! exclusively, the [`SituationFields`](crate::types::SituationFields) it reads, a minimum
//! interval between runs, and optionally the laser it drives.
//! Every frame it answers `is_ready` and, when ready, `run`, both with a
//! [`RunResult`](crate::types::RunResult).
//!
//! ## Arbitration
//!
//! Modules are visited in priority order, ties in registration order. The first active
//! module to declare a slot holds it for the rest of the frame, so two modules with
//! overlapping slots are never active together. See [`scheduler`] for the full pass.
//! Given the same registry, the same [`Situation`](crate::situation::Situation) and the same
//! clock readings, the pass produces the same [`FrameReport`](crate::scheduler::FrameReport).
//!
//! ## Commands
//!
//! Modules talk to each other through [`DispatcherCommand`](crate::command::DispatcherCommand)s
//! queued on the dispatcher and delivered at the start of the next frame. Only the configured
//! local actor may issue them.
//!
//! ## Layering
//!
//! The dispatcher does not gather input and does not draw. The host fills in the
//! [`Situation`](crate::situation::Situation) snapshot; the frame report can be applied to
//! pointers by the `grasp_pointer` crate.
//!
//! # Example
//!
//! ```rust
//! use core::time::Duration;
//! use grasp_dispatch::module::{DispatcherModule, ModuleContext};
//! use grasp_dispatch::scheduler::Dispatcher;
//! use grasp_dispatch::situation::Situation;
//! use grasp_dispatch::types::{ActivitySlots, ModuleError, ModuleParameters, RunResult, SituationFields};
//!
//! struct Always(i32);
//!
//! impl DispatcherModule for Always {
//!     fn parameters(&self) -> ModuleParameters {
//!         ModuleParameters::new(self.0, ActivitySlots::RIGHT_HAND, SituationFields::empty(), 0)
//!     }
//!     fn is_ready(&mut self, _: &Situation, _: &mut ModuleContext<'_>) -> Result<RunResult, ModuleError> {
//!         Ok(RunResult::active())
//!     }
//!     fn run(&mut self, _: &Situation, _: f32, _: &mut ModuleContext<'_>) -> Result<RunResult, ModuleError> {
//!         Ok(RunResult::active())
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::default();
//! dispatcher.register("A", Box::new(Always(100)));
//! dispatcher.register("B", Box::new(Always(50)));
//!
//! let report = dispatcher.update(&Situation::default(), Duration::ZERO);
//! assert!(report.is_active("B"));
//! assert!(!report.is_active("A"));
//! assert_eq!(report.slot_owner(ActivitySlots::RIGHT_HAND), Some("B"));
//! ```

pub mod command;
pub mod config;
pub mod module;
pub mod modules;
pub mod registry;
pub mod scheduler;
pub mod situation;
pub mod types;
