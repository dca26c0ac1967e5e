// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The module protocol and the context modules see while they are evaluated.

use core::time::Duration;
use std::collections::HashMap;

use crate::command::DispatcherCommand;
use crate::situation::Situation;
use crate::types::{ActivitySlots, ModuleError, ModuleParameters, RunResult};

/// A behavior arbitrated by the [`Dispatcher`](crate::scheduler::Dispatcher).
///
/// Each frame the scheduler asks [`is_ready`](Self::is_ready) and, if the answer is active,
/// calls [`run`](Self::run). Both return a [`RunResult`]; an `Err` skips the module for the
/// frame without affecting any other module.
pub trait DispatcherModule {
    /// Scheduling requirements. Read once, at registration.
    fn parameters(&self) -> ModuleParameters;

    /// Decide whether the module wants to act this frame.
    fn is_ready(
        &mut self,
        situation: &Situation,
        ctx: &mut ModuleContext<'_>,
    ) -> Result<RunResult, ModuleError>;

    /// Act. `delta_time` is in seconds since the previous frame.
    fn run(
        &mut self,
        situation: &Situation,
        delta_time: f32,
        ctx: &mut ModuleContext<'_>,
    ) -> Result<RunResult, ModuleError>;

    /// React to a queued command. The default ignores it.
    fn on_command(&mut self, command: &DispatcherCommand) {
        let _ = command;
    }
}

/// What the scheduler remembers about a module between evaluations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleStatus {
    /// Whether the module's latest result was active.
    pub running: bool,
    /// The latest result.
    pub last_result: RunResult,
    /// Clock reading of the last successful `run`.
    pub last_run_at: Option<Duration>,
}

/// The view of the dispatcher handed to a module while it is evaluated.
///
/// Status queries reflect this frame for modules evaluated earlier in the priority order,
/// and the previous frame for the rest.
#[derive(Debug)]
pub struct ModuleContext<'a> {
    pub(crate) frame: u64,
    pub(crate) statuses: &'a HashMap<String, ModuleStatus>,
    pub(crate) claimed: ActivitySlots,
    pub(crate) outbox: &'a mut Vec<DispatcherCommand>,
}

impl<'a> ModuleContext<'a> {
    /// Build a context over `statuses`, collecting emitted commands in `outbox`.
    ///
    /// The scheduler builds these itself; this is for driving a module directly.
    pub fn new(
        frame: u64,
        statuses: &'a HashMap<String, ModuleStatus>,
        claimed: ActivitySlots,
        outbox: &'a mut Vec<DispatcherCommand>,
    ) -> Self {
        Self {
            frame,
            statuses,
            claimed,
            outbox,
        }
    }

    /// The frame number being evaluated.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Returns `true` if a module named `name` is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.statuses.contains_key(name)
    }

    /// Returns `true` if `name` is registered and its latest result was active.
    pub fn is_running(&self, name: &str) -> bool {
        self.statuses.get(name).is_some_and(|s| s.running)
    }

    /// The latest result of `name`.
    pub fn result_of(&self, name: &str) -> Option<&RunResult> {
        self.statuses.get(name).map(|s| &s.last_result)
    }

    /// Slots already claimed this frame.
    pub fn claimed(&self) -> ActivitySlots {
        self.claimed
    }

    /// Queue a command for delivery at the start of the next frame.
    pub fn emit(&mut self, command: DispatcherCommand) {
        self.outbox.push(command);
    }
}
