// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame arbitration pass.
//!
//! ## Algorithm
//!
//! Each [`Dispatcher::update`]:
//!
//! 1. Rebuilds the priority order if the registry changed.
//! 2. Delivers queued commands to every module, in priority order. Throttles are reset on
//!    a frame that delivers commands.
//! 3. Walks modules from the lowest priority number up, with an empty claimed-slot set:
//!    - a module whose slots intersect the claimed set is [`Blocked`](Disposition::Blocked);
//!    - a module whose required situation fields are not populated is
//!      [`MissingData`](Disposition::MissingData);
//!    - a module whose sleep interval has not elapsed since its last successful `run` is
//!      [`Throttled`](Disposition::Throttled), and keeps its slots if it was running;
//!    - otherwise `is_ready` is asked, and on an active answer `run` is called, unless the
//!      answer's `required_for_run` fields are missing. An active `run` result claims the
//!      module's slots for the rest of the frame.
//!
//! Errors and malformed results from a module are logged and only cost that module its
//! claim for the frame.

use core::time::Duration;
use std::collections::HashMap;

use grasp_utils::{Hand, ObjectId};
use tracing::{debug, trace, warn};

use crate::command::{CommandError, DispatcherCommand, Suppression};
use crate::config::DispatcherConfig;
use crate::module::{DispatcherModule, ModuleContext, ModuleStatus};
use crate::registry::ModuleRegistry;
use crate::situation::Situation;
use crate::types::{ActivitySlots, ModuleError, RunResult, SituationFields};

/// What happened to one module in one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Disposition {
    /// `is_ready` was active and `run` returned this result.
    Ran(RunResult),
    /// `is_ready` was inactive.
    Idle,
    /// A higher-priority module already holds some of the module's slots.
    Blocked {
        /// The slots already claimed.
        contested: ActivitySlots,
    },
    /// Required situation fields were not populated.
    MissingData {
        /// The fields that were absent.
        missing: SituationFields,
    },
    /// The sleep interval has not elapsed; neither `is_ready` nor `run` was called.
    Throttled {
        /// The result carried over from the last run, if the module was running.
        held: Option<RunResult>,
    },
    /// `is_ready` or `run` failed, or returned a malformed result.
    Failed(ModuleError),
}

/// One module's entry in a [`FrameReport`].
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleOutcome {
    /// Registered name.
    pub name: String,
    /// What happened.
    pub disposition: Disposition,
    /// Slots the module holds for this frame.
    pub claimed: ActivitySlots,
    /// The module's laser binding.
    pub hand_laser: Option<usize>,
}

impl ModuleOutcome {
    /// The module's active result this frame, if it is active.
    pub fn active_result(&self) -> Option<&RunResult> {
        match &self.disposition {
            Disposition::Ran(result) if result.active => Some(result),
            Disposition::Throttled { held } => held.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if the module is active this frame.
    pub fn is_active(&self) -> bool {
        self.active_result().is_some()
    }
}

/// Everything the arbitration pass decided in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at `1`.
    pub frame: u64,
    /// One outcome per registered module, in priority order.
    pub outcomes: Vec<ModuleOutcome>,
    /// Union of all claimed slots.
    pub claimed: ActivitySlots,
}

impl FrameReport {
    /// Outcomes of active modules, in priority order.
    pub fn active(&self) -> impl Iterator<Item = &ModuleOutcome> {
        self.outcomes.iter().filter(|o| o.is_active())
    }

    /// The outcome for `name`.
    pub fn outcome(&self, name: &str) -> Option<&ModuleOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// Returns `true` if `name` is active this frame.
    pub fn is_active(&self, name: &str) -> bool {
        self.outcome(name).is_some_and(ModuleOutcome::is_active)
    }

    /// Name of the module holding every slot in `slot`.
    pub fn slot_owner(&self, slot: ActivitySlots) -> Option<&str> {
        self.outcomes
            .iter()
            .find(|o| !slot.is_empty() && o.claimed.contains(slot))
            .map(|o| o.name.as_str())
    }

    /// Slots of `hand` claimed this frame.
    pub fn claimed_for(&self, hand: Hand) -> ActivitySlots {
        self.claimed & ActivitySlots::all_for(hand)
    }
}

/// Owns the module registry and runs the arbitration pass.
pub struct Dispatcher {
    config: DispatcherConfig,
    registry: ModuleRegistry,
    statuses: HashMap<String, ModuleStatus>,
    pending: Vec<DispatcherCommand>,
    frame: u64,
    last_now: Option<Duration>,
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("pending", &self.pending)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatcherConfig::default())
    }
}

impl Dispatcher {
    /// An empty dispatcher.
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            config,
            registry: ModuleRegistry::new(),
            statuses: HashMap::new(),
            pending: Vec::new(),
            frame: 0,
            last_now: None,
        }
    }

    /// An empty dispatcher accepting commands from `local_actor`, otherwise default settings.
    pub fn with_local_actor(local_actor: ObjectId) -> Self {
        Self::new(DispatcherConfig {
            local_actor,
            ..DispatcherConfig::default()
        })
    }

    /// The configuration.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// The registered modules.
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Register `module` under `name`, replacing any module already there.
    ///
    /// A replacement starts with a fresh status.
    pub fn register(&mut self, name: impl Into<String>, module: Box<dyn DispatcherModule>) {
        let name = name.into();
        self.statuses.insert(name.clone(), ModuleStatus::default());
        self.registry.register(name, module);
    }

    /// Remove `name`. Its slots are free from the next frame on.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn DispatcherModule>> {
        self.statuses.remove(name);
        self.registry.unregister(name)
    }

    /// The module named `name`.
    pub fn lookup(&self, name: &str) -> Option<&dyn DispatcherModule> {
        self.registry.lookup(name)
    }

    /// The latest status of `name`.
    pub fn status(&self, name: &str) -> Option<&ModuleStatus> {
        self.statuses.get(name)
    }

    /// Returns `true` if `name`'s latest result was active.
    pub fn is_running(&self, name: &str) -> bool {
        self.statuses.get(name).is_some_and(|s| s.running)
    }

    /// Number of completed frames.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Commands waiting for the next frame.
    pub fn pending_commands(&self) -> &[DispatcherCommand] {
        &self.pending
    }

    /// Queue `command` from `sender` for delivery at the start of the next frame.
    ///
    /// Only the configured local actor may send commands.
    pub fn post_command(
        &mut self,
        sender: ObjectId,
        command: DispatcherCommand,
    ) -> Result<(), CommandError> {
        self.check_sender(sender)?;
        debug!(?command, "queued command");
        self.pending.push(command);
        Ok(())
    }

    /// Handle a raw message from the host's messaging layer.
    ///
    /// Messages on channels other than the configured edit-mode channel are ignored and
    /// return `Ok(false)`. On that channel, `"both"` and `"none"` queue an
    /// [`EditModeSuppression`](DispatcherCommand::EditModeSuppression) command.
    pub fn handle_message(
        &mut self,
        channel: &str,
        message: &str,
        sender: ObjectId,
    ) -> Result<bool, CommandError> {
        if channel != self.config.edit_mode_channel {
            return Ok(false);
        }
        self.check_sender(sender)?;
        let suppression: Suppression = message.parse()?;
        self.post_command(sender, DispatcherCommand::EditModeSuppression(suppression))?;
        Ok(true)
    }

    fn check_sender(&self, sender: ObjectId) -> Result<(), CommandError> {
        if sender == self.config.local_actor {
            return Ok(());
        }
        warn!(?sender, local = ?self.config.local_actor, "rejected command from foreign sender");
        Err(CommandError::ForeignSender {
            sender,
            local: self.config.local_actor,
        })
    }

    /// Run one arbitration pass over `situation`.
    ///
    /// `now` is a monotonic clock reading; it drives throttling and `delta_time`.
    pub fn update(&mut self, situation: &Situation, now: Duration) -> FrameReport {
        self.frame += 1;
        let frame = self.frame;
        let delta_time = self
            .last_now
            .map_or(0.0, |last| now.saturating_sub(last).as_secs_f32());
        self.last_now = Some(now);

        self.registry.sort_if_needed();
        self.deliver_commands();

        let available = situation.available_fields();
        let mut claimed = ActivitySlots::empty();
        let mut outcomes = Vec::with_capacity(self.registry.order.len());

        let modules = &mut self.registry.modules;
        for name in &self.registry.order {
            let Some(entry) = modules.get_mut(name) else {
                continue;
            };
            let params = &entry.parameters;
            let last_run_at = self.statuses.get(name).and_then(|s| s.last_run_at);

            let contested = params.activity_slots & claimed;
            let disposition = if !contested.is_empty() {
                Disposition::Blocked { contested }
            } else if !available.contains(params.required_fields) {
                Disposition::MissingData {
                    missing: params.required_fields.difference(available),
                }
            } else if last_run_at.is_some_and(|at| now.saturating_sub(at) < params.sleep_between_runs) {
                let held = self
                    .statuses
                    .get(name)
                    .filter(|s| s.running)
                    .map(|s| s.last_result.clone());
                Disposition::Throttled { held }
            } else {
                let mut ctx = ModuleContext::new(frame, &self.statuses, claimed, &mut self.pending);
                evaluate(entry.module.as_mut(), situation, available, delta_time, &mut ctx)
            };

            let module_claim = match &disposition {
                Disposition::Ran(result) => {
                    self.statuses.insert(
                        name.clone(),
                        ModuleStatus {
                            running: result.active,
                            last_result: result.clone(),
                            last_run_at: Some(now),
                        },
                    );
                    if result.active {
                        params.activity_slots
                    } else {
                        ActivitySlots::empty()
                    }
                }
                Disposition::Throttled { held } => {
                    if held.is_some() {
                        params.activity_slots
                    } else {
                        ActivitySlots::empty()
                    }
                }
                other => {
                    if let Disposition::Failed(err) = other {
                        warn!(module = %name, frame, error = %err, "module failed");
                    }
                    self.statuses.insert(
                        name.clone(),
                        ModuleStatus {
                            running: false,
                            last_result: RunResult::inactive(),
                            last_run_at,
                        },
                    );
                    ActivitySlots::empty()
                }
            };
            trace!(module = %name, frame, ?disposition, claimed = ?module_claim, "arbitrated");

            claimed |= module_claim;
            outcomes.push(ModuleOutcome {
                name: name.clone(),
                disposition,
                claimed: module_claim,
                hand_laser: params.hand_laser,
            });
        }

        FrameReport {
            frame,
            outcomes,
            claimed,
        }
    }

    fn deliver_commands(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let commands = core::mem::take(&mut self.pending);
        for name in &self.registry.order {
            if let Some(entry) = self.registry.modules.get_mut(name) {
                for command in &commands {
                    entry.module.on_command(command);
                }
            }
        }
        // A command can change readiness, so nobody stays throttled on a command frame.
        for status in self.statuses.values_mut() {
            status.last_run_at = None;
        }
        debug!(count = commands.len(), "delivered commands");
    }
}

fn evaluate(
    module: &mut dyn DispatcherModule,
    situation: &Situation,
    available: SituationFields,
    delta_time: f32,
    ctx: &mut ModuleContext<'_>,
) -> Disposition {
    let ready = match well_formed(module.is_ready(situation, ctx)) {
        Ok(ready) => ready,
        Err(err) => return Disposition::Failed(err),
    };
    if !ready.active {
        return Disposition::Idle;
    }
    let missing = ready.required_for_run.difference(available);
    if !missing.is_empty() {
        return Disposition::MissingData { missing };
    }
    match well_formed(module.run(situation, delta_time, ctx)) {
        Ok(result) => Disposition::Ran(result),
        Err(err) => Disposition::Failed(err),
    }
}

fn well_formed(result: Result<RunResult, ModuleError>) -> Result<RunResult, ModuleError> {
    let result = result?;
    if result.is_well_formed() {
        Ok(result)
    } else {
        Err(ModuleError::MalformedResult(
            "inactive result carries targets or a laser lock",
        ))
    }
}
