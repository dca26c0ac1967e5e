// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named module storage with a lazily rebuilt priority order.

use core::fmt;
use std::collections::HashMap;

use tracing::debug;

use crate::module::DispatcherModule;
use crate::types::ModuleParameters;

pub(crate) struct RegisteredModule {
    pub(crate) parameters: ModuleParameters,
    sequence: u64,
    pub(crate) module: Box<dyn DispatcherModule>,
}

/// Modules keyed by name.
///
/// Names are unique: registering an existing name replaces the module in place, keeping
/// its position among equal priorities. The priority order is rebuilt on the next
/// [`sorted_names`](Self::sorted_names) after any change.
#[derive(Default)]
pub struct ModuleRegistry {
    pub(crate) modules: HashMap<String, RegisteredModule>,
    pub(crate) order: Vec<String>,
    needs_sort: bool,
    next_sequence: u64,
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("order", &self.order)
            .field("len", &self.modules.len())
            .field("needs_sort", &self.needs_sort)
            .finish_non_exhaustive()
    }
}

impl ModuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `module` under `name`, replacing any module already there.
    ///
    /// The module's [`parameters`](DispatcherModule::parameters) are read once, here.
    pub fn register(&mut self, name: impl Into<String>, module: Box<dyn DispatcherModule>) {
        let name = name.into();
        let parameters = module.parameters();
        if let Some(existing) = self.modules.get_mut(&name) {
            debug!(module = %name, priority = parameters.priority, "replacing module");
            existing.parameters = parameters;
            existing.module = module;
        } else {
            debug!(module = %name, priority = parameters.priority, "registering module");
            let sequence = self.next_sequence;
            self.next_sequence += 1;
            self.modules.insert(
                name,
                RegisteredModule {
                    parameters,
                    sequence,
                    module,
                },
            );
        }
        self.needs_sort = true;
    }

    /// Remove the module named `name`, returning it. Absent names are ignored.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn DispatcherModule>> {
        self.needs_sort = true;
        let removed = self.modules.remove(name)?;
        debug!(module = %name, "unregistering module");
        Some(removed.module)
    }

    /// The module named `name`.
    pub fn lookup(&self, name: &str) -> Option<&dyn DispatcherModule> {
        self.modules.get(name).map(|entry| entry.module.as_ref())
    }

    /// The module named `name`, mutably.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut (dyn DispatcherModule + 'static)> {
        self.modules.get_mut(name).map(|entry| entry.module.as_mut())
    }

    /// Parameters recorded for `name` at registration.
    pub fn parameters(&self, name: &str) -> Option<&ModuleParameters> {
        self.modules.get(name).map(|entry| &entry.parameters)
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Returns `true` if the priority order is stale.
    pub fn needs_sort(&self) -> bool {
        self.needs_sort
    }

    /// Module names in ascending priority, ties in registration order.
    pub fn sorted_names(&mut self) -> &[String] {
        self.sort_if_needed();
        &self.order
    }

    pub(crate) fn sort_if_needed(&mut self) {
        if !self.needs_sort {
            return;
        }
        let mut keyed: Vec<(i32, u64, &String)> = self
            .modules
            .iter()
            .map(|(name, entry)| (entry.parameters.priority, entry.sequence, name))
            .collect();
        keyed.sort_unstable_by_key(|&(priority, sequence, _)| (priority, sequence));
        self.order = keyed.into_iter().map(|(_, _, name)| name.clone()).collect();
        self.needs_sort = false;
        debug!(order = ?self.order, "sorted modules");
    }
}
