// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher configuration.

use grasp_utils::ObjectId;
use serde::{Deserialize, Serialize};

/// Channel carrying edit-mode suppression payloads by default.
pub const EDIT_MODE_CHANNEL: &str = "Hifi-InVREdit-Disabler";

/// Settings for a [`Dispatcher`](crate::scheduler::Dispatcher).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// The only identity allowed to issue commands.
    pub local_actor: ObjectId,
    /// Message channel whose payloads are parsed as edit-mode suppression commands.
    pub edit_mode_channel: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            local_actor: ObjectId::NULL,
            edit_mode_channel: EDIT_MODE_CHANNEL.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config: DispatcherConfig = serde_json::from_str(r#"{ "local_actor": 42 }"#).unwrap();
        assert_eq!(config.local_actor, ObjectId(42));
        assert_eq!(config.edit_mode_channel, EDIT_MODE_CHANNEL);
    }
}
