// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-module commands.
//!
//! Commands are queued on the [`Dispatcher`](crate::scheduler::Dispatcher), either by the host
//! ([`post_command`](crate::scheduler::Dispatcher::post_command),
//! [`handle_message`](crate::scheduler::Dispatcher::handle_message)) or by a module through
//! [`ModuleContext::emit`](crate::module::ModuleContext::emit). Every queued command is handed to
//! every module's [`on_command`](crate::module::DispatcherModule::on_command) at the start of the
//! next [`update`](crate::scheduler::Dispatcher::update).

use core::fmt;
use core::str::FromStr;

use grasp_utils::ObjectId;

/// Whether the edit-mode modules suppress other modules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Suppression {
    /// Suppress on both hands (`"both"`).
    Both,
    /// No suppression (`"none"`).
    Off,
}

impl Suppression {
    /// Message payload for this state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::Off => "none",
        }
    }
}

impl fmt::Display for Suppression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Suppression {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(Self::Both),
            "none" => Ok(Self::Off),
            other => Err(CommandError::UnknownCommand(other.to_owned())),
        }
    }
}

/// A command delivered to every registered module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatcherCommand {
    /// Toggle the edit-mode suppressors.
    EditModeSuppression(Suppression),
}

/// A rejected command.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Only the local actor may issue commands.
    #[error("command from {sender:?} rejected; only {local:?} may send commands")]
    ForeignSender {
        /// Who sent the command.
        sender: ObjectId,
        /// The local actor.
        local: ObjectId,
    },
    /// The payload does not name a known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppression_payloads() {
        assert_eq!("both".parse::<Suppression>(), Ok(Suppression::Both));
        assert_eq!("none".parse::<Suppression>(), Ok(Suppression::Off));
        assert_eq!(Suppression::Off.to_string(), "none");
        assert_eq!(
            "left".parse::<Suppression>(),
            Err(CommandError::UnknownCommand("left".to_owned()))
        );
    }
}
