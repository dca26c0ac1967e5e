// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Grasp crates.
//!
//! Enabled via feature flags so the pointer crate does not depend on the dispatcher by default.

#[cfg(feature = "dispatch_adapter")]
pub mod dispatch;
