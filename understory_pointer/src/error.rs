// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced synchronously to callers of the pointer engine.

use alloc::string::String;

/// Errors returned by the pointer engine.
///
/// Most failure modes in the engine are local and silent: a raw event with no
/// coordinates keeps the previous position, and removing a stale subscription
/// is a no-op. Only the cases below reach the caller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PointerError {
    /// A gesture was named that the engine does not service.
    #[error("unknown gesture type `{0}`")]
    UnknownGesture(String),
    /// The pointer has already been wired into a host.
    #[error("pointer is already initialized for this surface")]
    AlreadyInitialized,
    /// The engine behind a weak handle has been dropped.
    #[error("pointer engine has been dropped")]
    Detached,
}
