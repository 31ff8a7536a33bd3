// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-scope observer: reconcile events the surface never sees.
//!
//! Surface-scope listeners stop receiving events once the pointer leaves the
//! surface. A press that is dragged off the surface and released elsewhere
//! would then never produce `Release`/`Click`, and leaving the surface would
//! never be reported. The observer listens at document scope and feeds those
//! transitions back into the same [`GestureDispatcher`]:
//!
//! | Raw event (document scope) | Guard | Effect |
//! |---|---|---|
//! | up | button down and pointer not on the surface | replay the surface release |
//! | over | pointer not on the surface | deliver `Leave` with the force flag set |
//! | click | pointer not on the surface | clear surface focus |
//!
//! Every document event is recorded as the last raw event, whether or not its
//! guard passes. A release inside the surface is left to the surface listener,
//! which has already set the button up by the time the document sees it.
//!
//! The observer holds a weak reference; once the engine is dropped every
//! method returns [`PointerError::Detached`].

use alloc::rc::{Rc, Weak};

use crate::dispatcher::GestureDispatcher;
use crate::error::PointerError;
use crate::types::{ButtonState, GestureKind, RawKind, RawPointerEvent};

/// Document-scope listener set for one surface.
#[derive(Clone, Debug)]
pub struct DocumentObserver {
    dispatcher: Weak<GestureDispatcher>,
}

impl DocumentObserver {
    /// Observe on behalf of `dispatcher`.
    pub fn new(dispatcher: &Rc<GestureDispatcher>) -> Self {
        Self {
            dispatcher: Rc::downgrade(dispatcher),
        }
    }

    fn upgrade(&self) -> Result<Rc<GestureDispatcher>, PointerError> {
        self.dispatcher.upgrade().ok_or(PointerError::Detached)
    }

    /// Route a document-scope notification to the matching reconciliation.
    ///
    /// Kinds with no document-scope meaning (`Move`, `Down`) are ignored.
    pub fn observe(&self, kind: RawKind, raw: &RawPointerEvent) -> Result<bool, PointerError> {
        match kind {
            RawKind::Up => self.release(raw),
            RawKind::Over => self.pointer_over(raw),
            RawKind::Click => self.click(raw),
            RawKind::Move | RawKind::Down => Ok(false),
        }
    }

    /// Document-scope button release.
    ///
    /// Returns `true` if the release was replayed into the surface.
    pub fn release(&self, raw: &RawPointerEvent) -> Result<bool, PointerError> {
        let d = self.upgrade()?;
        d.record(raw);
        let held = d.state().button() == ButtonState::Down;
        if held && !d.is_on_surface(Some(raw)) {
            tracing::debug!("release outside surface, replaying");
            d.surface_release(raw);
            return Ok(true);
        }
        Ok(false)
    }

    /// Document-scope pointer-over.
    ///
    /// Returns `true` if a forced `Leave` was delivered.
    pub fn pointer_over(&self, raw: &RawPointerEvent) -> Result<bool, PointerError> {
        let d = self.upgrade()?;
        d.record(raw);
        if d.is_on_surface(Some(raw)) {
            return Ok(false);
        }
        d.dispatch(GestureKind::Leave, raw, true);
        Ok(true)
    }

    /// Document-scope click.
    ///
    /// Returns `true` if surface focus was cleared.
    pub fn click(&self, raw: &RawPointerEvent) -> Result<bool, PointerError> {
        let d = self.upgrade()?;
        d.record(raw);
        if d.is_on_surface(Some(raw)) {
            return Ok(false);
        }
        d.clear_focus();
        Ok(true)
    }
}
