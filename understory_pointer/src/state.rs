// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutable record of the single tracked pointer.

use kurbo::Point;

use crate::config::out_of_bounds_sentinel;
use crate::types::{ButtonState, RawPointerEvent};

/// Where the pointer is and what it is doing, relative to one surface.
///
/// Only the [`GestureDispatcher`](crate::dispatcher::GestureDispatcher) mutates
/// this record. `hovered` is a cache of the most recent hit test and has no
/// public setter.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerState {
    pub(crate) position: Point,
    pub(crate) button: ButtonState,
    pub(crate) focused: bool,
    pub(crate) hovered: bool,
    pub(crate) press_origin: Point,
    pub(crate) last_raw: Option<RawPointerEvent>,
    sentinel: Point,
}

impl PointerState {
    /// Create a fresh state with no press cycle in progress.
    ///
    /// A `sentinel` that could lie inside a surface is replaced by the default
    /// one, so a real press origin is never mistaken for it.
    pub fn new(sentinel: Point) -> Self {
        let sentinel = out_of_bounds_sentinel(sentinel);
        Self {
            position: Point::ZERO,
            button: ButtonState::Up,
            focused: false,
            hovered: false,
            press_origin: sentinel,
            last_raw: None,
            sentinel,
        }
    }

    /// Last committed surface-local position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Logical button state.
    pub fn button(&self) -> ButtonState {
        self.button
    }

    /// Whether the surface holds logical input focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Result of the most recent hit test.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Position recorded at the last press, or `None` when no press cycle is active.
    pub fn press_origin(&self) -> Option<Point> {
        (self.press_origin != self.sentinel).then_some(self.press_origin)
    }

    /// The most recent raw event observed at either scope.
    pub fn last_raw_event(&self) -> Option<&RawPointerEvent> {
        self.last_raw.as_ref()
    }

    /// Commit a mapped position; `None` keeps the previous one.
    pub(crate) fn commit(&mut self, mapped: Option<Point>) {
        if let Some(pos) = mapped {
            self.position = pos;
        }
    }

    pub(crate) fn record(&mut self, raw: &RawPointerEvent) {
        self.last_raw = Some(raw.clone());
    }

    /// Drop any press correlation.
    pub(crate) fn reset_press(&mut self) {
        self.press_origin = self.sentinel;
    }
}
