// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use kurbo::Point;

const DEFAULT_SENTINEL: Point = Point::new(-10.0, -10.0);

/// Tunables for a [`Pointer`](crate::Pointer).
///
/// The press sentinel must lie outside every valid surface rectangle, i.e. be
/// negative on at least one axis. Fields are only reachable through the
/// builder methods, which enforce that.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerConfig {
    press_sentinel: Point,
    prevent_default_on_press: bool,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            press_sentinel: DEFAULT_SENTINEL,
            prevent_default_on_press: true,
        }
    }
}

impl PointerConfig {
    /// Use a different sentinel press origin.
    ///
    /// Sentinels that could land inside a surface are replaced by the default.
    #[must_use]
    pub fn with_press_sentinel(mut self, sentinel: Point) -> Self {
        self.press_sentinel = out_of_bounds_sentinel(sentinel);
        self
    }

    /// Choose whether surface presses suppress host default handling.
    #[must_use]
    pub fn with_prevent_default_on_press(mut self, prevent: bool) -> Self {
        self.prevent_default_on_press = prevent;
        self
    }

    /// Position stored as the press origin while no press cycle is active.
    pub fn press_sentinel(&self) -> Point {
        self.press_sentinel
    }

    /// Whether a surface press asks the host to suppress its default handling.
    pub fn prevent_default_on_press(&self) -> bool {
        self.prevent_default_on_press
    }
}

/// `sentinel` if it can never be inside a surface, the default otherwise.
pub(crate) fn out_of_bounds_sentinel(sentinel: Point) -> Point {
    if sentinel.x < 0.0 || sentinel.y < 0.0 {
        sentinel
    } else {
        tracing::warn!(x = sentinel.x, y = sentinel.y, "in-bounds press sentinel replaced");
        DEFAULT_SENTINEL
    }
}
