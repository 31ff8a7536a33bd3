// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary test for the surface rectangle.
//!
//! The surface occupies `(0, 0)..(width, height)` in local coordinates. A
//! position counts as inside only when it lies strictly within that range on
//! both axes; positions exactly on an edge are outside.
//!
//! The hover bookkeeping that accompanies a hit test lives on
//! [`Pointer::is_on_surface`](crate::Pointer::is_on_surface); this module is the
//! pure predicate.

use kurbo::{Point, Size};

/// Returns `true` if `pos` lies strictly inside a surface of the given size.
pub fn is_inside(pos: Point, size: Size) -> bool {
    pos.x > 0.0 && pos.x < size.width && pos.y > 0.0 && pos.y < size.height
}
