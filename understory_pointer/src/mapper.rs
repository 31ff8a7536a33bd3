// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate mapping from host coordinates to surface-local coordinates.
//!
//! Hosts report pointer positions either relative to the page (scroll already
//! folded in) or relative to the viewport (scroll not folded in). The surface
//! reports its own bounding rectangle in viewport space. [`map_to_surface`]
//! reconciles the two into a position measured from the surface's top-left
//! corner.
//!
//! The rectangle origin is rounded to whole pixels before subtraction, so a
//! surface laid out at a fractional offset still yields integral local
//! coordinates for integral input.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use understory_pointer::mapper::map_to_surface;
//! use understory_pointer::types::RawPointerEvent;
//!
//! let bounds = Rect::new(10.0, 20.0, 110.0, 120.0);
//! let raw = RawPointerEvent::from_page(15.0, 25.0);
//! assert_eq!(map_to_surface(&raw, bounds, Vec2::ZERO), Some(Point::new(5.0, 5.0)));
//!
//! // No coordinates: nothing to map, the caller keeps its previous position.
//! assert_eq!(map_to_surface(&RawPointerEvent::default(), bounds, Vec2::ZERO), None);
//! ```

use kurbo::{Point, Rect, Vec2};

use crate::types::RawPointerEvent;

/// Map a raw event into surface-local coordinates.
///
/// Page-relative coordinates are preferred when present and have the scroll
/// offset subtracted; viewport-relative coordinates are used otherwise and
/// have the scroll offset added. Returns `None` when the event carries neither
/// coordinate form.
pub fn map_to_surface(raw: &RawPointerEvent, bounds: Rect, scroll: Vec2) -> Option<Point> {
    let origin = bounds.origin().round().to_vec2();
    match (raw.page, raw.client) {
        (Some(page), _) => Some(page - scroll - origin),
        (None, Some(client)) => Some(client + scroll - origin),
        (None, None) => None,
    }
}
