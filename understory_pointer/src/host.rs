// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the host environment.
//!
//! The engine does not own a window, a scene graph, or an event loop. It
//! consumes a few narrow collaborators:
//!
//! - [`Surface`]: geometry of the interactive surface and a cursor toggle.
//! - [`EventAugmenter`]: builds the base [`GestureEvent`] for a raw event.
//! - [`Host`]: accepts raw listeners at surface and document scope and a
//!   [`PointerDeclaration`] used for device classification.

use alloc::boxed::Box;

use kurbo::{Point, Rect, Vec2};

use crate::cursor::CursorStyle;
use crate::types::{GestureEvent, GestureKind, Propagation, RawKind, RawPointerEvent, Scope};

/// The interactive surface as seen by the engine.
pub trait Surface {
    /// Current bounding rectangle of the surface, in viewport coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Current document scroll offset.
    fn scroll_offset(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Apply a cursor style to the surface.
    fn set_cursor(&self, style: CursorStyle);
}

/// Builds the base event object handed to gesture handlers.
///
/// The engine overwrites `kind`, `position`, `which` and `press_origin` on
/// whatever is returned. Every other field is delivered as built.
pub trait EventAugmenter {
    /// Build a gesture event for `raw` being delivered as `kind`.
    fn augment(&self, raw: &RawPointerEvent, kind: GestureKind) -> GestureEvent;
}

/// Augmenter that copies modifiers, button and timestamp from the raw event.
#[derive(Copy, Clone, Debug, Default)]
pub struct BasicAugmenter;

impl EventAugmenter for BasicAugmenter {
    fn augment(&self, raw: &RawPointerEvent, kind: GestureKind) -> GestureEvent {
        GestureEvent {
            kind,
            position: Point::ZERO,
            which: raw.button,
            modifiers: raw.modifiers,
            timestamp: raw.timestamp,
            press_origin: None,
            raw: raw.clone(),
        }
    }
}

/// A raw listener registered with the host.
pub type RawListener = Box<dyn FnMut(&RawPointerEvent) -> Propagation>;

/// Capabilities of the current input device, as classified by the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// The device delivers touch input.
    pub touch: bool,
}

/// What the engine tells the host about the input it can service.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointerDeclaration {
    /// Name the host files this input kind under.
    pub name: &'static str,
    /// Gesture kinds the engine services.
    pub gestures: &'static [GestureKind],
}

impl PointerDeclaration {
    /// The declaration made by [`Pointer`](crate::Pointer).
    ///
    /// `Drag` is delivered but not declared: hosts only route the listed kinds
    /// through device classification.
    pub const MOUSE: Self = Self {
        name: "mouse",
        gestures: &[
            GestureKind::Move,
            GestureKind::Enter,
            GestureKind::Leave,
            GestureKind::Press,
            GestureKind::Release,
            GestureKind::Click,
        ],
    };

    /// Decide whether pointer-style input should be activated for `kind` on a
    /// device with the given capabilities.
    ///
    /// Returns the capability the host should register, always
    /// [`GestureKind::Click`], or `None` when touch input should be used instead
    /// or `kind` is not serviced.
    pub fn should_activate(
        &self,
        kind: GestureKind,
        caps: &DeviceCapabilities,
    ) -> Option<GestureKind> {
        (self.gestures.contains(&kind) && !caps.touch).then_some(GestureKind::Click)
    }
}

/// A host able to deliver raw pointer notifications.
pub trait Host {
    /// Register `listener` for `kind` notifications at `scope`.
    fn listen(&mut self, scope: Scope, kind: RawKind, listener: RawListener);

    /// Record which gestures the engine services.
    fn declare_pointer(&mut self, declaration: PointerDeclaration) {
        let _ = declaration;
    }
}
