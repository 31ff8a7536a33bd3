// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: raw pointer notifications, gesture kinds, and the augmented
//! event handed to subscribers.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use kurbo::Point;

use crate::error::PointerError;

bitflags::bitflags! {
    /// Keyboard modifiers held while a raw pointer event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Control key.
        const CTRL  = 0b0000_0010;
        /// Alt / Option key.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows key.
        const META  = 0b0000_1000;
    }
}

/// A raw pointer notification as delivered by the host.
///
/// Hosts populate exactly one coordinate form depending on where the event came
/// from: `page` is document-relative and already includes the scroll offset,
/// `client` is viewport-relative and does not. An event with neither form is
/// still processed, but leaves the committed position untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawPointerEvent {
    /// Page-relative coordinates, when the host provides them.
    pub page: Option<Point>,
    /// Viewport-relative coordinates, used when `page` is absent.
    pub client: Option<Point>,
    /// Host button code (0 primary, 1 auxiliary, 2 secondary).
    pub button: u8,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

impl RawPointerEvent {
    /// An event carrying page-relative coordinates.
    pub fn from_page(x: f64, y: f64) -> Self {
        Self {
            page: Some(Point::new(x, y)),
            ..Self::default()
        }
    }

    /// An event carrying viewport-relative coordinates.
    pub fn from_client(x: f64, y: f64) -> Self {
        Self {
            client: Some(Point::new(x, y)),
            ..Self::default()
        }
    }

    /// Set the button code.
    #[must_use]
    pub fn with_button(mut self, button: u8) -> Self {
        self.button = button;
        self
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the host timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns `true` if neither coordinate form is populated.
    pub fn is_positionless(&self) -> bool {
        self.page.is_none() && self.client.is_none()
    }
}

/// Observation scope a raw event was captured at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Listeners bound to the surface itself.
    Surface,
    /// Listeners bound to the surrounding document or screen.
    Document,
}

/// Raw notification kinds the engine listens for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawKind {
    /// Pointer moved.
    Move,
    /// Button went down.
    Down,
    /// Button went up.
    Up,
    /// Pointer moved over some element (document scope only).
    Over,
    /// Host-level click (document scope only).
    Click,
}

/// Logical state of the single tracked button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ButtonState {
    /// Button is released.
    #[default]
    Up,
    /// Button is held.
    Down,
}

/// What the host should do with its default handling after a raw listener ran.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Propagation {
    /// Let the host continue with its default behavior.
    #[default]
    Continue,
    /// Suppress the host's default behavior (text selection, drag images, ...).
    PreventDefault,
}

/// Semantic gesture types delivered to subscribers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GestureKind {
    /// Pointer moved over the surface.
    Move,
    /// Pointer is over the surface.
    Enter,
    /// Pointer left the surface (check the force flag).
    Leave,
    /// Button pressed over the surface.
    Press,
    /// Button released.
    Release,
    /// Release completed a press cycle.
    Click,
    /// Pointer moved; consumers decide whether a drag is in progress.
    Drag,
}

impl GestureKind {
    /// Number of gesture kinds.
    pub const COUNT: usize = 7;

    /// All gesture kinds in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Move,
        Self::Enter,
        Self::Leave,
        Self::Press,
        Self::Release,
        Self::Click,
        Self::Drag,
    ];

    /// Canonical name of this gesture.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Enter => "enter",
            Self::Leave => "leave",
            Self::Press => "press",
            Self::Release => "release",
            Self::Click => "click",
            Self::Drag => "drag",
        }
    }

    /// Dense index used by per-kind tables.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GestureKind {
    type Err = PointerError;

    /// Parse a canonical gesture name or its DOM-style alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "move" | "mousemove" => Self::Move,
            "enter" | "mouseenter" => Self::Enter,
            "leave" | "mouseleave" => Self::Leave,
            "press" | "mousedown" => Self::Press,
            "release" | "mouseup" => Self::Release,
            "click" => Self::Click,
            "drag" => Self::Drag,
            other => return Err(PointerError::UnknownGesture(other.to_string())),
        })
    }
}

/// The augmented event passed to gesture handlers.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEvent {
    /// The gesture being delivered.
    pub kind: GestureKind,
    /// Surface-local position at dispatch time.
    pub position: Point,
    /// Normalized button code.
    pub which: u8,
    /// Modifiers held when the raw event was produced.
    pub modifiers: Modifiers,
    /// Host timestamp of the raw event.
    pub timestamp: u64,
    /// Position recorded at the last press, if a press cycle is in progress.
    pub press_origin: Option<Point>,
    /// The raw event this gesture was derived from.
    pub raw: RawPointerEvent,
}

impl GestureEvent {
    /// Surface-local x coordinate.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Surface-local y coordinate.
    pub fn y(&self) -> f64 {
        self.position.y
    }
}
