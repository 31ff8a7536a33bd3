// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture dispatcher: turn surface-scope raw events into gestures.
//!
//! The dispatcher owns the [`PointerState`] and the [`EventRegistry`] and
//! applies these transitions:
//!
//! | Raw event (surface scope) | Effect |
//! |---|---|
//! | move | commit position, mark hovered, deliver `Enter`, `Move`, `Leave` (unforced), `Drag` |
//! | down | focus the surface, set the button down, record the press origin, deliver `Press` |
//! | up | set the button up, deliver `Release` then `Click`, clear the press origin |
//!
//! Every move broadcasts `Enter` and `Leave` regardless of direction. A genuine
//! boundary exit is only reported through the document scope (see
//! [`DocumentObserver`](crate::document::DocumentObserver)) and carries the force
//! flag; `Leave` handlers should look at the flag, not the kind alone.
//!
//! `Click` follows every release. There is no check that the press and the
//! release happened at the same place; consumers that want stricter click
//! semantics can compare [`GestureEvent::press_origin`] with the position.
//!
//! ## Reentrancy
//!
//! State and registry borrows are never held while a handler runs. Handlers may
//! query the pointer, subscribe, or unsubscribe; such changes apply to later
//! deliveries only.

use alloc::boxed::Box;
use core::cell::{Cell, Ref, RefCell};
use core::fmt;

use kurbo::{Point, Size};

use crate::config::PointerConfig;
use crate::cursor::CursorStyle;
use crate::error::PointerError;
use crate::hit::is_inside;
use crate::host::{BasicAugmenter, EventAugmenter, Surface};
use crate::mapper::map_to_surface;
use crate::registry::{EventRegistry, SubscriptionId, parse_kind};
use crate::state::PointerState;
use crate::types::{ButtonState, GestureEvent, GestureKind, Propagation, RawPointerEvent};

/// Supplies a current surface dimension.
pub type DimensionProvider = Box<dyn Fn() -> f64>;

/// The gesture state machine for one surface.
pub struct GestureDispatcher {
    state: RefCell<PointerState>,
    registry: RefCell<EventRegistry>,
    surface: Box<dyn Surface>,
    augmenter: Box<dyn EventAugmenter>,
    width: DimensionProvider,
    height: DimensionProvider,
    config: PointerConfig,
    attached: Cell<bool>,
}

impl fmt::Debug for GestureDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureDispatcher")
            .field("state", &self.state)
            .field("registry", &self.registry)
            .field("size", &self.size())
            .field("config", &self.config)
            .field("attached", &self.attached.get())
            .finish_non_exhaustive()
    }
}

impl GestureDispatcher {
    /// Create a dispatcher for `surface` whose size is read from `width` and `height`.
    pub fn new(
        surface: impl Surface + 'static,
        width: impl Fn() -> f64 + 'static,
        height: impl Fn() -> f64 + 'static,
    ) -> Self {
        let config = PointerConfig::default();
        Self {
            state: RefCell::new(PointerState::new(config.press_sentinel())),
            registry: RefCell::new(EventRegistry::new()),
            surface: Box::new(surface),
            augmenter: Box::new(BasicAugmenter),
            width: Box::new(width),
            height: Box::new(height),
            config,
            attached: Cell::new(false),
        }
    }

    /// Replace the configuration. Resets the pointer state.
    #[must_use]
    pub fn with_config(mut self, config: PointerConfig) -> Self {
        self.config = config;
        self.state = RefCell::new(PointerState::new(config.press_sentinel()));
        self
    }

    /// Replace the event augmenter.
    #[must_use]
    pub fn with_augmenter(mut self, augmenter: impl EventAugmenter + 'static) -> Self {
        self.augmenter = Box::new(augmenter);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    /// Borrow the pointer state.
    ///
    /// Do not hold the borrow across calls that deliver gestures.
    pub fn state(&self) -> Ref<'_, PointerState> {
        self.state.borrow()
    }

    /// Current surface size from the dimension providers.
    pub fn size(&self) -> Size {
        Size::new((self.width)(), (self.height)())
    }

    /// Mark the dispatcher as wired into a host. Fails if it already was.
    pub(crate) fn mark_attached(&self) -> Result<(), PointerError> {
        if self.attached.replace(true) {
            return Err(PointerError::AlreadyInitialized);
        }
        Ok(())
    }

    // --- subscriptions ---

    /// Subscribe `handler` to `kind`.
    pub fn subscribe(
        &self,
        kind: GestureKind,
        handler: impl Fn(&GestureEvent, bool) + 'static,
    ) -> SubscriptionId {
        self.registry.borrow_mut().subscribe(kind, handler)
    }

    /// Remove a subscription; stale handles are ignored.
    pub fn unsubscribe(&self, kind: GestureKind, id: SubscriptionId) -> bool {
        self.registry.borrow_mut().unsubscribe(kind, id)
    }

    /// Subscribe by gesture name.
    pub fn subscribe_named(
        &self,
        name: &str,
        handler: impl Fn(&GestureEvent, bool) + 'static,
    ) -> Result<SubscriptionId, PointerError> {
        self.registry.borrow_mut().subscribe_named(name, handler)
    }

    /// Unsubscribe by gesture name.
    pub fn unsubscribe_named(&self, name: &str, id: SubscriptionId) -> Result<bool, PointerError> {
        self.registry.borrow_mut().unsubscribe_named(name, id)
    }

    /// Number of handlers subscribed to `kind`.
    pub fn subscriber_count(&self, kind: GestureKind) -> usize {
        self.registry.borrow().len(kind)
    }

    // --- geometry ---

    /// Map `raw` into surface-local coordinates.
    ///
    /// Without an event, or for an event lacking coordinates, this is the
    /// committed position. With `commit`, a successfully mapped position
    /// becomes the committed one.
    pub fn position(&self, raw: Option<&RawPointerEvent>, commit: bool) -> Point {
        let mapped = raw.and_then(|raw| {
            if raw.is_positionless() {
                tracing::trace!("event without coordinates, keeping committed position");
                return None;
            }
            map_to_surface(
                raw,
                self.surface.bounding_rect(),
                self.surface.scroll_offset(),
            )
        });
        let mut state = self.state.borrow_mut();
        if commit {
            state.commit(mapped);
        }
        mapped.unwrap_or(state.position)
    }

    /// Hit test `raw` (or the last raw event) against the current surface bounds.
    ///
    /// Inside: commits the mapped position and marks the surface hovered.
    /// Outside: clears the hovered flag and leaves the position alone.
    pub fn is_on_surface(&self, raw: Option<&RawPointerEvent>) -> bool {
        let fallback;
        let raw = match raw {
            Some(raw) => Some(raw),
            None => {
                fallback = self.state.borrow().last_raw.clone();
                fallback.as_ref()
            }
        };

        let inside = is_inside(self.position(raw, false), self.size());
        if inside {
            self.position(raw, true);
        }
        self.state.borrow_mut().hovered = inside;
        inside
    }

    // --- delivery ---

    /// Deliver `kind` for `raw` to every subscriber, most recent first.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, kind: GestureKind, raw: &RawPointerEvent, forced: bool) -> usize {
        let mut event = self.augmenter.augment(raw, kind);
        {
            let state = self.state.borrow();
            event.kind = kind;
            event.position = state.position;
            event.which = raw.button;
            event.press_origin = state.press_origin();
        }

        let handlers = self.registry.borrow().snapshot(kind);
        tracing::trace!(gesture = %kind, handlers = handlers.len(), forced, "dispatch");
        for handler in &handlers {
            handler(&event, forced);
        }
        handlers.len()
    }

    /// Deliver a gesture named by string.
    pub fn dispatch_named(
        &self,
        name: &str,
        raw: &RawPointerEvent,
        forced: bool,
    ) -> Result<usize, PointerError> {
        let kind = parse_kind(name)?;
        Ok(self.dispatch(kind, raw, forced))
    }

    // --- transitions ---

    pub(crate) fn record(&self, raw: &RawPointerEvent) {
        self.state.borrow_mut().record(raw);
    }

    /// Surface-scope move.
    pub fn surface_move(&self, raw: &RawPointerEvent) {
        self.record(raw);
        self.position(Some(raw), true);
        self.state.borrow_mut().hovered = true;

        self.dispatch(GestureKind::Enter, raw, false);
        self.dispatch(GestureKind::Move, raw, false);
        self.dispatch(GestureKind::Leave, raw, false);
        self.dispatch(GestureKind::Drag, raw, false);
    }

    /// Surface-scope button press.
    pub fn surface_press(&self, raw: &RawPointerEvent) -> Propagation {
        {
            let mut state = self.state.borrow_mut();
            state.focused = true;
            state.button = ButtonState::Down;
            state.record(raw);
        }
        let origin = self.position(Some(raw), true);
        self.state.borrow_mut().press_origin = origin;
        tracing::debug!(x = origin.x, y = origin.y, "press cycle started");

        self.dispatch(GestureKind::Press, raw, false);

        if self.config.prevent_default_on_press() {
            Propagation::PreventDefault
        } else {
            Propagation::Continue
        }
    }

    /// Surface-scope button release.
    pub fn surface_release(&self, raw: &RawPointerEvent) {
        {
            let mut state = self.state.borrow_mut();
            state.button = ButtonState::Up;
            state.record(raw);
        }

        self.dispatch(GestureKind::Release, raw, false);
        self.dispatch(GestureKind::Click, raw, false);

        self.cancel();
    }

    pub(crate) fn clear_focus(&self) {
        self.state.borrow_mut().focused = false;
        tracing::debug!("surface focus cleared");
    }

    /// Drop any pending press correlation.
    pub fn cancel(&self) {
        self.state.borrow_mut().reset_press();
        tracing::debug!("press cycle cleared");
    }

    // --- cursor ---

    /// Hide the cursor over the surface.
    pub fn hide(&self) {
        self.surface.set_cursor(CursorStyle::Hidden);
    }

    /// Restore the default cursor over the surface.
    pub fn show(&self) {
        self.surface.set_cursor(CursorStyle::Default);
    }
}
