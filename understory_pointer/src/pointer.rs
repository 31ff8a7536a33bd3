// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing pointer handle.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};

use kurbo::Point;

use crate::dispatcher::GestureDispatcher;
use crate::document::DocumentObserver;
use crate::error::PointerError;
use crate::host::{Host, PointerDeclaration, RawListener, Surface};
use crate::registry::SubscriptionId;
use crate::types::{
    ButtonState, GestureEvent, GestureKind, Propagation, RawKind, RawPointerEvent, Scope,
};

/// Raw notifications the engine listens for, per scope.
const LISTENERS: [(Scope, RawKind); 6] = [
    (Scope::Surface, RawKind::Move),
    (Scope::Surface, RawKind::Down),
    (Scope::Surface, RawKind::Up),
    (Scope::Document, RawKind::Up),
    (Scope::Document, RawKind::Over),
    (Scope::Document, RawKind::Click),
];

/// A cheaply cloneable handle to the pointer engine of one surface.
///
/// Host listeners registered by [`Pointer::attach`] hold weak references, so
/// the engine lives as long as some `Pointer` clone does.
#[derive(Clone, Debug)]
pub struct Pointer {
    inner: Rc<GestureDispatcher>,
}

impl Pointer {
    /// Create an engine for `surface` without wiring it into a host.
    ///
    /// Feed raw events with [`Pointer::handle`].
    pub fn new(
        surface: impl Surface + 'static,
        width: impl Fn() -> f64 + 'static,
        height: impl Fn() -> f64 + 'static,
    ) -> Self {
        Self::from_dispatcher(GestureDispatcher::new(surface, width, height))
    }

    /// Wrap a configured dispatcher.
    pub fn from_dispatcher(dispatcher: GestureDispatcher) -> Self {
        Self {
            inner: Rc::new(dispatcher),
        }
    }

    /// Create an engine for `surface` and wire its listeners into `host`.
    pub fn initialize<H: Host + ?Sized>(
        host: &mut H,
        surface: impl Surface + 'static,
        width: impl Fn() -> f64 + 'static,
        height: impl Fn() -> f64 + 'static,
    ) -> Result<Self, PointerError> {
        let pointer = Self::new(surface, width, height);
        pointer.attach(host)?;
        Ok(pointer)
    }

    /// Register the surface and document listeners with `host` and declare the
    /// serviced gestures.
    ///
    /// A pointer can be attached once; later calls fail with
    /// [`PointerError::AlreadyInitialized`].
    pub fn attach<H: Host + ?Sized>(&self, host: &mut H) -> Result<(), PointerError> {
        self.inner.mark_attached()?;

        host.declare_pointer(PointerDeclaration::MOUSE);
        for (scope, kind) in LISTENERS {
            let listener = match scope {
                Scope::Surface => surface_listener(Rc::downgrade(&self.inner), kind),
                Scope::Document => document_listener(self.document(), kind),
            };
            host.listen(scope, kind, listener);
        }
        tracing::debug!(listeners = LISTENERS.len(), "pointer attached");
        Ok(())
    }

    /// Feed one raw notification observed at `scope`.
    ///
    /// Combinations the engine does not observe are ignored.
    pub fn handle(&self, scope: Scope, kind: RawKind, raw: &RawPointerEvent) -> Propagation {
        match scope {
            Scope::Surface => route_surface(&self.inner, kind, raw),
            Scope::Document => {
                if let Err(err) = self.document().observe(kind, raw) {
                    tracing::trace!(%err, ?kind, "document event ignored");
                }
                Propagation::Continue
            }
        }
    }

    /// The gesture dispatcher behind this handle.
    pub fn dispatcher(&self) -> &GestureDispatcher {
        &self.inner
    }

    /// A document-scope observer feeding this engine.
    pub fn document(&self) -> DocumentObserver {
        DocumentObserver::new(&self.inner)
    }

    /// Subscribe `handler` to `kind`.
    pub fn subscribe(
        &self,
        kind: GestureKind,
        handler: impl Fn(&GestureEvent, bool) + 'static,
    ) -> SubscriptionId {
        self.inner.subscribe(kind, handler)
    }

    /// Remove a subscription. Stale handles are ignored.
    pub fn unsubscribe(&self, kind: GestureKind, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(kind, id)
    }

    /// Subscribe by gesture name.
    pub fn subscribe_named(
        &self,
        name: &str,
        handler: impl Fn(&GestureEvent, bool) + 'static,
    ) -> Result<SubscriptionId, PointerError> {
        self.inner.subscribe_named(name, handler)
    }

    /// Unsubscribe by gesture name.
    pub fn unsubscribe_named(&self, name: &str, id: SubscriptionId) -> Result<bool, PointerError> {
        self.inner.unsubscribe_named(name, id)
    }

    /// Surface-local position for `raw`, or the committed position.
    ///
    /// With `commit`, a mapped position becomes the committed one.
    pub fn position(&self, raw: Option<&RawPointerEvent>, commit: bool) -> Point {
        self.inner.position(raw, commit)
    }

    /// Hit test `raw`, or the last raw event, against the surface.
    pub fn is_on_surface(&self, raw: Option<&RawPointerEvent>) -> bool {
        self.inner.is_on_surface(raw)
    }

    /// Hide the cursor over the surface.
    pub fn hide(&self) {
        self.inner.hide();
    }

    /// Restore the default cursor over the surface.
    pub fn show(&self) {
        self.inner.show();
    }

    /// Interrupt any pending press cycle.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Logical button state.
    pub fn button_state(&self) -> ButtonState {
        self.inner.state().button()
    }

    /// Whether the surface holds logical input focus.
    pub fn is_focused(&self) -> bool {
        self.inner.state().is_focused()
    }

    /// Result of the most recent hit test.
    pub fn is_hovered(&self) -> bool {
        self.inner.state().is_hovered()
    }

    /// Press origin of the current press cycle, if any.
    pub fn press_origin(&self) -> Option<Point> {
        self.inner.state().press_origin()
    }

    /// The most recent raw event seen at either scope.
    pub fn last_raw_event(&self) -> Option<RawPointerEvent> {
        self.inner.state().last_raw_event().cloned()
    }
}

fn route_surface(d: &GestureDispatcher, kind: RawKind, raw: &RawPointerEvent) -> Propagation {
    match kind {
        RawKind::Move => d.surface_move(raw),
        RawKind::Down => return d.surface_press(raw),
        RawKind::Up => d.surface_release(raw),
        RawKind::Over | RawKind::Click => {}
    }
    Propagation::Continue
}

fn surface_listener(weak: Weak<GestureDispatcher>, kind: RawKind) -> RawListener {
    Box::new(move |raw: &RawPointerEvent| match weak.upgrade() {
        Some(d) => route_surface(&d, kind, raw),
        None => Propagation::Continue,
    })
}

fn document_listener(observer: DocumentObserver, kind: RawKind) -> RawListener {
    Box::new(move |raw: &RawPointerEvent| {
        if let Err(err) = observer.observe(kind, raw) {
            tracing::trace!(%err, ?kind, "document event ignored");
        }
        Propagation::Continue
    })
}
