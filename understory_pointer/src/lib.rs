// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pointer --heading-base-level=0

//! Understory Pointer: a single-pointer gesture engine for one interactive surface.
//!
//! The engine turns raw pointer notifications (moves, button transitions) into
//! semantic gestures delivered to subscribers: `Enter`, `Leave`, `Move`,
//! `Press`, `Release`, `Click` and `Drag`.
//!
//! Raw events arrive from two observation scopes:
//!
//! - The **surface** scope reliably reports moves, presses and releases, but
//!   only while the pointer is over the surface.
//! - The **document** scope sees everything, including releases and pointer
//!   movement outside the surface, but must be filtered for relevance.
//!
//! Both feed one [`GestureDispatcher`](dispatcher::GestureDispatcher). The
//! [`DocumentObserver`](document::DocumentObserver) gates document events so
//! they only trigger the transitions the surface cannot see itself: a release
//! after the pointer was dragged off the surface, a genuine boundary exit, and
//! a click elsewhere that clears focus.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use understory_pointer::cursor::CursorStyle;
//! use understory_pointer::host::Surface;
//! use understory_pointer::types::{GestureKind, RawKind, RawPointerEvent, Scope};
//! use understory_pointer::Pointer;
//!
//! struct Canvas;
//!
//! impl Surface for Canvas {
//!     fn bounding_rect(&self) -> Rect {
//!         Rect::new(10.0, 20.0, 110.0, 120.0)
//!     }
//!     fn set_cursor(&self, _style: CursorStyle) {}
//! }
//!
//! let pointer = Pointer::new(Canvas, || 100.0, || 100.0);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! for kind in [GestureKind::Release, GestureKind::Click] {
//!     let seen = seen.clone();
//!     pointer.subscribe(kind, move |ev, _forced| {
//!         seen.borrow_mut().push((ev.kind, ev.position.x, ev.position.y));
//!     });
//! }
//!
//! let press = RawPointerEvent::from_page(60.0, 70.0);
//! pointer.handle(Scope::Surface, RawKind::Down, &press);
//!
//! // Dragged off the surface and released elsewhere: only the document sees it.
//! let release = RawPointerEvent::from_page(500.0, 500.0);
//! pointer.handle(Scope::Document, RawKind::Up, &release);
//!
//! assert_eq!(
//!     *seen.borrow(),
//!     vec![(GestureKind::Release, 50.0, 50.0), (GestureKind::Click, 50.0, 50.0)]
//! );
//! ```
//!
//! ## Delivery rules
//!
//! - Handlers of one kind run most recently subscribed first.
//! - Each move broadcasts `Enter`, `Move`, `Leave`, `Drag` in that order. The
//!   `Leave` in that broadcast is unforced; a real exit, seen at document
//!   scope, delivers `Leave` with the force flag set.
//! - Every release delivers `Release` then `Click`.
//! - Subscribing or unsubscribing from inside a handler only affects later
//!   deliveries.
//!
//! ## Wiring into a host
//!
//! Implement [`Host`](host::Host) and call [`Pointer::initialize`] to register
//! the six raw listeners (surface move/down/up, document up/over/click) and the
//! [`PointerDeclaration`](host::PointerDeclaration) used for device
//! classification. Hosts without a listener registry can call
//! [`Pointer::handle`] directly instead.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `trace` per delivered gesture, `debug`
//! for press cycles, focus changes, document reconciliation and
//! subscriptions, `warn` for unknown gesture names. No subscriber is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod cursor;
pub mod dispatcher;
pub mod document;
pub mod error;
pub mod hit;
pub mod host;
pub mod mapper;
mod pointer;
pub mod registry;
pub mod state;
pub mod types;

pub use config::PointerConfig;
pub use error::PointerError;
pub use pointer::Pointer;
