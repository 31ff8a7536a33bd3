// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end gesture sequences through a mock host.
//!
//! These drive the engine the way a host would: raw listeners registered by
//! `Pointer::initialize` receive surface and document notifications, and the
//! resulting gestures are recorded by subscribers.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use understory_pointer::Pointer;
use understory_pointer::cursor::CursorStyle;
use understory_pointer::host::{Host, PointerDeclaration, RawListener, Surface};
use understory_pointer::types::{
    ButtonState, GestureEvent, GestureKind, Propagation, RawKind, RawPointerEvent, Scope,
};

/// A surface placed at a fixed viewport offset with a scrollable document.
#[derive(Clone, Default)]
struct Canvas {
    origin: Rc<Cell<Point>>,
    scroll: Rc<Cell<Vec2>>,
    cursor: Rc<Cell<CursorStyle>>,
}

impl Surface for Canvas {
    fn bounding_rect(&self) -> Rect {
        let o = self.origin.get();
        Rect::new(o.x, o.y, o.x + 100.0, o.y + 100.0)
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll.get()
    }

    fn set_cursor(&self, style: CursorStyle) {
        self.cursor.set(style);
    }
}

#[derive(Default)]
struct MockHost {
    listeners: HashMap<(Scope, RawKind), Vec<RawListener>>,
    declared: Vec<PointerDeclaration>,
}

impl Host for MockHost {
    fn listen(&mut self, scope: Scope, kind: RawKind, listener: RawListener) {
        self.listeners.entry((scope, kind)).or_default().push(listener);
    }

    fn declare_pointer(&mut self, declaration: PointerDeclaration) {
        self.declared.push(declaration);
    }
}

impl MockHost {
    /// Deliver like a browser: the surface listeners first (when the event
    /// happens over the surface), then the document.
    fn fire(&mut self, kind: RawKind, raw: &RawPointerEvent, over_surface: bool) -> Propagation {
        let mut outcome = Propagation::Continue;
        if over_surface {
            outcome = self.fire_at(Scope::Surface, kind, raw);
        }
        self.fire_at(Scope::Document, kind, raw);
        outcome
    }

    fn fire_at(&mut self, scope: Scope, kind: RawKind, raw: &RawPointerEvent) -> Propagation {
        let mut outcome = Propagation::Continue;
        if let Some(listeners) = self.listeners.get_mut(&(scope, kind)) {
            for listener in listeners {
                if listener(raw) == Propagation::PreventDefault {
                    outcome = Propagation::PreventDefault;
                }
            }
        }
        outcome
    }
}

type Log = Rc<RefCell<Vec<(GestureKind, bool)>>>;

fn record_all(pointer: &Pointer) -> Log {
    let log: Log = Rc::default();
    for kind in GestureKind::ALL {
        let log = log.clone();
        pointer.subscribe(kind, move |ev, forced| log.borrow_mut().push((ev.kind, forced)));
    }
    log
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn setup() -> (MockHost, Canvas, Pointer) {
    init_tracing();
    let mut host = MockHost::default();
    let canvas = Canvas::default();
    canvas.origin.set(Point::new(10.0, 20.0));
    let pointer = Pointer::initialize(&mut host, canvas.clone(), || 100.0, || 100.0)
        .expect("fresh pointer attaches");
    (host, canvas, pointer)
}

fn page(x: f64, y: f64) -> RawPointerEvent {
    RawPointerEvent::from_page(x, y)
}

#[test]
fn initialize_declares_mouse_pointer() {
    let (host, _, _pointer) = setup();
    assert_eq!(host.declared, vec![PointerDeclaration::MOUSE]);
    assert_eq!(host.listeners.len(), 6);
}

#[test]
fn maps_page_position_against_surface_origin() {
    let (_, _, pointer) = setup();
    assert_eq!(pointer.position(Some(&page(15.0, 25.0)), true), Point::new(5.0, 5.0));
    assert_eq!(pointer.position(None, false), Point::new(5.0, 5.0));
}

#[test]
fn scroll_offset_is_applied_per_coordinate_form() {
    let (_, canvas, pointer) = setup();
    canvas.scroll.set(Vec2::new(0.0, 50.0));
    assert_eq!(
        pointer.position(Some(&page(15.0, 75.0)), false),
        Point::new(5.0, 5.0)
    );
    assert_eq!(
        pointer.position(Some(&RawPointerEvent::from_client(15.0, 25.0)), false),
        Point::new(5.0, 55.0)
    );
}

#[test]
fn positionless_events_keep_last_position() {
    let (mut host, _, pointer) = setup();
    host.fire(RawKind::Move, &page(40.0, 40.0), true);
    host.fire(RawKind::Move, &RawPointerEvent::default(), true);
    assert_eq!(pointer.position(None, false), Point::new(30.0, 20.0));
}

#[test]
fn bounds_are_strict() {
    let (_, _, pointer) = setup();
    // Local (0, 50), (1, 50), (100, 50).
    assert!(!pointer.is_on_surface(Some(&page(10.0, 70.0))));
    assert!(pointer.is_on_surface(Some(&page(11.0, 70.0))));
    assert!(pointer.is_hovered());
    assert!(!pointer.is_on_surface(Some(&page(110.0, 70.0))));
    assert!(!pointer.is_hovered());
}

#[test]
fn hit_test_commits_position_only_when_inside() {
    let (_, _, pointer) = setup();
    assert!(pointer.is_on_surface(Some(&page(30.0, 40.0))));
    assert_eq!(pointer.position(None, false), Point::new(20.0, 20.0));
    assert!(!pointer.is_on_surface(Some(&page(300.0, 40.0))));
    assert_eq!(pointer.position(None, false), Point::new(20.0, 20.0));
}

#[test]
fn handlers_run_most_recent_first() {
    let (mut host, _, pointer) = setup();
    let order = Rc::new(RefCell::new(Vec::new()));
    for name in ["h1", "h2", "h3"] {
        let order = order.clone();
        pointer.subscribe(GestureKind::Move, move |_, _| order.borrow_mut().push(name));
    }
    host.fire(RawKind::Move, &page(50.0, 50.0), true);
    assert_eq!(*order.borrow(), vec!["h3", "h2", "h1"]);
}

#[test]
fn every_move_broadcasts_enter_move_leave_drag() {
    let (mut host, _, pointer) = setup();
    let log = record_all(&pointer);
    host.fire(RawKind::Move, &page(50.0, 50.0), true);
    host.fire(RawKind::Move, &page(51.0, 50.0), true);
    let expected = [
        (GestureKind::Enter, false),
        (GestureKind::Move, false),
        (GestureKind::Leave, false),
        (GestureKind::Drag, false),
    ];
    assert_eq!(log.borrow()[..4], expected);
    assert_eq!(log.borrow()[4..], expected);
}

#[test]
fn press_then_release_synthesizes_click() {
    let (mut host, _, pointer) = setup();
    let log = record_all(&pointer);

    // Local (50, 50).
    let outcome = host.fire(RawKind::Down, &page(60.0, 70.0), true);
    assert_eq!(outcome, Propagation::PreventDefault);
    assert_eq!(pointer.press_origin(), Some(Point::new(50.0, 50.0)));
    assert_eq!(pointer.button_state(), ButtonState::Down);
    assert!(pointer.is_focused());

    log.borrow_mut().clear();
    host.fire(RawKind::Up, &page(60.0, 70.0), true);
    assert_eq!(
        *log.borrow(),
        vec![(GestureKind::Release, false), (GestureKind::Click, false)]
    );
    assert_eq!(pointer.press_origin(), None);
    assert_eq!(pointer.button_state(), ButtonState::Up);
}

#[test]
fn release_outside_after_drag_still_clicks() {
    let (mut host, _, pointer) = setup();
    let positions = Rc::new(RefCell::new(Vec::new()));
    for kind in [GestureKind::Release, GestureKind::Click] {
        let positions = positions.clone();
        pointer.subscribe(kind, move |ev, forced| {
            positions.borrow_mut().push((ev.kind, ev.position, forced));
        });
    }

    host.fire(RawKind::Down, &page(60.0, 70.0), true);
    // Last move the surface sees, near the right edge.
    host.fire(RawKind::Move, &page(105.0, 70.0), true);
    // The pointer leaves; the document reports it and the release.
    host.fire(RawKind::Over, &page(300.0, 70.0), false);
    host.fire(RawKind::Up, &page(300.0, 70.0), false);

    let last = Point::new(95.0, 50.0);
    assert_eq!(
        *positions.borrow(),
        vec![
            (GestureKind::Release, last, false),
            (GestureKind::Click, last, false),
        ]
    );
    assert_eq!(pointer.button_state(), ButtonState::Up);
    assert_eq!(pointer.press_origin(), None);
}

#[test]
fn in_bounds_release_is_not_replayed_by_document() {
    let (mut host, _, pointer) = setup();
    let log = record_all(&pointer);
    host.fire(RawKind::Down, &page(60.0, 70.0), true);
    log.borrow_mut().clear();

    host.fire(RawKind::Up, &page(60.0, 70.0), true);
    let clicks = log
        .borrow()
        .iter()
        .filter(|(kind, _)| *kind == GestureKind::Click)
        .count();
    assert_eq!(clicks, 1);
}

#[test]
fn document_release_without_press_is_ignored() {
    let (mut host, _, pointer) = setup();
    let log = record_all(&pointer);
    host.fire(RawKind::Up, &page(300.0, 300.0), false);
    assert!(log.borrow().is_empty());
    assert_eq!(pointer.last_raw_event(), Some(page(300.0, 300.0)));
}

#[test]
fn leave_force_flag_distinguishes_real_exits() {
    let (mut host, _, pointer) = setup();
    let flags = Rc::new(RefCell::new(Vec::new()));
    let sink = flags.clone();
    pointer.subscribe(GestureKind::Leave, move |_, forced| sink.borrow_mut().push(forced));

    host.fire(RawKind::Move, &page(50.0, 50.0), true);
    // Over the surface, the document sees the over event too but stays quiet.
    host.fire(RawKind::Over, &page(50.0, 50.0), true);
    host.fire(RawKind::Over, &page(500.0, 50.0), false);

    assert_eq!(*flags.borrow(), vec![false, true]);
}

#[test]
fn click_elsewhere_clears_focus() {
    let (mut host, _, pointer) = setup();
    host.fire(RawKind::Down, &page(60.0, 70.0), true);
    host.fire(RawKind::Up, &page(60.0, 70.0), true);
    host.fire(RawKind::Click, &page(60.0, 70.0), true);
    assert!(pointer.is_focused());

    host.fire(RawKind::Click, &page(500.0, 500.0), false);
    assert!(!pointer.is_focused());
}

#[test]
fn cancel_interrupts_press_cycle() {
    let (mut host, _, pointer) = setup();
    let origins = Rc::new(RefCell::new(Vec::new()));
    let sink = origins.clone();
    pointer.subscribe(GestureKind::Drag, move |ev, _| sink.borrow_mut().push(ev.press_origin));

    host.fire(RawKind::Down, &page(60.0, 70.0), true);
    host.fire(RawKind::Move, &page(65.0, 70.0), true);
    pointer.cancel();
    host.fire(RawKind::Move, &page(70.0, 70.0), true);

    assert_eq!(
        *origins.borrow(),
        vec![Some(Point::new(50.0, 50.0)), None]
    );
}

#[test]
fn cursor_toggles_are_idempotent() {
    let (_, canvas, pointer) = setup();
    assert_eq!(canvas.cursor.get(), CursorStyle::Default);
    pointer.hide();
    pointer.hide();
    assert_eq!(canvas.cursor.get(), CursorStyle::Hidden);
    pointer.hide();
    pointer.show();
    assert_eq!(canvas.cursor.get(), CursorStyle::Default);
    pointer.show();
    assert_eq!(canvas.cursor.get(), CursorStyle::Default);
    assert_eq!(pointer.position(None, false), Point::ZERO);
}

#[test]
fn unsubscribe_out_of_range_is_harmless() {
    let (mut host, _, pointer) = setup();
    let hits = Rc::new(Cell::new(0));
    let sink = hits.clone();
    let kept = pointer.subscribe(GestureKind::Move, move |_, _| sink.set(sink.get() + 1));
    let gone = pointer.subscribe(GestureKind::Move, |_, _| {});
    assert!(pointer.unsubscribe(GestureKind::Move, gone));
    assert!(!pointer.unsubscribe(GestureKind::Move, gone));
    assert!(!pointer.unsubscribe(GestureKind::Click, kept));

    host.fire(RawKind::Move, &page(50.0, 50.0), true);
    assert_eq!(hits.get(), 1);
}

#[test]
fn reentrant_subscription_changes_apply_to_later_deliveries() {
    let (mut host, _, pointer) = setup();
    let log = Rc::new(RefCell::new(Vec::new()));

    let late = {
        let log = log.clone();
        move |_: &GestureEvent, _: bool| log.borrow_mut().push("late")
    };
    let slot = Rc::new(Cell::new(None));
    let handle = pointer.clone();
    let own_slot = slot.clone();
    let own_log = log.clone();
    let first = pointer.subscribe(GestureKind::Click, move |_, _| {
        own_log.borrow_mut().push("first");
        if let Some(id) = own_slot.take() {
            handle.unsubscribe(GestureKind::Click, id);
            handle.subscribe(GestureKind::Click, late.clone());
        }
    });
    slot.set(Some(first));

    host.fire(RawKind::Down, &page(60.0, 70.0), true);
    host.fire(RawKind::Up, &page(60.0, 70.0), true);
    assert_eq!(*log.borrow(), vec!["first"]);

    host.fire(RawKind::Down, &page(60.0, 70.0), true);
    host.fire(RawKind::Up, &page(60.0, 70.0), true);
    assert_eq!(*log.borrow(), vec!["first", "late"]);
}

#[test]
fn handlers_may_query_the_pointer() {
    let (mut host, _, pointer) = setup();
    let seen = Rc::new(Cell::new(false));
    let sink = seen.clone();
    let handle = pointer.clone();
    pointer.subscribe(GestureKind::Press, move |_, _| {
        sink.set(handle.is_on_surface(None));
    });
    host.fire(RawKind::Down, &page(60.0, 70.0), true);
    assert!(seen.get());
}

#[test]
fn named_subscriptions_reject_unknown_gestures() {
    let (_, _, pointer) = setup();
    assert!(pointer.subscribe_named("mousewheel", |_, _| {}).is_err());
    let id = pointer
        .subscribe_named("mouseup", |_, _| {})
        .expect("mouseup is serviced");
    assert_eq!(pointer.unsubscribe_named("release", id), Ok(true));
}

#[test]
fn dropping_pointer_releases_engine() {
    let (mut host, _, pointer) = setup();
    let hits = Rc::new(Cell::new(0));
    let sink = hits.clone();
    pointer.subscribe(GestureKind::Move, move |_, _| sink.set(sink.get() + 1));
    drop(pointer);

    host.fire(RawKind::Move, &page(50.0, 50.0), true);
    host.fire(RawKind::Up, &page(500.0, 500.0), false);
    assert_eq!(hits.get(), 0);
    assert_eq!(Rc::strong_count(&hits), 1);
}
