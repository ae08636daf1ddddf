//! End-to-end navigation behaviour through a mounted root.
//!
//! Drives everything through `RemoteEmitter`, the same way a host feeds
//! hardware events.
//!
//! Run with: cargo test --test navigation

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use spark_nav::{
    Capabilities, Direction, FocusFn, Focusable, NavConfig, NavError, NavigationRoot, Navigator,
    NodeGuard, RemoteEmitter, RemoteEvent, ScrollContainer, ScrollRequest, ScrollView,
};

// =============================================================================
// HELPERS
// =============================================================================

type Handle = Rc<dyn Focusable>;
type Log = Rc<RefCell<Vec<String>>>;

struct Harness {
    emitter: RemoteEmitter,
    root: NavigationRoot<Handle>,
    log: Log,
}

impl Harness {
    fn new() -> Self {
        let emitter = RemoteEmitter::new();
        let root = NavigationRoot::mount(NavConfig::default(), Some(&emitter));
        Self {
            emitter,
            root,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn nav(&self) -> Navigator<Handle> {
        self.root.navigator()
    }

    fn handle(&self, id: &str) -> Handle {
        let log = self.log.clone();
        let id = id.to_string();
        Rc::new(FocusFn(move || log.borrow_mut().push(id.clone())))
    }

    fn register_all(&self, ids: &[String]) {
        let nav = self.nav();
        for id in ids {
            nav.register(id.as_str(), self.handle(id)).unwrap();
        }
    }

    fn press(&self, direction: Direction) {
        self.emitter.emit(&direction.into());
    }

    fn focused(&self) -> Option<String> {
        self.nav().focused_id().unwrap()
    }

    fn activations(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("n{i}")).collect()
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_right_three_times_cycles() {
    let h = Harness::new();
    h.register_all(&ids(3));
    assert_eq!(h.focused().as_deref(), Some("n0"));

    let mut seen = Vec::new();
    for _ in 0..3 {
        h.press(Direction::Right);
        seen.push(h.focused().unwrap());
    }
    assert_eq!(seen, vec!["n1", "n2", "n0"]);
    assert_eq!(h.activations(), vec!["n0", "n1", "n2", "n0"]);
}

#[test]
fn test_first_registration_auto_focuses_once() {
    let h = Harness::new();
    h.register_all(&ids(1));

    assert_eq!(h.focused().as_deref(), Some("n0"));
    assert_eq!(h.activations(), vec!["n0"]);
}

#[test]
fn test_unregister_only_node_resets_focus() {
    let h = Harness::new();
    h.register_all(&ids(1));

    h.nav().unregister("n0").unwrap();
    assert_eq!(h.focused(), None);

    h.press(Direction::Right);
    h.press(Direction::Left);
    assert_eq!(h.focused(), None);
    assert_eq!(h.activations(), vec!["n0"]);
}

#[test]
fn test_unrecognized_signal_changes_nothing() {
    let h = Harness::new();
    h.register_all(&ids(3));

    h.emitter.emit(&RemoteEvent::new("select"));
    h.emitter.emit(&RemoteEvent::new("playPause"));

    assert_eq!(h.focused().as_deref(), Some("n0"));
    assert_eq!(h.activations(), vec!["n0"]);
}

#[test]
fn test_request_focus_unknown_is_noop() {
    let h = Harness::new();
    h.register_all(&ids(2));

    h.nav().request_focus("nope").unwrap();
    assert_eq!(h.focused().as_deref(), Some("n0"));

    h.nav().request_focus("n1").unwrap();
    assert_eq!(h.focused().as_deref(), Some("n1"));
    assert_eq!(h.activations(), vec!["n0", "n1"]);
}

#[test]
fn test_node_guards_follow_region_lifecycle() {
    let h = Harness::new();
    let nav = h.nav();

    let a = nav.mount_node("a", h.handle("a")).unwrap();
    {
        let _b = nav.mount_node("b", h.handle("b")).unwrap();
        h.press(Direction::Down);
        assert_eq!(h.focused().as_deref(), Some("b"));
    }
    // b unmounted while focused
    assert_eq!(h.focused(), None);

    a.focus().unwrap();
    assert!(a.is_focused().unwrap());
}

#[test]
fn test_navigator_outside_root_fails() {
    let h = Harness::new();
    let nav = h.nav();
    let handle = h.handle("late");
    drop(h);

    assert!(matches!(
        nav.register("late", handle),
        Err(NavError::NotMounted { operation: "register" })
    ));
    assert!(nav.request_focus("late").is_err());
}

#[test]
fn test_nested_regions_tear_down_with_root() {
    struct Row {
        _tiles: Vec<NodeGuard<Handle>>,
    }
    impl Focusable for Row {
        fn focus(&self) {}
    }

    let h = Harness::new();
    let nav = h.nav();
    let tiles = vec![
        nav.mount_node("tile-a", h.handle("tile-a")).unwrap(),
        nav.mount_node("tile-b", h.handle("tile-b")).unwrap(),
    ];
    let row: Handle = Rc::new(Row { _tiles: tiles });
    nav.register("row", row).unwrap();

    h.press(Direction::Right);
    assert_eq!(h.focused().as_deref(), Some("tile-b"));

    // Removing the row releases its tiles
    let replacement = h.handle("row");
    nav.register("row", replacement).unwrap();
    assert_eq!(nav.ordered_ids().unwrap(), vec!["row"]);
    assert_eq!(h.focused(), None);

    let outer: Handle = Rc::new(Row {
        _tiles: vec![nav.mount_node("tile-c", h.handle("tile-c")).unwrap()],
    });
    nav.register("outer", outer).unwrap();
    drop(h);
    assert!(!nav.is_mounted());
}

#[test]
fn test_focus_and_scroll_share_signals() {
    #[derive(Default)]
    struct Row {
        requests: RefCell<Vec<ScrollRequest>>,
    }
    impl ScrollContainer for Row {
        fn scroll_to(&self, request: ScrollRequest) {
            self.requests.borrow_mut().push(request);
        }
    }

    let h = Harness::new();
    h.register_all(&ids(4));
    let row = Rc::new(Row::default());
    let view = ScrollView::mount(row.clone(), Capabilities::tv(), Some(&h.emitter));
    view.report_width(300.0).unwrap();

    h.press(Direction::Right);
    view.report_offset(300.0).unwrap();
    h.press(Direction::Right);
    view.report_offset(600.0).unwrap();
    h.press(Direction::Left);

    assert_eq!(h.focused().as_deref(), Some("n1"));
    let xs: Vec<f64> = row.requests.borrow().iter().map(|r| r.x).collect();
    assert_eq!(xs, vec![300.0, 600.0, 300.0]);
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_right_n_times_returns_home(n in 1usize..12, start in 0usize..12) {
        let start = start % n;
        let h = Harness::new();
        let all = ids(n);
        h.register_all(&all);
        h.nav().request_focus(&all[start]).unwrap();

        for _ in 0..n {
            h.press(Direction::Right);
        }
        prop_assert_eq!(h.focused(), Some(all[start].clone()));
    }

    #[test]
    fn prop_right_then_left_is_identity(n in 1usize..12, start in 0usize..12) {
        let start = start % n;
        let h = Harness::new();
        let all = ids(n);
        h.register_all(&all);
        h.nav().request_focus(&all[start]).unwrap();

        h.press(Direction::Right);
        if n >= 2 {
            prop_assert_ne!(h.focused(), Some(all[start].clone()));
        } else {
            prop_assert_eq!(h.focused(), Some(all[start].clone()));
        }
        h.press(Direction::Left);
        prop_assert_eq!(h.focused(), Some(all[start].clone()));
    }

    #[test]
    fn prop_focus_always_registered(ops in proptest::collection::vec(0u8..6, 0..40)) {
        let h = Harness::new();
        let nav = h.nav();
        let pool = ids(4);

        for (i, op) in ops.iter().enumerate() {
            let id = &pool[i % pool.len()];
            match op {
                0 => nav.register(id.as_str(), h.handle(id)).unwrap(),
                1 => nav.unregister(id).unwrap(),
                2 => nav.request_focus(id).unwrap(),
                3 => h.press(Direction::Right),
                4 => h.press(Direction::Up),
                _ => { h.emitter.emit(&RemoteEvent::new("select")); }
            }

            if let Some(focused) = h.focused() {
                prop_assert!(nav.ordered_ids().unwrap().contains(&focused));
            }
        }
    }
}
