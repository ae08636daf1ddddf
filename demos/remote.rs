//! Remote Example - drive focus and paging from the keyboard
//!
//! Arrow keys (or h/j/k/l) act as the remote's d-pad:
//! - Focus cycles through four tiles in registration order
//! - A paged row follows left/right one terminal width at a time
//! - Enter/Space/Escape are forwarded but ignored by navigation
//!
//! Run with: RUST_LOG=spark_nav=debug cargo run --example remote
//! Quit with Ctrl+C.

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use spark_nav::state::input::{poll_event, InputEvent};
use spark_nav::{
    Capabilities, FocusFn, Focusable, NavConfig, NavigationRoot, RemoteEmitter, ScrollContainer,
    ScrollRequest, ScrollView,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Prints scroll requests and jumps straight to them.
#[derive(Default)]
struct PrintRow {
    x: Cell<f64>,
}

impl ScrollContainer for PrintRow {
    fn scroll_to(&self, request: ScrollRequest) {
        // Clamp at the content start like a real container would
        self.x.set(request.x.max(0.0));
        print!("  row → x={} (animated: {})\r\n", self.x.get(), request.animated);
    }
}

fn tile(name: &'static str) -> Rc<dyn Focusable> {
    Rc::new(FocusFn(move || print!("focus: {name}\r\n")))
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let emitter = RemoteEmitter::new();
    let root: NavigationRoot<Rc<dyn Focusable>> =
        NavigationRoot::mount(NavConfig::default(), Some(&emitter));
    let navigator = root.navigator();

    let row = ScrollView::mount(PrintRow::default(), Capabilities::tv(), Some(&emitter));
    let (width, _) = terminal::size()?;
    let feed = row.feed();
    if let Err(err) = feed.report_width(f64::from(width)) {
        warn!(error = %err, "initial width rejected");
    }

    enable_raw_mode()?;
    print!("arrows move focus, Ctrl+C quits\r\n");

    let mut nodes = Vec::new();
    for name in ["home", "movies", "shows", "settings"] {
        match navigator.mount_node(name, tile(name)) {
            Ok(node) => nodes.push(node),
            Err(err) => print!("{err}\r\n"),
        }
    }

    let result = (|| -> io::Result<()> {
        loop {
            match poll_event(Duration::from_millis(50))? {
                Some(InputEvent::Remote(event)) => {
                    emitter.emit(&event);
                    if let Err(err) = feed.report_offset(row.container().x.get()) {
                        warn!(error = %err, "offset report rejected");
                    }
                }
                Some(InputEvent::Resize(w, _)) => {
                    if let Err(err) = feed.report_width(f64::from(w)) {
                        warn!(error = %err, "width report rejected");
                    }
                }
                Some(InputEvent::Interrupt) => return Ok(()),
                Some(InputEvent::None) | None => {}
            }
            io::stdout().flush()?;
        }
    })();

    disable_raw_mode()?;
    drop(nodes);
    row.unmount();
    root.unmount();
    result
}
