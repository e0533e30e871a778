//! tests/common/mod.rs
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Once;

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "tick_scheduler=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Returns a counter cell together with an action that increments it.
pub fn counter() -> (Rc<Cell<u32>>, impl FnMut()) {
    let count = Rc::new(Cell::new(0u32));
    let in_action = Rc::clone(&count);
    (count, move || in_action.set(in_action.get() + 1))
}
