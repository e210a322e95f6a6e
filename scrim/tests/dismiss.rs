use std::sync::{Mutex, MutexGuard};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use scrim::{DismissalRouter, ModalConfig, ModalStack};

// The router's bind guard is process-wide state and the test harness runs
// threads in parallel; tests that bind must not overlap.
static ROUTER_LOCK: Mutex<()> = Mutex::new(());

fn router_guard() -> MutexGuard<'static, ()> {
    ROUTER_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

fn escape() -> KeyEvent {
    KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)
}

// ============================================================================
// Binding lifecycle
// ============================================================================

#[test]
fn test_second_bind_is_refused_until_release() {
    let _guard = router_guard();
    let stack = ModalStack::new();

    let router = DismissalRouter::bind(stack.clone()).unwrap();
    assert!(DismissalRouter::bind(stack.clone()).is_none());

    drop(router);
    let rebound = DismissalRouter::bind(stack);
    assert!(rebound.is_some());
}

// ============================================================================
// Escape routing
// ============================================================================

#[test]
fn test_escape_closes_only_the_topmost_session() {
    let _guard = router_guard();
    let stack = ModalStack::new();
    let router = DismissalRouter::bind(stack.clone()).unwrap();

    let a = stack.open(ModalConfig::new());
    let b = stack.open(ModalConfig::new());

    assert!(router.handle_key(&escape()));
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.topmost().unwrap().id, a);
    assert!(stack.get(&b).is_none());

    assert!(router.handle_key(&escape()));
    assert!(stack.is_empty());

    // Empty stack: nothing to dismiss.
    assert!(!router.handle_key(&escape()));
}

#[test]
fn test_escape_respects_topmost_opt_out() {
    let _guard = router_guard();
    let stack = ModalStack::new();
    let router = DismissalRouter::bind(stack.clone()).unwrap();

    stack.open(ModalConfig::new());
    stack.open(ModalConfig::new().allow_escape_close(false));

    // The covered session's default-true flag is never consulted.
    assert!(!router.handle_key(&escape()));
    assert_eq!(stack.len(), 2);
}

#[test]
fn test_escape_ignores_other_keys_and_non_press_events() {
    let _guard = router_guard();
    let stack = ModalStack::new();
    let router = DismissalRouter::bind(stack.clone()).unwrap();

    stack.open(ModalConfig::new());

    let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    assert!(!router.handle_key(&enter));

    let release = KeyEvent::new_with_kind(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release);
    assert!(!router.handle_key(&release));

    assert!(!router.handle_event(&Event::Resize(80, 24)));
    assert_eq!(stack.len(), 1);

    assert!(router.handle_event(&Event::Key(escape())));
    assert!(stack.is_empty());
}

// ============================================================================
// Backdrop routing
// ============================================================================

#[test]
fn test_backdrop_click_respects_per_session_flag() {
    let _guard = router_guard();
    let stack = ModalStack::new();
    let router = DismissalRouter::bind(stack.clone()).unwrap();

    let closable = stack.open(ModalConfig::new());
    let pinned = stack.open(ModalConfig::new().allow_backdrop_close(false));

    assert!(!router.backdrop_click(&pinned));
    assert_eq!(stack.len(), 2);

    // Each session's own flag is evaluated, covered or not.
    assert!(router.backdrop_click(&closable));
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.topmost().unwrap().id, pinned);
}

#[test]
fn test_backdrop_click_on_closed_session_is_noop() {
    let _guard = router_guard();
    let stack = ModalStack::new();
    let router = DismissalRouter::bind(stack.clone()).unwrap();

    let id = stack.open(ModalConfig::new());
    stack.close(&id);

    assert!(!router.backdrop_click(&id));
    assert!(stack.is_empty());
}
