//! Global dismissal routing: the Escape key and backdrop clicks.
//!
//! One router may be bound per process at a time. A second bind while one is
//! live returns `None` instead of erroring, and dropping the router releases
//! the binding.

use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

use crate::session::SessionId;
use crate::stack::ModalStack;

// Whether a router is currently bound somewhere in the process.
static ROUTER_BOUND: AtomicBool = AtomicBool::new(false);

/// Translates global dismissal input into stack operations.
pub struct DismissalRouter {
    stack: ModalStack,
}

impl DismissalRouter {
    /// Bind the process-wide dismissal router to a stack.
    ///
    /// Returns `None` if a router is already bound; the existing binding
    /// stays in place. The binding is released when the returned router is
    /// dropped.
    pub fn bind(stack: ModalStack) -> Option<Self> {
        if ROUTER_BOUND.swap(true, Ordering::SeqCst) {
            log::warn!("[dismiss] router already bound, ignoring bind");
            return None;
        }
        log::debug!("[dismiss] router bound");
        Some(Self { stack })
    }

    /// The stack this router dismisses into.
    pub fn stack(&self) -> &ModalStack {
        &self.stack
    }

    /// Feed a raw crossterm event through the router.
    ///
    /// Returns true if a session was dismissed.
    pub fn handle_event(&self, event: &CrosstermEvent) -> bool {
        match event {
            CrosstermEvent::Key(key) => self.handle_key(key),
            _ => false,
        }
    }

    /// Handle a key event.
    ///
    /// Only Escape key presses are considered, and only the topmost
    /// session's `allow_escape_close` flag is inspected: sessions beneath it
    /// are never dismissed by Escape while covered. Returns true if a
    /// session was dismissed.
    pub fn handle_key(&self, key: &KeyEvent) -> bool {
        // Only process key press events (not release/repeat on some terminals)
        if key.kind != KeyEventKind::Press || key.code != KeyCode::Esc {
            return false;
        }
        let Some(top) = self.stack.topmost() else {
            return false;
        };
        if !top.display.allow_escape_close {
            log::debug!("[dismiss] escape: topmost {} opted out", top.id);
            return false;
        }
        log::debug!("[dismiss] escape: closing {}", top.id);
        self.stack.close(&top.id);
        true
    }

    /// Handle a click on one session's backdrop, as reported by the
    /// renderer.
    ///
    /// Each session's own `allow_backdrop_close` flag is evaluated
    /// independently; whether clicks ever reach a covered session's backdrop
    /// is the renderer's call. A click for a session that is no longer open
    /// is a no-op. Returns true if the session was dismissed.
    pub fn backdrop_click(&self, id: &SessionId) -> bool {
        let Some(session) = self.stack.get(id) else {
            log::debug!("[dismiss] backdrop click {id}: not open, ignoring");
            return false;
        };
        if !session.display.allow_backdrop_close {
            log::debug!("[dismiss] backdrop click {id}: opted out");
            return false;
        }
        log::debug!("[dismiss] backdrop click: closing {id}");
        self.stack.close(id);
        true
    }
}

impl Drop for DismissalRouter {
    fn drop(&mut self) {
        ROUTER_BOUND.store(false, Ordering::SeqCst);
        log::debug!("[dismiss] router released");
    }
}
