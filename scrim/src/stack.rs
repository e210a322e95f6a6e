//! The modal stack: the ordered collection of open sessions and the
//! operations that create, navigate, and destroy them.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};

use crate::session::{
    DisplayConfig, ModalConfig, ModalKind, ModalSession, RenderSource, SessionId,
};

/// Ordered collection of open sessions; topmost is the last element.
///
/// The stack is a clonable handle over shared state: clones address the same
/// stack, which is how close hooks and the dismissal router call back into
/// it. Operations are synchronous and apply in invocation order. None of
/// them fail outward: an operation naming a session that is no longer open
/// is a logged no-op, since races between user input and programmatic closes
/// are expected and harmless.
#[derive(Clone, Default)]
pub struct ModalStack {
    inner: Arc<Mutex<Vec<ModalSession>>>,
}

/// Read-only view of one session, handed to the renderer.
///
/// `level` is the session's position in the stack at the time the snapshot
/// was taken. Levels are live: closing a session re-packs the levels of
/// everything above it.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub level: usize,
    pub kind: ModalKind,
    pub current_view: String,
    pub view_data: Map<String, Value>,
    pub can_go_back: bool,
    pub source: RenderSource,
    pub display: DisplayConfig,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ModalSession>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open a new session on top of the stack and return its id.
    ///
    /// The render source is not validated here; a misconfigured session gets
    /// the renderer's fallback display.
    pub fn open(&self, config: ModalConfig) -> SessionId {
        let session = ModalSession::from_config(config);
        let id = session.id().clone();
        let mut sessions = self.lock();
        log::debug!(
            "[stack] open {id} ({:?}) at level {}",
            session.kind(),
            sessions.len()
        );
        sessions.push(session);
        id
    }

    /// Close the session with the given id.
    ///
    /// The session is removed and its close hook runs exactly once. Closing
    /// an id that is no longer open is a no-op.
    pub fn close(&self, id: &SessionId) {
        let removed = {
            let mut sessions = self.lock();
            match sessions.iter().position(|s| s.id() == id) {
                Some(index) => sessions.remove(index),
                None => {
                    log::debug!("[stack] close {id}: not open, ignoring");
                    return;
                }
            }
        };
        log::debug!("[stack] close {id}");
        run_close_hook(removed);
    }

    /// Close the topmost session, if any.
    pub fn close_topmost(&self) {
        let removed = self.lock().pop();
        match removed {
            Some(session) => {
                log::debug!("[stack] close_topmost {}", session.id());
                run_close_hook(session);
            }
            None => log::trace!("[stack] close_topmost: stack empty"),
        }
    }

    /// Close every open session.
    ///
    /// The stack is drained before any hook runs, so hooks observe an empty
    /// stack and may re-enter it (e.g. open a follow-up session) without
    /// disturbing the iteration. A panicking hook is isolated and logged;
    /// the remaining hooks still run.
    pub fn close_all(&self) {
        let drained: Vec<ModalSession> = {
            let mut sessions = self.lock();
            sessions.drain(..).collect()
        };
        if drained.is_empty() {
            return;
        }
        log::debug!("[stack] close_all: {} sessions", drained.len());
        for session in drained {
            run_close_hook(session);
        }
    }

    /// Show `view` inside the session, pushing its current view onto the
    /// history and shallow-merging `data` into its view data.
    ///
    /// Only this session's history and data are touched; sessions above and
    /// below are unaffected.
    pub fn navigate(&self, id: &SessionId, view: impl Into<String>, data: Map<String, Value>) {
        let mut sessions = self.lock();
        match sessions.iter_mut().find(|s| s.id() == id) {
            Some(session) => {
                let view = view.into();
                log::trace!("[stack] navigate {id}: {} -> {view}", session.current_view());
                session.navigate(view, data);
            }
            None => log::debug!("[stack] navigate {id}: not open, ignoring"),
        }
    }

    /// Return the session to the view it showed before the last `navigate`.
    ///
    /// A session already at its root view stays put; dismissing it takes an
    /// explicit `close`.
    pub fn go_back(&self, id: &SessionId) {
        let mut sessions = self.lock();
        match sessions.iter_mut().find(|s| s.id() == id) {
            Some(session) => {
                if !session.go_back() {
                    log::trace!("[stack] go_back {id}: at root view");
                }
            }
            None => log::debug!("[stack] go_back {id}: not open, ignoring"),
        }
    }

    /// Snapshot of every open session in paint order (bottom first).
    pub fn sessions(&self) -> Vec<SessionSnapshot> {
        let sessions = self.lock();
        sessions
            .iter()
            .enumerate()
            .map(|(level, session)| snapshot(level, session))
            .collect()
    }

    /// Snapshot of one session.
    pub fn get(&self, id: &SessionId) -> Option<SessionSnapshot> {
        let sessions = self.lock();
        sessions
            .iter()
            .position(|s| s.id() == id)
            .map(|level| snapshot(level, &sessions[level]))
    }

    /// Snapshot of the topmost session.
    pub fn topmost(&self) -> Option<SessionSnapshot> {
        let sessions = self.lock();
        sessions
            .last()
            .map(|session| snapshot(sessions.len() - 1, session))
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the stack has no open sessions.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

fn snapshot(level: usize, session: &ModalSession) -> SessionSnapshot {
    SessionSnapshot {
        id: session.id().clone(),
        level,
        kind: session.kind().clone(),
        current_view: session.current_view().to_string(),
        view_data: session.view_data().clone(),
        can_go_back: session.can_go_back(),
        source: session.source().clone(),
        display: session.display().clone(),
    }
}

/// Run a removed session's close hook, isolating panics.
///
/// Hooks are caller code; one panicking hook must not stop the remaining
/// hooks of a bulk close or leave the stack half-mutated.
fn run_close_hook(mut session: ModalSession) {
    let Some(hook) = session.take_close_hook() else {
        return;
    };
    if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(hook)) {
        log::warn!(
            "[stack] close hook for {} panicked: {}",
            session.id(),
            extract_panic_message(&panic)
        );
    }
}

/// Extract panic message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
