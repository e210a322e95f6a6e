//! Session records for open overlays.
//!
//! A [`ModalSession`] is one open overlay: its identity, the view currently
//! shown inside it, the drill-down history behind that view, and the display
//! configuration the renderer needs to paint it. Sessions are owned by the
//! stack; callers and the renderer only ever see snapshots.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};
use uuid::Uuid;

/// View a session shows when opened without an explicit initial view.
pub const DEFAULT_VIEW: &str = "main";

// Monotonic half of session ids.
static SESSION_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a modal session.
///
/// Combines a monotonic serial with a random suffix. Ids are never reused
/// within the process lifetime, including after their session is closed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    fn next() -> Self {
        let serial = SESSION_SERIAL.fetch_add(1, Ordering::Relaxed);
        Self(format!("modal-{serial}-{}", Uuid::new_v4().simple()))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semantic tag for a session, used for layering and display defaults.
///
/// The set is open: `Custom` carries domain-specific tags. Tags outside the
/// built-in set get no layering bonus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalKind {
    #[default]
    Default,
    Confirmation,
    Detail,
    Creation,
    Critical,
    Custom(String),
}

/// Modal size configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ModalSize {
    /// Small preset (30% of screen).
    Sm,
    /// Medium preset (50% of screen).
    #[default]
    Md,
    /// Large preset (80% of screen).
    Lg,
    /// Fixed size in cells.
    Fixed { width: u16, height: u16 },
    /// Proportional to screen size (0.0 - 1.0).
    Proportional { width: f32, height: f32 },
}

/// Modal position configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ModalPosition {
    /// Centered on screen (default).
    #[default]
    Centered,
    /// Absolute position from top-left corner.
    At { x: u16, y: u16 },
}

/// What the renderer should paint inside a session.
///
/// Resolved once when the session is opened; the core never inspects it
/// again.
#[derive(Debug, Clone, Default)]
pub enum RenderSource {
    /// A named render target plus its inputs.
    Component {
        target: String,
        props: Map<String, Value>,
    },
    /// Raw content, rendered as-is.
    Raw(String),
    /// Nothing usable was supplied; the renderer substitutes its fallback
    /// display.
    #[default]
    Fallback,
}

/// Display configuration, passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub size: ModalSize,
    pub position: ModalPosition,
    /// Cover the whole screen, ignoring `size` and `position`.
    pub fullscreen: bool,
    /// Whether a click on this session's backdrop dismisses it.
    pub allow_backdrop_close: bool,
    /// Whether Escape dismisses this session while it is topmost.
    pub allow_escape_close: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            size: ModalSize::default(),
            position: ModalPosition::default(),
            fullscreen: false,
            allow_backdrop_close: true,
            allow_escape_close: true,
        }
    }
}

/// Hook invoked exactly once when its session is removed from the stack.
pub type CloseHook = Box<dyn FnOnce() + Send>;

/// Configuration for opening a session.
///
/// # Example
///
/// ```ignore
/// let id = stack.open(
///     ModalConfig::new()
///         .kind(ModalKind::Confirmation)
///         .size(ModalSize::Sm)
///         .raw("Discard changes?")
///         .allow_backdrop_close(false),
/// );
/// ```
#[derive(Default)]
pub struct ModalConfig {
    kind: ModalKind,
    initial_view: Option<String>,
    initial_view_data: Map<String, Value>,
    source: RenderSource,
    display: DisplayConfig,
    on_close: Option<CloseHook>,
}

impl ModalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Semantic kind, used for layering and display defaults.
    pub fn kind(mut self, kind: ModalKind) -> Self {
        self.kind = kind;
        self
    }

    /// View shown when the session opens. Defaults to [`DEFAULT_VIEW`].
    pub fn initial_view(mut self, view: impl Into<String>) -> Self {
        self.initial_view = Some(view.into());
        self
    }

    /// Payload visible to the initial view. Defaults to an empty payload.
    pub fn initial_view_data(mut self, data: Map<String, Value>) -> Self {
        self.initial_view_data = data;
        self
    }

    /// Render a named component with the given inputs.
    pub fn component(mut self, target: impl Into<String>, props: Map<String, Value>) -> Self {
        self.source = RenderSource::Component {
            target: target.into(),
            props,
        };
        self
    }

    /// Render raw content.
    pub fn raw(mut self, content: impl Into<String>) -> Self {
        self.source = RenderSource::Raw(content.into());
        self
    }

    pub fn size(mut self, size: ModalSize) -> Self {
        self.display.size = size;
        self
    }

    pub fn position(mut self, position: ModalPosition) -> Self {
        self.display.position = position;
        self
    }

    /// Cover the whole screen.
    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.display.fullscreen = fullscreen;
        self
    }

    pub fn allow_backdrop_close(mut self, allow: bool) -> Self {
        self.display.allow_backdrop_close = allow;
        self
    }

    pub fn allow_escape_close(mut self, allow: bool) -> Self {
        self.display.allow_escape_close = allow;
        self
    }

    /// Hook invoked exactly once when the session is removed, by whichever
    /// close path removes it.
    pub fn on_close(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }
}

/// One open overlay session.
pub struct ModalSession {
    id: SessionId,
    kind: ModalKind,
    current_view: String,
    navigation_history: Vec<String>,
    view_data: Map<String, Value>,
    source: RenderSource,
    display: DisplayConfig,
    on_close: Option<CloseHook>,
}

impl ModalSession {
    pub(crate) fn from_config(config: ModalConfig) -> Self {
        Self {
            id: SessionId::next(),
            kind: config.kind,
            current_view: config
                .initial_view
                .unwrap_or_else(|| DEFAULT_VIEW.to_string()),
            navigation_history: Vec::new(),
            view_data: config.initial_view_data,
            source: config.source,
            display: config.display,
            on_close: config.on_close,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn kind(&self) -> &ModalKind {
        &self.kind
    }

    /// View identifier presently shown inside this session.
    pub fn current_view(&self) -> &str {
        &self.current_view
    }

    /// Payload visible to the current view.
    pub fn view_data(&self) -> &Map<String, Value> {
        &self.view_data
    }

    pub fn source(&self) -> &RenderSource {
        &self.source
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Whether `go_back` would change the current view.
    pub fn can_go_back(&self) -> bool {
        !self.navigation_history.is_empty()
    }

    /// Show `view`, remembering the current view in the history and
    /// shallow-merging `data` into the session's view data.
    pub(crate) fn navigate(&mut self, view: String, data: Map<String, Value>) {
        let previous = std::mem::replace(&mut self.current_view, view);
        self.navigation_history.push(previous);
        for (key, value) in data {
            self.view_data.insert(key, value);
        }
    }

    /// Return to the previously shown view.
    ///
    /// At the root view there is nothing to pop and the session stays put;
    /// dismissing from the root takes an explicit close.
    pub(crate) fn go_back(&mut self) -> bool {
        match self.navigation_history.pop() {
            Some(previous) => {
                self.current_view = previous;
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_close_hook(&mut self) -> Option<CloseHook> {
        self.on_close.take()
    }
}
