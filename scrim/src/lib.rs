pub mod area;
pub mod dismiss;
pub mod session;
pub mod stack;
pub mod zindex;

pub use area::{Rect, modal_area};
pub use dismiss::DismissalRouter;
pub use session::{
    CloseHook, DEFAULT_VIEW, DisplayConfig, ModalConfig, ModalKind, ModalPosition, ModalSession,
    ModalSize, RenderSource, SessionId,
};
pub use stack::{ModalStack, SessionSnapshot};
pub use zindex::{Z_BASE, Z_LEVEL_STEP, kind_bonus, z_index};
