//! Paint-order resolution for stacked sessions.
//!
//! Pure arithmetic over a session's live stack level and its kind; the
//! renderer calls this per session on every repaint.

use crate::session::ModalKind;

/// Base z-index for the overlay layer; everything below belongs to the page.
pub const Z_BASE: i32 = 15_000;

/// Z-index step between adjacent stack levels.
pub const Z_LEVEL_STEP: i32 = 100;

/// Fixed layering bonus for a session kind.
///
/// Domain-specific tags get no bonus.
pub fn kind_bonus(kind: &ModalKind) -> i32 {
    match kind {
        ModalKind::Critical => 1_000,
        ModalKind::Confirmation => 500,
        ModalKind::Detail => 400,
        ModalKind::Creation => 300,
        ModalKind::Default | ModalKind::Custom(_) => 0,
    }
}

/// Compute the paint-order z-index for a session.
///
/// `level` is the session's live index in the stack at render time; re-query
/// it from a fresh snapshot rather than caching it across closes, so levels
/// stay contiguous after sessions beneath are removed.
pub fn z_index(level: usize, kind: &ModalKind) -> i32 {
    Z_BASE + level as i32 * Z_LEVEL_STEP + kind_bonus(kind)
}
