//! Generic input event types for cross-backend compatibility.

/// Mouse button identification.
///
/// Backends map their native button codes to these values; tools decide which
/// buttons they react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (primary button)
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
