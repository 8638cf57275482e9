/// A lightweight, serializable snapshot of a typewriter's position in its
/// cycle.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
/// Useful for keeping the hero line from restarting mid-word when its owning
/// section is rebuilt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypewriterState {
    pub role_index: usize,
    pub shown: usize,
    pub deleting: bool,
}

/// Per-phase region counts for a reveal controller.
///
/// This is the cheap summary handed to `on_change` consumers; it never
/// exposes region handles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealProgress {
    pub pending: usize,
    pub scheduled: usize,
    pub visible: usize,
}

impl RevealProgress {
    pub fn total(&self) -> usize {
        self.pending + self.scheduled + self.visible
    }

    /// True once every observed region has been revealed.
    pub fn is_complete(&self) -> bool {
        self.total() > 0 && self.visible == self.total()
    }
}
