/// Default per-index reveal delay, in milliseconds.
pub const DEFAULT_STAGGER_MS: u64 = 80;

/// Default delay between typed characters, in milliseconds.
pub const DEFAULT_TYPING_MS: u64 = 80;

/// Default delay between deleted characters, in milliseconds.
pub const DEFAULT_DELETING_MS: u64 = 40;

/// Default dwell on a fully typed role before deleting begins, in milliseconds.
pub const DEFAULT_PAUSE_MS: u64 = 1200;

/// Default visible fraction a region needs before it triggers.
pub const DEFAULT_THRESHOLD: f32 = 0.15;

/// Default viewport bottom inset: the trigger area ends 10% above the bottom
/// edge, so regions reveal slightly before they would naturally scroll in.
pub const DEFAULT_BOTTOM_MARGIN: f32 = -0.10;

/// Lifecycle of a single watched region.
///
/// Transitions are strictly one-way: `Pending -> Scheduled -> Visible`.
/// A region is unwatched the moment it leaves `Pending`, so flapping
/// intersection reports cannot schedule it twice, and nothing ever moves a
/// region back toward hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RevealPhase {
    /// Watched, waiting for its first intersection report.
    Pending,
    /// Intersected once; a one-shot deadline is outstanding.
    Scheduled,
    /// Revealed. Terminal.
    Visible,
}

/// One state of the typewriter cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypewriterPhase {
    /// The display text is growing toward the current role.
    Typing,
    /// The full role is held on screen for one dwell period.
    Pausing,
    /// The display text is shrinking toward empty.
    Deleting,
}

/// The outcome of one typewriter tick.
///
/// `phase` describes the frame that was just emitted (read the text itself
/// via [`crate::Typewriter::display_text`]); `next_delay_ms` is how long the
/// driver should wait before calling `tick` again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayUpdate {
    pub phase: TypewriterPhase,
    pub next_delay_ms: u64,
}

/// Default region handle for callers that identify regions by number.
pub type RegionId = u64;
