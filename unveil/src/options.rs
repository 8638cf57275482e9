use alloc::sync::Arc;

use crate::reveal::Reveal;
use crate::{
    DEFAULT_BOTTOM_MARGIN, DEFAULT_DELETING_MS, DEFAULT_PAUSE_MS, DEFAULT_STAGGER_MS,
    DEFAULT_THRESHOLD, DEFAULT_TYPING_MS, RegionId,
};

/// A callback fired after a reveal controller's observable state changes.
pub type OnChangeCallback<K> = Arc<dyn Fn(&Reveal<K>) + Send + Sync>;

/// A callback instructing the view layer to apply the visible presentation to
/// a region.
///
/// The instruction is one-time per region but must be idempotent on the view
/// side: applying it to an already-visible region is harmless.
pub type OnRevealCallback<K> = Arc<dyn Fn(&K) + Send + Sync>;

/// A callback instructing the view layer to stop delivering intersection
/// reports for a region.
///
/// Fired exactly once per region, the moment it leaves `Pending` (or at
/// teardown for regions that never intersected).
pub type OnUnwatchCallback<K> = Arc<dyn Fn(&K) + Send + Sync>;

/// A callback receiving the current display text after every typewriter tick.
pub type OnTextCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Configuration for [`crate::Reveal`].
///
/// This type is designed to be cheap to clone: callbacks are stored in `Arc`s
/// so callers can stamp out one options value per page section and tweak only
/// the fields that differ.
pub struct RevealOptions<K = RegionId> {
    /// Visible fraction a region needs before its intersection report counts.
    ///
    /// The controller does not evaluate this itself for pre-thresholded
    /// reports ([`Reveal::apply_intersection`]); it is carried here so the
    /// adapter can configure its intersection facility, and so raw
    /// fraction reports ([`Reveal::apply_intersection_ratio`]) can be
    /// filtered consistently. Callers commonly pass 0.12 or 0.15; the exact
    /// value is a presentation choice with no semantic weight.
    pub threshold: f32,

    /// Viewport bottom inset handed to the intersection facility.
    ///
    /// Negative values shrink the trigger area upward from the bottom edge
    /// (`-0.10` = regions start revealing 10% above the bottom).
    pub bottom_margin: f32,

    /// Per-index delay between reveal transitions. Region `i` becomes visible
    /// `i * stagger_ms` after its intersection report, producing a cascade
    /// instead of a simultaneous pop-in.
    pub stagger_ms: u64,

    /// Ambient reduced-motion preference, read once at construction.
    ///
    /// When set, stagger delays collapse to zero. Content still reveals; it
    /// just does so without perceptible motion.
    pub reduced_motion: bool,

    /// Fired when a region transitions to visible.
    pub on_reveal: Option<OnRevealCallback<K>>,

    /// Fired when a region should be unsubscribed from intersection reports.
    pub on_unwatch: Option<OnUnwatchCallback<K>>,

    /// Optional callback fired when the controller's state changes.
    pub on_change: Option<OnChangeCallback<K>>,
}

impl<K> RevealOptions<K> {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            stagger_ms: DEFAULT_STAGGER_MS,
            reduced_motion: false,
            on_reveal: None,
            on_unwatch: None,
            on_change: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_bottom_margin(mut self, bottom_margin: f32) -> Self {
        self.bottom_margin = bottom_margin;
        self
    }

    pub fn with_stagger_ms(mut self, stagger_ms: u64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn with_on_reveal(mut self, on_reveal: Option<impl Fn(&K) + Send + Sync + 'static>) -> Self {
        self.on_reveal = on_reveal.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_unwatch(
        mut self,
        on_unwatch: Option<impl Fn(&K) + Send + Sync + 'static>,
    ) -> Self {
        self.on_unwatch = on_unwatch.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Reveal<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K> Default for RevealOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for RevealOptions<K> {
    fn clone(&self) -> Self {
        Self {
            threshold: self.threshold,
            bottom_margin: self.bottom_margin,
            stagger_ms: self.stagger_ms,
            reduced_motion: self.reduced_motion,
            on_reveal: self.on_reveal.clone(),
            on_unwatch: self.on_unwatch.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<K> core::fmt::Debug for RevealOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RevealOptions")
            .field("threshold", &self.threshold)
            .field("bottom_margin", &self.bottom_margin)
            .field("stagger_ms", &self.stagger_ms)
            .field("reduced_motion", &self.reduced_motion)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::Typewriter`].
pub struct TypewriterOptions {
    /// Delay after a typed character before the next tick.
    pub typing_ms: u64,
    /// Delay after a deleted character before the next tick.
    pub deleting_ms: u64,
    /// Dwell on a fully typed role before deleting begins.
    pub pause_ms: u64,
    /// Pushed the current display text once per tick.
    pub on_text: Option<OnTextCallback>,
}

impl TypewriterOptions {
    pub fn new() -> Self {
        Self {
            typing_ms: DEFAULT_TYPING_MS,
            deleting_ms: DEFAULT_DELETING_MS,
            pause_ms: DEFAULT_PAUSE_MS,
            on_text: None,
        }
    }

    pub fn with_typing_ms(mut self, typing_ms: u64) -> Self {
        self.typing_ms = typing_ms;
        self
    }

    pub fn with_deleting_ms(mut self, deleting_ms: u64) -> Self {
        self.deleting_ms = deleting_ms;
        self
    }

    pub fn with_pause_ms(mut self, pause_ms: u64) -> Self {
        self.pause_ms = pause_ms;
        self
    }

    pub fn with_on_text(mut self, on_text: Option<impl Fn(&str) + Send + Sync + 'static>) -> Self {
        self.on_text = on_text.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TypewriterOptions {
    fn clone(&self) -> Self {
        Self {
            typing_ms: self.typing_ms,
            deleting_ms: self.deleting_ms,
            pause_ms: self.pause_ms,
            on_text: self.on_text.clone(),
        }
    }
}

impl core::fmt::Debug for TypewriterOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypewriterOptions")
            .field("typing_ms", &self.typing_ms)
            .field("deleting_ms", &self.deleting_ms)
            .field("pause_ms", &self.pause_ms)
            .finish_non_exhaustive()
    }
}
