/// A small sampling helper for entrance transitions.
///
/// View layers with a declarative transition engine (CSS and the like) only
/// need the one-time "apply visible presentation" instruction from the core;
/// layers that draw every frame themselves use this to interpolate the
/// entrance. A zero duration means instant — the reduced-motion rendition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Transition {
    pub fn new(start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// An already-finished transition (progress 1.0 from the start).
    pub fn instant(start_ms: u64) -> Self {
        Self::new(start_ms, 0, Easing::Linear)
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    /// Eased progress in `0.0..=1.0` at `now_ms`.
    pub fn sample(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        self.easing.sample(t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    /// Fast start, slow settle — the usual shape for content sliding into
    /// place.
    EaseOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}
