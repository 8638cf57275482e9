use alloc::vec::Vec;

use unveil::{RegionId, Reveal, RevealOptions, Typewriter};

use crate::{Easing, SectionKey, Transition};

/// Default entrance transition duration. Individual sections in the wild run
/// anywhere from ~640 to ~700 ms; pick per section with
/// [`Section::with_transition`].
pub const DEFAULT_TRANSITION_MS: u64 = 700;

/// Which edge a region slides in from when it reveals.
///
/// A pure presentation hint carried per region: it never influences
/// scheduling, and view layers that only fade are free to ignore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entrance {
    Left,
    Right,
    #[default]
    Bottom,
}

/// A framework-neutral owner for one page section's animation state.
///
/// Wraps one `unveil::Reveal` plus, for hero sections, one
/// `unveil::Typewriter`, and gives them the explicit lifecycle the core
/// expects. Adapters drive it by calling:
/// - `mount` / `unmount` when the section enters/leaves the page
/// - `on_intersections` when the intersection facility reports
/// - `tick(now_ms)` from a timer armed with the returned deadline
///
/// This type does not hold any UI objects. A section is single-mount, like
/// the controller it owns: build a fresh one when the section comes back.
#[derive(Clone, Debug)]
pub struct Section<K = RegionId> {
    reveal: Reveal<K>,
    typewriter: Option<Typewriter>,
    typewriter_due_ms: u64,
    transition_ms: u64,
    easing: Easing,
    entrances: Vec<Entrance>,
    active: Vec<(usize, Transition)>,
    mounted: bool,
}

impl<K: SectionKey> Section<K> {
    pub fn new(options: RevealOptions<K>) -> Self {
        Self::from_reveal(Reveal::new(options))
    }

    pub fn from_reveal(reveal: Reveal<K>) -> Self {
        Self {
            reveal,
            typewriter: None,
            typewriter_due_ms: 0,
            transition_ms: DEFAULT_TRANSITION_MS,
            easing: Easing::EaseOutCubic,
            entrances: Vec::new(),
            active: Vec::new(),
            mounted: false,
        }
    }

    /// Attaches a typewriter (hero sections own exactly one).
    pub fn with_typewriter(mut self, typewriter: Typewriter) -> Self {
        self.typewriter = Some(typewriter);
        self
    }

    /// Sets the entrance transition pacing for this section.
    pub fn with_transition(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.transition_ms = duration_ms;
        self.easing = easing;
        self
    }

    pub fn reveal(&self) -> &Reveal<K> {
        &self.reveal
    }

    pub fn reveal_mut(&mut self) -> &mut Reveal<K> {
        &mut self.reveal
    }

    pub fn typewriter(&self) -> Option<&Typewriter> {
        self.typewriter.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current hero line, if this section owns a typewriter.
    pub fn display_text(&self) -> Option<&str> {
        self.typewriter.as_ref().map(|tw| tw.display_text())
    }

    /// Mounts the section, observing `regions` with the default entrance.
    pub fn mount(&mut self, regions: impl IntoIterator<Item = K>, now_ms: u64) {
        self.mount_with(regions.into_iter().map(|k| (k, Entrance::default())), now_ms);
    }

    /// Mounts the section with a per-region entrance edge.
    ///
    /// A second mount is ignored; a section that already lived once stays
    /// torn down. An empty region set leaves the reveal side inert (a
    /// typewriter still runs — hero sections have no reveal items).
    pub fn mount_with(&mut self, regions: impl IntoIterator<Item = (K, Entrance)>, now_ms: u64) {
        if self.mounted || self.reveal.is_torn_down() {
            return;
        }

        let pairs: Vec<(K, Entrance)> = regions.into_iter().collect();
        self.reveal.observe(pairs.iter().map(|(k, _)| k.clone()));

        self.entrances = alloc::vec![Entrance::default(); self.reveal.len()];
        for (key, entrance) in &pairs {
            if let Some(i) = self.reveal.index_of(key) {
                self.entrances[i] = *entrance;
            }
        }

        if let Some(tw) = &self.typewriter {
            self.typewriter_due_ms = now_ms.saturating_add(tw.initial_delay_ms());
        }
        self.mounted = true;
    }

    /// Forwards one intersection report.
    pub fn on_intersection(&mut self, region: &K, is_intersecting: bool, now_ms: u64) -> bool {
        if !self.mounted {
            return false;
        }
        self.reveal.apply_intersection(region, is_intersecting, now_ms)
    }

    /// Forwards a batch of intersection reports (facilities typically report
    /// several regions per callback).
    pub fn on_intersections(
        &mut self,
        entries: impl IntoIterator<Item = (K, bool)>,
        now_ms: u64,
    ) {
        if !self.mounted {
            return;
        }
        self.reveal.apply_intersection_batch(entries, now_ms);
    }

    /// Advances the section.
    ///
    /// Fires due reveal deadlines (starting an entrance transition for each
    /// newly visible region), runs at most one due typewriter tick, and
    /// prunes finished transitions. Returns the next deadline to arm a timer
    /// for, or `None` when nothing is outstanding.
    ///
    /// After [`Section::unmount`] this is a no-op returning `None`, so a
    /// stray timer firing late cannot mutate anything.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        if !self.mounted {
            return None;
        }

        let duration_ms = if self.reveal.options().reduced_motion {
            0
        } else {
            self.transition_ms
        };
        let easing = self.easing;
        let active = &mut self.active;
        self.reveal.tick_with(now_ms, |i, _| {
            active.push((i, Transition::new(now_ms, duration_ms, easing)));
        });

        if let Some(tw) = &mut self.typewriter {
            if now_ms >= self.typewriter_due_ms {
                let update = tw.tick();
                self.typewriter_due_ms = now_ms.saturating_add(update.next_delay_ms);
            }
        }

        self.active.retain(|(_, t)| !t.is_done(now_ms));
        self.next_deadline()
    }

    fn next_deadline(&self) -> Option<u64> {
        let mut next = self.reveal.next_due();
        if self.typewriter.is_some() {
            next = Some(next.map_or(self.typewriter_due_ms, |n| n.min(self.typewriter_due_ms)));
        }
        for (_, t) in &self.active {
            let end = t.end_ms();
            next = Some(next.map_or(end, |n| n.min(end)));
        }
        next
    }

    /// Entrance edge for a region, by key.
    pub fn entrance_of(&self, region: &K) -> Option<Entrance> {
        self.reveal.index_of(region).map(|i| self.entrances[i])
    }

    pub fn entrance_at(&self, index: usize) -> Option<Entrance> {
        self.entrances.get(index).copied()
    }

    /// Eased entrance progress for a region: `0.0` while hidden, interpolated
    /// while its transition runs, `1.0` once settled.
    pub fn progress_of(&self, region: &K, now_ms: u64) -> f32 {
        match self.reveal.index_of(region) {
            Some(i) => self.progress_at(i, now_ms),
            None => 0.0,
        }
    }

    pub fn progress_at(&self, index: usize, now_ms: u64) -> f32 {
        if self.reveal.phase_at(index) != Some(unveil::RevealPhase::Visible) {
            return 0.0;
        }
        self.active
            .iter()
            .find(|(i, _)| *i == index)
            .map_or(1.0, |(_, t)| t.sample(now_ms))
    }

    /// Reveals everything at once, skipping transitions.
    ///
    /// The fallback for hosts without an intersection facility: content is
    /// never withheld just because visibility cannot be reported.
    pub fn reveal_immediately(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        self.reveal.reveal_all()
    }

    /// Unmounts the section: all observation stops, outstanding deadlines and
    /// transitions are dropped, and later ticks are inert.
    ///
    /// The typewriter value is kept so its cycle position can still be
    /// captured for a successor section.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.reveal.teardown();
        self.active.clear();
        self.mounted = false;
    }
}
