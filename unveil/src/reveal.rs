use alloc::vec::Vec;
use core::cell::Cell;

use crate::key::{KeyIndexMap, RegionKey};
use crate::{RegionId, RevealOptions, RevealPhase, RevealProgress};

/// A headless staggered-reveal controller for one page section.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects; regions are opaque keys.
/// - Your adapter drives it by forwarding intersection reports and timestamps.
/// - Presentation is driven back out through the `on_reveal`/`on_unwatch`
///   callbacks in [`RevealOptions`].
///
/// Time never comes from a clock: every entry point that needs it takes a
/// `now_ms` supplied by the embedding layer, and outstanding reveal deadlines
/// fire from [`Reveal::tick`]. For section lifecycle wiring and entrance
/// interpolation, see the `unveil-adapter` crate.
#[derive(Clone, Debug)]
pub struct Reveal<K = RegionId> {
    options: RevealOptions<K>,
    regions: Vec<K>,
    index: KeyIndexMap<K>,
    phases: Vec<RevealPhase>,
    due_ms: Vec<u64>,
    observed: bool,
    torn_down: bool,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<K: RegionKey> Reveal<K> {
    /// Creates an idle controller. Nothing is watched until [`Reveal::observe`].
    pub fn new(options: RevealOptions<K>) -> Self {
        udebug!(
            threshold = options.threshold as f64,
            stagger_ms = options.stagger_ms,
            reduced_motion = options.reduced_motion,
            "Reveal::new"
        );
        Self {
            options,
            regions: Vec::new(),
            index: KeyIndexMap::<K>::new(),
            phases: Vec::new(),
            due_ms: Vec::new(),
            observed: false,
            torn_down: false,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &RevealOptions<K> {
        &self.options
    }

    /// Visible-fraction threshold for the adapter's intersection facility.
    pub fn threshold(&self) -> f32 {
        self.options.threshold
    }

    /// Viewport bottom inset for the adapter's intersection facility.
    pub fn bottom_margin(&self) -> f32 {
        self.options.bottom_margin
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// Intersection facilities typically report several regions per callback
    /// invocation; without batching, each report may trigger `on_change`,
    /// which can be expensive if the callback drives rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    /// Starts watching a fixed, ordered set of regions.
    ///
    /// Each region's position in the input sequence becomes its stagger
    /// index, assigned once and never recomputed. Called once per controller
    /// lifetime; later calls are ignored. An empty sequence leaves the
    /// controller inert — no subscription is established for an observer
    /// that could never fire.
    pub fn observe(&mut self, regions: impl IntoIterator<Item = K>) {
        if self.torn_down {
            uwarn!("observe after teardown ignored");
            return;
        }
        if self.observed {
            uwarn!("observe called twice; region set is fixed at first call");
            return;
        }

        for key in regions {
            if self.index.contains_key(&key) {
                uwarn!("duplicate region key ignored");
                continue;
            }
            self.index.insert(key.clone(), self.regions.len());
            self.regions.push(key);
            self.phases.push(RevealPhase::Pending);
            self.due_ms.push(0);
        }

        if self.regions.is_empty() {
            udebug!("observe with empty region set; controller stays inert");
            return;
        }

        self.observed = true;
        udebug!(regions = self.regions.len(), "Reveal::observe");
        self.notify();
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// True while at least one region is still waiting for its first
    /// intersection report.
    pub fn is_observing(&self) -> bool {
        self.observed
            && !self.torn_down
            && self.phases.iter().any(|p| *p == RevealPhase::Pending)
    }

    pub fn phase(&self, region: &K) -> Option<RevealPhase> {
        self.index.get(region).map(|&i| self.phases[i])
    }

    pub fn phase_at(&self, index: usize) -> Option<RevealPhase> {
        self.phases.get(index).copied()
    }

    /// Stagger index assigned to a region at `observe` time.
    pub fn index_of(&self, region: &K) -> Option<usize> {
        self.index.get(region).copied()
    }

    pub fn regions(&self) -> &[K] {
        &self.regions
    }

    /// Per-phase region counts.
    pub fn progress(&self) -> RevealProgress {
        let mut progress = RevealProgress::default();
        for phase in &self.phases {
            match phase {
                RevealPhase::Pending => progress.pending += 1,
                RevealPhase::Scheduled => progress.scheduled += 1,
                RevealPhase::Visible => progress.visible += 1,
            }
        }
        progress
    }

    /// True once every observed region has been revealed.
    pub fn is_complete(&self) -> bool {
        self.observed && self.phases.iter().all(|p| *p == RevealPhase::Visible)
    }

    fn stagger_for(&self, index: usize) -> u64 {
        if self.options.reduced_motion {
            return 0;
        }
        (index as u64).saturating_mul(self.options.stagger_ms)
    }

    fn unwatch(&self, index: usize) {
        if let Some(cb) = &self.options.on_unwatch {
            cb(&self.regions[index]);
        }
    }

    /// Applies one already-thresholded intersection report.
    ///
    /// Leave reports (`is_intersecting == false`) never do anything: reveal
    /// is a one-way transition with no scroll-away re-hide. The first enter
    /// report moves the region to `Scheduled` with a deadline of
    /// `now_ms + index * stagger_ms` and unsubscribes it; any report after
    /// that is a no-op, so flapping cannot reschedule the deadline.
    ///
    /// Returns `true` if the region was scheduled by this call.
    pub fn apply_intersection(&mut self, region: &K, is_intersecting: bool, now_ms: u64) -> bool {
        if self.torn_down || !self.observed || !is_intersecting {
            return false;
        }
        let Some(&i) = self.index.get(region) else {
            uwarn!("intersection report for unknown region ignored");
            return false;
        };
        if self.phases[i] != RevealPhase::Pending {
            return false;
        }

        self.phases[i] = RevealPhase::Scheduled;
        self.due_ms[i] = now_ms.saturating_add(self.stagger_for(i));
        utrace!(index = i, due_ms = self.due_ms[i], "region scheduled");
        self.unwatch(i);
        self.notify();
        true
    }

    /// Applies a raw visible-fraction report, filtering it through the
    /// construction-time threshold.
    ///
    /// A fraction below the threshold is simply ignored — it is not treated
    /// as a leave event.
    pub fn apply_intersection_ratio(&mut self, region: &K, fraction: f32, now_ms: u64) -> bool {
        if fraction < self.options.threshold {
            return false;
        }
        self.apply_intersection(region, true, now_ms)
    }

    /// Applies a batch of intersection reports with one `on_change`
    /// notification.
    ///
    /// Report order does not matter: each region's transition is independent,
    /// and deadlines depend only on the stagger index assigned at `observe`.
    pub fn apply_intersection_batch(
        &mut self,
        entries: impl IntoIterator<Item = (K, bool)>,
        now_ms: u64,
    ) {
        self.batch_update(|r| {
            for (key, is_intersecting) in entries {
                r.apply_intersection(&key, is_intersecting, now_ms);
            }
        });
    }

    /// Earliest outstanding reveal deadline, if any.
    ///
    /// Lets drivers schedule a precise wake-up instead of polling every
    /// frame.
    pub fn next_due(&self) -> Option<u64> {
        if self.torn_down {
            return None;
        }
        self.phases
            .iter()
            .zip(&self.due_ms)
            .filter(|(p, _)| **p == RevealPhase::Scheduled)
            .map(|(_, due)| *due)
            .min()
    }

    /// Fires every scheduled region whose deadline has passed.
    ///
    /// Returns the number of regions revealed by this call. After
    /// [`Reveal::teardown`] this is a no-op: a deadline outliving its section
    /// fires into nothing.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        self.tick_with(now_ms, |_, _| {})
    }

    /// Like [`Reveal::tick`], additionally handing `(index, region)` of each
    /// newly visible region to `f` without allocating.
    pub fn tick_with(&mut self, now_ms: u64, mut f: impl FnMut(usize, &K)) -> usize {
        if self.torn_down || !self.observed {
            return 0;
        }

        let on_reveal = self.options.on_reveal.clone();
        let mut fired = 0usize;
        for i in 0..self.regions.len() {
            if self.phases[i] != RevealPhase::Scheduled || self.due_ms[i] > now_ms {
                continue;
            }
            self.phases[i] = RevealPhase::Visible;
            fired += 1;
            utrace!(index = i, now_ms, "region visible");
            if let Some(cb) = &on_reveal {
                cb(&self.regions[i]);
            }
            f(i, &self.regions[i]);
        }

        if fired > 0 {
            self.notify();
        }
        fired
    }

    /// Immediately reveals every region that is not yet visible.
    ///
    /// This is the degraded-mode fallback for hosts without an intersection
    /// facility: content is never withheld just because nothing can report
    /// visibility. Pending regions are unsubscribed first.
    pub fn reveal_all(&mut self) -> usize {
        if self.torn_down || !self.observed {
            return 0;
        }

        let on_reveal = self.options.on_reveal.clone();
        let mut fired = 0usize;
        for i in 0..self.regions.len() {
            match self.phases[i] {
                RevealPhase::Visible => continue,
                RevealPhase::Pending => self.unwatch(i),
                RevealPhase::Scheduled => {}
            }
            self.phases[i] = RevealPhase::Visible;
            fired += 1;
            if let Some(cb) = &on_reveal {
                cb(&self.regions[i]);
            }
        }

        if fired > 0 {
            udebug!(revealed = fired, "Reveal::reveal_all");
            self.notify();
        }
        fired
    }

    /// Stops all observation and drops outstanding deadlines.
    ///
    /// Regions still pending are unsubscribed; every later entry point
    /// (including `tick`) becomes a no-op, so a deadline that fires after the
    /// owning section is gone cannot raise or mutate anything observable.
    /// Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        for i in 0..self.regions.len() {
            if self.phases[i] == RevealPhase::Pending {
                self.unwatch(i);
            }
        }
        self.torn_down = true;
        udebug!(regions = self.regions.len(), "Reveal::teardown");
        self.notify();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
