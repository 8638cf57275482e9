use crate::*;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn counting_options(
    revealed: &Arc<AtomicUsize>,
    unwatched: &Arc<AtomicUsize>,
    changed: &Arc<AtomicUsize>,
) -> RevealOptions<RegionId> {
    RevealOptions::new()
        .with_on_reveal(Some({
            let revealed = Arc::clone(revealed);
            move |_: &RegionId| {
                revealed.fetch_add(1, Ordering::Relaxed);
            }
        }))
        .with_on_unwatch(Some({
            let unwatched = Arc::clone(unwatched);
            move |_: &RegionId| {
                unwatched.fetch_add(1, Ordering::Relaxed);
            }
        }))
        .with_on_change(Some({
            let changed = Arc::clone(changed);
            move |_: &Reveal<RegionId>| {
                changed.fetch_add(1, Ordering::Relaxed);
            }
        }))
}

// =============================================================================
// Reveal
// =============================================================================

#[test]
fn staggered_deadlines_follow_assignment_order() {
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new());
    r.observe(0..5u64);

    r.apply_intersection_batch((0..5u64).map(|k| (k, true)), 0);

    // Deadlines are index-proportional: region i is due at i * 80.
    assert_eq!(r.next_due(), Some(0));
    assert_eq!(r.tick(0), 1);
    assert_eq!(r.phase(&0), Some(RevealPhase::Visible));
    assert_eq!(r.phase(&1), Some(RevealPhase::Scheduled));

    assert_eq!(r.tick(79), 0);
    assert_eq!(r.tick(80), 1);
    assert_eq!(r.phase(&1), Some(RevealPhase::Visible));

    // A late tick flushes everything still outstanding.
    assert_eq!(r.tick(10_000), 3);
    assert!(r.is_complete());
}

#[test]
fn same_instant_batch_reveals_in_index_order() {
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new());
    r.observe([4u64, 7, 9]);
    r.apply_intersection_batch([(9u64, true), (4, true), (7, true)], 100);

    let mut order = Vec::new();
    r.tick_with(100 + 2 * 80, |i, key| order.push((i, *key)));
    assert_eq!(order, [(0, 4u64), (1, 7), (2, 9)]);
}

#[test]
fn repeat_intersections_do_not_reschedule() {
    let revealed = Arc::new(AtomicUsize::new(0));
    let unwatched = Arc::new(AtomicUsize::new(0));
    let changed = Arc::new(AtomicUsize::new(0));
    let mut r = Reveal::new(counting_options(&revealed, &unwatched, &changed));
    r.observe([10u64, 11]);

    assert!(r.apply_intersection(&11, true, 0));
    assert_eq!(unwatched.load(Ordering::Relaxed), 1);

    // Flapping after the first report is ignored: the deadline stays put.
    assert!(!r.apply_intersection(&11, true, 1_000));
    assert!(!r.apply_intersection(&11, false, 1_000));
    assert_eq!(r.next_due(), Some(80));
    assert_eq!(unwatched.load(Ordering::Relaxed), 1);

    r.tick(80);
    assert_eq!(revealed.load(Ordering::Relaxed), 1);

    // Even a report on a visible region stays a no-op.
    assert!(!r.apply_intersection(&11, true, 2_000));
    r.tick(10_000);
    assert_eq!(revealed.load(Ordering::Relaxed), 1);
}

#[test]
fn leave_reports_never_move_a_region_backward() {
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new());
    r.observe([1u64, 2]);

    assert!(!r.apply_intersection(&1, false, 0));
    assert_eq!(r.phase(&1), Some(RevealPhase::Pending));

    r.apply_intersection(&1, true, 0);
    assert!(!r.apply_intersection(&1, false, 10));
    assert_eq!(r.phase(&1), Some(RevealPhase::Scheduled));

    r.tick(10);
    assert!(!r.apply_intersection(&1, false, 20));
    assert_eq!(r.phase(&1), Some(RevealPhase::Visible));
}

#[test]
fn empty_observe_establishes_no_subscription() {
    let changed = Arc::new(AtomicUsize::new(0));
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new().with_on_change(Some({
        let changed = Arc::clone(&changed);
        move |_: &Reveal<RegionId>| {
            changed.fetch_add(1, Ordering::Relaxed);
        }
    })));

    r.observe(core::iter::empty::<RegionId>());
    assert!(!r.is_observing());
    assert!(!r.apply_intersection(&0, true, 0));
    assert_eq!(r.tick(1_000), 0);
    assert_eq!(r.reveal_all(), 0);
    assert_eq!(changed.load(Ordering::Relaxed), 0);
}

#[test]
fn observe_is_once_per_lifetime() {
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new());
    r.observe([1u64, 2]);
    r.observe([3u64, 4, 5]);
    assert_eq!(r.len(), 2);
    assert_eq!(r.index_of(&1), Some(0));
    assert_eq!(r.index_of(&3), None);
}

#[test]
fn duplicate_region_keys_keep_first_assignment() {
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new());
    r.observe([5u64, 6, 5]);
    assert_eq!(r.len(), 2);
    assert_eq!(r.index_of(&6), Some(1));
}

#[test]
fn fraction_reports_filter_through_threshold() {
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new().with_threshold(0.12));
    r.observe([1u64]);

    // Below-threshold fractions are ignored, not treated as leave events.
    assert!(!r.apply_intersection_ratio(&1, 0.10, 0));
    assert_eq!(r.phase(&1), Some(RevealPhase::Pending));

    assert!(r.apply_intersection_ratio(&1, 0.12, 0));
    assert_eq!(r.phase(&1), Some(RevealPhase::Scheduled));
}

#[test]
fn reduced_motion_reveals_without_stagger() {
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new().with_reduced_motion(true));
    r.observe(0..6u64);
    r.apply_intersection_batch((0..6u64).map(|k| (k, true)), 500);

    // Every deadline collapses to the report instant; nothing stays hidden.
    assert_eq!(r.next_due(), Some(500));
    assert_eq!(r.tick(500), 6);
    assert!(r.is_complete());
}

#[test]
fn reveal_all_covers_hosts_without_an_intersection_facility() {
    let revealed = Arc::new(AtomicUsize::new(0));
    let unwatched = Arc::new(AtomicUsize::new(0));
    let changed = Arc::new(AtomicUsize::new(0));
    let mut r = Reveal::new(counting_options(&revealed, &unwatched, &changed));
    r.observe(0..4u64);

    // One region already mid-flight, the rest never intersected.
    r.apply_intersection(&0, true, 0);

    assert_eq!(r.reveal_all(), 4);
    assert!(r.is_complete());
    assert_eq!(revealed.load(Ordering::Relaxed), 4);
    // Only the three still-pending regions needed an unsubscribe here.
    assert_eq!(unwatched.load(Ordering::Relaxed), 4);

    // Idempotent: nothing left to reveal.
    assert_eq!(r.reveal_all(), 0);
    assert_eq!(revealed.load(Ordering::Relaxed), 4);
}

#[test]
fn teardown_unsubscribes_and_makes_late_timers_inert() {
    let revealed = Arc::new(AtomicUsize::new(0));
    let unwatched = Arc::new(AtomicUsize::new(0));
    let changed = Arc::new(AtomicUsize::new(0));
    let mut r = Reveal::new(counting_options(&revealed, &unwatched, &changed));
    r.observe(0..3u64);

    r.apply_intersection(&0, true, 0); // scheduled, already unwatched
    r.teardown();
    assert_eq!(unwatched.load(Ordering::Relaxed), 3);

    let changes_after_teardown = changed.load(Ordering::Relaxed);

    // The outstanding deadline fires into nothing: no panic, no callback,
    // no observable mutation.
    assert_eq!(r.tick(10_000), 0);
    assert!(!r.apply_intersection(&1, true, 10_000));
    assert_eq!(r.reveal_all(), 0);
    assert_eq!(r.phase(&0), Some(RevealPhase::Scheduled));
    assert_eq!(revealed.load(Ordering::Relaxed), 0);
    assert_eq!(changed.load(Ordering::Relaxed), changes_after_teardown);

    // Idempotent.
    r.teardown();
    assert_eq!(unwatched.load(Ordering::Relaxed), 3);
    assert_eq!(changed.load(Ordering::Relaxed), changes_after_teardown);
}

#[test]
fn batch_reports_coalesce_on_change() {
    let changed = Arc::new(AtomicUsize::new(0));
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new().with_on_change(Some({
        let changed = Arc::clone(&changed);
        move |_: &Reveal<RegionId>| {
            changed.fetch_add(1, Ordering::Relaxed);
        }
    })));
    r.observe(0..4u64);
    assert_eq!(changed.load(Ordering::Relaxed), 1);

    r.apply_intersection_batch((0..4u64).map(|k| (k, true)), 0);
    assert_eq!(changed.load(Ordering::Relaxed), 2);

    // A tick that reveals several regions notifies once.
    r.tick(10_000);
    assert_eq!(changed.load(Ordering::Relaxed), 3);
}

#[test]
fn no_op_reports_do_not_notify() {
    let changed = Arc::new(AtomicUsize::new(0));
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new().with_on_change(Some({
        let changed = Arc::clone(&changed);
        move |_: &Reveal<RegionId>| {
            changed.fetch_add(1, Ordering::Relaxed);
        }
    })));
    r.observe([1u64]);
    let after_observe = changed.load(Ordering::Relaxed);

    r.apply_intersection(&1, false, 0);
    r.apply_intersection(&99, true, 0); // unknown key
    assert_eq!(r.tick(0), 0); // nothing scheduled
    assert_eq!(changed.load(Ordering::Relaxed), after_observe);
}

#[test]
fn progress_counts_every_phase() {
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new());
    r.observe(0..4u64);
    r.apply_intersection(&0, true, 0);
    r.apply_intersection(&1, true, 0);
    r.tick(0); // index 0 due immediately

    let p = r.progress();
    assert_eq!(p.pending, 2);
    assert_eq!(p.scheduled, 1);
    assert_eq!(p.visible, 1);
    assert_eq!(p.total(), 4);
    assert!(!p.is_complete());
    assert!(!r.is_complete());

    r.reveal_all();
    assert!(r.progress().is_complete());
}

#[test]
fn next_due_tracks_the_earliest_outstanding_deadline() {
    let mut r: Reveal<RegionId> = Reveal::new(RevealOptions::new());
    r.observe(0..3u64);
    assert_eq!(r.next_due(), None);

    r.apply_intersection(&2, true, 100); // due 100 + 2*80 = 260
    assert_eq!(r.next_due(), Some(260));

    r.apply_intersection(&1, true, 150); // due 150 + 80 = 230
    assert_eq!(r.next_due(), Some(230));

    r.tick(230);
    assert_eq!(r.next_due(), Some(260));
    r.tick(260);
    assert_eq!(r.next_due(), None);
}

#[test]
fn property_random_report_streams_preserve_invariants() {
    // Fixed seeds => deterministic, non-flaky "property" coverage.
    for seed in [1u64, 2, 3, 7, 99, 1234] {
        let mut rng = Lcg::new(seed);
        let count = rng.gen_range_usize(1, 24);
        let stagger = rng.gen_range_u64(0, 120);

        let revealed_keys = Arc::new(Mutex::new(Vec::<RegionId>::new()));
        let options = RevealOptions::new()
            .with_stagger_ms(stagger)
            .with_on_reveal(Some({
                let revealed_keys = Arc::clone(&revealed_keys);
                move |k: &RegionId| revealed_keys.lock().unwrap().push(*k)
            }));

        let mut r = Reveal::new(options);
        r.observe(0..count as u64);

        // Expected model: first enter report per region wins.
        let mut first_report = alloc::vec![None::<u64>; count];
        let mut now = 0u64;
        for _ in 0..count * 4 {
            now += rng.gen_range_u64(0, 50);
            let key = rng.gen_range_u64(0, count as u64);
            let entering = rng.gen_bool();
            r.apply_intersection(&key, entering, now);
            if entering && first_report[key as usize].is_none() {
                first_report[key as usize] = Some(now);
            }
            // Interleave partial ticks.
            if rng.gen_bool() {
                r.tick(now);
            }
        }
        r.tick(u64::MAX);

        // Exactly the reported regions became visible, exactly once each.
        let mut seen = revealed_keys.lock().unwrap().clone();
        seen.sort_unstable();
        let mut expected: Vec<RegionId> = (0..count as u64)
            .filter(|k| first_report[*k as usize].is_some())
            .collect();
        expected.sort_unstable();
        assert_eq!(seen, expected, "seed {seed}");
        let deduped = {
            let mut s = seen.clone();
            s.dedup();
            s
        };
        assert_eq!(seen, deduped, "seed {seed}: a region revealed twice");

        for k in 0..count as u64 {
            let phase = r.phase(&k).unwrap();
            match first_report[k as usize] {
                Some(_) => assert_eq!(phase, RevealPhase::Visible, "seed {seed}"),
                None => assert_eq!(phase, RevealPhase::Pending, "seed {seed}"),
            }
        }

        // Stray events after teardown change nothing.
        r.teardown();
        let snapshot = r.progress();
        r.apply_intersection(&0, true, u64::MAX);
        r.tick(u64::MAX);
        assert_eq!(r.progress(), snapshot, "seed {seed}");
    }
}

// =============================================================================
// Typewriter
// =============================================================================

#[test]
fn construction_rejects_unusable_roles() {
    assert_eq!(
        Typewriter::with_defaults(Vec::<String>::new()).unwrap_err(),
        Error::EmptyRoles
    );
    assert_eq!(
        Typewriter::with_defaults(["ok", "", "also ok"]).unwrap_err(),
        Error::EmptyRole { index: 1 }
    );
}

#[test]
fn cycle_trace_for_two_roles() {
    let mut tw = Typewriter::with_defaults(["AB", "C"]).unwrap();
    assert_eq!(tw.display_text(), "");
    assert_eq!(tw.initial_delay_ms(), DEFAULT_TYPING_MS);

    let mut trace = Vec::new();
    for _ in 0..9 {
        let update = tw.tick();
        trace.push((update.phase, String::from(tw.display_text()), update.next_delay_ms));
    }

    use TypewriterPhase::*;
    assert_eq!(
        trace,
        [
            (Typing, String::from("A"), 80),
            (Typing, String::from("AB"), 80),
            (Pausing, String::from("AB"), 1200),
            (Deleting, String::from("A"), 40),
            (Deleting, String::from(""), 80),
            (Typing, String::from("C"), 80),
            (Pausing, String::from("C"), 1200),
            (Deleting, String::from(""), 80),
            (Typing, String::from("A"), 80),
        ]
    );
}

#[test]
fn round_trip_advances_the_role_cursor_exactly_at_empty() {
    let roles = ["Data Scientist", "Competitive Programmer"];
    let mut tw = Typewriter::with_defaults(roles).unwrap();
    let first_len = roles[0].chars().count();

    for _ in 0..first_len {
        let update = tw.tick();
        assert_eq!(update.phase, TypewriterPhase::Typing);
        assert_eq!(tw.role_index(), 0);
    }
    assert_eq!(tw.display_text(), roles[0]);

    let pause = tw.tick();
    assert_eq!(pause.phase, TypewriterPhase::Pausing);
    assert_eq!(pause.next_delay_ms, DEFAULT_PAUSE_MS);
    assert_eq!(tw.display_text(), roles[0]);

    for i in 0..first_len {
        let update = tw.tick();
        assert_eq!(update.phase, TypewriterPhase::Deleting);
        // The cursor moves on the tick that empties the display, not before.
        let expected_role = if i + 1 == first_len { 1 } else { 0 };
        assert_eq!(tw.role_index(), expected_role);
    }
    assert_eq!(tw.display_text(), "");

    let update = tw.tick();
    assert_eq!(update.phase, TypewriterPhase::Typing);
    assert_eq!(tw.display_text(), "C");
}

#[test]
fn display_text_slices_on_char_boundaries() {
    let mut tw = Typewriter::with_defaults(["héllo ⚡"]).unwrap();
    let total = "héllo ⚡".chars().count();

    for expected in 1..=total {
        tw.tick();
        let text = tw.display_text();
        assert_eq!(text.chars().count(), expected);
        assert!("héllo ⚡".starts_with(text));
    }
    assert_eq!(tw.display_text(), "héllo ⚡");
}

#[test]
fn on_text_is_pushed_once_per_tick() {
    let pushes = Arc::new(Mutex::new(Vec::<String>::new()));
    let options = TypewriterOptions::new().with_on_text(Some({
        let pushes = Arc::clone(&pushes);
        move |text: &str| pushes.lock().unwrap().push(String::from(text))
    }));
    let mut tw = Typewriter::new(["Hi"], options).unwrap();

    for _ in 0..4 {
        tw.tick();
    }
    assert_eq!(
        *pushes.lock().unwrap(),
        ["H", "Hi", "Hi", "H"] // type, type, pause, delete
    );
}

#[test]
fn custom_pacing_is_used_verbatim() {
    let options = TypewriterOptions::new()
        .with_typing_ms(5)
        .with_deleting_ms(3)
        .with_pause_ms(100);
    let mut tw = Typewriter::new(["ab"], options).unwrap();
    assert_eq!(tw.initial_delay_ms(), 5);

    assert_eq!(tw.tick().next_delay_ms, 5); // "a"
    assert_eq!(tw.tick().next_delay_ms, 5); // "ab"
    assert_eq!(tw.tick().next_delay_ms, 100); // pause
    assert_eq!(tw.tick().next_delay_ms, 3); // "a"
    assert_eq!(tw.tick().next_delay_ms, 5); // "" -> next role pending
}

#[test]
fn state_snapshot_resumes_the_cycle_in_place() {
    let mut a = Typewriter::with_defaults(["alpha", "beta"]).unwrap();
    for _ in 0..4 {
        a.tick();
    }

    let state = a.capture_state();
    let mut b = Typewriter::with_defaults(["alpha", "beta"]).unwrap();
    b.restore_state(state);
    assert_eq!(b.display_text(), a.display_text());

    for _ in 0..20 {
        let ua = a.tick();
        let ub = b.tick();
        assert_eq!(ua, ub);
        assert_eq!(a.display_text(), b.display_text());
        assert_eq!(a.role_index(), b.role_index());
    }
}

#[test]
fn restore_clamps_foreign_snapshots() {
    let mut tw = Typewriter::with_defaults(["ab", "cd"]).unwrap();
    tw.restore_state(TypewriterState {
        role_index: 7,
        shown: 99,
        deleting: false,
    });
    assert_eq!(tw.role_index(), 1);
    assert_eq!(tw.display_text(), "cd");

    // A clamped restore still produces a legal next frame.
    let update = tw.tick();
    assert_eq!(update.phase, TypewriterPhase::Pausing);
}

#[test]
fn property_cycle_is_periodic() {
    for seed in [11u64, 42, 1337] {
        let mut rng = Lcg::new(seed);
        let role_count = rng.gen_range_usize(1, 5);
        let roles: Vec<String> = (0..role_count)
            .map(|_| {
                let len = rng.gen_range_usize(1, 9);
                (0..len)
                    .map(|_| char::from(b'a' + (rng.gen_range_u64(0, 26) as u8)))
                    .collect()
            })
            .collect();

        // One full pass over a role is: len typing ticks, one pause tick,
        // len deleting ticks.
        let cycle_ticks: usize = roles.iter().map(|r| 2 * r.chars().count() + 1).sum();

        let mut tw = Typewriter::with_defaults(roles.clone()).unwrap();
        let mut pauses = 0usize;
        for _ in 0..cycle_ticks {
            let update = tw.tick();
            assert!(tw.shown() <= roles[tw.role_index()].chars().count());
            if update.phase == TypewriterPhase::Pausing {
                pauses += 1;
                assert_eq!(update.next_delay_ms, DEFAULT_PAUSE_MS);
            } else {
                assert!(
                    update.next_delay_ms == DEFAULT_TYPING_MS
                        || update.next_delay_ms == DEFAULT_DELETING_MS
                );
            }
        }

        // Back at the initial state: empty display, first role, typing next.
        assert_eq!(pauses, role_count, "seed {seed}");
        assert_eq!(tw.role_index(), 0, "seed {seed}");
        assert_eq!(tw.display_text(), "", "seed {seed}");
        let update = tw.tick();
        assert_eq!(update.phase, TypewriterPhase::Typing, "seed {seed}");
    }
}

// =============================================================================
// Example mirrors
// =============================================================================

#[test]
fn example_staggered_reveal_smoke() {
    let order = Arc::new(Mutex::new(Vec::<RegionId>::new()));
    let options = RevealOptions::new()
        .with_threshold(0.15)
        .with_on_reveal(Some({
            let order = Arc::clone(&order);
            move |k: &RegionId| order.lock().unwrap().push(*k)
        }));

    let mut r = Reveal::new(options);
    r.observe(0..6u64);

    // The first three regions scroll in together, the rest later.
    r.apply_intersection_batch((0..3u64).map(|k| (k, true)), 0);
    let mut now = 0;
    while let Some(due) = r.next_due() {
        now = due;
        r.tick(now);
    }
    assert_eq!(now, 160);

    r.apply_intersection_batch((3..6u64).map(|k| (k, true)), 1_000);
    r.tick(1_000 + 5 * 80);
    assert!(r.is_complete());
    assert_eq!(*order.lock().unwrap(), [0, 1, 2, 3, 4, 5]);
}

#[test]
fn example_hero_typewriter_smoke() {
    let mut tw = Typewriter::with_defaults(["Data Scientist", "Competitive Programmer"]).unwrap();

    let mut now = 0u64;
    let mut due = tw.initial_delay_ms();
    let mut longest = 0usize;
    for _ in 0..200 {
        now += due;
        let update = tw.tick();
        due = update.next_delay_ms;
        longest = longest.max(tw.display_text().chars().count());
    }
    assert_eq!(longest, "Competitive Programmer".chars().count());
    assert!(now > 0);
}

#[test]
fn example_reduced_motion_smoke() {
    let mut r: Reveal<RegionId> = Reveal::new(
        RevealOptions::new()
            .with_threshold(0.12)
            .with_reduced_motion(true),
    );
    r.observe(0..8u64);
    r.apply_intersection_batch((0..8u64).map(|k| (k, true)), 42);

    // No cascade: everything is due the instant it is reported.
    assert_eq!(r.next_due(), Some(42));
    assert_eq!(r.tick(42), 8);
    assert!(r.is_complete());
}
