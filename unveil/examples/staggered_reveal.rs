use unveil::{Reveal, RevealOptions};

fn main() {
    // Example: one page section with six reveal-tagged regions.
    //
    // A view layer would:
    // - register the regions with its intersection facility using
    //   `threshold()` / `bottom_margin()`
    // - forward (region, is_intersecting) reports with a timestamp
    // - call tick(now_ms) from a timer armed via next_due()
    let options = RevealOptions::new()
        .with_threshold(0.15)
        .with_on_reveal(Some(|k: &u64| println!("  reveal region {k}")))
        .with_on_unwatch(Some(|k: &u64| println!("  unwatch region {k}")));

    let mut reveal = Reveal::new(options);
    reveal.observe(0..6u64);

    println!("scroll: regions 0..3 enter the viewport at t=0");
    reveal.apply_intersection_batch((0..3u64).map(|k| (k, true)), 0);

    let mut now = 0u64;
    while let Some(due) = reveal.next_due() {
        now = due;
        let fired = reveal.tick(now);
        println!("t={now} fired={fired} progress={:?}", reveal.progress());
    }

    println!("scroll: regions 3..6 enter the viewport at t=1000");
    reveal.apply_intersection_batch((3..6u64).map(|k| (k, true)), 1_000);

    while let Some(due) = reveal.next_due() {
        now = due;
        reveal.tick(now);
    }

    println!("done at t={now}: complete={}", reveal.is_complete());
    reveal.teardown();
}
