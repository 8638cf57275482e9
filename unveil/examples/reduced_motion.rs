use unveil::{Reveal, RevealOptions};

fn main() {
    // Example: the same cascade with an ambient reduced-motion preference.
    //
    // Content is never withheld — every region still becomes visible — but
    // the stagger collapses to zero, so there is no perceptible motion.
    let options = RevealOptions::new()
        .with_threshold(0.12)
        .with_reduced_motion(true)
        .with_on_reveal(Some(|k: &u64| println!("reveal region {k} (instant)")));

    let mut reveal = Reveal::new(options);
    reveal.observe(0..8u64);

    reveal.apply_intersection_batch((0..8u64).map(|k| (k, true)), 42);
    println!("next_due = {:?}", reveal.next_due());

    let fired = reveal.tick(42);
    println!("fired {fired} regions in one tick; complete={}", reveal.is_complete());
}
