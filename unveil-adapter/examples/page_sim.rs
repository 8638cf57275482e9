use unveil::{RevealOptions, Typewriter};
use unveil_adapter::{Easing, Entrance, Section};

fn main() {
    // Example: a portfolio-style page simulated without any UI objects.
    //
    // A real embedding would:
    // - register each section's regions with its intersection facility,
    //   configured from reveal().threshold() / bottom_margin()
    // - forward intersection reports as the user scrolls
    // - arm one timer per section from the deadline tick() returns
    let mut hero: Section<u64> = Section::new(RevealOptions::new()).with_typewriter(
        Typewriter::with_defaults(["Data Scientist", "Competitive Programmer"])
            .expect("roles are non-empty"),
    );

    let mut experience: Section<u64> = Section::new(RevealOptions::new().with_threshold(0.15))
        .with_transition(700, Easing::EaseOutCubic);
    let mut contact: Section<u64> = Section::new(RevealOptions::new().with_threshold(0.12))
        .with_transition(680, Easing::EaseOutCubic);

    hero.mount(std::iter::empty::<u64>(), 0);
    experience.mount_with([(0u64, Entrance::Left), (1, Entrance::Right)], 0);
    contact.mount(0..3u64, 0);

    // Scripted scroll: experience enters at t=500, contact at t=2000.
    let mut last_line = String::new();
    for now in (0..=3_200).step_by(16) {
        if now == 512 {
            println!("-- experience scrolled into view");
            experience.on_intersections([(0u64, true), (1, true)], now as u64);
        }
        if now == 2_000 {
            println!("-- contact scrolled into view");
            contact.on_intersections((0..3u64).map(|k| (k, true)), now as u64);
        }

        let now = now as u64;
        hero.tick(now);
        experience.tick(now);
        contact.tick(now);

        let line = format!(
            "hero: {:24} experience: [{:.2} {:.2}] contact: [{:.2} {:.2} {:.2}]",
            format!("{:?}", hero.display_text().unwrap_or("")),
            experience.progress_of(&0, now),
            experience.progress_of(&1, now),
            contact.progress_of(&0, now),
            contact.progress_of(&1, now),
            contact.progress_of(&2, now),
        );
        if line != last_line && now % 160 == 0 {
            println!("t={now:>5} {line}");
            last_line = line;
        }
    }

    hero.unmount();
    experience.unmount();
    contact.unmount();
    println!("page unmounted; late timers are inert: {:?}", hero.tick(9_999));
}
