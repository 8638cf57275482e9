use unveil::{Typewriter, TypewriterPhase};

fn main() {
    // Example: the hero role line, driven by a synthetic clock.
    //
    // Each tick returns the delay until the next one, so a driver keeps
    // exactly one timer armed and never polls.
    let mut tw = Typewriter::with_defaults(["Data Scientist", "Competitive Programmer"])
        .expect("roles are non-empty");

    let mut now = 0u64;
    let mut due = tw.initial_delay_ms();

    for _ in 0..80 {
        now += due;
        let update = tw.tick();
        due = update.next_delay_ms;

        let marker = match update.phase {
            TypewriterPhase::Typing => "+",
            TypewriterPhase::Pausing => "=",
            TypewriterPhase::Deleting => "-",
        };
        println!("t={now:>6} {marker} {:?}", tw.display_text());
    }
}
