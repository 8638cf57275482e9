/// Configuration errors reported at construction time.
///
/// Both animation mechanisms are infallible once built; the only failure mode
/// is handing them data they cannot cycle over, and that is rejected up front
/// rather than producing undefined behavior mid-animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The typewriter was given no roles to cycle through.
    #[error("typewriter requires at least one role")]
    EmptyRoles,
    /// A role string is empty, which would make the delete phase unreachable
    /// from a well-formed typing phase.
    #[error("typewriter role at index {index} is empty")]
    EmptyRole { index: usize },
}
