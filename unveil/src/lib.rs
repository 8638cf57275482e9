//! A headless scroll-reveal and typewriter animation engine.
//!
//! For section lifecycle wiring (mount/unmount, entrance interpolation), see
//! the `unveil-adapter` crate.
//!
//! This crate focuses on the two timing state machines behind the classic
//! "content cascades in as you scroll" page: a staggered reveal controller
//! that turns first-intersection reports into index-delayed visibility
//! transitions, and a typewriter cycler that types, holds and deletes a list
//! of role strings forever.
//!
//! It is UI-agnostic. A web/TUI/GUI layer is expected to provide:
//! - intersection reports for watched regions (whatever facility it has)
//! - timestamps (`now_ms`) and timer scheduling
//! - the actual presentation, driven by the callbacks in the options types
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod key;
mod options;
mod reveal;
mod state;
mod typewriter;
mod types;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use options::{
    OnChangeCallback, OnRevealCallback, OnTextCallback, OnUnwatchCallback, RevealOptions,
    TypewriterOptions,
};
pub use reveal::Reveal;
pub use state::{RevealProgress, TypewriterState};
pub use typewriter::Typewriter;
pub use types::{
    DEFAULT_BOTTOM_MARGIN, DEFAULT_DELETING_MS, DEFAULT_PAUSE_MS, DEFAULT_STAGGER_MS,
    DEFAULT_THRESHOLD, DEFAULT_TYPING_MS, DisplayUpdate, RegionId, RevealPhase, TypewriterPhase,
};

#[doc(hidden)]
pub use key::RegionKey;
