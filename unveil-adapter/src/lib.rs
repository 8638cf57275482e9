//! Adapter utilities for the `unveil` crate.
//!
//! The `unveil` crate is UI-agnostic and focuses on the core state machines.
//! This crate provides small, framework-neutral helpers commonly needed when
//! wiring those machines into a page:
//!
//! - Section lifecycle (mount / intersection delivery / unmount) owning one
//!   reveal controller and, for hero sections, one typewriter
//! - Entrance transition sampling (eased progress for view layers without a
//!   declarative transition engine)
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui
//! bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod key;
mod transition;


pub use controller::{DEFAULT_TRANSITION_MS, Entrance, Section};
pub use key::SectionKey;
pub use transition::{Easing, Transition};
