use alloc::string::String;
use alloc::vec::Vec;

use crate::{DisplayUpdate, Error, TypewriterOptions, TypewriterPhase, TypewriterState};

/// A headless typewriter cycler.
///
/// Given a fixed list of role strings, each [`Typewriter::tick`] emits the
/// next frame of an endless type / pause / delete loop and reports how long
/// the driver should wait before ticking again. The period is
/// phase-dependent — typing, deleting and the dwell on a fully typed role
/// each have their own delay — so there is no global tick rate and never more
/// than one outstanding tick.
///
/// The cycler holds no clock and schedules nothing itself; drivers own the
/// timer (see `Section` in the `unveil-adapter` crate).
#[derive(Clone, Debug)]
pub struct Typewriter {
    options: TypewriterOptions,
    roles: Vec<String>,
    role_index: usize,
    shown: usize,
    // Direction for the next tick. The pause is a single deferred transition:
    // it is emitted as a frame but the machine never rests in it.
    deleting: bool,
    // Phase of the most recently emitted frame.
    frame: TypewriterPhase,
}

impl Typewriter {
    /// Creates a cycler over `roles`.
    ///
    /// Fails fast on an empty list or an empty role string; both would leave
    /// the cycle without a well-defined next transition.
    pub fn new(
        roles: impl IntoIterator<Item = impl Into<String>>,
        options: TypewriterOptions,
    ) -> Result<Self, Error> {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        if roles.is_empty() {
            return Err(Error::EmptyRoles);
        }
        if let Some(index) = roles.iter().position(|r| r.is_empty()) {
            return Err(Error::EmptyRole { index });
        }

        udebug!(
            roles = roles.len(),
            typing_ms = options.typing_ms,
            deleting_ms = options.deleting_ms,
            pause_ms = options.pause_ms,
            "Typewriter::new"
        );
        Ok(Self {
            options,
            roles,
            role_index: 0,
            shown: 0,
            deleting: false,
            frame: TypewriterPhase::Typing,
        })
    }

    /// Creates a cycler with default pacing.
    pub fn with_defaults(roles: impl IntoIterator<Item = impl Into<String>>) -> Result<Self, Error> {
        Self::new(roles, TypewriterOptions::new())
    }

    pub fn options(&self) -> &TypewriterOptions {
        &self.options
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Cursor into the role list. Wraps modulo the role count.
    pub fn role_index(&self) -> usize {
        self.role_index
    }

    /// Phase of the most recently emitted frame.
    pub fn phase(&self) -> TypewriterPhase {
        self.frame
    }

    /// Number of characters currently displayed.
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Delay before the very first tick.
    ///
    /// The empty display holds for one typing period before the first
    /// character appears, matching the pacing of every later character.
    pub fn initial_delay_ms(&self) -> u64 {
        self.options.typing_ms
    }

    fn current_role(&self) -> &str {
        &self.roles[self.role_index]
    }

    fn current_role_chars(&self) -> usize {
        self.current_role().chars().count()
    }

    /// The displayed prefix of the current role, on `char` boundaries.
    pub fn display_text(&self) -> &str {
        let role = self.current_role();
        match role.char_indices().nth(self.shown) {
            Some((i, _)) => &role[..i],
            None => role,
        }
    }

    /// Advances the cycle by one frame.
    ///
    /// The emitted frame is described by the returned [`DisplayUpdate`]; the
    /// text itself is read via [`Typewriter::display_text`]. The cycle never
    /// terminates — stopping is the driver's job (drop the value or stop
    /// scheduling ticks).
    pub fn tick(&mut self) -> DisplayUpdate {
        let next_delay_ms = if !self.deleting {
            let len = self.current_role_chars();
            if self.shown < len {
                self.shown += 1;
                self.frame = TypewriterPhase::Typing;
                self.options.typing_ms
            } else {
                // Hold the full role for one dwell, then fall straight into
                // deleting on the next tick.
                self.frame = TypewriterPhase::Pausing;
                self.deleting = true;
                self.options.pause_ms
            }
        } else {
            debug_assert!(self.shown > 0, "deleting entered with empty display");
            self.shown = self.shown.saturating_sub(1);
            self.frame = TypewriterPhase::Deleting;
            if self.shown == 0 {
                // The display has just reached empty: advance the role cursor
                // now, and show the empty string for one typing period before
                // the next role starts.
                self.role_index = (self.role_index + 1) % self.roles.len();
                self.deleting = false;
                self.options.typing_ms
            } else {
                self.options.deleting_ms
            }
        };

        utrace!(
            role_index = self.role_index,
            shown = self.shown,
            next_delay_ms,
            "Typewriter::tick"
        );
        if let Some(cb) = &self.options.on_text {
            cb(self.display_text());
        }

        DisplayUpdate {
            phase: self.frame,
            next_delay_ms,
        }
    }

    /// Captures the cycle position for later [`Typewriter::restore_state`].
    pub fn capture_state(&self) -> TypewriterState {
        TypewriterState {
            role_index: self.role_index,
            shown: self.shown,
            deleting: self.deleting,
        }
    }

    /// Restores a previously captured cycle position.
    ///
    /// Out-of-range values are clamped into the current role list rather than
    /// rejected, so a snapshot taken against different roles degrades to a
    /// nearby valid position instead of failing.
    pub fn restore_state(&mut self, state: TypewriterState) {
        self.role_index = state.role_index % self.roles.len();
        self.shown = state.shown.min(self.current_role_chars());
        self.deleting = state.deleting && self.shown > 0;
        self.frame = if self.deleting {
            TypewriterPhase::Deleting
        } else {
            TypewriterPhase::Typing
        };
        udebug!(
            role_index = self.role_index,
            shown = self.shown,
            "Typewriter::restore_state"
        );
    }
}
