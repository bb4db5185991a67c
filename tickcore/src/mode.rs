//! Display-mode state machine.
//!
//! The widget has three mutually exclusive presentation modes, all derived
//! from wall-clock time alone. Precedence: Nyam > Quote > Normal.

use chrono::{NaiveTime, Timelike};

/// First minute-of-day of the NYAM session (21:30, inclusive).
pub const NYAM_START_MINUTE: u32 = 21 * 60 + 30;
/// End of the NYAM session (23:00, exclusive).
pub const NYAM_END_MINUTE: u32 = 23 * 60;

/// Seconds remaining below which the border flash is armed.
pub const CANDLE_WARN_SECS: u32 = 3;

/// Presentation mode of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Clock face with the lunisolar calendar subtitle.
    Normal,
    /// Trading session: gold theme, candle countdown subtitle.
    Nyam,
    /// Rotating aphorisms in place of the clock face.
    Quote,
}

/// Whether `t` falls inside the NYAM trading window (21:30 to 23:00).
pub fn in_nyam_session(t: NaiveTime) -> bool {
    let minute_of_day = t.hour() * 60 + t.minute();
    (NYAM_START_MINUTE..NYAM_END_MINUTE).contains(&minute_of_day)
}

/// Whether `t` falls inside a quote minute (minute-of-hour divisible by 10).
/// The window covers the whole minute, so a quote session runs up to 60 s.
pub fn in_quote_window(t: NaiveTime) -> bool {
    t.minute() % 10 == 0
}

/// Classify a wall-clock time into a mode.
pub fn mode_at(t: NaiveTime) -> Mode {
    if in_nyam_session(t) {
        Mode::Nyam
    } else if in_quote_window(t) {
        Mode::Quote
    } else {
        Mode::Normal
    }
}

/// Seconds until the current one-minute candle closes, in `1..=60`.
pub fn candle_countdown(t: NaiveTime) -> u32 {
    60 - t.second()
}

/// A mode transition observed by [`ModeMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSwitch {
    pub from: Mode,
    pub to: Mode,
}

/// Tracks the active mode across ticks and reports edges.
///
/// The machine itself has no side effects; the caller reacts to the
/// returned [`ModeSwitch`] (theme swap, quote session start/stop), which
/// keeps those effects one-shot rather than per-tick.
#[derive(Debug)]
pub struct ModeMachine {
    mode: Mode,
}

impl ModeMachine {
    /// Seed the machine from the current time, so a launch mid-session
    /// starts directly in the right mode.
    pub fn new(t: NaiveTime) -> Self {
        Self { mode: mode_at(t) }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Re-classify `t`; returns the transition when the mode changed.
    pub fn observe(&mut self, t: NaiveTime) -> Option<ModeSwitch> {
        let next = mode_at(t);
        if next == self.mode {
            return None;
        }
        let switch = ModeSwitch { from: self.mode, to: next };
        self.mode = next;
        Some(switch)
    }
}
