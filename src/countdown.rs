//! Player-input countdown, in ticks, with a whole-seconds display value.

/// Result of one countdown tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum CountdownStep {
    /// Still running; `display` is the remaining whole seconds (ceiling),
    /// the value shown on the timer text.
    Running {
        /// Remaining whole seconds, rounded up.
        display: u32,
    },
    /// The countdown expired on this tick. Reported once.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Countdown {
    remaining: u32,
    ticks_per_sec: u32,
}

impl Countdown {
    pub(crate) fn new(ticks: u32, ticks_per_sec: u32) -> Self {
        debug_assert!(ticks >= 1 && ticks_per_sec >= 1);
        Self {
            remaining: ticks,
            ticks_per_sec,
        }
    }

    /// Remaining whole seconds, rounded up (a 10 s countdown shows "10"
    /// until a full second has elapsed).
    pub(crate) fn display_secs(&self) -> u32 {
        self.remaining.div_ceil(self.ticks_per_sec)
    }

    /// Advances by one tick.
    pub(crate) fn advance(&mut self) -> CountdownStep {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            CountdownStep::Expired
        } else {
            CountdownStep::Running {
                display: self.display_secs(),
            }
        }
    }
}
