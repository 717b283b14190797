use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Periodic timer owned by a playing view. Due times are absolute view-clock
/// offsets, so ticks fire on schedule no matter how the host slices time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerHandle {
    pub interval: Duration,
    pub next_due: Duration,
}

impl TimerHandle {
    #[must_use]
    pub fn start(now: Duration, interval: Duration) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlaybackState {
    Stopped { year_index: usize },
    Playing { year_index: usize, timer: TimerHandle },
}

impl PlaybackState {
    #[must_use]
    pub fn year_index(self) -> usize {
        match self {
            Self::Stopped { year_index } | Self::Playing { year_index, .. } => year_index,
        }
    }
}

/// Enabled flags for the play and pause buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackControls {
    pub play_enabled: bool,
    pub pause_enabled: bool,
}

/// Year cursor stepping through `year_count` years while playing.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    state: PlaybackState,
    year_count: usize,
    interval: Duration,
    disposed: bool,
}

impl Playback {
    #[must_use]
    pub fn new(year_count: usize, interval: Duration) -> Self {
        Self {
            state: PlaybackState::Stopped { year_index: 0 },
            year_count,
            interval,
            disposed: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn year_index(&self) -> usize {
        self.state.year_index()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub fn controls(&self) -> PlaybackControls {
        let playing = self.is_playing();
        PlaybackControls {
            play_enabled: !playing && !self.disposed && self.year_count > 0,
            pause_enabled: playing,
        }
    }

    /// Moves the cursor without touching the timer. Out-of-range indices are
    /// rejected.
    pub fn seek(&mut self, year_index: usize) -> bool {
        if year_index >= self.year_count {
            return false;
        }
        self.state = match self.state {
            PlaybackState::Stopped { .. } => PlaybackState::Stopped { year_index },
            PlaybackState::Playing { timer, .. } => PlaybackState::Playing { year_index, timer },
        };
        true
    }

    /// Starts ticking. Only valid from `Stopped` with at least one year;
    /// returns whether the state changed.
    pub fn play(&mut self, now: Duration) -> bool {
        let PlaybackState::Stopped { year_index } = self.state else {
            return false;
        };
        if self.disposed || self.interval.is_zero() || self.year_count == 0 {
            return false;
        }
        self.state = PlaybackState::Playing {
            year_index,
            timer: TimerHandle::start(now, self.interval),
        };
        debug!(year_index, "playback started");
        true
    }

    /// Cancels future ticks. Only valid from `Playing`.
    pub fn pause(&mut self) -> bool {
        let PlaybackState::Playing { year_index, .. } = self.state else {
            return false;
        };
        self.state = PlaybackState::Stopped { year_index };
        debug!(year_index, "playback paused");
        true
    }

    /// Stops permanently; later `play` calls are refused.
    pub fn dispose(&mut self) {
        self.pause();
        self.disposed = true;
    }

    /// Due time of the next tick, if playing.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        match self.state {
            PlaybackState::Playing { timer, .. } => Some(timer.next_due),
            PlaybackState::Stopped { .. } => None,
        }
    }

    /// Fires the pending tick if it is due at or before `now`.
    ///
    /// Returns `(due_time, new_year_index)`. The index wraps to 0 after the
    /// last year. Call repeatedly to drain several overdue ticks in order.
    pub fn fire_due(&mut self, now: Duration) -> Option<(Duration, usize)> {
        let PlaybackState::Playing { year_index, timer } = self.state else {
            return None;
        };
        if timer.next_due > now || self.year_count == 0 {
            return None;
        }
        let due = timer.next_due;
        let next_index = (year_index + 1) % self.year_count;
        self.state = PlaybackState::Playing {
            year_index: next_index,
            timer: TimerHandle {
                interval: timer.interval,
                next_due: due + timer.interval,
            },
        };
        Some((due, next_index))
    }
}
