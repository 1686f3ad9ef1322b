// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fixed-interval playback timer for the flip-book animation.

use std::time::Duration;

/// Default time each frame stays on screen while playing.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(800);

/// Accumulates elapsed time and reports how many frame steps are due.
#[derive(Debug, Clone)]
pub struct Playback {
    interval: Duration,
    elapsed: Duration,
    playing: bool,
}

impl Playback {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            playing: false,
        }
    }

    pub fn start(&mut self) {
        self.playing = true;
        self.elapsed = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Time left until the next step is due.
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    /// Advance the timer and return the number of steps that fired.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.playing {
            return 0;
        }
        self.elapsed += dt;
        let mut steps = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            steps += 1;
        }
        steps
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
