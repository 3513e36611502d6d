//! Elapsed-time counter shown next to the mines counter.

use chrono::prelude::*;

/// Runs from the start of a game until it is won or lost.
#[derive(Clone, Debug)]
pub struct GameClock {
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameClock {
    pub fn start() -> Self {
        Self::started_at(Utc::now())
    }

    fn started_at(now: DateTime<Utc>) -> Self {
        log::debug!("started at {}", now);
        Self {
            started_at: now,
            ended_at: None,
        }
    }

    /// Freezes the counter, later calls keep the first end time.
    pub fn stop(&mut self) {
        self.stop_at(Utc::now());
    }

    fn stop_at(&mut self, now: DateTime<Utc>) {
        if self.ended_at.is_none() {
            log::debug!("ended at {}", now);
            self.ended_at = Some(now);
        }
    }

    /// How many whole seconds the current game has been running
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs_at(Utc::now())
    }

    fn elapsed_secs_at(&self, now: DateTime<Utc>) -> u32 {
        (self.ended_at.unwrap_or(now) - self.started_at)
            .num_seconds()
            .max(0) as u32
    }
}
