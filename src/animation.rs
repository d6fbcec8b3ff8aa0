//! Frame-counted animations advanced by timer ticks.
//!
//! An [`Animation`] owns no timer. The host calls [`Animation::tick`] every
//! [`Animation::interval`] and stops its timer once a tick reports
//! [`AnimationStep::Finished`].

use std::time::Duration;

/// Tick interval used by [`Animation::for_duration`].
pub const DEFAULT_TICK: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    Continue,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    interval: Duration,
    frequency: u32,
    frame: u32,
    finished: bool,
}

impl Animation {
    /// The callback runs `frequency + 1` times, with frames `0..=frequency`.
    pub fn new(interval: Duration, frequency: u32) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            frequency,
            frame: 0,
            finished: false,
        }
    }

    pub fn for_duration(duration: Duration) -> Self {
        Self::for_duration_with_interval(duration, DEFAULT_TICK)
    }

    /// Durations shorter than one tick are stretched to a single tick.
    pub fn for_duration_with_interval(duration: Duration, interval: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        let duration = duration.max(interval);
        let frequency =
            u32::try_from(duration.as_millis() / interval.as_millis()).unwrap_or(u32::MAX);
        Self::new(interval, frequency)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run one frame. `callback(frame, frequency)` returns whether to go on.
    pub fn tick<F>(&mut self, mut callback: F) -> AnimationStep
    where
        F: FnMut(u32, u32) -> bool,
    {
        if self.finished {
            return AnimationStep::Finished;
        }
        let keep_going = callback(self.frame, self.frequency);
        let exhausted = self.frame >= self.frequency;
        self.frame = self.frame.saturating_add(1);
        if !keep_going || exhausted {
            self.finished = true;
            AnimationStep::Finished
        } else {
            AnimationStep::Continue
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeKind {
    In,
    Out,
}

impl FadeKind {
    /// Linear opacity for `frame` of `frequency`. Fading out reaches exactly 0.
    pub fn opacity(self, frame: u32, frequency: u32) -> f64 {
        let progress = if frequency == 0 {
            1.0
        } else {
            frame as f64 / frequency as f64
        };
        match self {
            FadeKind::In => progress,
            FadeKind::Out => 1.0 - progress,
        }
    }

    pub fn start_opacity(self) -> f64 {
        match self {
            FadeKind::In => 0.0,
            FadeKind::Out => 1.0,
        }
    }
}

/// An opacity animation of the whole window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fade {
    pub kind: FadeKind,
    pub animation: Animation,
}

impl Fade {
    pub fn new(kind: FadeKind, duration: Duration) -> Self {
        Self {
            kind,
            animation: Animation::for_duration(duration),
        }
    }
}
