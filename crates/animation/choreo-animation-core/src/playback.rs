//! Playback timing state machine.
//!
//! Elapsed time is `elapsed_before_pause + (now - start_time) * speed`.
//! Pausing folds the running segment into `elapsed_before_pause`; resuming
//! and speed changes restamp `start_time`, so paused intervals never count.

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AnimationError;
use crate::inputs::{LoopMode, PlaybackCommand};
use crate::outputs::CoreEvent;
use crate::time::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl PlaybackState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

type Observer = Box<dyn FnMut(&CoreEvent)>;

pub struct PlaybackController {
    state: PlaybackState,
    duration_ms: f64,
    loop_mode: LoopMode,
    remaining: Option<u32>,
    speed: f64,
    min_speed: f64,
    start_time: Timestamp,
    elapsed_before_pause: f64,
    elapsed: f64,
    events: Vec<CoreEvent>,
    observers: Vec<Observer>,
}

impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("duration_ms", &self.duration_ms)
            .field("loop_mode", &self.loop_mode)
            .field("remaining", &self.remaining)
            .field("speed", &self.speed)
            .field("elapsed", &self.elapsed)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

fn check_duration(duration_ms: f64) -> Result<f64, AnimationError> {
    if !duration_ms.is_finite() {
        return Err(AnimationError::invalid(format!(
            "duration must be finite, got {duration_ms}"
        )));
    }
    Ok(duration_ms.max(0.0))
}

impl PlaybackController {
    pub fn new(cfg: &Config) -> Self {
        let min_speed = if cfg.min_speed.is_finite() && cfg.min_speed > 0.0 {
            cfg.min_speed
        } else {
            let fallback = Config::default().min_speed;
            warn!("playback: min_speed {} is not positive, using {fallback}", cfg.min_speed);
            fallback
        };
        Self {
            state: PlaybackState::Stopped,
            duration_ms: cfg.default_duration_ms.max(0.0),
            loop_mode: LoopMode::Once,
            remaining: Some(0),
            speed: 1.0,
            min_speed,
            start_time: Timestamp::zero(),
            elapsed_before_pause: 0.0,
            elapsed: 0.0,
            events: Vec::new(),
            observers: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Loops left; `None` when looping forever.
    #[inline]
    pub fn remaining_loops(&self) -> Option<u32> {
        self.remaining
    }

    /// Elapsed time as of the last `tick` (or pause/stop).
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Fraction of the timeline played, in `[0, 1]`. Zero duration counts as
    /// complete.
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    /// Register a callback invoked for every lifecycle event, in addition to
    /// the polled queue.
    pub fn subscribe(&mut self, observer: impl FnMut(&CoreEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Take queued lifecycle events in emission order.
    pub fn drain_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: CoreEvent) {
        debug!("playback: {}", event.name());
        for observer in &mut self.observers {
            observer(&event);
        }
        self.events.push(event);
    }

    fn clamp_speed(&self, speed: f64) -> f64 {
        if speed.is_finite() && speed >= self.min_speed {
            speed
        } else {
            warn!("playback: speed {speed} clamped to {}", self.min_speed);
            self.min_speed
        }
    }

    #[inline]
    fn raw_elapsed(&self, now: Timestamp) -> f64 {
        self.elapsed_before_pause + now.elapsed_since(self.start_time) * self.speed
    }

    pub fn start(
        &mut self,
        duration_ms: f64,
        loop_mode: LoopMode,
        speed: f64,
        now: Timestamp,
    ) -> Result<(), AnimationError> {
        self.duration_ms = check_duration(duration_ms)?;
        self.speed = self.clamp_speed(speed);
        self.loop_mode = loop_mode;
        self.remaining = loop_mode.initial_remaining();
        self.elapsed_before_pause = 0.0;
        self.elapsed = 0.0;
        self.start_time = now;
        self.state = PlaybackState::Running;
        self.emit(CoreEvent::Started);
        Ok(())
    }

    pub fn pause(&mut self, now: Timestamp) {
        if !self.state.is_running() {
            return;
        }
        self.tick(now);
        // The tick may have completed the timeline.
        if !self.state.is_running() {
            return;
        }
        self.elapsed_before_pause = self.elapsed;
        self.state = PlaybackState::Paused;
        self.emit(CoreEvent::Paused {
            elapsed_ms: self.elapsed,
        });
    }

    pub fn resume(&mut self, now: Timestamp) {
        if self.state != PlaybackState::Paused {
            return;
        }
        self.start_time = now;
        self.state = PlaybackState::Running;
        self.emit(CoreEvent::Resumed {
            elapsed_ms: self.elapsed_before_pause,
        });
    }

    pub fn stop(&mut self, reset: bool) {
        self.state = PlaybackState::Stopped;
        if reset {
            self.elapsed_before_pause = 0.0;
            self.elapsed = 0.0;
            self.remaining = self.loop_mode.initial_remaining();
        }
        self.emit(CoreEvent::Stopped { reset });
    }

    pub fn set_duration(&mut self, duration_ms: f64) -> Result<(), AnimationError> {
        self.duration_ms = check_duration(duration_ms)?;
        Ok(())
    }

    /// Change the multiplier. Time already played keeps its old rate.
    pub fn set_speed(&mut self, speed: f64, now: Timestamp) {
        let speed = self.clamp_speed(speed);
        if self.state.is_running() {
            self.elapsed_before_pause = self.raw_elapsed(now);
            self.start_time = now;
        }
        self.speed = speed;
    }

    pub fn set_loop(&mut self, loop_mode: LoopMode) {
        self.loop_mode = loop_mode;
        self.remaining = loop_mode.initial_remaining();
    }

    pub fn apply(&mut self, cmd: PlaybackCommand, now: Timestamp) -> Result<(), AnimationError> {
        match cmd {
            PlaybackCommand::Start {
                duration_ms,
                loop_mode,
                speed,
            } => self.start(duration_ms, loop_mode, speed, now)?,
            PlaybackCommand::Pause => self.pause(now),
            PlaybackCommand::Resume => self.resume(now),
            PlaybackCommand::Stop { reset } => self.stop(reset),
            PlaybackCommand::SetDuration { duration_ms } => self.set_duration(duration_ms)?,
            PlaybackCommand::SetSpeed { speed } => self.set_speed(speed, now),
            PlaybackCommand::SetLoop { loop_mode } => self.set_loop(loop_mode),
        }
        Ok(())
    }

    /// Advance to `now` and return the elapsed time. At most one `Looped`
    /// event is emitted per tick however many cycles were crossed.
    pub fn tick(&mut self, now: Timestamp) -> f64 {
        if !self.state.is_running() {
            return self.elapsed;
        }
        let mut elapsed = self.raw_elapsed(now);
        let duration = self.duration_ms;
        if duration > 0.0 && elapsed >= duration {
            match self.loop_mode {
                // A zero loop count plays the timeline once.
                LoopMode::Once | LoopMode::Count(0) => {
                    elapsed = duration;
                    self.elapsed_before_pause = duration;
                    self.state = PlaybackState::Stopped;
                    self.elapsed = elapsed;
                    self.emit(CoreEvent::Completed);
                    return elapsed;
                }
                LoopMode::Count(_) | LoopMode::Infinite => {
                    let cycles = (elapsed / duration).floor();
                    elapsed %= duration;
                    self.elapsed_before_pause = elapsed;
                    self.start_time = now;
                    self.remaining = self.remaining.map(|r| {
                        let crossed = cycles.min(u32::MAX as f64) as u32;
                        r.saturating_sub(crossed)
                    });
                    self.elapsed = elapsed;
                    self.emit(CoreEvent::Looped {
                        remaining: self.remaining,
                    });
                    if self.remaining == Some(0) {
                        self.state = PlaybackState::Stopped;
                        self.emit(CoreEvent::Completed);
                    }
                    return elapsed;
                }
            }
        }
        self.elapsed = elapsed;
        elapsed
    }
}
