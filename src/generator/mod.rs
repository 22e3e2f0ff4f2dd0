//! Periodic value generator
//!
//! The generator appends one value to every channel each time its timer
//! fires. It is a two-state machine:
//!
//! - **Idle** - no deadline is pending, polling never ticks
//! - **Running** - a single deadline (`next_tick`) is pending
//!
//! The deadline is not a free-running clock. Every change to the run flag,
//! the interval, the range, or the channel data drops the pending deadline
//! and arms a new one a full interval from "now". In particular each tick
//! re-arms the timer from the moment it was observed, so intervals drift
//! later under load instead of bursting to catch up.
//!
//! The generator never reads the clock itself; callers pass `now` in, which
//! lets the UI drive it from the frame loop and tests drive it from a fake
//! timeline.
//!
//! # Example
//!
//! ```ignore
//! let mut generator = Generator::new(GenerationConfig::default());
//! let mut channels = ChannelSet::with_count(2);
//!
//! generator.start(Instant::now());
//! if generator.poll(&mut channels, Instant::now()) {
//!     // a tick happened; scroll bar tracks to the end
//! }
//! ```

pub mod sampler;

use crate::config::{GenerationConfig, ValueRange};
use crate::types::{ChannelSet, RunState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Timer state of the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Idle,
    Running { next_tick: Instant },
}

/// What caused the pending deadline to be replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescheduleReason {
    Started,
    IntervalChanged,
    RangeChanged,
    DataChanged,
    ChannelsReset,
}

/// Generator state machine owning the timer and the random source
pub struct Generator<R = StdRng> {
    run: RunState,
    state: GeneratorState,
    config: GenerationConfig,
    rng: R,
    ticks: u64,
}

impl Generator<StdRng> {
    /// Create an idle generator seeded from the OS
    pub fn new(config: GenerationConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an idle generator with a fixed seed
    pub fn seeded(config: GenerationConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    /// Create an idle generator with an explicit random source
    pub fn with_rng(config: GenerationConfig, rng: R) -> Self {
        Self {
            run: RunState::default(),
            state: GeneratorState::Idle,
            config,
            rng,
            ticks: 0,
        }
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn is_running(&self) -> bool {
        self.run.is_running
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Number of ticks produced since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Random source, shared with palette generation
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Enable ticking, arming the first deadline one interval from `now`
    pub fn start(&mut self, now: Instant) {
        if !self.run.has_started_before {
            tracing::debug!("Generator started for the first time");
        }
        self.run.start();
        tracing::info!(
            "Generator running every {} ms over {}",
            self.config.interval_ms,
            self.config.range
        );
        self.reschedule(now, RescheduleReason::Started);
    }

    /// Disable ticking and drop the pending deadline
    pub fn stop(&mut self) {
        if self.run.is_running {
            tracing::info!("Generator stopped after {} ticks", self.ticks);
        }
        self.run.stop();
        self.state = GeneratorState::Idle;
    }

    /// Replace the interval; takes effect from a fresh deadline
    pub fn set_interval(&mut self, interval_ms: u64, now: Instant) {
        let interval_ms = interval_ms.max(1);
        if interval_ms == self.config.interval_ms {
            return;
        }
        self.config.interval_ms = interval_ms;
        self.reschedule(now, RescheduleReason::IntervalChanged);
    }

    /// Replace the value range; takes effect from a fresh deadline
    pub fn set_range(&mut self, range: ValueRange, now: Instant) {
        if range == self.config.range {
            return;
        }
        self.config.range = range;
        self.reschedule(now, RescheduleReason::RangeChanged);
    }

    /// Drop the pending deadline and, if running, arm a new one from `now`
    pub fn reschedule(&mut self, now: Instant, reason: RescheduleReason) {
        self.state = if self.run.is_running {
            let next_tick = now + self.config.interval();
            tracing::trace!("Generator rescheduled ({:?})", reason);
            GeneratorState::Running { next_tick }
        } else {
            GeneratorState::Idle
        };
    }

    /// Time left until the pending deadline, `None` while idle
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        match self.state {
            GeneratorState::Idle => None,
            GeneratorState::Running { next_tick } => {
                Some(next_tick.saturating_duration_since(now))
            }
        }
    }

    /// Produce at most one tick if the deadline has passed
    ///
    /// Returns `true` when every channel received a new value.
    pub fn poll(&mut self, channels: &mut ChannelSet, now: Instant) -> bool {
        let GeneratorState::Running { next_tick } = self.state else {
            return false;
        };
        if now < next_tick {
            return false;
        }

        sampler::append_tick(&mut self.rng, self.config.range, channels);
        self.ticks += 1;
        tracing::debug!("Tick {} appended to {} channels", self.ticks, channels.len());

        self.reschedule(now, RescheduleReason::DataChanged);
        true
    }
}
