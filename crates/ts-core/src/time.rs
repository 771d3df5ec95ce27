//! Simulation time model.
//!
//! # Design
//!
//! Time is an integer count of **milliseconds** held in `SimTime`.  The same
//! type is used for instants and for durations, which keeps waiting-time and
//! ride-duration arithmetic exact (no floating-point drift).
//!
//! Textual output renders seconds with two decimals (`12.00`), the format
//! route and statistics files use for every time attribute.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// A simulation instant or duration in milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub i64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub fn from_millis(ms: i64) -> Self {
        SimTime(ms)
    }

    #[inline]
    pub fn from_secs(secs: i64) -> Self {
        SimTime(secs * 1000)
    }

    /// Rounds to the nearest millisecond.
    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        SimTime((secs * 1000.0).round() as i64)
    }

    #[inline]
    pub fn millis(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// `true` for any positive span.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl std::ops::Add for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: SimTime) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for SimTime {
    type Output = SimTime;
    #[inline]
    fn sub(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 - rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 1000, (abs % 1000) / 10)
    }
}

impl FromStr for SimTime {
    type Err = CoreError;

    /// Parses seconds with an optional fraction (`"12"`, `"12.5"`).
    fn from_str(s: &str) -> CoreResult<SimTime> {
        let secs: f64 = s
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidTime(s.to_owned()))?;
        if !secs.is_finite() {
            return Err(CoreError::InvalidTime(s.to_owned()));
        }
        Ok(SimTime::from_secs_f64(secs))
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The global simulation clock.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current step's time, moved on by `SimClock::advance()`.
    pub current: SimTime,
    /// Length of one simulation step.
    pub step_length: SimTime,
}

impl SimClock {
    pub fn new(begin: SimTime, step_length: SimTime) -> Self {
        Self { current: begin, step_length }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current += self.step_length;
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.current
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={} (step {})", self.current, self.step_length)
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Formatting options shared by every output writer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputConfig {
    /// Decimals used when writing positions and distances.  Default: 2.
    pub precision: usize,

    /// Append the ridden distance (`routeLength`) to route fragments.
    pub route_length: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { precision: 2, route_length: false }
    }
}

impl OutputConfig {
    /// Render a floating-point attribute with the configured precision.
    pub fn fmt_f64(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }
}

/// Top-level simulation configuration.
///
/// Typically deserialized by the application from its scenario settings
/// (with the `serde` feature) and handed to the simulation context.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Time of the first step.
    pub begin: SimTime,

    /// Time at which the run stops; `None` runs until every entity arrived.
    pub end: Option<SimTime>,

    /// Length of one step.  Must be positive.
    pub step_length: SimTime,

    pub output: OutputConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            begin:       SimTime::ZERO,
            end:         None,
            step_length: SimTime::from_secs(1),
            output:      OutputConfig::default(),
        }
    }
}

impl SimConfig {
    /// Reject step lengths and end times that would stall the clock.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.step_length.is_positive() {
            return Err(CoreError::Config(format!(
                "step length must be positive, got {}",
                self.step_length
            )));
        }
        if let Some(end) = self.end {
            if end <= self.begin {
                return Err(CoreError::Config(format!(
                    "end {end} is not after begin {}",
                    self.begin
                )));
            }
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.begin, self.step_length)
    }
}
