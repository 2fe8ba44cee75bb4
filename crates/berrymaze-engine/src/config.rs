//! Engine configuration, validation, and error types.

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Default pause after each paced instruction.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(300);
/// Default nesting limit for instruction bodies.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`EngineConfig::validate()`] or while starting a run.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_depth` is zero, so no body could ever run.
    ZeroMaxDepth,
    /// `event_buffer` is `Some(0)`.
    EventBufferZero,
    /// The run thread could not be spawned.
    ThreadSpawnFailed {
        /// OS error description.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxDepth => write!(f, "max_depth must be at least 1"),
            Self::EventBufferZero => write!(f, "event_buffer must be at least 1 when set"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
        }
    }
}

impl Error for ConfigError {}

// ── EngineConfig ───────────────────────────────────────────────────

/// Configuration shared by the lockstep and realtime runners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pause after each `Move`, `Repeat` and `If`. Default: 300 ms.
    pub step_delay: Duration,
    /// Deepest body nesting a run may enter. Default: 64.
    pub max_depth: u32,
    /// Ordinary events the realtime channel may hold before the worker
    /// waits for the consumer. One extra slot is kept for the terminal
    /// event. `None` = unbounded (default).
    pub event_buffer: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            max_depth: DEFAULT_MAX_DEPTH,
            event_buffer: None,
        }
    }
}

impl EngineConfig {
    /// Default configuration with no step delay.
    pub fn instant() -> Self {
        Self {
            step_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Set the step delay.
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Set the nesting limit.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        if self.event_buffer == Some(0) {
            return Err(ConfigError::EventBufferZero);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let c = EngineConfig::default();
        assert_eq!(c.max_depth, 64);
        assert_eq!(c.event_buffer, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_depth_rejected() {
        let c = EngineConfig::default().with_max_depth(0);
        assert_eq!(c.validate(), Err(ConfigError::ZeroMaxDepth));
    }

    #[test]
    fn zero_buffer_rejected() {
        let c = EngineConfig {
            event_buffer: Some(0),
            ..EngineConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::EventBufferZero));
    }

    #[test]
    fn instant_has_no_delay() {
        assert_eq!(EngineConfig::instant().step_delay, Duration::ZERO);
    }
}
