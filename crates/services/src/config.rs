use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(3);
pub const DEFAULT_TICK_DECREMENT: f64 = 5.0;
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_secs(2);

/// Timing of the simulated walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    tick_period: Duration,
    tick_decrement: f64,
    completion_delay: Duration,
}

/// Partially specified settings, as read from a JSON file or the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SimulationSettingsDraft {
    pub tick_period_ms: Option<u64>,
    pub tick_decrement: Option<f64>,
    pub completion_delay_ms: Option<u64>,
}

impl SimulationSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill unset fields from `other`. Fields already set win.
    #[must_use]
    pub fn or(self, other: SimulationSettingsDraft) -> Self {
        Self {
            tick_period_ms: self.tick_period_ms.or(other.tick_period_ms),
            tick_decrement: self.tick_decrement.or(other.tick_decrement),
            completion_delay_ms: self.completion_delay_ms.or(other.completion_delay_ms),
        }
    }

    /// Validate the draft, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a zero tick period or a non-positive decrement.
    pub fn validate(self) -> Result<SimulationSettings, ConfigError> {
        let tick_period = match self.tick_period_ms {
            Some(0) => return Err(ConfigError::NonPositive { field: "tickPeriodMs" }),
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_TICK_PERIOD,
        };
        let tick_decrement = self.tick_decrement.unwrap_or(DEFAULT_TICK_DECREMENT);
        if !tick_decrement.is_finite() || tick_decrement <= 0.0 {
            return Err(ConfigError::InvalidDecrement(tick_decrement));
        }
        // A zero delay is allowed: advance on the next scheduler turn.
        let completion_delay = self
            .completion_delay_ms
            .map_or(DEFAULT_COMPLETION_DELAY, Duration::from_millis);

        Ok(SimulationSettings {
            tick_period,
            tick_decrement,
            completion_delay,
        })
    }
}

impl SimulationSettings {
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of range.
    pub fn new(
        tick_period: Duration,
        tick_decrement: f64,
        completion_delay: Duration,
    ) -> Result<Self, ConfigError> {
        if tick_period.is_zero() {
            return Err(ConfigError::NonPositive { field: "tickPeriodMs" });
        }
        if !tick_decrement.is_finite() || tick_decrement <= 0.0 {
            return Err(ConfigError::InvalidDecrement(tick_decrement));
        }
        Ok(Self {
            tick_period,
            tick_decrement,
            completion_delay,
        })
    }

    /// Read a JSON settings file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on I/O, parse or validation failures.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let draft: SimulationSettingsDraft = serde_json::from_str(&raw)?;
        draft.validate()
    }

    /// Same timing, `factor` times faster. The tick period never drops below 1 ms.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSpeed` for a factor that is not finite and
    /// positive, or so small that the stretched timers overflow a `Duration`.
    pub fn sped_up(self, factor: f64) -> Result<Self, ConfigError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ConfigError::InvalidSpeed(factor));
        }
        let scale = |d: Duration| {
            Duration::try_from_secs_f64(d.as_secs_f64() / factor)
                .map_err(|_| ConfigError::InvalidSpeed(factor))
        };
        let tick_period = scale(self.tick_period)?.max(Duration::from_millis(1));
        Ok(Self {
            tick_period,
            tick_decrement: self.tick_decrement,
            completion_delay: scale(self.completion_delay)?,
        })
    }

    #[must_use]
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    #[must_use]
    pub fn tick_decrement(&self) -> f64 {
        self.tick_decrement
    }

    #[must_use]
    pub fn completion_delay(&self) -> Duration {
        self.completion_delay
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            tick_decrement: DEFAULT_TICK_DECREMENT,
            completion_delay: DEFAULT_COMPLETION_DELAY,
        }
    }
}
