//! Configuration errors
//!
//! Все ошибки: designer-time validation (неправильно настроенный актор).
//! Runtime не падает: значение clamp'ится к safe default, ошибка уходит
//! в `ConfigurationError` event + log.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("waypoint set is empty, platform can't move")]
    EmptyWaypoints,

    #[error("start point index {index} is invalid for {count} waypoints, reset to 0")]
    InvalidStartIndex { index: usize, count: usize },

    #[error("at least 2 targets required, got {count}")]
    NotEnoughTargets { count: usize },

    #[error("target {index} is not set or was despawned")]
    NullTarget { index: usize },

    #[error("at least 2 custom stops required to stop at certain points only, got {count}")]
    NotEnoughCustomStops { count: usize },

    #[error("custom stop {index} is out of range for {count} points")]
    CustomStopOutOfRange { index: usize, count: usize },

    #[error("custom stop {index} references a target that is not set or was despawned")]
    CustomStopNullTarget { index: usize },

    #[error("travel time {value} must be positive, clamped to 1.0")]
    NonPositiveTravelTime { value: f32 },
}
