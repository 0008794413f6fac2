//! Platform configuration + state enums (designer-facing).

use bevy::math::curve::easing::EaseFunction;
use bevy::math::curve::Curve;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Travel time по умолчанию (секунды), также safe default при clamp
pub const DEFAULT_TRAVEL_TIME: f32 = 2.0;

/// Fallback если travel time ≤ 0
pub const CLAMPED_TRAVEL_TIME: f32 = 1.0;

/// Platform FSM состояния
///
/// Initial: Idle. Terminal state нет: FSM живёт вместе с entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum PlatformState {
    /// Не движемся и не ждём
    #[default]
    Idle,
    /// Timeline активен, progress растёт
    Moving,
    /// Стоим в точке, wait timer pending
    Waiting,
}

/// Поведение на границе waypoint set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum MovementMode {
    /// После последней точки едем в первую (reversed: после первой: в последнюю)
    #[default]
    Loop,
    /// На границе разворачиваемся
    PingPong,
    /// Без коррекции: на границе платформа останавливается (Idle).
    /// Для target platforms: все валидные targets, custom stops игнорируются.
    Manual,
}

/// Кривая движения между двумя точками (progress 0..1 → alpha 0..1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum MovementCurve {
    #[default]
    Linear,
    QuadraticInOut,
    CubicInOut,
    SineInOut,
}

impl MovementCurve {
    pub fn ease_function(self) -> EaseFunction {
        match self {
            MovementCurve::Linear => EaseFunction::Linear,
            MovementCurve::QuadraticInOut => EaseFunction::QuadraticInOut,
            MovementCurve::CubicInOut => EaseFunction::CubicInOut,
            MovementCurve::SineInOut => EaseFunction::SineInOut,
        }
    }

    pub fn sample(self, progress: f32) -> f32 {
        self.ease_function().sample_clamped(progress.clamp(0.0, 1.0))
    }
}

/// Настройки floating platform (то, что designer выставляет на уровне)
///
/// `#[serde(default)]`: preset может содержать только изменённые поля.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    /// Стартовать сразу после construction
    pub auto_start: bool,
    pub movement_mode: MovementMode,
    pub movement_curve: MovementCurve,
    /// Индекс стартовой точки (позиция в waypoint set)
    pub start_point_index: usize,
    /// Скорость (units/sec). 0 = используем `travel_time` как есть
    pub speed: f32,
    /// Время между двумя точками (секунды)
    pub travel_time: f32,
    /// Останавливаться в точках вообще
    pub stop_at_points: bool,
    /// Останавливаться только в `custom_stop_indexes`
    pub stop_at_certain_points: bool,
    /// Подождать в стартовой точке перед первым движением
    pub wait_at_start: bool,
    /// Время ожидания в точке (секунды). ≤ 0 выключает `stop_at_points`
    pub wait_duration: f32,
    pub custom_stop_indexes: Vec<usize>,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            auto_start: true,
            movement_mode: MovementMode::Loop,
            movement_curve: MovementCurve::Linear,
            start_point_index: 0,
            speed: 0.0,
            travel_time: DEFAULT_TRAVEL_TIME,
            stop_at_points: false,
            stop_at_certain_points: false,
            wait_at_start: false,
            wait_duration: 2.0,
            custom_stop_indexes: Vec::new(),
        }
    }
}

impl PlatformSettings {
    /// Режим "стоим только в custom stops"
    pub fn stops_at_custom_points_only(&self) -> bool {
        self.stop_at_points && self.stop_at_certain_points
    }
}
