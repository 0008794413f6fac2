//! Waypoint sources: откуда платформа берёт точки.
//!
//! `FloatingPlatform` держит `Box<dyn WaypointSource>`, вариант выбирается
//! при спавне:
//! - `EmptyWaypoints`: base, точек нет (свой source = свой impl трейта)
//! - `WaypointList`: фиксированные world positions
//! - `TargetWaypoints`: список target entities (positions синкаются каждый tick)

use bevy::prelude::*;
use crate::error::ConfigError;
use crate::platform::components::PlatformSettings;

/// Источник waypoint'ов + travel time calculator
///
/// "Waypoint" здесь: значение из waypoint set (индекс точки у source),
/// FSM хранит позиции в этом set'е.
pub trait WaypointSource: Send + Sync + 'static {
    /// Построить waypoint set. Ошибки конфигурации складываем в `errors`.
    fn fill_point_indexes(
        &self,
        _settings: &PlatformSettings,
        _errors: &mut Vec<ConfigError>,
    ) -> Vec<usize> {
        Vec::new()
    }

    /// Выкинуть custom stops, которые ссылаются на несуществующие точки
    fn remove_invalid_custom_indexes(
        &self,
        _custom_stops: &mut Vec<usize>,
        _errors: &mut Vec<ConfigError>,
    ) {
    }

    /// Время переезда `from → to` (секунды)
    fn calculate_travel_time(&self, _from: usize, _to: usize, settings: &PlatformSettings) -> f32 {
        settings.travel_time
    }

    /// World position waypoint'а (None: точка не резолвится)
    fn point_position(&self, _waypoint: usize) -> Option<Vec3> {
        None
    }

    /// Позиция платформы между двумя waypoint'ами (alpha уже прошла через curve)
    fn move_platform(&self, from: usize, to: usize, alpha: f32) -> Option<Vec3> {
        let start = self.point_position(from)?;
        let end = self.point_position(to)?;
        Some(start.lerp(end, alpha))
    }

    /// Обновить закэшированные позиции entity-based точек
    fn refresh_positions(&mut self, _resolve: &dyn Fn(Entity) -> Option<Vec3>) {}
}

/// Travel time по скорости: distance / speed (speed ≤ 0 или нулевая distance → configured)
fn travel_time_from_speed(
    start: Option<Vec3>,
    end: Option<Vec3>,
    settings: &PlatformSettings,
) -> f32 {
    if settings.speed <= 0.0 {
        return settings.travel_time;
    }

    match (start, end) {
        (Some(start), Some(end)) => {
            let distance = start.distance(end);
            if distance > f32::EPSILON {
                distance / settings.speed
            } else {
                settings.travel_time
            }
        }
        _ => settings.travel_time,
    }
}

/// Base source без точек
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWaypoints;

impl WaypointSource for EmptyWaypoints {}

/// Фиксированный список world positions
#[derive(Debug, Clone, Default)]
pub struct WaypointList {
    pub points: Vec<Vec3>,
}

impl WaypointList {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }
}

impl WaypointSource for WaypointList {
    fn fill_point_indexes(
        &self,
        _settings: &PlatformSettings,
        _errors: &mut Vec<ConfigError>,
    ) -> Vec<usize> {
        (0..self.points.len()).collect()
    }

    fn remove_invalid_custom_indexes(
        &self,
        custom_stops: &mut Vec<usize>,
        errors: &mut Vec<ConfigError>,
    ) {
        let count = self.points.len();
        custom_stops.retain(|&index| {
            if index < count {
                return true;
            }
            errors.push(ConfigError::CustomStopOutOfRange { index, count });
            false
        });
    }

    fn calculate_travel_time(&self, from: usize, to: usize, settings: &PlatformSettings) -> f32 {
        travel_time_from_speed(self.point_position(from), self.point_position(to), settings)
    }

    fn point_position(&self, waypoint: usize) -> Option<Vec3> {
        self.points.get(waypoint).copied()
    }
}

/// Точки = designer-assigned target entities.
///
/// `None` или despawned entity (без Transform) считается "null" target.
#[derive(Debug, Clone, Default)]
pub struct TargetWaypoints {
    targets: Vec<Option<Entity>>,
    positions: Vec<Option<Vec3>>,
}

impl TargetWaypoints {
    pub fn new(targets: Vec<Option<Entity>>) -> Self {
        let positions = vec![None; targets.len()];
        Self { targets, positions }
    }

    pub fn targets(&self) -> &[Option<Entity>] {
        &self.targets
    }

    pub fn is_target_valid(&self, index: usize) -> bool {
        matches!(self.positions.get(index), Some(Some(_)))
    }

    fn valid_target_count(&self) -> usize {
        (0..self.targets.len())
            .filter(|&index| self.is_target_valid(index))
            .count()
    }

    /// Все валидные targets в порядке списка, null → ошибка
    fn collect_valid_targets(&self, errors: &mut Vec<ConfigError>) -> Vec<usize> {
        let mut points = Vec::with_capacity(self.targets.len());

        for index in 0..self.targets.len() {
            if !self.is_target_valid(index) {
                errors.push(ConfigError::NullTarget { index });
                continue;
            }
            points.push(index);
        }

        points
    }
}

impl WaypointSource for TargetWaypoints {
    fn fill_point_indexes(
        &self,
        settings: &PlatformSettings,
        errors: &mut Vec<ConfigError>,
    ) -> Vec<usize> {
        let valid_count = self.valid_target_count();
        if valid_count < 2 {
            errors.push(ConfigError::NotEnoughTargets { count: valid_count });
            return Vec::new();
        }

        match settings.movement_mode {
            crate::platform::MovementMode::Manual => self.collect_valid_targets(errors),
            _ if settings.stops_at_custom_points_only() => {
                let count = settings.custom_stop_indexes.len();
                if count < 2 {
                    errors.push(ConfigError::NotEnoughCustomStops { count });
                    return Vec::new();
                }

                let mut points = settings.custom_stop_indexes.clone();
                points.sort_unstable();
                points.dedup();
                points
            }
            _ => self.collect_valid_targets(errors),
        }
    }

    fn remove_invalid_custom_indexes(
        &self,
        custom_stops: &mut Vec<usize>,
        errors: &mut Vec<ConfigError>,
    ) {
        let count = self.targets.len();

        custom_stops.retain(|&index| {
            if index >= count {
                errors.push(ConfigError::CustomStopOutOfRange { index, count });
                return false;
            }

            if !self.is_target_valid(index) {
                errors.push(ConfigError::CustomStopNullTarget { index });
                return false;
            }

            true
        });
    }

    fn calculate_travel_time(&self, from: usize, to: usize, settings: &PlatformSettings) -> f32 {
        travel_time_from_speed(self.point_position(from), self.point_position(to), settings)
    }

    fn point_position(&self, waypoint: usize) -> Option<Vec3> {
        self.positions.get(waypoint).copied().flatten()
    }

    fn refresh_positions(&mut self, resolve: &dyn Fn(Entity) -> Option<Vec3>) {
        for (target, position) in self.targets.iter().zip(self.positions.iter_mut()) {
            *position = target.and_then(resolve);
        }
    }
}
