//! Tests for waypoint sources.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::error::ConfigError;
    use crate::platform::components::{MovementMode, PlatformSettings};
    use crate::platform::machine::{FloatingPlatform, PlatformNotice};
    use crate::platform::waypoints::*;

    fn entity(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    /// Targets на оси X (x = 10 * index), `None` в списке → null target
    fn resolved_targets(targets: Vec<Option<Entity>>) -> TargetWaypoints {
        let mut source = TargetWaypoints::new(targets);
        source.refresh_positions(&|e: Entity| Some(Vec3::new(e.index() as f32 * 10.0, 0.0, 0.0)));
        source
    }

    fn three_targets() -> TargetWaypoints {
        resolved_targets(vec![Some(entity(0)), Some(entity(1)), Some(entity(2))])
    }

    #[test]
    fn test_empty_source_has_no_points() {
        let mut errors = Vec::new();
        let points = EmptyWaypoints.fill_point_indexes(&PlatformSettings::default(), &mut errors);

        assert!(points.is_empty());
        assert!(errors.is_empty());
        assert_eq!(EmptyWaypoints.point_position(0), None);
        assert_eq!(EmptyWaypoints.calculate_travel_time(0, 1, &PlatformSettings::default()), 2.0);
    }

    #[test]
    fn test_single_target_is_not_enough() {
        let source = resolved_targets(vec![Some(entity(1)), None]);
        let mut errors = Vec::new();

        let points = source.fill_point_indexes(&PlatformSettings::default(), &mut errors);

        assert!(points.is_empty());
        assert_eq!(errors, vec![ConfigError::NotEnoughTargets { count: 1 }]);
    }

    #[test]
    fn test_null_targets_are_skipped() {
        let source = resolved_targets(vec![Some(entity(0)), None, Some(entity(2)), Some(entity(3))]);
        let settings = PlatformSettings {
            movement_mode: MovementMode::Manual,
            ..default()
        };
        let mut errors = Vec::new();

        let points = source.fill_point_indexes(&settings, &mut errors);

        assert_eq!(points, vec![0, 2, 3]);
        assert_eq!(errors, vec![ConfigError::NullTarget { index: 1 }]);
    }

    #[test]
    fn test_despawned_target_counts_as_null() {
        let mut source = TargetWaypoints::new(vec![Some(entity(0)), Some(entity(1)), Some(entity(2))]);
        // entity(1) "despawned": Transform не резолвится
        source.refresh_positions(&|e: Entity| (e.index() != 1).then(|| Vec3::splat(e.index() as f32)));

        assert!(source.is_target_valid(0));
        assert!(!source.is_target_valid(1));
        assert_eq!(source.point_position(1), None);

        let mut errors = Vec::new();
        let points = source.fill_point_indexes(&PlatformSettings::default(), &mut errors);
        assert_eq!(points, vec![0, 2]);
    }

    #[test]
    fn test_custom_stops_become_waypoint_set() {
        let source = three_targets();
        let settings = PlatformSettings {
            stop_at_points: true,
            stop_at_certain_points: true,
            custom_stop_indexes: vec![2, 0],
            ..default()
        };
        let mut errors = Vec::new();

        let points = source.fill_point_indexes(&settings, &mut errors);

        assert_eq!(points, vec![0, 2]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_manual_mode_ignores_custom_stops() {
        let source = three_targets();
        let settings = PlatformSettings {
            movement_mode: MovementMode::Manual,
            stop_at_points: true,
            stop_at_certain_points: true,
            custom_stop_indexes: vec![2],
            ..default()
        };
        let mut errors = Vec::new();

        assert_eq!(source.fill_point_indexes(&settings, &mut errors), vec![0, 1, 2]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_remove_invalid_custom_indexes() {
        let source = resolved_targets(vec![Some(entity(0)), None, Some(entity(2))]);
        let mut custom = vec![5, 2, 1, 0];
        let mut errors = Vec::new();

        source.remove_invalid_custom_indexes(&mut custom, &mut errors);

        assert_eq!(custom, vec![2, 0]);
        assert_eq!(
            errors,
            vec![
                ConfigError::CustomStopOutOfRange { index: 5, count: 3 },
                ConfigError::CustomStopNullTarget { index: 1 },
            ]
        );
    }

    #[test]
    fn test_out_of_range_custom_stop_leaves_too_few_stops() {
        let mut source = TargetWaypoints::new(vec![Some(entity(0)), Some(entity(1)), Some(entity(2))]);
        source.refresh_positions(&|e: Entity| Some(Vec3::splat(e.index() as f32)));

        let settings = PlatformSettings {
            auto_start: false,
            stop_at_points: true,
            stop_at_certain_points: true,
            custom_stop_indexes: vec![5, 2],
            ..default()
        };
        let mut platform = FloatingPlatform::new(settings, source);
        platform.construct();

        assert_eq!(platform.settings.custom_stop_indexes, vec![2]);
        assert!(platform.points().is_empty());
        // Source цел, пустой только waypoint set
        assert_eq!(platform.source().point_position(2), Some(Vec3::splat(2.0)));
        assert_eq!(platform.source().point_position(5), None);

        let notices = platform.drain_notices();
        assert!(notices.contains(&PlatformNotice::Misconfigured(
            ConfigError::CustomStopOutOfRange { index: 5, count: 3 }
        )));
        assert!(notices.contains(&PlatformNotice::Misconfigured(
            ConfigError::NotEnoughCustomStops { count: 1 }
        )));
        assert!(notices.contains(&PlatformNotice::Misconfigured(ConfigError::EmptyWaypoints)));
    }

    #[test]
    fn test_target_travel_time_uses_speed() {
        let source = three_targets();
        let mut settings = PlatformSettings {
            travel_time: 3.0,
            ..default()
        };

        // speed 0 → configured travel time
        assert_eq!(source.calculate_travel_time(0, 2, &settings), 3.0);

        settings.speed = 5.0; // 20 units / 5 = 4 sec
        assert_eq!(source.calculate_travel_time(0, 2, &settings), 4.0);

        // Одна и та же точка: distance 0
        assert_eq!(source.calculate_travel_time(1, 1, &settings), 3.0);
    }

    #[test]
    fn test_target_move_platform_lerps_between_targets() {
        let source = three_targets();

        assert_eq!(source.move_platform(0, 1, 0.5), Some(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(source.move_platform(0, 7, 0.5), None);
    }

    #[test]
    fn test_waypoint_list_custom_stops_filter() {
        let source = WaypointList::new(vec![Vec3::ZERO, Vec3::X]);
        let mut custom = vec![0, 3];
        let mut errors = Vec::new();

        source.remove_invalid_custom_indexes(&mut custom, &mut errors);

        assert_eq!(custom, vec![0]);
        assert_eq!(errors, vec![ConfigError::CustomStopOutOfRange { index: 3, count: 2 }]);
    }
}
