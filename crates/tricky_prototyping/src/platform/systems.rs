//! Platform systems (FixedUpdate, chained).
//!
//! Порядок:
//! 1. sync_target_positions: Transform'ы targets → кэш в source
//! 2. construct_platforms: construct + begin play для новых платформ
//! 3. handle_platform_commands: PlatformCommand events → FSM
//! 4. tick_wait_timers: wait timer fired → finish_stop_timer
//! 5. advance_platform_timelines: progress → Transform, finished → continue_movement
//! 6. publish_platform_events: outbox → Bevy events

use bevy::prelude::*;
use crate::platform::components::{InterpolationDriver, MovementTimeline, WaitTimer};
use crate::platform::events::*;
use crate::platform::machine::{FloatingPlatform, PlatformNotice};

/// Система: обновить позиции target entities у всех платформ
///
/// Despawned target (нет Transform) → позиция None → target считается null.
/// Кэш позиций не считается изменением платформы: `Changed<FloatingPlatform>`
/// срабатывает только на переходы FSM.
pub fn sync_target_positions(
    mut platforms: Query<&mut FloatingPlatform>,
    transforms: Query<&Transform>,
) {
    let resolve = |entity: Entity| transforms.get(entity).ok().map(|t| t.translation);

    for mut platform in platforms.iter_mut() {
        platform
            .bypass_change_detection()
            .source_mut()
            .refresh_positions(&resolve);
    }
}

/// Система: construction + begin play для только что заспавненных платформ
pub fn construct_platforms(
    mut platforms: Query<
        (
            Entity,
            &mut FloatingPlatform,
            &mut MovementTimeline,
            &mut WaitTimer,
            &mut Transform,
        ),
        Added<FloatingPlatform>,
    >,
) {
    for (entity, mut platform, mut timeline, mut wait, mut transform) in platforms.iter_mut() {
        platform.construct();

        // Ставим платформу в стартовую точку
        if let Some(position) = platform.platform_position(0.0) {
            transform.translation = position;
        }

        platform.begin_play(&mut *timeline, &mut *wait);

        crate::log(&format!(
            "FloatingPlatform {:?}: constructed with {} points, state {:?}",
            entity,
            platform.points().len(),
            platform.state()
        ));
    }
}

/// Система: PlatformCommand → FSM операции
pub fn handle_platform_commands(
    mut commands: EventReader<PlatformCommand>,
    mut platforms: Query<(&mut FloatingPlatform, &mut MovementTimeline, &mut WaitTimer)>,
) {
    for command in commands.read() {
        let Ok((mut platform, mut timeline, mut wait)) = platforms.get_mut(command.platform) else {
            crate::log_warning(&format!(
                "PlatformCommand {:?}: entity {:?} is not a floating platform",
                command.action, command.platform
            ));
            continue;
        };

        match command.action {
            PlatformAction::Start => platform.start(&mut *timeline, &mut *wait),
            PlatformAction::Stop => platform.stop(&mut *timeline, &mut *wait),
            PlatformAction::Resume => platform.resume(&mut *timeline),
            PlatformAction::MoveToPoint(index) => {
                platform.move_to_point(index, &mut *timeline, &mut *wait)
            }
            PlatformAction::SetSpeed(value) => platform.set_speed(value),
        }
    }
}

/// Система: wait timers
pub fn tick_wait_timers(
    mut platforms: Query<(&mut FloatingPlatform, &mut MovementTimeline, &mut WaitTimer)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta();

    for (mut platform, mut timeline, mut wait) in platforms.iter_mut() {
        if wait.tick(delta) {
            platform.finish_stop_timer(&mut *timeline);
        }
    }
}

/// Система: timeline progress → позиция платформы, конец сегмента → continue_movement
pub fn advance_platform_timelines(
    mut platforms: Query<(
        &mut FloatingPlatform,
        &mut MovementTimeline,
        &mut WaitTimer,
        &mut Transform,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut platform, mut timeline, mut wait, mut transform) in platforms.iter_mut() {
        if !timeline.is_playing() {
            continue;
        }

        let finished = timeline.advance(delta);

        if let Some(position) = platform.platform_position(timeline.progress()) {
            transform.translation = position;
        }

        if finished {
            platform.continue_movement(&mut *timeline, &mut *wait);
        }
    }
}

/// Система: outbox платформ → Bevy events (+ лог ошибок конфигурации)
pub fn publish_platform_events(
    mut platforms: Query<(Entity, &mut FloatingPlatform)>,
    mut point_reached: EventWriter<PointReached>,
    mut wait_started: EventWriter<WaitStarted>,
    mut wait_finished: EventWriter<WaitFinished>,
    mut state_changed: EventWriter<PlatformStateChanged>,
    mut config_errors: EventWriter<ConfigurationError>,
) {
    for (platform, mut floating) in platforms.iter_mut() {
        // Read через Deref не помечает компонент changed
        if !floating.has_notices() {
            continue;
        }

        for notice in floating.drain_notices() {
            match notice {
                PlatformNotice::PointReached(point_index) => {
                    point_reached.write(PointReached { platform, point_index });
                }
                PlatformNotice::WaitStarted(point_index) => {
                    wait_started.write(WaitStarted { platform, point_index });
                }
                PlatformNotice::WaitFinished(point_index) => {
                    wait_finished.write(WaitFinished { platform, point_index });
                }
                PlatformNotice::StateChanged(state) => {
                    state_changed.write(PlatformStateChanged { platform, state });
                }
                PlatformNotice::Misconfigured(error) => {
                    crate::log_error(&format!("FloatingPlatform {:?}: {}", platform, error));
                    config_errors.write(ConfigurationError { entity: platform, error });
                }
            }
        }
    }
}
