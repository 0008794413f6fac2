//! Floating platforms
//!
//! Платформа двигается между waypoint'ами по timeline (curve-driven),
//! с Loop / PingPong / Manual на границе и опциональным ожиданием в точках.
//!
//! ECS ответственность:
//! - FloatingPlatform: FSM (Idle / Moving / Waiting) + waypoint source
//! - MovementTimeline / WaitTimer: внешние коллабораторы FSM
//! - Events: PointReached, WaitStarted, WaitFinished, PlatformStateChanged

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod machine;
pub mod systems;
pub mod waypoints;

#[cfg(test)]
mod waypoints_tests;

pub use components::*;
pub use events::*;
pub use machine::{FloatingPlatform, PlatformNotice};
pub use waypoints::{EmptyWaypoints, TargetWaypoints, WaypointList, WaypointSource};

/// Platform Plugin
///
/// Все системы в FixedUpdate, chain(): completion callback и wait timer
/// никогда не пересекаются в одном entity.
pub struct PlatformPlugin;

impl Plugin for PlatformPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointReached>()
            .add_event::<WaitStarted>()
            .add_event::<WaitFinished>()
            .add_event::<PlatformStateChanged>()
            .add_event::<ConfigurationError>()
            .add_event::<PlatformCommand>();

        app.register_type::<PlatformSettings>()
            .register_type::<PlatformState>()
            .register_type::<MovementMode>()
            .register_type::<MovementCurve>()
            .register_type::<MovementTimeline>();

        app.add_systems(
            FixedUpdate,
            (
                systems::sync_target_positions,
                systems::construct_platforms,
                systems::handle_platform_commands,
                systems::tick_wait_timers,
                systems::advance_platform_timelines,
                systems::publish_platform_events,
            )
                .chain(),
        );
    }
}
