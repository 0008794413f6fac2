//! Headless демо Tricky Prototyping
//!
//! PingPong платформа между тремя target'ами с ожиданием в каждой точке.
//! Печатает события платформы, без рендера.

use bevy::prelude::*;
use tricky_prototyping::platform::{PlatformStateChanged, WaitFinished, WaitStarted};
use tricky_prototyping::{
    create_headless_app, enable_manual_clock, FloatingPlatform, MovementCurve, MovementMode,
    PlatformSettings, PointReached, PrototypingPlugin,
};

fn main() {
    let mut app = create_headless_app();
    app.add_plugins(PrototypingPlugin::default());
    enable_manual_clock(&mut app);

    let targets: Vec<Option<Entity>> = [0.0, 6.0, 12.0]
        .into_iter()
        .map(|x| {
            Some(
                app.world_mut()
                    .spawn(Transform::from_xyz(x, 2.0, 0.0))
                    .id(),
            )
        })
        .collect();

    let settings = PlatformSettings {
        movement_mode: MovementMode::PingPong,
        movement_curve: MovementCurve::SineInOut,
        speed: 4.0,
        stop_at_points: true,
        wait_duration: 0.5,
        ..default()
    };
    let platform = app
        .world_mut()
        .spawn(FloatingPlatform::with_targets(settings, targets))
        .id();

    println!("Starting Tricky Prototyping headless demo (platform: {:?})", platform);

    // 600 тиков = 10 секунд при 60Hz
    for tick in 0..600 {
        app.update();
        print_platform_events(&mut app);

        if tick % 60 == 0 {
            if let Some(transform) = app.world().get::<Transform>(platform) {
                println!("Tick {}: platform at {:?}", tick, transform.translation);
            }
        }
    }

    println!("Demo complete!");
}

fn print_platform_events(app: &mut App) {
    let world = app.world_mut();

    for event in world.resource_mut::<Events<PointReached>>().drain() {
        println!("  point reached: {}", event.point_index);
    }
    for event in world.resource_mut::<Events<WaitStarted>>().drain() {
        println!("  wait started at {}", event.point_index);
    }
    for event in world.resource_mut::<Events<WaitFinished>>().drain() {
        println!("  wait finished at {}", event.point_index);
    }
    for event in world.resource_mut::<Events<PlatformStateChanged>>().drain() {
        println!("  state -> {:?}", event.state);
    }
}
