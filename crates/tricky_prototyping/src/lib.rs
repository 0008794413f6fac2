//! Tricky Prototyping
//!
//! Набор gameplay-компонентов для прототипирования уровней на Bevy 0.16:
//! - platform: floating platforms (waypoints + Loop / PingPong / Manual FSM)
//! - ui: show/hide анимированные виджеты
//! - trigger: box/sphere trigger volumes + interaction queue
//!
//! Все компоненты headless: presentation layer читает состояние и события.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use serde::{Deserialize, Serialize};

// Публичные модули
pub mod error;
pub mod logger;
pub mod platform;
pub mod trigger;
pub mod ui;

pub use error::ConfigError;
pub use logger::*;
pub use platform::{
    FloatingPlatform, MovementCurve, MovementMode, PlatformAction, PlatformCommand, PlatformPlugin,
    PlatformSettings, PlatformState, PointReached, WaitFinished, WaitStarted,
};
pub use trigger::{InteractionQueue, InteractionTrigger, TriggerPlugin, TriggerShape, TriggerVolume};
pub use ui::{AnimatedWidget, WidgetAnimation, WidgetPlugin, WidgetVisibility};

/// Глобальные настройки (tick rate + log level)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrototypingSettings {
    /// FixedUpdate частота (Hz)
    pub tick_rate_hz: f64,
    pub log_level: LogLevel,
}

impl Default for PrototypingSettings {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            log_level: LogLevel::Info,
        }
    }
}

/// Главный plugin (объединяет все подсистемы)
#[derive(Default)]
pub struct PrototypingPlugin {
    pub settings: PrototypingSettings,
}

impl Plugin for PrototypingPlugin {
    fn build(&self, app: &mut App) {
        set_log_level(self.settings.log_level);

        app.insert_resource(Time::<Fixed>::from_hz(self.settings.tick_rate_hz))
            .insert_resource(self.settings.clone())
            .add_plugins((PlatformPlugin, WidgetPlugin, TriggerPlugin));
    }
}

/// Создаёт minimal Bevy App для headless прогона
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins);

    app
}

/// Каждый app.update() продвигает время ровно на один fixed tick
///
/// Вызывать после добавления PrototypingPlugin (берёт его timestep).
pub fn enable_manual_clock(app: &mut App) {
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(timestep));
}
