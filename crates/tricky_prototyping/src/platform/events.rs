//! Platform events
//!
//! Outgoing: PointReached / WaitStarted / WaitFinished / PlatformStateChanged /
//! ConfigurationError (публикует `publish_platform_events`).
//! Incoming: PlatformCommand (управление платформой из gameplay кода).

use bevy::prelude::*;
use crate::error::ConfigError;
use crate::platform::components::PlatformState;

/// Платформа закончила сегмент, стартовавший из `point_index`
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PointReached {
    pub platform: Entity,
    pub point_index: usize,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct WaitStarted {
    pub platform: Entity,
    pub point_index: usize,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct WaitFinished {
    pub platform: Entity,
    pub point_index: usize,
}

/// Только на реальную смену состояния
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlatformStateChanged {
    pub platform: Entity,
    pub state: PlatformState,
}

/// Designer-time ошибка конфигурации (entity + причина)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ConfigurationError {
    pub entity: Entity,
    pub error: ConfigError,
}

/// Команды управления платформой
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformAction {
    Start,
    Stop,
    Resume,
    MoveToPoint(usize),
    SetSpeed(f32),
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlatformCommand {
    pub platform: Entity,
    pub action: PlatformAction,
}

impl PlatformCommand {
    pub fn new(platform: Entity, action: PlatformAction) -> Self {
        Self { platform, action }
    }
}
