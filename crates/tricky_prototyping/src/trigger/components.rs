//! Trigger components
//!
//! TriggerVolume: enable gate поверх rapier sensor'а.
//! InteractionTrigger: маркирует trigger как источник interaction entries.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

/// Форма trigger volume
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub enum TriggerShape {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl Default for TriggerShape {
    fn default() -> Self {
        Self::Box {
            half_extents: Vec3::splat(0.5),
        }
    }
}

impl TriggerShape {
    pub fn collider(&self) -> Collider {
        match *self {
            Self::Box { half_extents } => {
                Collider::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            Self::Sphere { radius } => Collider::ball(radius),
        }
    }
}

/// Overlap trigger (box или sphere)
///
/// Выключенный trigger не сообщает ни о входе, ни о выходе.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct TriggerVolume {
    enabled: bool,
    pub shape: TriggerShape,
}

impl Default for TriggerVolume {
    fn default() -> Self {
        Self {
            enabled: true,
            shape: TriggerShape::default(),
        }
    }
}

impl TriggerVolume {
    pub fn new(shape: TriggerShape) -> Self {
        Self {
            enabled: true,
            shape,
        }
    }

    pub fn boxed(half_extents: Vec3) -> Self {
        Self::new(TriggerShape::Box { half_extents })
    }

    pub fn sphere(radius: f32) -> Self {
        Self::new(TriggerShape::Sphere { radius })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Rapier bundle: sensor collider с collision events
    ///
    /// KINEMATIC_STATIC: платформы и trigger'ы без rigid body тоже
    /// должны давать события.
    pub fn trigger_collider(&self) -> impl Bundle {
        (
            self.shape.collider(),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
        )
    }
}

/// Interaction specialization trigger'а
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
#[require(TriggerVolume)]
pub struct InteractionTrigger {
    pub require_line_of_sight: bool,
    /// true: срабатывает как обычный trigger (без отдельного input'а)
    pub is_normal_trigger: bool,
    pub interaction_message: String,
}

/// Запись в interaction queue актора
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct InteractionEntry {
    /// Trigger entity
    pub source: Entity,
    pub require_line_of_sight: bool,
    pub is_normal_trigger: bool,
    pub message: String,
}

/// Очередь interaction'ов актора (порядок = порядок входа)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct InteractionQueue {
    entries: Vec<InteractionEntry>,
}

impl InteractionQueue {
    pub fn entries(&self) -> &[InteractionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Первый в очереди
    pub fn front(&self) -> Option<&InteractionEntry> {
        self.entries.first()
    }

    pub fn contains(&self, source: Entity) -> bool {
        self.entries.iter().any(|entry| entry.source == source)
    }

    /// `false` если entry от этого trigger'а уже есть
    pub fn add(&mut self, entry: InteractionEntry) -> bool {
        if self.contains(entry.source) {
            return false;
        }

        self.entries.push(entry);
        true
    }

    /// `false` если entry не было
    pub fn remove(&mut self, source: Entity) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.source != source);
        self.entries.len() != before
    }
}
