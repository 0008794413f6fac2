//! Trigger domain: overlap volumes + interaction queue.
//!
//! Rapier генерирует CollisionEvent для Sensor колайдеров, мы фильтруем их
//! через enable gate и переводим в доменные события.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

pub mod components;


pub use components::*;

/// Актор вошёл в trigger volume
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEntered {
    pub trigger: Entity,
    pub other: Entity,
}

/// Актор вышел из trigger volume
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerExited {
    pub trigger: Entity,
    pub other: Entity,
}

/// InteractionQueue актора изменилась (added = true → entry добавлен)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionQueueChanged {
    pub actor: Entity,
    pub trigger: Entity,
    pub added: bool,
}

/// Система: TriggerVolume → rapier sensor collider
///
/// Changed ловит и spawn, и set_enabled / смену формы. Выключение
/// вычищает entries этого trigger'а из всех очередей: exit events
/// выключенного trigger'а подавлены, иначе entry остался бы навсегда.
pub fn sync_trigger_colliders(
    mut commands: Commands,
    triggers: Query<(Entity, &TriggerVolume), Changed<TriggerVolume>>,
    mut queues: Query<(Entity, &mut InteractionQueue)>,
    mut queue_changed: EventWriter<InteractionQueueChanged>,
) {
    for (trigger, volume) in triggers.iter() {
        let mut entity_commands = commands.entity(trigger);
        entity_commands.insert(volume.trigger_collider());

        if volume.is_enabled() {
            entity_commands.remove::<ColliderDisabled>();
            continue;
        }

        entity_commands.insert(ColliderDisabled);

        for (actor, mut queue) in queues.iter_mut() {
            if queue.remove(trigger) {
                queue_changed.write(InteractionQueueChanged {
                    actor,
                    trigger,
                    added: false,
                });
            }
        }
    }
}

/// Система: CollisionEvent → TriggerEntered / TriggerExited (+ interaction queue)
pub fn route_trigger_overlaps(
    mut collisions: EventReader<CollisionEvent>,
    triggers: Query<(&TriggerVolume, Option<&InteractionTrigger>)>,
    mut queues: Query<&mut InteractionQueue>,
    mut entered: EventWriter<TriggerEntered>,
    mut exited: EventWriter<TriggerExited>,
    mut queue_changed: EventWriter<InteractionQueueChanged>,
) {
    for collision in collisions.read() {
        let (e1, e2, started) = match *collision {
            CollisionEvent::Started(e1, e2, _) => (e1, e2, true),
            CollisionEvent::Stopped(e1, e2, _) => (e1, e2, false),
        };

        // Любая из сторон может быть trigger'ом (или обе)
        for (trigger, other) in [(e1, e2), (e2, e1)] {
            let Ok((volume, interaction)) = triggers.get(trigger) else {
                continue;
            };

            if !volume.is_enabled() {
                continue;
            }

            if started {
                entered.write(TriggerEntered { trigger, other });
            } else {
                exited.write(TriggerExited { trigger, other });
            }

            let Some(interaction) = interaction else {
                continue;
            };

            // Актор без очереди: просто overlap, без interaction
            let Ok(mut queue) = queues.get_mut(other) else {
                continue;
            };

            let changed = if started {
                queue.add(InteractionEntry {
                    source: trigger,
                    require_line_of_sight: interaction.require_line_of_sight,
                    is_normal_trigger: interaction.is_normal_trigger,
                    message: interaction.interaction_message.clone(),
                })
            } else {
                queue.remove(trigger)
            };

            if changed {
                queue_changed.write(InteractionQueueChanged {
                    actor: other,
                    trigger,
                    added: started,
                });
            }
        }
    }
}

/// Trigger Plugin
///
/// Системы в Update: CollisionEvent живёт два кадра, FixedUpdate при низком
/// tick rate может пропустить событие.
pub struct TriggerPlugin;

impl Plugin for TriggerPlugin {
    fn build(&self, app: &mut App) {
        // RapierPhysicsPlugin регистрирует CollisionEvent сам; add_event
        // идемпотентен, а без physics plugin события можно слать вручную.
        app.add_event::<CollisionEvent>()
            .add_event::<TriggerEntered>()
            .add_event::<TriggerExited>()
            .add_event::<InteractionQueueChanged>();

        app.register_type::<TriggerVolume>()
            .register_type::<InteractionTrigger>()
            .register_type::<InteractionQueue>();

        app.add_systems(
            Update,
            (sync_trigger_colliders, route_trigger_overlaps).chain(),
        );
    }
}
