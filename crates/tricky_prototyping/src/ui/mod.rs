//! UI domain: animated widgets.
//!
//! ECS не рендерит UI: `AnimatedWidget` хранит состояние show/hide анимаций
//! и видимость, presentation layer читает их и подписывается на
//! WidgetShown / WidgetHidden.

use bevy::prelude::*;

pub mod widget;


pub use widget::*;

/// Виджет закончил show-анимацию
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WidgetShown {
    pub widget: Entity,
}

/// Виджет закончил hide-анимацию
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WidgetHidden {
    pub widget: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    Show,
    Hide,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WidgetCommand {
    pub widget: Entity,
    pub action: WidgetAction,
}

/// Система: WidgetCommand → show/hide
pub fn handle_widget_commands(
    mut commands: EventReader<WidgetCommand>,
    mut widgets: Query<&mut AnimatedWidget>,
) {
    for command in commands.read() {
        let Ok(mut widget) = widgets.get_mut(command.widget) else {
            crate::log_warning(&format!(
                "WidgetCommand {:?}: entity {:?} has no AnimatedWidget",
                command.action, command.widget
            ));
            continue;
        };

        match command.action {
            WidgetAction::Show => widget.show(),
            WidgetAction::Hide => widget.hide(),
        }
    }
}

/// Система: тикаем анимации, публикуем Shown/Hidden
pub fn advance_widget_animations(
    mut widgets: Query<(Entity, &mut AnimatedWidget)>,
    mut shown: EventWriter<WidgetShown>,
    mut hidden: EventWriter<WidgetHidden>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut widget) in widgets.iter_mut() {
        widget.tick(delta);

        if !widget.has_notices() {
            continue;
        }

        for notice in widget.drain_notices() {
            match notice {
                WidgetNotice::Shown => {
                    shown.write(WidgetShown { widget: entity });
                }
                WidgetNotice::Hidden => {
                    hidden.write(WidgetHidden { widget: entity });
                }
            }
        }
    }
}

pub struct WidgetPlugin;

impl Plugin for WidgetPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WidgetShown>()
            .add_event::<WidgetHidden>()
            .add_event::<WidgetCommand>()
            .register_type::<AnimatedWidget>();

        app.add_systems(
            FixedUpdate,
            (handle_widget_commands, advance_widget_animations).chain(),
        );
    }
}
