//! Show/Hide widget controller
//!
//! Два именованных анимации (show, hide). Show стартует с текущего времени
//! hide-анимации (если она играет): бесшовный переход вместо jump cut.
//! Hide симметрично.

use bevy::prelude::*;

/// Видимость виджета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WidgetVisibility {
    #[default]
    Visible,
    Hidden,
}

/// Какая из двух анимаций
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum WidgetAnimationKind {
    Show,
    Hide,
}

/// Анимация виджета: имя + длина + playback position
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct WidgetAnimation {
    pub name: String,
    /// Длина (секунды)
    pub length: f32,
    current_time: f32,
    playing: bool,
}

impl WidgetAnimation {
    pub fn new(name: impl Into<String>, length: f32) -> Self {
        Self {
            name: name.into(),
            length: length.max(0.0),
            current_time: 0.0,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn play_from(&mut self, start_time: f32) {
        self.current_time = start_time.clamp(0.0, self.length);
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// `true`: анимация доиграла в этот tick
    pub fn advance(&mut self, delta: f32) -> bool {
        if !self.playing {
            return false;
        }

        self.current_time = (self.current_time + delta).min(self.length);

        if self.current_time >= self.length {
            self.playing = false;
            return true;
        }

        false
    }
}

/// Уведомления виджета (outbox → WidgetShown / WidgetHidden)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetNotice {
    Shown,
    Hidden,
}

/// Base animated widget
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct AnimatedWidget {
    pub show_animation: Option<WidgetAnimation>,
    pub hide_animation: Option<WidgetAnimation>,
    visibility: WidgetVisibility,
    #[reflect(ignore)]
    notices: Vec<WidgetNotice>,
}

impl AnimatedWidget {
    pub fn new(show_animation: Option<WidgetAnimation>, hide_animation: Option<WidgetAnimation>) -> Self {
        Self {
            show_animation,
            hide_animation,
            ..default()
        }
    }

    pub fn visibility(&self) -> WidgetVisibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: WidgetVisibility) {
        self.visibility = visibility;
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn drain_notices(&mut self) -> Vec<WidgetNotice> {
        std::mem::take(&mut self.notices)
    }

    pub fn show(&mut self) {
        self.play(WidgetAnimationKind::Show);
    }

    pub fn hide(&mut self) {
        self.play(WidgetAnimationKind::Hide);
    }

    fn play(&mut self, kind: WidgetAnimationKind) {
        let (animation, counterpart) = match kind {
            WidgetAnimationKind::Show => (&mut self.show_animation, &mut self.hide_animation),
            WidgetAnimationKind::Hide => (&mut self.hide_animation, &mut self.show_animation),
        };

        let Some(animation) = animation.as_mut() else {
            crate::log_warning(&format!("AnimatedWidget: {:?} animation is not set", kind));
            return;
        };

        let start_time = calculate_start_time(counterpart.as_ref());
        if let Some(counterpart) = counterpart.as_mut() {
            counterpart.stop();
        }

        animation.play_from(start_time);
        self.on_animation_started();
    }

    /// Тикнуть обе анимации
    pub fn tick(&mut self, delta: f32) {
        let show_finished = self
            .show_animation
            .as_mut()
            .is_some_and(|animation| animation.advance(delta));
        if show_finished {
            self.on_animation_finished(WidgetAnimationKind::Show);
        }

        let hide_finished = self
            .hide_animation
            .as_mut()
            .is_some_and(|animation| animation.advance(delta));
        if hide_finished {
            self.on_animation_finished(WidgetAnimationKind::Hide);
        }
    }

    fn on_animation_started(&mut self) {
        // Контент не должен пропасть из-за хвоста hide при быстром re-trigger
        self.visibility = WidgetVisibility::Visible;
    }

    fn on_animation_finished(&mut self, kind: WidgetAnimationKind) {
        match kind {
            WidgetAnimationKind::Show => {
                self.visibility = WidgetVisibility::Visible;
                self.notices.push(WidgetNotice::Shown);
            }
            WidgetAnimationKind::Hide => {
                self.visibility = WidgetVisibility::Hidden;
                self.notices.push(WidgetNotice::Hidden);
            }
        }
    }
}

/// Offset старта: current time противоположной анимации, если она играет
fn calculate_start_time(counterpart: Option<&WidgetAnimation>) -> f32 {
    counterpart
        .filter(|animation| animation.is_playing())
        .map_or(0.0, |animation| animation.current_time())
}
