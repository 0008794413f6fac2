//! Interpolation driver (timeline) + wait timer.
//!
//! Оба: "внешние" коллабораторы FSM: платформа ими только управляет
//! через `InterpolationDriver` / `WaitScheduler`, а тикают их системы.

use bevy::prelude::*;
use std::time::Duration;

/// Контракт timeline для platform FSM
pub trait InterpolationDriver {
    fn set_play_rate(&mut self, rate: f32);
    /// Progress = 0 и play
    fn play_from_start(&mut self);
    /// Play с текущего progress
    fn play(&mut self);
    fn stop(&mut self);
    /// Progress = 0 без запуска
    fn rewind(&mut self);
    fn progress(&self) -> f32;
    fn is_playing(&self) -> bool;
}

/// Контракт one-shot таймера ("подождать в точке")
pub trait WaitScheduler {
    fn schedule(&mut self, delay: f32);
    fn is_pending(&self) -> bool;
    fn cancel(&mut self);
}

/// Timeline: normalized progress 0..1 со скоростью `play_rate` (1/sec)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementTimeline {
    progress: f32,
    play_rate: f32,
    playing: bool,
}

impl Default for MovementTimeline {
    fn default() -> Self {
        Self {
            progress: 0.0,
            play_rate: 1.0,
            playing: false,
        }
    }
}

impl MovementTimeline {
    pub fn play_rate(&self) -> f32 {
        self.play_rate
    }

    /// Продвинуть progress на `delta` секунд.
    ///
    /// Возвращает `true` в тот tick, когда progress дошёл до 1
    /// (timeline при этом останавливается).
    pub fn advance(&mut self, delta: f32) -> bool {
        if !self.playing {
            return false;
        }

        self.progress = (self.progress + delta * self.play_rate).min(1.0);

        if self.progress >= 1.0 {
            self.playing = false;
            return true;
        }

        false
    }
}

impl InterpolationDriver for MovementTimeline {
    fn set_play_rate(&mut self, rate: f32) {
        self.play_rate = rate.max(0.0);
    }

    fn play_from_start(&mut self) {
        self.progress = 0.0;
        self.playing = true;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn rewind(&mut self) {
        self.progress = 0.0;
    }

    fn progress(&self) -> f32 {
        self.progress
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Pending "wait at point" task (None = таймер не активен)
#[derive(Component, Debug, Clone, Default)]
pub struct WaitTimer {
    timer: Option<Timer>,
}

impl WaitTimer {
    /// Тикнуть таймер. `true`: таймер сработал (и больше не pending).
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };

        timer.tick(delta);

        if timer.finished() {
            self.timer = None;
            return true;
        }

        false
    }

    /// Сколько осталось ждать (секунды)
    pub fn remaining_secs(&self) -> Option<f32> {
        self.timer.as_ref().map(|timer| timer.remaining_secs())
    }
}

impl WaitScheduler for WaitTimer {
    fn schedule(&mut self, delay: f32) {
        self.timer = Some(Timer::from_seconds(delay.max(0.0), TimerMode::Once));
    }

    fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    fn cancel(&mut self) {
        self.timer = None;
    }
}
