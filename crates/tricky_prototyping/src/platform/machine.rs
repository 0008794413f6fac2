//! Floating platform FSM
//!
//! Idle → Moving → (Waiting → Moving)* → ... ; Stop() из любого состояния → Idle.
//!
//! Архитектура:
//! - FSM не тикает сама: timeline (`InterpolationDriver`) и wait timer
//!   (`WaitScheduler`) передаются в каждую операцию
//! - Уведомления копятся в outbox (`PlatformNotice`), системы публикуют
//!   их как Bevy events: FSM не знает подписчиков
//! - Индексы current/next: позиции в waypoint set, всегда валидны
//!   пока set не пустой

use bevy::prelude::*;
use crate::error::ConfigError;
use crate::platform::components::{
    InterpolationDriver, MovementMode, MovementTimeline, PlatformSettings, PlatformState,
    WaitScheduler, WaitTimer, CLAMPED_TRAVEL_TIME,
};
use crate::platform::waypoints::{EmptyWaypoints, TargetWaypoints, WaypointList, WaypointSource};

/// Уведомление FSM (outbox → Bevy events)
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformNotice {
    PointReached(usize),
    WaitStarted(usize),
    WaitFinished(usize),
    StateChanged(PlatformState),
    Misconfigured(ConfigError),
}

/// Floating platform: двигается между waypoint'ами по timeline
#[derive(Component)]
#[require(MovementTimeline, WaitTimer, Transform)]
pub struct FloatingPlatform {
    pub settings: PlatformSettings,
    source: Box<dyn WaypointSource>,
    state: PlatformState,
    points: Vec<usize>,
    current_point_index: usize,
    next_point_index: usize,
    is_reversed: bool,
    /// Эффективный travel time текущего сегмента
    travel_time: f32,
    constructed: bool,
    notices: Vec<PlatformNotice>,
}

impl Default for FloatingPlatform {
    fn default() -> Self {
        Self::new(PlatformSettings::default(), EmptyWaypoints)
    }
}

impl FloatingPlatform {
    pub fn new(settings: PlatformSettings, source: impl WaypointSource) -> Self {
        Self {
            travel_time: settings.travel_time,
            settings,
            source: Box::new(source),
            state: PlatformState::Idle,
            points: Vec::new(),
            current_point_index: 0,
            next_point_index: 0,
            is_reversed: false,
            constructed: false,
            notices: Vec::new(),
        }
    }

    /// Платформа по фиксированным world positions
    pub fn with_points(settings: PlatformSettings, points: Vec<Vec3>) -> Self {
        Self::new(settings, WaypointList::new(points))
    }

    /// Платформа между target entities
    pub fn with_targets(settings: PlatformSettings, targets: Vec<Option<Entity>>) -> Self {
        Self::new(settings, TargetWaypoints::new(targets))
    }

    // ---------------------------------------------------------------------
    // Getters
    // ---------------------------------------------------------------------

    pub fn state(&self) -> PlatformState {
        self.state
    }

    pub fn points(&self) -> &[usize] {
        &self.points
    }

    pub fn current_point_index(&self) -> usize {
        self.current_point_index
    }

    pub fn next_point_index(&self) -> usize {
        self.next_point_index
    }

    pub fn is_reversed(&self) -> bool {
        self.is_reversed
    }

    pub fn travel_time(&self) -> f32 {
        self.travel_time
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    pub fn source(&self) -> &dyn WaypointSource {
        self.source.as_ref()
    }

    pub fn source_mut(&mut self) -> &mut dyn WaypointSource {
        self.source.as_mut()
    }

    pub fn index_is_valid(&self, index: usize) -> bool {
        index < self.points.len()
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    /// Забрать накопленные уведомления
    pub fn drain_notices(&mut self) -> Vec<PlatformNotice> {
        std::mem::take(&mut self.notices)
    }

    // ---------------------------------------------------------------------
    // Construction / begin play
    // ---------------------------------------------------------------------

    /// Построить waypoint set и провалидировать настройки.
    ///
    /// Вызывается один раз при спавне (`construct_platforms`, `Added`):
    /// timeline и wait timer не трогает, на живой платформе не вызывать.
    pub fn construct(&mut self) {
        self.constructed = true;
        self.state = PlatformState::Idle;
        self.is_reversed = false;
        self.travel_time = self.settings.travel_time;

        if self.settings.wait_duration <= 0.0 {
            self.settings.stop_at_points = false;
        }

        let mut errors = Vec::new();

        // Фильтруем ДО fill: "only custom stops" путь строит set из них
        if self.settings.stops_at_custom_points_only()
            && !self.settings.custom_stop_indexes.is_empty()
        {
            let mut custom_stops = std::mem::take(&mut self.settings.custom_stop_indexes);
            self.source.remove_invalid_custom_indexes(&mut custom_stops, &mut errors);
            custom_stops.sort_unstable();
            custom_stops.dedup();
            self.settings.custom_stop_indexes = custom_stops;
        }

        self.points = self.source.fill_point_indexes(&self.settings, &mut errors);

        for error in errors {
            self.report(error);
        }

        if self.points.is_empty() {
            self.current_point_index = 0;
            self.next_point_index = 0;
            self.report(ConfigError::EmptyWaypoints);
            return;
        }

        if !self.index_is_valid(self.settings.start_point_index) {
            self.report(ConfigError::InvalidStartIndex {
                index: self.settings.start_point_index,
                count: self.points.len(),
            });
            self.settings.start_point_index = 0;
        }

        self.current_point_index = self.settings.start_point_index;
        self.next_point_index = self.settings.start_point_index;
    }

    /// Play rate + auto start (после construct)
    pub fn begin_play(
        &mut self,
        driver: &mut impl InterpolationDriver,
        wait: &mut impl WaitScheduler,
    ) {
        self.calculate_timeline_play_rate(driver);

        if self.settings.auto_start {
            self.start(driver, wait);
        }
    }

    // ---------------------------------------------------------------------
    // Public operations
    // ---------------------------------------------------------------------

    pub fn start(&mut self, driver: &mut impl InterpolationDriver, wait: &mut impl WaitScheduler) {
        if self.state == PlatformState::Moving {
            return;
        }

        if self.points.is_empty() {
            crate::log_warning("FloatingPlatform: start() ignored, waypoint set is empty");
            return;
        }

        if self.current_point_index == self.next_point_index {
            self.calculate_next_point_index();

            // Manual mode на границе: ехать некуда
            if self.current_point_index == self.next_point_index {
                crate::log(&format!(
                    "FloatingPlatform: no point to move to from {} ({:?})",
                    self.current_point_index, self.settings.movement_mode
                ));
                return;
            }
        }

        self.calculate_travel_time();
        self.calculate_timeline_play_rate(driver);

        if self.settings.stop_at_points && self.settings.wait_at_start {
            self.start_stop_wait_timer(wait);
            return;
        }

        // Start / MoveToPoint во время Waiting: старый таймер больше не нужен
        if wait.is_pending() {
            wait.cancel();
        }

        driver.play_from_start();
        self.set_state(PlatformState::Moving);
    }

    /// Остановить платформу.
    ///
    /// Pending wait timer отменяется, timeline перематывается в 0 -
    /// `resume()` потом поедет из текущей точки.
    pub fn stop(&mut self, driver: &mut impl InterpolationDriver, wait: &mut impl WaitScheduler) {
        if self.state == PlatformState::Idle {
            return;
        }

        if wait.is_pending() {
            wait.cancel();
            driver.rewind();
        }

        driver.stop();
        self.set_state(PlatformState::Idle);
    }

    pub fn resume(&mut self, driver: &mut impl InterpolationDriver) {
        if self.state != PlatformState::Idle || self.points.is_empty() {
            return;
        }

        driver.play();
        self.set_state(PlatformState::Moving);
    }

    pub fn move_to_point(
        &mut self,
        index: usize,
        driver: &mut impl InterpolationDriver,
        wait: &mut impl WaitScheduler,
    ) {
        if !self.index_is_valid(index) {
            return;
        }

        self.next_point_index = index;
        self.calculate_travel_time();
        self.start(driver, wait);
    }

    pub fn set_speed(&mut self, value: f32) {
        if value < 0.0 {
            return;
        }

        self.settings.speed = value;
        self.calculate_travel_time();
    }

    // ---------------------------------------------------------------------
    // Callbacks (timeline finished / wait timer fired)
    // ---------------------------------------------------------------------

    /// Timeline дошёл до конца сегмента
    pub fn continue_movement(
        &mut self,
        driver: &mut impl InterpolationDriver,
        wait: &mut impl WaitScheduler,
    ) {
        // Race guard: Stop() между tick и callback
        if self.state == PlatformState::Idle {
            return;
        }

        self.notices.push(PlatformNotice::PointReached(self.current_point_index));
        self.calculate_next_point_index();

        if self.current_point_index == self.next_point_index {
            // Manual mode: дальше ехать некуда
            driver.stop();
            self.set_state(PlatformState::Idle);
            return;
        }

        self.calculate_travel_time();
        self.calculate_timeline_play_rate(driver);

        let should_wait = self.settings.stop_at_points
            && (self.is_custom_stop(self.current_point_index)
                || !self.settings.stop_at_certain_points);

        if should_wait {
            self.start_stop_wait_timer(wait);
        } else {
            driver.play_from_start();
        }
    }

    pub fn start_stop_wait_timer(&mut self, wait: &mut impl WaitScheduler) {
        if wait.is_pending() {
            return;
        }

        self.notices.push(PlatformNotice::WaitStarted(self.current_point_index));
        self.set_state(PlatformState::Waiting);
        wait.schedule(self.settings.wait_duration);
    }

    /// Wait timer сработал
    pub fn finish_stop_timer(&mut self, driver: &mut impl InterpolationDriver) {
        // Таймер, переживший выход из Waiting, сегмент не перезапускает
        if self.state != PlatformState::Waiting {
            return;
        }

        self.notices.push(PlatformNotice::WaitFinished(self.current_point_index));
        self.set_state(PlatformState::Moving);
        driver.play_from_start();
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    /// current ← next, next ← current ± 1 с коррекцией на границе
    pub fn calculate_next_point_index(&mut self) {
        self.current_point_index = self.next_point_index;

        let Some(last) = self.points.len().checked_sub(1) else {
            return;
        };

        if let Some(next) = self.step_from(self.current_point_index) {
            self.next_point_index = next;
            return;
        }

        let corrected = match self.settings.movement_mode {
            MovementMode::Loop => Some(if self.is_reversed { last } else { 0 }),
            MovementMode::PingPong => {
                self.is_reversed = !self.is_reversed;
                self.step_from(self.current_point_index)
            }
            MovementMode::Manual => None,
        };

        self.next_point_index = corrected.unwrap_or(self.current_point_index);
    }

    fn step_from(&self, index: usize) -> Option<usize> {
        let candidate = if self.is_reversed {
            index.checked_sub(1)?
        } else {
            index + 1
        };

        self.index_is_valid(candidate).then_some(candidate)
    }

    fn is_custom_stop(&self, index: usize) -> bool {
        self.points
            .get(index)
            .is_some_and(|waypoint| self.settings.custom_stop_indexes.contains(waypoint))
    }

    pub fn calculate_travel_time(&mut self) {
        let (Some(&from), Some(&to)) = (
            self.points.get(self.current_point_index),
            self.points.get(self.next_point_index),
        ) else {
            return;
        };

        self.travel_time = self.source.calculate_travel_time(from, to, &self.settings);
    }

    pub fn calculate_timeline_play_rate(&mut self, driver: &mut impl InterpolationDriver) {
        if self.travel_time <= 0.0 {
            self.report(ConfigError::NonPositiveTravelTime { value: self.travel_time });
            self.travel_time = CLAMPED_TRAVEL_TIME;

            // Clamp'им и настройку, чтобы не репортить каждый сегмент
            if self.settings.travel_time <= 0.0 {
                self.settings.travel_time = CLAMPED_TRAVEL_TIME;
            }
        }

        driver.set_play_rate(1.0 / self.travel_time);
    }

    fn set_state(&mut self, new_state: PlatformState) {
        if self.state == new_state {
            return;
        }

        self.state = new_state;
        self.notices.push(PlatformNotice::StateChanged(new_state));
    }

    fn report(&mut self, error: ConfigError) {
        self.notices.push(PlatformNotice::Misconfigured(error));
    }

    /// Позиция платформы для progress текущего сегмента
    pub fn platform_position(&self, progress: f32) -> Option<Vec3> {
        let from = *self.points.get(self.current_point_index)?;
        let to = *self.points.get(self.next_point_index)?;
        let alpha = self.settings.movement_curve.sample(progress);

        self.source.move_platform(from, to, alpha)
    }
}
