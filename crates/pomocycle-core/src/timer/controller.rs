//! Glue between the session engine, a tick source and a view.
//!
//! Every command and every tick goes through [`PomodoroTimer`], which applies
//! it to the engine, keeps the tick source in step with `running`, and then
//! renders. All of it happens on one logical thread.

use tracing::{debug, info};

use super::driver::{IntervalTicker, Tick, TickSource};
use super::engine::{SessionEngine, TickOutcome};
use super::schedule::DurationPreset;
use crate::events::Event;
use crate::view::{self, View};

/// User commands accepted by the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectPreset(DurationPreset),
    Start,
    Pause,
    Reset,
}

pub struct PomodoroTimer<V, T> {
    engine: SessionEngine,
    view: V,
    ticker: T,
}

impl<V: View, T: TickSource> PomodoroTimer<V, T> {
    /// Wrap `engine` and draw the initial view.
    pub fn new(engine: SessionEngine, view: V, ticker: T) -> Self {
        let mut timer = Self {
            engine,
            view,
            ticker,
        };
        timer.render_all();
        timer.view.set_page_title(view::NEUTRAL_TITLE);
        timer
    }

    pub fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn dispatch(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::SelectPreset(preset) => self.select_preset(preset),
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Reset => Some(self.reset()),
        }
    }

    pub fn select_preset(&mut self, preset: DurationPreset) -> Option<Event> {
        let Some(event) = self.engine.select_preset(preset) else {
            debug!(%preset, "preset change ignored while running");
            return None;
        };
        debug!(%preset, "preset selected");
        self.render_all();
        Some(event)
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.engine.is_running() || self.ticker.is_active() {
            debug!("start ignored, already ticking");
            return None;
        }
        let event = self.engine.start()?;
        self.ticker.start_ticking();
        debug!(
            mode = %self.engine.mode(),
            remaining_secs = self.engine.remaining_secs(),
            "timer started"
        );
        self.render_buttons();
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.engine.pause()?;
        self.ticker.stop_ticking();
        debug!(remaining_secs = self.engine.remaining_secs(), "timer paused");
        self.render_buttons();
        Some(event)
    }

    pub fn reset(&mut self) -> Event {
        self.ticker.stop_ticking();
        let event = self.engine.reset();
        debug!(preset = %self.engine.preset(), "timer reset");
        self.render_all();
        self.view.set_page_title(view::NEUTRAL_TITLE);
        event
    }

    /// Handle one tick from the active tick source.
    ///
    /// Returns the `PeriodElapsed` event when this tick finished a period.
    pub fn on_tick(&mut self) -> Option<Event> {
        match self.engine.tick() {
            TickOutcome::Idle => {
                // A source left running without a running engine must not keep going.
                self.ticker.stop_ticking();
                None
            }
            TickOutcome::Counting { remaining_secs } => {
                self.view.render_time(remaining_secs);
                None
            }
            TickOutcome::Elapsed => {
                self.view.render_time(0);
                self.ticker.stop_ticking();
                Some(self.finish_period())
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn finish_period(&mut self) -> Event {
        let event = self.engine.on_period_elapsed();
        let from = self.engine.previous_mode();
        let to = self.engine.mode();
        let cycle_index = self.engine.cycle_index();
        let total_cycles = self.engine.total_cycles();

        info!(%from, %to, cycle_index, "period elapsed");

        self.render_progress();
        self.view.render_mode(to, self.engine.preset());
        self.view.render_time(self.engine.remaining_secs());
        self.view
            .notify(&view::transition_message(from, to, cycle_index, total_cycles));
        self.view.set_page_title(view::page_title(to));

        if self.engine.is_running() {
            self.ticker.start_ticking();
        }
        self.render_buttons();
        event
    }

    fn render_all(&mut self) {
        self.render_progress();
        self.view
            .render_mode(self.engine.mode(), self.engine.preset());
        self.view.render_time(self.engine.remaining_secs());
        self.render_buttons();
    }

    fn render_progress(&mut self) {
        self.view
            .render_progress(self.engine.cycle_index(), self.engine.total_cycles());
    }

    fn render_buttons(&mut self) {
        self.view
            .render_buttons(self.engine.is_running(), self.engine.is_resumable());
    }
}

impl<V: View> PomodoroTimer<V, IntervalTicker> {
    /// Handle a tick received from the ticker's channel.
    ///
    /// Ticks sent by an earlier start (queued before a pause, reset or period
    /// change) are dropped without touching the engine.
    pub fn handle_tick(&mut self, tick: Tick) -> Option<Event> {
        if !self.ticker.accepts(&tick) {
            debug!(
                stale = tick.generation,
                current = self.ticker.generation(),
                "dropped stale tick"
            );
            return None;
        }
        self.on_tick()
    }
}
