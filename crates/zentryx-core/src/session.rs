//! Dashboard session.
//!
//! Composes one of each engine with the task list and the coach. Each engine
//! owns its own state; the session only routes ticks and commands and pulls
//! derived values (report, plan) on demand.

use chrono::{DateTime, Utc};

use crate::clock::ClockSource;
use crate::coach::{Coach, PendingReply};
use crate::config::Config;
use crate::events::Event;
use crate::schedule::{DayPlan, ScheduleSynthesizer};
use crate::stats::{ProductivityAnalyzer, ProductivityReport};
use crate::task::{Task, TaskList};
use crate::timer::{CountdownEngine, CycleConfig, FocusCycleEngine, StopwatchEngine};

#[derive(Debug, Clone)]
pub struct Session {
    focus: FocusCycleEngine,
    stopwatch: StopwatchEngine,
    countdown: CountdownEngine,
    tasks: TaskList,
    coach: Coach,
    analyzer: ProductivityAnalyzer,
    synthesizer: ScheduleSynthesizer,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            focus: FocusCycleEngine::new(config.cycle()),
            stopwatch: StopwatchEngine::with_resolution(config.ticks.stopwatch_ms),
            countdown: CountdownEngine::new(),
            tasks: TaskList::new(),
            coach: Coach::new(std::time::Duration::from_millis(config.coach.reply_delay_ms)),
            analyzer: ProductivityAnalyzer::new(),
            synthesizer: ScheduleSynthesizer::new(),
        }
    }

    // ── Engines ──────────────────────────────────────────────────────

    pub fn focus(&self) -> &FocusCycleEngine {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusCycleEngine {
        &mut self.focus
    }

    pub fn stopwatch(&self) -> &StopwatchEngine {
        &self.stopwatch
    }

    pub fn stopwatch_mut(&mut self) -> &mut StopwatchEngine {
        &mut self.stopwatch
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    pub fn countdown_mut(&mut self) -> &mut CountdownEngine {
        &mut self.countdown
    }

    pub fn coach(&self) -> &Coach {
        &self.coach
    }

    pub fn coach_mut(&mut self) -> &mut Coach {
        &mut self.coach
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Advance the one-second engines (focus cycle and countdown) by one
    /// tick. Events come back in that order.
    pub fn tick_second(&mut self, clock: &dyn ClockSource) -> Vec<Event> {
        self.focus
            .tick(clock)
            .into_iter()
            .chain(self.countdown.tick())
            .collect()
    }

    /// Advance the stopwatch by one resolution step.
    pub fn tick_stopwatch(&mut self) {
        self.stopwatch.tick();
    }

    /// Apply an edited cycle configuration.
    pub fn set_cycle_config(&mut self, config: CycleConfig) {
        self.focus.set_config(config);
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Add a task. Blank titles are silently ignored.
    pub fn add_task(
        &mut self,
        title: &str,
        minutes: u32,
        priority: u8,
        due: Option<DateTime<Utc>>,
    ) -> Option<Event> {
        let task = self.tasks.add(title, minutes, priority, due)?;
        Some(Event::TaskAdded {
            id: task.id.clone(),
            title: task.title.clone(),
        })
    }

    pub fn toggle_task(&mut self, id: &str) -> Option<Event> {
        self.tasks.toggle_event(id)
    }

    pub fn prioritized_tasks(&self) -> Vec<&Task> {
        self.tasks.prioritized()
    }

    // ── Derived views ────────────────────────────────────────────────

    pub fn report(&self) -> ProductivityReport {
        self.analyzer.analyze(
            self.tasks.as_slice(),
            self.focus.completed_focus_blocks(),
            self.focus.config().focus_minutes,
            self.focus.histogram(),
        )
    }

    pub fn day_plan(&self) -> DayPlan {
        self.synthesizer
            .synthesize(self.focus.histogram().best_hour(), self.tasks.as_slice())
    }

    // ── Coach ────────────────────────────────────────────────────────

    pub fn send_message(&mut self, text: &str) -> Option<PendingReply> {
        self.coach.send(text)
    }
}
