//! # Zentryx Core Library
//!
//! Core logic of the Zentryx productivity dashboard: three timing tools, a
//! prioritized task list, derived analytics and a scripted coach. The
//! `zentryx` CLI is a thin host over this crate.
//!
//! ## Architecture
//!
//! - **Timers**: tick-driven state machines. The host calls `tick()` at a
//!   fixed resolution; no engine owns a thread or reads the system time.
//! - **Tasks**: insertion-ordered list plus a pure prioritized ordering.
//! - **Stats**: per-hour focus histogram and the productivity analyzer.
//! - **Schedule**: day plan built from fixed anchors, the best focus hour
//!   and the prioritized tasks.
//! - **Config**: TOML configuration file.
//!
//! ## Key Components
//!
//! - [`FocusCycleEngine`]: focus/break cycling with block counting
//! - [`CountdownEngine`] and [`StopwatchEngine`]: standalone timing tools
//! - [`ProductivityAnalyzer`]: completion rate, best hour, assessment
//! - [`ScheduleSynthesizer`]: proposed day plan
//! - [`Session`]: owns one of everything

pub mod clock;
pub mod coach;
pub mod config;
pub mod error;
pub mod events;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod task;
pub mod timer;

pub use clock::{ClockSource, FixedClock, SystemClock};
pub use coach::{coach_reply, ChatMessage, Coach, PendingReply, Speaker};
pub use config::Config;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use schedule::{BlockKind, ClockTime, DayPlan, ScheduleSynthesizer, TimeBlock};
pub use session::Session;
pub use stats::{Assessment, FocusHistogram, ProductivityAnalyzer, ProductivityReport};
pub use task::{prioritize, Task, TaskList};
pub use timer::{
    format_mmss, format_stopwatch, CountdownEngine, CycleConfig, FocusCycleEngine, FocusMode,
    StopwatchEngine,
};
