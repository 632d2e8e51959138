//! Stopwatch timer with named accumulation
//!
//! A [`Timer`] measures one interval at a time. Named timers add every
//! measured interval to a [`TimerRegistry`] shared by all timers using that
//! name. The registry is an explicit handle owned by the caller.
//!
//! # Example
//!
//! ```no_run
//! use yaml2mongo::core::timer::{Reporter, Timer, TimerRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TimerRegistry::new();
//! let mut timer = Timer::named("load", &registry).with_reporter(Reporter::Log);
//!
//! {
//!     let _scope = timer.scope()?;
//!     // ... work ...
//! } // stopped and reported here, even on early return
//!
//! println!("{:?}", registry.total("load"));
//! # Ok(())
//! # }
//! ```

use crate::domain::errors::TimerError;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Default report template
pub const DEFAULT_TEXT: &str = "Elapsed time: {elapsed} seconds";

/// Accumulated durations of named timers
///
/// Cloning yields another handle to the same table. Totals are never reset
/// implicitly.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    totals: Arc<Mutex<HashMap<String, Duration>>>,
}

impl TimerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name with a zero total if it is not known yet
    pub fn register(&self, name: &str) {
        self.lock().entry(name.to_string()).or_default();
    }

    /// Add an interval to a named total and return the new total
    pub fn record(&self, name: &str, elapsed: Duration) -> Duration {
        let mut totals = self.lock();
        let total = totals.entry(name.to_string()).or_default();
        *total += elapsed;
        *total
    }

    /// Accumulated duration of a name, `None` if never registered
    pub fn total(&self, name: &str) -> Option<Duration> {
        self.lock().get(name).copied()
    }

    /// All totals, ordered by name
    pub fn snapshot(&self) -> BTreeMap<String, Duration> {
        self.lock()
            .iter()
            .map(|(name, total)| (name.clone(), *total))
            .collect()
    }

    /// Forget every total
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Duration>> {
        self.totals.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Destination of a timer's report line
#[derive(Clone, Default)]
pub enum Reporter {
    /// Do not report
    Silent,
    /// Print to standard output
    #[default]
    Stdout,
    /// Emit an info-level log record
    Log,
    /// Hand the rendered line to a callback
    Custom(Arc<dyn Fn(&str) + Send + Sync>),
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reporter::Silent => write!(f, "Silent"),
            Reporter::Stdout => write!(f, "Stdout"),
            Reporter::Log => write!(f, "Log"),
            Reporter::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Stopwatch measuring one interval at a time
#[derive(Debug)]
pub struct Timer {
    name: Option<String>,
    text: String,
    reporter: Reporter,
    registry: Option<TimerRegistry>,
    start_time: Option<Instant>,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create an anonymous timer reporting to standard output
    pub fn new() -> Self {
        Self {
            name: None,
            text: DEFAULT_TEXT.to_string(),
            reporter: Reporter::default(),
            registry: None,
            start_time: None,
        }
    }

    /// Create a timer accumulating into `registry` under `name`
    pub fn named(name: impl Into<String>, registry: &TimerRegistry) -> Self {
        let name = name.into();
        registry.register(&name);
        Self {
            name: Some(name),
            text: DEFAULT_TEXT.to_string(),
            reporter: Reporter::default(),
            registry: Some(registry.clone()),
            start_time: None,
        }
    }

    /// Set the report template; `{elapsed}` is replaced with the seconds
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set where the report line goes
    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Timer name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True between `start` and `stop`
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Start a new interval
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::AlreadyRunning`] if the timer is running.
    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.start_time.is_some() {
            return Err(TimerError::AlreadyRunning);
        }
        self.start_time = Some(Instant::now());
        Ok(())
    }

    /// Time since `start`, without stopping
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::NotRunning`] if the timer was not started.
    pub fn elapsed(&self) -> Result<Duration, TimerError> {
        self.start_time
            .map(|start| start.elapsed())
            .ok_or(TimerError::NotRunning)
    }

    /// Stop the interval, report it and add it to the named total
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::NotRunning`] if the timer was not started.
    pub fn stop(&mut self) -> Result<Duration, TimerError> {
        let elapsed = self.elapsed()?;
        self.start_time = None;
        self.report(elapsed);
        self.accumulate(elapsed);
        Ok(elapsed)
    }

    /// Start the timer and return a guard that stops it when dropped
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::AlreadyRunning`] if the timer is running.
    pub fn scope(&mut self) -> Result<TimerScope<'_>, TimerError> {
        self.start()?;
        Ok(TimerScope { timer: self })
    }

    /// Measure a future, returning its output and the elapsed time
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::AlreadyRunning`] if the timer is running.
    pub async fn time_async<F>(&mut self, future: F) -> Result<(F::Output, Duration), TimerError>
    where
        F: Future,
    {
        let scope = self.scope()?;
        let output = future.await;
        let elapsed = scope.finish()?;
        Ok((output, elapsed))
    }

    /// Render the report line for an interval
    pub fn render(&self, elapsed: Duration) -> String {
        self.text
            .replace("{elapsed}", &format!("{:.4}", elapsed.as_secs_f64()))
    }

    fn report(&self, elapsed: Duration) {
        match &self.reporter {
            Reporter::Silent => {}
            Reporter::Stdout => println!("{}", self.render(elapsed)),
            Reporter::Log => tracing::info!(
                timer = self.name.as_deref().unwrap_or_default(),
                elapsed_ms = elapsed.as_millis() as u64,
                "{}",
                self.render(elapsed)
            ),
            Reporter::Custom(callback) => callback(&self.render(elapsed)),
        }
    }

    fn accumulate(&self, elapsed: Duration) {
        if let (Some(name), Some(registry)) = (&self.name, &self.registry) {
            registry.record(name, elapsed);
        }
    }
}

impl Drop for Timer {
    /// Settle a still-running interval into the named total without reporting
    fn drop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.accumulate(start.elapsed());
        }
    }
}

/// Guard returned by [`Timer::scope`]; stops the timer when dropped
#[derive(Debug)]
pub struct TimerScope<'a> {
    timer: &'a mut Timer,
}

impl TimerScope<'_> {
    /// Time since the scope was entered
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed().unwrap_or_default()
    }

    /// Stop the timer now and return the interval
    pub fn finish(self) -> Result<Duration, TimerError> {
        self.timer.stop()
    }
}

impl Drop for TimerScope<'_> {
    fn drop(&mut self) {
        if self.timer.is_running() {
            let _ = self.timer.stop();
        }
    }
}
