use crate::display::SharedDisplay;
use crate::errors::DisplayError;
use crate::models::HealthResponse;
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    pub display: SharedDisplay,
    pub stats: PollerStats,
}

impl AppState {
    pub fn new(display: SharedDisplay, stats: PollerStats) -> Self {
        Self { display, stats }
    }
}

#[derive(Debug)]
struct Counters {
    started_at: DateTime<Local>,
    cycles_started: u64,
    renders: u64,
    failures: u64,
    last_render_at: Option<DateTime<Local>>,
}

/// Bookkeeping for `/api/health`. Never consulted by the poll cycle itself.
#[derive(Clone, Debug)]
pub struct PollerStats {
    inner: Arc<Mutex<Counters>>,
}

impl Default for PollerStats {
    fn default() -> Self {
        Self::new()
    }
}

impl PollerStats {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Counters {
                started_at: Local::now(),
                cycles_started: 0,
                renders: 0,
                failures: 0,
                last_render_at: None,
            })),
        }
    }

    pub fn cycle_started(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.cycles_started = counters.cycles_started.saturating_add(1);
        }
    }

    pub fn rendered(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.renders = counters.renders.saturating_add(1);
            counters.last_render_at = Some(Local::now());
        }
    }

    pub fn failed(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.failures = counters.failures.saturating_add(1);
        }
    }

    pub fn report(&self) -> Result<HealthResponse, DisplayError> {
        let counters = self
            .inner
            .lock()
            .map_err(|err| DisplayError::Unavailable(err.to_string()))?;
        Ok(HealthResponse {
            started_at: counters.started_at.to_rfc3339(),
            cycles_started: counters.cycles_started,
            renders: counters.renders,
            failures: counters.failures,
            last_render_at: counters.last_render_at.map(|at| at.to_rfc3339()),
        })
    }
}
