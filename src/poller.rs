use crate::display::DisplaySurface;
use crate::errors::CycleError;
use crate::render::render_reading;
use crate::source::{latest_reading, PostureSource};
use crate::state::PollerStats;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered,
    Empty,
    Failed,
}

/// One fetch → parse → pick-last → render pass.
///
/// Never returns an error: failures are logged and reported as
/// [`CycleOutcome::Failed`].
pub async fn run_cycle<S, D>(source: &S, display: &D) -> CycleOutcome
where
    S: PostureSource,
    D: DisplaySurface + ?Sized,
{
    match try_cycle(source, display).await {
        Ok(true) => CycleOutcome::Rendered,
        Ok(false) => CycleOutcome::Empty,
        Err(err) => {
            error!("Erro ao buscar dados: {err}");
            CycleOutcome::Failed
        }
    }
}

async fn try_cycle<S, D>(source: &S, display: &D) -> Result<bool, CycleError>
where
    S: PostureSource,
    D: DisplaySurface + ?Sized,
{
    let payload = source.fetch().await?;
    let Some(reading) = latest_reading(payload)? else {
        return Ok(false);
    };
    render_reading(&reading, display)?;
    Ok(true)
}

/// Recurring timer driving the poll cycles.
///
/// Every tick spawns its own cycle task; a slow cycle does not hold back
/// the next one, and whichever finishes last owns the display.
pub struct Poller<S, D> {
    source: Arc<S>,
    display: Arc<D>,
    period: Duration,
    stats: PollerStats,
}

impl<S, D> Poller<S, D>
where
    S: PostureSource + 'static,
    D: DisplaySurface + 'static,
{
    /// A zero `period` falls back to [`DEFAULT_POLL_INTERVAL`].
    pub fn new(source: S, display: D, period: Duration, stats: PollerStats) -> Self {
        let period = if period.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            period
        };
        Self {
            source: Arc::new(source),
            display: Arc::new(display),
            period,
            stats,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts the timer. The first cycle fires immediately.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        info!("polling every {}ms", self.period.as_millis());
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.stats.cycle_started();

            let source = Arc::clone(&self.source);
            let display = Arc::clone(&self.display);
            let stats = self.stats.clone();
            tokio::spawn(async move {
                match run_cycle(source.as_ref(), display.as_ref()).await {
                    CycleOutcome::Rendered => stats.rendered(),
                    CycleOutcome::Empty => {}
                    CycleOutcome::Failed => stats.failed(),
                }
            });
        }
    }
}
