use crate::display::DisplaySurface;
use crate::errors::DisplayError;
use crate::models::{format_number, Field, PostureReading};

/// Daily score target for the mission bar.
pub const MISSION_GOAL: u32 = 60;

pub const GOOD_STATUS: (&str, &str) = ("Boa Postura", "status-good");
pub const BAD_STATUS: (&str, &str) = ("Má Postura", "status-bad");

const TIMESTAMP_PREFIX: &str = "Última atualização: ";
const TIMESTAMP_FALLBACK: &str = "agora";

pub fn status_display(reading: &PostureReading) -> (&'static str, &'static str) {
    if reading.is_good() {
        GOOD_STATUS
    } else {
        BAD_STATUS
    }
}

pub fn timestamp_text(created_at: &Field) -> String {
    if created_at.is_truthy() {
        format!("{TIMESTAMP_PREFIX}{}", created_at.display_text())
    } else {
        format!("{TIMESTAMP_PREFIX}{TIMESTAMP_FALLBACK}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionProgress {
    pub clamped: f64,
    pub percent: f64,
}

impl MissionProgress {
    /// `NaN` scores stay `NaN` all the way through.
    pub fn from_score(score: f64) -> Self {
        let goal = f64::from(MISSION_GOAL);
        let clamped = if score.is_nan() { f64::NAN } else { score.min(goal) };
        Self {
            clamped,
            percent: clamped / goal * 100.0,
        }
    }

    pub fn bar_width(&self) -> String {
        format!("{}%", format_number(self.percent))
    }

    pub fn text(&self) -> String {
        format!(
            "Progresso: {} / {MISSION_GOAL} pontos",
            format_number(self.clamped)
        )
    }
}

/// Writes one reading into every display target, in dashboard order.
///
/// Stops at the first target that fails; earlier writes are not undone.
pub fn render_reading<D>(reading: &PostureReading, display: &D) -> Result<(), DisplayError>
where
    D: DisplaySurface + ?Sized,
{
    let (text, class) = status_display(reading);
    display.set_status(text, class)?;

    display.set_distance(&reading.distance.display_text())?;
    display.set_score(&reading.score.display_text())?;
    display.set_alerts(&reading.alerts.display_text())?;

    display.set_timestamp(&timestamp_text(&reading.created_at))?;

    let progress = MissionProgress::from_score(reading.score.as_number());
    display.set_mission_bar_width(&progress.bar_width())?;
    display.set_mission_text(&progress.text())?;

    Ok(())
}
