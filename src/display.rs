use crate::errors::DisplayError;
use crate::models::DisplaySnapshot;
use std::sync::{Arc, Mutex, MutexGuard};

/// Named targets a poll cycle writes into.
///
/// Setters take `&self` so one surface can be shared by cycles that
/// overlap in time.
pub trait DisplaySurface: Send + Sync {
    fn set_status(&self, text: &str, style_class: &str) -> Result<(), DisplayError>;
    fn set_distance(&self, value: &str) -> Result<(), DisplayError>;
    fn set_score(&self, value: &str) -> Result<(), DisplayError>;
    fn set_alerts(&self, value: &str) -> Result<(), DisplayError>;
    fn set_mission_bar_width(&self, width: &str) -> Result<(), DisplayError>;
    fn set_mission_text(&self, text: &str) -> Result<(), DisplayError>;
    fn set_timestamp(&self, text: &str) -> Result<(), DisplayError>;
}

/// In-memory display backing the web dashboard.
#[derive(Clone, Default)]
pub struct SharedDisplay {
    inner: Arc<Mutex<DisplaySnapshot>>,
}

impl SharedDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Result<DisplaySnapshot, DisplayError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, DisplaySnapshot>, DisplayError> {
        self.inner
            .lock()
            .map_err(|err| DisplayError::Unavailable(err.to_string()))
    }

    fn write(&self, apply: impl FnOnce(&mut DisplaySnapshot)) -> Result<(), DisplayError> {
        let mut snapshot = self.lock()?;
        apply(&mut snapshot);
        Ok(())
    }
}

impl DisplaySurface for SharedDisplay {
    fn set_status(&self, text: &str, style_class: &str) -> Result<(), DisplayError> {
        self.write(|s| {
            s.status_text = Some(text.to_string());
            s.status_class = Some(style_class.to_string());
        })
    }

    fn set_distance(&self, value: &str) -> Result<(), DisplayError> {
        self.write(|s| s.distance = Some(value.to_string()))
    }

    fn set_score(&self, value: &str) -> Result<(), DisplayError> {
        self.write(|s| s.score = Some(value.to_string()))
    }

    fn set_alerts(&self, value: &str) -> Result<(), DisplayError> {
        self.write(|s| s.alerts = Some(value.to_string()))
    }

    fn set_mission_bar_width(&self, width: &str) -> Result<(), DisplayError> {
        self.write(|s| s.mission_bar_width = Some(width.to_string()))
    }

    fn set_mission_text(&self, text: &str) -> Result<(), DisplayError> {
        self.write(|s| s.mission_text = Some(text.to_string()))
    }

    fn set_timestamp(&self, text: &str) -> Result<(), DisplayError> {
        self.write(|s| s.timestamp = Some(text.to_string()))
    }
}
