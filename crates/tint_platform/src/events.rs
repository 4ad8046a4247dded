//! User-event logging

use std::sync::Mutex;

/// Fire-and-forget sink for theme events
pub trait ThemeEventLogger: Send + Sync {
    /// A theme was applied; `is_custom` marks user-authored compositions
    fn log_theme_applied(&self, title: &str, is_custom: bool);
}

/// Logs theme events through `tracing`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl ThemeEventLogger for TracingLogger {
    fn log_theme_applied(&self, title: &str, is_custom: bool) {
        tracing::info!(theme = title, custom = is_custom, "theme applied");
    }
}

/// A recorded "theme applied" event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeAppliedEvent {
    pub title: String,
    pub is_custom: bool,
}

/// Keeps events in memory for inspection
#[derive(Debug, Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<ThemeAppliedEvent>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ThemeAppliedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ThemeEventLogger for RecordingLogger {
    fn log_theme_applied(&self, title: &str, is_custom: bool) {
        self.events.lock().unwrap().push(ThemeAppliedEvent {
            title: title.to_string(),
            is_custom,
        });
    }
}
