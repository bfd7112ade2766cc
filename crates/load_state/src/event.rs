use serde::{Deserialize, Serialize};

/// Lifecycle events from the page driver and the connectivity monitor.
///
/// Both collaborators are external; they may deliver events belonging to a
/// superseded load attempt, so nothing here is assumed to arrive in a
/// sensible order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LoadEvent {
    ConnectivityLost,
    ConnectivityRestored,
    LoadStarted,
    LoadProgressed { fraction: f64 },
    LoadFinished,
    LoadFailed { message: String },
}

impl LoadEvent {
    pub fn progressed(fraction: f64) -> Self {
        LoadEvent::LoadProgressed { fraction }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        LoadEvent::LoadFailed {
            message: message.into(),
        }
    }

    /// Stable label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            LoadEvent::ConnectivityLost => "connectivity_lost",
            LoadEvent::ConnectivityRestored => "connectivity_restored",
            LoadEvent::LoadStarted => "load_started",
            LoadEvent::LoadProgressed { .. } => "load_progressed",
            LoadEvent::LoadFinished => "load_finished",
            LoadEvent::LoadFailed { .. } => "load_failed",
        }
    }

    /// True for events coming from the connectivity monitor.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            LoadEvent::ConnectivityLost | LoadEvent::ConnectivityRestored
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_script_lines() {
        let event: LoadEvent =
            serde_json::from_str(r#"{"event":"load_progressed","fraction":0.3}"#).unwrap();
        assert_eq!(event, LoadEvent::progressed(0.3));

        let event: LoadEvent =
            serde_json::from_str(r#"{"event":"load_failed","message":"timeout"}"#).unwrap();
        assert_eq!(event, LoadEvent::failed("timeout"));

        let event: LoadEvent = serde_json::from_str(r#"{"event":"connectivity_lost"}"#).unwrap();
        assert!(event.is_connectivity());
        assert_eq!(event.name(), "connectivity_lost");
    }

    #[test]
    fn rejects_unknown_events() {
        assert!(serde_json::from_str::<LoadEvent>(r#"{"event":"redirected"}"#).is_err());
    }
}
