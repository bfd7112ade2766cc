use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::{error::InvalidPercent, UNKNOWN_ERROR_MESSAGE};

/// Fraction of a page load that has completed.
///
/// Always finite and within `[0.0, 1.0]`, which is what makes total equality
/// (and therefore `Eq`/`Hash` on [`LoadState`]) sound.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percent(f64);

impl Percent {
    pub const ZERO: Percent = Percent(0.0);
    pub const FULL: Percent = Percent(1.0);

    /// Clamps any input into range. NaN becomes zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        // `+ 0.0` folds -0.0 into 0.0 so bitwise hashing agrees with `==`.
        Self(value.clamp(0.0, 1.0) + 0.0)
    }

    /// Strict constructor; `None` for anything outside `[0.0, 1.0]`.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && (0.0..=1.0).contains(&value)).then(|| Self(value + 0.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Whole percentage, truncated (0.999 shows as 99, not 100).
    pub fn whole(self) -> u8 {
        (self.0 * 100.0) as u8
    }
}

impl PartialEq for Percent {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Percent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Percent {
    type Error = InvalidPercent;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidPercent(value))
    }
}

impl From<Percent> for f64 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.whole())
    }
}

/// Discriminant of a [`LoadState`], without the carried data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LoadStateKind {
    Idle,
    Progressing,
    Success,
    Error,
    Offline,
}

impl LoadStateKind {
    /// Human-readable name for status lines.
    pub fn description(self) -> &'static str {
        match self {
            LoadStateKind::Idle => "Waiting",
            LoadStateKind::Progressing => "Loading",
            LoadStateKind::Success => "Success",
            LoadStateKind::Error => "Error",
            LoadStateKind::Offline => "No connection",
        }
    }
}

/// Where a single page load stands.
///
/// Values are immutable snapshots: every transition produces a new one.
/// Equality is per variant. Two progressing states are equal only when their
/// percentages match exactly, two error states only when their messages are
/// byte-equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadState {
    /// No load attempted yet.
    #[default]
    Idle,
    /// Load in flight.
    Progressing { percent: Percent },
    /// Load completed and content is rendered.
    Success,
    /// Load failed with a human-readable cause.
    Error { message: String },
    /// No network connectivity.
    Offline,
}

impl LoadState {
    pub fn idle() -> Self {
        LoadState::Idle
    }

    /// Out-of-range input is clamped into `[0.0, 1.0]`.
    pub fn progressing(percent: f64) -> Self {
        LoadState::Progressing {
            percent: Percent::clamped(percent),
        }
    }

    pub fn success() -> Self {
        LoadState::Success
    }

    pub fn error(message: impl Into<String>) -> Self {
        LoadState::Error {
            message: message.into(),
        }
    }

    pub fn offline() -> Self {
        LoadState::Offline
    }

    pub fn kind(&self) -> LoadStateKind {
        match self {
            LoadState::Idle => LoadStateKind::Idle,
            LoadState::Progressing { .. } => LoadStateKind::Progressing,
            LoadState::Success => LoadStateKind::Success,
            LoadState::Error { .. } => LoadStateKind::Error,
            LoadState::Offline => LoadStateKind::Offline,
        }
    }

    /// Completion fraction, only defined while progressing.
    pub fn percent(&self) -> Option<f64> {
        match self {
            LoadState::Progressing { percent } => Some(percent.get()),
            _ => None,
        }
    }

    /// Failure cause, only defined in the error state.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Progressing { .. })
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, LoadState::Success)
    }

    pub fn has_error(&self) -> bool {
        matches!(self, LoadState::Error { .. })
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, LoadState::Offline)
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Idle => f.write_str("State: Idle"),
            LoadState::Progressing { percent } => write!(f, "State: Loading ({percent})"),
            LoadState::Success => f.write_str("State: Success"),
            LoadState::Error { message } if message.trim().is_empty() => {
                write!(f, "State: Error ({UNKNOWN_ERROR_MESSAGE})")
            }
            LoadState::Error { message } => write!(f, "State: Error ({message})"),
            LoadState::Offline => f.write_str("State: Offline"),
        }
    }
}
