use crate::{config::OverlayConfig, state::LoadState};

/// The single layer the presentation shows on top of the page.
///
/// Derived from the published [`LoadState`] only; renderers must not track
/// anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Idle: nothing beyond the (dimmed) page.
    None,
    /// Percent-driven progress overlay.
    Progress { percent: u8 },
    /// Loaded: the page itself at full opacity.
    Content,
    Error { message: String },
    Offline,
}

impl Overlay {
    pub fn for_state(state: &LoadState) -> Self {
        match state {
            LoadState::Idle => Overlay::None,
            LoadState::Progressing { percent } => Overlay::Progress {
                percent: percent.whole(),
            },
            LoadState::Success => Overlay::Content,
            LoadState::Error { message } => Overlay::Error {
                message: message.clone(),
            },
            LoadState::Offline => Overlay::Offline,
        }
    }

    pub fn content_opacity(&self, config: &OverlayConfig) -> f32 {
        match self {
            Overlay::Content => 1.0,
            _ => config.dimmed_opacity,
        }
    }

    /// Text shown by the overlay, if it has any.
    pub fn caption(&self, config: &OverlayConfig) -> Option<String> {
        match self {
            Overlay::None | Overlay::Content => None,
            Overlay::Progress { percent } => Some(
                config
                    .loading_caption
                    .replace("{percent}", &percent.to_string()),
            ),
            Overlay::Error { message } => {
                Some(config.error_caption.replace("{message}", message))
            }
            Overlay::Offline => Some(config.offline_caption.clone()),
        }
    }
}

impl From<&LoadState> for Overlay {
    fn from(state: &LoadState) -> Self {
        Overlay::for_state(state)
    }
}
