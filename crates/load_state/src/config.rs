//! Shell configuration, read from a TOML file.
//!
//! Every section is optional; missing keys fall back to their defaults.
//!
//! ```toml
//! [page]
//! url = "https://example.com/game"
//!
//! [load]
//! unknown_error_message = "Unknown error"
//! event_buffer = 64
//!
//! [overlay]
//! loading_caption = "Loading {percent}%"
//! error_caption = "Error: {message}"
//! offline_caption = "No connection"
//! dimmed_opacity = 0.5
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, DEFAULT_EVENT_BUFFER, UNKNOWN_ERROR_MESSAGE};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub page: PageConfig,
    pub load: LoadConfig,
    pub overlay: OverlayConfig,
}

/// The page shown full-screen by the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub url: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            url: "about:blank".into(),
        }
    }
}

/// Settings of the load-state adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Substituted when the driver reports a failure with a blank message.
    pub unknown_error_message: String,
    /// Capacity of the ordered broadcast channel. Slower subscribers skip ahead.
    pub event_buffer: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            unknown_error_message: UNKNOWN_ERROR_MESSAGE.into(),
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

/// Texts and dimming used by the presentation layer.
///
/// `{percent}` and `{message}` are replaced in the captions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub loading_caption: String,
    pub error_caption: String,
    pub offline_caption: String,
    /// Opacity of the page underneath any overlay other than the content itself.
    pub dimmed_opacity: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            loading_caption: "Loading {percent}%".into(),
            error_caption: "Error: {message}".into(),
            offline_caption: "No connection".into(),
            dimmed_opacity: 0.5,
        }
    }
}

impl ShellConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ShellConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load.event_buffer == 0 {
            return Err(ConfigError::Invalid(
                "load.event_buffer must be greater than zero".into(),
            ));
        }
        if self.load.unknown_error_message.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "load.unknown_error_message must not be blank".into(),
            ));
        }
        let opacity = self.overlay.dimmed_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ConfigError::Invalid(format!(
                "overlay.dimmed_opacity {opacity} is outside [0.0, 1.0]"
            )));
        }
        Ok(())
    }
}
