//! Load-state core for the embedded page shell.
//!
//! A page load moves through a small closed set of states (idle, progressing,
//! success, error, offline). The external page driver and the connectivity
//! monitor emit [`LoadEvent`]s, the [`LoadStateMachine`] turns them into
//! [`LoadState`] transitions and the [`LoadStateAdapter`] publishes every new
//! state to the presentation layer, which picks exactly one [`Overlay`].

/// Async single-writer worker that serializes events and publishes states
pub mod adapter;
/// Bevy ECS integration (resource + events)
#[cfg(feature = "bevy")]
pub mod bevy;
/// TOML-backed shell configuration
pub mod config;
/// Shared error types
pub mod error;
/// Events emitted by the page driver and the connectivity monitor
pub mod event;
/// Pure transition logic
pub mod machine;
/// Mapping from a load state to the overlay the presentation layer shows
pub mod overlay;
/// The load-state value type
pub mod state;

/// Default capacity of the broadcast channel used for ordered state delivery.
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Message used whenever the driver reports a failure without a usable cause.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

pub use adapter::{EventSink, LoadStateAdapter, LoadStateSubscription};
pub use config::{LoadConfig, OverlayConfig, PageConfig, ShellConfig};
pub use error::{AdapterError, ConfigError};
pub use event::LoadEvent;
pub use machine::{IgnoreReason, LoadStateMachine, Transition};
pub use overlay::Overlay;
pub use state::{LoadState, LoadStateKind, Percent};
