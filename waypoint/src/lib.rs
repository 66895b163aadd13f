//! A headless scroll waypoint.
//!
//! A waypoint tracks one anchor inside one scrolling container. Each time the host asks it to
//! re-check, it classifies the anchor as above, inside, below or invisible relative to the
//! visible region, and reports genuine transitions exactly once through `on_position_change`,
//! `on_enter` and `on_leave`. When consecutive samples jump straight over the visible region it
//! can synthesize the enter/leave pair the user would otherwise miss.
//!
//! For host lifecycle helpers (container metrics, subscriptions, throttling), see the
//! `waypoint-adapter` crate.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the anchor's top edge
//! - the visible container's height and top offset
//! - a trigger (scroll, resize, mount, re-layout) to re-evaluate
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod classify;
mod error;
mod options;
mod provider;
mod state;
mod types;
mod waypoint;

#[cfg(test)]
mod tests;

pub use classify::classify;
pub use error::{CallbackError, CallbackKind, CallbackResult, ConfigError, Error};
pub use options::{Callback, WaypointOptions};
pub use provider::MeasurementProvider;
pub use state::WaypointState;
pub use types::{ContainerMetrics, Measurement, Position, PositionChange, Transition};
pub use waypoint::Waypoint;
