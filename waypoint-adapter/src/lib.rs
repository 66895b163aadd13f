//! Host integration helpers for the `waypoint` crate.
//!
//! The `waypoint` crate only classifies geometry and dispatches transitions. This crate provides
//! the framework-neutral plumbing an adapter needs around it:
//!
//! - Container metrics for the viewport vs. a scrolling element
//! - Mount/unmount lifecycle with scroll/resize subscriptions
//! - Throttling of scroll/resize notifications, with a trailing flush
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod host;
mod throttle;


pub use controller::Controller;
pub use host::{MountOptions, ScrollContainer, ScrollHost, container_metrics};
pub use throttle::{Interval, ThrottlePolicy, Unthrottled};
pub use waypoint::{ConfigError, Error, Position, PositionChange, Transition, WaypointOptions};
