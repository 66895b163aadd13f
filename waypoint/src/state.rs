use crate::Position;

/// A lightweight, serializable snapshot of a waypoint's retained state.
///
/// Restoring it on a fresh [`crate::Waypoint`] (e.g. after a host re-creates its view) keeps the
/// next evaluation from re-reporting a transition the user already saw.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointState {
    pub previous_position: Option<Position>,
}
