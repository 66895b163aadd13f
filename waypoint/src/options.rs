use alloc::sync::Arc;

use crate::waypoint::Waypoint;
use crate::{CallbackResult, PositionChange};

/// A waypoint callback.
///
/// The first argument is the waypoint that fired it, so a callback may re-evaluate it (for
/// example after changing layout). Returning `Err` aborts the remaining callbacks of the current
/// evaluation.
pub type Callback<E> =
    Arc<dyn Fn(&Waypoint<E>, &PositionChange<'_, E>) -> CallbackResult + Send + Sync>;

/// Configuration for [`crate::Waypoint`].
///
/// Cheap to clone: callbacks are stored in `Arc`s.
pub struct WaypointOptions<E = ()> {
    /// Fraction of the container height treated as a buffer at the top and bottom edges.
    ///
    /// Not validated: negative values shrink the inside band, values above `1.0` extend it past
    /// the container.
    pub threshold: f64,

    /// Called when the anchor becomes [`crate::Position::Inside`].
    pub on_enter: Option<Callback<E>>,

    /// Called when the anchor stops being [`crate::Position::Inside`].
    pub on_leave: Option<Callback<E>>,

    /// Called on every change of the classified position, before `on_enter`/`on_leave`.
    pub on_position_change: Option<Callback<E>>,

    /// Synthesizes an enter + leave pair when consecutive samples jump straight from above to
    /// below (or back), skipping the inside state.
    pub fire_on_rapid_scroll: bool,
}

impl<E> Default for WaypointOptions<E> {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            on_enter: None,
            on_leave: None,
            on_position_change: None,
            fire_on_rapid_scroll: true,
        }
    }
}

impl<E> Clone for WaypointOptions<E> {
    fn clone(&self) -> Self {
        Self {
            threshold: self.threshold,
            on_enter: self.on_enter.clone(),
            on_leave: self.on_leave.clone(),
            on_position_change: self.on_position_change.clone(),
            fire_on_rapid_scroll: self.fire_on_rapid_scroll,
        }
    }
}

impl<E> WaypointOptions<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_fire_on_rapid_scroll(mut self, fire_on_rapid_scroll: bool) -> Self {
        self.fire_on_rapid_scroll = fire_on_rapid_scroll;
        self
    }

    pub fn with_on_enter(
        mut self,
        on_enter: impl Fn(&Waypoint<E>, &PositionChange<'_, E>) -> CallbackResult
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.on_enter = Some(Arc::new(on_enter));
        self
    }

    pub fn with_on_leave(
        mut self,
        on_leave: impl Fn(&Waypoint<E>, &PositionChange<'_, E>) -> CallbackResult
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.on_leave = Some(Arc::new(on_leave));
        self
    }

    pub fn with_on_position_change(
        mut self,
        on_position_change: impl Fn(&Waypoint<E>, &PositionChange<'_, E>) -> CallbackResult
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.on_position_change = Some(Arc::new(on_position_change));
        self
    }
}

impl<E> core::fmt::Debug for WaypointOptions<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WaypointOptions")
            .field("threshold", &self.threshold)
            .field("fire_on_rapid_scroll", &self.fire_on_rapid_scroll)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .field("on_position_change", &self.on_position_change.is_some())
            .finish()
    }
}
