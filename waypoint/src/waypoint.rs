use alloc::sync::Arc;
use core::cell::Cell;

use crate::{
    Callback, CallbackKind, CallbackResult, ContainerMetrics, Error, Measurement,
    MeasurementProvider, Position, PositionChange, Transition, WaypointOptions, WaypointState,
    classify,
};

/// Tracks one anchor against one scrolling container and reports visibility transitions.
///
/// This type is UI-agnostic:
/// - It does not hold the anchor or the container.
/// - Your adapter drives it by calling [`Waypoint::evaluate`] (or [`Waypoint::refresh`]) on
///   scroll, resize, mount and re-layout.
///
/// The only retained state is the previously classified position. It is stored *before* any
/// callback runs, so a callback that re-evaluates the waypoint sees the new position as
/// "previous" and cannot loop on unchanged input.
pub struct Waypoint<E = ()> {
    options: WaypointOptions<E>,
    previous_position: Cell<Option<Position>>,
}

impl<E> Waypoint<E> {
    pub fn new(options: WaypointOptions<E>) -> Self {
        wdebug!(
            threshold = options.threshold,
            fire_on_rapid_scroll = options.fire_on_rapid_scroll,
            "Waypoint::new"
        );
        Self {
            options,
            previous_position: Cell::new(None),
        }
    }

    pub fn options(&self) -> &WaypointOptions<E> {
        &self.options
    }

    /// Replaces the options. The retained position is kept; callers that moved the anchor
    /// should re-evaluate afterwards.
    pub fn set_options(&mut self, options: WaypointOptions<E>) {
        self.options = options;
        wtrace!(
            threshold = self.options.threshold,
            fire_on_rapid_scroll = self.options.fire_on_rapid_scroll,
            "Waypoint::set_options"
        );
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut WaypointOptions<E>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn threshold(&self) -> f64 {
        self.options.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.options.threshold = threshold;
    }

    pub fn set_fire_on_rapid_scroll(&mut self, fire_on_rapid_scroll: bool) {
        self.options.fire_on_rapid_scroll = fire_on_rapid_scroll;
    }

    pub fn set_on_enter(
        &mut self,
        on_enter: impl Fn(&Waypoint<E>, &PositionChange<'_, E>) -> CallbackResult
        + Send
        + Sync
        + 'static,
    ) {
        self.options.on_enter = Some(Arc::new(on_enter));
    }

    pub fn set_on_leave(
        &mut self,
        on_leave: impl Fn(&Waypoint<E>, &PositionChange<'_, E>) -> CallbackResult
        + Send
        + Sync
        + 'static,
    ) {
        self.options.on_leave = Some(Arc::new(on_leave));
    }

    pub fn set_on_position_change(
        &mut self,
        on_position_change: impl Fn(&Waypoint<E>, &PositionChange<'_, E>) -> CallbackResult
        + Send
        + Sync
        + 'static,
    ) {
        self.options.on_position_change = Some(Arc::new(on_position_change));
    }

    /// The position classified by the last evaluation, or `None` if it never ran.
    pub fn previous_position(&self) -> Option<Position> {
        self.previous_position.get()
    }

    /// Forgets the retained position, so the next evaluation reports a transition from `None`.
    pub fn reset(&self) {
        wtrace!("Waypoint::reset");
        self.previous_position.set(None);
    }

    pub fn state(&self) -> WaypointState {
        WaypointState {
            previous_position: self.previous_position.get(),
        }
    }

    pub fn restore_state(&self, state: WaypointState) {
        self.previous_position.set(state.previous_position);
    }

    /// Builds a measurement for this waypoint, using the configured threshold.
    pub fn measurement(&self, anchor_top: f64, container: ContainerMetrics) -> Measurement {
        Measurement::new(anchor_top, container, self.options.threshold)
    }

    /// Classifies a measurement and reports the transition, if any, to the callbacks.
    ///
    /// Callback order for a change: `on_position_change`, then `on_enter` (now inside) or
    /// `on_leave` (was inside), then, for an above/below skip with `fire_on_rapid_scroll`, a
    /// synthetic `on_enter` followed by a synthetic `on_leave`.
    ///
    /// Returns `Ok(None)` when the position is unchanged. A failing callback stops the sequence
    /// and its error is returned; the new position has already been retained at that point.
    pub fn evaluate(
        &self,
        measurement: &Measurement,
        event: Option<&E>,
    ) -> Result<Option<Transition>, Error> {
        let current = classify(measurement);
        let previous = self.previous_position.replace(Some(current));
        wtrace!(?previous, ?current, "Waypoint::evaluate");

        let transition = Transition::new(previous, current);
        if !transition.is_change() {
            return Ok(None);
        }
        wdebug!(?previous, ?current, "Waypoint: position changed");

        let change = PositionChange {
            current_position: current,
            previous_position: previous,
            event,
        };
        self.fire(
            CallbackKind::PositionChange,
            self.options.on_position_change.as_ref(),
            &change,
        )?;

        if transition.enters() {
            self.fire(CallbackKind::Enter, self.options.on_enter.as_ref(), &change)?;
        } else if transition.leaves() {
            self.fire(CallbackKind::Leave, self.options.on_leave.as_ref(), &change)?;
        }

        if self.options.fire_on_rapid_scroll && transition.is_rapid_scroll() {
            wdebug!(?previous, ?current, "Waypoint: rapid scroll, synthesizing enter/leave");
            let entered = PositionChange {
                current_position: Position::Inside,
                previous_position: previous,
                event,
            };
            self.fire(CallbackKind::Enter, self.options.on_enter.as_ref(), &entered)?;
            let left = PositionChange {
                current_position: current,
                previous_position: Some(Position::Inside),
                event,
            };
            self.fire(CallbackKind::Leave, self.options.on_leave.as_ref(), &left)?;
        }

        Ok(Some(transition))
    }

    /// Reads fresh geometry from `provider` and evaluates it with the configured threshold.
    pub fn refresh(
        &self,
        provider: &impl MeasurementProvider,
        event: Option<&E>,
    ) -> Result<Option<Transition>, Error> {
        let measurement = self.measurement(provider.anchor_top(), provider.container_metrics());
        wtrace!(
            anchor_top = measurement.anchor_top,
            container_height = measurement.container_height,
            container_scroll_top = measurement.container_scroll_top,
            "Waypoint::refresh"
        );
        self.evaluate(&measurement, event)
    }

    fn fire(
        &self,
        kind: CallbackKind,
        callback: Option<&Callback<E>>,
        change: &PositionChange<'_, E>,
    ) -> Result<(), Error> {
        let Some(cb) = callback else {
            return Ok(());
        };
        cb(self, change).map_err(|source| {
            wwarn!(%kind, "Waypoint: callback failed");
            Error::Callback { kind, source }
        })
    }
}

impl<E> Clone for Waypoint<E> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            previous_position: Cell::new(self.previous_position.get()),
        }
    }
}

impl<E> core::fmt::Debug for Waypoint<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Waypoint")
            .field("options", &self.options)
            .field("previous_position", &self.previous_position.get())
            .finish()
    }
}
