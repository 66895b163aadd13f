use core::fmt;

use waypoint::{Error, Measurement, MeasurementProvider, Transition, Waypoint, WaypointOptions};

use crate::host::HostProbe;
use crate::{MountOptions, ScrollContainer, ScrollHost, ThrottlePolicy, Unthrottled};

/// A framework-neutral controller that wraps a [`waypoint::Waypoint`] and drives it through a
/// host lifecycle.
///
/// This type does not hold any UI objects beyond what the host hands out. Adapters drive it by
/// calling:
/// - `mount` once the anchor exists, `unmount` when it goes away
/// - `update` after a re-layout that may have moved the anchor
/// - `on_scroll` / `on_resize` for the notifications the host subscribed to
/// - `tick(now_ms)` each frame/timer tick, to flush a notification the throttle held back
#[derive(Clone)]
pub struct Controller<H: ScrollHost, Ev = (), T = Unthrottled> {
    waypoint: Waypoint<Ev>,
    host: H,
    container: Option<ScrollContainer<H::Element>>,
    throttle: T,
    pending: Option<Ev>,
}

impl<H: ScrollHost, Ev> Controller<H, Ev, Unthrottled> {
    pub fn new(host: H, options: WaypointOptions<Ev>) -> Self {
        Self {
            waypoint: Waypoint::new(options),
            host,
            container: None,
            throttle: Unthrottled,
            pending: None,
        }
    }
}

impl<H: ScrollHost, Ev, T: ThrottlePolicy> Controller<H, Ev, T> {
    /// Replaces the throttling policy applied to scroll/resize notifications.
    pub fn with_throttle<U: ThrottlePolicy>(self, throttle: U) -> Controller<H, Ev, U> {
        Controller {
            waypoint: self.waypoint,
            host: self.host,
            container: self.container,
            throttle,
            pending: self.pending,
        }
    }

    pub fn waypoint(&self) -> &Waypoint<Ev> {
        &self.waypoint
    }

    /// Mutable access for option changes. Call [`Controller::update`] afterwards if the change
    /// can affect classification (e.g. a new threshold).
    pub fn waypoint_mut(&mut self) -> &mut Waypoint<Ev> {
        &mut self.waypoint
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn throttle(&self) -> &T {
        &self.throttle
    }

    pub fn throttle_mut(&mut self) -> &mut T {
        &mut self.throttle
    }

    /// The resolved scrolling container, while mounted.
    pub fn container(&self) -> Option<&ScrollContainer<H::Element>> {
        self.container.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The geometry the next evaluation would see, while mounted.
    pub fn measurement(&self) -> Option<Measurement> {
        let probe = self.probe(self.container.as_ref()?);
        Some(
            self.waypoint
                .measurement(probe.anchor_top(), probe.container_metrics()),
        )
    }

    /// Starts observing: resolves the container, subscribes to scroll and resize, and runs the
    /// initial evaluation (with no event).
    ///
    /// Fails fast on configuration errors, before touching the host. Mounting an already mounted
    /// controller starts a fresh observation.
    pub fn mount(&mut self, options: MountOptions<H::Element>) -> Result<Option<Transition>, Error> {
        options.validate()?;
        if !self.host.is_available() {
            adebug!("Controller::mount: host unavailable");
            return Ok(None);
        }
        if self.is_mounted() {
            self.unmount();
        }

        let container = match options.scrollable_ancestor {
            Some(container) => container,
            None => self.host.find_scrollable_ancestor(),
        };
        adebug!(
            viewport = matches!(container, ScrollContainer::Viewport),
            "Controller::mount"
        );
        self.host.add_scroll_listener(&container);
        self.host.add_resize_listener();
        self.container = Some(container);
        self.evaluate(None)
    }

    /// Re-evaluates after a re-layout (with no event).
    pub fn update(&mut self) -> Result<Option<Transition>, Error> {
        self.evaluate(None)
    }

    pub fn on_scroll(&mut self, event: Ev, now_ms: u64) -> Result<Option<Transition>, Error> {
        self.trigger(event, now_ms)
    }

    pub fn on_resize(&mut self, event: Ev, now_ms: u64) -> Result<Option<Transition>, Error> {
        self.trigger(event, now_ms)
    }

    /// Flushes a notification held back by the throttle, once the throttle admits it.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<Transition>, Error> {
        if self.pending.is_none() || !self.throttle.admit(now_ms) {
            return Ok(None);
        }
        let event = self.pending.take();
        atrace!(now_ms, "Controller::tick: flushing pending trigger");
        self.evaluate(event.as_ref())
    }

    /// Stops observing: unsubscribes, drops any pending notification and forgets the retained
    /// position.
    ///
    /// A no-op unless mounted, so every removal pairs with the subscription made by `mount`.
    pub fn unmount(&mut self) {
        let Some(container) = self.container.take() else {
            return;
        };
        self.host.remove_scroll_listener(&container);
        self.host.remove_resize_listener();
        self.pending = None;
        self.waypoint.reset();
        adebug!("Controller::unmount");
    }

    fn trigger(&mut self, event: Ev, now_ms: u64) -> Result<Option<Transition>, Error> {
        if !self.is_mounted() {
            return Ok(None);
        }
        if !self.throttle.admit(now_ms) {
            atrace!(now_ms, "Controller: trigger throttled");
            self.pending = Some(event);
            return Ok(None);
        }
        self.pending = None;
        self.evaluate(Some(&event))
    }

    fn evaluate(&self, event: Option<&Ev>) -> Result<Option<Transition>, Error> {
        let Some(container) = self.container.as_ref() else {
            return Ok(None);
        };
        self.waypoint.refresh(&self.probe(container), event)
    }

    fn probe<'a>(&'a self, container: &'a ScrollContainer<H::Element>) -> HostProbe<'a, H> {
        HostProbe {
            host: &self.host,
            container,
        }
    }
}

impl<H, Ev, T> fmt::Debug for Controller<H, Ev, T>
where
    H: ScrollHost,
    H::Element: fmt::Debug,
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("waypoint", &self.waypoint)
            .field("container", &self.container)
            .field("throttle", &self.throttle)
            .field("has_pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}
