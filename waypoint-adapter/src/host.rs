use waypoint::{ConfigError, ContainerMetrics, MeasurementProvider};

/// The scrolling region a waypoint is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollContainer<El> {
    /// The outermost viewport (e.g. the browser window or the terminal).
    Viewport,
    /// An ancestor element that clips and scrolls its content.
    Element(El),
}

/// The environment capabilities a [`crate::Controller`] needs from its host.
///
/// A host is both the measurement source (anchor and container geometry) and the notification
/// source (scroll/resize subscriptions). The host is expected to forward the notifications it
/// subscribed to back into the controller (`on_scroll` / `on_resize`).
pub trait ScrollHost {
    /// Host handle for a scrolling element.
    type Element: Clone;

    /// Returns `false` when there is no environment to observe (e.g. server-side rendering).
    /// Every lifecycle operation is then a no-op.
    fn is_available(&self) -> bool {
        true
    }

    /// The nearest ancestor of the anchor that scrolls, or the viewport if there is none.
    fn find_scrollable_ancestor(&self) -> ScrollContainer<Self::Element>;

    /// The anchor's top edge, relative to the viewport.
    fn anchor_top(&self) -> f64;

    fn viewport_height(&self) -> f64;

    fn element_height(&self, element: &Self::Element) -> f64;

    /// The element's top edge, relative to the viewport.
    fn element_top(&self, element: &Self::Element) -> f64;

    fn add_scroll_listener(&mut self, container: &ScrollContainer<Self::Element>);

    fn remove_scroll_listener(&mut self, container: &ScrollContainer<Self::Element>);

    fn add_resize_listener(&mut self);

    fn remove_resize_listener(&mut self);
}

/// Reads the visible geometry of `container`.
///
/// The viewport is its own reference origin (`scroll_top = 0`); an element container reports its
/// height and its top edge relative to the viewport, matching the coordinate space of
/// [`ScrollHost::anchor_top`].
pub fn container_metrics<H: ScrollHost + ?Sized>(
    host: &H,
    container: &ScrollContainer<H::Element>,
) -> ContainerMetrics {
    match container {
        ScrollContainer::Viewport => ContainerMetrics::viewport(host.viewport_height()),
        ScrollContainer::Element(el) => {
            ContainerMetrics::new(host.element_height(el), host.element_top(el))
        }
    }
}

pub(crate) struct HostProbe<'a, H: ScrollHost> {
    pub(crate) host: &'a H,
    pub(crate) container: &'a ScrollContainer<H::Element>,
}

impl<H: ScrollHost> MeasurementProvider for HostProbe<'_, H> {
    fn anchor_top(&self) -> f64 {
        self.host.anchor_top()
    }

    fn container_metrics(&self) -> ContainerMetrics {
        container_metrics(self.host, self.container)
    }
}

/// Options applied when a [`crate::Controller`] is mounted.
pub struct MountOptions<El> {
    /// Overrides ancestor discovery.
    pub scrollable_ancestor: Option<ScrollContainer<El>>,

    /// Old name of `scrollable_ancestor`. Setting it makes `mount` fail.
    #[deprecated(note = "renamed to `scrollable_ancestor`")]
    pub scrollable_parent: Option<ScrollContainer<El>>,
}

#[allow(deprecated)]
impl<El> MountOptions<El> {
    pub fn new() -> Self {
        Self {
            scrollable_ancestor: None,
            scrollable_parent: None,
        }
    }

    pub fn with_scrollable_ancestor(mut self, container: ScrollContainer<El>) -> Self {
        self.scrollable_ancestor = Some(container);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scrollable_parent.is_some() {
            return Err(ConfigError::RenamedOption {
                old: "scrollable_parent",
                new: "scrollable_ancestor",
            });
        }
        Ok(())
    }
}

impl<El> Default for MountOptions<El> {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(deprecated)]
impl<El: Clone> Clone for MountOptions<El> {
    fn clone(&self) -> Self {
        Self {
            scrollable_ancestor: self.scrollable_ancestor.clone(),
            scrollable_parent: self.scrollable_parent.clone(),
        }
    }
}

#[allow(deprecated)]
impl<El: core::fmt::Debug> core::fmt::Debug for MountOptions<El> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MountOptions")
            .field("scrollable_ancestor", &self.scrollable_ancestor)
            .field("scrollable_parent", &self.scrollable_parent)
            .finish()
    }
}
