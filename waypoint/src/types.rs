use core::fmt;

/// Where the anchor sits relative to the visible part of its scrolling container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Position {
    /// The anchor has scrolled past the top edge.
    Above,
    /// The anchor is within the (threshold-widened) visible band.
    Inside,
    /// The anchor has not yet reached the bottom edge.
    Below,
    /// The container has no height (e.g. not laid out yet) or the geometry is unusable.
    Invisible,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Inside => "inside",
            Self::Below => "below",
            Self::Invisible => "invisible",
        }
    }

    pub fn is_inside(self) -> bool {
        matches!(self, Self::Inside)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry of the visible part of a scrolling container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerMetrics {
    /// Height of the visible region. `0.0` marks a degenerate container.
    pub height: f64,
    /// Offset of the visible region's top edge from the reference origin.
    pub scroll_top: f64,
}

impl ContainerMetrics {
    pub fn new(height: f64, scroll_top: f64) -> Self {
        Self { height, scroll_top }
    }

    /// Metrics for the outermost viewport, whose top edge is the reference origin.
    pub fn viewport(height: f64) -> Self {
        Self {
            height,
            scroll_top: 0.0,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.scroll_top + self.height
    }
}

/// Input to [`crate::classify`].
///
/// All lengths share one coordinate space (typically CSS pixels relative to the viewport).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Signed distance from the reference origin to the anchor's top edge.
    pub anchor_top: f64,
    pub container_height: f64,
    pub container_scroll_top: f64,
    /// Fraction of `container_height` added as a buffer at both edges. Used as-is.
    pub threshold: f64,
}

impl Measurement {
    pub fn new(anchor_top: f64, container: ContainerMetrics, threshold: f64) -> Self {
        Self {
            anchor_top,
            container_height: container.height,
            container_scroll_top: container.scroll_top,
            threshold,
        }
    }

    pub fn container(&self) -> ContainerMetrics {
        ContainerMetrics {
            height: self.container_height,
            scroll_top: self.container_scroll_top,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// The buffer band size in container units.
    pub fn threshold_px(&self) -> f64 {
        self.container_height * self.threshold
    }
}

/// A change between two consecutive classifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// `None` on the first evaluation after creation or [`crate::Waypoint::reset`].
    pub previous: Option<Position>,
    pub current: Position,
}

impl Transition {
    pub fn new(previous: Option<Position>, current: Position) -> Self {
        Self { previous, current }
    }

    pub fn is_change(&self) -> bool {
        self.previous != Some(self.current)
    }

    pub fn enters(&self) -> bool {
        self.is_change() && self.current.is_inside()
    }

    pub fn leaves(&self) -> bool {
        self.is_change() && !self.current.is_inside() && self.previous == Some(Position::Inside)
    }

    /// The anchor skipped over the visible region between two samples.
    ///
    /// Only `Above -> Below` and `Below -> Above` count; a jump that is sampled as `Invisible`
    /// on either side is not compensated.
    pub fn is_rapid_scroll(&self) -> bool {
        matches!(
            (self.previous, self.current),
            (Some(Position::Above), Position::Below) | (Some(Position::Below), Position::Above)
        )
    }
}

/// The argument handed to every waypoint callback.
///
/// For the synthetic calls fired on a rapid scroll, one of the two positions is an artificial
/// [`Position::Inside`].
pub struct PositionChange<'a, E> {
    pub current_position: Position,
    pub previous_position: Option<Position>,
    /// The triggering host event, or `None` for programmatic evaluations (mount, re-layout).
    pub event: Option<&'a E>,
}

impl<E> Clone for PositionChange<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for PositionChange<'_, E> {}

impl<E: fmt::Debug> fmt::Debug for PositionChange<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionChange")
            .field("current_position", &self.current_position)
            .field("previous_position", &self.previous_position)
            .field("event", &self.event)
            .finish()
    }
}
