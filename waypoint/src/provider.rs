use crate::ContainerMetrics;

/// Supplies fresh geometry each time a waypoint is re-evaluated.
///
/// This is the seam between the classifier and the host environment: a DOM adapter reads
/// bounding rects here, a TUI adapter reads its own layout, tests return constants.
pub trait MeasurementProvider {
    /// Signed distance from the reference origin to the anchor's top edge.
    fn anchor_top(&self) -> f64;

    /// Height and top offset of the visible part of the scrolling container.
    fn container_metrics(&self) -> ContainerMetrics;
}

impl<T: MeasurementProvider + ?Sized> MeasurementProvider for &T {
    fn anchor_top(&self) -> f64 {
        (**self).anchor_top()
    }

    fn container_metrics(&self) -> ContainerMetrics {
        (**self).container_metrics()
    }
}
