use crate::{Measurement, Position};

/// Classifies an anchor against the visible part of its container.
///
/// The threshold widens the [`Position::Inside`] band by `container_height * threshold` at both
/// edges, and the band's boundaries are inclusive. A zero-height container is always
/// [`Position::Invisible`].
pub fn classify(m: &Measurement) -> Position {
    let threshold_px = m.threshold_px();
    let container_bottom = m.container_scroll_top + m.container_height;

    if m.container_height == 0.0 {
        return Position::Invisible;
    }

    if m.container_scroll_top <= m.anchor_top + threshold_px
        && m.anchor_top - threshold_px <= container_bottom
    {
        return Position::Inside;
    }

    if container_bottom < m.anchor_top - threshold_px {
        return Position::Below;
    }

    if m.anchor_top + threshold_px < m.container_scroll_top {
        return Position::Above;
    }

    // Only reachable with non-finite geometry.
    wwarn!(
        anchor_top = m.anchor_top,
        container_height = m.container_height,
        container_scroll_top = m.container_scroll_top,
        threshold = m.threshold,
        "classify: unusable measurement"
    );
    Position::Invisible
}
