// Logging shims over `tracing`, under the `waypoint` target.
//
// Only usable in statement position. Without the `tracing` feature the call is stripped, so the
// arguments are never evaluated.

macro_rules! wtrace {
    ($($tt:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "waypoint", $($tt)*)
    };
}

macro_rules! wdebug {
    ($($tt:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "waypoint", $($tt)*)
    };
}

macro_rules! wwarn {
    ($($tt:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "waypoint", $($tt)*)
    };
}
