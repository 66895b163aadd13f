// Logging shims over `tracing`, under the `waypoint_adapter` target. Statement position only.

macro_rules! atrace {
    ($($tt:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "waypoint_adapter", $($tt)*)
    };
}

macro_rules! adebug {
    ($($tt:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "waypoint_adapter", $($tt)*)
    };
}
