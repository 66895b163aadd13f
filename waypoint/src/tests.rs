use crate::*;

use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Call {
    kind: CallbackKind,
    previous: Option<Position>,
    current: Position,
    event: Option<u32>,
}

type Log = Arc<Mutex<Vec<Call>>>;

fn call(kind: CallbackKind, previous: Option<Position>, current: Position) -> Call {
    Call {
        kind,
        previous,
        current,
        event: None,
    }
}

fn recorder(
    log: Log,
    kind: CallbackKind,
) -> impl Fn(&Waypoint<u32>, &PositionChange<'_, u32>) -> CallbackResult + Send + Sync + 'static {
    move |_, change| {
        log.lock().unwrap().push(Call {
            kind,
            previous: change.previous_position,
            current: change.current_position,
            event: change.event.copied(),
        });
        Ok(())
    }
}

fn recording_options(log: &Log) -> WaypointOptions<u32> {
    WaypointOptions::new()
        .with_on_position_change(recorder(Arc::clone(log), CallbackKind::PositionChange))
        .with_on_enter(recorder(Arc::clone(log), CallbackKind::Enter))
        .with_on_leave(recorder(Arc::clone(log), CallbackKind::Leave))
}

fn recording() -> (Waypoint<u32>, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    (Waypoint::new(recording_options(&log)), log)
}

fn take(log: &Log) -> Vec<Call> {
    core::mem::take(&mut *log.lock().unwrap())
}

fn kinds(log: &Log) -> Vec<CallbackKind> {
    take(log).into_iter().map(|c| c.kind).collect()
}

// A 500px tall viewport.
fn at(anchor_top: f64) -> Measurement {
    Measurement::new(anchor_top, ContainerMetrics::viewport(500.0), 0.0)
}

fn measurement_for(position: Position) -> Measurement {
    match position {
        Position::Above => at(-50.0),
        Position::Inside => at(100.0),
        Position::Below => at(600.0),
        Position::Invisible => Measurement::new(100.0, ContainerMetrics::viewport(0.0), 0.0),
    }
}

const ALL: [Position; 4] = [
    Position::Above,
    Position::Inside,
    Position::Below,
    Position::Invisible,
];

#[test]
fn classify_basic_scenarios() {
    assert_eq!(classify(&at(100.0)), Position::Inside);
    assert_eq!(classify(&at(600.0)), Position::Below);
    assert_eq!(classify(&at(-50.0)), Position::Above);
}

#[test]
fn zero_height_container_is_always_invisible() {
    for anchor_top in [-1e9, -50.0, 0.0, 100.0, 600.0, 1e9] {
        for scroll_top in [-100.0, 0.0, 250.0] {
            for threshold in [-1.0, 0.0, 0.5, 3.0] {
                let m = Measurement::new(
                    anchor_top,
                    ContainerMetrics::new(0.0, scroll_top),
                    threshold,
                );
                assert_eq!(classify(&m), Position::Invisible, "{m:?}");
            }
        }
    }
}

#[test]
fn classify_is_pure() {
    for anchor_top in [-600.0, -0.5, 0.0, 250.0, 500.0, 500.5, 9000.0] {
        let m = at(anchor_top).with_threshold(0.25);
        assert_eq!(classify(&m), classify(&m));
    }
}

#[test]
fn band_edges_are_inclusive_toward_inside() {
    assert_eq!(classify(&at(0.0)), Position::Inside);
    assert_eq!(classify(&at(500.0)), Position::Inside);
    assert_eq!(classify(&at(-0.001)), Position::Above);
    assert_eq!(classify(&at(500.001)), Position::Below);
}

#[test]
fn threshold_widens_the_inside_band_at_both_edges() {
    let container = ContainerMetrics::viewport(1000.0);
    let plain = |top| classify(&Measurement::new(top, container, 0.0));
    let buffered = |top| classify(&Measurement::new(top, container, 0.1));

    assert_eq!(plain(-100.0), Position::Above);
    assert_eq!(buffered(-100.0), Position::Inside);
    assert_eq!(buffered(-100.5), Position::Above);

    assert_eq!(plain(1100.0), Position::Below);
    assert_eq!(buffered(1100.0), Position::Inside);
    assert_eq!(buffered(1100.5), Position::Below);
}

#[test]
fn negative_threshold_shrinks_the_band() {
    let m = |top| Measurement::new(top, ContainerMetrics::viewport(500.0), -0.1);
    assert_eq!(classify(&m(10.0)), Position::Above);
    assert_eq!(classify(&m(50.0)), Position::Inside);
    assert_eq!(classify(&m(450.0)), Position::Inside);
    assert_eq!(classify(&m(460.0)), Position::Below);
}

#[test]
fn element_container_uses_its_scroll_top_as_the_top_edge() {
    // Container starts 200px down the viewport and is 300px tall.
    let container = ContainerMetrics::new(300.0, 200.0);
    assert_eq!(container.bottom(), 500.0);
    let m = |top| Measurement::new(top, container, 0.0);
    assert_eq!(classify(&m(150.0)), Position::Above);
    assert_eq!(classify(&m(200.0)), Position::Inside);
    assert_eq!(classify(&m(500.0)), Position::Inside);
    assert_eq!(classify(&m(501.0)), Position::Below);
}

#[test]
fn non_finite_geometry_falls_back_to_invisible() {
    assert_eq!(classify(&at(f64::NAN)), Position::Invisible);
    let m = Measurement::new(100.0, ContainerMetrics::new(f64::NAN, 0.0), 0.0);
    assert_eq!(classify(&m), Position::Invisible);
}

#[test]
fn position_names() {
    assert_eq!(Position::Above.as_str(), "above");
    assert_eq!(Position::Inside.to_string(), "inside");
    assert_eq!(Position::Below.to_string(), "below");
    assert_eq!(Position::Invisible.as_str(), "invisible");
    assert!(Position::Inside.is_inside());
    assert!(!Position::Below.is_inside());
}

#[test]
fn default_options() {
    let opts = WaypointOptions::<()>::default();
    assert_eq!(opts.threshold, 0.0);
    assert!(opts.fire_on_rapid_scroll);
    assert!(opts.on_enter.is_none());
    assert!(opts.on_leave.is_none());
    assert!(opts.on_position_change.is_none());
}

#[test]
fn missing_callbacks_are_no_ops() {
    let w: Waypoint = Waypoint::new(WaypointOptions::new());
    let t = w.evaluate(&at(-50.0), None).unwrap();
    assert_eq!(t, Some(Transition::new(None, Position::Above)));
    let t = w.evaluate(&at(600.0), None).unwrap();
    assert!(t.unwrap().is_rapid_scroll());
    assert_eq!(w.previous_position(), Some(Position::Below));
}

#[test]
fn first_evaluation_inside_fires_change_then_enter() {
    let (w, log) = recording();
    let t = w.evaluate(&at(100.0), None).unwrap();
    assert_eq!(t, Some(Transition::new(None, Position::Inside)));
    assert_eq!(
        take(&log),
        [
            call(CallbackKind::PositionChange, None, Position::Inside),
            call(CallbackKind::Enter, None, Position::Inside),
        ]
    );
}

#[test]
fn first_evaluation_outside_fires_change_only() {
    for position in [Position::Above, Position::Below, Position::Invisible] {
        let (w, log) = recording();
        w.evaluate(&measurement_for(position), None).unwrap();
        assert_eq!(
            take(&log),
            [call(CallbackKind::PositionChange, None, position)]
        );
    }
}

#[test]
fn unchanged_position_fires_nothing() {
    let (w, log) = recording();
    w.evaluate(&at(100.0), None).unwrap();
    take(&log);

    // Different geometry, same classification.
    for top in [0.0, 250.0, 500.0] {
        assert_eq!(w.evaluate(&at(top), Some(&7)).unwrap(), None);
    }
    assert!(take(&log).is_empty());
}

#[test]
fn rapid_scroll_synthesizes_enter_and_leave() {
    let (w, log) = recording();
    w.evaluate(&at(-50.0), None).unwrap();
    take(&log);

    let t = w.evaluate(&at(600.0), Some(&42)).unwrap().unwrap();
    assert!(t.is_rapid_scroll());
    let ev = |c: Call| Call {
        event: Some(42),
        ..c
    };
    assert_eq!(
        take(&log),
        [
            ev(call(
                CallbackKind::PositionChange,
                Some(Position::Above),
                Position::Below
            )),
            ev(call(
                CallbackKind::Enter,
                Some(Position::Above),
                Position::Inside
            )),
            ev(call(
                CallbackKind::Leave,
                Some(Position::Inside),
                Position::Below
            )),
        ]
    );
}

#[test]
fn rapid_scroll_upward_is_compensated_too() {
    let (w, log) = recording();
    w.evaluate(&at(600.0), None).unwrap();
    take(&log);

    w.evaluate(&at(-50.0), None).unwrap();
    assert_eq!(
        take(&log),
        [
            call(
                CallbackKind::PositionChange,
                Some(Position::Below),
                Position::Above
            ),
            call(CallbackKind::Enter, Some(Position::Below), Position::Inside),
            call(CallbackKind::Leave, Some(Position::Inside), Position::Above),
        ]
    );
}

#[test]
fn rapid_scroll_compensation_can_be_disabled() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let w = Waypoint::new(recording_options(&log).with_fire_on_rapid_scroll(false));
    w.evaluate(&at(-50.0), None).unwrap();
    w.evaluate(&at(600.0), None).unwrap();
    assert_eq!(
        kinds(&log),
        [CallbackKind::PositionChange, CallbackKind::PositionChange]
    );
}

#[test]
fn skips_through_invisible_are_not_compensated() {
    let (w, log) = recording();
    w.evaluate(&measurement_for(Position::Above), None).unwrap();
    w.evaluate(&measurement_for(Position::Invisible), None)
        .unwrap();
    w.evaluate(&measurement_for(Position::Below), None).unwrap();
    assert_eq!(
        kinds(&log),
        [
            CallbackKind::PositionChange,
            CallbackKind::PositionChange,
            CallbackKind::PositionChange
        ]
    );
}

#[test]
fn transition_table() {
    use CallbackKind::{Enter, Leave, PositionChange as Change};

    let expected = |from: Option<Position>, to: Position| -> Vec<CallbackKind> {
        if from == Some(to) {
            return Vec::new();
        }
        let mut out = alloc::vec![Change];
        if to == Position::Inside {
            out.push(Enter);
        } else if from == Some(Position::Inside) {
            out.push(Leave);
        }
        if matches!(
            (from, to),
            (Some(Position::Above), Position::Below) | (Some(Position::Below), Position::Above)
        ) {
            out.push(Enter);
            out.push(Leave);
        }
        out
    };

    let (w, log) = recording();
    let froms = core::iter::once(None).chain(ALL.into_iter().map(Some));
    for from in froms {
        for to in ALL {
            w.restore_state(WaypointState {
                previous_position: from,
            });
            let t = w.evaluate(&measurement_for(to), None).unwrap();
            assert_eq!(t.is_some(), from != Some(to), "{from:?} -> {to:?}");
            assert_eq!(kinds(&log), expected(from, to), "{from:?} -> {to:?}");
            assert_eq!(w.previous_position(), Some(to));
        }
    }
}

#[test]
fn leaving_inside_fires_leave_with_real_endpoints() {
    let (w, log) = recording();
    w.evaluate(&at(100.0), None).unwrap();
    take(&log);

    w.evaluate(&measurement_for(Position::Invisible), Some(&1))
        .unwrap();
    let calls = take(&log);
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        Call {
            kind: CallbackKind::Leave,
            previous: Some(Position::Inside),
            current: Position::Invisible,
            event: Some(1),
        }
    );
}

#[test]
fn previous_position_is_stored_before_callbacks_run() {
    let seen: Arc<Mutex<Vec<Option<Position>>>> = Arc::new(Mutex::new(Vec::new()));
    let w: Waypoint = Waypoint::new(WaypointOptions::new().with_on_position_change({
        let seen = Arc::clone(&seen);
        move |w, _| {
            seen.lock().unwrap().push(w.previous_position());
            Ok(())
        }
    }));
    w.evaluate(&at(-50.0), None).unwrap();
    w.evaluate(&at(100.0), None).unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        [Some(Position::Above), Some(Position::Inside)]
    );
}

#[test]
fn reentrant_evaluation_from_a_callback_does_not_loop() {
    let enters = Arc::new(AtomicUsize::new(0));
    let nested: Arc<Mutex<Vec<Option<Transition>>>> = Arc::new(Mutex::new(Vec::new()));
    let w: Waypoint = Waypoint::new(WaypointOptions::new().with_on_enter({
        let enters = Arc::clone(&enters);
        let nested = Arc::clone(&nested);
        move |w, _| {
            enters.fetch_add(1, Ordering::Relaxed);
            // Layout did not move the anchor: the nested check sees no change.
            let t = w.evaluate(&at(100.0), None)?;
            nested.lock().unwrap().push(t);
            Ok(())
        }
    }));

    assert!(w.evaluate(&at(100.0), None).unwrap().is_some());
    assert_eq!(enters.load(Ordering::Relaxed), 1);
    assert_eq!(*nested.lock().unwrap(), [None]);
}

#[test]
fn failing_callback_aborts_the_remaining_sequence() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let w = Waypoint::new(
        recording_options(&log).with_on_position_change(|_, _| Err("boom".into())),
    );

    let err = w.evaluate(&at(100.0), None).unwrap_err();
    assert_eq!(err.callback_kind(), Some(CallbackKind::PositionChange));
    assert_eq!(err.to_string(), "on_position_change callback failed");
    assert!(core::error::Error::source(&err).is_some());
    // on_enter never ran, but the new position is retained.
    assert!(take(&log).is_empty());
    assert_eq!(w.previous_position(), Some(Position::Inside));
    assert_eq!(w.evaluate(&at(100.0), None).unwrap(), None);
}

#[test]
fn failing_synthetic_enter_skips_synthetic_leave() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let w = Waypoint::new(recording_options(&log).with_on_enter(|_, change| {
        if change.previous_position.is_some() {
            Err("enter failed".into())
        } else {
            Ok(())
        }
    }));
    w.evaluate(&at(-50.0), None).unwrap();
    take(&log);

    let err = w.evaluate(&at(600.0), None).unwrap_err();
    assert_eq!(err.callback_kind(), Some(CallbackKind::Enter));
    assert_eq!(kinds(&log), [CallbackKind::PositionChange]);
}

#[test]
fn reset_reports_the_next_evaluation_as_initial() {
    let (w, log) = recording();
    w.evaluate(&at(100.0), None).unwrap();
    w.reset();
    assert_eq!(w.previous_position(), None);
    take(&log);

    w.evaluate(&at(100.0), None).unwrap();
    assert_eq!(
        take(&log),
        [
            call(CallbackKind::PositionChange, None, Position::Inside),
            call(CallbackKind::Enter, None, Position::Inside),
        ]
    );
}

#[test]
fn restored_state_suppresses_a_repeated_report() {
    let (a, _) = recording();
    a.evaluate(&at(100.0), None).unwrap();

    let (b, log) = recording();
    b.restore_state(a.state());
    assert_eq!(b.evaluate(&at(200.0), None).unwrap(), None);
    assert!(take(&log).is_empty());
}

struct FixedProvider {
    anchor_top: f64,
    container: ContainerMetrics,
}

impl MeasurementProvider for FixedProvider {
    fn anchor_top(&self) -> f64 {
        self.anchor_top
    }

    fn container_metrics(&self) -> ContainerMetrics {
        self.container
    }
}

#[test]
fn refresh_applies_the_configured_threshold() {
    let provider = FixedProvider {
        anchor_top: -40.0,
        container: ContainerMetrics::viewport(500.0),
    };

    let w: Waypoint = Waypoint::new(WaypointOptions::new());
    let t = w.refresh(&provider, None).unwrap().unwrap();
    assert_eq!(t.current, Position::Above);

    let mut w: Waypoint = Waypoint::new(WaypointOptions::new());
    w.set_threshold(0.1);
    let t = w.refresh(&provider, None).unwrap().unwrap();
    assert_eq!(t.current, Position::Inside);
    assert_eq!(w.measurement(-40.0, provider.container).threshold, 0.1);
}

#[test]
fn update_options_keeps_retained_position() {
    let (mut w, log) = recording();
    w.evaluate(&at(-50.0), None).unwrap();
    w.update_options(|o| o.fire_on_rapid_scroll = false);
    assert!(!w.options().fire_on_rapid_scroll);
    assert_eq!(w.previous_position(), Some(Position::Above));
    take(&log);

    w.evaluate(&at(600.0), None).unwrap();
    assert_eq!(kinds(&log), [CallbackKind::PositionChange]);
}

#[test]
fn setters_replace_callbacks() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut w: Waypoint = Waypoint::new(WaypointOptions::new());
    w.set_on_leave({
        let hits = Arc::clone(&hits);
        move |_, change| {
            assert_eq!(change.previous_position, Some(Position::Inside));
            hits.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    });
    w.evaluate(&at(100.0), None).unwrap();
    w.evaluate(&at(-50.0), None).unwrap();
    assert_eq!(hits.load(Ordering::Relaxed), 1);
}

#[test]
fn config_error_message_names_both_options() {
    let err: Error = ConfigError::RenamedOption {
        old: "scrollable_parent",
        new: "scrollable_ancestor",
    }
    .into();
    assert_eq!(
        err.to_string(),
        "the `scrollable_parent` option has been renamed to `scrollable_ancestor`"
    );
    assert_eq!(err.callback_kind(), None);
}
