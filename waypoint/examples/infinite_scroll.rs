// Example: an infinite-scroll sentinel driven by synthetic scroll offsets.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use waypoint::{ContainerMetrics, Waypoint, WaypointOptions};

fn main() {
    let pages = Arc::new(AtomicUsize::new(1));

    let options = WaypointOptions::<u64>::new()
        .with_threshold(0.25)
        .with_on_position_change(|_, change| {
            println!(
                "position: {:?} -> {} (scroll event {:?})",
                change.previous_position, change.current_position, change.event
            );
            Ok(())
        })
        .with_on_enter({
            let pages = Arc::clone(&pages);
            move |_, _| {
                let n = pages.fetch_add(1, Ordering::Relaxed) + 1;
                println!("sentinel visible: loading page {n}");
                Ok(())
            }
        });
    let w = Waypoint::new(options);

    // 800px viewport, sentinel sits below 20 rows of 100px per loaded page.
    let viewport = ContainerMetrics::viewport(800.0);
    let mut scroll_y = 0.0f64;
    for tick in 0u64..60 {
        let content = pages.load(Ordering::Relaxed) as f64 * 2000.0;
        let anchor_top = content - scroll_y;
        let m = w.measurement(anchor_top, viewport);
        w.evaluate(&m, Some(&tick)).expect("callbacks do not fail");
        scroll_y += 120.0;
    }
    println!("loaded {} pages", pages.load(Ordering::Relaxed));
}
