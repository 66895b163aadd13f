// Example: a simulated host with a scrolling element and a throttled scroll stream.
use waypoint_adapter::{
    Controller, Interval, MountOptions, ScrollContainer, ScrollHost, WaypointOptions,
};

struct SimHost {
    scroll_y: f64,
    anchor_offset: f64,
    listeners: usize,
}

impl ScrollHost for SimHost {
    type Element = &'static str;

    fn find_scrollable_ancestor(&self) -> ScrollContainer<&'static str> {
        ScrollContainer::Element("#feed")
    }

    fn anchor_top(&self) -> f64 {
        // The feed starts 100px down the viewport.
        100.0 + self.anchor_offset - self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        900.0
    }

    fn element_height(&self, _element: &&'static str) -> f64 {
        600.0
    }

    fn element_top(&self, _element: &&'static str) -> f64 {
        100.0
    }

    fn add_scroll_listener(&mut self, container: &ScrollContainer<&'static str>) {
        println!("subscribe scroll on {container:?}");
        self.listeners += 1;
    }

    fn remove_scroll_listener(&mut self, container: &ScrollContainer<&'static str>) {
        println!("unsubscribe scroll on {container:?}");
        self.listeners -= 1;
    }

    fn add_resize_listener(&mut self) {
        self.listeners += 1;
    }

    fn remove_resize_listener(&mut self) {
        self.listeners -= 1;
    }
}

fn main() {
    let host = SimHost {
        scroll_y: 0.0,
        anchor_offset: 1500.0,
        listeners: 0,
    };
    let options = WaypointOptions::<u64>::new()
        .with_on_enter(|_, change| {
            println!("enter  (from {:?}, event {:?})", change.previous_position, change.event);
            Ok(())
        })
        .with_on_leave(|_, change| {
            println!("leave  (to {}, event {:?})", change.current_position, change.event);
            Ok(())
        });

    let mut c = Controller::new(host, options).with_throttle(Interval::new(50));
    if let Err(err) = c.mount(MountOptions::new()) {
        eprintln!("mount failed: {err}");
        return;
    }

    // A fling: 400px per 16ms frame, so most frames are throttled and the anchor is never
    // sampled while visible.
    for frame in 0u64..12 {
        let now_ms = frame * 16;
        c.host_mut().scroll_y += 400.0;
        if let Err(err) = c.on_scroll(frame, now_ms) {
            eprintln!("scroll failed: {err}");
        }
        if let Err(err) = c.tick(now_ms) {
            eprintln!("tick failed: {err}");
        }
    }
    let _ = c.tick(1_000);

    println!("final position: {:?}", c.waypoint().previous_position());
    c.unmount();
    println!("listeners after unmount: {}", c.host().listeners);
}
