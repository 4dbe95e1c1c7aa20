//! Integration test: drive a pair of synced Smokeping widgets through the
//! event sequence a browser host produces, applying every command the way
//! the host would (set the source, fire the timer, report the load).

use zoomy_core::{ConnectorKind, Options, WidgetSet};
use zoomy_protocol::{Targeted, WidgetCommand, WidgetHandle};

const NOW: i64 = 1_700_000_000;
const WIDTH: f64 = 697.0;

/// Minimal host: applies `SetSrc` by reporting a load, remembers timers.
struct Host {
    set: WidgetSet,
    pending_flush: Vec<(WidgetHandle, f64)>,
    clock_ms: f64,
}

impl Host {
    fn new() -> Self {
        Self {
            set: WidgetSet::new(),
            pending_flush: Vec::new(),
            clock_ms: 0.0,
        }
    }

    fn apply(&mut self, commands: Vec<Targeted>) {
        for Targeted { handle, command } in commands {
            match command {
                WidgetCommand::SetSrc { .. } => {
                    self.set
                        .on_load(handle, NOW, WIDTH)
                        .expect("rewritten url should parse");
                }
                WidgetCommand::ScheduleWheelFlush { delay_ms } => {
                    self.pending_flush
                        .push((handle, self.clock_ms + f64::from(delay_ms)));
                }
                WidgetCommand::AfterUpdate { .. } => {}
            }
        }
    }

    fn advance(&mut self, ms: f64) {
        self.clock_ms += ms;
        let due: Vec<_> = self
            .pending_flush
            .iter()
            .filter(|(_, at)| *at <= self.clock_ms)
            .copied()
            .collect();
        self.pending_flush.retain(|(_, at)| *at > self.clock_ms);
        for (handle, at) in due {
            let out = self.set.flush_wheel(handle, at).unwrap();
            self.apply(out);
        }
    }
}

#[test]
fn wheel_then_drag_across_synced_graphs() {
    let mut host = Host::new();
    let options = Options {
        connector: ConnectorKind::Smokeping,
        ..Options::default()
    };
    // 697px wide, 66/31 margins: 600 plot pixels for 6000 seconds.
    let src = "/smokeping.cgi?displaymode=a;start=1000;end=7000;target=net.gw";
    let a = host.set.init(src, options.clone()).unwrap();
    let b = host
        .set
        .init("/smokeping.cgi?displaymode=a;start=1000;end=7000;target=net.dns", options)
        .unwrap();
    host.set.on_load(a, NOW, WIDTH).unwrap();
    host.set.on_load(b, NOW, WIDTH).unwrap();
    host.set.sync(&[a, b]).unwrap();

    // Two quick wheel-up notches over the middle of the plot.
    let out = host.set.on_wheel(a, host.clock_ms, 366.0, 1).unwrap();
    host.apply(out);
    host.advance(40.0);
    let out = host.set.on_wheel(a, host.clock_ms, 366.0, 1).unwrap();
    host.apply(out);

    // The first timer fires during the burst and does nothing.
    host.advance(60.0);
    assert_eq!(host.set.get(a).unwrap().src(), src);

    host.advance(100.0);
    let a_widget = host.set.get(a).unwrap();
    assert_eq!(
        a_widget.src(),
        "/smokeping.cgi?displaymode=a;start=3250;end=4750;target=net.gw"
    );
    assert_eq!(
        host.set.get(b).unwrap().src(),
        "/smokeping.cgi?displaymode=a;start=3250;end=4750;target=net.dns"
    );

    // Drag 60px to the left: 1500s over 600px is 2.5s per pixel.
    host.set.on_mouse_down(b, 400.0).unwrap();
    let out = host.set.on_mouse_up(b, 340.0).unwrap();
    assert_eq!(out.len(), 3, "b's src + after_update, then a's silent src");
    host.apply(out);

    for handle in [a, b] {
        let span = host.set.get(handle).unwrap().timespan().unwrap();
        assert_eq!((span.start(), span.end()), (3400, 4900));
    }
}

#[test]
fn failed_load_restores_previous_graph() {
    let mut set = WidgetSet::new();
    let options = Options {
        connector: ConnectorKind::Plain,
        wheel_timeout: 0,
        margin_left: 0.0,
        margin_right: 0.0,
        ..Options::default()
    };
    let good = "/graph.png?host=a&start=1000&end=2000";
    let handle = set.init(good, options).unwrap();
    set.on_load(handle, NOW, 1000.0).unwrap();

    let out = set.on_wheel(handle, 0.0, 500.0, -4).unwrap();
    assert!(matches!(
        &out[0].command,
        WidgetCommand::SetSrc { url } if url == "/graph.png?host=a&start=-6500&end=9500"
    ));

    // The backend refuses to render that window.
    let out = set.on_error(handle).unwrap();
    assert_eq!(
        out,
        vec![Targeted::new(
            handle,
            WidgetCommand::SetSrc { url: good.into() }
        )]
    );
    set.on_load(handle, NOW, 1000.0).unwrap();
    let span = set.get(handle).unwrap().timespan().unwrap();
    assert_eq!((span.start(), span.end()), (1000, 2000));
}

#[test]
fn cricket_widget_respects_maxrange() {
    let mut set = WidgetSet::new();
    let options = Options {
        connector: ConnectorKind::Cricket,
        maxrange: Some(86_400),
        wheel_timeout: 0,
        ..Options::default()
    };
    let handle = set
        .init("/grapher.cgi?target=%2Frouter%2Feth0;range=43200", options)
        .unwrap();
    set.on_load(handle, NOW, WIDTH).unwrap();

    // Anchored on the right edge (now), each step out doubles the range:
    // two steps overshoot maxrange, one step lands on it.
    assert!(set.on_wheel(handle, 0.0, 666.0, -2).unwrap().is_empty());

    let out = set.on_wheel(handle, 0.0, 666.0, -1).unwrap();
    assert!(matches!(
        &out[0].command,
        WidgetCommand::SetSrc { url } if url.ends_with(";range=86400")
    ));
}
