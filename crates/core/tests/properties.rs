//! Property tests for the pixel mapping, zoom symmetry and connector
//! round-trips.

use proptest::prelude::*;
use zoomy_core::transform::{PixelScale, pan, zoom};
use zoomy_core::{ConnectorKind, Options, Widget};
use zoomy_protocol::{Timespan, WidgetCommand};

const NOW: i64 = 1_700_000_000;

/// Any representable window, however wide or far from the present.
fn any_timespan() -> impl Strategy<Value = Timespan> {
    (any::<i64>(), any::<i64>())
        .prop_filter_map("empty or too wide", |(a, b)| Timespan::new(a.min(b), a.max(b)))
}

/// Windows between one second and ten years, starting around 2001..2033.
fn timespan_strategy() -> impl Strategy<Value = Timespan> {
    (1_000_000_000i64..2_000_000_000, 1i64..315_360_000)
        .prop_map(|(start, range)| Timespan::new(start, start + range).unwrap())
}

proptest! {
    #[test]
    fn plot_area_maps_inside_span(
        span in timespan_strategy(),
        margin_left in 0.0f64..100.0,
        margin_right in 0.0f64..100.0,
        plot_width in 10.0f64..2000.0,
        fraction in 0.0f64..=1.0,
    ) {
        let width = margin_left + plot_width + margin_right;
        let scale = PixelScale::new(span, width, margin_left, margin_right).unwrap();
        let x = margin_left + fraction * plot_width;
        let t = scale.timestamp_at(x);
        prop_assert!(span.contains(t), "{t} outside {span} at x={x}");
    }

    #[test]
    fn zoom_in_then_out_restores_span(
        span in timespan_strategy(),
        anchor_fraction in 0.0f64..=1.0,
        steps in 1i32..4,
        zoom_factor in prop::sample::select(vec![1.5f64, 2.0, 3.0]),
    ) {
        let anchor = span.start() + (span.range() as f64 * anchor_fraction).round() as i64;
        let Some(zoomed_in) = zoom(span, anchor, steps, zoom_factor) else {
            // Window too narrow to zoom into.
            return Ok(());
        };
        let restored = zoom(zoomed_in, anchor, -steps, zoom_factor).unwrap();
        // Each edge is rounded once per zoom, and the second zoom magnifies
        // the first rounding error by zoom_factor^steps.
        let tolerance = zoom_factor.powi(steps).ceil() as i64 + 1;
        prop_assert!((restored.start() - span.start()).abs() <= tolerance);
        prop_assert!((restored.end() - span.end()).abs() <= tolerance);
    }

    #[test]
    fn absolute_connectors_round_trip(
        span in timespan_strategy(),
        kind in prop::sample::select(vec![
            ConnectorKind::Plain,
            ConnectorKind::Smokeping,
            ConnectorKind::Rrdli,
        ]),
        base in prop::sample::select(vec![
            "/graph.png",
            "/graph.png?host=a",
            "/smokeping.cgi?target=net.gw;displaymode=a",
            "/rrd/graph/eth0?start=1&end=2&legend=1",
        ]),
    ) {
        let connector = kind.connector();
        let url = connector.url(base, span, NOW);
        prop_assert_eq!(connector.timespan(&url, NOW), Ok(span));

        // Rewriting an already rewritten url only touches the window.
        let again = connector.url(&url, span, NOW);
        prop_assert_eq!(again, url);
    }

    #[test]
    fn zoom_and_pan_stay_representable(
        span in any_timespan(),
        anchor in any::<i64>(),
        steps in -100i32..100,
        from_x in -1e6f64..1e6,
        to_x in -1e6f64..1e6,
    ) {
        if let Some(zoomed) = zoom(span, anchor, steps, 2.0) {
            prop_assert!(zoomed.start() < zoomed.end());
            prop_assert!(zoomed.range() > 0);
        }
        let scale = PixelScale::new(span, 697.0, 66.0, 31.0).unwrap();
        if let Some(moved) = pan(span, &scale, from_x, to_x) {
            prop_assert!(moved.start() < moved.end());
            prop_assert_eq!(moved.range(), span.range());
        }
    }

    #[test]
    fn widgets_survive_arbitrary_urls_and_gestures(
        kind in prop::sample::select(ConnectorKind::ALL.to_vec()),
        start in any::<i64>(),
        end in any::<i64>(),
        range in any::<i64>(),
        now in any::<i64>(),
        steps in -100i32..100,
        x in -1e6f64..1e6,
        to_x in -1e6f64..1e6,
    ) {
        let options = Options {
            connector: kind,
            wheel_timeout: 0,
            ..Options::default()
        };
        let src = format!("/graph.cgi?start={start}&end={end}&range={range}");
        let mut widget = Widget::new(src, options).unwrap();
        // Unusable windows are reported here; later gestures are ignored.
        let _ = widget.on_load(now, 697.0);

        let mut commands = widget.zoom_at(x, steps);
        commands.extend(widget.on_wheel(0.0, x, steps));
        widget.on_mouse_down(x);
        commands.extend(widget.on_mouse_up(to_x));
        let _ = widget.timestamp_at(x);

        for command in &commands {
            if let WidgetCommand::AfterUpdate { span } = command {
                prop_assert!(span.start() < span.end());
                prop_assert!(span.range() > 0);
            }
        }
    }

    #[test]
    fn cricket_round_trips_windows_ending_now(range in 1i64..315_360_000) {
        let connector = ConnectorKind::Cricket.connector();
        let span = Timespan::new(NOW - range, NOW).unwrap();
        let url = connector.url("/grapher.cgi?target=%2Frouter", span, NOW);
        prop_assert_eq!(connector.timespan(&url, NOW), Ok(span));
    }
}

#[test]
fn documented_examples() {
    let span = ConnectorKind::Smokeping
        .connector()
        .timespan("g.png;start=1000;end=2000", NOW)
        .unwrap();
    let scale = PixelScale::new(span, 1000.0, 0.0, 0.0).unwrap();
    assert_eq!(scale.timestamp_at(500.0), 1500);

    let zoomed = zoom(span, 1500, 1, 2.0).unwrap();
    assert_eq!((zoomed.start(), zoomed.end()), (1250, 1750));
}
