use zoomy_protocol::Timespan;

/// Largest number of wheel steps applied in one zoom; larger counts are
/// clamped.
pub const MAX_STEPS: i32 = 64;

/// Scale `span` around `anchor` by `zoom_factor ^ -steps`.
///
/// Positive `steps` zoom in. The distances from the anchor to each edge are
/// scaled independently, so the anchor keeps its on-screen position.
/// Returns `None` when rounding collapses the window or an edge no longer
/// fits in an `i64`.
pub fn zoom(span: Timespan, anchor: i64, steps: i32, zoom_factor: f64) -> Option<Timespan> {
    let steps = steps.clamp(-MAX_STEPS, MAX_STEPS);
    let factor = zoom_factor.powi(-steps);
    let anchor = anchor as f64;
    let start = whole_seconds(anchor - (anchor - span.start() as f64) * factor)?;
    let end = whole_seconds(anchor + (span.end() as f64 - anchor) * factor)?;
    Timespan::new(start, end)
}

/// Round to an `i64`, or `None` outside its range (NaN included).
fn whole_seconds(value: f64) -> Option<i64> {
    // 2^63; every f64 in [-2^63, 2^63) converts exactly.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let value = value.round();
    (-LIMIT..LIMIT).contains(&value).then_some(value as i64)
}
