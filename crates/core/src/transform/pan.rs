use zoomy_protocol::Timespan;

use super::PixelScale;

/// Shift `span` so the instant under `from_x` ends up under `to_x`.
///
/// Returns `None` for a drag too short to move by a whole second, or one
/// that would move the window past the `i64` range.
pub fn pan(span: Timespan, scale: &PixelScale, from_x: f64, to_x: f64) -> Option<Timespan> {
    let offset = scale.timestamp_at(from_x).checked_sub(scale.timestamp_at(to_x))?;
    if offset == 0 {
        return None;
    }
    span.shifted(offset)
}
