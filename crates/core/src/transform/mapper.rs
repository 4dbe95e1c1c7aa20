use thiserror::Error;
use zoomy_protocol::Timespan;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MapError {
    #[error("no plot area: width {width}px, margins {margin_left}px/{margin_right}px")]
    DegenerateWidth {
        width: f64,
        margin_left: f64,
        margin_right: f64,
    },
}

/// Linear mapping from image x-coordinates to timestamps.
///
/// The plot area spans `[margin_left, width - margin_right]` pixels and
/// displays `span`. Coordinates outside it extrapolate linearly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    start: i64,
    margin_left: f64,
    seconds_per_pixel: f64,
}

impl PixelScale {
    pub fn new(
        span: Timespan,
        width: f64,
        margin_left: f64,
        margin_right: f64,
    ) -> Result<Self, MapError> {
        let plot_width = width - margin_left - margin_right;
        if !plot_width.is_finite() || plot_width <= 0.0 {
            return Err(MapError::DegenerateWidth {
                width,
                margin_left,
                margin_right,
            });
        }
        Ok(Self {
            start: span.start(),
            margin_left,
            seconds_per_pixel: span.range() as f64 / plot_width,
        })
    }

    #[inline]
    pub fn seconds_per_pixel(&self) -> f64 {
        self.seconds_per_pixel
    }

    /// Timestamp under pixel `x`, rounded to the nearest second and
    /// saturating at the `i64` bounds.
    pub fn timestamp_at(&self, x: f64) -> i64 {
        let offset = ((x - self.margin_left) * self.seconds_per_pixel).round() as i64;
        self.start.saturating_add(offset)
    }
}
